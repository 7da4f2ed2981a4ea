//! Montgomery arithmetic over a runtime odd modulus.
//!
//! For an odd modulus `n` and radix `r = 2^k > n`, the Montgomery product
//! `MP(a, b) = a * b * r^-1 mod n` replaces the per-operation division of
//! plain modular multiplication with shifts and one conditional final
//! subtraction. That final subtraction is the heart of this crate: it is
//! data dependent, and the two product flavors below either expose it
//! ([`Montgomery::product_vartime`], used by the leaky signer and mirrored
//! by the attack) or mask it ([`Montgomery::product`], used by the ladder).

use crate::{
    ct::CtChoice,
    errors::{Error, Result},
    limb::Limb,
    uint::Uint,
};

/// Parameters for the Montgomery form of a modulus provided at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Montgomery<const LIMBS: usize> {
    /// The odd modulus.
    modulus: Uint<LIMBS>,
    /// The radix exponent k, with `r = 2^k > modulus`.
    r_exp: u32,
    /// n' in `r * r^-1 - n * n' == 1`; the low k bits of -n^-1 mod r.
    n_prime: Uint<LIMBS>,
    /// `r mod n`, which is also 1 in Montgomery form.
    r_mod_n: Uint<LIMBS>,
}

impl<const LIMBS: usize> Montgomery<LIMBS> {
    /// Instantiate parameters for the given odd modulus, with the radix
    /// exponent chosen as the modulus' bit length rounded up to the next
    /// limb boundary (the smallest aligned radix exceeding the modulus).
    ///
    /// Fails with [`Error::InvalidModulus`] when the modulus is even or
    /// zero.
    pub fn new(modulus: &Uint<LIMBS>) -> Result<Self> {
        let bits = modulus.bits();
        let r_exp = ((bits + Limb::BITS - 1) / Limb::BITS) * Limb::BITS;
        Self::with_r_exp(modulus, r_exp)
    }

    /// Instantiate parameters with an explicit radix exponent, which may be
    /// tighter than the limb-aligned default. The product's extra-reduction
    /// rate scales with `n/r`, so demonstrations want `r` close above `n`.
    ///
    /// Fails with [`Error::InvalidModulus`] when the modulus is even or
    /// zero, or when `r_exp` falls outside
    /// `bits(modulus) <= r_exp <= Uint::BITS` (so that `r > n` holds and
    /// `r` stays representable).
    pub fn with_r_exp(modulus: &Uint<LIMBS>, r_exp: u32) -> Result<Self> {
        if !modulus.is_odd().is_true_vartime() || modulus.is_zero_vartime() {
            return Err(Error::InvalidModulus);
        }
        if r_exp < modulus.bits() || r_exp > Uint::<LIMBS>::BITS {
            return Err(Error::InvalidModulus);
        }

        let (_, n_prime) = Self::mont_inverse(modulus, r_exp);
        let r_mod_n = r_mod(modulus, r_exp);

        Ok(Self {
            modulus: *modulus,
            r_exp,
            n_prime,
            r_mod_n,
        })
    }

    /// Compute `(r^-1 mod n, n')` satisfying `r * r^-1 - n * n' == 1` for
    /// `r = 2^k`, by the bitwise extended Euclidean iteration: maintain
    /// `2^i * x == 1 (mod n)` with `y = (2^i * x - 1) / n`, so an odd `x`
    /// folds the modulus in and sets bit `i` of `y`.
    pub fn mont_inverse(modulus: &Uint<LIMBS>, k: u32) -> (Uint<LIMBS>, Uint<LIMBS>) {
        debug_assert!(modulus.is_odd().is_true_vartime());
        let mut x = Uint::ONE;
        let mut y = Uint::ZERO;
        let mut i = 0;

        while i < k {
            let x_odd = x.is_odd();
            // x <- x/2 or (x + n)/2, keeping the carried-out top bit
            let folded = Uint::select(&Uint::ZERO, modulus, x_odd);
            let (sum, carry) = x.adc(&folded, Limb::ZERO);
            x = sum
                .shr1()
                .set_bit(Uint::<LIMBS>::BITS - 1, CtChoice::from_word_lsb(carry.0));
            y = y.set_bit(i, x_odd);
            i += 1;
        }

        (x, y)
    }

    /// Bring `a` into Montgomery form: `a * r mod n`. `a` need not be
    /// reduced.
    pub fn to_montgomery(&self, a: &Uint<LIMBS>) -> Uint<LIMBS> {
        let wide = Uint::shl_vartime_wide((*a, Uint::ZERO), self.r_exp);
        Uint::rem_wide(wide, &self.modulus).expect("modulus is nonzero")
    }

    /// Take `a` out of Montgomery form: `a * r^-1 mod n`, via a product
    /// with the plain integer 1.
    pub fn from_montgomery(&self, a: &Uint<LIMBS>) -> Uint<LIMBS> {
        self.product(a, &Uint::ONE)
    }

    /// The value 1 in Montgomery form: `r mod n`.
    pub const fn one(&self) -> Uint<LIMBS> {
        self.r_mod_n
    }

    /// The modulus n.
    pub const fn modulus(&self) -> &Uint<LIMBS> {
        &self.modulus
    }

    /// The radix exponent k.
    pub const fn r_exp(&self) -> u32 {
        self.r_exp
    }

    /// The n' parameter.
    pub const fn n_prime(&self) -> &Uint<LIMBS> {
        &self.n_prime
    }

    /// The core reduction: for `0 <= a, b < n` computes
    /// `u = (t + m * n) / r` with `t = a * b` and `m = (t mod r) * n' mod r`,
    /// returning `u` before the final subtraction together with the flag
    /// saying whether that subtraction is needed (`u >= n`, including the
    /// carry bit when `r` spans the full width).
    fn reduce(&self, a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> (Uint<LIMBS>, CtChoice) {
        let k = self.r_exp;
        let (t_lo, t_hi) = a.mul_wide(b);

        let m = t_lo
            .rem2k_vartime(k)
            .wrapping_mul(&self.n_prime)
            .rem2k_vartime(k);

        let (mn_lo, mn_hi) = m.mul_wide(&self.modulus);

        let (sum_lo, carry) = t_lo.adc(&mn_lo, Limb::ZERO);
        let (sum_hi, carry) = t_hi.adc(&mn_hi, carry);

        // division by r is a shift; the carry limb holds bit 2*BITS, which
        // only arises when k == BITS and lands on bit k of the quotient
        let u = Uint::shr_vartime_wide_lo((sum_lo, sum_hi), k);
        let overflow = CtChoice::from_word_lsb(carry.0);

        let needs_sub = overflow.or(Uint::ct_lt(&u, &self.modulus).not());
        (u, needs_sub)
    }

    /// Montgomery product with a constant-time finale: the reduced value is
    /// always computed and selected without branching.
    pub fn product(&self, a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Uint<LIMBS> {
        let (u, needs_sub) = self.reduce(a, b);
        let reduced = u.wrapping_sub(&self.modulus);
        Uint::select(&u, &reduced, needs_sub)
    }

    /// Montgomery product with the textbook branching finale, returning
    /// whether the extra reduction ran. The branch is the timing leak the
    /// naive signer exhibits and the attack keys on.
    pub fn product_vartime(&self, a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> (Uint<LIMBS>, bool) {
        let (u, needs_sub) = self.reduce(a, b);
        if needs_sub.is_true_vartime() {
            (u.wrapping_sub(&self.modulus), true)
        } else {
            (u, false)
        }
    }
}

/// `2^k mod n` for `k <= Uint::BITS`.
fn r_mod<const LIMBS: usize>(modulus: &Uint<LIMBS>, k: u32) -> Uint<LIMBS> {
    let wide = Uint::shl_vartime_wide((Uint::ONE, Uint::ZERO), k);
    Uint::rem_wide(wide, modulus).expect("modulus is nonzero")
}
