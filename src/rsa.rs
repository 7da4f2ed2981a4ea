//! Textbook RSA keys and the demonstration signer.
//!
//! **Not for production use.** Primes are supplied by the caller, there is
//! no padding, and two of the three exponentiation methods exist to be
//! broken.

use crate::{
    errors::{Error, Result},
    exp::{ladder_pow, pow_with, ExpMethod},
    montgomery::Montgomery,
    uint::Uint,
};
use core::time::Duration;
use std::time::Instant;

/// An RSA key constructed from externally supplied primes.
#[derive(Copy, Clone, Debug)]
pub struct RsaKey<const LIMBS: usize> {
    p: Uint<LIMBS>,
    q: Uint<LIMBS>,
    n: Uint<LIMBS>,
    phi: Uint<LIMBS>,
    e: Uint<LIMBS>,
    d: Uint<LIMBS>,
}

impl<const LIMBS: usize> RsaKey<LIMBS> {
    /// Derive a key from primes `p`, `q` and public exponent `e`:
    /// `n = p * q`, `phi = (p - 1) * (q - 1)`, `d = e^-1 mod phi`.
    ///
    /// Fails with [`Error::Overflow`] when a product exceeds the integer
    /// width, [`Error::InvalidModulus`] when the resulting modulus would be
    /// even or degenerate, and [`Error::NonInvertible`] when
    /// `gcd(e, phi) != 1`. Primality of `p` and `q` is the caller's
    /// responsibility.
    pub fn new(p: &Uint<LIMBS>, q: &Uint<LIMBS>, e: &Uint<LIMBS>) -> Result<Self> {
        if p.bits() < 2 || q.bits() < 2 {
            return Err(Error::InvalidModulus);
        }

        let n = Option::<Uint<LIMBS>>::from(p.checked_mul(q)).ok_or(Error::Overflow)?;
        if !n.is_odd().is_true_vartime() {
            return Err(Error::InvalidModulus);
        }

        let p1 = p.wrapping_sub(&Uint::ONE);
        let q1 = q.wrapping_sub(&Uint::ONE);
        let phi = Option::<Uint<LIMBS>>::from(p1.checked_mul(&q1)).ok_or(Error::Overflow)?;

        let d = e.inv_mod(&phi).ok_or(Error::NonInvertible)?;

        Ok(Self {
            p: *p,
            q: *q,
            n,
            phi,
            e: *e,
            d,
        })
    }

    /// The public modulus n.
    pub const fn n(&self) -> &Uint<LIMBS> {
        &self.n
    }

    /// The totient `phi(n) = (p - 1) * (q - 1)`.
    pub const fn phi(&self) -> &Uint<LIMBS> {
        &self.phi
    }

    /// The public exponent e.
    pub const fn e(&self) -> &Uint<LIMBS> {
        &self.e
    }

    /// The private exponent d.
    pub const fn d(&self) -> &Uint<LIMBS> {
        &self.d
    }

    /// The prime p.
    pub const fn p(&self) -> &Uint<LIMBS> {
        &self.p
    }

    /// The prime q.
    pub const fn q(&self) -> &Uint<LIMBS> {
        &self.q
    }
}

/// One timed signing operation: the signature, the wall-clock duration of
/// the exponentiation, and the extra-reduction flag of its final conversion
/// product (the CSV `step4` debug column).
#[derive(Copy, Clone, Debug)]
pub struct SignTiming<const LIMBS: usize> {
    /// The produced signature.
    pub signature: Uint<LIMBS>,
    /// Nanoseconds spent inside the exponentiation call.
    pub duration_ns: u64,
    /// Whether the final out-of-Montgomery product took the slow path.
    pub final_reduction: bool,
}

/// A signer binding a key to one exponentiation method.
///
/// The method is immutable for the signer's lifetime; workers may share a
/// signer freely, as signing takes `&self` and touches no mutable state.
#[derive(Copy, Clone, Debug)]
pub struct Signer<const LIMBS: usize> {
    key: RsaKey<LIMBS>,
    method: ExpMethod,
    pause: Duration,
    r_exp: Option<u32>,
}

impl<const LIMBS: usize> Signer<LIMBS> {
    /// The default suspension per extra reduction in
    /// [`ExpMethod::PlainSleep`] mode.
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(2);

    /// Create a signer with [`Self::DEFAULT_PAUSE`].
    pub fn new(key: RsaKey<LIMBS>, method: ExpMethod) -> Self {
        Self::with_pause(key, method, Self::DEFAULT_PAUSE)
    }

    /// Create a signer with an explicit sleep-amplification pause.
    pub fn with_pause(key: RsaKey<LIMBS>, method: ExpMethod, pause: Duration) -> Self {
        Self {
            key,
            method,
            pause,
            r_exp: None,
        }
    }

    /// Override the Montgomery radix exponent (see
    /// [`Montgomery::with_r_exp`]).
    pub fn with_r_exp(mut self, r_exp: u32) -> Self {
        self.r_exp = Some(r_exp);
        self
    }

    /// The key this signer holds.
    pub const fn key(&self) -> &RsaKey<LIMBS> {
        &self.key
    }

    /// The method this signer was constructed with.
    pub const fn method(&self) -> ExpMethod {
        self.method
    }

    /// Sign: `message^d mod n`.
    pub fn sign(&self, message: &Uint<LIMBS>) -> Result<Uint<LIMBS>> {
        Ok(self.exponentiate(message, &self.key.d)?.0)
    }

    /// Verify (recover the message): `signature^e mod n`.
    pub fn verify(&self, signature: &Uint<LIMBS>) -> Result<Uint<LIMBS>> {
        Ok(self.exponentiate(signature, &self.key.e)?.0)
    }

    /// Sign and report the duration of the exponentiation call alone,
    /// measured with a monotonic clock; message generation and I/O are the
    /// caller's and excluded.
    pub fn sign_timed(&self, message: &Uint<LIMBS>) -> Result<SignTiming<LIMBS>> {
        let start = Instant::now();
        let (signature, final_reduction) = self.exponentiate(message, &self.key.d)?;
        let duration_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        Ok(SignTiming {
            signature,
            duration_ns,
            final_reduction,
        })
    }

    /// The Montgomery context this signer exponentiates under.
    pub fn montgomery(&self) -> Result<Montgomery<LIMBS>> {
        match self.r_exp {
            Some(k) => Montgomery::with_r_exp(&self.key.n, k),
            None => Montgomery::new(&self.key.n),
        }
    }

    fn exponentiate(
        &self,
        base: &Uint<LIMBS>,
        exponent: &Uint<LIMBS>,
    ) -> Result<(Uint<LIMBS>, bool)> {
        let monty = self.montgomery()?;

        Ok(match self.method {
            ExpMethod::Plain => pow_with(&monty, base, exponent, || ()),
            ExpMethod::PlainSleep => {
                pow_with(&monty, base, exponent, || std::thread::sleep(self.pause))
            }
            ExpMethod::Ladder => (ladder_pow(&monty, base, exponent), false),
        })
    }
}
