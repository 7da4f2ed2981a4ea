//! Modular exponentiation: the leaky square-and-multiply variants and the
//! constant-work Montgomery powering ladder.

use crate::{errors::Result, montgomery::Montgomery, uint::Uint};
use core::time::Duration;

/// The exponentiation method a [`Signer`](crate::Signer) uses, fixed at
/// construction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ExpMethod {
    /// Square-and-multiply with a conditional multiply per set exponent bit
    /// and a branching Montgomery reduction. Leaks the exponent through
    /// running time.
    #[default]
    Plain,

    /// [`ExpMethod::Plain`] with a fixed thread sleep on every extra
    /// Montgomery reduction, simulating a slow device and amplifying the
    /// leak by orders of magnitude.
    PlainSleep,

    /// The Montgomery powering ladder: one multiplication and one squaring
    /// per exponent bit, no secret-dependent branches, constant-time
    /// reduction. Only the exponent's bit length remains observable.
    Ladder,
}

/// Square-and-multiply exponentiation: `base^exponent mod modulus`.
///
/// Fails with [`Error::InvalidModulus`](crate::Error::InvalidModulus) when
/// the modulus is even or zero. A zero-bit exponent yields 1 as the empty
/// product.
pub fn mod_exp<const LIMBS: usize>(
    base: &Uint<LIMBS>,
    exponent: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
) -> Result<Uint<LIMBS>> {
    let monty = Montgomery::new(modulus)?;
    Ok(pow_with(&monty, base, exponent, || ()).0)
}

/// [`mod_exp`] with a fixed suspension on every extra Montgomery reduction.
///
/// The sleeping signer stands in for a device slow enough that the
/// data-dependent reduction dominates per-message timing variance; the
/// attack's threshold is calibrated against `pause`.
pub fn mod_exp_sleep<const LIMBS: usize>(
    base: &Uint<LIMBS>,
    exponent: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
    pause: Duration,
) -> Result<Uint<LIMBS>> {
    let monty = Montgomery::new(modulus)?;
    Ok(pow_with(&monty, base, exponent, || std::thread::sleep(pause)).0)
}

/// Montgomery powering ladder exponentiation: `base^exponent mod modulus`
/// with per-bit work independent of the exponent's value.
pub fn power_ladder<const LIMBS: usize>(
    base: &Uint<LIMBS>,
    exponent: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
) -> Result<Uint<LIMBS>> {
    let monty = Montgomery::new(modulus)?;
    Ok(ladder_pow(&monty, base, exponent))
}

/// Left-to-right square-and-multiply over Montgomery form. `on_reduction`
/// runs every time a product takes its extra reduction; the bool result is
/// the reduction flag of the final out-of-Montgomery conversion.
pub(crate) fn pow_with<const LIMBS: usize, F: FnMut()>(
    monty: &Montgomery<LIMBS>,
    base: &Uint<LIMBS>,
    exponent: &Uint<LIMBS>,
    mut on_reduction: F,
) -> (Uint<LIMBS>, bool) {
    let base_bar = monty.to_montgomery(base);
    let mut x_bar = monty.one();

    let mut i = exponent.bits();
    while i > 0 {
        i -= 1;

        let (sq, reduced) = monty.product_vartime(&x_bar, &x_bar);
        if reduced {
            on_reduction();
        }
        x_bar = sq;

        if exponent.bit_vartime(i) {
            let (mul, reduced) = monty.product_vartime(&base_bar, &x_bar);
            if reduced {
                on_reduction();
            }
            x_bar = mul;
        }
    }

    let (out, reduced) = monty.product_vartime(&x_bar, &Uint::ONE);
    if reduced {
        on_reduction();
    }
    (out, reduced)
}

/// The Joye–Yen ladder body. After processing exponent bits `k-1..=i`,
/// `r0 = base^p` and `r1 = base^(p+1)` in Montgomery form, where `p` is the
/// integer those bits form. Operand choice and writeback go through
/// constant-time selects, so the sequence of products is identical for
/// every exponent of the same bit length.
pub(crate) fn ladder_pow<const LIMBS: usize>(
    monty: &Montgomery<LIMBS>,
    base: &Uint<LIMBS>,
    exponent: &Uint<LIMBS>,
) -> Uint<LIMBS> {
    let mut r0 = monty.one();
    let mut r1 = monty.to_montgomery(base);

    let mut i = exponent.bits();
    while i > 0 {
        i -= 1;
        let bit = exponent.bit(i);

        let product = monty.product(&r0, &r1);
        let sq_operand = Uint::select(&r0, &r1, bit);
        let square = monty.product(&sq_operand, &sq_operand);

        // bit == 0: r0 <- r0^2,    r1 <- r0 * r1
        // bit == 1: r0 <- r0 * r1, r1 <- r1^2
        r0 = Uint::select(&square, &product, bit);
        r1 = Uint::select(&product, &square, bit);
    }

    monty.product(&r0, &Uint::ONE)
}
