//! Sample collection: wall-clock measurement against a live signer, and a
//! noiseless synthetic generator for deterministic tests.

use crate::{
    errors::Result,
    exp::pow_with,
    rsa::{RsaKey, Signer},
    sample::TimingSample,
    uint::Uint,
};
use rand_core::CryptoRngCore;
use rayon::prelude::*;

/// Collect `count` timed signings of uniformly random messages in `[1, n)`.
///
/// Workers sign disjoint messages in parallel; the output order is the
/// batch order regardless of scheduling, and each duration covers the
/// exponentiation call only.
pub fn collect_samples<const LIMBS: usize>(
    signer: &Signer<LIMBS>,
    count: usize,
) -> Result<Vec<TimingSample<LIMBS>>> {
    let n = *signer.key().n();

    (0..count)
        .into_par_iter()
        .map_init(rand::thread_rng, |rng, _| {
            let message = random_message(rng, &n);
            let timing = signer.sign_timed(&message)?;
            Ok(TimingSample::with_final_reduction(
                message,
                timing.duration_ns,
                timing.final_reduction,
            ))
        })
        .collect()
}

/// Generate `count` synthetic samples whose durations are exactly
/// `unit_cost_ns` per Montgomery extra reduction the sleeping signer would
/// execute: the clean-data model under which recovery is deterministic.
pub fn simulate_samples<const LIMBS: usize>(
    key: &RsaKey<LIMBS>,
    count: usize,
    unit_cost_ns: u64,
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> Result<Vec<TimingSample<LIMBS>>> {
    simulate_samples_with_r_exp(key, count, unit_cost_ns, rng, None)
}

/// [`simulate_samples`] with an explicit Montgomery radix exponent.
pub fn simulate_samples_with_r_exp<const LIMBS: usize>(
    key: &RsaKey<LIMBS>,
    count: usize,
    unit_cost_ns: u64,
    rng: &mut (impl CryptoRngCore + ?Sized),
    r_exp: Option<u32>,
) -> Result<Vec<TimingSample<LIMBS>>> {
    let monty = match r_exp {
        Some(k) => crate::montgomery::Montgomery::with_r_exp(key.n(), k)?,
        None => crate::montgomery::Montgomery::new(key.n())?,
    };

    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let message = random_message(rng, key.n());

        let mut reductions = 0u64;
        let (_, final_reduction) = pow_with(&monty, &message, key.d(), || reductions += 1);

        samples.push(TimingSample::with_final_reduction(
            message,
            reductions * unit_cost_ns,
            final_reduction,
        ));
    }

    Ok(samples)
}

/// A uniformly random message in `[1, n)`.
fn random_message<const LIMBS: usize>(
    rng: &mut (impl CryptoRngCore + ?Sized),
    n: &Uint<LIMBS>,
) -> Uint<LIMBS> {
    loop {
        let candidate = Uint::random_mod(rng, n);
        if !candidate.is_zero_vartime() {
            break candidate;
        }
    }
}
