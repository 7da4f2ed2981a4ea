//! Offline recovery of the private exponent from signing timings.
//!
//! The adversary knows the public modulus and a batch of per-message signing
//! durations observed against the sleep-amplified square-and-multiply
//! signer. Because that signer's per-iteration state is a deterministic
//! function of the message and the exponent bits processed so far, the
//! attack replays it: each round it advances a per-sample simulation by one
//! squaring, hypothesizes the conditional multiply for the next unknown
//! bit, and partitions the batch by whether that product would take the
//! Montgomery extra reduction. If the bit really is 1, the signer performed
//! exactly that product on every sample, so the slow-path class is
//! systematically slower; if the bit is 0, the two classes are
//! exchangeable. A threshold on the difference of class means decides.

use crate::{
    errors::{Error, Result},
    montgomery::Montgomery,
    sample::TimingSample,
    uint::Uint,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Default per-class floor below which a round refuses to classify.
pub const MIN_CLASS_SAMPLES: usize = 500;

/// Tuning for [`TimingAttack`].
#[derive(Copy, Clone, Debug)]
pub struct AttackConfig {
    /// Decision threshold in nanoseconds: a round declares the bit 1 when
    /// the class means differ by more than this. Typically calibrated to
    /// the signer's per-reduction pause.
    pub threshold_ns: u64,

    /// Number of exponent bits to recover, counted from the most
    /// significant. Use the totient's bit length when it is known, the
    /// modulus' otherwise; excess rounds append zeros the verifier strips.
    pub max_bits: u32,

    /// Per-class floor below which a round aborts with
    /// [`Error::InsufficientSamples`].
    pub min_class_samples: usize,

    /// When set, each sample's duration is reduced by `unit * reductions`
    /// for the extra reductions its simulation has already replayed,
    /// removing the recovered prefix's contribution from the class means.
    pub unit_cost_ns: Option<u64>,
}

impl AttackConfig {
    /// Configuration with the default class floor and raw (non-residual)
    /// means.
    pub const fn new(threshold_ns: u64, max_bits: u32) -> Self {
        Self {
            threshold_ns,
            max_bits,
            min_class_samples: MIN_CLASS_SAMPLES,
            unit_cost_ns: None,
        }
    }

    /// Override the per-class floor.
    pub const fn min_class_samples(mut self, floor: usize) -> Self {
        self.min_class_samples = floor;
        self
    }

    /// Subtract the predicted cost of the recovered prefix from each sample
    /// before comparing class means.
    pub const fn unit_cost_ns(mut self, unit: u64) -> Self {
        self.unit_cost_ns = Some(unit);
        self
    }
}

/// The outcome of a recovery run: exponent bits, most significant first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recovery {
    /// Recovered bits, one per completed round, most significant first.
    pub bits: Vec<bool>,
    /// False when the run was cancelled before reaching its round bound.
    pub complete: bool,
}

impl Recovery {
    /// Assemble the recovered bits into an integer, most significant bit
    /// first. Panics if more bits were recovered than the width holds.
    pub fn to_uint<const LIMBS: usize>(&self) -> Uint<LIMBS> {
        assert!(self.bits.len() <= Uint::<LIMBS>::BITS as usize);
        let mut acc = Uint::ZERO;
        for bit in &self.bits {
            acc = acc.shl1();
            if *bit {
                acc = acc.bitor(&Uint::ONE);
            }
        }
        acc
    }
}

/// Per-bit timing attack against the naive signer.
#[derive(Clone, Debug)]
pub struct TimingAttack<const LIMBS: usize> {
    monty: Montgomery<LIMBS>,
    config: AttackConfig,
}

impl<const LIMBS: usize> TimingAttack<LIMBS> {
    /// Set up the attack for a public modulus, deriving the same Montgomery
    /// parameters the signer used.
    ///
    /// Fails with [`Error::InvalidModulus`] for an even or zero modulus.
    pub fn new(modulus: &Uint<LIMBS>, config: AttackConfig) -> Result<Self> {
        Ok(Self {
            monty: Montgomery::new(modulus)?,
            config,
        })
    }

    /// Set up the attack against a signer using an explicit radix exponent.
    pub fn with_r_exp(modulus: &Uint<LIMBS>, r_exp: u32, config: AttackConfig) -> Result<Self> {
        Ok(Self {
            monty: Montgomery::with_r_exp(modulus, r_exp)?,
            config,
        })
    }

    /// Run the recovery over the full sample batch.
    pub fn recover(&self, samples: &[TimingSample<LIMBS>]) -> Result<Recovery> {
        let cancel = AtomicBool::new(false);
        self.recover_with_cancel(samples, &cancel)
    }

    /// Run the recovery, checking `cancel` at every bit boundary. On
    /// cancellation the bits recovered so far are surfaced with
    /// `complete == false`.
    pub fn recover_with_cancel(
        &self,
        samples: &[TimingSample<LIMBS>],
        cancel: &AtomicBool,
    ) -> Result<Recovery> {
        let floor = self.config.min_class_samples;
        if samples.len() < 2 * floor {
            return Err(Error::InsufficientSamples {
                round: 0,
                class_a: samples.len(),
                class_b: 0,
            });
        }

        let count = samples.len();
        let one = self.monty.one();

        let message_bars: Vec<Uint<LIMBS>> = samples
            .iter()
            .map(|s| self.monty.to_montgomery(&s.message))
            .collect();

        // The signer's first iteration squares r mod n (a fixed point) and
        // multiplies by the message: that product can never take the extra
        // reduction, so the leading set bit carries no signal. It is seeded
        // directly; every exponent's leading processed bit is 1.
        let mut bits = vec![true];
        let mut states = Vec::with_capacity(count);
        let mut replayed = vec![0u32; count];

        for (i, m_bar) in message_bars.iter().enumerate() {
            let (sq, r1) = self.monty.product_vartime(&one, &one);
            let (state, r2) = self.monty.product_vartime(m_bar, &sq);
            replayed[i] = u32::from(r1) + u32::from(r2);
            states.push(state);
        }

        let mut round = 1;
        while round < self.config.max_bits {
            if cancel.load(Ordering::Relaxed) {
                return Ok(Recovery {
                    bits,
                    complete: false,
                });
            }

            // advance every simulation by the unconditional squaring
            for (i, state) in states.iter_mut().enumerate() {
                let (sq, reduced) = self.monty.product_vartime(state, state);
                *state = sq;
                replayed[i] += u32::from(reduced);
            }

            // hypothesize the conditional multiply for this bit
            let hypotheses: Vec<(Uint<LIMBS>, bool)> = message_bars
                .iter()
                .zip(states.iter())
                .map(|(m_bar, state)| self.monty.product_vartime(m_bar, state))
                .collect();

            let class_a = hypotheses.iter().filter(|(_, slow)| *slow).count();
            let class_b = count - class_a;
            if class_a < floor || class_b < floor {
                return Err(Error::InsufficientSamples {
                    round,
                    class_a,
                    class_b,
                });
            }

            let (mut sum_a, mut sum_b) = (0.0f64, 0.0f64);
            for (i, (_, slow)) in hypotheses.iter().enumerate() {
                let residual = match self.config.unit_cost_ns {
                    Some(unit) => {
                        samples[i].duration_ns as f64 - (unit * u64::from(replayed[i])) as f64
                    }
                    None => samples[i].duration_ns as f64,
                };
                if *slow {
                    sum_a += residual;
                } else {
                    sum_b += residual;
                }
            }
            let mean_a = sum_a / class_a as f64;
            let mean_b = sum_b / class_b as f64;

            if mean_a - mean_b > self.config.threshold_ns as f64 {
                bits.push(true);
                for (i, (product, reduced)) in hypotheses.into_iter().enumerate() {
                    states[i] = product;
                    replayed[i] += u32::from(reduced);
                }
            } else {
                bits.push(false);
            }

            round += 1;
        }

        Ok(Recovery {
            bits,
            complete: true,
        })
    }
}

/// Strip trailing zero rounds from a recovered exponent until it verifies
/// against `e` and `phi`, returning the verified exponent. The attack runs
/// for a fixed round bound, so an exponent shorter than the bound comes out
/// shifted left by the surplus rounds.
pub fn verify_recovery<const LIMBS: usize>(
    recovery: &Recovery,
    e: &Uint<LIMBS>,
    phi: &Uint<LIMBS>,
) -> Option<Uint<LIMBS>> {
    let mut candidate: Uint<LIMBS> = recovery.to_uint();

    while !candidate.is_zero_vartime() {
        let (lo, hi) = e.mul_wide(&candidate);
        if let Ok(rem) = Uint::rem_wide((lo, hi), phi) {
            if rem == Uint::ONE {
                return Some(candidate);
            }
        }
        if !candidate.bit_vartime(0) {
            candidate = candidate.shr1();
        } else {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{AttackConfig, Recovery, TimingAttack};
    use crate::{sample::TimingSample, Error, U64};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn recovery_to_uint() {
        let rec = Recovery {
            bits: vec![true, false, true, true],
            complete: true,
        };
        assert_eq!(rec.to_uint::<{ nlimbs!(64) }>(), U64::from_u64(0b1011));
    }

    #[test]
    fn rejects_undersized_batches() {
        let config = AttackConfig::new(1_000, 8).min_class_samples(10);
        let attack = TimingAttack::new(&U64::from_u64(9991), config).unwrap();
        let samples: Vec<TimingSample<{ nlimbs!(64) }>> = (0..5)
            .map(|i| TimingSample::new(U64::from_u64(i + 1), 100))
            .collect();

        assert!(matches!(
            attack.recover(&samples),
            Err(Error::InsufficientSamples { round: 0, .. })
        ));
    }

    #[test]
    fn cancellation_surfaces_partial_bits() {
        let config = AttackConfig::new(1_000, 8).min_class_samples(1);
        let attack = TimingAttack::new(&U64::from_u64(9991), config).unwrap();
        let samples: Vec<TimingSample<{ nlimbs!(64) }>> = (0..16)
            .map(|i| TimingSample::new(U64::from_u64(i + 1), 100))
            .collect();

        let cancel = AtomicBool::new(false);
        cancel.store(true, Ordering::Relaxed);
        let rec = attack.recover_with_cancel(&samples, &cancel).unwrap();
        assert!(!rec.complete);
        assert_eq!(rec.bits, vec![true]);
    }
}
