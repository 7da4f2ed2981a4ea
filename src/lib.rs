//! Demonstration and defense of a timing side channel in RSA modular
//! exponentiation.
//!
//! # About
//! This crate implements a textbook RSA signer whose modular exponentiation
//! runs in one of three interchangeable modes, together with the offline
//! statistical attack that breaks the leaky mode:
//!
//! - [`ExpMethod::Plain`]: left-to-right square-and-multiply over Montgomery
//!   form. The conditional multiply and the data-dependent final subtraction
//!   of the Montgomery product leak the private exponent bit by bit.
//! - [`ExpMethod::PlainSleep`]: the same algorithm with a fixed thread sleep
//!   on every extra Montgomery reduction, simulating a slow device and
//!   amplifying the leak far above measurement noise.
//! - [`ExpMethod::Ladder`]: the Joye–Yen Montgomery powering ladder. Every
//!   exponent bit costs exactly one multiplication and one squaring, with
//!   constant-time reduction and operand selection, which defeats the
//!   per-bit timing distinguisher.
//!
//! [`TimingAttack`] consumes `(message, duration)` samples observed against
//! the sleeping signer and reconstructs the private exponent from the most
//! significant bit down, partitioning samples each round by whether a
//! hypothesized Montgomery product would take its extra reduction.
//!
//! The arithmetic substrate is a stack-only fixed-width unsigned integer,
//! [`Uint`], generic over its limb count, with constant-time operations
//! built on mask words and the [`subtle`] crate.
//!
//! **Do not use this crate for real cryptography.** The leaky modes exist to
//! be broken, key generation is out of scope (primes are supplied), and no
//! padding is performed.
//!
//! # Example
//! ```
//! use rsa_timing::{ExpMethod, RsaKey, Signer, U64};
//!
//! let key = RsaKey::new(
//!     &U64::from_u64(97),
//!     &U64::from_u64(103),
//!     &U64::from_u64(31),
//! )
//! .unwrap();
//! let signer = Signer::new(key, ExpMethod::Ladder);
//! let msg = U64::from_u64(1234);
//! let sig = signer.sign(&msg).unwrap();
//! assert_eq!(signer.verify(&sig).unwrap(), msg);
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

#[macro_use]
mod macros;

mod attack;
mod collect;
mod ct;
mod errors;
mod exp;
mod limb;
mod montgomery;
mod rsa;
mod sample;
mod uint;

pub use crate::{
    attack::{verify_recovery, AttackConfig, Recovery, TimingAttack, MIN_CLASS_SAMPLES},
    collect::{collect_samples, simulate_samples, simulate_samples_with_r_exp},
    ct::CtChoice,
    errors::{Error, Result},
    exp::{mod_exp, mod_exp_sleep, power_ladder, ExpMethod},
    limb::{Limb, WideWord, Word},
    montgomery::Montgomery,
    rsa::{RsaKey, SignTiming, Signer},
    sample::{read_samples, write_samples, TimingSample, CSV_HEADER},
    uint::*,
};
pub use subtle;
