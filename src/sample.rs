//! Timing samples and their CSV representation.
//!
//! The sample file is UTF-8 text: one header row, then one row per signing
//! with the message in decimal, the duration in integer nanoseconds, and an
//! optional `step4` debug column recording whether the signing's final
//! conversion product took the Montgomery extra reduction (2) or not (1).

use crate::{
    errors::{Error, Result},
    uint::Uint,
};
use std::io::{BufRead, Write};

/// The sample file header row.
pub const CSV_HEADER: &str = "message,duration,step4";

/// One observed signing: the message and how long signing it took.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimingSample<const LIMBS: usize> {
    /// The signed message.
    pub message: Uint<LIMBS>,
    /// Observed duration of the signing exponentiation, in nanoseconds.
    pub duration_ns: u64,
    /// Debug classification of the signing's final product: 2 when its
    /// extra reduction ran, 1 when not. Optional on replay.
    pub step: Option<u8>,
}

impl<const LIMBS: usize> TimingSample<LIMBS> {
    /// A sample without the debug column.
    pub const fn new(message: Uint<LIMBS>, duration_ns: u64) -> Self {
        Self {
            message,
            duration_ns,
            step: None,
        }
    }

    /// A sample with the debug column derived from the final-reduction
    /// flag.
    pub const fn with_final_reduction(
        message: Uint<LIMBS>,
        duration_ns: u64,
        final_reduction: bool,
    ) -> Self {
        Self {
            message,
            duration_ns,
            step: Some(if final_reduction { 2 } else { 1 }),
        }
    }
}

/// Write samples in the CSV format, header first.
pub fn write_samples<W: Write, const LIMBS: usize>(
    out: &mut W,
    samples: &[TimingSample<LIMBS>],
) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for sample in samples {
        match sample.step {
            Some(step) => writeln!(
                out,
                "{},{},{}",
                sample.message.to_dec_string(),
                sample.duration_ns,
                step
            )?,
            None => writeln!(
                out,
                "{},{}",
                sample.message.to_dec_string(),
                sample.duration_ns
            )?,
        }
    }
    Ok(())
}

/// Read samples from the CSV format. The header row is required; every data
/// row needs the message and duration columns, with `step4` optional.
///
/// Fails with [`Error::MalformedInput`] naming the 1-based offending line.
pub fn read_samples<R: BufRead, const LIMBS: usize>(
    input: R,
) -> Result<Vec<TimingSample<LIMBS>>> {
    let mut lines = input.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or(Error::MalformedInput { line: 1 })?;
    let header = header.map_err(|_| Error::MalformedInput { line: 1 })?;
    if header.trim_end() != CSV_HEADER {
        return Err(Error::MalformedInput { line: 1 });
    }

    let mut samples = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.map_err(|_| Error::MalformedInput { line: line_no })?;
        let row = line.trim_end();
        if row.is_empty() {
            continue;
        }

        let mut fields = row.split(',');
        let message = fields
            .next()
            .and_then(Uint::from_dec_str)
            .ok_or(Error::MalformedInput { line: line_no })?;
        let duration_ns = fields
            .next()
            .and_then(|f| f.parse::<u64>().ok())
            .ok_or(Error::MalformedInput { line: line_no })?;

        let step = match fields.next() {
            None => None,
            Some("1") => Some(1),
            Some("2") => Some(2),
            Some(_) => return Err(Error::MalformedInput { line: line_no }),
        };
        if fields.next().is_some() {
            return Err(Error::MalformedInput { line: line_no });
        }

        samples.push(TimingSample {
            message,
            duration_ns,
            step,
        });
    }

    Ok(samples)
}
