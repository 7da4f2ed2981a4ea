//! Command-line driver: generate timing samples against a chosen signer, or
//! run the recovery over a sample file.
//!
//! Exit codes are contractual: 0 success, 1 arithmetic precondition
//! violation, 2 I/O or malformed input, 3 recovery finished but failed
//! verification, 4 insufficient samples.

use clap::{Parser, Subcommand, ValueEnum};
use rsa_timing::{
    read_samples, verify_recovery, write_samples, AttackConfig, Error, ExpMethod, RsaKey, Signer,
    TimingAttack, Uint, U1024,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const LIMBS: usize = U1024::LIMBS;

#[derive(Parser)]
#[command(name = "rsa-timing")]
#[command(about = "RSA timing side-channel demonstration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method {
    /// Square-and-multiply (leaky)
    Plain,
    /// Square-and-multiply with sleep amplification (very leaky)
    Sleep,
    /// Montgomery powering ladder (defended)
    Ladder,
}

impl From<Method> for ExpMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Plain => ExpMethod::Plain,
            Method::Sleep => ExpMethod::PlainSleep,
            Method::Ladder => ExpMethod::Ladder,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign random messages and write (message, duration) samples to a CSV
    /// file
    Csv {
        /// First prime, decimal
        p: String,
        /// Second prime, decimal
        q: String,
        /// Public exponent, decimal
        e: String,
        /// Number of samples to generate
        count: usize,
        /// Exponentiation method
        #[arg(long, value_enum, default_value = "sleep")]
        method: Method,
        /// Sleep per extra Montgomery reduction, in milliseconds
        #[arg(long, default_value_t = 2)]
        pause_ms: u64,
        /// Montgomery radix exponent override; tighter radices leak harder
        #[arg(long)]
        r_exp: Option<u32>,
        /// Output file
        #[arg(long, default_value = "data.csv")]
        out: PathBuf,
    },
    /// Recover the private exponent from a CSV sample file
    Attack {
        /// Path to the sample file
        path: PathBuf,
        /// Decision threshold in nanoseconds
        threshold_ns: u64,
        /// Public modulus, decimal (the sample file does not carry it)
        #[arg(long)]
        modulus: String,
        /// Rounds to run; defaults to the modulus' bit length
        #[arg(long)]
        bits: Option<u32>,
        /// Per-class floor before a round refuses to classify
        #[arg(long)]
        min_class: Option<usize>,
        /// Subtract this per-reduction cost for the recovered prefix
        #[arg(long)]
        unit_cost_ns: Option<u64>,
        /// Montgomery radix exponent the signer used, when not limb-aligned
        #[arg(long)]
        r_exp: Option<u32>,
        /// First prime, decimal; with --q and --e enables verification
        #[arg(long)]
        p: Option<String>,
        /// Second prime, decimal
        #[arg(long)]
        q: Option<String>,
        /// Public exponent, decimal
        #[arg(long)]
        e: Option<String>,
    },
}

fn main() -> ExitCode {
    match Cli::parse().command {
        Commands::Csv {
            p,
            q,
            e,
            count,
            method,
            pause_ms,
            r_exp,
            out,
        } => run_csv(&p, &q, &e, count, method, pause_ms, r_exp, &out),
        Commands::Attack {
            path,
            threshold_ns,
            modulus,
            bits,
            min_class,
            unit_cost_ns,
            r_exp,
            p,
            q,
            e,
        } => run_attack(
            &path,
            threshold_ns,
            &modulus,
            bits,
            min_class,
            unit_cost_ns,
            r_exp,
            p.as_deref(),
            q.as_deref(),
            e.as_deref(),
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_csv(
    p: &str,
    q: &str,
    e: &str,
    count: usize,
    method: Method,
    pause_ms: u64,
    r_exp: Option<u32>,
    out: &PathBuf,
) -> ExitCode {
    let (Some(p), Some(q), Some(e)) = (
        Uint::<LIMBS>::from_dec_str(p),
        Uint::<LIMBS>::from_dec_str(q),
        Uint::<LIMBS>::from_dec_str(e),
    ) else {
        eprintln!("error: p, q and e must be decimal integers");
        return ExitCode::from(1);
    };

    let key = match RsaKey::new(&p, &q, &e) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let mut signer = Signer::with_pause(key, method.into(), Duration::from_millis(pause_ms));
    if let Some(k) = r_exp {
        signer = signer.with_r_exp(k);
    }

    println!(
        "signing {count} random messages with the {:?} method (n has {} bits)",
        signer.method(),
        key.n().bits()
    );

    let samples = match rsa_timing::collect_samples(&signer, count) {
        Ok(samples) => samples,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let file = match File::create(out) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("error: cannot create {}: {err}", out.display());
            return ExitCode::from(2);
        }
    };
    if let Err(err) = write_samples(&mut BufWriter::new(file), &samples) {
        eprintln!("error: cannot write {}: {err}", out.display());
        return ExitCode::from(2);
    }

    println!("wrote {} rows to {}", samples.len(), out.display());
    ExitCode::SUCCESS
}

#[allow(clippy::too_many_arguments)]
fn run_attack(
    path: &PathBuf,
    threshold_ns: u64,
    modulus: &str,
    bits: Option<u32>,
    min_class: Option<usize>,
    unit_cost_ns: Option<u64>,
    r_exp: Option<u32>,
    p: Option<&str>,
    q: Option<&str>,
    e: Option<&str>,
) -> ExitCode {
    let Some(n) = Uint::<LIMBS>::from_dec_str(modulus) else {
        eprintln!("error: --modulus must be a decimal integer");
        return ExitCode::from(1);
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", path.display());
            return ExitCode::from(2);
        }
    };
    let samples = match read_samples::<_, LIMBS>(BufReader::new(file)) {
        Ok(samples) => samples,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let mut config = AttackConfig::new(threshold_ns, bits.unwrap_or_else(|| n.bits()));
    if let Some(floor) = min_class {
        config = config.min_class_samples(floor);
    }
    if let Some(unit) = unit_cost_ns {
        config = config.unit_cost_ns(unit);
    }

    let attack = match r_exp {
        Some(k) => TimingAttack::with_r_exp(&n, k, config),
        None => TimingAttack::new(&n, config),
    };
    let attack = match attack {
        Ok(attack) => attack,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let recovery = match attack.recover(&samples) {
        Ok(recovery) => recovery,
        Err(err @ Error::InsufficientSamples { .. }) => {
            eprintln!("error: {err}");
            return ExitCode::from(4);
        }
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let as_bits: String = recovery
        .bits
        .iter()
        .map(|b| if *b { '1' } else { '0' })
        .collect();
    let as_uint: Uint<LIMBS> = recovery.to_uint();
    println!("recovered bits (MSB first): {as_bits}");
    println!("recovered exponent:         {}", as_uint.to_dec_string());

    // verification needs phi, which needs the factorization
    let (Some(p), Some(q), Some(e)) = (p, q, e) else {
        println!("verification skipped: supply --p, --q and --e to enable it");
        return ExitCode::SUCCESS;
    };
    let (Some(p), Some(q), Some(e)) = (
        Uint::<LIMBS>::from_dec_str(p),
        Uint::<LIMBS>::from_dec_str(q),
        Uint::<LIMBS>::from_dec_str(e),
    ) else {
        eprintln!("error: --p, --q and --e must be decimal integers");
        return ExitCode::from(1);
    };

    let key = match RsaKey::new(&p, &q, &e) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    match verify_recovery(&recovery, key.e(), key.phi()) {
        Some(d) => {
            println!("verified: e * d == 1 (mod phi)");
            println!("private exponent:           {}", d.to_dec_string());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("recovery completed but failed verification");
            ExitCode::from(3)
        }
    }
}
