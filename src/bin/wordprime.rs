//! # Main — CLI Entry Point
//!
//! Thin argument-parsing shell: each subcommand maps onto one library
//! function, with no state beyond what clap collects.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordprime", about = "Machine-word primality tests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// General-purpose probable-primality test (trial division + hashed MR / BPSW)
    IsProbPrime {
        /// The number to test
        n: u64,
    },
    /// Strong Miller-Rabin test against one or more bases
    MillerRabin {
        /// The number to test (must be odd and > 3)
        n: u64,
        /// Witness bases to test against
        #[arg(required = true)]
        bases: Vec<u64>,
    },
    /// Baillie-PSW compositeness test
    Bpsw {
        /// The number to test
        n: u64,
    },
    /// Lucas pseudoprime test (0=standard, 1=strong, 2=extra-strong)
    Lucas {
        /// The number to test
        n: u64,
        /// Test strength: 0, 1, or 2
        #[arg(long, default_value_t = 1)]
        strength: u8,
    },
    /// Almost-extra-strong Lucas pseudoprime test
    AesLucas {
        /// The number to test
        n: u64,
        /// Parameter search step (1 for Baillie/OEIS, 2 for Pari)
        #[arg(long, default_value_t = 1)]
        increment: u64,
    },
    /// Evaluate the Lucas sequence (U_k, V_k, Q^k) mod n
    LucasSeq {
        /// Modulus
        n: u64,
        /// Parameter P
        p: i64,
        /// Parameter Q
        q: i64,
        /// Index k
        k: u64,
    },
    /// Generalized Frobenius pseudoprime test (P=Q=0 auto-selects parameters)
    Frobenius {
        /// The number to test
        n: u64,
        /// Parameter P (0 with Q=0 to auto-select)
        #[arg(long, default_value_t = 0)]
        p: i64,
        /// Parameter Q (0 with P=0 to auto-select)
        #[arg(long, default_value_t = 0)]
        q: i64,
    },
    /// Khashin's Frobenius pseudoprime test
    FrobeniusKhashin {
        /// The number to test
        n: u64,
    },
    /// Underwood's Frobenius pseudoprime test
    FrobeniusUnderwood {
        /// The number to test
        n: u64,
    },
    /// Perrin sequence pseudoprime test
    Perrin {
        /// The number to test
        n: u64,
    },
    /// Look up whether 2^p - 1 is a known Mersenne prime
    Mersenne {
        /// The exponent
        p: u32,
    },
    /// Run the Lucas-Lehmer test directly for 2^p - 1 (p must be prime, <= 64)
    LucasLehmer {
        /// The exponent
        p: u32,
    },
    /// Fermat pseudoprime test
    Fermat {
        /// The number to test
        n: u64,
        /// Base
        a: u64,
    },
    /// Euler (Solovay-Strassen) pseudoprime test
    Euler {
        /// The number to test
        n: u64,
        /// Base
        a: u64,
    },
    /// Plumb's base-2 specialization of the Euler pseudoprime test
    EulerPlumb {
        /// The number to test
        n: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    cli::run(&cli)
}
