//! # CLI Execution Functions
//!
//! Extracted from `wordprime.rs` to keep the entry point slim. Each
//! subcommand just parses its arguments, calls straight into the library,
//! and prints the result. No search orchestration here, only argument
//! plumbing and a `println!`.

use anyhow::{Context, Result};
use wordprime::{
    bpsw, is_almost_extra_strong_lucas_pseudoprime, is_euler_plumb_pseudoprime,
    is_euler_pseudoprime, is_frobenius_khashin_pseudoprime, is_frobenius_pseudoprime,
    is_frobenius_underwood_pseudoprime, is_lucas_pseudoprime, is_mersenne_prime,
    is_perrin_pseudoprime, is_prob_prime, is_pseudoprime, lucas_lehmer, lucas_seq, miller_rabin,
};

use super::{Cli, Commands};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::IsProbPrime { n } => println!("{}", is_prob_prime(*n)),
        Commands::MillerRabin { n, bases } => println!("{}", miller_rabin(*n, bases)),
        Commands::Bpsw { n } => println!("{}", bpsw(*n)),
        Commands::Lucas { n, strength } => println!("{}", is_lucas_pseudoprime(*n, *strength)),
        Commands::AesLucas { n, increment } => {
            println!("{}", is_almost_extra_strong_lucas_pseudoprime(*n, *increment));
        }
        Commands::LucasSeq { n, p, q, k } => {
            let (u, v, qk) = lucas_seq(*n, *p, *q, *k);
            println!("U_{k} = {u}, V_{k} = {v}, Q^{k} = {qk}");
        }
        Commands::Frobenius { n, p, q } => {
            let result =
                is_frobenius_pseudoprime(*n, *p, *q).context("invalid Frobenius discriminant")?;
            println!("{result}");
        }
        Commands::FrobeniusKhashin { n } => println!("{}", is_frobenius_khashin_pseudoprime(*n)),
        Commands::FrobeniusUnderwood { n } => {
            println!("{}", is_frobenius_underwood_pseudoprime(*n));
        }
        Commands::Perrin { n } => println!("{}", is_perrin_pseudoprime(*n)),
        Commands::Mersenne { p } => println!("{}", is_mersenne_prime(*p)),
        Commands::LucasLehmer { p } => println!("{}", lucas_lehmer(*p)),
        Commands::Fermat { n, a } => println!("{}", is_pseudoprime(*n, *a)),
        Commands::Euler { n, a } => println!("{}", is_euler_pseudoprime(*n, *a)),
        Commands::EulerPlumb { n } => println!("{}", is_euler_plumb_pseudoprime(*n)),
    }
    Ok(())
}
