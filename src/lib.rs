//! # wordprime — machine-word primality tests
//!
//! Deterministic and probabilistic primality testing over unsigned
//! integers up to 64 bits: Montgomery-form modular arithmetic, Miller-Rabin,
//! the Lucas sequence and its derived composite tests, BPSW, the Frobenius
//! family, a sieved Perrin test, and Lucas-Lehmer for Mersenne numbers.
//!
//! ## Module organization
//!
//! - [`modarith`] — plain `u128`-widened modular arithmetic: add/sub/mul/pow.
//! - [`numtheory`] — gcd, integer square root, perfect-square test, Jacobi
//!   and Kronecker symbols.
//! - [`montgomery`] — Montgomery multiplication context (`REDC`).
//! - [`miller_rabin`] — strong probable-prime test, plus the Fermat and
//!   Euler pseudoprime variants it's built from.
//! - [`lucas_seq`] — Lucas sequence evaluation `(U_k, V_k, Q^k)` and the
//!   signed `lucasu`/`lucasv`/`lucasuv` helpers.
//! - [`lucas_tests`] — standard/strong/extra-strong and almost-extra-strong
//!   Lucas pseudoprime tests, with Selfridge and extra-strong parameter
//!   search.
//! - [`bpsw`] — Baillie-PSW, the combination with no known counterexample.
//! - [`frobenius`] — generalized Frobenius, Khashin's and Underwood's
//!   variants.
//! - [`perrin`] — Perrin sequence test accelerated by a periodicity sieve.
//! - [`mersenne`] — Lucas-Lehmer test and the known-Mersenne-exponent table.
//! - [`dispatch`] — `is_prob_prime`, the general-purpose entry point.
//!
//! Everything here is a pure function: no heap allocation in the hot
//! paths, no I/O, no shared mutable state. The two large constant tables
//! (the 32-bit Miller-Rabin witness hash and the Perrin sieve mask) are
//! `const` data baked into the binary.

pub mod bpsw;
pub mod dispatch;
pub mod error;
pub mod frobenius;
pub mod lucas_seq;
pub mod mersenne;
pub mod miller_rabin;
pub mod modarith;
pub mod montgomery;
pub mod numtheory;
pub mod perrin;

pub use bpsw::bpsw;
pub use dispatch::is_prob_prime;
pub use error::PrimalityError;
pub use frobenius::{
    is_frobenius_khashin_pseudoprime, is_frobenius_pseudoprime, is_frobenius_underwood_pseudoprime,
};
pub use lucas_seq::{lucas_seq, lucasu, lucasuv, lucasv};
pub use lucas_tests::{is_almost_extra_strong_lucas_pseudoprime, is_lucas_pseudoprime};
pub use mersenne::{is_mersenne_prime, lucas_lehmer};
pub use miller_rabin::{
    is_euler_plumb_pseudoprime, is_euler_pseudoprime, is_pseudoprime, miller_rabin,
};
pub use montgomery::Montgomery;
pub use perrin::is_perrin_pseudoprime;
