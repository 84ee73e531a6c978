//! # Error — Recoverable Failure Modes
//!
//! Most predicates in this crate are infallible: once their documented
//! preconditions hold, they run to completion and return a `bool`. Violating
//! a precondition that is a programming error — a Miller-Rabin base below 2,
//! a Lucas modulus of 0 or 1, an `increment` outside `1..=256` in the
//! almost-extra-strong Lucas test, a Lucas-Lehmer exponent above 64 — panics,
//! the same trap-sink convention `checked_u32` uses elsewhere in this
//! codebase: these are bugs in the caller, not outcomes a caller should
//! match on.
//!
//! The one condition that is a caller mistake but not necessarily a *bug* —
//! a hand-picked Frobenius `(P, Q)` pair whose discriminant happens to be a
//! non-5 perfect square, which makes the test meaningless rather than merely
//! slow — is reported instead of panicking, since a caller sweeping or
//! searching over `(P, Q)` has a legitimate reason to hit it at runtime.

use std::fmt;

/// Recoverable error conditions surfaced by this crate's public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimalityError {
    /// The Frobenius discriminant `D = P*P - 4*Q` is a perfect square other
    /// than 5, so `x^2 - P*x + Q` does not generate a quadratic extension
    /// and the test cannot run.
    InvalidDiscriminant { p: i64, q: i64, d: i64 },
}

impl fmt::Display for PrimalityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimalityError::InvalidDiscriminant { p, q, d } => write!(
                f,
                "invalid Frobenius parameters (P={p}, Q={q}): D={d} is a perfect square other than 5"
            ),
        }
    }
}

impl std::error::Error for PrimalityError {}
