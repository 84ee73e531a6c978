//! # FrobeniusTests — Quadratic-Ring Frobenius Pseudoprime Tests
//!
//! Three related tests, all working in a quadratic extension of `Z/nZ`:
//!
//! - [`is_frobenius_pseudoprime`]: the generalized Frobenius test over
//!   `x^2 - P*x + Q`, with auto-selected `(P, Q)` when both are `0` (the
//!   same search the reference runs, including its `n == 7` special case
//!   that starts `P` at `1` instead of `-1` so the search never computes
//!   `kronecker(-7, 7)`, and its skip from `P=3` to `P=5`).
//! - [`is_frobenius_khashin_pseudoprime`]: Khashin's test in `Z_n[sqrt(c)]`
//!   for the smallest odd `c` with `kronecker(c, n) = -1`.
//! - [`is_frobenius_underwood_pseudoprime`]: the "Minimal Lambda+2" test
//!   from Underwood's *Quadratic Composite Tests*, run here in Montgomery
//!   form since its doubling chain over bits of `n+1` is exactly the kind
//!   of repeated same-modulus multiplication Montgomery form is for.

use crate::error::PrimalityError;
use crate::lucas_seq::lucas_seq;
use crate::modarith::{addmod, mulmod, sqrmod, submod};
use crate::montgomery::Montgomery;
use crate::numtheory::{gcd, is_perfect_square, jacobi, kronecker};

/// Generalized Frobenius pseudoprime test. Pass `p == 0 && q == 0` to have
/// `(P, Q)` auto-selected the way the reference does; otherwise the caller
/// picks them directly, and an invalid (perfect-square, non-5) discriminant
/// is reported rather than silently producing a meaningless result.
pub fn is_frobenius_pseudoprime(n: u64, p_in: i64, q_in: i64) -> Result<bool, PrimalityError> {
    if n < 7 {
        return Ok(n == 2 || n == 3 || n == 5);
    }
    if n % 2 == 0 || n == u64::MAX {
        return Ok(false);
    }

    let mut p = p_in;
    let mut q = q_in;
    let mut k: i32 = 0;
    let vcomp: u64;

    if p_in == 0 && q_in == 0 {
        p = -1;
        q = 2;
        if n == 7 {
            p = 1; // avoids computing kronecker(-7, 7)
        }
        loop {
            p += 2;
            if p == 3 {
                p = 5; // P=3,Q=2 gives D=1, a perfect square: always skipped
            }
            let d = p * p - 4 * q;
            k = kronecker(d, n);
            if k == 0 {
                return Ok(false);
            }
            if p == 10001 && is_perfect_square(n) {
                return Ok(false);
            }
            if k == -1 {
                break;
            }
        }
        vcomp = 4;
    } else {
        let d = p * p - 4 * q;
        if d != 5 && is_perfect_square(d.unsigned_abs()) {
            return Err(PrimalityError::InvalidDiscriminant { p, q, d });
        }
        vcomp = 0; // resolved below once k is known
    }

    let d = p * p - 4 * q;
    let p_u = p.unsigned_abs();
    let q_u = q.unsigned_abs();
    let d_u = d.unsigned_abs();

    let product = (p_u as u128) * (q_u as u128) * (d_u as u128);
    let product_mod_n = (product % (n as u128)) as u64;
    if gcd(product_mod_n, n) != 1 {
        return Ok(false);
    }

    let vcomp = if k == 0 {
        let k2 = kronecker(d, n);
        if k2 == 0 {
            return Ok(false);
        }
        k = k2;
        let q2 = addmod(q_u % n, q_u % n, n);
        if k == 1 {
            2 % n
        } else if q >= 0 {
            q2
        } else {
            n - q2
        }
    } else {
        vcomp
    };

    let exponent: u64 = if k == 1 { n - 1 } else { n + 1 };
    let (u, v, _qk) = lucas_seq(n, p, q, exponent);
    Ok(u == 0 && v == vcomp)
}

/// Khashin's 2013 counterexample-resistant test: pick the smallest odd `c`
/// with `kronecker(c, n) = -1`, then check `(1 + sqrt(c))^n ≡ 1 - sqrt(c)
/// (mod n)` in the ring `Z_n[sqrt(c)]`, via right-to-left binary
/// exponentiation over pairs `(a, b)` representing `a + b*sqrt(c)`.
pub fn is_frobenius_khashin_pseudoprime(n: u64) -> bool {
    if n < 7 {
        return n == 2 || n == 3 || n == 5;
    }
    if n % 2 == 0 || n == u64::MAX {
        return false;
    }
    if is_perfect_square(n) {
        return false;
    }

    let mut c: i64 = 1;
    let k = loop {
        c += 2;
        let k = kronecker(c, n);
        if k != 1 {
            break k;
        }
    };
    if k == 0 {
        return false;
    }
    let c = (c as u64) % n;

    let (mut ra, mut rb, mut a, mut b) = (1u64 % n, 1u64 % n, 1u64 % n, 1u64 % n);
    let mut d = n - 1;
    while d != 0 {
        if d & 1 == 1 {
            let (ta, tb) = (ra, rb);
            ra = addmod(mulmod(ta, a, n), mulmod(mulmod(tb, b, n), c, n), n);
            rb = addmod(mulmod(tb, a, n), mulmod(ta, b, n), n);
        }
        d >>= 1;
        if d != 0 {
            let t = mulmod(sqrmod(b, n), c, n);
            b = mulmod(b, a, n);
            b = addmod(b, b, n);
            a = addmod(sqrmod(a, n), t, n);
        }
    }
    ra == 1 % n && rb == n - 1
}

/// Underwood's Frobenius test: doubling chain over the bits of `n+1`,
/// carried out in Montgomery form. `x` is the smallest non-negative
/// integer with `jacobi(x^2-4, n) = -1`; the chain specializes slightly
/// when `x == 0`.
pub fn is_frobenius_underwood_pseudoprime(n: u64) -> bool {
    if n < 7 {
        return n == 2 || n == 3 || n == 5;
    }
    if n % 2 == 0 || n == u64::MAX {
        return false;
    }
    if is_perfect_square(n) {
        return false;
    }

    let mut x: i64 = 0;
    let mut t: i64 = -1;
    while jacobi(t, n) != -1 {
        x += 1;
        t = x * x - 4;
    }

    let np1 = n + 1;
    let len = 64 - np1.leading_zeros();

    let mont = Montgomery::new(n);
    let mut a = mont.one();
    let mut b = mont.two();
    let x_m = mont.to_mont((x as u64) % n);
    let mont5 = mont.to_mont(5 % n);

    let result;
    if x == 0 {
        result = mont5;
        for bit in (0..len.saturating_sub(1)).rev() {
            let t1 = addmod(b, b, n);
            b = mont.mont_prod(submod(b, a, n), addmod(b, a, n));
            a = mont.mont_prod(a, t1);
            if (np1 >> bit) & 1 == 1 {
                let t1 = b;
                b = submod(addmod(b, b, n), a, n);
                a = addmod(addmod(a, a, n), t1, n);
            }
        }
    } else {
        let multiplier = addmod(x_m, mont.two(), n);
        result = addmod(addmod(x_m, x_m, n), mont5, n);
        for bit in (0..len.saturating_sub(1)).rev() {
            let t1 = addmod(mont.mont_prod(a, x_m), addmod(b, b, n), n);
            b = mont.mont_prod(submod(b, a, n), addmod(b, a, n));
            a = mont.mont_prod(a, t1);
            if (np1 >> bit) & 1 == 1 {
                let t1 = b;
                b = submod(addmod(b, b, n), a, n);
                a = addmod(mont.mont_prod(a, multiplier), t1, n);
            }
        }
    }
    a == 0 && b == result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes_pass_all_frobenius_variants() {
        for p in [2u64, 3, 5, 7, 11, 13, 97] {
            assert_eq!(is_frobenius_pseudoprime(p, 0, 0), Ok(true), "n={p}");
            assert!(is_frobenius_khashin_pseudoprime(p), "khashin n={p}");
            assert!(is_frobenius_underwood_pseudoprime(p), "underwood n={p}");
        }
    }

    #[test]
    fn auto_select_rejects_small_composites() {
        for n in [9u64, 15, 21, 25, 35, 49, 121, 341] {
            assert_eq!(is_frobenius_pseudoprime(n, 0, 0), Ok(false), "n={n}");
            assert!(!is_frobenius_khashin_pseudoprime(n), "khashin n={n}");
            assert!(!is_frobenius_underwood_pseudoprime(n), "underwood n={n}");
        }
    }

    #[test]
    fn manual_perfect_square_discriminant_is_rejected() {
        // P=4, Q=... chosen so D = 16 - 4Q = 4 (a perfect square, not 5).
        let err = is_frobenius_pseudoprime(97, 4, 3).unwrap_err();
        assert!(matches!(err, PrimalityError::InvalidDiscriminant { .. }));
    }

    #[test]
    fn manual_discriminant_of_five_is_allowed() {
        // P=1, Q=-1 -> D = 1 + 4 = 5, the one allowed perfect square.
        assert_eq!(is_frobenius_pseudoprime(97, 1, -1), Ok(true));
    }

    #[test]
    fn n_equals_seven_does_not_panic() {
        // Exercises the n==7 special case in auto-selection.
        assert_eq!(is_frobenius_pseudoprime(7, 0, 0), Ok(true));
    }

    #[test]
    fn frobenius_underwood_known_large_prime() {
        assert!(is_frobenius_underwood_pseudoprime(999_999_937));
    }
}
