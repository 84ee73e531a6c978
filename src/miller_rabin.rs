//! # MillerRabin — Strong Probable Prime Test
//!
//! Standard Miller-Rabin, run over a caller-supplied base list in
//! Montgomery form. Every base is tried in turn; the test rejects as soon
//! as any base proves `n` composite and accepts only if every base passes.
//! The `n-1 = 2^t * d` factorization and the "any squaring that lands on
//! `-1` before `1` is inconclusive, landing on `1` cold is a proof of
//! compositeness" logic matches the reference `miller_rabin`, rephrased
//! over the crate's own `Montgomery` type instead of raw `mont_prod64`
//! calls.

use crate::modarith::powmod;
use crate::montgomery::Montgomery;
use crate::numtheory::jacobi;

/// Runs Miller-Rabin on odd `n > 3` against each base in `bases`.
///
/// Bases `a` with `a mod n` in `{0, 1, n-1}` carry no information and are
/// skipped (matching the reference, which treats them as automatic
/// passes). Every base must be `>= 2`; passing a smaller one is a caller
/// bug and panics rather than silently skipping it.
pub fn miller_rabin(n: u64, bases: &[u64]) -> bool {
    debug_assert!(n > 3, "miller_rabin: n must be greater than 3");
    if n % 2 == 0 {
        return false;
    }

    let mont = Montgomery::new(n);
    let mut d = n - 1;
    let mut t = 0u32;
    while d % 2 == 0 {
        d /= 2;
        t += 1;
    }
    // Montgomery form of n-1 (i.e. of -1), computed without a multiply.
    let neg_one_m = n - mont.one();

    for &a in bases {
        assert!(a >= 2, "miller_rabin: base {a} is invalid, must be >= 2");
        let a_mod = a % n;
        if a_mod <= 1 || a_mod == n - 1 {
            continue;
        }

        let a_m = mont.to_mont(a_mod);
        let mut x = mont.mont_powmod(a_m, d);
        if x == mont.one() || x == neg_one_m {
            continue;
        }

        let mut witnessed_composite = true;
        for _ in 1..t {
            x = mont.mont_square(x);
            if x == neg_one_m {
                witnessed_composite = false;
                break;
            }
            if x == mont.one() {
                return false;
            }
        }
        if witnessed_composite {
            return false;
        }
    }
    true
}

/// Plain Fermat test: `a^(n-1) ≡ 1 (mod n)`. The weakest member of the
/// pseudoprime family; kept as its own trivial, auditable body rather than
/// delegating to [`miller_rabin`], matching the reference's separate
/// `is_pseudoprime`.
pub fn is_pseudoprime(n: u64, a: u64) -> bool {
    if n < 5 {
        return n == 2 || n == 3;
    }
    assert!(a >= 2, "is_pseudoprime: base {a} is invalid, must be >= 2");
    let a_mod = if a >= n { a % n } else { a };
    if a_mod <= 1 || a_mod == n - 1 {
        return true;
    }
    powmod(a_mod, n - 1, n) == 1
}

/// Euler (Solovay-Strassen-style) pseudoprime test: `a^((n-1)/2) ≡
/// jacobi(a, n) (mod n)`, interpreted over `{1, n-1}` for the two nonzero
/// Jacobi outcomes. A zero symbol means `a` shares a factor with `n`, which
/// is conclusive compositeness (for `n` not itself prime).
pub fn is_euler_pseudoprime(n: u64, a: u64) -> bool {
    if n < 5 {
        return n == 2 || n == 3;
    }
    if n % 2 == 0 {
        return false;
    }
    assert!(a >= 2, "is_euler_pseudoprime: base {a} is invalid, must be >= 2");
    let a_mod = if a >= n { a % n } else { a };
    if a_mod == 0 {
        return false;
    }
    if a_mod == 1 {
        return true;
    }

    let j = jacobi(a_mod as i64, n);
    if j == 0 {
        return false;
    }
    let x = powmod(a_mod, (n - 1) / 2, n);
    let expected = if j == 1 { 1 } else { n - 1 };
    x == expected
}

/// Plumb's base-2 specialization of the Euler test: rather than computing
/// a general Jacobi symbol, `jacobi(2, n)` is read directly off `n mod 8`
/// (`1` when `n ≡ 1, 7`, `-1` when `n ≡ 3, 5`), making this a cheap
/// pre-Miller-Rabin filter the reference runs before committing to a full
/// strong test.
pub fn is_euler_plumb_pseudoprime(n: u64) -> bool {
    if n < 5 {
        return n == 2 || n == 3;
    }
    if n % 2 == 0 {
        return false;
    }
    let jacobi_2_n = match n % 8 {
        1 | 7 => 1,
        3 | 5 => n - 1,
        _ => unreachable!("odd n mod 8 is always 1, 3, 5, or 7"),
    };
    powmod(2, (n - 1) / 2, n) == jacobi_2_n
}
