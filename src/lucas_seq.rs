//! # LucasSeq — Lucas Sequences `(U_k, V_k, Q^k) mod n`
//!
//! Computes the Lucas sequences defined by `U_0=0, U_1=1, V_0=2, V_1=P` and
//! the recurrences `U_k = P*U_{k-1} - Q*U_{k-2}`, `V_k = P*V_{k-1} -
//! Q*V_{k-2}`, via the binary-chain doubling identities used throughout
//! this codebase (`kbn::lucas_v_k`, `proof::lucas_v_big` apply the same
//! doubling shape to big-integer indices; this module is the machine-word
//! twin). Three paths exist, chosen the way the reference selects them:
//!
//! - `n` even: delegate entirely to [`alt_lucas_seq`], a five-variable
//!   formulation that tolerates an even modulus.
//! - `D = P^2 - 4Q ≡ 0 (mod n)` (a degenerate discriminant): a closed form
//!   in terms of `b = P >> 1`, matching the reference exactly rather than a
//!   "more principled" modular half — `P >> 1` is what the tested reference
//!   computes here, checked prior to the even/odd split.
//! - otherwise (`n` odd, non-degenerate `D`): the odd-modulus chain in
//!   [`lucas_seq_odd`], specialized for `Q=1` and for `P=1, Q=-1` the same
//!   way the reference specializes them, since both let later steps skip
//!   tracking `Q^k` as a full residue.
//!
//! Signed variants without a modulus — [`lucasu`], [`lucasv`], [`lucasuv`]
//! — compute the same sequences over `i64` directly, surfacing overflow
//! instead of wrapping (see their own docs).

use crate::modarith::{addmod, mulmod, mulsubmod, submod};
use crate::numtheory::reduce_signed;

/// `(U_k, V_k, Q^k) mod n` for modulus `n > 1` and any `k >= 0`.
pub fn lucas_seq(n: u64, p: i64, q: i64, k: u64) -> (u64, u64, u64) {
    debug_assert!(n > 1, "lucas_seq: modulus must be > 1");
    if k == 0 {
        return (0, 2 % n, reduce_signed(q, n));
    }

    let p_mod = reduce_signed(p, n);
    let q_mod = reduce_signed(q, n);
    let d_mod = submod(mulmod(p_mod, p_mod, n), mulmod(4 % n, q_mod, n), n);

    if d_mod == 0 {
        // Matches the reference's degenerate-discriminant shortcut exactly:
        // a plain bit shift of the already-reduced P, not a modular halving.
        let b = p_mod >> 1;
        let u = mulmod(k % n, crate::modarith::powmod(b, k - 1, n), n);
        let v = mulmod(2 % n, crate::modarith::powmod(b, k, n), n);
        let qk = crate::modarith::powmod(q_mod, k, n);
        return (u, v, qk);
    }

    if n % 2 == 0 {
        return alt_lucas_seq(n, p_mod, q_mod, k);
    }
    lucas_seq_odd(n, p_mod, q_mod, d_mod, k)
}

/// Odd-modulus fast chain (non-degenerate `D`), specialized for `Q=1` and
/// for `P=1, Q=n-1` the way the reference avoids tracking `Q^k` as a full
/// residue in either case.
fn lucas_seq_odd(n: u64, p_mod: u64, q_mod: u64, d_mod: u64, k: u64) -> (u64, u64, u64) {
    let mut u = 1u64 % n;
    let mut v = p_mod;
    let mut qk = q_mod;
    let top_bit = 63 - k.leading_zeros(); // k >= 1 here

    if q_mod == 1 % n {
        for bit in (0..top_bit).rev() {
            u = mulmod(u, v, n);
            v = mulsubmod(v, v, 2 % n, n);
            if (k >> bit) & 1 == 1 {
                let t = mulmod(u, d_mod, n);
                u = half(crate::modarith::muladdmod(u, p_mod, v, n), n);
                v = half(crate::modarith::muladdmod(v, p_mod, t, n), n);
            }
        }
        (u, v, qk)
    } else if p_mod == 1 % n && q_mod == n - 1 {
        let mut qk_negative = false;
        for bit in (0..top_bit).rev() {
            u = mulmod(u, v, n);
            v = if qk_negative {
                crate::modarith::muladdmod(v, v, 2 % n, n)
            } else {
                mulsubmod(v, v, 2 % n, n)
            };
            qk_negative = false; // Q^k squares back to +1 every step
            if (k >> bit) & 1 == 1 {
                let t = mulmod(u, d_mod, n);
                u = half(addmod(u, v, n), n);
                v = half(addmod(v, t, n), n);
                qk_negative = !qk_negative; // one more factor of Q=-1
            }
        }
        qk = if qk_negative { n - 1 } else { 1 % n };
        (u, v, qk)
    } else {
        for bit in (0..top_bit).rev() {
            u = mulmod(u, v, n);
            v = mulsubmod(v, v, addmod(qk, qk, n), n);
            qk = mulmod(qk, qk, n);
            if (k >> bit) & 1 == 1 {
                let t = mulmod(u, d_mod, n);
                u = half(crate::modarith::muladdmod(u, p_mod, v, n), n);
                v = half(crate::modarith::muladdmod(v, p_mod, t, n), n);
                qk = mulmod(qk, q_mod, n);
            }
        }
        (u, v, qk)
    }
}

/// Divides by 2 mod odd `n` without a modular inverse: if `x` is odd, the
/// "missing" half of `n` makes `x + n` even first.
#[inline]
fn half(x: u64, n: u64) -> u64 {
    if x & 1 == 1 {
        (n >> 1) + (x >> 1) + 1
    } else {
        x >> 1
    }
}

/// Five-variable Lucas chain that tolerates an even modulus `n`, used by
/// [`lucas_seq`] whenever `n` is even. Specialized for `P=1, Q=n-1` by
/// tracking `Ql`/`Qh` as sign bits (`Sl`/`Sh` in the reference) instead of
/// full residues, since under that specialization they only ever hold `1`
/// or `n-1`.
fn alt_lucas_seq(n: u64, p_mod: u64, q_mod: u64, k: u64) -> (u64, u64, u64) {
    let s = k.trailing_zeros();
    let m = 63 - k.leading_zeros();

    let mut uh = 1u64 % n;
    let mut vl = 2u64 % n;
    let mut vh = p_mod;
    let mut ql = 1u64 % n;
    let mut qh = 1u64 % n;

    if p_mod == 1 % n && q_mod == n - 1 {
        let mut sl_positive = true;
        let mut sh_positive = true;
        for j in (s + 1..=m).rev() {
            sl_positive = sl_positive == sh_positive;
            ql = if sl_positive { 1 % n } else { n - 1 };
            if (k >> j) & 1 == 1 {
                sh_positive = !sl_positive;
                uh = mulmod(uh, vh, n);
                vl = submod(mulmod(vh, vl, n), ql, n);
                vh = submod(mulmod(vh, vh, n), if sh_positive { 2 % n } else { n - 2 }, n);
            } else {
                sh_positive = sl_positive;
                uh = submod(mulmod(uh, vl, n), ql, n);
                vh = submod(mulmod(vh, vl, n), ql, n);
                vl = submod(mulmod(vl, vl, n), if sl_positive { 2 % n } else { n - 2 }, n);
            }
        }
        sl_positive = sl_positive == sh_positive;
        ql = if sl_positive { 1 % n } else { n - 1 };
        uh = submod(mulmod(uh, vl, n), ql, n);
        vl = submod(mulmod(vh, vl, n), ql, n);
        for j in 0..s {
            uh = mulmod(uh, vl, n);
            vl = submod(mulmod(vl, vl, n), if j > 0 { 2 % n } else { n - 2 }, n);
        }
        let qk = if s > 0 { 1 % n } else { n - 1 };
        return (uh, vl, qk);
    }

    for j in (s + 1..=m).rev() {
        ql = mulmod(ql, qh, n);
        if (k >> j) & 1 == 1 {
            qh = mulmod(ql, q_mod, n);
            uh = mulmod(uh, vh, n);
            vl = submod(mulmod(vh, vl, n), mulmod(p_mod, ql, n), n);
            vh = submod(mulmod(vh, vh, n), mulmod(2 % n, qh, n), n);
        } else {
            qh = ql;
            uh = submod(mulmod(uh, vl, n), ql, n);
            vh = submod(mulmod(vh, vl, n), mulmod(p_mod, ql, n), n);
            vl = submod(mulmod(vl, vl, n), mulmod(2 % n, ql, n), n);
        }
    }
    ql = mulmod(ql, qh, n);
    qh = mulmod(ql, q_mod, n);
    uh = submod(mulmod(uh, vl, n), ql, n);
    vl = submod(mulmod(vh, vl, n), mulmod(p_mod, ql, n), n);
    ql = mulmod(ql, qh, n);
    for j in 0..s {
        uh = mulmod(uh, vl, n);
        vl = submod(mulmod(vl, vl, n), mulmod(2 % n, ql, n), n);
        ql = mulmod(ql, ql, n);
    }
    (uh, vl, ql)
}

const OVERHALF: u64 = 1 << 31;

#[inline]
fn overhalf(v: i64) -> bool {
    v.unsigned_abs() > OVERHALF
}

/// Signed `(U_k, V_k)` with no modulus, via the same doubling chain as
/// [`lucas_seq`] but over plain `i64` arithmetic. Returns `None` the moment
/// any intermediate value's magnitude would exceed `2^31` (the `OVERHALF`
/// predicate in the reference) or would genuinely overflow `i64` — in
/// either case there is no result to hand back, only a signal to fall back
/// to arbitrary-precision arithmetic.
pub fn lucasuv(p: i64, q: i64, k: u64) -> (Option<i64>, Option<i64>) {
    match lucas_uv_signed(p, q, k) {
        Some((u, v)) => (Some(u), Some(v)),
        None => (None, None),
    }
}

/// Signed `U_k` alone; see [`lucasuv`].
pub fn lucasu(p: i64, q: i64, k: u64) -> Option<i64> {
    lucas_uv_signed(p, q, k).map(|(u, _)| u)
}

/// Signed `V_k` alone; see [`lucasuv`].
pub fn lucasv(p: i64, q: i64, k: u64) -> Option<i64> {
    lucas_uv_signed(p, q, k).map(|(_, v)| v)
}

fn lucas_uv_signed(p: i64, q: i64, k: u64) -> Option<(i64, i64)> {
    if k == 0 {
        return Some((0, 2));
    }

    let mut uh: i64 = 1;
    let mut vl: i64 = 2;
    let mut vh: i64 = p;
    let mut ql: i64 = 1;
    let mut qh: i64 = 1;

    let s = k.trailing_zeros();
    let m = 63 - k.leading_zeros();

    for j in (s + 1..=m).rev() {
        if overhalf(uh) || overhalf(vh) || overhalf(vl) || overhalf(ql) || overhalf(qh) {
            return None;
        }
        ql = ql.checked_mul(qh)?;
        if (k >> j) & 1 == 1 {
            qh = ql.checked_mul(q)?;
            uh = uh.checked_mul(vh)?;
            vl = vh.checked_mul(vl)?.checked_sub(p.checked_mul(ql)?)?;
            vh = vh.checked_mul(vh)?.checked_sub(2i64.checked_mul(qh)?)?;
        } else {
            qh = ql;
            uh = uh.checked_mul(vl)?.checked_sub(ql)?;
            vh = vh.checked_mul(vl)?.checked_sub(p.checked_mul(ql)?)?;
            vl = vl.checked_mul(vl)?.checked_sub(2i64.checked_mul(ql)?)?;
        }
    }
    if overhalf(ql) || overhalf(qh) {
        return None;
    }
    ql = ql.checked_mul(qh)?;
    qh = ql.checked_mul(q)?;
    if overhalf(uh) || overhalf(vh) || overhalf(vl) || overhalf(ql) || overhalf(qh) {
        return None;
    }
    uh = uh.checked_mul(vl)?.checked_sub(ql)?;
    vl = vh.checked_mul(vl)?.checked_sub(p.checked_mul(ql)?)?;
    ql = ql.checked_mul(qh)?;
    for j in 0..s {
        if overhalf(uh) || overhalf(vl) || overhalf(ql) {
            return None;
        }
        uh = uh.checked_mul(vl)?;
        vl = vl.checked_mul(vl)?.checked_sub(2i64.checked_mul(ql)?)?;
        ql = ql.checked_mul(ql)?;
    }
    Some((uh, vl))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lucas_reference(p: i64, q: i64, k: u64) -> (i64, i64, i64) {
        if k == 0 {
            return (0, 2, 1);
        }
        let (mut u0, mut u1) = (0i64, 1i64);
        let (mut v0, mut v1) = (2i64, p);
        let mut qk = 1i64;
        for _ in 1..k {
            let u2 = p * u1 - q * u0;
            let v2 = p * v1 - q * v0;
            u0 = u1;
            u1 = u2;
            v0 = v1;
            v1 = v2;
            qk *= q;
        }
        (u1, v1, qk)
    }

    #[test]
    fn lucas_seq_matches_naive_recurrence_small_k() {
        let n = 1_000_003u64;
        for (p, q) in [(1i64, -1i64), (3, 2), (2, -1), (5, 3)] {
            for k in 0..20u64 {
                let (u_ref, v_ref, q_ref) = lucas_reference(p, q, k);
                let (u, v, qk) = lucas_seq(n, p, q, k);
                assert_eq!(u, crate::numtheory::reduce_signed(u_ref, n), "U mismatch p={p} q={q} k={k}");
                assert_eq!(v, crate::numtheory::reduce_signed(v_ref, n), "V mismatch p={p} q={q} k={k}");
                assert_eq!(qk, crate::numtheory::reduce_signed(q_ref, n), "Q^k mismatch p={p} q={q} k={k}");
            }
        }
    }

    #[test]
    fn lucas_identity_v_squared_minus_d_u_squared() {
        // V_k^2 - D*U_k^2 = 4*Q^k (mod n), the core Lucas identity.
        let n = 1_000_000_007u64;
        let (p, q) = (3i64, 2i64);
        let d = crate::numtheory::reduce_signed(p * p - 4 * q, n);
        for k in [1u64, 2, 5, 17, 1000, 123456] {
            let (u, v, qk) = lucas_seq(n, p, q, k);
            let lhs = submod(mulmod(v, v, n), mulmod(d, mulmod(u, u, n), n), n);
            let rhs = mulmod(4 % n, qk, n);
            assert_eq!(lhs, rhs, "identity failed at k={k}");
        }
    }

    #[test]
    fn even_modulus_uses_alt_chain_and_matches_reference() {
        let n = 1_000_000u64; // even
        for (p, q) in [(1i64, -1i64), (3, 2)] {
            for k in 0..12u64 {
                let (u_ref, v_ref, q_ref) = lucas_reference(p, q, k);
                let (u, v, qk) = lucas_seq(n, p, q, k);
                assert_eq!(u, crate::numtheory::reduce_signed(u_ref, n));
                assert_eq!(v, crate::numtheory::reduce_signed(v_ref, n));
                assert_eq!(qk, crate::numtheory::reduce_signed(q_ref, n));
            }
        }
    }

    #[test]
    fn lucasu_matches_lucas_seq_when_no_overflow() {
        let (p, q, k) = (3i64, 2i64, 10u64);
        let (u_ref, v_ref, _) = lucas_reference(p, q, k);
        assert_eq!(lucasu(p, q, k), Some(u_ref));
        assert_eq!(lucasv(p, q, k), Some(v_ref));
    }

    #[test]
    fn lucasu_reports_overflow_for_large_k() {
        // With P=Q=large-ish and k large, magnitudes blow past 2^31 quickly.
        assert_eq!(lucasu(1, -1, 1000), None);
    }
}
