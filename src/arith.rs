// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modular arithmetic over unsigned big integers.
//!
//! Everything here is deterministic and allocation-heavy rather than
//! constant-time; the security argument of the scheme does not rest on
//! the timing of these helpers.

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_traits::{CheckedSub, One, Signed, Zero};

use crate::{Error, Result};

/// Computes `base^exponent mod modulus` by binary square-and-multiply.
///
/// Returns zero when `modulus == 1`, since every residue collapses there.
///
/// # Panics
/// Panics if `modulus == 0`.
pub(crate) fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(!modulus.is_zero(), "modulus must be nonzero");

    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exponent = exponent.clone();

    while !exponent.is_zero() {
        if (&exponent % 2u32).is_one() {
            result = &result * &base % modulus;
        }
        exponent >>= 1;
        base = &base * &base % modulus;
    }

    result
}

/// Greatest common divisor by the iterative Euclidean algorithm.
///
/// `gcd(x, 0) == gcd(0, x) == x` by convention.
pub(crate) fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        (a, b) = (b, r);
    }
    a
}

/// Least common multiple, zero when either argument is zero.
pub(crate) fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    a / gcd(a, b) * b
}

/// Computes `a⁻¹ mod m` by the iterative extended Euclidean algorithm.
///
/// The result is normalized into `[0, m)`.
///
/// # Errors
/// Returns [`Error::NoInverse`] when `gcd(a, m) != 1`.
///
/// # Panics
/// Panics if `m == 0`.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    debug_assert!(!m.is_zero(), "modulus must be nonzero");

    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r0 = BigInt::from_biguint(Sign::Plus, a % m);
    let mut r1 = modulus.clone();
    let mut s0 = BigInt::one();
    let mut s1 = BigInt::zero();

    while !r1.is_zero() {
        let q = &r0 / &r1;
        (r0, r1) = (r1.clone(), &r0 - &q * &r1);
        (s0, s1) = (s1.clone(), &s0 - &q * &s1);
    }

    if !r0.is_one() {
        return Err(Error::NoInverse);
    }

    let mut inverse = s0 % &modulus;
    if inverse.is_negative() {
        inverse += &modulus;
    }

    inverse.to_biguint().ok_or(Error::NoInverse)
}

/// L(u) = (u - 1) / n
///
/// Well-defined because `u ≡ 1 (mod n)` for every valid decryption input.
/// A zero `u`, which only malformed ciphertexts can produce, maps to zero
/// rather than panicking on underflow.
#[inline]
pub(crate) fn l_function(u: &BigUint, n: &BigUint) -> BigUint {
    debug_assert!(!n.is_zero(), "modulus must be nonzero in L");

    match u.checked_sub(&BigUint::one()) {
        Some(shifted) => shifted / n,
        None => BigUint::zero(),
    }
}
