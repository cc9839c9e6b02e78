// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probabilistic primality testing and random prime generation.

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::rng::{random_at_most, random_bits};
use crate::{Error, Result};

/// Miller-Rabin rounds used when a caller does not pick a count.
///
/// A composite survives a single round with probability at most 1/4, so
/// 16 independent witnesses bound the false-positive rate at 2⁻³².
pub const DEFAULT_MILLER_RABIN_ROUNDS: usize = 16;

/// Small odd primes for trial division before the witness rounds.
///
/// Rejecting candidates with a small factor here skips the vast majority
/// of Miller-Rabin runs during prime generation.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Miller-Rabin primality test with `rounds` random witnesses.
///
/// Returns `false` for every composite it can prove, `true` otherwise.
/// Witnesses are drawn uniformly from `[2, candidate - 2]` using `rng`,
/// so repeated calls on the same composite may pick different witnesses.
pub fn is_probable_prime<R: RngCore + CryptoRng>(
    candidate: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);

    if candidate < &two {
        return false;
    }
    if *candidate == two || *candidate == three {
        return true;
    }
    if (candidate % 2u32).is_zero() {
        return false;
    }

    let n_minus_1 = candidate - &one;
    let n_minus_2 = candidate - &two;

    // candidate - 1 = d * 2^twos with d odd
    let mut d = n_minus_1.clone();
    let mut twos = 0usize;
    while (&d % 2u32).is_zero() {
        d >>= 1;
        twos += 1;
    }

    let witness_span = &n_minus_2 - &two;

    'witness: for _ in 0..rounds {
        let a = random_at_most(&witness_span, rng) + &two;
        let mut x = crate::arith::mod_pow(&a, &d, candidate);

        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }

        for _ in 1..twos {
            x = &x * &x % candidate;
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Generates a random probable prime with exactly `bit_length` bits.
///
/// Candidates are drawn with the top bit forced and the bottom bit set,
/// trial-divided against [`SIEVE_PRIMES`], and accepted once they pass
/// `rounds` Miller-Rabin witnesses. The search has no iteration cap; by
/// the prime number theorem a `bit_length`-bit candidate is prime with
/// probability about `2 / (bit_length · ln 2)`, so the expected number of
/// draws stays small.
///
/// # Errors
/// Returns [`Error::BitLengthTooShort`] below 2 bits. The lone 1-bit
/// candidate is 1, which no round count would ever accept.
pub fn generate_prime<R: RngCore + CryptoRng>(
    bit_length: usize,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bit_length < 2 {
        return Err(Error::BitLengthTooShort {
            min: 2,
            actual: bit_length,
        });
    }

    loop {
        let mut candidate = random_bits(bit_length, rng)?;
        candidate |= BigUint::one();

        if has_small_factor(&candidate) {
            continue;
        }
        if is_probable_prime(&candidate, rounds, rng) {
            return Ok(candidate);
        }
    }
}

/// True when `n` is divisible by a sieve prime other than itself.
#[inline]
fn has_small_factor(n: &BigUint) -> bool {
    for &prime in SIEVE_PRIMES {
        if (n % prime).is_zero() && *n != BigUint::from(prime) {
            return true;
        }
    }
    false
}
