// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniform sampling of big integers from an injected CSPRNG.
//!
//! Every generator takes `R: RngCore + CryptoRng`, so callers choose the
//! entropy source: production paths pass [`rand::rngs::OsRng`], tests pass
//! a seeded `StdRng`. `OsRng` panics when the operating system cannot
//! supply entropy, which aborts the requesting thread.

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Draws a random integer with exactly `bit_length` bits.
///
/// The most significant bit is forced, so the result lies in
/// `[2^(bit_length-1), 2^bit_length)`.
///
/// # Errors
/// Returns [`Error::BitLengthTooShort`] when `bit_length` is zero; there
/// is no zero-bit integer with its top bit set.
pub(crate) fn random_bits<R: RngCore + CryptoRng>(
    bit_length: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bit_length == 0 {
        return Err(Error::BitLengthTooShort {
            min: 1,
            actual: bit_length,
        });
    }

    let mut candidate = rng.gen_biguint(bit_length);
    candidate |= BigUint::one() << (bit_length - 1);
    Ok(candidate)
}

/// Draws uniformly from `[0, bound]`, both ends included.
///
/// Rejection sampling over `bound.bits()`-bit draws, so the distribution
/// carries no modulo bias. Rejected draws are retried silently.
pub(crate) fn random_at_most<R: RngCore + CryptoRng>(bound: &BigUint, rng: &mut R) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }

    let bits = bound.bits();
    loop {
        let candidate = rng.gen_biguint(bits);
        if &candidate <= bound {
            return candidate;
        }
    }
}

/// Draws uniformly from `[min, max]`, both ends included.
///
/// # Errors
/// Returns [`Error::EmptyRange`] when `max < min`.
pub(crate) fn random_between<R: RngCore + CryptoRng>(
    min: &BigUint,
    max: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    if max < min {
        return Err(Error::EmptyRange);
    }

    let width = max - min;
    Ok(min + random_at_most(&width, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_bits_has_exact_bit_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for bits in [1usize, 2, 8, 16, 64, 128, 512, 1024] {
            for _ in 0..8 {
                let value = random_bits(bits, &mut rng).unwrap();
                assert_eq!(value.bits(), bits, "wrong length for {bits} bits");
            }
        }
    }

    #[test]
    fn random_bits_rejects_zero_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            random_bits(0, &mut rng),
            Err(Error::BitLengthTooShort { min: 1, actual: 0 })
        );
    }

    #[test]
    fn random_at_most_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let bound = BigUint::from(5u32);
        let mut seen_bound = false;
        for _ in 0..512 {
            let value = random_at_most(&bound, &mut rng);
            assert!(value <= bound);
            if value == bound {
                seen_bound = true;
            }
        }
        // the bound itself is a legal draw
        assert!(seen_bound);
    }

    #[test]
    fn random_at_most_zero_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_at_most(&BigUint::zero(), &mut rng), BigUint::zero());
    }

    #[test]
    fn random_between_is_inclusive() {
        use num_traits::ToPrimitive;

        let mut rng = StdRng::seed_from_u64(4);
        let min = BigUint::from(10u32);
        let max = BigUint::from(12u32);
        let mut seen = [false; 3];
        for _ in 0..256 {
            let value = random_between(&min, &max, &mut rng).unwrap();
            assert!(value >= min && value <= max);
            let offset = (&value - &min).to_usize().unwrap();
            seen[offset] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn random_between_degenerate_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        let only = BigUint::from(7u32);
        assert_eq!(random_between(&only, &only, &mut rng).unwrap(), only);
    }

    #[test]
    fn random_between_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(6);
        let min = BigUint::from(9u32);
        let max = BigUint::from(3u32);
        assert_eq!(random_between(&min, &max, &mut rng), Err(Error::EmptyRange));
    }

    #[test]
    fn seeded_rng_reproduces_sequence() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            assert_eq!(
                random_bits(256, &mut a).unwrap(),
                random_bits(256, &mut b).unwrap()
            );
        }
    }
}
