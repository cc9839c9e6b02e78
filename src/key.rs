// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arith::{l_function, lcm, mod_inverse, mod_pow};
use crate::prime::{generate_prime, DEFAULT_MILLER_RABIN_ROUNDS};
use crate::rng::random_between;
use crate::{Error, Result};

/// Minimum supported modulus size in bits.
///
/// Keys this small are breakable by hand and exist for tests only;
/// production deployments should stay at 2048 bits or above.
pub const MIN_KEY_BITS: usize = 16;

/// Modulus size used when the builder is not told otherwise.
pub const DEFAULT_KEY_BITS: usize = 1024;

/// Paillier public key `(n, g)` with the cached square `n²`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    g: BigUint,
    n_squared: BigUint,
}

impl PublicKey {
    /// Builds a public key from `n` and `g`, computing and caching `n²`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPublicKey`] if `n < 2`, `g < 2`, or `g ≥ n²`.
    pub fn new(n: BigUint, g: BigUint) -> Result<Self> {
        let two = BigUint::from(2u32);
        if n < two || g < two {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        if g >= n_squared {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { n, g, n_squared })
    }

    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    #[inline]
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    #[inline]
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// Private key `(λ, μ)` with automatic secure erasure.
///
/// The `Zeroize` and `ZeroizeOnDrop` traits ensure the secret components
/// are wiped from memory when this struct is dropped. `num-bigint-dig`
/// implements `Zeroize` for `BigUint`, which zeroes the underlying
/// heap-allocated digit vectors.
///
/// Locally generated keys retain the prime factors `p` and `q`;
/// deserialized keys carry none. Factors never serialize either way.
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop, Clone)]
pub struct PrivateKey {
    lambda: BigUint,
    mu: BigUint,
    p: Option<BigUint>,
    q: Option<BigUint>,
}

impl PrivateKey {
    /// Builds a private key from `λ = lcm(p-1, q-1)` and
    /// `μ = L(g^λ mod n²)⁻¹ mod n`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrivateKey`] if either component is zero.
    pub fn new(lambda: BigUint, mu: BigUint) -> Result<Self> {
        if lambda.is_zero() || mu.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self {
            lambda,
            mu,
            p: None,
            q: None,
        })
    }

    pub(crate) fn with_factors(
        lambda: BigUint,
        mu: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self> {
        let mut key = Self::new(lambda, mu)?;
        key.p = Some(p);
        key.q = Some(q);
        Ok(key)
    }

    #[inline]
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    #[inline]
    pub fn mu(&self) -> &BigUint {
        &self.mu
    }
}

/// How the generator `g` is picked during key generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorStrategy {
    /// `g = n + 1`. Deterministic and always usable.
    #[default]
    Simple,
    /// `g` drawn uniformly from `[2, n² - 1]` and redrawn until
    /// `L(g^λ mod n²)` is invertible modulo `n`.
    Random,
}

/// A freshly generated public/private key pair.
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generates a keypair of [`DEFAULT_KEY_BITS`] with default settings.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        KeyPairBuilder::new().build(rng)
    }

    /// Generates a keypair with an explicit modulus size.
    pub fn generate_with_size<R: RngCore + CryptoRng>(
        bit_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build(rng)
    }

    /// Starts a [`KeyPairBuilder`] for customized generation.
    pub fn builder() -> KeyPairBuilder {
        KeyPairBuilder::new()
    }

    #[inline]
    pub fn pub_key(&self) -> &PublicKey {
        &self.public
    }

    #[inline]
    pub fn priv_key(&self) -> &PrivateKey {
        &self.private
    }
}

/// Configurable key generation.
///
/// ```rust,no_run
/// use paillier::{GeneratorStrategy, KeyPair};
/// use rand::rngs::OsRng;
///
/// let keypair = KeyPair::builder()
///     .bit_length(2048)
///     .generator_strategy(GeneratorStrategy::Random)
///     .build(&mut OsRng)
///     .expect("key generation failed");
/// assert_eq!(keypair.pub_key().bit_length(), 2048);
/// ```
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: usize,
    rounds: usize,
    strategy: GeneratorStrategy,
    max_attempts: Option<usize>,
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyPairBuilder {
    pub fn new() -> Self {
        Self {
            bit_length: DEFAULT_KEY_BITS,
            rounds: DEFAULT_MILLER_RABIN_ROUNDS,
            strategy: GeneratorStrategy::default(),
            max_attempts: None,
        }
    }

    /// Sets the modulus size in bits.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Sets the Miller-Rabin round count used while searching for primes.
    pub fn miller_rabin_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets how the generator `g` is picked.
    pub fn generator_strategy(mut self, strategy: GeneratorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of prime-pair attempts before generation gives up.
    ///
    /// Unbounded when unset. An attempt is discarded when `p == q`, when
    /// `p·q` misses the requested bit length, or when the fixed generator
    /// of [`GeneratorStrategy::Simple`] turns out unusable for the pair.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Runs key generation with the configured parameters.
    ///
    /// ## Prime Selection
    ///
    /// Two probable primes of `bit_length / 2` and `bit_length -
    /// bit_length / 2` bits are drawn and re-drawn until they are distinct
    /// and their product has exactly `bit_length` bits.
    ///
    /// ## Private Components
    ///
    /// λ = lcm(p-1, q-1) and μ = L(g^λ mod n²)⁻¹ mod n. Under
    /// [`GeneratorStrategy::Simple`] a non-invertible L value restarts the
    /// search with fresh primes; under [`GeneratorStrategy::Random`] only
    /// the generator is redrawn.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeySize`] below [`MIN_KEY_BITS`] bits, or
    /// [`Error::KeyGenerationFailed`] when a configured attempt cap runs
    /// out.
    pub fn build<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<KeyPair> {
        if self.bit_length < MIN_KEY_BITS {
            return Err(Error::InvalidKeySize {
                min: MIN_KEY_BITS,
                actual: self.bit_length,
            });
        }

        let one = BigUint::one();
        let p_bits = self.bit_length / 2;
        let q_bits = self.bit_length - p_bits;

        let mut attempts = 0usize;
        loop {
            if let Some(cap) = self.max_attempts {
                if attempts >= cap {
                    return Err(Error::KeyGenerationFailed(format!(
                        "no valid prime pair after {cap} attempts"
                    )));
                }
            }
            attempts += 1;

            let p = generate_prime(p_bits, self.rounds, rng)?;
            let q = generate_prime(q_bits, self.rounds, rng)?;
            if p == q {
                continue;
            }

            let n = &p * &q;
            if n.bits() != self.bit_length {
                continue;
            }

            let n_squared = &n * &n;
            let lambda = lcm(&(&p - &one), &(&q - &one));

            let (g, mu) = match self.strategy {
                GeneratorStrategy::Simple => {
                    let g = &n + &one;
                    match decryption_scalar(&g, &lambda, &n, &n_squared) {
                        Ok(mu) => (g, mu),
                        // p dividing q-1 (or vice versa) makes L(g^λ)
                        // share a factor with n; only fresh primes help
                        Err(Error::NoInverse) => continue,
                        Err(other) => return Err(other),
                    }
                }
                GeneratorStrategy::Random => {
                    let two = BigUint::from(2u32);
                    let upper = &n_squared - &one;
                    loop {
                        let candidate = random_between(&two, &upper, rng)?;
                        match decryption_scalar(&candidate, &lambda, &n, &n_squared) {
                            Ok(mu) => break (candidate, mu),
                            Err(Error::NoInverse) => continue,
                            Err(other) => return Err(other),
                        }
                    }
                }
            };

            let public = PublicKey::new(n, g)?;
            let private = PrivateKey::with_factors(lambda, mu, p, q)?;

            return Ok(KeyPair { public, private });
        }
    }
}

/// μ = L(g^λ mod n²)⁻¹ mod n, or [`Error::NoInverse`] when `g` is
/// unusable with this modulus.
fn decryption_scalar(
    g: &BigUint,
    lambda: &BigUint,
    n: &BigUint,
    n_squared: &BigUint,
) -> Result<BigUint> {
    let u = mod_pow(g, lambda, n_squared);
    mod_inverse(&l_function(&u, n), n)
}
