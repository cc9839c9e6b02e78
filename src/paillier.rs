// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::arith::{gcd, l_function, mod_pow};
use crate::ciphertext::Ciphertext;
use crate::key::{PrivateKey, PublicKey};
use crate::rng::random_between;
use crate::{Error, Result};

/// The Paillier cryptosystem.
///
/// All operations are pure functions of their inputs; `encrypt`
/// additionally draws blinding randomness from the caller's rng. A
/// ciphertext is only meaningful relative to the key that produced it.
pub struct Paillier;

impl Paillier {
    /// Encrypts a plaintext under the Paillier scheme.
    ///
    /// ## Plaintext Space
    ///
    /// `m` must lie in `[0, n)`; values at or above the modulus do not
    /// round-trip and are rejected.
    ///
    /// ## Randomness
    ///
    /// Every call draws a fresh unit `r` uniformly from `[1, n-1]`,
    /// redrawing the astronomically rare `r` that shares a factor with
    /// `n`. Repeated encryptions of the same plaintext therefore differ.
    pub fn encrypt<R: RngCore + CryptoRng>(
        public_key: &PublicKey,
        m: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let n = public_key.n();
        if m >= n {
            return Err(Error::PlaintextOutOfRange);
        }

        let n_squared = public_key.n_squared();
        let one = BigUint::one();
        let upper = n - &one;

        let r = loop {
            let candidate = random_between(&one, &upper, rng)?;
            if gcd(&candidate, n).is_one() {
                break candidate;
            }
        };

        // c = g^m · r^n mod n²
        let gm = mod_pow(public_key.g(), m, n_squared);
        let rn = mod_pow(&r, n, n_squared);

        Ok(Ciphertext::new(gm * rn % n_squared))
    }

    /// Recovers the plaintext `m = L(c^λ mod n²) · μ mod n`.
    ///
    /// No validation is performed on `c`: a value that never came out of
    /// `encrypt` under this key decrypts to an undefined plaintext rather
    /// than failing. The scheme carries no authentication; callers that
    /// need integrity must check it at a higher layer.
    pub fn decrypt(
        public_key: &PublicKey,
        private_key: &PrivateKey,
        ciphertext: &Ciphertext,
    ) -> BigUint {
        let n = public_key.n();
        let u = mod_pow(ciphertext.value(), private_key.lambda(), public_key.n_squared());
        l_function(&u, n) * private_key.mu() % n
    }

    /// Homomorphic addition: `E(m₁) · E(m₂) mod n²` encrypts
    /// `(m₁ + m₂) mod n`.
    ///
    /// Both ciphertexts must originate from `public_key`; combining
    /// ciphertexts across keys yields an undefined plaintext.
    pub fn add(public_key: &PublicKey, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext::new(c1.value() * c2.value() % public_key.n_squared())
    }

    /// Homomorphic scalar multiplication: `E(m)^k mod n²` encrypts
    /// `(k · m) mod n`.
    ///
    /// `k` may be any non-negative integer; the plaintext arithmetic
    /// reduces it implicitly.
    pub fn scalar_mul(public_key: &PublicKey, ciphertext: &Ciphertext, k: &BigUint) -> Ciphertext {
        Ciphertext::new(mod_pow(ciphertext.value(), k, public_key.n_squared()))
    }
}
