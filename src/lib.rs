// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem
//!
//! Probabilistic encryption scheme with additive homomorphism, based on the
//! hardness of deciding n-th residuosity mod n² for n = pq. Sums and scalar
//! multiples of encrypted values can be computed without decrypting them.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! ## Security
//!
//! The scheme is secure under the decisional composite residuosity
//! assumption. Every encryption is blinded with a fresh random unit, so
//! equal plaintexts produce unequal ciphertexts. The private key components
//! are automatically zeroized on drop via the `zeroize` crate. Arithmetic is
//! not constant-time; do not expose decryption as a timing oracle.
//!
//! ## Example
//!
//! ```rust,no_run
//! use num_bigint_dig::BigUint;
//! use paillier::{KeyPair, Paillier};
//! use rand::rngs::OsRng;
//!
//! let keypair = KeyPair::generate_with_size(2048, &mut OsRng).expect("key generation failed");
//! let public = keypair.pub_key();
//!
//! let c1 = Paillier::encrypt(public, &BigUint::from(123u32), &mut OsRng).expect("encryption failed");
//! let c2 = Paillier::encrypt(public, &BigUint::from(456u32), &mut OsRng).expect("encryption failed");
//! let sum = Paillier::add(public, &c1, &c2);
//!
//! let decrypted = Paillier::decrypt(public, keypair.priv_key(), &sum);
//! assert_eq!(decrypted, BigUint::from(579u32));
//! ```

mod arith;
mod ciphertext;
mod error;
mod key;
mod ops;
mod paillier;
mod prime;
mod rng;
mod serde_impl;
mod worker;

pub use ciphertext::*;
pub use error::*;
pub use key::*;
pub use ops::*;
pub use paillier::*;
pub use prime::*;
pub use worker::*;
