// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

/// An encryption of a single plaintext under some public key.
///
/// Ciphertexts are opaque residues modulo `n²`. Combining them runs
/// through the scheme operations; there is no arithmetic on the wrapper
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    /// Wraps a raw ciphertext value.
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    /// The raw residue.
    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}
