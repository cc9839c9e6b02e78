// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde support for transporting keys as hex-string documents.
//!
//! Public keys serialize as `{ "n": hex, "g": hex, "n2": hex }` and
//! private keys as `{ "lambda": hex, "mu": hex }`. Hex strings are
//! emitted lowercase without a prefix; a `0x`/`0X` prefix is tolerated
//! on input. The prime factors of a locally generated private key are
//! never written. `n2` is optional on input: when present it must equal
//! `n·n`, when absent it is recomputed.

use num_bigint_dig::BigUint;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::key::{PrivateKey, PublicKey};

fn to_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}

fn from_hex<E: de::Error>(text: &str, field: &'static str) -> Result<BigUint, E> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| E::custom(format!("field `{field}` is not a hex integer")))
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PublicKey", 3)?;
        state.serialize_field("n", &to_hex(self.n()))?;
        state.serialize_field("g", &to_hex(self.g()))?;
        state.serialize_field("n2", &to_hex(self.n_squared()))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PublicKeyWire {
            n: String,
            g: String,
            #[serde(default)]
            n2: Option<String>,
        }

        let wire = PublicKeyWire::deserialize(deserializer)?;
        let n = from_hex::<D::Error>(&wire.n, "n")?;
        let g = from_hex::<D::Error>(&wire.g, "g")?;
        let key = PublicKey::new(n, g).map_err(de::Error::custom)?;

        if let Some(text) = wire.n2 {
            let n2 = from_hex::<D::Error>(&text, "n2")?;
            if &n2 != key.n_squared() {
                return Err(de::Error::custom("field `n2` does not equal n·n"));
            }
        }

        Ok(key)
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // lambda and mu suffice to decrypt; the factors stay local
        let mut state = serializer.serialize_struct("PrivateKey", 2)?;
        state.serialize_field("lambda", &to_hex(self.lambda()))?;
        state.serialize_field("mu", &to_hex(self.mu()))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PrivateKeyWire {
            lambda: String,
            mu: String,
        }

        let wire = PrivateKeyWire::deserialize(deserializer)?;
        let lambda = from_hex::<D::Error>(&wire.lambda, "lambda")?;
        let mu = from_hex::<D::Error>(&wire.mu, "mu")?;
        PrivateKey::new(lambda, mu).map_err(de::Error::custom)
    }
}
