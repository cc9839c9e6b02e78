// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport-independent request/response contract.
//!
//! Requests are loose JSON documents: `{ "op": <name>, ...params }`. The
//! five operations are `generate`, `encrypt`, `decrypt`, `add` and
//! `scalarMul`; a request with no `op` at all runs `generate`, which is
//! what the oldest callers of this contract sent. Integer-like
//! parameters accept a JSON integer, a decimal string, or a
//! `0x`-prefixed hex string. Integer results travel as decimal strings
//! so they survive JSON number precision limits; key material travels
//! in its hex document form.
//!
//! Every failure is caught here and rendered as `{ ok: false, error }`;
//! only entropy exhaustion escapes, as a panic.

use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ciphertext::Ciphertext;
use crate::key::{GeneratorStrategy, KeyPair, PrivateKey, PublicKey};
use crate::paillier::Paillier;
use crate::{Error, Result};

/// Outcome of one request, ready for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A successful response carrying `result`.
    pub fn success(result: Value) -> Self {
        Self { ok: true, result: Some(result), error: None }
    }

    /// A failed response carrying the error's display text.
    pub fn failure(error: &Error) -> Self {
        Self { ok: false, result: None, error: Some(error.to_string()) }
    }
}

/// Executes one request against the crate's operations.
///
/// Never panics on malformed input; every [`Error`] is rendered into the
/// response instead.
pub fn handle_request(request: &Value) -> Response {
    match dispatch(request) {
        Ok(result) => Response::success(result),
        Err(error) => Response::failure(&error),
    }
}

fn dispatch(request: &Value) -> Result<Value> {
    match request.get("op") {
        // legacy callers sent generation requests without an op field
        None => generate(request),
        Some(Value::String(op)) => match op.as_str() {
            "generate" => generate(request),
            "encrypt" => encrypt(request),
            "decrypt" => decrypt(request),
            "add" => add(request),
            "scalarMul" => scalar_mul(request),
            _ => Err(Error::UnknownOp),
        },
        Some(_) => Err(Error::UnknownOp),
    }
}

fn generate(request: &Value) -> Result<Value> {
    let mut builder = KeyPair::builder();
    if let Some(value) = request.get("bits") {
        builder = builder.bit_length(usize_like(value, "bits")?);
    }
    if let Some(value) = request.get("rounds") {
        builder = builder.miller_rabin_rounds(usize_like(value, "rounds")?);
    }
    if let Some(value) = request.get("generator") {
        builder = builder.generator_strategy(strategy_like(value)?);
    }

    let keypair = builder.build(&mut OsRng)?;

    Ok(serde_json::json!({
        "publicKey": key_document(keypair.pub_key())?,
        "privateKey": key_document(keypair.priv_key())?,
    }))
}

fn encrypt(request: &Value) -> Result<Value> {
    let public_key = public_key_param(request)?;
    let m = plaintext_param(request, "m")?;
    let ciphertext = Paillier::encrypt(&public_key, &m, &mut OsRng)?;
    Ok(decimal(ciphertext.value()))
}

fn decrypt(request: &Value) -> Result<Value> {
    let public_key = public_key_param(request)?;
    let private_key = private_key_param(request)?;
    let c = Ciphertext::new(integer_param(request, "c")?);
    Ok(decimal(&Paillier::decrypt(&public_key, &private_key, &c)))
}

fn add(request: &Value) -> Result<Value> {
    let public_key = public_key_param(request)?;
    let c1 = Ciphertext::new(integer_param(request, "c1")?);
    let c2 = Ciphertext::new(integer_param(request, "c2")?);
    Ok(decimal(Paillier::add(&public_key, &c1, &c2).value()))
}

fn scalar_mul(request: &Value) -> Result<Value> {
    let public_key = public_key_param(request)?;
    let c = Ciphertext::new(integer_param(request, "c")?);
    let k = integer_param(request, "k")?;
    Ok(decimal(Paillier::scalar_mul(&public_key, &c, &k).value()))
}

/// Integer results travel as decimal strings; JSON numbers lose
/// precision past 2⁵³.
fn decimal(value: &BigUint) -> Value {
    Value::String(value.to_str_radix(10))
}

fn key_document<T: Serialize>(key: &T) -> Result<Value> {
    serde_json::to_value(key).map_err(|error| Error::Conversion(error.to_string()))
}

fn public_key_param(request: &Value) -> Result<PublicKey> {
    let value = request
        .get("publicKey")
        .ok_or(Error::MissingParameter("publicKey"))?;
    serde_json::from_value(value.clone()).map_err(|error| Error::Conversion(error.to_string()))
}

fn private_key_param(request: &Value) -> Result<PrivateKey> {
    let value = request
        .get("privateKey")
        .ok_or(Error::MissingParameter("privateKey"))?;
    serde_json::from_value(value.clone()).map_err(|error| Error::Conversion(error.to_string()))
}

fn integer_param(request: &Value, name: &'static str) -> Result<BigUint> {
    integer_like(request.get(name).ok_or(Error::MissingParameter(name))?, name)
}

/// Like [`integer_param`], but a well-formed negative value reports as a
/// plaintext range violation instead of a conversion failure.
fn plaintext_param(request: &Value, name: &'static str) -> Result<BigUint> {
    let value = request.get(name).ok_or(Error::MissingParameter(name))?;
    if is_negative_integer(value) {
        return Err(Error::PlaintextOutOfRange);
    }
    integer_like(value, name)
}

/// Normalizes an integer-like value: a non-negative JSON integer, a
/// decimal digit string, or a hex string with an optional `0x` prefix.
fn integer_like(value: &Value, name: &'static str) -> Result<BigUint> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().map(BigUint::from),
        Value::String(text) => parse_digits(text),
        _ => None,
    };
    parsed.ok_or_else(|| Error::Conversion(format!("parameter `{name}` is not integer-like")))
}

fn parse_digits(text: &str) -> Option<BigUint> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(text.as_bytes(), 10),
    }
}

fn is_negative_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_i64().is_some_and(|v| v < 0),
        Value::String(text) => text
            .strip_prefix('-')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())),
        _ => false,
    }
}

fn usize_like(value: &Value, name: &'static str) -> Result<usize> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|v| usize::try_from(v).ok()),
        Value::String(text) => text.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::Conversion(format!("parameter `{name}` is not a count")))
}

fn strategy_like(value: &Value) -> Result<GeneratorStrategy> {
    serde_json::from_value(value.clone())
        .map_err(|_| Error::Conversion("generator must be \"simple\" or \"random\"".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generated(bits: usize) -> (Value, Value) {
        let response = handle_request(&json!({ "op": "generate", "bits": bits }));
        assert!(response.ok, "generate failed: {:?}", response.error);
        let result = response.result.unwrap();
        (result["publicKey"].clone(), result["privateKey"].clone())
    }

    fn result_string(response: Response) -> String {
        assert!(response.ok, "request failed: {:?}", response.error);
        match response.result.unwrap() {
            Value::String(text) => text,
            other => panic!("expected string result, got {other}"),
        }
    }

    #[test]
    fn generate_emits_wire_format_keys() {
        let (public, private) = generated(64);

        for field in ["n", "g", "n2"] {
            assert!(public[field].is_string(), "missing {field}");
        }
        assert!(private["lambda"].is_string());
        assert!(private["mu"].is_string());
        // factors stay inside the process
        assert!(private.get("p").is_none());
        assert!(private.get("q").is_none());
    }

    #[test]
    fn missing_op_implies_generate() {
        let response = handle_request(&json!({ "bits": 32 }));
        assert!(response.ok, "{:?}", response.error);
        assert!(response.result.unwrap().get("publicKey").is_some());
    }

    #[test]
    fn unknown_op_is_rejected() {
        let response = handle_request(&json!({ "op": "frobnicate" }));
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("unknown op"));
        assert!(response.result.is_none());

        // an op that is present but not a string gets the same report
        let response = handle_request(&json!({ "op": 7 }));
        assert_eq!(response.error.as_deref(), Some("unknown op"));
    }

    #[test]
    fn wire_level_addition_flow() {
        let (public, private) = generated(64);

        let c1 = result_string(handle_request(&json!({
            "op": "encrypt", "publicKey": public, "m": 123,
        })));
        let c2 = result_string(handle_request(&json!({
            "op": "encrypt", "publicKey": public, "m": "456",
        })));
        let sum = result_string(handle_request(&json!({
            "op": "add", "publicKey": public, "c1": c1, "c2": c2,
        })));
        let plain = result_string(handle_request(&json!({
            "op": "decrypt", "publicKey": public, "privateKey": private, "c": sum,
        })));

        assert_eq!(plain, "579");
    }

    #[test]
    fn wire_level_scalar_multiplication_flow() {
        let (public, private) = generated(64);

        let c = result_string(handle_request(&json!({
            "op": "encrypt", "publicKey": public, "m": 10,
        })));
        let scaled = result_string(handle_request(&json!({
            "op": "scalarMul", "publicKey": public, "c": c, "k": 5,
        })));
        let plain = result_string(handle_request(&json!({
            "op": "decrypt", "publicKey": public, "privateKey": private, "c": scaled,
        })));

        assert_eq!(plain, "50");
    }

    #[test]
    fn accepts_all_integer_like_spellings() {
        let (public, private) = generated(64);

        for m in [json!(123), json!("123"), json!("0x7b"), json!("0X7B")] {
            let c = result_string(handle_request(&json!({
                "op": "encrypt", "publicKey": public, "m": m,
            })));
            let plain = result_string(handle_request(&json!({
                "op": "decrypt", "publicKey": public, "privateKey": private, "c": c,
            })));
            assert_eq!(plain, "123");
        }
    }

    #[test]
    fn negative_plaintext_is_a_range_error() {
        let (public, _) = generated(64);

        for m in [json!(-1), json!("-1")] {
            let response = handle_request(&json!({
                "op": "encrypt", "publicKey": public, "m": m,
            }));
            assert!(!response.ok);
            assert_eq!(
                response.error.as_deref(),
                Some("Plaintext out of range: must lie in [0, n)")
            );
        }
    }

    #[test]
    fn plaintext_at_modulus_is_a_range_error() {
        let (public, _) = generated(64);

        let n = BigUint::parse_bytes(public["n"].as_str().unwrap().as_bytes(), 16).unwrap();
        let response = handle_request(&json!({
            "op": "encrypt", "publicKey": public, "m": n.to_str_radix(10),
        }));
        assert!(!response.ok);
        assert_eq!(
            response.error.as_deref(),
            Some("Plaintext out of range: must lie in [0, n)")
        );
    }

    #[test]
    fn malformed_integers_are_conversion_errors() {
        let (public, private) = generated(64);

        // floats, negatives outside the plaintext slot, junk digits, wrong types
        for c in [json!(1.5), json!("-5"), json!("12z"), json!(true), json!({})] {
            let response = handle_request(&json!({
                "op": "decrypt", "publicKey": public, "privateKey": private, "c": c,
            }));
            assert!(!response.ok);
            let error = response.error.unwrap();
            assert!(error.starts_with("Conversion failed"), "unexpected error: {error}");
        }
    }

    #[test]
    fn missing_parameters_are_reported() {
        let (public, _) = generated(64);

        let response = handle_request(&json!({ "op": "encrypt", "m": 5 }));
        assert_eq!(
            response.error.as_deref(),
            Some("Missing required parameter: publicKey")
        );

        let response = handle_request(&json!({ "op": "encrypt", "publicKey": public }));
        assert_eq!(response.error.as_deref(), Some("Missing required parameter: m"));
    }

    #[test]
    fn malformed_key_documents_are_conversion_errors() {
        let response = handle_request(&json!({
            "op": "encrypt",
            "publicKey": { "n": "zz", "g": "3" },
            "m": 5,
        }));
        assert!(!response.ok);
        assert!(response.error.unwrap().starts_with("Conversion failed"));
    }

    #[test]
    fn generate_accepts_string_bits_and_strategy() {
        let response = handle_request(&json!({
            "op": "generate", "bits": "32", "generator": "random", "rounds": 8,
        }));
        assert!(response.ok, "{:?}", response.error);

        let response = handle_request(&json!({
            "op": "generate", "bits": 32, "generator": "fixed",
        }));
        assert!(!response.ok);
        assert_eq!(
            response.error.as_deref(),
            Some("Conversion failed: generator must be \"simple\" or \"random\"")
        );
    }

    #[test]
    fn undersized_generate_reports_builder_error() {
        let response = handle_request(&json!({ "op": "generate", "bits": 8 }));
        assert!(!response.ok);
        assert!(response.error.unwrap().starts_with("Invalid key size"));
    }

    #[test]
    fn responses_omit_absent_fields() {
        let failure = serde_json::to_value(handle_request(&json!({ "op": "nope" }))).unwrap();
        assert_eq!(failure["ok"], json!(false));
        assert!(failure.get("result").is_none());

        let success =
            serde_json::to_value(handle_request(&json!({ "op": "generate", "bits": 32 }))).unwrap();
        assert_eq!(success["ok"], json!(true));
        assert!(success.get("error").is_none());
    }
}
