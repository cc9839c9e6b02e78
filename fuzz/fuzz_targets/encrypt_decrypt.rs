#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{KeyPair, Paillier};
use rand::rngs::OsRng;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(512, &mut OsRng).unwrap());
    let public = keypair.pub_key();
    let n = public.n();

    let mut plaintext = BigUint::from_bytes_be(data);

    // Ensure plaintext < n
    plaintext %= n;

    let ciphertext = Paillier::encrypt(public, &plaintext, &mut OsRng).unwrap();
    let decrypted = Paillier::decrypt(public, keypair.priv_key(), &ciphertext);

    assert_eq!(plaintext, decrypted);
});
