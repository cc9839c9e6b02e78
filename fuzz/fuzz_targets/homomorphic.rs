#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{KeyPair, Paillier};
use rand::rngs::OsRng;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(512, &mut OsRng).unwrap());
    let public = keypair.pub_key();
    let private = keypair.priv_key();
    let n = public.n();

    let (m1_bytes, m2_bytes) = data.split_at(data.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes) % n;
    let m2 = BigUint::from_bytes_be(m2_bytes) % n;

    let c1 = Paillier::encrypt(public, &m1, &mut OsRng).unwrap();
    let c2 = Paillier::encrypt(public, &m2, &mut OsRng).unwrap();

    let sum = Paillier::add(public, &c1, &c2);
    assert_eq!(Paillier::decrypt(public, private, &sum), (&m1 + &m2) % n);

    let k = BigUint::from(data[0]);
    let scaled = Paillier::scalar_mul(public, &c1, &k);
    assert_eq!(Paillier::decrypt(public, private, &scaled), &m1 * &k % n);
});
