#![no_main]

use libfuzzer_sys::fuzz_target;
use medical_records::accounts::Account;
use soroban_sdk::{Bytes, Env};

fuzz_target!(|data: &[u8]| {
    let env = Env::default();
    let bytes = Bytes::from_slice(&env, data);

    // Anything that decodes must re-encode to the exact same bytes.
    if let Ok(account) = Account::decode(&env, &bytes) {
        let encoded = account.encode(&env).expect("decoded account re-encodes");
        assert_eq!(encoded, bytes);
    }
});
