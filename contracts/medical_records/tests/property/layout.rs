#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the persisted patient account bytes.
//!
//! Invariants tested:
//! - Account length is a pure function of the payload length
//! - The payload appears verbatim after its length prefix

use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Bytes, Env};

/// discriminator + owner + seed + is_initialized + payload length prefix
const PAYLOAD_OFFSET: u32 = 8 + 56 + 56 + 1 + 4;
/// created_at + updated_at + updated_by
const TRAILER_LEN: u32 = 8 + 8 + 56;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_patient_account_layout(payload in prop::collection::vec(any::<u8>(), 1..512)) {
        let env = Env::default();
        env.mock_all_auths();
        let contract_id = env.register(MedicalRecordsContract, ());
        let client = MedicalRecordsContractClient::new(&env, &contract_id);
        let admin = Address::generate(&env);
        client.initialize(&admin);

        let seed = Address::generate(&env);
        let payload = Bytes::from_slice(&env, &payload);
        client.create_patient(&admin, &admin, &seed, &payload);

        let data = client
            .get_account_data(&client.patient_address(&admin, &seed))
            .unwrap();
        prop_assert_eq!(data.len(), PAYLOAD_OFFSET + payload.len() + TRAILER_LEN);

        let prefix = data.slice(PAYLOAD_OFFSET - 4..PAYLOAD_OFFSET);
        prop_assert_eq!(prefix, Bytes::from_array(&env, &payload.len().to_le_bytes()));
        prop_assert_eq!(
            data.slice(PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload.len()),
            payload
        );
    }
}
