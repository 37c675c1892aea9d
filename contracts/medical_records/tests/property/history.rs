#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the paged authority history.
//!
//! Invariants tested:
//! - Page count is `ceil(n / capacity)` for `n` appended entries
//! - The header's entry count matches the number of appends
//! - Bounded windows stitched together equal the pages in insertion order
//! - No page ever holds more than `capacity` entries

use medical_records::history::MAX_PAGES_PER_READ;
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient, ProgramConfig};
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

fn setup(capacity: u32) -> (Env, MedicalRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);
    client.set_config(
        &admin,
        &ProgramConfig {
            protect_root_authority: true,
            history_page_capacity: capacity,
        },
    );

    (env, client, admin)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_pages_partition_history(capacity in 1u32..=4, appends in 1u32..=10) {
        let (env, client, admin) = setup(capacity);

        for i in 0..appends {
            env.ledger().set_timestamp(u64::from(i));
            client.add_read_authority(&admin, &Address::generate(&env));
        }

        let header = client.get_history_ledger(&admin);
        prop_assert_eq!(header.page_count, appends.div_ceil(capacity));
        prop_assert_eq!(header.total_len, u64::from(appends));
        prop_assert_eq!(client.get_history_len(&admin), u64::from(appends));

        let mut stitched = soroban_sdk::Vec::new(&env);
        for page in 0..header.page_count {
            let ledger = client.get_history_page(&admin, &page);
            prop_assert_eq!(ledger.page, page);
            prop_assert!(ledger.entries.len() <= capacity);
            stitched.append(&ledger.entries);
        }

        let mut history = soroban_sdk::Vec::new(&env);
        let mut start = 0;
        while start < header.page_count {
            let window = client.get_history(&admin, &start, &MAX_PAGES_PER_READ);
            prop_assert!(window.len() <= MAX_PAGES_PER_READ * capacity);
            history.append(&window);
            start += MAX_PAGES_PER_READ;
        }
        prop_assert_eq!(&stitched, &history);
        prop_assert_eq!(history.len(), appends);
        for (i, entry) in history.iter().enumerate() {
            prop_assert_eq!(entry.timestamp, i as u64);
        }
    }
}
