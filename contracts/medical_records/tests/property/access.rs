#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for authority-set membership.
//!
//! Invariants tested:
//! - After any sequence of mutations, each set equals a model set driven by
//!   the same sequence
//! - Read access to a record holds exactly for members of the read set
//! - Rejected callers never change the registry

use medical_records::{
    AuthorityKind, ContractError, MedicalRecordsContract, MedicalRecordsContractClient,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Bytes, Env};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, MedicalRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin)
}

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Op {
    AddRead(#[proptest(strategy = "0usize..4")] usize),
    AddWrite(#[proptest(strategy = "0usize..4")] usize),
    RemoveRead(#[proptest(strategy = "0usize..4")] usize),
    RemoveWrite(#[proptest(strategy = "0usize..4")] usize),
}

fn apply(client: &MedicalRecordsContractClient, admin: &Address, who: &Address, op: Op) {
    match op {
        Op::AddRead(_) => client.add_read_authority(admin, who),
        Op::AddWrite(_) => client.add_write_authority(admin, who),
        Op::RemoveRead(_) => client.remove_read_authority(admin, who),
        Op::RemoveWrite(_) => client.remove_write_authority(admin, who),
    }
}

fn index(op: Op) -> usize {
    match op {
        Op::AddRead(i) | Op::AddWrite(i) | Op::RemoveRead(i) | Op::RemoveWrite(i) => i,
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Membership always matches a model that applies the same operations.
    #[test]
    fn prop_sets_match_model(ops in prop::collection::vec(any::<Op>(), 1..12)) {
        let (env, client, admin) = setup();
        let pool: std::vec::Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
        let mut read = [false; 4];
        let mut write = [false; 4];

        for op in &ops {
            let i = index(*op);
            apply(&client, &admin, &pool[i], *op);
            match op {
                Op::AddRead(_) => read[i] = true,
                Op::AddWrite(_) => write[i] = true,
                Op::RemoveRead(_) => read[i] = false,
                Op::RemoveWrite(_) => write[i] = false,
            }
        }

        let registry = client.get_admin_registry();
        for (i, who) in pool.iter().enumerate() {
            prop_assert_eq!(client.has_read_authority(who), read[i]);
            prop_assert_eq!(client.has_write_authority(who), write[i]);
            prop_assert_eq!(registry.authorities(AuthorityKind::Read).contains(who), read[i]);
        }
        prop_assert_eq!(client.get_history_len(&admin), ops.len() as u64);
    }

    /// A record is readable by exactly the current read set.
    #[test]
    fn prop_read_requires_membership(grant in any::<bool>(), revoke in any::<bool>()) {
        let (env, client, admin) = setup();
        let caller = Address::generate(&env);
        let seed = Address::generate(&env);
        client.create_patient(&admin, &admin, &seed, &Bytes::from_slice(&env, b"cipher"));

        if grant {
            client.add_read_authority(&admin, &caller);
        }
        if revoke {
            client.remove_read_authority(&admin, &caller);
        }

        let result = client.try_get_patient(&caller, &admin, &seed);
        if grant && !revoke {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
        }
    }

    /// Non-authorities never alter the registry, whatever they try.
    #[test]
    fn prop_rejected_callers_change_nothing(ops in prop::collection::vec(any::<Op>(), 1..8)) {
        let (env, client, admin) = setup();
        let intruder = Address::generate(&env);
        let target = Address::generate(&env);
        let before = client.get_account_data(&client.admin_address());

        for op in ops {
            let result = match op {
                Op::AddRead(_) => client.try_add_read_authority(&intruder, &target),
                Op::AddWrite(_) => client.try_add_write_authority(&intruder, &target),
                Op::RemoveRead(_) => client.try_remove_read_authority(&intruder, &admin),
                Op::RemoveWrite(_) => client.try_remove_write_authority(&intruder, &admin),
            };
            prop_assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
        }

        prop_assert_eq!(client.get_account_data(&client.admin_address()), before);
        prop_assert_eq!(client.get_history_len(&admin), 0);
    }
}
