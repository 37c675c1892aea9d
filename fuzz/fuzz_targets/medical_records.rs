#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_records::history::MAX_PAGE_CAPACITY;
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient, ProgramConfig};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Grant { who: u8, read: bool, caller: u8 },
    Revoke { who: u8, read: bool, caller: u8 },
    Create { caller: u8, seed: u8, payload_len: u16 },
    Update { caller: u8, seed: u8, payload_len: u16 },
    Read { caller: u8, seed: u8 },
    Capacity { capacity: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let mut users = vec![admin.clone()];
    for _ in 0..3 {
        users.push(Address::generate(&env));
    }
    let seeds: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let pick = |i: u8| users[i as usize % users.len()].clone();

    let mut history_len = 0u64;

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Grant { who, read, caller } => {
                let (caller, who) = (pick(caller), pick(who));
                let result = if read {
                    client.try_add_read_authority(&caller, &who)
                } else {
                    client.try_add_write_authority(&caller, &who)
                };
                if result.is_ok() {
                    history_len += 1;
                    assert_eq!(caller, admin);
                }
            }
            FuzzAction::Revoke { who, read, caller } => {
                let (caller, who) = (pick(caller), pick(who));
                let result = if read {
                    client.try_remove_read_authority(&caller, &who)
                } else {
                    client.try_remove_write_authority(&caller, &who)
                };
                if result.is_ok() {
                    history_len += 1;
                    assert_eq!(caller, admin);
                }
            }
            FuzzAction::Create { caller, seed, payload_len } => {
                let caller = pick(caller);
                let payload = Bytes::from_slice(&env, &vec![0x5a; payload_len as usize % 5000]);
                let seed = &seeds[seed as usize % seeds.len()];
                if client.try_create_patient(&caller, &admin, seed, &payload).is_ok() {
                    assert!(client.has_write_authority(&caller));
                }
            }
            FuzzAction::Update { caller, seed, payload_len } => {
                let caller = pick(caller);
                let payload = Bytes::from_slice(&env, &vec![0xa5; payload_len as usize % 5000]);
                let seed = &seeds[seed as usize % seeds.len()];
                if client.try_update_patient(&caller, &admin, seed, &payload).is_ok() {
                    let record = client.get_patient(&admin, &admin, seed);
                    assert_eq!(record.encrypted_payload, payload);
                }
            }
            FuzzAction::Read { caller, seed } => {
                let caller = pick(caller);
                let seed = &seeds[seed as usize % seeds.len()];
                if client.try_get_patient(&caller, &admin, seed).is_ok() {
                    assert!(client.has_read_authority(&caller));
                }
            }
            FuzzAction::Capacity { capacity } => {
                let config = ProgramConfig {
                    protect_root_authority: true,
                    history_page_capacity: u32::from(capacity) % (MAX_PAGE_CAPACITY + 8),
                };
                let _ = client.try_set_config(&admin, &config);
            }
        }

        assert_eq!(client.get_history_len(&admin), history_len);
    }

    // Walk the history in bounded windows; together they hold every entry.
    let page_count = client
        .try_get_history_ledger(&admin)
        .map_or(0, |header| header.map_or(0, |header| header.page_count));
    let mut seen = 0u64;
    for page in 0..page_count {
        let entries = client.get_history(&admin, &page, &1);
        assert!(entries.len() <= MAX_PAGE_CAPACITY);
        seen += u64::from(entries.len());
    }
    assert_eq!(seen, history_len);
});
