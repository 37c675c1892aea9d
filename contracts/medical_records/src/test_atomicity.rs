#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{symbol_short, Address, Bytes, BytesN, Env};

fn setup() -> (Env, MedicalRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin)
}

/// Overwrites the account at `address` with arbitrary bytes.
fn plant(env: &Env, client: &MedicalRecordsContractClient, address: &BytesN<32>, data: &Bytes) {
    env.as_contract(&client.address, || {
        env.storage()
            .persistent()
            .set(&(symbol_short!("ACCOUNT"), address.clone()), data);
    });
}

fn garbage(env: &Env) -> Bytes {
    Bytes::from_array(env, &[0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4, 5, 6, 7, 8, 9])
}

#[test]
fn test_failed_authority_change_writes_nothing() {
    let (env, client, admin) = setup();
    env.cost_estimate().budget().reset_unlimited();

    for _ in 1..registry::MAX_AUTHORITIES {
        client.add_read_authority(&admin, &Address::generate(&env));
    }

    let registry_before = client.get_account_data(&client.admin_address()).unwrap();
    let history_before = client.get_history_ledger(&admin);

    assert_eq!(
        client.try_add_read_authority(&admin, &Address::generate(&env)),
        Err(Ok(ContractError::AuthorityLimitReached))
    );

    assert_eq!(
        client.get_account_data(&client.admin_address()).unwrap(),
        registry_before
    );
    assert_eq!(client.get_history_ledger(&admin), history_before);
}

#[test]
fn test_corrupt_history_blocks_registry_change() {
    let (env, client, admin) = setup();
    let registry_before = client.get_account_data(&client.admin_address()).unwrap();

    plant(&env, &client, &client.history_address(&admin), &garbage(&env));

    let reader = Address::generate(&env);
    assert_eq!(
        client.try_add_read_authority(&admin, &reader),
        Err(Ok(ContractError::MalformedAccount))
    );
    assert!(!client.has_read_authority(&reader));
    assert_eq!(
        client.get_account_data(&client.admin_address()).unwrap(),
        registry_before
    );
}

#[test]
fn test_corrupt_history_page_blocks_registry_change() {
    let (env, client, admin) = setup();
    client.add_read_authority(&admin, &Address::generate(&env));
    let header_before = client.get_history_ledger(&admin);

    plant(&env, &client, &client.history_page_address(&admin, &0), &garbage(&env));

    assert_eq!(
        client.try_add_write_authority(&admin, &Address::generate(&env)),
        Err(Ok(ContractError::MalformedAccount))
    );
    assert_eq!(client.get_history_ledger(&admin), header_before);
}

#[test]
fn test_header_at_page_address_is_malformed() {
    let (env, client, admin) = setup();
    client.add_read_authority(&admin, &Address::generate(&env));

    let header_bytes = client
        .get_account_data(&client.history_address(&admin))
        .unwrap();
    plant(&env, &client, &client.history_page_address(&admin, &0), &header_bytes);

    assert_eq!(
        client.try_get_history_page(&admin, &0),
        Err(Ok(ContractError::MalformedAccount))
    );
}

#[test]
fn test_garbage_registry_is_not_reported_as_initialized() {
    let (env, client, _admin) = setup();
    assert!(client.is_initialized());

    plant(&env, &client, &client.admin_address(), &garbage(&env));

    assert_eq!(
        client.try_is_initialized(),
        Err(Ok(ContractError::MalformedAccount))
    );
}

#[test]
fn test_occupied_next_page_blocks_rollover() {
    let (env, client, admin) = setup();
    client.set_config(
        &admin,
        &ProgramConfig {
            protect_root_authority: true,
            history_page_capacity: 1,
        },
    );
    client.add_read_authority(&admin, &Address::generate(&env));

    let page1 = client.history_page_address(&admin, &1);
    plant(&env, &client, &page1, &garbage(&env));

    let header_before = client.get_history_ledger(&admin);
    let page0_before = client.get_history_page(&admin, &0);
    let registry_before = client.get_admin_registry();

    let writer = Address::generate(&env);
    assert_eq!(
        client.try_add_write_authority(&admin, &writer),
        Err(Ok(ContractError::MalformedAccount))
    );
    assert_eq!(client.get_history_ledger(&admin), header_before);
    assert_eq!(client.get_history_page(&admin, &0), page0_before);
    assert_eq!(client.get_admin_registry(), registry_before);
}

#[test]
fn test_root_protection_failure_writes_nothing() {
    let (_env, client, admin) = setup();
    let registry_before = client.get_account_data(&client.admin_address()).unwrap();

    assert_eq!(
        client.try_remove_read_authority(&admin, &admin),
        Err(Ok(ContractError::RootAuthorityProtected))
    );
    assert_eq!(
        client.get_account_data(&client.admin_address()).unwrap(),
        registry_before
    );
    assert!(client
        .get_account_data(&client.history_address(&admin))
        .is_none());
}

#[test]
fn test_failed_update_keeps_previous_payload() {
    let (env, client, admin) = setup();
    let seed = Address::generate(&env);
    let original = Bytes::from_slice(&env, b"original");
    client.create_patient(&admin, &admin, &seed, &original);

    let address = client.patient_address(&admin, &seed);
    let bytes_before = client.get_account_data(&address).unwrap();

    assert_eq!(
        client.try_update_patient(&admin, &admin, &seed, &Bytes::new(&env)),
        Err(Ok(ContractError::InvalidPayload))
    );
    let outsider = Address::generate(&env);
    assert_eq!(
        client.try_update_patient(&outsider, &admin, &seed, &Bytes::from_slice(&env, b"x")),
        Err(Ok(ContractError::Unauthorized))
    );

    assert_eq!(client.get_account_data(&address).unwrap(), bytes_before);
    assert_eq!(
        client.get_patient(&admin, &admin, &seed).encrypted_payload,
        original
    );
}

#[test]
fn test_malformed_patient_account() {
    let (env, client, admin) = setup();
    let seed = Address::generate(&env);
    let address = client.patient_address(&admin, &seed);

    plant(&env, &client, &address, &garbage(&env));

    assert_eq!(
        client.try_get_patient(&admin, &admin, &seed),
        Err(Ok(ContractError::MalformedAccount))
    );
    assert_eq!(
        client.try_create_patient(&admin, &admin, &seed, &Bytes::from_slice(&env, b"x")),
        Err(Ok(ContractError::MalformedAccount))
    );
}

#[test]
fn test_wrong_account_kind_is_malformed() {
    let (env, client, admin) = setup();
    let seed = Address::generate(&env);
    client.create_patient(&admin, &admin, &seed, &Bytes::from_slice(&env, b"x"));

    // A valid patient account sitting at the registry address.
    let patient_bytes = client
        .get_account_data(&client.patient_address(&admin, &seed))
        .unwrap();
    plant(&env, &client, &client.admin_address(), &patient_bytes);

    assert_eq!(
        client.try_get_admin_registry(),
        Err(Ok(ContractError::MalformedAccount))
    );
    assert_eq!(
        client.try_has_read_authority(&admin),
        Err(Ok(ContractError::MalformedAccount))
    );
}

#[test]
fn test_trailing_bytes_are_malformed() {
    let (env, client, _admin) = setup();
    let mut data = client.get_account_data(&client.admin_address()).unwrap();
    data.push_back(0);
    plant(&env, &client, &client.admin_address(), &data);

    assert_eq!(
        client.try_get_admin_registry(),
        Err(Ok(ContractError::MalformedAccount))
    );
}
