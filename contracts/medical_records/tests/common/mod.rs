#![allow(dead_code)]
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

pub struct TestContext {
    pub env: Env,
    pub client: MedicalRecordsContractClient<'static>,
    pub admin: Address,
}

/// Creates a mocked Soroban environment, deploys the contract, and initializes the registry.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    TestContext { env, client, admin }
}

/// Generates an identity and grants it read authority.
pub fn create_reader(ctx: &TestContext) -> Address {
    let reader = Address::generate(&ctx.env);
    ctx.client.add_read_authority(&ctx.admin, &reader);
    reader
}

/// Generates an identity and grants it write authority.
pub fn create_writer(ctx: &TestContext) -> Address {
    let writer = Address::generate(&ctx.env);
    ctx.client.add_write_authority(&ctx.admin, &writer);
    writer
}

/// Creates a record owned by the admin under a fresh seed and returns the seed.
pub fn create_test_record(ctx: &TestContext, payload: &str) -> Address {
    let seed = Address::generate(&ctx.env);
    ctx.client.create_patient(
        &ctx.admin,
        &ctx.admin,
        &seed,
        &Bytes::from_slice(&ctx.env, payload.as_bytes()),
    );
    seed
}
