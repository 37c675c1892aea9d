use crate::config::ProgramConfig;
use soroban_sdk::{symbol_short, Address, BytesN, Env};

/// Event published when the admin registry is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub authority: Address,
    pub registry: BytesN<32>,
    pub timestamp: u64,
}

/// Event published for every authority-set mutation, including no-op ones.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityChangedEvent {
    pub admin: Address,
    pub authority: Address,
    pub added: bool,
    pub is_read: bool,
    /// Whether the set actually changed.
    pub changed: bool,
    pub page: u32,
    pub position: u32,
    pub timestamp: u64,
}

/// Event published when a patient record is created or its payload replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientWrittenEvent {
    pub record: BytesN<32>,
    pub owner: Address,
    pub writer: Address,
    pub payload_len: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub authority: Address,
    pub config: ProgramConfig,
    pub timestamp: u64,
}

#[allow(deprecated)]
pub fn publish_initialized(env: &Env, authority: Address, registry: BytesN<32>) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        authority,
        registry,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when an authority is added to or removed from a set.
#[allow(deprecated, clippy::too_many_arguments)]
pub fn publish_authority_changed(
    env: &Env,
    admin: Address,
    authority: Address,
    added: bool,
    is_read: bool,
    changed: bool,
    page: u32,
    position: u32,
) {
    let topics = (symbol_short!("AUTH_CHG"), admin.clone(), authority.clone());
    let data = AuthorityChangedEvent {
        admin,
        authority,
        added,
        is_read,
        changed,
        page,
        position,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_patient_created(
    env: &Env,
    record: BytesN<32>,
    owner: Address,
    writer: Address,
    payload_len: u32,
) {
    let topics = (symbol_short!("PAT_NEW"), owner.clone());
    let data = PatientWrittenEvent {
        record,
        owner,
        writer,
        payload_len,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_patient_updated(
    env: &Env,
    record: BytesN<32>,
    owner: Address,
    writer: Address,
    payload_len: u32,
) {
    let topics = (symbol_short!("PAT_UPD"), owner.clone());
    let data = PatientWrittenEvent {
        record,
        owner,
        writer,
        payload_len,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_config_updated(env: &Env, authority: Address, config: ProgramConfig) {
    let topics = (symbol_short!("CFG_UPD"),);
    let data = ConfigUpdatedEvent {
        authority,
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
