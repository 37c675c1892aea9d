#![no_std]
//! Encrypted medical records behind an admin-governed authority list.
//!
//! State lives in byte-encoded accounts at program-derived addresses:
//! - the [`AdminRegistry`] at `derive(["admin"])`,
//! - each admin's authority [`history`] header at `derive(["history", admin])`
//!   and its pages at `derive(["history", admin, n])`,
//! - one [`PatientRecord`] per `derive(["patient", owner, seed])`.
//!
//! Every state-changing entry point authenticates its caller, loads what it
//! needs through a [`store::Txn`], asks [`auth`] for a decision, and commits
//! all account writes at once at the very end.

pub mod accounts;
pub mod addresses;
pub mod auth;
pub mod config;
pub mod errors;
pub mod events;
pub mod history;
pub mod patient;
pub mod registry;
pub mod store;

use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, Vec};

pub use auth::Permission;
pub use config::ProgramConfig;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use history::{HistoryEntry, HistoryLedger, HistoryPage};
pub use patient::PatientRecord;
pub use registry::{AdminRegistry, AuthorityKind};

use registry::AuthorityChange;
use store::Txn;

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    fn change_authority(
        env: &Env,
        caller: Address,
        target: Address,
        kind: AuthorityKind,
        change: AuthorityChange,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let config = config::load(env);
        let mut txn = Txn::begin(env);
        let outcome =
            registry::change_authority(&mut txn, &config, &caller, &target, kind, change)?;
        txn.commit();

        events::publish_authority_changed(
            env,
            outcome.entry.admin,
            outcome.entry.authority,
            outcome.entry.added,
            outcome.entry.is_read,
            outcome.changed,
            outcome.page,
            outcome.position,
        );
        Ok(())
    }

    // ── Admin registry ───────────────────────────────────────────────────────

    /// Create the admin registry with `caller` as root authority.
    ///
    /// Calling it again once the registry exists succeeds without changing
    /// anything, whoever the caller is.
    pub fn initialize(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        let mut txn = Txn::begin(&env);
        let created = registry::initialize(&mut txn, &caller)?;
        if !created {
            return Ok(());
        }
        txn.commit();
        config::extend_ttl_instance(&env);

        events::publish_initialized(&env, caller, addresses::admin_address(&env)?);
        Ok(())
    }

    /// Check if a well-formed admin registry exists
    pub fn is_initialized(env: Env) -> Result<bool, ContractError> {
        match registry::load_registry(&Txn::begin(&env)) {
            Ok(_) => Ok(true),
            Err(ContractError::NotInitialized) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub fn get_admin_registry(env: Env) -> Result<AdminRegistry, ContractError> {
        registry::load_registry(&Txn::begin(&env))
    }

    pub fn add_read_authority(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::change_authority(&env, caller, target, AuthorityKind::Read, AuthorityChange::Add)
    }

    pub fn add_write_authority(
        env: Env,
        caller: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::change_authority(&env, caller, target, AuthorityKind::Write, AuthorityChange::Add)
    }

    pub fn remove_read_authority(
        env: Env,
        caller: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::change_authority(
            &env,
            caller,
            target,
            AuthorityKind::Read,
            AuthorityChange::Remove,
        )
    }

    pub fn remove_write_authority(
        env: Env,
        caller: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::change_authority(
            &env,
            caller,
            target,
            AuthorityKind::Write,
            AuthorityChange::Remove,
        )
    }

    pub fn has_read_authority(env: Env, identity: Address) -> Result<bool, ContractError> {
        let registry = registry::load_registry(&Txn::begin(&env))?;
        Ok(registry.contains(AuthorityKind::Read, &identity))
    }

    pub fn has_write_authority(env: Env, identity: Address) -> Result<bool, ContractError> {
        let registry = registry::load_registry(&Txn::begin(&env))?;
        Ok(registry.contains(AuthorityKind::Write, &identity))
    }

    /// Checks whether `identity` currently holds `permission`.
    pub fn check_permission(
        env: Env,
        identity: Address,
        permission: Permission,
    ) -> Result<bool, ContractError> {
        let registry = registry::load_registry(&Txn::begin(&env))?;
        Ok(auth::has_permission(&registry, &identity, permission))
    }

    // ── Authority history ────────────────────────────────────────────────────

    /// `admin`'s authority changes from pages `start_page..start_page + max_pages`,
    /// oldest first. At most [`history::MAX_PAGES_PER_READ`] pages per call;
    /// page past the end by advancing `start_page`.
    pub fn get_history(
        env: Env,
        admin: Address,
        start_page: u32,
        max_pages: u32,
    ) -> Result<Vec<HistoryEntry>, ContractError> {
        history::read_range(&env, &admin, start_page, max_pages)
    }

    pub fn get_history_page(
        env: Env,
        admin: Address,
        page: u32,
    ) -> Result<HistoryPage, ContractError> {
        history::read_page(&env, &admin, page)?.ok_or(ContractError::NotFound)
    }

    /// Page count and entry count of `admin`'s history.
    pub fn get_history_ledger(env: Env, admin: Address) -> Result<HistoryLedger, ContractError> {
        history::read_header(&env, &admin)?.ok_or(ContractError::NotFound)
    }

    pub fn get_history_len(env: Env, admin: Address) -> Result<u64, ContractError> {
        history::total_len(&env, &admin)
    }

    // ── Patient records ──────────────────────────────────────────────────────

    /// Store a new encrypted record for `(owner, seed)`.
    pub fn create_patient(
        env: Env,
        caller: Address,
        owner: Address,
        seed: Address,
        encrypted_payload: Bytes,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut txn = Txn::begin(&env);
        let registry = registry::load_registry(&txn)?;
        let (address, record) =
            patient::create(&mut txn, &registry, &caller, &owner, &seed, encrypted_payload)?;
        txn.commit();

        events::publish_patient_created(
            &env,
            address,
            record.owner,
            caller,
            record.encrypted_payload.len(),
        );
        Ok(())
    }

    /// Replace the encrypted payload of an existing record.
    pub fn update_patient(
        env: Env,
        caller: Address,
        owner: Address,
        seed: Address,
        encrypted_payload: Bytes,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut txn = Txn::begin(&env);
        let registry = registry::load_registry(&txn)?;
        let (address, record) =
            patient::update(&mut txn, &registry, &caller, &owner, &seed, encrypted_payload)?;
        txn.commit();

        events::publish_patient_updated(
            &env,
            address,
            record.owner,
            caller,
            record.encrypted_payload.len(),
        );
        Ok(())
    }

    /// Return a record to a read authority. Decryption happens off-ledger.
    pub fn get_patient(
        env: Env,
        caller: Address,
        owner: Address,
        seed: Address,
    ) -> Result<PatientRecord, ContractError> {
        caller.require_auth();

        let txn = Txn::begin(&env);
        let registry = registry::load_registry(&txn)?;
        patient::get(&txn, &registry, &caller, &owner, &seed)
    }

    // ── Configuration ────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> ProgramConfig {
        config::load(&env)
    }

    /// Replace the program configuration. Root authority only.
    pub fn set_config(
        env: Env,
        caller: Address,
        new_config: ProgramConfig,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let registry = registry::load_registry(&Txn::begin(&env))?;
        auth::can_mutate_authorities(&env, &caller, &registry)?;
        new_config.validate()?;

        config::store(&env, &new_config);
        events::publish_config_updated(&env, caller, new_config);
        Ok(())
    }

    // ── Addresses and raw accounts ───────────────────────────────────────────

    /// Derive an address under this contract from arbitrary seeds.
    /// Returns the address and its bump seed.
    pub fn find_program_address(
        env: Env,
        seeds: Vec<Bytes>,
    ) -> Result<(BytesN<32>, u32), ContractError> {
        let (address, bump) = addresses::derive(&env, &seeds)?;
        Ok((address, u32::from(bump)))
    }

    pub fn admin_address(env: Env) -> Result<BytesN<32>, ContractError> {
        addresses::admin_address(&env)
    }

    pub fn history_address(env: Env, admin: Address) -> Result<BytesN<32>, ContractError> {
        addresses::history_address(&env, &admin)
    }

    pub fn history_page_address(
        env: Env,
        admin: Address,
        page: u32,
    ) -> Result<BytesN<32>, ContractError> {
        addresses::history_page_address(&env, &admin, page)
    }

    pub fn patient_address(
        env: Env,
        owner: Address,
        seed: Address,
    ) -> Result<BytesN<32>, ContractError> {
        addresses::patient_address(&env, &owner, &seed)
    }

    /// Raw persisted bytes of the account at `address`, if any.
    pub fn get_account_data(env: Env, address: BytesN<32>) -> Option<Bytes> {
        store::read_raw(&env, &address)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}



#[cfg(test)]
mod test_atomicity;
