//! Account store over persistent contract storage.
//!
//! Entry points never write storage directly. They open a [`Txn`], do all of
//! their loads through it, stage the accounts they change, and flush
//! everything with a single [`Txn::commit`] once no further error is possible.
//! A call that returns early simply drops its staged writes.

use soroban_sdk::{symbol_short, Bytes, BytesN, Env, Map, Symbol};

use crate::accounts::Account;
use crate::errors::ContractError;
use crate::history::{HistoryLedger, HistoryPage};
use crate::patient::PatientRecord;
use crate::registry::AdminRegistry;

const ACCOUNT: Symbol = symbol_short!("ACCOUNT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

fn account_key(address: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (ACCOUNT, address.clone())
}

/// Extends the time-to-live (TTL) for an account entry.
fn extend_ttl_account_key(env: &Env, key: &(Symbol, BytesN<32>)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Raw committed bytes at `address`.
pub fn read_raw(env: &Env, address: &BytesN<32>) -> Option<Bytes> {
    env.storage().persistent().get(&account_key(address))
}

/// Decodes the committed account at `address`, outside of any transaction.
pub fn load_committed(env: &Env, address: &BytesN<32>) -> Result<Option<Account>, ContractError> {
    read_raw(env, address)
        .map(|data| Account::decode(env, &data))
        .transpose()
}

pub struct Txn<'a> {
    env: &'a Env,
    staged: Map<BytesN<32>, Bytes>,
}

impl<'a> Txn<'a> {
    pub fn begin(env: &'a Env) -> Self {
        Self {
            env,
            staged: Map::new(env),
        }
    }

    pub fn env(&self) -> &'a Env {
        self.env
    }

    /// Loads the account at `address`, seeing this transaction's own staged
    /// writes before committed state.
    pub fn load(&self, address: &BytesN<32>) -> Result<Option<Account>, ContractError> {
        let data = match self.staged.get(address.clone()) {
            Some(data) => Some(data),
            None => read_raw(self.env, address),
        };
        data.map(|data| Account::decode(self.env, &data)).transpose()
    }

    pub fn load_admin(&self, address: &BytesN<32>) -> Result<Option<AdminRegistry>, ContractError> {
        self.load(address)?.map(Account::into_admin).transpose()
    }

    pub fn load_history(
        &self,
        address: &BytesN<32>,
    ) -> Result<Option<HistoryLedger>, ContractError> {
        self.load(address)?.map(Account::into_history).transpose()
    }

    pub fn load_history_page(
        &self,
        address: &BytesN<32>,
    ) -> Result<Option<HistoryPage>, ContractError> {
        self.load(address)?.map(Account::into_history_page).transpose()
    }

    pub fn load_patient(
        &self,
        address: &BytesN<32>,
    ) -> Result<Option<PatientRecord>, ContractError> {
        self.load(address)?.map(Account::into_patient).transpose()
    }

    /// Encodes `account` and stages it; replaces any earlier staged value.
    pub fn stage(&mut self, address: &BytesN<32>, account: &Account) -> Result<(), ContractError> {
        let data = account.encode(self.env)?;
        self.staged.set(address.clone(), data);
        Ok(())
    }

    pub fn stage_admin(
        &mut self,
        address: &BytesN<32>,
        registry: &AdminRegistry,
    ) -> Result<(), ContractError> {
        self.stage(address, &Account::Admin(registry.clone()))
    }

    pub fn stage_history(
        &mut self,
        address: &BytesN<32>,
        ledger: &HistoryLedger,
    ) -> Result<(), ContractError> {
        self.stage(address, &Account::History(ledger.clone()))
    }

    pub fn stage_history_page(
        &mut self,
        address: &BytesN<32>,
        page: &HistoryPage,
    ) -> Result<(), ContractError> {
        self.stage(address, &Account::HistoryPage(page.clone()))
    }

    pub fn stage_patient(
        &mut self,
        address: &BytesN<32>,
        record: &PatientRecord,
    ) -> Result<(), ContractError> {
        self.stage(address, &Account::Patient(record.clone()))
    }

    pub fn staged_len(&self) -> u32 {
        self.staged.len()
    }

    /// Writes every staged account. Returns how many were written.
    pub fn commit(self) -> u32 {
        let storage = self.env.storage().persistent();
        for (address, data) in self.staged.iter() {
            let key = account_key(&address);
            storage.set(&key, &data);
            extend_ttl_account_key(self.env, &key);
        }
        self.staged.len()
    }
}
