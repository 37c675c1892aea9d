use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::errors::ContractError;
use crate::history::MAX_PAGE_CAPACITY;

const CONFIG: Symbol = symbol_short!("CONFIG");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

pub const DEFAULT_HISTORY_PAGE_CAPACITY: u32 = 32;

/// Program-wide policy knobs, changeable only by the root authority.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramConfig {
    /// When set, the root authority cannot remove itself from either set.
    pub protect_root_authority: bool,
    /// Entries per history page before a new page is opened.
    pub history_page_capacity: u32,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            protect_root_authority: true,
            history_page_capacity: DEFAULT_HISTORY_PAGE_CAPACITY,
        }
    }
}

impl ProgramConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.history_page_capacity == 0 || self.history_page_capacity > MAX_PAGE_CAPACITY {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }
}

/// Extends the time-to-live (TTL) for instance storage.
pub fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Returns the stored config, or the defaults if none was ever set.
pub fn load(env: &Env) -> ProgramConfig {
    env.storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or_default()
}

pub fn store(env: &Env, config: &ProgramConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_ttl_instance(env);
}
