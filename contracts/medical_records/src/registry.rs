use mr_common::{Reader, Writer};
use soroban_sdk::{contracttype, log, Address, Env, Vec};

use crate::addresses;
use crate::auth;
use crate::config::ProgramConfig;
use crate::errors::ContractError;
use crate::history::{HistoryAppender, HistoryEntry};
use crate::store::Txn;

/// Upper bound on each authority set, part of the account schema.
pub const MAX_AUTHORITIES: u32 = 64;

/// Which authority set an operation targets.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AuthorityKind {
    Read = 0,
    Write = 1,
}

/// Singleton account at `derive(["admin"])` holding the authority sets.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminRegistry {
    /// Super-admin; fixed at initialization.
    pub authority: Address,
    pub read_authorities: Vec<Address>,
    pub write_authorities: Vec<Address>,
}

impl AdminRegistry {
    pub fn new(env: &Env, authority: Address) -> Self {
        let mut read_authorities = Vec::new(env);
        read_authorities.push_back(authority.clone());
        let mut write_authorities = Vec::new(env);
        write_authorities.push_back(authority.clone());
        Self {
            authority,
            read_authorities,
            write_authorities,
        }
    }

    pub fn authorities(&self, kind: AuthorityKind) -> &Vec<Address> {
        match kind {
            AuthorityKind::Read => &self.read_authorities,
            AuthorityKind::Write => &self.write_authorities,
        }
    }

    fn authorities_mut(&mut self, kind: AuthorityKind) -> &mut Vec<Address> {
        match kind {
            AuthorityKind::Read => &mut self.read_authorities,
            AuthorityKind::Write => &mut self.write_authorities,
        }
    }

    pub fn contains(&self, kind: AuthorityKind, who: &Address) -> bool {
        self.authorities(kind).contains(who)
    }

    /// Inserts `who` keeping insertion order. Returns `false` when already present.
    pub fn insert(&mut self, kind: AuthorityKind, who: &Address) -> Result<bool, ContractError> {
        let set = self.authorities_mut(kind);
        if set.contains(who) {
            return Ok(false);
        }
        if set.len() >= MAX_AUTHORITIES {
            return Err(ContractError::AuthorityLimitReached);
        }
        set.push_back(who.clone());
        Ok(true)
    }

    /// Removes `who`. Returns `false` when it was not a member.
    pub fn remove(&mut self, kind: AuthorityKind, who: &Address) -> bool {
        let set = self.authorities_mut(kind);
        match set.first_index_of(who) {
            Some(index) => {
                set.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn write_fields(&self, w: &mut Writer) -> Result<(), ContractError> {
        w.put_identity(&self.authority)?;
        w.put_identities(&self.read_authorities)?;
        w.put_identities(&self.write_authorities)?;
        Ok(())
    }

    pub(crate) fn read_fields(r: &mut Reader) -> Result<Self, ContractError> {
        Ok(Self {
            authority: r.read_identity()?,
            read_authorities: r.read_identities(MAX_AUTHORITIES)?,
            write_authorities: r.read_identities(MAX_AUTHORITIES)?,
        })
    }
}

/// Whether an authority mutation inserts or removes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthorityChange {
    Add,
    Remove,
}

/// Result of an authority mutation, used for the emitted event.
#[derive(Clone, Debug)]
pub struct ChangeOutcome {
    pub entry: HistoryEntry,
    /// `false` for a duplicate add or a remove of a non-member.
    pub changed: bool,
    pub page: u32,
    pub position: u32,
}

/// Loads the registry or fails with `NotInitialized`.
pub fn load_registry(txn: &Txn) -> Result<AdminRegistry, ContractError> {
    let address = addresses::admin_address(txn.env())?;
    txn.load_admin(&address)?
        .ok_or(ContractError::NotInitialized)
}

/// Creates the registry if absent. Returns `false` when it already existed.
///
/// Any caller may initialize; the first one becomes the root authority.
pub fn initialize(txn: &mut Txn, caller: &Address) -> Result<bool, ContractError> {
    let address = addresses::admin_address(txn.env())?;
    if txn.load_admin(&address)?.is_some() {
        return Ok(false);
    }

    let registry = AdminRegistry::new(txn.env(), caller.clone());
    txn.stage_admin(&address, &registry)?;
    Ok(true)
}

/// Adds or removes `target` in the `kind` set and appends one history entry.
///
/// Every read (registry, history header and tail page) happens before anything is staged.
pub fn change_authority(
    txn: &mut Txn,
    config: &ProgramConfig,
    caller: &Address,
    target: &Address,
    kind: AuthorityKind,
    change: AuthorityChange,
) -> Result<ChangeOutcome, ContractError> {
    let env = txn.env();
    let registry_address = addresses::admin_address(env)?;
    let mut registry = txn
        .load_admin(&registry_address)?
        .ok_or(ContractError::NotInitialized)?;

    auth::can_mutate_authorities(env, caller, &registry)?;

    if change == AuthorityChange::Remove
        && config.protect_root_authority
        && *target == registry.authority
    {
        log!(env, "root authority removal blocked", target.clone());
        return Err(ContractError::RootAuthorityProtected);
    }

    let history = HistoryAppender::open(txn, caller, config.history_page_capacity)?;

    let changed = match change {
        AuthorityChange::Add => registry.insert(kind, target)?,
        AuthorityChange::Remove => registry.remove(kind, target),
    };

    let entry = HistoryEntry {
        admin: caller.clone(),
        authority: target.clone(),
        added: change == AuthorityChange::Add,
        is_read: kind == AuthorityKind::Read,
        timestamp: env.ledger().timestamp(),
    };

    txn.stage_admin(&registry_address, &registry)?;
    let (page, position) = history.append(txn, entry.clone())?;

    Ok(ChangeOutcome {
        entry,
        changed,
        page,
        position,
    })
}
