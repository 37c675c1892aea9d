//! Authorization engine.
//!
//! Every decision is made against the [`AdminRegistry`] loaded inside the
//! same call, so a decision can never be based on another call's view of
//! the authority sets.

use soroban_sdk::{contracttype, log, Address, Env};

use crate::errors::ContractError;
use crate::registry::{AdminRegistry, AuthorityKind};

/// Operation classes the engine decides on.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Permission {
    Initialize = 1,
    MutateAuthorities = 2,
    WriteRecord = 3,
    ReadRecord = 4,
}

/// Pure membership check behind every `can_*` guard.
pub fn has_permission(registry: &AdminRegistry, caller: &Address, permission: Permission) -> bool {
    match permission {
        Permission::Initialize => true,
        Permission::MutateAuthorities => *caller == registry.authority,
        Permission::WriteRecord => registry.contains(AuthorityKind::Write, caller),
        Permission::ReadRecord => registry.contains(AuthorityKind::Read, caller),
    }
}

fn require(
    env: &Env,
    caller: &Address,
    registry: &AdminRegistry,
    permission: Permission,
) -> Result<(), ContractError> {
    if has_permission(registry, caller, permission) {
        return Ok(());
    }
    log!(env, "unauthorized", caller.clone(), permission);
    Err(ContractError::Unauthorized)
}

pub fn can_mutate_authorities(
    env: &Env,
    caller: &Address,
    registry: &AdminRegistry,
) -> Result<(), ContractError> {
    require(env, caller, registry, Permission::MutateAuthorities)
}

/// Required for creating and updating patient records.
pub fn can_write(env: &Env, caller: &Address, registry: &AdminRegistry) -> Result<(), ContractError> {
    require(env, caller, registry, Permission::WriteRecord)
}

/// Required for reading patient records.
pub fn can_read(env: &Env, caller: &Address, registry: &AdminRegistry) -> Result<(), ContractError> {
    require(env, caller, registry, Permission::ReadRecord)
}
