//! Seed sets for every account the program owns.

use mr_common::{find_program_address, identity_bytes};
use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

use crate::errors::ContractError;

const ADMIN_SEED: &[u8] = b"admin";
const HISTORY_SEED: &[u8] = b"history";
const PATIENT_SEED: &[u8] = b"patient";

fn identity_seed(env: &Env, identity: &Address) -> Result<Bytes, ContractError> {
    Ok(Bytes::from_array(env, &identity_bytes(identity)?))
}

/// Derives under this contract's own address.
pub fn derive(env: &Env, seeds: &Vec<Bytes>) -> Result<(BytesN<32>, u8), ContractError> {
    Ok(find_program_address(
        env,
        seeds,
        &env.current_contract_address(),
    )?)
}

pub fn admin_seeds(env: &Env) -> Vec<Bytes> {
    let mut seeds = Vec::new(env);
    seeds.push_back(Bytes::from_slice(env, ADMIN_SEED));
    seeds
}

/// The ledger header sits at `["history", admin]`.
pub fn history_seeds(env: &Env, admin: &Address) -> Result<Vec<Bytes>, ContractError> {
    let mut seeds = Vec::new(env);
    seeds.push_back(Bytes::from_slice(env, HISTORY_SEED));
    seeds.push_back(identity_seed(env, admin)?);
    Ok(seeds)
}

/// Page `n` sits at `["history", admin, u32_le(n)]`.
pub fn history_page_seeds(
    env: &Env,
    admin: &Address,
    page: u32,
) -> Result<Vec<Bytes>, ContractError> {
    let mut seeds = history_seeds(env, admin)?;
    seeds.push_back(Bytes::from_array(env, &page.to_le_bytes()));
    Ok(seeds)
}

pub fn patient_seeds(env: &Env, owner: &Address, seed: &Address) -> Result<Vec<Bytes>, ContractError> {
    let mut seeds = Vec::new(env);
    seeds.push_back(Bytes::from_slice(env, PATIENT_SEED));
    seeds.push_back(identity_seed(env, owner)?);
    seeds.push_back(identity_seed(env, seed)?);
    Ok(seeds)
}

pub fn admin_address(env: &Env) -> Result<BytesN<32>, ContractError> {
    Ok(derive(env, &admin_seeds(env))?.0)
}

pub fn history_address(env: &Env, admin: &Address) -> Result<BytesN<32>, ContractError> {
    Ok(derive(env, &history_seeds(env, admin)?)?.0)
}

pub fn history_page_address(
    env: &Env,
    admin: &Address,
    page: u32,
) -> Result<BytesN<32>, ContractError> {
    Ok(derive(env, &history_page_seeds(env, admin, page)?)?.0)
}

pub fn patient_address(
    env: &Env,
    owner: &Address,
    seed: &Address,
) -> Result<BytesN<32>, ContractError> {
    Ok(derive(env, &patient_seeds(env, owner, seed)?)?.0)
}
