//! Program-derived account addresses.
//!
//! An address is `sha256(seeds ‖ program ‖ "ProgramDerivedAddress")`, where the
//! last seed is a one-byte bump. Contract storage keys never double as signing
//! keys on Soroban, so every digest is a usable address and the canonical bump
//! is always [`CANONICAL_BUMP`]. The result depends only on the seeds and the
//! program identity, so clients can recompute it without touching the ledger.

use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

use crate::identity::identity_bytes;
use crate::CommonError;

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: u32 = 16;
/// Maximum length of a single seed. Identity seeds are 56 bytes.
pub const MAX_SEED_LEN: u32 = 64;
/// Bump appended by [`find_program_address`].
pub const CANONICAL_BUMP: u8 = u8::MAX;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

fn check_seeds(seeds: &Vec<Bytes>, max_seeds: u32) -> Result<(), CommonError> {
    if seeds.len() > max_seeds {
        return Err(CommonError::InvalidSeeds);
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(CommonError::InvalidSeeds);
    }
    Ok(())
}

/// Hashes `seeds` under `program` into an account address.
///
/// # Errors
/// [`CommonError::InvalidSeeds`] when the seed limits are exceeded.
pub fn create_program_address(
    env: &Env,
    seeds: &Vec<Bytes>,
    program: &Address,
) -> Result<BytesN<32>, CommonError> {
    check_seeds(seeds, MAX_SEEDS)?;

    let mut preimage = Bytes::new(env);
    for seed in seeds.iter() {
        preimage.append(&seed);
    }
    preimage.extend_from_array(&identity_bytes(program)?);
    preimage.extend_from_slice(PDA_MARKER);

    Ok(env.crypto().sha256(&preimage).into())
}

/// Derives the canonical address for `seeds`, returning it together with the
/// bump seed that was appended.
pub fn find_program_address(
    env: &Env,
    seeds: &Vec<Bytes>,
    program: &Address,
) -> Result<(BytesN<32>, u8), CommonError> {
    check_seeds(seeds, MAX_SEEDS - 1)?;

    let mut with_bump = seeds.clone();
    with_bump.push_back(Bytes::from_array(env, &[CANONICAL_BUMP]));
    let address = create_program_address(env, &with_bump, program)?;
    Ok((address, CANONICAL_BUMP))
}
