use mr_common::{Reader, Writer};
use soroban_sdk::{contracttype, Address, Bytes, BytesN};

use crate::addresses;
use crate::auth;
use crate::errors::ContractError;
use crate::registry::AdminRegistry;
use crate::store::Txn;

/// Upper bound on an encrypted payload, part of the account schema.
pub const MAX_PAYLOAD_LEN: u32 = 4096;

/// Per-record account at `derive(["patient", owner, seed])`.
///
/// `encrypted_payload` is ciphertext produced off-ledger; it is stored and
/// returned byte for byte and only ever replaced as a whole.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRecord {
    pub owner: Address,
    pub seed: Address,
    pub is_initialized: bool,
    pub encrypted_payload: Bytes,
    pub created_at: u64,
    pub updated_at: u64,
    pub updated_by: Address,
}

impl PatientRecord {
    pub(crate) fn write_fields(&self, w: &mut Writer) -> Result<(), ContractError> {
        w.put_identity(&self.owner)?;
        w.put_identity(&self.seed)?;
        w.put_bool(self.is_initialized);
        w.put_bytes(&self.encrypted_payload);
        w.put_u64(self.created_at);
        w.put_u64(self.updated_at);
        w.put_identity(&self.updated_by)?;
        Ok(())
    }

    pub(crate) fn read_fields(r: &mut Reader) -> Result<Self, ContractError> {
        Ok(Self {
            owner: r.read_identity()?,
            seed: r.read_identity()?,
            is_initialized: r.read_bool()?,
            encrypted_payload: r.read_bytes(MAX_PAYLOAD_LEN)?,
            created_at: r.read_u64()?,
            updated_at: r.read_u64()?,
            updated_by: r.read_identity()?,
        })
    }
}

pub fn validate_payload(payload: &Bytes) -> Result<(), ContractError> {
    if payload.is_empty() {
        return Err(ContractError::InvalidPayload);
    }
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(ContractError::PayloadTooLarge);
    }
    Ok(())
}

/// `Absent -> Initialized`.
pub fn create(
    txn: &mut Txn,
    registry: &AdminRegistry,
    caller: &Address,
    owner: &Address,
    seed: &Address,
    encrypted_payload: Bytes,
) -> Result<(BytesN<32>, PatientRecord), ContractError> {
    let env = txn.env();
    auth::can_write(env, caller, registry)?;
    validate_payload(&encrypted_payload)?;

    let address = addresses::patient_address(env, owner, seed)?;
    if let Some(existing) = txn.load_patient(&address)? {
        if existing.is_initialized {
            return Err(ContractError::AlreadyInitialized);
        }
    }

    let now = env.ledger().timestamp();
    let record = PatientRecord {
        owner: owner.clone(),
        seed: seed.clone(),
        is_initialized: true,
        encrypted_payload,
        created_at: now,
        updated_at: now,
        updated_by: caller.clone(),
    };
    txn.stage_patient(&address, &record)?;
    Ok((address, record))
}

/// `Initialized -> Initialized` with the payload replaced wholesale.
pub fn update(
    txn: &mut Txn,
    registry: &AdminRegistry,
    caller: &Address,
    owner: &Address,
    seed: &Address,
    encrypted_payload: Bytes,
) -> Result<(BytesN<32>, PatientRecord), ContractError> {
    let env = txn.env();
    auth::can_write(env, caller, registry)?;
    validate_payload(&encrypted_payload)?;

    let address = addresses::patient_address(env, owner, seed)?;
    let mut record = txn
        .load_patient(&address)?
        .filter(|record| record.is_initialized)
        .ok_or(ContractError::NotFound)?;

    record.encrypted_payload = encrypted_payload;
    record.updated_at = env.ledger().timestamp();
    record.updated_by = caller.clone();
    txn.stage_patient(&address, &record)?;
    Ok((address, record))
}

/// Read-only; proves `caller` may read at call time.
pub fn get(
    txn: &Txn,
    registry: &AdminRegistry,
    caller: &Address,
    owner: &Address,
    seed: &Address,
) -> Result<PatientRecord, ContractError> {
    let env = txn.env();
    auth::can_read(env, caller, registry)?;

    let address = addresses::patient_address(env, owner, seed)?;
    txn.load_patient(&address)?
        .filter(|record| record.is_initialized)
        .ok_or(ContractError::NotFound)
}
