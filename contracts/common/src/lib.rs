//! Shared building blocks for the medical-records contract.
//!
//! This crate provides:
//! - [`CommonError`]: error codes raised by the shared layer.
//! - [`pda`]: deterministic program-derived account addresses.
//! - [`codec`]: the little-endian account byte layout (discriminator,
//!   fixed-width identities, length-prefixed sequences).
//! - [`identity`]: fixed-width StrKey encoding of identities.
//!
//! Contract-specific errors convert from [`CommonError`] so that shared helpers
//! can be called with `?` from any entry point.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod codec;
pub mod identity;
pub mod pda;

pub use codec::{discriminator, Reader, Writer, DISCRIMINATOR_LEN};
pub use identity::{identity_bytes, identity_from_bytes, IDENTITY_LEN};
pub use pda::{
    create_program_address, find_program_address, CANONICAL_BUMP, MAX_SEEDS, MAX_SEED_LEN,
};

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes raised by the shared layer.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 30 – 39 | Address derivation             |
/// | 40 – 49 | Account encoding               |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Address derivation (30–39) ───────────────────────────
    /// Too many seeds, or a seed longer than [`MAX_SEED_LEN`].
    InvalidSeeds = 30,

    // ── Encoding (40–49) ─────────────────────────────────────
    /// An identity does not have the fixed StrKey width.
    InvalidIdentity = 40,

    /// Stored bytes do not match the expected account schema.
    MalformedAccount = 41,
}
