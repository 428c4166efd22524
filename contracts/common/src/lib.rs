//! Shared infrastructure for the stake-gated survey contracts.
//!
//! This crate provides:
//! - [`CommonError`] - error codes shared by the staking, survey and voting
//!   contracts.
//! - [`access`] - the role registry every contract consults before a
//!   privileged mutation.
//! - [`allowlist`] - address allow-list storage used by the staking ledger.
//! - [`funds`] - native-asset balance queries and admin sweeps.
//! - [`upgrade`] - WASM upgrade gate and storage schema versioning.
//! - [`survey_types`] - the survey record shared between the survey manager
//!   and the voting engine's cross-contract client.
//!
//! Contract-specific errors extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod allowlist;
pub mod funds;
pub mod survey_types;
pub mod upgrade;

pub use access::*;
pub use allowlist::*;
pub use funds::*;
pub use survey_types::*;
pub use upgrade::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
/// | 50 – 59 | Migration & versioning         |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// The caller does not hold the role the entry point requires.
    MissingRole = 10,
    InvalidInput = 30,
    /// Stored data was written by a newer schema than the running logic.
    VersionTooNew = 50,
}
