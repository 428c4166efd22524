//! Logic upgrades and storage schema versioning.
//!
//! A contract keeps its address and storage across a WASM swap. The layout
//! of that storage is tracked by a schema version written at
//! initialisation and bumped by [`migrate`] once new logic that understands
//! a newer layout is installed.

#![allow(deprecated)] // env.events().publish

use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

use crate::access::{authorize, Role};
use crate::CommonError;

pub type SchemaVersion = u32;

const VERSION_KEY: Symbol = symbol_short!("SCHEMA_V");

pub fn stored_version(env: &Env) -> SchemaVersion {
    env.storage().instance().get(&VERSION_KEY).unwrap_or(0u32)
}

pub fn set_stored_version(env: &Env, version: SchemaVersion) {
    env.storage().instance().set(&VERSION_KEY, &version);
}

/// Gate for logic replacement: only [`Role::Admin`] may authorise it.
pub fn authorize_upgrade(env: &Env, caller: &Address) -> Result<(), CommonError> {
    authorize(env, &Role::Admin, caller)
}

/// Replaces the running contract's WASM with `new_wasm_hash`.
///
/// The hash must already be uploaded to the network.
pub fn upgrade(env: &Env, caller: &Address, new_wasm_hash: BytesN<32>) -> Result<(), CommonError> {
    authorize_upgrade(env, caller)?;
    env.deployer()
        .update_current_contract_wasm(new_wasm_hash.clone());
    env.events()
        .publish((symbol_short!("UPGRADED"),), new_wasm_hash);
    Ok(())
}

/// Brings the stored schema version up to `current`, the version compiled
/// into the running logic.
///
/// Fails with [`CommonError::VersionTooNew`] when storage was written by a
/// newer layout than `current`.
pub fn migrate(
    env: &Env,
    caller: &Address,
    current: SchemaVersion,
) -> Result<SchemaVersion, CommonError> {
    authorize(env, &Role::Admin, caller)?;
    let stored = stored_version(env);
    if stored > current {
        return Err(CommonError::VersionTooNew);
    }
    if stored < current {
        set_stored_version(env, current);
        env.events()
            .publish((symbol_short!("MIGRATED"),), (stored, current));
    }
    Ok(current)
}
