//! Role registry shared by all contracts.
//!
//! Grants are stored per contract in persistent storage under
//! `(ROLE, role, account)`. A contract bootstraps a single admin at
//! initialisation with [`grant_role`]; afterwards every privileged entry
//! point calls [`authorize`], which authenticates the caller and then
//! checks the grant.

#![allow(deprecated)] // env.events().publish

use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const ROLE: Symbol = symbol_short!("ROLE");
const ROLE_TTL_THRESHOLD: u32 = 5_184_000; // ~300 days (@ ~5s/ledger)
const ROLE_TTL_EXTEND_TO: u32 = 10_368_000; // ~600 days

/// Named capabilities recognised by the contracts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Allow-list changes, fee changes, fund sweeps, role management and
    /// upgrades.
    Admin,
    /// Permission to record tallies on the survey manager. Held by the
    /// deployed voting engine only.
    VotingEngine,
}

impl Role {
    /// Short symbol used in event topics and diagnostics.
    pub fn symbol(&self) -> Symbol {
        match self {
            Role::Admin => symbol_short!("ADMIN"),
            Role::VotingEngine => symbol_short!("VOTE_ENG"),
        }
    }
}

fn role_key(role: &Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE, role.clone(), account.clone())
}

/// Returns whether `account` currently holds `role`.
pub fn has_role(env: &Env, role: &Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let granted = env.storage().persistent().get(&key).unwrap_or(false);
    if granted {
        env.storage()
            .persistent()
            .extend_ttl(&key, ROLE_TTL_THRESHOLD, ROLE_TTL_EXTEND_TO);
    }
    granted
}

/// Grants `role` to `account`. Returns `false` when it was already held.
///
/// Performs no authorization; entry points call [`authorize`] first.
pub fn grant_role(env: &Env, role: &Role, account: &Address, sender: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, ROLE_TTL_THRESHOLD, ROLE_TTL_EXTEND_TO);
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), role.symbol()),
        (account.clone(), sender.clone()),
    );
    true
}

/// Revokes `role` from `account`. Returns `false` when it was not held.
pub fn revoke_role(env: &Env, role: &Role, account: &Address, sender: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    env.events().publish(
        (symbol_short!("ROLE_RVK"), role.symbol()),
        (account.clone(), sender.clone()),
    );
    true
}

/// Fails with [`CommonError::MissingRole`] unless `account` holds `role`.
///
/// The failure is logged with the missing role and the offending account.
pub fn require_role(env: &Env, role: &Role, account: &Address) -> Result<(), CommonError> {
    if has_role(env, role, account) {
        return Ok(());
    }
    log!(
        env,
        "account {} is missing role {}",
        account.clone(),
        role.symbol()
    );
    Err(CommonError::MissingRole)
}

/// Authenticates `caller` and requires it to hold `role`.
pub fn authorize(env: &Env, role: &Role, caller: &Address) -> Result<(), CommonError> {
    caller.require_auth();
    require_role(env, role, caller)
}
