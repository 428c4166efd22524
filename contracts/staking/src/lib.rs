#![no_std]

//! # Allow-list staking ledger
//!
//! Holds custody of staked fungible tokens and records a balance per
//! `(holder, token)`. Only tokens on the admin-managed allow-list can be
//! staked; removing a token from the list blocks new stakes but never
//! traps existing ones, so `un_stake` ignores the allow-list entirely.
//!
//! Staked balances are read live by the voting engine to decide whether a
//! caller may vote on a survey.

pub mod events;

use common::{
    access::{self, Role},
    allowlist, funds, upgrade, CommonError, SchemaVersion,
};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, BytesN, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");

// Persistent storage uses tuple keys: (prefix, holder, token) and (prefix, token)
const USER_STAKE: Symbol = symbol_short!("STK");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// TTL: bump below ~60 days, up to ~120 days (5s/ledger)
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Storage layout understood by this build.
const SCHEMA_VERSION: SchemaVersion = 1;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    MissingRole = 10,
    InvalidInput = 30,
    VersionTooNew = 50,
    /// The token address cannot be custodied by the ledger.
    InvalidToken = 100,
    InvalidAmount = 101,
    TokenNotAllowed = 102,
    InsufficientStakedAmount = 103,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::MissingRole => ContractError::MissingRole,
            CommonError::InvalidInput => ContractError::InvalidInput,
            CommonError::VersionTooNew => ContractError::VersionTooNew,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `admin`        – receives [`Role::Admin`].
    /// * `native_asset` – SAC address of the native asset; `withdraw` sweeps
    ///                    this asset's balance.
    pub fn initialize(env: Env, admin: Address, native_asset: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&NATIVE_ASSET, &native_asset);
        env.storage().instance().set(&INITIALIZED, &true);
        upgrade::set_stored_version(&env, SCHEMA_VERSION);
        access::grant_role(&env, &Role::Admin, &admin, &admin);

        events::publish_initialized(&env, &admin, &native_asset);

        Ok(())
    }

    // ── Allow-list ──────────────────────────────────────────────────────────

    /// Allow or disallow `token` for new stakes.
    ///
    /// Existing balances in `token` are unaffected either way.
    pub fn set_token_allowed(
        env: Env,
        caller: Address,
        token: Address,
        allowed: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;

        if token == env.current_contract_address() {
            return Err(ContractError::InvalidToken);
        }

        allowlist::set_allowed(&env, &token, allowed);
        events::publish_token_allowed(&env, &token, allowed);

        Ok(())
    }

    /// Shorthand for `set_token_allowed(caller, token, false)`.
    pub fn remove_allowed_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::set_token_allowed(env, caller, token, false)
    }

    pub fn is_token_allowed(env: Env, token: Address) -> bool {
        allowlist::is_allowed(&env, &token)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of `token` into the ledger.
    ///
    /// The staker must have authorised the transfer and hold the balance;
    /// token-side failures abort the call as-is.
    pub fn stake(env: Env, staker: Address, amount: i128, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if !allowlist::is_allowed(&env, &token) {
            return Err(ContractError::TokenNotAllowed);
        }

        // 1. Pull tokens from the staker into the ledger.
        token::Client::new(&env, &token).transfer(&staker, &env.current_contract_address(), &amount);

        // 2. Credit the staker and the per-token total.
        let new_balance = Self::stake_of(&env, &staker, &token).saturating_add(amount);
        Self::store_stake(&env, &staker, &token, new_balance);

        let new_total = Self::total_of(&env, &token).saturating_add(amount);
        Self::store_total(&env, &token, new_total);

        events::publish_staked(&env, &staker, &token, amount, new_balance);

        Ok(())
    }

    /// Return `amount` of previously staked `token` to the staker.
    ///
    /// Works whether or not `token` is still on the allow-list.
    pub fn un_stake(env: Env, staker: Address, amount: i128, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let prev_balance = Self::stake_of(&env, &staker, &token);
        if prev_balance < amount {
            return Err(ContractError::InsufficientStakedAmount);
        }

        // Debit before the transfer out (checks-effects-interactions).
        let new_balance = prev_balance - amount;
        Self::store_stake(&env, &staker, &token, new_balance);

        let new_total = Self::total_of(&env, &token).saturating_sub(amount);
        Self::store_total(&env, &token, new_total);

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &staker, &amount);

        events::publish_unstaked(&env, &staker, &token, amount, new_balance);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Current staked balance of `holder` in `token`; zero when never staked.
    pub fn get_staked_amount(env: Env, holder: Address, token: Address) -> i128 {
        Self::stake_of(&env, &holder, &token)
    }

    /// Sum of every holder's staked balance in `token`.
    pub fn get_total_staked(env: Env, token: Address) -> i128 {
        Self::total_of(&env, &token)
    }

    pub fn native_balance(env: Env) -> Result<i128, ContractError> {
        let native = Self::native_asset(&env)?;
        Ok(funds::contract_balance(&env, &native))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Sweep the ledger's native-asset balance to `caller`.
    ///
    /// Principal staked in the native asset itself is never swept.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;

        let native = Self::native_asset(&env)?;
        let reserved = Self::total_of(&env, &native);
        Ok(funds::sweep(&env, &native, &caller, reserved))
    }

    pub fn grant_role(env: Env, caller: Address, role: Role, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;
        access::grant_role(&env, &role, &account, &caller);
        Ok(())
    }

    pub fn revoke_role(env: Env, caller: Address, role: Role, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;
        access::revoke_role(&env, &role, &account, &caller);
        Ok(())
    }

    /// Drop a role held by the caller itself.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        access::revoke_role(&env, &role, &account, &account);
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access::has_role(&env, &role, &account)
    }

    /// Swap the ledger's logic; balances and allow-list survive.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        upgrade::upgrade(&env, &caller, new_wasm_hash)?;
        Ok(())
    }

    pub fn migrate(env: Env, caller: Address) -> Result<SchemaVersion, ContractError> {
        Self::require_initialized(&env)?;
        Ok(upgrade::migrate(&env, &caller, SCHEMA_VERSION)?)
    }

    pub fn schema_version(env: Env) -> SchemaVersion {
        upgrade::stored_version(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn native_asset(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NATIVE_ASSET)
            .ok_or(ContractError::NotInitialized)
    }

    fn stake_of(env: &Env, holder: &Address, token: &Address) -> i128 {
        let key = (USER_STAKE, holder.clone(), token.clone());
        match env.storage().persistent().get::<_, i128>(&key) {
            Some(amount) => {
                env.storage()
                    .persistent()
                    .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
                amount
            }
            None => 0,
        }
    }

    fn store_stake(env: &Env, holder: &Address, token: &Address, amount: i128) {
        let key = (USER_STAKE, holder.clone(), token.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn total_of(env: &Env, token: &Address) -> i128 {
        let key = (TOTAL_STAKED, token.clone());
        match env.storage().persistent().get::<_, i128>(&key) {
            Some(amount) => {
                env.storage()
                    .persistent()
                    .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
                amount
            }
            None => 0,
        }
    }

    fn store_total(env: &Env, token: &Address, amount: i128) {
        let key = (TOTAL_STAKED, token.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
