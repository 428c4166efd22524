#![no_std]

//! # Survey lifecycle manager
//!
//! Creates fee-gated yes/no surveys, lets their creators cancel them, and
//! keeps the yes/no tally. Tallies only move through [`SurveyContract::after_vote`],
//! which is reserved for the holder of [`Role::VotingEngine`]; the voting
//! engine checks stake eligibility and uniqueness before calling it.
//!
//! Creation fees are paid in the native asset and accumulate on this
//! contract until an admin sweeps them with `withdraw`.

pub mod events;
mod survey;

use common::{
    access::{self, Role},
    funds, upgrade, CommonError, SchemaVersion, Survey,
};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, String, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");
const STAKING: Symbol = symbol_short!("STAKING");
const SURVEY_COST: Symbol = symbol_short!("SRV_COST");

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
    /// The payment does not equal the current survey cost.
    IncorrectSurveyCost = 100,
    NotOwner = 101,
    SurveyNotFound = 102,
    /// A yes or no counter is already at its maximum.
    TallyOverflow = 103,
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
pub struct SurveyContract;

#[contractimpl]
impl SurveyContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the manager.
    ///
    /// * `admin`        – receives [`Role::Admin`].
    /// * `staking`      – address of the staking ledger surveys are gated on.
    /// * `native_asset` – SAC address of the asset fees are paid in.
    /// * `survey_cost`  – exact fee for `create_survey`; zero makes creation free.
    pub fn initialize(
        env: Env,
        admin: Address,
        staking: Address,
        native_asset: Address,
        survey_cost: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if survey_cost < 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&STAKING, &staking);
        env.storage().instance().set(&NATIVE_ASSET, &native_asset);
        env.storage().instance().set(&SURVEY_COST, &survey_cost);
        env.storage().instance().set(&INITIALIZED, &true);
        upgrade::set_stored_version(&env, SCHEMA_VERSION);
        access::grant_role(&env, &Role::Admin, &admin, &admin);

        events::publish_initialized(&env, &admin, &staking, survey_cost);

        Ok(())
    }

    // ── Survey lifecycle ────────────────────────────────────────────────────

    /// Open a new survey and return its id.
    ///
    /// `payment` must equal the current survey cost exactly; it is pulled
    /// from `creator` in the native asset. Nothing is allocated when any
    /// check fails.
    pub fn create_survey(
        env: Env,
        creator: Address,
        token: Address,
        description_uri: String,
        minimum_stake: i128,
        duration_in_days: u64,
        payment: i128,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        creator.require_auth();

        if payment != Self::survey_cost(&env) {
            return Err(ContractError::IncorrectSurveyCost);
        }
        if minimum_stake < 0 || duration_in_days == 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let deadline =
            survey::deadline_after(now, duration_in_days).ok_or(ContractError::InvalidInput)?;

        let native = Self::native_asset(&env)?;
        funds::collect(&env, &native, &creator, payment);

        let record = Survey {
            id: survey::next_id(&env),
            creator,
            token,
            description_uri,
            minimum_stake,
            created_at: now,
            deadline,
            yes_count: 0,
            no_count: 0,
            cancelled: false,
        };
        survey::store(&env, &record);

        events::publish_survey_created(&env, &record);

        Ok(record.id)
    }

    /// Mark a survey as cancelled. Only its creator may do so; cancelling
    /// twice leaves it cancelled.
    pub fn cancel_survey(env: Env, caller: Address, survey_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut record = survey::load(&env, survey_id).ok_or(ContractError::SurveyNotFound)?;
        if record.creator != caller {
            return Err(ContractError::NotOwner);
        }

        record.cancelled = true;
        survey::store(&env, &record);

        events::publish_survey_cancelled(&env, survey_id, &record.creator);

        Ok(())
    }

    /// Record one vote on `survey_id`.
    ///
    /// Eligibility and uniqueness are the caller's responsibility; only the
    /// role is checked here.
    pub fn after_vote(
        env: Env,
        caller: Address,
        survey_id: u64,
        voter: Address,
        supports: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::VotingEngine, &caller)?;

        let mut record = survey::load(&env, survey_id).ok_or(ContractError::SurveyNotFound)?;
        let counter = if supports {
            &mut record.yes_count
        } else {
            &mut record.no_count
        };
        *counter = counter.checked_add(1).ok_or(ContractError::TallyOverflow)?;
        survey::store(&env, &record);

        events::publish_tally_updated(&env, &record, &voter, supports);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_survey(env: Env, survey_id: u64) -> Option<Survey> {
        survey::load(&env, survey_id)
    }

    pub fn get_survey_cost(env: Env) -> i128 {
        Self::survey_cost(&env)
    }

    /// Id the next created survey will receive.
    pub fn next_survey_id(env: Env) -> u64 {
        survey::peek_next_id(&env)
    }

    pub fn get_staking(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKING)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn native_balance(env: Env) -> Result<i128, ContractError> {
        let native = Self::native_asset(&env)?;
        Ok(funds::contract_balance(&env, &native))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Change the fee charged for future surveys.
    pub fn update_survey_cost(env: Env, caller: Address, new_cost: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;

        if new_cost < 0 {
            return Err(ContractError::InvalidInput);
        }

        let old_cost = Self::survey_cost(&env);
        env.storage().instance().set(&SURVEY_COST, &new_cost);

        events::publish_cost_updated(&env, old_cost, new_cost);

        Ok(())
    }

    /// Sweep accumulated creation fees to `caller`.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        access::authorize(&env, &Role::Admin, &caller)?;

        let native = Self::native_asset(&env)?;
        Ok(funds::sweep(&env, &native, &caller, 0))
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

    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        access::revoke_role(&env, &role, &account, &account);
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access::has_role(&env, &role, &account)
    }

    /// Swap the manager's logic; surveys, tallies and the id counter survive.
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

    fn survey_cost(env: &Env) -> i128 {
        env.storage().instance().get(&SURVEY_COST).unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
