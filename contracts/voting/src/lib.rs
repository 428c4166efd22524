#![no_std]

//! # Voting tally engine
//!
//! Lets a staker cast one yes/no vote per survey. Eligibility is the
//! voter's live staked balance on the staking ledger in the survey's token,
//! compared against the survey's minimum stake. Accepted votes are
//! forwarded to the survey manager, which only accepts tallies from the
//! holder of [`Role::VotingEngine`]; this contract's own address must be
//! granted that role there.
//!
//! The ledger and the manager are reached through generated clients, so
//! this crate builds and deploys without linking either of them.

pub mod events;

use common::{
    access::{self, Role},
    funds, upgrade, CommonError, SchemaVersion, Survey,
};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, Symbol};

// ── Cross-contract interfaces ────────────────────────────────────────────────

#[soroban_sdk::contractclient(name = "StakingClient")]
#[allow(dead_code)]
trait StakingInterface {
    fn get_staked_amount(env: Env, holder: Address, token: Address) -> i128;
}

#[soroban_sdk::contractclient(name = "SurveyClient")]
#[allow(dead_code)]
trait SurveyInterface {
    fn get_survey(env: Env, survey_id: u64) -> Option<Survey>;
    fn after_vote(env: Env, caller: Address, survey_id: u64, voter: Address, supports: bool);
}

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");
const STAKING: Symbol = symbol_short!("STAKING");
const SURVEY: Symbol = symbol_short!("SURVEY");
const VOTED: Symbol = symbol_short!("VOTED");

// TTL: bump below ~60 days, up to ~120 days (5s/ledger)
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

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
    SurveyNotFound = 100,
    /// Live stake in the survey's token is below its minimum.
    InsufficientStake = 101,
    AlreadyVoted = 102,
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
pub struct VotingContract;

#[contractimpl]
impl VotingContract {
    /// Bootstrap the engine.
    ///
    /// * `admin`        – receives [`Role::Admin`].
    /// * `staking`      – staking ledger consulted for eligibility.
    /// * `survey`       – survey manager receiving tallies.
    /// * `native_asset` – SAC address swept by `withdraw`.
    pub fn initialize(
        env: Env,
        admin: Address,
        staking: Address,
        survey: Address,
        native_asset: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&STAKING, &staking);
        env.storage().instance().set(&SURVEY, &survey);
        env.storage().instance().set(&NATIVE_ASSET, &native_asset);
        env.storage().instance().set(&INITIALIZED, &true);
        upgrade::set_stored_version(&env, SCHEMA_VERSION);
        access::grant_role(&env, &Role::Admin, &admin, &admin);

        events::publish_initialized(&env, &admin, &staking, &survey);

        Ok(())
    }

    // ── Voting ──────────────────────────────────────────────────────────────

    /// Cast `voter`'s vote on `survey_id`.
    ///
    /// Deadline and cancellation are not consulted. If the survey manager
    /// rejects the tally the whole vote is rolled back.
    pub fn vote(env: Env, voter: Address, survey_id: u64, supports: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let survey_manager = SurveyClient::new(&env, &Self::survey_address(&env)?);
        let survey = survey_manager
            .get_survey(&survey_id)
            .ok_or(ContractError::SurveyNotFound)?;

        let staking = StakingClient::new(&env, &Self::staking_address(&env)?);
        if staking.get_staked_amount(&voter, &survey.token) < survey.minimum_stake {
            return Err(ContractError::InsufficientStake);
        }

        let key = (VOTED, survey_id, voter.clone());
        if env.storage().persistent().has(&key) {
            return Err(ContractError::AlreadyVoted);
        }
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        survey_manager.after_vote(&env.current_contract_address(), &survey_id, &voter, &supports);

        events::publish_voted(&env, survey_id, &voter, supports);

        Ok(())
    }

    pub fn has_voted(env: Env, survey_id: u64, voter: Address) -> bool {
        let key = (VOTED, survey_id, voter);
        let voted = env.storage().persistent().has(&key);
        if voted {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        voted
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_staking(env: Env) -> Result<Address, ContractError> {
        Self::staking_address(&env)
    }

    pub fn get_survey_manager(env: Env) -> Result<Address, ContractError> {
        Self::survey_address(&env)
    }

    pub fn native_balance(env: Env) -> Result<i128, ContractError> {
        let native = Self::native_asset(&env)?;
        Ok(funds::contract_balance(&env, &native))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Sweep any native balance sent to the engine to `caller`.
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

    /// Swap the engine's logic; vote records survive.
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

    fn staking_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKING)
            .ok_or(ContractError::NotInitialized)
    }

    fn survey_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&SURVEY)
            .ok_or(ContractError::NotInitialized)
    }

    fn native_asset(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NATIVE_ASSET)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
