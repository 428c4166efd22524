//! # Survey System Testing Framework
//!
//! A reusable harness for exercising the staking ledger, survey manager and
//! voting engine together, with property-based generators, invariant
//! checking, action-sequence exploration and a Given/When/Then scenario
//! builder.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             - TestEnv, SurveySystem harness, snapshots
//! ├── generators.rs      - proptest strategies for amounts and action sequences
//! ├── invariants.rs      - state invariants & InvariantSet
//! ├── state_explorer.rs  - runs action sequences, checking invariants each step
//! └── scenario_dsl.rs    - declarative test scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{SurveySystem, TestEnv};
//!
//! let system = SurveySystem::new(TestEnv::new(), 100);
//! let alice = system.create_user(1_000, 1_000);
//! system.stake(&alice, 10);
//! let id = system.create_survey(&alice, 10, 7);
//! system.vote(&alice, id, true);
//! ```

extern crate std;


use common::Role;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};
use staking::{StakingContract, StakingContractClient};
use survey::{SurveyContract, SurveyContractClient};
use voting::{VotingContract, VotingContractClient};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with address generation, time control and token
/// helpers.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self { env }
    }

    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a Stellar Asset Contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }

    pub fn balance(&self, token: &Address, holder: &Address) -> i128 {
        TokenClient::new(&self.env, token).balance(holder)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Full System Harness ──────────────────────────────────────────────────────

/// The three contracts deployed and wired the way production deploys them:
/// the voting engine holds `VotingEngine` on the survey manager and one
/// stake token is on the allow-list.
pub struct SurveySystem {
    pub env: TestEnv,
    pub admin: Address,
    /// Allow-listed token surveys are gated on.
    pub stake_token: Address,
    pub native: Address,
    pub survey_cost: i128,
    pub staking: StakingContractClient<'static>,
    pub survey: SurveyContractClient<'static>,
    pub voting: VotingContractClient<'static>,
}

impl SurveySystem {
    /// Deploy and initialize all three contracts.
    pub fn new(env: TestEnv, survey_cost: i128) -> Self {
        let admin = env.generate_address();
        let stake_token = env.deploy_token();
        let native = env.deploy_token();

        let staking_id = env.env.register(StakingContract, ());
        let survey_id = env.env.register(SurveyContract, ());
        let voting_id = env.env.register(VotingContract, ());

        let staking = StakingContractClient::new(&env.env, &staking_id);
        let survey = SurveyContractClient::new(&env.env, &survey_id);
        let voting = VotingContractClient::new(&env.env, &voting_id);

        staking.initialize(&admin, &native);
        survey.initialize(&admin, &staking_id, &native, &survey_cost);
        voting.initialize(&admin, &staking_id, &survey_id, &native);
        survey.grant_role(&admin, &Role::VotingEngine, &voting_id);
        staking.set_token_allowed(&admin, &stake_token, &true);

        Self {
            env,
            admin,
            stake_token,
            native,
            survey_cost,
            staking,
            survey,
            voting,
        }
    }

    /// A fresh address holding `tokens` of the stake token and `native` of
    /// the native asset.
    pub fn create_user(&self, tokens: i128, native: i128) -> Address {
        let user = self.env.generate_address();
        if tokens > 0 {
            self.env.mint_tokens(&self.stake_token, &user, tokens);
        }
        if native > 0 {
            self.env.mint_tokens(&self.native, &user, native);
        }
        user
    }

    pub fn stake(&self, user: &Address, amount: i128) {
        self.staking.stake(user, &amount, &self.stake_token);
    }

    pub fn un_stake(&self, user: &Address, amount: i128) {
        self.staking.un_stake(user, &amount, &self.stake_token);
    }

    pub fn staked(&self, user: &Address) -> i128 {
        self.staking.get_staked_amount(user, &self.stake_token)
    }

    /// Open a survey on the stake token, paying the current cost.
    pub fn create_survey(&self, creator: &Address, minimum_stake: i128, days: u64) -> u64 {
        self.survey.create_survey(
            creator,
            &self.stake_token,
            &String::from_str(&self.env.env, "ipfs://survey"),
            &minimum_stake,
            &days,
            &self.survey.get_survey_cost(),
        )
    }

    pub fn vote(&self, voter: &Address, survey_id: u64, supports: bool) {
        self.voting.vote(voter, &survey_id, &supports);
    }

    /// `(yes_count, no_count)` of a survey; `(0, 0)` when it does not exist.
    pub fn tally(&self, survey_id: u64) -> (u32, u32) {
        self.survey
            .get_survey(&survey_id)
            .map(|s| (s.yes_count, s.no_count))
            .unwrap_or((0, 0))
    }

    /// Capture everything the invariants look at for `users`.
    pub fn snapshot(&self, users: &[Address]) -> SystemSnapshot {
        let user_stakes = users
            .iter()
            .map(|u| (u.clone(), self.staked(u)))
            .collect();

        let last_id = self.survey.next_survey_id().saturating_sub(1);
        let surveys = (1..=last_id)
            .map(|id| {
                let (yes, no) = self.tally(id);
                let voters = users
                    .iter()
                    .filter(|u| self.voting.has_voted(&id, u))
                    .count() as u32;
                SurveyTally { id, yes, no, voters }
            })
            .collect();

        SystemSnapshot {
            timestamp: self.env.timestamp(),
            total_staked: self.staking.get_total_staked(&self.stake_token),
            custody_balance: self
                .env
                .balance(&self.stake_token, &self.staking.address),
            user_stakes,
            surveys,
            survey_cost: self.survey.get_survey_cost(),
            fees_held: self.env.balance(&self.native, &self.survey.address),
        }
    }
}

/// Per-survey tally alongside the number of tracked users marked as voted.
#[derive(Debug, Clone)]
pub struct SurveyTally {
    pub id: u64,
    pub yes: u32,
    pub no: u32,
    pub voters: u32,
}

/// Immutable snapshot of the observable system state.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub timestamp: u64,
    pub total_staked: i128,
    /// Stake-token balance actually held by the ledger.
    pub custody_balance: i128,
    pub user_stakes: std::vec::Vec<(Address, i128)>,
    pub surveys: std::vec::Vec<SurveyTally>,
    pub survey_cost: i128,
    /// Native balance held by the survey manager.
    pub fees_held: i128,
}

impl SystemSnapshot {
    /// Sum of all tracked user stakes.
    pub fn sum_user_stakes(&self) -> i128 {
        self.user_stakes.iter().map(|(_, s)| s).sum()
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single action run by the explorer.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Ok,
    /// The contract rejected the action with this error code.
    ExpectedError(u32),
    /// The host aborted the call (auth, token transfer, nested panic).
    UnexpectedError(std::string::String),
}

/// Summary of an exploration run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
