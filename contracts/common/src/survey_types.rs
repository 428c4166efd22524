use soroban_sdk::{contracttype, Address, String};

/// A fee-gated yes/no survey.
///
/// Owned by the survey manager; the voting engine reads it through a
/// cross-contract client, so both sides share this definition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Survey {
    pub id: u64,
    pub creator: Address,
    /// Token whose staked balance gates voting.
    pub token: Address,
    /// Opaque reference to the survey text (URI, hash, ...).
    pub description_uri: String,
    /// Smallest live stake in `token` that allows a vote.
    pub minimum_stake: i128,
    pub created_at: u64,
    pub deadline: u64,
    pub yes_count: u32,
    pub no_count: u32,
    pub cancelled: bool,
}
