//! Survey storage: id allocation and record persistence.

use common::Survey;
use soroban_sdk::{symbol_short, Env, Symbol};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const SURVEY_CTR: Symbol = symbol_short!("SRV_CTR");
pub(crate) const SURVEY: Symbol = symbol_short!("SRV");

// TTL: bump below ~60 days, up to ~120 days (5s/ledger)
pub(crate) const TTL_THRESHOLD: u32 = 1_036_800;
pub(crate) const TTL_EXTEND_TO: u32 = 2_073_600;

pub(crate) const SECONDS_PER_DAY: u64 = 86_400;

// ── Storage helpers ──────────────────────────────────────────────────────────

/// Id the next successful `create_survey` will receive. Ids start at 1.
pub(crate) fn peek_next_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get::<_, u64>(&SURVEY_CTR)
        .unwrap_or(0u64)
        .saturating_add(1)
}

/// Consumes and returns the next id. Call only once a creation can no
/// longer fail.
pub(crate) fn next_id(env: &Env) -> u64 {
    let id = peek_next_id(env);
    env.storage().instance().set(&SURVEY_CTR, &id);
    id
}

pub(crate) fn survey_key(id: u64) -> (Symbol, u64) {
    (SURVEY, id)
}

pub(crate) fn store(env: &Env, survey: &Survey) {
    let key = survey_key(survey.id);
    env.storage().persistent().set(&key, survey);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<Survey> {
    let key = survey_key(id);
    let record = env.storage().persistent().get(&key);
    if record.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    record
}

/// `now + days`, or `None` when the deadline does not fit in a timestamp.
pub(crate) fn deadline_after(now: u64, duration_in_days: u64) -> Option<u64> {
    duration_in_days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|secs| now.checked_add(secs))
}
