//! Structured event publishing for the voting engine.

#![allow(deprecated)] // env.events().publish

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, admin: &Address, staking: &Address, survey: &Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (admin.clone(), staking.clone(), survey.clone()),
    );
}

pub fn publish_voted(env: &Env, survey_id: u64, voter: &Address, supports: bool) {
    env.events()
        .publish((symbol_short!("VOTED"), survey_id), (voter.clone(), supports));
}
