//! Structured event publishing for the survey manager.

#![allow(deprecated)] // env.events().publish

use common::Survey;
use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, admin: &Address, staking: &Address, survey_cost: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (admin.clone(), staking.clone(), survey_cost),
    );
}

pub fn publish_survey_created(env: &Env, survey: &Survey) {
    env.events().publish(
        (symbol_short!("SRV_NEW"), survey.id),
        (
            survey.creator.clone(),
            survey.token.clone(),
            survey.minimum_stake,
            survey.deadline,
        ),
    );
}

pub fn publish_survey_cancelled(env: &Env, survey_id: u64, creator: &Address) {
    env.events()
        .publish((symbol_short!("SRV_CNCL"), survey_id), creator.clone());
}

pub fn publish_cost_updated(env: &Env, old_cost: i128, new_cost: i128) {
    env.events()
        .publish((symbol_short!("SRV_COST"),), (old_cost, new_cost));
}

pub fn publish_tally_updated(env: &Env, survey: &Survey, voter: &Address, supports: bool) {
    env.events().publish(
        (symbol_short!("TALLY"), survey.id),
        (voter.clone(), supports, survey.yes_count, survey.no_count),
    );
}
