//! Structured event publishing for the staking ledger.

#![allow(deprecated)] // env.events().publish

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, admin: &Address, native_asset: &Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (admin.clone(), native_asset.clone()),
    );
}

pub fn publish_token_allowed(env: &Env, token: &Address, allowed: bool) {
    env.events()
        .publish((symbol_short!("TOKEN_SET"), token.clone()), allowed);
}

pub fn publish_staked(env: &Env, staker: &Address, token: &Address, amount: i128, balance: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        (token.clone(), amount, balance),
    );
}

pub fn publish_unstaked(env: &Env, staker: &Address, token: &Address, amount: i128, balance: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        (token.clone(), amount, balance),
    );
}
