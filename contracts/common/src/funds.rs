//! Native-asset accounting for fee collection and admin sweeps.
//!
//! Every contract is configured with the address of the native asset's
//! Stellar Asset Contract. Fees are pulled in with [`collect`]; stray or
//! accumulated balances leave through [`sweep`].

#![allow(deprecated)] // env.events().publish

use soroban_sdk::{symbol_short, token, Address, Env};

/// Balance of `asset` held by the current contract.
pub fn contract_balance(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

/// Pulls `amount` of `asset` from `payer` into the current contract.
///
/// A zero amount is a no-op. Transfer failures abort the invocation.
pub fn collect(env: &Env, asset: &Address, payer: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    token::Client::new(env, asset).transfer(payer, &env.current_contract_address(), &amount);
}

/// Transfers the contract's `asset` balance, minus `reserved`, to `to`.
///
/// Returns the amount sent and emits `("WITHDRAWN", to) → amount`.
pub fn sweep(env: &Env, asset: &Address, to: &Address, reserved: i128) -> i128 {
    let balance = contract_balance(env, asset);
    let amount = balance.saturating_sub(reserved).max(0);
    if amount > 0 {
        token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
    }
    env.events()
        .publish((symbol_short!("WITHDRAWN"), to.clone()), amount);
    amount
}
