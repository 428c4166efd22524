use soroban_sdk::{symbol_short, Address, Env, Symbol};

const AL_ADDR: Symbol = symbol_short!("AL_ADR");
const AL_TTL_THRESHOLD: u32 = 5_184_000; // 5,184,000 ledgers ~= 300 days (@ ~5s/ledger)
const AL_TTL_EXTEND_TO: u32 = 10_368_000; // 10,368,000 ledgers ~= 600 days (@ ~5s/ledger)

fn allowlist_key(address: &Address) -> (Symbol, Address) {
    (AL_ADDR, address.clone())
}

fn extend_allowlist_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, AL_TTL_THRESHOLD, AL_TTL_EXTEND_TO);
}

/// Sets or clears the allow-list flag for `address`.
///
/// A cleared entry is removed rather than stored as `false`; readers treat
/// absence as "not allowed".
pub fn set_allowed(env: &Env, address: &Address, allowed: bool) {
    let key = allowlist_key(address);
    if allowed {
        env.storage().persistent().set(&key, &true);
        extend_allowlist_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

/// Returns whether `address` is on the allow-list.
pub fn is_allowed(env: &Env, address: &Address) -> bool {
    let key = allowlist_key(address);
    let allowed = env.storage().persistent().get(&key).unwrap_or(false);
    if allowed {
        extend_allowlist_ttl(env, &key);
    }
    allowed
}
