#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, token, Address, Env};
use staking::{StakingContract, StakingContractClient};

/// Ledger entry points, with amounts kept small enough that funded users
/// can usually afford them.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { token: u8, amount: u32 },
    UnStake { token: u8, amount: u32 },
    /// Signed so the fuzzer also probes zero and negative amounts.
    RawStake { token: u8, amount: i64 },
    SetAllowed { token: u8, allowed: bool },
    Withdraw,
}

const TOKENS: usize = 3;
const USERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let tokens: Vec<Address> = (0..TOKENS)
        .map(|_| {
            env.register_stellar_asset_contract_v2(Address::generate(&env))
                .address()
        })
        .collect();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    if client.try_initialize(&admin, &native).is_err() {
        return;
    }
    for t in &tokens {
        client.set_token_allowed(&admin, t, &true);
    }

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for u in &users {
        for t in &tokens {
            token::StellarAssetClient::new(&env, t).mint(u, &1_000_000_000i128);
        }
    }

    // Shadow ledger of what each (user, token) should hold.
    let mut expected = [[0i128; TOKENS]; USERS];

    for (i, action) in actions.into_iter().enumerate() {
        let u = i % USERS;
        let caller = &users[u];
        match action {
            FuzzAction::Stake { token, amount } => {
                let t = token as usize % TOKENS;
                let amt = amount as i128;
                if client.try_stake(caller, &amt, &tokens[t]).is_ok() {
                    expected[u][t] += amt;
                }
            }
            FuzzAction::UnStake { token, amount } => {
                let t = token as usize % TOKENS;
                let amt = amount as i128;
                let ok = client.try_un_stake(caller, &amt, &tokens[t]).is_ok();
                assert_eq!(
                    ok,
                    amt > 0 && amt <= expected[u][t],
                    "un_stake acceptance diverged from the shadow ledger"
                );
                if ok {
                    expected[u][t] -= amt;
                }
            }
            FuzzAction::RawStake { token, amount } => {
                let t = token as usize % TOKENS;
                let amt = amount as i128;
                let ok = client.try_stake(caller, &amt, &tokens[t]).is_ok();
                if amt <= 0 {
                    assert!(!ok, "INVARIANT VIOLATION: non-positive stake accepted");
                }
                if ok {
                    expected[u][t] += amt;
                }
            }
            FuzzAction::SetAllowed { token, allowed } => {
                let t = token as usize % TOKENS;
                client.set_token_allowed(&admin, &tokens[t], &allowed);
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(&admin);
            }
        }

        // ── Post-action invariant checks ──
        for (t, tok) in tokens.iter().enumerate() {
            let mut owed = 0i128;
            for (u, user) in users.iter().enumerate() {
                let staked = client.get_staked_amount(user, tok);
                assert!(staked >= 0, "INVARIANT VIOLATION: user stake negative");
                assert_eq!(staked, expected[u][t], "INVARIANT VIOLATION: stake drifted");
                owed += staked;
            }
            assert_eq!(client.get_total_staked(tok), owed, "INVARIANT VIOLATION: total drifted");
            let held = token::Client::new(&env, tok).balance(&contract_id);
            assert!(owed <= held, "INVARIANT VIOLATION: custody below stakes");
        }
    }
});
