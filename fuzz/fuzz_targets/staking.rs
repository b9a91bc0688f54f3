#![no_main]

use a51_staking::{StakingContract, StakingContractClient};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u64 },
    Unstake { user: u8, amount: u64 },
    Claim { user: u8 },
    EmergencyUnstake { user: u8 },
    UpdateRewards { total: u64, duration: u16 },
    Advance { blocks: u8 },
}

const USERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let governance = Address::generate(&env);
    let stake_token = env.register_stellar_asset_contract_v2(governance.clone());
    let reward_token = env.register_stellar_asset_contract_v2(governance.clone());

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    client.initialize(&governance, &reward_token.address(), &stake_token.address());

    StellarAssetClient::new(&env, &reward_token.address()).mint(&contract_id, &i128::from(i64::MAX));

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &stake_token.address()).mint(user, &i128::from(i64::MAX));
    }

    let mut block = 1u32;

    // Errors are expected; panics and broken invariants are not.
    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let user = &users[user as usize % USERS];
                let _ = client.try_stake(user, user, &(amount as i128));
            }
            FuzzAction::Unstake { user, amount } => {
                let _ = client.try_unstake(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Claim { user } => {
                let _ = client.try_claim(&users[user as usize % USERS]);
            }
            FuzzAction::EmergencyUnstake { user } => {
                let _ = client.try_emergency_unstake(&users[user as usize % USERS]);
            }
            FuzzAction::UpdateRewards { total, duration } => {
                let _ = client.try_update_rewards(&governance, &(total as i128), &u32::from(duration));
            }
            FuzzAction::Advance { blocks } => {
                block = block.saturating_add(u32::from(blocks));
                env.ledger().set_sequence_number(block);
            }
        }

        let sum: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(client.total_staked(), sum);
    }
});
