#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub governance: Address,
    pub reward_token: Address,
    pub stake_token: Address,
    pub block: u32,
}

/// Fired when stake is deposited for a beneficiary.
///
/// `pending_reward` is what the beneficiary had accrued just before the
/// deposit, in the current reward token's units. It stays claimable.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub staker: Address,
    pub amount: i128,
    pub pending_reward: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub staker: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired by both `unstake` and `emergency_unstake`. Emergency exits always
/// carry a zero reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeEvent {
    pub staker: Address,
    pub amount: i128,
    pub reward: i128,
    pub is_emergency: bool,
    pub block: u32,
}

/// Fired when governance opens a new distribution window.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsUpdatedEvent {
    pub total_reward: i128,
    pub duration: u32,
    pub reward_per_block: i128,
    pub period_end: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTokenUpdatedEvent {
    pub old_token: Address,
    pub new_token: Address,
    pub block: u32,
}

/// Fired once per token swept by `migrate_funds`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsMigratedEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    governance: Address,
    reward_token: Address,
    stake_token: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            governance,
            reward_token,
            stake_token,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stake(env: &Env, staker: Address, amount: i128, pending_reward: i128) {
    env.events().publish(
        (symbol_short!("STAKE"), staker.clone()),
        StakeEvent {
            staker,
            amount,
            pending_reward,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_claim(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), staker.clone()),
        ClaimEvent {
            staker,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstake(env: &Env, staker: Address, amount: i128, reward: i128, is_emergency: bool) {
    env.events().publish(
        (symbol_short!("UNSTAKE"), staker.clone()),
        UnstakeEvent {
            staker,
            amount,
            reward,
            is_emergency,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_updated(
    env: &Env,
    total_reward: i128,
    duration: u32,
    reward_per_block: i128,
    period_end: u32,
) {
    env.events().publish(
        (symbol_short!("RWD_UPD"),),
        RewardsUpdatedEvent {
            total_reward,
            duration,
            reward_per_block,
            period_end,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_token_updated(env: &Env, old_token: Address, new_token: Address) {
    env.events().publish(
        (symbol_short!("RWD_TOK"),),
        RewardTokenUpdatedEvent {
            old_token,
            new_token,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_funds_migrated(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("MIGRATE"), token.clone()),
        FundsMigratedEvent {
            token,
            to,
            amount,
            block: env.ledger().sequence(),
        },
    );
}
