use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::rewards::Accumulator;
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const GOVERNANCE: Symbol = symbol_short!("GOV");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_PER_BLOCK: Symbol = symbol_short!("RWD_PBLK");
const PERIOD_END: Symbol = symbol_short!("PER_END");
const ACCUMULATOR: Symbol = symbol_short!("ACC");

// Per-staker persistent storage uses tuple keys: (prefix, staker_address)
const STAKER: Symbol = symbol_short!("STAKER");

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
const TTL_THRESHOLD: u32 = TTL_EXTEND_TO - DAY_IN_LEDGERS;

/// A participant's position. Created on first stake and never removed;
/// a full withdrawal leaves the record zeroed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakerInfo {
    pub amount: i128,
    /// `amount * acc_reward_per_share / PRECISION` at the last settlement,
    /// less any reward carried over from earlier deposits.
    pub reward_debt: i128,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

// ── Identities ───────────────────────────────────────────────────────────────

pub fn get_governance(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&GOVERNANCE)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_governance(env: &Env, governance: &Address) {
    env.storage().instance().set(&GOVERNANCE, governance);
}

pub fn get_stake_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&STAKE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_stake_token(env: &Env, token: &Address) {
    env.storage().instance().set(&STAKE_TOKEN, token);
}

pub fn get_reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, token);
}

// ── Pool state ───────────────────────────────────────────────────────────────

pub fn get_total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub fn get_reward_per_block(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0)
}

pub fn set_reward_per_block(env: &Env, rate: i128) {
    env.storage().instance().set(&REWARD_PER_BLOCK, &rate);
}

pub fn get_period_end(env: &Env) -> u32 {
    env.storage().instance().get(&PERIOD_END).unwrap_or(0)
}

pub fn set_period_end(env: &Env, block: u32) {
    env.storage().instance().set(&PERIOD_END, &block);
}

pub fn get_accumulator(env: &Env) -> Accumulator {
    env.storage()
        .instance()
        .get(&ACCUMULATOR)
        .unwrap_or_default()
}

pub fn set_accumulator(env: &Env, acc: &Accumulator) {
    env.storage().instance().set(&ACCUMULATOR, acc);
}

// ── Stakers ──────────────────────────────────────────────────────────────────

fn staker_key(staker: &Address) -> (Symbol, Address) {
    (STAKER, staker.clone())
}

pub fn get_staker(env: &Env, staker: &Address) -> Option<StakerInfo> {
    let key = staker_key(staker);
    let info: Option<StakerInfo> = env.storage().persistent().get(&key);
    if info.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    info
}

pub fn set_staker(env: &Env, staker: &Address, info: &StakerInfo) {
    let key = staker_key(staker);
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
