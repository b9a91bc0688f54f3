//! Fixed-point reward accounting.
//!
//! All accrual happens in a single 18-decimal unit of account. The pool-wide
//! accumulator stores cumulative reward per staked unit scaled by
//! [`PRECISION`]; a staker's entitlement is `amount * acc / PRECISION` minus
//! their reward debt. Conversion to a concrete reward token only happens at
//! the payout boundary through [`to_token_units`].

use soroban_sdk::{contracttype, Env, I256};

use crate::ContractError;

/// Fixed-point scale applied to `acc_reward_per_share`.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Decimal count of the internal unit of account. Reward rates are always
/// expressed in this unit, whatever the reward token's own decimals are.
pub const REWARD_UNIT_DECIMALS: u32 = 18;

/// Lazily-updated pool accumulator.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accumulator {
    pub acc_reward_per_share: i128,
    pub last_reward_block: u32,
}

/// `a * b / denominator` with a 256-bit intermediate, rounded toward zero.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    if denominator == 0 {
        return Err(ContractError::MathOverflow);
    }
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(ContractError::MathOverflow)
}

/// Bring the accumulator forward to `current_block`.
///
/// Accrual covers `(last_reward_block, min(current_block, period_end)]`, so
/// the block equal to `period_end` still earns and nothing after it does.
/// With nothing staked the window is skipped rather than credited later.
pub fn accrue(
    env: &Env,
    acc: Accumulator,
    current_block: u32,
    period_end: u32,
    reward_per_block: i128,
    total_staked: i128,
) -> Result<Accumulator, ContractError> {
    let end = current_block.min(period_end);
    if end <= acc.last_reward_block {
        return Ok(acc);
    }

    if total_staked <= 0 {
        return Ok(Accumulator {
            last_reward_block: end,
            ..acc
        });
    }

    let blocks = i128::from(end - acc.last_reward_block);
    let emitted = blocks
        .checked_mul(reward_per_block)
        .ok_or(ContractError::MathOverflow)?;
    let delta = mul_div(env, emitted, PRECISION, total_staked)?;

    Ok(Accumulator {
        acc_reward_per_share: acc
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(ContractError::MathOverflow)?,
        last_reward_block: end,
    })
}

/// Gross entitlement of `amount` staked units at accumulator value `acc`.
pub fn accumulated(env: &Env, amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    mul_div(env, amount, acc_reward_per_share, PRECISION)
}

/// Unsettled reward in the unit of account.
pub fn pending(
    env: &Env,
    amount: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    let gross = accumulated(env, amount, acc_reward_per_share)?;
    Ok(gross.saturating_sub(reward_debt).max(0))
}

/// Rescale a unit-of-account amount to a token with `decimals` decimals.
/// Always rounds down.
pub fn to_token_units(amount: i128, decimals: u32) -> Result<i128, ContractError> {
    use core::cmp::Ordering;

    match decimals.cmp(&REWARD_UNIT_DECIMALS) {
        Ordering::Equal => Ok(amount),
        Ordering::Less => Ok(amount / pow10(REWARD_UNIT_DECIMALS - decimals)?),
        Ordering::Greater => amount
            .checked_mul(pow10(decimals - REWARD_UNIT_DECIMALS)?)
            .ok_or(ContractError::MathOverflow),
    }
}

/// Inverse of [`to_token_units`]. Exact for amounts produced by it.
pub fn from_token_units(amount: i128, decimals: u32) -> Result<i128, ContractError> {
    use core::cmp::Ordering;

    match decimals.cmp(&REWARD_UNIT_DECIMALS) {
        Ordering::Equal => Ok(amount),
        Ordering::Less => amount
            .checked_mul(pow10(REWARD_UNIT_DECIMALS - decimals)?)
            .ok_or(ContractError::MathOverflow),
        Ordering::Greater => Ok(amount / pow10(decimals - REWARD_UNIT_DECIMALS)?),
    }
}

/// Part of `owed` (unit of account) that a payout of `paid` token units
/// left behind through rounding.
pub fn unpaid_remainder(owed: i128, paid: i128, decimals: u32) -> Result<i128, ContractError> {
    Ok(owed - from_token_units(paid, decimals)?)
}

fn pow10(exp: u32) -> Result<i128, ContractError> {
    10i128.checked_pow(exp).ok_or(ContractError::MathOverflow)
}
