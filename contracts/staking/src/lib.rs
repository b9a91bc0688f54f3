#![no_std]

pub mod events;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};

use rewards::Accumulator;
pub use storage::StakerInfo;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    AmountLessThanStakedAmountOrZero = 5,
    NoStakeFound = 6,
    InsufficientFunds = 7,
    TokensIdentical = 8,
    InvalidDuration = 9,
    LengthMismatch = 10,
    StakeTokenLocked = 11,
    MathOverflow = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `governance`   – identity allowed to change rewards and sweep funds.
    /// * `reward_token` – token rewards are paid in; replaceable later.
    /// * `stake_token`  – token users stake; fixed for the ledger's lifetime.
    ///
    /// No rewards accrue until governance calls `update_rewards`.
    pub fn initialize(
        env: Env,
        governance: Address,
        reward_token: Address,
        stake_token: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_token == stake_token {
            return Err(ContractError::TokensIdentical);
        }

        storage::set_governance(&env, &governance);
        storage::set_reward_token(&env, &reward_token);
        storage::set_stake_token(&env, &stake_token);
        storage::set_accumulator(
            &env,
            &Accumulator {
                acc_reward_per_share: 0,
                last_reward_block: env.ledger().sequence(),
            },
        );
        storage::set_initialized(&env);
        storage::extend_instance_ttl(&env);

        events::publish_initialized(&env, governance, reward_token, stake_token);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens paid by `from` and credited to
    /// `beneficiary`.
    ///
    /// Reward already pending for the beneficiary is not paid out; it stays
    /// claimable and is reported in the stake event.
    pub fn stake(
        env: Env,
        from: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Flush the accumulator before the total changes.
        let acc = Self::settle(&env)?;

        // 2. Carry the existing entitlement forward through the debt.
        let mut info = storage::get_staker(&env, &beneficiary).unwrap_or_default();
        let pending = rewards::pending(&env, info.amount, acc.acc_reward_per_share, info.reward_debt)?;
        let added_debt = rewards::accumulated(&env, amount, acc.acc_reward_per_share)?;

        info.amount = info
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        info.reward_debt = info
            .reward_debt
            .checked_add(added_debt)
            .ok_or(ContractError::MathOverflow)?;
        let new_total = storage::get_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        let reward_client = Self::reward_client(&env)?;
        let pending_payout = rewards::to_token_units(pending, reward_client.decimals())?;

        // 3. Pull tokens from the payer into the ledger.
        let stake_token = storage::get_stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        // 4. Record the new position.
        storage::set_staker(&env, &beneficiary, &info);
        storage::set_total_staked(&env, new_total);
        storage::extend_instance_ttl(&env);

        events::publish_stake(&env, beneficiary, amount, pending_payout);

        Ok(())
    }

    /// Withdraw `amount` stake tokens together with all pending reward.
    ///
    /// Fails with `InsufficientFunds` rather than skipping the reward when
    /// the ledger cannot cover it; `emergency_unstake` is the way out then.
    /// Returns the reward paid, in reward-token units.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut info = storage::get_staker(&env, &staker).unwrap_or_default();
        if amount <= 0 || amount > info.amount {
            return Err(ContractError::AmountLessThanStakedAmountOrZero);
        }

        let acc = Self::settle(&env)?;
        let owed = rewards::pending(&env, info.amount, acc.acc_reward_per_share, info.reward_debt)?;

        let reward_client = Self::reward_client(&env)?;
        let decimals = reward_client.decimals();
        let payout = rewards::to_token_units(owed, decimals)?;
        Self::require_reward_liquidity(&env, &reward_client, payout)?;

        // Sub-unit dust the payout rounded away stays owed.
        let dust = rewards::unpaid_remainder(owed, payout, decimals)?;
        info.amount -= amount;
        info.reward_debt =
            rewards::accumulated(&env, info.amount, acc.acc_reward_per_share)? - dust;
        let new_total = storage::get_total_staked(&env) - amount;

        storage::set_staker(&env, &staker, &info);
        storage::set_total_staked(&env, new_total);
        storage::extend_instance_ttl(&env);

        let this = env.current_contract_address();
        let stake_token = storage::get_stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(&this, &staker, &amount);
        if payout > 0 {
            reward_client.transfer(&this, &staker, &payout);
        }

        events::publish_unstake(&env, staker, amount, payout, false);

        Ok(payout)
    }

    /// Withdraw the whole stake and forfeit all pending reward.
    ///
    /// Never touches the reward token, so it works even when the ledger
    /// holds no reward funds. Forfeited reward stays in the ledger and can
    /// only be recovered by governance through `migrate_funds`.
    /// Returns the principal returned.
    pub fn emergency_unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let info = storage::get_staker(&env, &staker).unwrap_or_default();
        if info.amount <= 0 {
            return Err(ContractError::NoStakeFound);
        }

        // The remaining stakers' share of the elapsed window must be booked
        // at the old total. An overflowing accumulator must not lock funds.
        if let Err(err) = Self::settle(&env) {
            log!(&env, "emergency unstake skipped settlement", err as u32);
        }

        let amount = info.amount;
        let new_total = storage::get_total_staked(&env) - amount;

        storage::set_staker(&env, &staker, &StakerInfo::default());
        storage::set_total_staked(&env, new_total);
        storage::extend_instance_ttl(&env);

        let stake_token = storage::get_stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_unstake(&env, staker, amount, 0, true);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has accrued, in the current reward token.
    ///
    /// Returns the amount paid. A staker with nothing pending gets a zero
    /// claim rather than an error. Reward too small to pay in the token's
    /// decimals is carried to the next claim.
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut info = storage::get_staker(&env, &staker).ok_or(ContractError::NoStakeFound)?;

        let acc = Self::settle(&env)?;
        let owed = rewards::pending(&env, info.amount, acc.acc_reward_per_share, info.reward_debt)?;

        let reward_client = Self::reward_client(&env)?;
        let decimals = reward_client.decimals();
        let payout = rewards::to_token_units(owed, decimals)?;
        Self::require_reward_liquidity(&env, &reward_client, payout)?;

        let dust = rewards::unpaid_remainder(owed, payout, decimals)?;
        info.reward_debt =
            rewards::accumulated(&env, info.amount, acc.acc_reward_per_share)? - dust;
        storage::set_staker(&env, &staker, &info);
        storage::extend_instance_ttl(&env);

        if payout > 0 {
            reward_client.transfer(&env.current_contract_address(), &staker, &payout);
        }

        events::publish_claim(&env, staker, payout);

        Ok(payout)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `staker` could claim right now, in the current reward token's
    /// units. Simulates settlement without writing it.
    pub fn calculate_pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        if !storage::is_initialized(&env) {
            return Ok(0);
        }
        let Some(info) = storage::get_staker(&env, &staker) else {
            return Ok(0);
        };

        let acc = Self::accrued(&env)?;
        let owed = rewards::pending(&env, info.amount, acc.acc_reward_per_share, info.reward_debt)?;
        rewards::to_token_units(owed, Self::reward_client(&env)?.decimals())
    }

    /// Raw position for `staker`; `None` if they never staked.
    pub fn get_staker_info(env: Env, staker: Address) -> Option<StakerInfo> {
        storage::get_staker(&env, &staker)
    }

    pub fn get_staked(env: Env, staker: Address) -> i128 {
        storage::get_staker(&env, &staker)
            .map(|info| info.amount)
            .unwrap_or(0)
    }

    /// Sum of all stakers' current amounts.
    pub fn total_staked(env: Env) -> i128 {
        storage::get_total_staked(&env)
    }

    /// Pool-wide emission per block, in the 18-decimal unit of account.
    pub fn current_reward_per_block(env: Env) -> i128 {
        storage::get_reward_per_block(&env)
    }

    pub fn period_end_block(env: Env) -> u32 {
        storage::get_period_end(&env)
    }

    pub fn last_reward_block(env: Env) -> u32 {
        storage::get_accumulator(&env).last_reward_block
    }

    pub fn acc_reward_per_share(env: Env) -> i128 {
        storage::get_accumulator(&env).acc_reward_per_share
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        storage::get_reward_token(&env)
    }

    pub fn stake_token(env: Env) -> Result<Address, ContractError> {
        storage::get_stake_token(&env)
    }

    pub fn governance(env: Env) -> Result<Address, ContractError> {
        storage::get_governance(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Governance ───────────────────────────────────────────────────────────

    /// Start a new distribution window of `duration_in_blocks` blocks
    /// emitting `total_reward` in total.
    ///
    /// `total_reward` is always given in the 18-decimal unit of account,
    /// regardless of the reward token's decimals. Rewards accrued under the
    /// previous window are settled first and remain claimable. Blocks between
    /// an expired window and this call never accrue.
    pub fn update_rewards(
        env: Env,
        caller: Address,
        total_reward: i128,
        duration_in_blocks: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governance(&env, &caller)?;

        if total_reward < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if duration_in_blocks == 0 {
            return Err(ContractError::InvalidDuration);
        }

        let mut acc = Self::settle(&env)?;

        let now = env.ledger().sequence();
        let reward_per_block = total_reward / i128::from(duration_in_blocks);
        let period_end = now
            .checked_add(duration_in_blocks)
            .ok_or(ContractError::MathOverflow)?;

        acc.last_reward_block = now;
        storage::set_accumulator(&env, &acc);
        storage::set_reward_per_block(&env, reward_per_block);
        storage::set_period_end(&env, period_end);
        storage::extend_instance_ttl(&env);

        events::publish_rewards_updated(
            &env,
            total_reward,
            duration_in_blocks,
            reward_per_block,
            period_end,
        );

        Ok(())
    }

    /// Switch the token all future payouts are made in.
    ///
    /// Unclaimed reward is not migrated: it is tracked in the unit of
    /// account and will be paid in `new_token`, rescaled to its decimals.
    pub fn update_reward_token(
        env: Env,
        caller: Address,
        new_token: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governance(&env, &caller)?;

        if new_token == storage::get_stake_token(&env)? {
            return Err(ContractError::TokensIdentical);
        }

        Self::settle(&env)?;

        let old_token = storage::get_reward_token(&env)?;
        storage::set_reward_token(&env, &new_token);
        storage::extend_instance_ttl(&env);

        events::publish_reward_token_updated(&env, old_token, new_token);

        Ok(())
    }

    /// Sweep token balances held by the ledger to `to`.
    ///
    /// The stake token is refused unless `include_stake_token` is set, so
    /// staker principal cannot be swept by accident.
    pub fn migrate_funds(
        env: Env,
        caller: Address,
        to: Address,
        tokens: Vec<Address>,
        amounts: Vec<i128>,
        include_stake_token: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_governance(&env, &caller)?;

        if tokens.len() != amounts.len() {
            return Err(ContractError::LengthMismatch);
        }

        let stake_token = storage::get_stake_token(&env)?;
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            if token == stake_token && !include_stake_token {
                return Err(ContractError::StakeTokenLocked);
            }
            if amount < 0 {
                return Err(ContractError::InvalidAmount);
            }
        }

        let this = env.current_contract_address();
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            if amount == 0 {
                continue;
            }
            let client = token::Client::new(&env, &token);
            if client.balance(&this) < amount {
                return Err(ContractError::InsufficientFunds);
            }
            client.transfer(&this, &to, &amount);
            events::publish_funds_migrated(&env, token, to.clone(), amount);
        }

        storage::extend_instance_ttl(&env);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_governance(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if *caller != storage::get_governance(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_reward_liquidity(
        env: &Env,
        reward_client: &token::Client,
        payout: i128,
    ) -> Result<(), ContractError> {
        if payout <= 0 {
            return Ok(());
        }
        let available = reward_client.balance(&env.current_contract_address());
        if available < payout {
            log!(env, "reward payout exceeds balance", payout, available);
            return Err(ContractError::InsufficientFunds);
        }
        Ok(())
    }

    fn reward_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let reward_token = storage::get_reward_token(env)?;
        Ok(token::Client::new(env, &reward_token))
    }

    /// Accumulator as it would be after settling at the current block.
    fn accrued(env: &Env) -> Result<Accumulator, ContractError> {
        rewards::accrue(
            env,
            storage::get_accumulator(env),
            env.ledger().sequence(),
            storage::get_period_end(env),
            storage::get_reward_per_block(env),
            storage::get_total_staked(env),
        )
    }

    /// Bring the stored accumulator up to the current block. Every mutating
    /// entry point calls this before touching balances.
    fn settle(env: &Env) -> Result<Accumulator, ContractError> {
        let before = storage::get_accumulator(env);
        let after = Self::accrued(env)?;
        if after != before {
            storage::set_accumulator(env, &after);
            log!(
                env,
                "accumulator advanced",
                after.acc_reward_per_share,
                after.last_reward_block
            );
        }
        Ok(after)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_token;


#[cfg(test)]
mod test_governance;
