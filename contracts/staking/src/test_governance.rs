extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Vec};

use crate::test::{register_token, setup, setup_without_rewards, HUNDRED, ONE, START_BLOCK, TEN};
use crate::ContractError;

// ── update_rewards ───────────────────────────────────────────────────────────

#[test]
fn test_update_rewards_by_non_governance_fails() {
    let ctx = setup();
    let intruder = Address::generate(&ctx.env);

    match ctx.client.try_update_rewards(&intruder, &HUNDRED, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(ctx.client.current_reward_per_block(), ONE);
}

#[test]
fn test_update_rewards_rejects_bad_input() {
    let ctx = setup_without_rewards();

    match ctx.client.try_update_rewards(&ctx.governance, &HUNDRED, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidDuration),
        _ => unreachable!("Expected InvalidDuration error"),
    }
    match ctx.client.try_update_rewards(&ctx.governance, &-1, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

#[test]
fn test_no_accrual_before_first_window() {
    let ctx = setup_without_rewards();
    let alice = ctx.staker();

    ctx.client.stake(&alice, &alice, &TEN);
    ctx.advance_to(START_BLOCK + 50);

    assert_eq!(ctx.client.calculate_pending_rewards(&alice), 0);
    assert_eq!(ctx.client.acc_reward_per_share(), 0);
}

#[test]
fn test_update_rewards_mid_window_keeps_accrued() {
    let ctx = setup();
    let alice = ctx.staker();
    ctx.client.stake(&alice, &alice, &TEN);

    // 50 units accrued at the old rate, then a fresh window at 2 per block.
    ctx.advance_to(150);
    ctx.fund_rewards(&ctx.reward_token, 2 * HUNDRED);
    ctx.client.update_rewards(&ctx.governance, &(2 * HUNDRED), &100);
    assert_eq!(ctx.client.current_reward_per_block(), 2 * ONE);
    assert_eq!(ctx.client.period_end_block(), 250);

    ctx.advance_to(160);
    assert_eq!(ctx.client.calculate_pending_rewards(&alice), 70 * ONE);
}

#[test]
fn test_gap_after_expired_window_never_accrues() {
    let ctx = setup();
    let alice = ctx.staker();
    ctx.client.stake(&alice, &alice, &TEN);

    ctx.advance_to(300);
    ctx.client.update_rewards(&ctx.governance, &(50 * ONE), &50);
    assert_eq!(ctx.client.last_reward_block(), 300);

    // 100 from the first window, nothing for 200..300, 10 from the second.
    ctx.advance_to(310);
    assert_eq!(ctx.client.calculate_pending_rewards(&alice), 110 * ONE);
}

#[test]
fn test_zero_reward_window_stops_emission() {
    let ctx = setup();
    let alice = ctx.staker();
    ctx.client.stake(&alice, &alice, &TEN);

    ctx.advance_to(150);
    ctx.client.update_rewards(&ctx.governance, &0, &100);

    ctx.advance_to(190);
    assert_eq!(ctx.client.calculate_pending_rewards(&alice), 50 * ONE);
}

// ── update_reward_token ──────────────────────────────────────────────────────

#[test]
fn test_update_reward_token() {
    let ctx = setup();
    let next = register_token(&ctx.env, 6);

    ctx.client.update_reward_token(&ctx.governance, &next.address);
    assert_eq!(ctx.client.reward_token(), next.address);
}

#[test]
fn test_update_reward_token_by_non_governance_fails() {
    let ctx = setup();
    let next = register_token(&ctx.env, 6);
    let intruder = Address::generate(&ctx.env);

    match ctx.client.try_update_reward_token(&intruder, &next.address) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(ctx.client.reward_token(), ctx.reward_token.address);
}

#[test]
fn test_update_reward_token_to_stake_token_fails() {
    let ctx = setup();

    match ctx
        .client
        .try_update_reward_token(&ctx.governance, &ctx.stake_token.address)
    {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokensIdentical),
        _ => unreachable!("Expected TokensIdentical error"),
    }
}

#[test]
fn test_reward_token_switch_keeps_unit_of_account_value() {
    let ctx = setup();
    let same_decimals = register_token(&ctx.env, 18);
    let alice = ctx.staker();
    ctx.client.stake(&alice, &alice, &TEN);

    ctx.advance_to(125);
    let before = ctx.client.calculate_pending_rewards(&alice);
    ctx.client.update_reward_token(&ctx.governance, &same_decimals.address);
    assert_eq!(ctx.client.calculate_pending_rewards(&alice), before);
}

// ── migrate_funds ────────────────────────────────────────────────────────────

#[test]
fn test_migrate_funds_sweeps_reward_token() {
    let ctx = setup();
    let treasury = Address::generate(&ctx.env);

    ctx.client.migrate_funds(
        &ctx.governance,
        &treasury,
        &vec![&ctx.env, ctx.reward_token.address.clone()],
        &vec![&ctx.env, 40 * ONE],
        &false,
    );

    assert_eq!(ctx.reward_token.balance(&treasury), 40 * ONE);
    assert_eq!(ctx.reward_token.balance(&ctx.client.address), 60 * ONE);
}

#[test]
fn test_migrate_funds_multiple_tokens() {
    let ctx = setup();
    let stray = register_token(&ctx.env, 6);
    ctx.fund_rewards(&stray, 5_000_000);
    let treasury = Address::generate(&ctx.env);

    ctx.client.migrate_funds(
        &ctx.governance,
        &treasury,
        &vec![&ctx.env, ctx.reward_token.address.clone(), stray.address.clone()],
        &vec![&ctx.env, HUNDRED, 5_000_000],
        &false,
    );

    assert_eq!(ctx.reward_token.balance(&treasury), HUNDRED);
    assert_eq!(stray.balance(&treasury), 5_000_000);
}

#[test]
fn test_migrate_funds_guards_stake_token() {
    let ctx = setup();
    let alice = ctx.staker();
    ctx.client.stake(&alice, &alice, &TEN);
    let tokens = vec![&ctx.env, ctx.stake_token.address.clone()];
    let amounts = vec![&ctx.env, TEN];

    match ctx
        .client
        .try_migrate_funds(&ctx.governance, &ctx.governance, &tokens, &amounts, &false)
    {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakeTokenLocked),
        _ => unreachable!("Expected StakeTokenLocked error"),
    }
    assert_eq!(ctx.stake_token.balance(&ctx.client.address), TEN);

    ctx.client
        .migrate_funds(&ctx.governance, &ctx.governance, &tokens, &amounts, &true);
    assert_eq!(ctx.stake_token.balance(&ctx.governance), TEN);
}

#[test]
fn test_migrate_funds_rejects_mismatched_lengths() {
    let ctx = setup();
    let amounts: Vec<i128> = Vec::new(&ctx.env);

    match ctx.client.try_migrate_funds(
        &ctx.governance,
        &ctx.governance,
        &vec![&ctx.env, ctx.reward_token.address.clone()],
        &amounts,
        &false,
    ) {
        Err(Ok(e)) => assert_eq!(e, ContractError::LengthMismatch),
        _ => unreachable!("Expected LengthMismatch error"),
    }
}

#[test]
fn test_migrate_funds_more_than_held_fails() {
    let ctx = setup();

    match ctx.client.try_migrate_funds(
        &ctx.governance,
        &ctx.governance,
        &vec![&ctx.env, ctx.reward_token.address.clone()],
        &vec![&ctx.env, HUNDRED + 1],
        &false,
    ) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientFunds),
        _ => unreachable!("Expected InsufficientFunds error"),
    }
    assert_eq!(ctx.reward_token.balance(&ctx.client.address), HUNDRED);
}

#[test]
fn test_migrate_funds_by_non_governance_fails() {
    let ctx = setup();
    let intruder = Address::generate(&ctx.env);

    match ctx.client.try_migrate_funds(
        &intruder,
        &intruder,
        &vec![&ctx.env, ctx.reward_token.address.clone()],
        &vec![&ctx.env, ONE],
        &false,
    ) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
