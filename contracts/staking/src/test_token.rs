//! Minimal token used by the tests. Unlike a Stellar asset contract it lets
//! each test pick its decimals, so 18- and 6-decimal reward tokens can be
//! exercised side by side.

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, MuxedAddress, Symbol};

const DECIMALS: Symbol = symbol_short!("DECIMALS");
const BALANCE: Symbol = symbol_short!("BALANCE");

#[contract]
pub struct TestToken;

#[contractimpl]
impl TestToken {
    pub fn __constructor(env: Env, decimals: u32) {
        env.storage().instance().set(&DECIMALS, &decimals);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&DECIMALS).unwrap_or(0)
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, to), &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        let to = to.address();

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .persistent()
            .set(&(BALANCE, from), &(from_balance - amount));

        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, to), &(to_balance + amount));
    }
}
