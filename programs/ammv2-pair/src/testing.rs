//! In-memory collaborators for exercising the pair engine off chain.

use crate::engine::{
    AddLiquidityArgs, BurnOutcome, FlashLoanOutcome, MintOutcome, RemoveLiquidityArgs,
    SwapOutcome,
};
use crate::constants::flash_loan_callback_success;
use crate::errors::AmmError;
use crate::host::{AssetVault, ClaimLedger, FlashBorrower, PairEnv};
use crate::state::Pair;
use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

pub fn expect_err<T: Debug>(result: Result<T>, expected: AmmError) {
    let expected = Error::from(expected);
    match result {
        Ok(value) => panic!("expected {expected:?}, got Ok({value:?})"),
        Err(err) => assert_eq!(err, expected),
    }
}

/// Asset and claim-token balances of every participant
#[derive(Clone, Default)]
pub struct World {
    assets: HashMap<(Pubkey, Pubkey), u128>,
    claims: HashMap<Pubkey, u128>,
    claim_supply: u128,
    /// Basis points withheld from transfers into the pair, per asset
    transfer_tax_bps: HashMap<Pubkey, u128>,
}

impl World {
    fn asset(&self, asset: &Pubkey, owner: &Pubkey) -> u128 {
        self.assets.get(&(*asset, *owner)).copied().unwrap_or(0)
    }

    fn move_asset(
        &mut self,
        asset: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u128,
        taxed: bool,
    ) -> Result<()> {
        let balance = self.asset(asset, from);
        require!(balance >= amount, AmmError::TransferFailed);
        let tax = if taxed {
            amount * self.transfer_tax_bps.get(asset).copied().unwrap_or(0) / 10_000
        } else {
            0
        };
        self.assets.insert((*asset, *from), balance - amount);
        *self.assets.entry((*asset, *to)).or_default() += amount - tax;
        Ok(())
    }

    fn claims(&self, owner: &Pubkey) -> u128 {
        self.claims.get(owner).copied().unwrap_or(0)
    }
}

/// The pair's window onto the world
struct Host {
    world: Rc<RefCell<World>>,
    address: Pubkey,
}

impl AssetVault for Host {
    fn balance(&self, asset: &Pubkey) -> Result<u128> {
        Ok(self.world.borrow().asset(asset, &self.address))
    }

    fn transfer_in(&mut self, asset: &Pubkey, from: &Pubkey, amount: u128) -> Result<()> {
        self.world
            .borrow_mut()
            .move_asset(asset, from, &self.address, amount, true)
    }

    fn transfer_out(&mut self, asset: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        self.world
            .borrow_mut()
            .move_asset(asset, &self.address, to, amount, false)
    }
}

impl ClaimLedger for Host {
    fn total_supply(&self) -> Result<u128> {
        Ok(self.world.borrow().claim_supply)
    }

    fn balance_of(&self, owner: &Pubkey) -> Result<u128> {
        Ok(self.world.borrow().claims(owner))
    }

    fn mint(&mut self, to: &Pubkey, amount: u128) -> Result<()> {
        let mut world = self.world.borrow_mut();
        world.claim_supply = world
            .claim_supply
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        *world.claims.entry(*to).or_default() += amount;
        Ok(())
    }

    fn burn(&mut self, from: &Pubkey, amount: u128) -> Result<()> {
        let mut world = self.world.borrow_mut();
        let balance = world.claims(from);
        require!(balance >= amount, AmmError::TransferFailed);
        world.claims.insert(*from, balance - amount);
        world.claim_supply -= amount;
        Ok(())
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        let mut world = self.world.borrow_mut();
        let balance = world.claims(from);
        require!(balance >= amount, AmmError::TransferFailed);
        world.claims.insert(*from, balance - amount);
        *world.claims.entry(*to).or_default() += amount;
        Ok(())
    }
}

/// A pair wired to an in-memory world. Failed operations roll the world
/// back, as a failed transaction would.
pub struct Fixture {
    pub world: Rc<RefCell<World>>,
    pub pair: Pair,
    /// The pair's own address: vault owner and claim-token custody
    pub address: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub fee_to: Option<Pubkey>,
    pub now: u32,
}

impl Fixture {
    pub fn new() -> Self {
        let (mut token_a, mut token_b) = (Pubkey::new_unique(), Pubkey::new_unique());
        if token_b < token_a {
            std::mem::swap(&mut token_a, &mut token_b);
        }
        let mut pair = Pair::default();
        pair.initialize(token_a, token_b, Pubkey::new_unique(), 255, 255)
            .unwrap();

        Self {
            world: Rc::default(),
            pair,
            address: Pubkey::new_unique(),
            token_a,
            token_b,
            fee_to: None,
            now: 0,
        }
    }

    pub fn run<T>(
        &mut self,
        caller: Pubkey,
        op: impl FnOnce(&mut Pair, &mut PairEnv) -> Result<T>,
    ) -> Result<T> {
        let saved = self.world.borrow().clone();
        let mut vault = Host {
            world: self.world.clone(),
            address: self.address,
        };
        let mut ledger = Host {
            world: self.world.clone(),
            address: self.address,
        };
        let mut env = PairEnv {
            vault: &mut vault,
            ledger: &mut ledger,
            caller,
            custody: self.address,
            fee_to: self.fee_to,
            now: self.now,
        };

        let result = op(&mut self.pair, &mut env);
        if result.is_err() {
            *self.world.borrow_mut() = saved;
        }
        result
    }

    /// A fresh participant holding the given amounts of both assets
    pub fn user(&mut self, amount_a: u128, amount_b: u128) -> Pubkey {
        let user = Pubkey::new_unique();
        let mut world = self.world.borrow_mut();
        world.assets.insert((self.token_a, user), amount_a);
        world.assets.insert((self.token_b, user), amount_b);
        user
    }

    /// Send assets straight to the pair without going through the engine
    pub fn donate(&mut self, from: &Pubkey, amount_a: u128, amount_b: u128) {
        let mut world = self.world.borrow_mut();
        world
            .move_asset(&self.token_a, from, &self.address, amount_a, false)
            .unwrap();
        world
            .move_asset(&self.token_b, from, &self.address, amount_b, false)
            .unwrap();
    }

    pub fn set_transfer_tax(&mut self, asset: Pubkey, bps: u128) {
        self.world
            .borrow_mut()
            .transfer_tax_bps
            .insert(asset, bps);
    }

    pub fn asset_balance(&self, asset: &Pubkey, owner: &Pubkey) -> u128 {
        self.world.borrow().asset(asset, owner)
    }

    pub fn claims_of(&self, owner: &Pubkey) -> u128 {
        self.world.borrow().claims(owner)
    }

    pub fn claim_supply(&self) -> u128 {
        self.world.borrow().claim_supply
    }

    pub fn add_liquidity(
        &mut self,
        user: Pubkey,
        amount_a: u128,
        amount_b: u128,
    ) -> Result<MintOutcome> {
        let args = AddLiquidityArgs {
            amount_a_desired: amount_a,
            amount_b_desired: amount_b,
            amount_a_min: 0,
            amount_b_min: 0,
        };
        self.add_liquidity_with(user, args)
    }

    pub fn add_liquidity_with(
        &mut self,
        user: Pubkey,
        args: AddLiquidityArgs,
    ) -> Result<MintOutcome> {
        self.run(user, |pair, env| pair.add_liquidity(env, args, &user))
    }

    pub fn remove_liquidity(&mut self, user: Pubkey, liquidity: u128) -> Result<BurnOutcome> {
        self.remove_liquidity_to(user, liquidity, user)
    }

    pub fn remove_liquidity_to(
        &mut self,
        user: Pubkey,
        liquidity: u128,
        to: Pubkey,
    ) -> Result<BurnOutcome> {
        let args = RemoveLiquidityArgs {
            liquidity,
            amount_a_min: 0,
            amount_b_min: 0,
        };
        self.remove_liquidity_with(user, args, to)
    }

    pub fn remove_liquidity_with(
        &mut self,
        user: Pubkey,
        args: RemoveLiquidityArgs,
        to: Pubkey,
    ) -> Result<BurnOutcome> {
        self.run(user, |pair, env| pair.remove_liquidity(env, args, &to))
    }

    pub fn swap(
        &mut self,
        user: Pubkey,
        asset_in: Pubkey,
        amount_in: u128,
        minimum_amount_out: u128,
    ) -> Result<SwapOutcome> {
        self.run(user, |pair, env| {
            pair.swap(env, &asset_in, amount_in, minimum_amount_out, &user)
        })
    }

    pub fn sync(&mut self, caller: Pubkey) -> Result<()> {
        self.run(caller, |pair, env| pair.sync(env))
    }

    pub fn skim(&mut self, caller: Pubkey, to: Pubkey) -> Result<()> {
        self.run(caller, |pair, env| pair.skim(env, &to))
    }

    pub fn flash_loan(
        &mut self,
        borrower: &mut Borrower,
        receiver: Pubkey,
        asset: Pubkey,
        amount: u128,
    ) -> Result<FlashLoanOutcome> {
        self.run(receiver, |pair, env| {
            pair.flash_loan(env, borrower, &receiver, &asset, amount, b"loan")
        })
    }
}

/// Flash-loan receiver that repays `amount + fee - shortfall`
pub struct Borrower {
    world: Rc<RefCell<World>>,
    pair: Pubkey,
    receiver: Pubkey,
    shortfall: u128,
    pub ack: [u8; 32],
    /// `(asset, amount, fee)` per callback
    pub calls: Vec<(Pubkey, u128, u128)>,
}

impl Borrower {
    pub fn repaying(fixture: &Fixture, receiver: Pubkey, shortfall: u128) -> Self {
        Self {
            world: fixture.world.clone(),
            pair: fixture.address,
            receiver,
            shortfall,
            ack: flash_loan_callback_success(),
            calls: Vec::new(),
        }
    }
}

impl FlashBorrower for Borrower {
    fn on_flash_loan(
        &mut self,
        _initiator: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        fee: u128,
        data: &[u8],
    ) -> Result<[u8; 32]> {
        assert_eq!(data, b"loan");
        self.calls.push((*asset, amount, fee));
        let repay = amount + fee - self.shortfall;
        self.world
            .borrow_mut()
            .move_asset(asset, &self.receiver, &self.pair, repay, false)?;
        Ok(self.ack)
    }
}
