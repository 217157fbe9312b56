//! Fixed-supply fungible token ledger.
//!
//! The whole supply is credited to one holder at creation; afterwards units
//! only move between accounts. Nothing mints or burns, so the sum of all
//! balances stays equal to `total_supply`.

use ink::primitives::AccountId;
use ink::storage::Mapping;

use crate::constants::ZERO_ADDRESS;
use crate::errors::Error;

pub type Balance = u128;

#[derive(Debug)]
#[ink::storage_item]
pub struct Ledger {
    balances: Mapping<AccountId, Balance>,
    allowances: Mapping<(AccountId, AccountId), Balance>,
    total_supply: Balance,
}

impl Ledger {
    /// Creates the ledger and credits `total_supply` to `initial_holder`.
    pub fn new(total_supply: Balance, initial_holder: AccountId) -> Result<Self, Error> {
        if total_supply == 0 {
            return Err(Error::InvalidSupply);
        }

        let mut balances = Mapping::default();
        balances.insert(initial_holder, &total_supply);

        Ok(Self {
            balances,
            allowances: Mapping::default(),
            total_supply,
        })
    }

    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    pub fn balance_of(&self, account: AccountId) -> Balance {
        self.balances.get(account).unwrap_or(0)
    }

    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
        self.allowances.get((owner, spender)).unwrap_or(0)
    }

    /// Checks every transfer precondition without touching storage.
    pub fn ensure_can_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<(), Error> {
        if to == AccountId::from(ZERO_ADDRESS) {
            return Err(Error::InvalidRecipient);
        }
        if self.balance_of(from) < amount {
            return Err(Error::InsufficientBalance);
        }
        Ok(())
    }

    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<(), Error> {
        self.ensure_can_transfer(from, to, amount)?;
        if from == to {
            return Ok(());
        }

        let debited = self.balance_of(from) - amount;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        self.balances.insert(from, &debited);
        self.balances.insert(to, &credited);
        Ok(())
    }

    pub fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: Balance,
    ) -> Result<(), Error> {
        if spender == AccountId::from(ZERO_ADDRESS) {
            return Err(Error::InvalidRecipient);
        }
        self.allowances.insert((owner, spender), &amount);
        Ok(())
    }

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance only when the transfer goes through.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<(), Error> {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }

        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), &(allowance - amount));
        Ok(())
    }
}
