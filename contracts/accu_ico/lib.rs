#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod errors;
pub mod ledger;
pub mod math;
pub mod stage;

pub mod constants {
    /// Token decimals; one whole ACCU is `PRECISION` smallest units.
    pub const DECIMALS: u8 = 18;
    pub const PRECISION: u128 = 1_000_000_000_000_000_000u128;

    pub const TOKEN_NAME: &str = "ACCU COIN";
    pub const TOKEN_SYMBOL: &str = "ACCU";

    pub const TOTAL_SUPPLY: u128 = 100_000_000 * PRECISION;

    // Per-stage allocations, in smallest token units.
    pub const PRE_SALE_QUANTITY: u128 = 30_000_000 * PRECISION;
    pub const SEED_SALE_QUANTITY: u128 = 50_000_000 * PRECISION;
    pub const FINAL_SALE_QUANTITY: u128 = 20_000_000 * PRECISION;

    // Prices per whole token, in smallest native units (0.01 and 0.02).
    pub const PRE_SALE_VALUE: u128 = PRECISION / 100;
    pub const SEED_SALE_VALUE: u128 = PRECISION / 50;

    pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];
}

/// # ACCU staged token sale
///
/// The controller contract owns the entire ACCU supply from deployment and
/// releases it in three ordered stages:
///
/// ```text
///   PreSale ──switch_stage──► SeedSale ──switch_stage──► FinalSale
///   30M @ 0.01                50M @ 0.02                 20M @ owner-set price
/// ```
///
/// Every purchase forwards the attached native payment to the treasury and
/// moves the bought units out of the controller's own ledger balance. A
/// purchase either completes fully or leaves storage untouched: all checks
/// run before the first write.
///
/// Native → USD conversion goes through an optional price oracle contract.
/// With no oracle configured the conversion is 1:1, which keeps the contract
/// usable on local nodes and in the off-chain test engine.
#[ink::contract]
mod accu_ico {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::prelude::string::String;

    use crate::constants::*;
    use crate::ledger::Ledger;
    use crate::math;
    use crate::stage::STAGE_COUNT;

    pub use crate::errors::Error;
    pub use crate::stage::SaleStage;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct AccuIco {
        ledger: Ledger,

        owner: AccountId,
        /// Receives every purchase payment.
        treasury: AccountId,
        /// USD price feed. `None` means 1:1 conversion.
        oracle: Option<AccountId>,

        current_stage: SaleStage,
        /// Indexed by `SaleStage::index()`.
        stage_allocations: [Balance; STAGE_COUNT],
        /// FinalSale starts at 0 (unset).
        stage_prices: [Balance; STAGE_COUNT],
        units_sold: [Balance; STAGE_COUNT],

        total_sale: Balance,
        raised_amount: Balance,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct TokensPurchased {
        #[ink(topic)]
        purchaser: AccountId,
        #[ink(topic)]
        beneficiary: AccountId,
        units: Balance,
        payment: Balance,
        stage: SaleStage,
    }

    #[ink(event)]
    pub struct StageSwitched {
        from: SaleStage,
        to: SaleStage,
    }

    #[ink(event)]
    pub struct FinalSaleValueSet {
        previous: Balance,
        updated: Balance,
    }

    #[ink(event)]
    pub struct OracleSet {
        #[ink(topic)]
        oracle: AccountId,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl AccuIco {
        /// Deploys the sale and mints the full supply to the contract itself.
        /// The caller becomes the owner.
        #[ink(constructor)]
        pub fn new(treasury: AccountId) -> Result<Self, Error> {
            if treasury == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::InvalidTreasury);
            }

            let owner = Self::env().caller();
            let this = Self::env().account_id();
            let ledger = Ledger::new(TOTAL_SUPPLY, this)?;

            let contract = Self {
                ledger,
                owner,
                treasury,
                oracle: None,
                current_stage: SaleStage::PreSale,
                stage_allocations: [PRE_SALE_QUANTITY, SEED_SALE_QUANTITY, FINAL_SALE_QUANTITY],
                stage_prices: [PRE_SALE_VALUE, SEED_SALE_VALUE, 0],
                units_sold: [0; STAGE_COUNT],
                total_sale: 0,
                raised_amount: 0,
            };

            contract.env().emit_event(Transfer {
                from: None,
                to: Some(this),
                value: TOTAL_SUPPLY,
            });

            Ok(contract)
        }

        // =================================================================
        // PURCHASE
        // =================================================================

        /// Buys tokens for `beneficiary` with the attached native value.
        /// Returns the number of smallest units credited.
        #[ink(message, payable)]
        pub fn purchase_tokens(&mut self, beneficiary: AccountId) -> Result<Balance, Error> {
            let purchaser = self.env().caller();
            let payment = self.env().transferred_value();
            self.process_purchase(purchaser, beneficiary, payment)
        }

        /// Plain payment: the caller is the beneficiary.
        #[ink(message, payable)]
        pub fn buy(&mut self) -> Result<Balance, Error> {
            let purchaser = self.env().caller();
            let payment = self.env().transferred_value();
            self.process_purchase(purchaser, purchaser, payment)
        }

        /// Units a payment of `payment` would buy right now.
        #[ink(message)]
        pub fn quote(&self, payment: Balance) -> Result<Balance, Error> {
            if payment == 0 {
                return Err(Error::InvalidPurchaseInput);
            }
            self.plan_purchase(payment)
        }

        fn process_purchase(
            &mut self,
            purchaser: AccountId,
            beneficiary: AccountId,
            payment: Balance,
        ) -> Result<Balance, Error> {
            let this = self.env().account_id();
            if payment == 0 || beneficiary == AccountId::from(ZERO_ADDRESS) || beneficiary == this {
                return Err(Error::InvalidPurchaseInput);
            }

            let stage = self.current_stage;
            let idx = stage.index();
            let units = self.plan_purchase(payment)?;

            self.ledger.ensure_can_transfer(this, beneficiary, units)?;

            let stage_sold = self.units_sold[idx]
                .checked_add(units)
                .ok_or(Error::Overflow)?;
            let total_sale = self.total_sale.checked_add(units).ok_or(Error::Overflow)?;
            let raised_amount = self
                .raised_amount
                .checked_add(payment)
                .ok_or(Error::Overflow)?;

            // Forward before any write: a failed transfer leaves nothing behind.
            if self.env().balance() < payment {
                return Err(Error::TransferFailed);
            }
            self.env()
                .transfer(self.treasury, payment)
                .map_err(|_| Error::TransferFailed)?;

            self.ledger.transfer(this, beneficiary, units)?;
            self.units_sold[idx] = stage_sold;
            self.total_sale = total_sale;
            self.raised_amount = raised_amount;

            self.env().emit_event(Transfer {
                from: Some(this),
                to: Some(beneficiary),
                value: units,
            });
            self.env().emit_event(TokensPurchased {
                purchaser,
                beneficiary,
                units,
                payment,
                stage,
            });

            Ok(units)
        }

        /// Prices `payment` in the current stage and checks it fits the
        /// stage allocation.
        fn plan_purchase(&self, payment: Balance) -> Result<Balance, Error> {
            let stage = self.current_stage;
            let idx = stage.index();

            let price = self.stage_prices[idx];
            if price == 0 {
                return Err(Error::PriceNotSet);
            }

            let usd_value = self.eth_to_usd(payment)?;
            let units = math::units_for(usd_value, price)?;
            if units == 0 {
                return Err(Error::PurchaseTooSmall);
            }

            let sold = self.units_sold[idx]
                .checked_add(units)
                .ok_or(Error::AllocationExceeded(stage))?;
            if sold > self.stage_allocations[idx] {
                return Err(Error::AllocationExceeded(stage));
            }

            Ok(units)
        }

        // =================================================================
        // PRICE ORACLE
        // =================================================================

        /// Converts a native amount to its USD value (18 decimals).
        ///
        /// The oracle must expose `native_usd_price() -> Balance`, the USD
        /// price of one native unit with 18-decimal precision. Its freshness
        /// is not checked here.
        #[ink(message)]
        pub fn eth_to_usd(&self, amount: Balance) -> Result<Balance, Error> {
            let Some(oracle) = self.oracle else {
                return Ok(amount);
            };

            let result = build_call::<ink::env::DefaultEnvironment>()
                .call(oracle)
                .exec_input(ExecutionInput::new(Selector::new(ink::selector_bytes!(
                    "native_usd_price"
                ))))
                .returns::<Balance>()
                .try_invoke();

            match result {
                Ok(Ok(price)) if price > 0 => math::native_to_usd(amount, price),
                _ => Err(Error::OracleUnavailable),
            }
        }

        // =================================================================
        // ADMIN FUNCTIONS
        // =================================================================

        /// Advances to the next stage. Fails at FinalSale.
        #[ink(message)]
        pub fn switch_stage(&mut self) -> Result<SaleStage, Error> {
            self.only_owner()?;
            let from = self.current_stage;
            let to = from.next().ok_or(Error::InvalidTransition)?;
            self.current_stage = to;
            self.env().emit_event(StageSwitched { from, to });
            Ok(to)
        }

        /// Sets the FinalSale price. Allowed in any stage.
        #[ink(message)]
        pub fn set_final_sale_value(&mut self, price: Balance) -> Result<(), Error> {
            self.only_owner()?;
            if price == 0 {
                return Err(Error::InvalidPrice);
            }
            let idx = SaleStage::FinalSale.index();
            let previous = self.stage_prices[idx];
            self.stage_prices[idx] = price;
            self.env().emit_event(FinalSaleValueSet {
                previous,
                updated: price,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn set_oracle(&mut self, oracle: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            self.oracle = Some(oracle);
            self.env().emit_event(OracleSet { oracle });
            Ok(())
        }

        // =================================================================
        // TOKEN
        // =================================================================

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.ledger.transfer(from, to, value)?;
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            let owner = self.env().caller();
            self.ledger.approve(owner, spender, value)?;
            self.env().emit_event(Approval { owner, spender, value });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let spender = self.env().caller();
            self.ledger.transfer_from(spender, from, to, value)?;
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn name(&self) -> String {
            String::from(TOKEN_NAME)
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            String::from(TOKEN_SYMBOL)
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            DECIMALS
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.ledger.total_supply()
        }

        #[ink(message)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.ledger.balance_of(owner)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.ledger.allowance(owner, spender)
        }

        // =================================================================
        // VIEW FUNCTIONS
        // =================================================================

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn treasury(&self) -> AccountId {
            self.treasury
        }

        #[ink(message)]
        pub fn oracle(&self) -> Option<AccountId> {
            self.oracle
        }

        #[ink(message)]
        pub fn current_stage(&self) -> SaleStage {
            self.current_stage
        }

        #[ink(message)]
        pub fn pre_sale_quantity(&self) -> Balance {
            self.stage_allocation(SaleStage::PreSale)
        }

        #[ink(message)]
        pub fn pre_sale_value(&self) -> Balance {
            self.stage_price(SaleStage::PreSale)
        }

        #[ink(message)]
        pub fn seed_sale_quantity(&self) -> Balance {
            self.stage_allocation(SaleStage::SeedSale)
        }

        #[ink(message)]
        pub fn seed_sale_value(&self) -> Balance {
            self.stage_price(SaleStage::SeedSale)
        }

        #[ink(message)]
        pub fn final_sale_quantity(&self) -> Balance {
            self.stage_allocation(SaleStage::FinalSale)
        }

        /// Zero until the owner sets it.
        #[ink(message)]
        pub fn final_sale_value(&self) -> Balance {
            self.stage_price(SaleStage::FinalSale)
        }

        #[ink(message)]
        pub fn total_sale(&self) -> Balance {
            self.total_sale
        }

        #[ink(message)]
        pub fn raised_amount(&self) -> Balance {
            self.raised_amount
        }

        #[ink(message)]
        pub fn stage_allocation(&self, stage: SaleStage) -> Balance {
            self.stage_allocations[stage.index()]
        }

        #[ink(message)]
        pub fn stage_price(&self, stage: SaleStage) -> Balance {
            self.stage_prices[stage.index()]
        }

        #[ink(message)]
        pub fn units_sold_in(&self, stage: SaleStage) -> Balance {
            self.units_sold[stage.index()]
        }

        #[ink(message)]
        pub fn remaining_allocation(&self, stage: SaleStage) -> Balance {
            let idx = stage.index();
            self.stage_allocations[idx].saturating_sub(self.units_sold[idx])
        }

        // =================================================================
        // ACCESS CONTROL
        // =================================================================

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
