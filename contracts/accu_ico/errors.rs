use core::fmt;

use crate::stage::SaleStage;

#[derive(Debug, PartialEq, Eq, Clone, Copy, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Caller is not the contract owner.
    Unauthorized,
    /// Zero payment, null beneficiary, or the controller itself as beneficiary.
    InvalidPurchaseInput,
    /// FinalSale is current but its price has not been configured.
    PriceNotSet,
    /// The purchase would push the stage past its allocation.
    AllocationExceeded(SaleStage),
    /// Admin tried to set a zero price.
    InvalidPrice,
    /// No stage exists after FinalSale.
    InvalidTransition,
    /// Sender balance is below the transfer amount.
    InsufficientBalance,
    /// Spender allowance is below the transfer amount.
    InsufficientAllowance,
    /// Transfer or approval targets the null account.
    InvalidRecipient,
    /// Ledger created with zero total supply.
    InvalidSupply,
    /// Treasury set to the null account at deployment.
    InvalidTreasury,
    /// Payment converts to zero units at the current price.
    PurchaseTooSmall,
    /// Price oracle call failed or returned a zero price.
    OracleUnavailable,
    /// Forwarding the payment to the treasury failed.
    TransferFailed,
    /// Arithmetic overflow.
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Unauthorized => "Caller is not the owner",
            Error::InvalidPurchaseInput => "Invalid amount or address",
            Error::PriceNotSet => "Final sale price not set",
            Error::AllocationExceeded(SaleStage::PreSale) => "Exceeded PreSale token allocation",
            Error::AllocationExceeded(SaleStage::SeedSale) => "Exceeded SeedSale token allocation",
            Error::AllocationExceeded(SaleStage::FinalSale) => "Exceeded token allocation",
            Error::InvalidPrice => "Should be valid Price",
            Error::InvalidTransition => "No stage after FinalSale",
            Error::InsufficientBalance => "Transfer amount exceeds balance",
            Error::InsufficientAllowance => "Insufficient allowance",
            Error::InvalidRecipient => "Transfer to the zero address",
            Error::InvalidSupply => "Total supply must be positive",
            Error::InvalidTreasury => "Treasury cannot be the zero address",
            Error::PurchaseTooSmall => "Payment too small to buy any tokens",
            Error::OracleUnavailable => "Price oracle unavailable",
            Error::TransferFailed => "Payment forwarding failed",
            Error::Overflow => "Arithmetic overflow",
        };
        f.write_str(msg)
    }
}
