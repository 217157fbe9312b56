//! Fixed-point helpers for sale pricing.
//!
//! Payments and prices are 18-decimal quantities held in `u128`. Their
//! products overflow 128 bits long before the results do, so `mul_div`
//! widens to `U256` for the intermediate.

use primitive_types::U256;

use crate::constants::PRECISION;
use crate::errors::Error;

/// `floor(a * b / d)`, or `None` when `d == 0` or the quotient exceeds 128 bits.
pub fn mul_div(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    // Both factors fit in 128 bits, so the product cannot overflow 256.
    let quotient = U256::from(a) * U256::from(b) / U256::from(d);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.low_u128())
}

/// Converts a native amount to USD given the USD price of one native unit
/// (18 decimals).
pub fn native_to_usd(amount: u128, usd_per_native: u128) -> Result<u128, Error> {
    mul_div(amount, usd_per_native, PRECISION).ok_or(Error::Overflow)
}

/// Smallest token units bought by `usd_value` at `price` per whole token.
///
/// Rounds down. The sub-unit remainder stays with the treasury and is not
/// refunded.
pub fn units_for(usd_value: u128, price: u128) -> Result<u128, Error> {
    if price == 0 {
        return Err(Error::PriceNotSet);
    }
    mul_div(usd_value, PRECISION, price).ok_or(Error::Overflow)
}
