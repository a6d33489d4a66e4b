//! Invoice arithmetic: subtotal, rounded tax, and grand total.
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::types::{LineItem, Totals};

/// Tax amounts are kept to cents regardless of currency.
const TAX_DECIMALS: u32 = 2;

pub fn subtotal(items: &[LineItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.amount()?)
            .ok_or_else(|| Error::overflow("subtotal"))
    })
}

/// `subtotal × rate`, rounded half away from zero to two decimals.
pub fn tax(subtotal: Decimal, rate: Decimal) -> Result<Decimal> {
    subtotal
        .checked_mul(rate)
        .map(|t| t.round_dp_with_strategy(TAX_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| Error::overflow("tax"))
}

pub fn compute(items: &[LineItem], rate: Decimal) -> Result<Totals> {
    let subtotal = subtotal(items)?;
    let tax = tax(subtotal, rate)?;
    let total = subtotal
        .checked_add(tax)
        .ok_or_else(|| Error::overflow("total"))?;
    Ok(Totals {
        subtotal,
        tax,
        total,
    })
}

pub fn shows_tax_row(rate: Decimal) -> bool {
    !rate.is_zero()
}

/// `"Tax (10 %)"` for a rate of `0.1`; the percentage is rounded to a whole number.
pub fn tax_label(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("Tax ({percent} %)")
}
