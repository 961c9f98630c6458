//! Cart and order price arithmetic.
//!
//! All amounts are integer minor currency units. Tax is a flat percentage of
//! the subtotal, rounded half up to the nearest minor unit.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const TAX_RATE_PERCENT: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriceSummary {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl PriceSummary {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_subtotal(subtotal: i64) -> AppResult<Self> {
        if subtotal < 0 {
            return Err(AppError::BadRequest("subtotal must not be negative".into()));
        }
        let tax = tax_for(subtotal)?;
        let total = subtotal.checked_add(tax).ok_or_else(overflow)?;
        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }
}

/// Sums `(unit_price, quantity)` lines into a subtotal/tax/total breakdown.
pub fn summarize<I>(lines: I) -> AppResult<PriceSummary>
where
    I: IntoIterator<Item = (i64, i32)>,
{
    let mut subtotal: i64 = 0;
    for (price, quantity) in lines {
        if price < 0 || quantity < 0 {
            return Err(AppError::BadRequest(
                "price and quantity must not be negative".into(),
            ));
        }
        let line = price
            .checked_mul(i64::from(quantity))
            .ok_or_else(overflow)?;
        subtotal = subtotal.checked_add(line).ok_or_else(overflow)?;
    }
    PriceSummary::from_subtotal(subtotal)
}

pub fn tax_for(subtotal: i64) -> AppResult<i64> {
    let scaled = subtotal
        .checked_mul(TAX_RATE_PERCENT)
        .and_then(|v| v.checked_add(50))
        .ok_or_else(overflow)?;
    Ok(scaled / 100)
}

/// Quantity of a cart line after adding `added` more units to it.
pub fn merge_quantity(existing: i32, added: i32) -> AppResult<i32> {
    if added <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    existing
        .checked_add(added)
        .ok_or_else(|| AppError::BadRequest("quantity is too large".into()))
}

/// Applies a percentage to an amount, rounding half up.
pub fn percent_of(amount: i64, percent: i64) -> i64 {
    let scaled = i128::from(amount) * i128::from(percent);
    let rounded = if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    };
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn overflow() -> AppError {
    AppError::BadRequest("amount is too large".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_subtotal_is_price_times_quantity() {
        for (price, quantity) in [(0, 0), (0, 3), (1_000, 1), (2_500, 4), (990, 7)] {
            let summary = summarize([(price, quantity)]).unwrap();
            assert_eq!(summary.subtotal, price * i64::from(quantity));
            assert_eq!(summary.total, summary.subtotal + summary.tax);
        }
    }

    #[test]
    fn tax_is_ten_percent_of_subtotal() {
        let summary = summarize([(1_000, 2), (500, 1)]).unwrap();
        assert_eq!(summary.subtotal, 2_500);
        assert_eq!(summary.tax, 250);
        assert_eq!(summary.total, 2_750);
    }

    #[test]
    fn tax_rounds_half_up_to_minor_unit() {
        assert_eq!(tax_for(5).unwrap(), 1);
        assert_eq!(tax_for(4).unwrap(), 0);
        assert_eq!(tax_for(15).unwrap(), 2);
    }

    #[test]
    fn empty_cart_is_all_zero() {
        let summary = summarize(Vec::new()).unwrap();
        assert_eq!(summary, PriceSummary::zero());
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(summarize([(-1, 1)]).is_err());
        assert!(summarize([(100, -1)]).is_err());
    }

    #[test]
    fn overflow_is_rejected_not_wrapped() {
        assert!(summarize([(i64::MAX, 2)]).is_err());
    }

    #[test]
    fn tax_rounding_near_the_limit_is_rejected_not_wrapped() {
        assert!(matches!(
            summarize([(i64::MAX / 10, 1)]),
            Err(AppError::BadRequest(_))
        ));
        assert!(tax_for(i64::MAX / 10).is_err());
        assert!(tax_for(i64::MAX / 100).is_ok());
    }

    #[test]
    fn merge_adds_quantities() {
        assert_eq!(merge_quantity(2, 3).unwrap(), 5);
        assert!(merge_quantity(2, 0).is_err());
        assert!(merge_quantity(i32::MAX, 1).is_err());
    }

    #[test]
    fn percent_of_rounds_both_signs() {
        assert_eq!(percent_of(1_000, 70), 700);
        assert_eq!(percent_of(15, 70), 11);
        assert_eq!(percent_of(-15, 70), -11);
    }
}
