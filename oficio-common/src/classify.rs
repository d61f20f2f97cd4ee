//! Accounting-treatment classification for supplier records
//!
//! Pure and order-independent: classifying the same record twice yields the
//! same result and never mutates the record. The result drives table
//! highlighting and the surplus advisory, both owned by presentation.

use crate::model::SupplierRecord;
use serde::Serialize;

/// Formatted-zero discount as the extraction backend emits it.
const FORMATTED_ZERO: &str = "0,00";

/// Accounting treatment required for one supplier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    /// No special accounting entry
    None,
    /// Surplus-source payment: requires a ledger entry
    Surplus,
    /// Discount: requires a transfer in the accounting system
    Discount,
    /// Both entries required
    Both,
}

/// Derived tags for one supplier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_surplus: bool,
    pub has_discount: bool,
    pub treatment: Treatment,
}

/// Classify one record against the accounting-treatment rules.
///
/// Surplus: the digits of the funding-source code are non-empty and start
/// with `2`. Discount: a discount value is present and is not one of the
/// recognized "no discount" representations (absent, empty/whitespace, or
/// the formatted zero `"0,00"`).
pub fn classify(record: &SupplierRecord) -> Classification {
    let is_surplus = record
        .source
        .as_deref()
        .map(|source| {
            let digits: String = source.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.starts_with('2')
        })
        .unwrap_or(false);

    let has_discount = match record.discount.as_deref() {
        None => false,
        Some(discount) => {
            let discount = discount.trim();
            !discount.is_empty() && discount != FORMATTED_ZERO
        }
    };

    let treatment = match (is_surplus, has_discount) {
        (true, true) => Treatment::Both,
        (true, false) => Treatment::Surplus,
        (false, true) => Treatment::Discount,
        (false, false) => Treatment::None,
    };

    Classification {
        is_surplus,
        has_discount,
        treatment,
    }
}
