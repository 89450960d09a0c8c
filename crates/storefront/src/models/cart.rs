//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use pocket_shop_core::{Price, ProductId};

/// One row of the cart.
///
/// Rows are never merged: adding the same product twice yields two rows
/// whose quantities are adjusted independently.
///
/// Persisted as `{"id": "p1", "name": "Cotton T-Shirt", "price": 15, "qty": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product this row refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Price,
    /// Units ordered, always at least 1.
    #[serde(
        rename = "qty",
        default = "default_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub quantity: u32,
}

impl LineItem {
    /// A new row with quantity 1.
    #[must_use]
    pub const fn new(product_id: ProductId, name: String, price: Price) -> Self {
        Self {
            product_id,
            name,
            price,
            quantity: 1,
        }
    }

    /// `price × quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// Sum of `price × quantity` over `lines`.
///
/// Stored rows can be edited by hand, so an amount too large for `Decimal`
/// saturates at `Decimal::MAX` instead of failing.
#[must_use]
pub fn cart_total(lines: &[LineItem]) -> Decimal {
    let mut total = Decimal::ZERO;
    for line in lines {
        let Some(sum) = line
            .price
            .checked_times(line.quantity)
            .and_then(|subtotal| total.checked_add(subtotal))
        else {
            tracing::warn!(product_id = %line.product_id, "Cart total overflowed");
            return Decimal::MAX;
        };
        total = sum;
    }
    total
}

const fn default_quantity() -> u32 {
    1
}

/// Coerce a user-entered quantity to an integer of at least 1.
///
/// The input is read as a number and truncated toward zero. Anything that
/// is not a finite number, or is below 1, becomes 1. Values beyond `u32::MAX`
/// saturate.
///
/// ```
/// use pocket_shop_storefront::models::coerce_quantity;
///
/// assert_eq!(coerce_quantity("3"), 3);
/// assert_eq!(coerce_quantity("0"), 1);
/// assert_eq!(coerce_quantity("abc"), 1);
/// ```
#[must_use]
pub fn coerce_quantity(input: &str) -> u32 {
    input
        .trim()
        .parse::<f64>()
        .map_or(1, coerce_number)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [1, u32::MAX] first
fn coerce_number(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    let whole = value.trunc();
    if whole < 1.0 {
        1
    } else {
        whole.min(f64::from(u32::MAX)) as u32
    }
}

/// Read `qty` leniently: rows written by other clients may carry strings,
/// zero or garbage, all of which are coerced instead of failing the whole cart.
fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64().map_or(1, coerce_number),
        serde_json::Value::String(s) => coerce_quantity(&s),
        _ => 1,
    })
}
