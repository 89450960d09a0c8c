//! Deferred shopper intents.

use serde::{Deserialize, Serialize};

use pocket_shop_core::ProductId;

/// An action the shopper attempted while signed out.
///
/// Saved under the `postAction` key before redirecting to the login page and
/// taken out of storage (exactly once) after the next successful login or
/// signup.
///
/// Persisted as `{"action": "addToCart", "id": "p1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum PendingAction {
    /// Add one unit of the product to the cart.
    #[serde(rename = "addToCart")]
    AddToCart {
        /// Product the shopper tried to add.
        id: ProductId,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let action = PendingAction::AddToCart {
            id: ProductId::new("p2"),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"addToCart","id":"p2"}"#);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_str::<PendingAction>(r#"{"action":"wishlist","id":"p2"}"#);
        assert!(result.is_err());
    }
}
