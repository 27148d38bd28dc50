//! Checkout eligibility gate.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::QuoteError;
use crate::service::ServiceFamily;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Rules for when a cart may be checked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutPolicy {
    /// Door-only carts need at least this many doors in total.
    pub min_door_units: u32,
    pub door_minimum_message: String,
    pub trim_only_message: String,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            min_door_units: 3,
            door_minimum_message:
                "Door painting needs at least 3 doors, or another service in the same booking."
                    .to_string(),
            trim_only_message: "Trim can only be booked together with another service."
                .to_string(),
        }
    }
}

impl CheckoutPolicy {
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.min_door_units == 0 {
            return Err(QuoteError::InvalidPolicy {
                name: "min_door_units".to_string(),
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Result of the checkout gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible: bool,
    /// Why checkout is blocked. `None` when eligible.
    pub reason: Option<String>,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert into a `Result`, with the reason as a `CheckoutBlocked` error.
    pub fn into_result(self) -> Result<(), QuoteError> {
        match self.reason {
            Some(reason) if !self.eligible => Err(QuoteError::CheckoutBlocked(reason)),
            _ => Ok(()),
        }
    }
}

/// Evaluate whether `cart` may be checked out.
///
/// Rules are checked in order and the first failure wins:
/// 1. The cart must not be empty.
/// 2. A cart with doors and no service other than doors or trim needs
///    `min_door_units` doors in total, counted across interior and exterior
///    items. Trim does not stand in for a qualifying service.
/// 3. Trim cannot be the only service.
pub fn check_eligibility(cart: &Cart, policy: &CheckoutPolicy) -> Eligibility {
    if cart.is_empty() {
        return Eligibility::blocked(EMPTY_CART_MESSAGE);
    }

    let door_units: u32 = cart
        .items_in(ServiceFamily::Doors)
        .fold(0u32, |acc, item| acc.saturating_add(item.unit_count()));
    let has_doors = cart.items_in(ServiceFamily::Doors).next().is_some();
    if has_doors
        && !cart.has_outside(&[ServiceFamily::Doors, ServiceFamily::Trim])
        && door_units < policy.min_door_units
    {
        return Eligibility::blocked(policy.door_minimum_message.clone());
    }

    let has_trim = cart.items_in(ServiceFamily::Trim).next().is_some();
    if has_trim && !cart.has_other_than(ServiceFamily::Trim) {
        return Eligibility::blocked(policy.trim_only_message.clone());
    }

    Eligibility::allowed()
}
