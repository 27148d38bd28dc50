//! Quote requests handed off at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartPolicy, LineItem, Totals};
use crate::error::QuoteError;
use crate::ids::{CartId, RequestId};

/// Lifecycle of a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, awaiting a decision.
    #[default]
    Pending,
    /// Accepted by the business.
    Confirmed,
    /// Declined by the business.
    Denied,
    /// Work finished.
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Confirmed => "confirmed",
            RequestStatus::Denied => "denied",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Confirmed => "Confirmed",
            RequestStatus::Denied => "Denied",
            RequestStatus::Completed => "Completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Denied | RequestStatus::Completed)
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Confirmed)
                | (RequestStatus::Pending, RequestStatus::Denied)
                | (RequestStatus::Confirmed, RequestStatus::Completed)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checked-out cart, as handed to the submission collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRequest {
    pub id: RequestId,
    /// Session the cart belonged to.
    pub session_id: String,
    pub cart_id: CartId,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuoteRequest {
    /// Snapshot a cart into a pending request.
    pub fn from_cart(
        session_id: impl Into<String>,
        cart: &Cart,
        policy: &CartPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RequestId::generate(),
            session_id: session_id.into(),
            cart_id: cart.id.clone(),
            items: cart.items.clone(),
            totals: cart.totals(policy),
            status: RequestStatus::Pending,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow.
    pub fn transition(&mut self, next: RequestStatus) -> Result<(), QuoteError> {
        if !self.status.can_transition_to(next) {
            return Err(QuoteError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Receives checked-out requests.
pub trait Submitter {
    fn submit(&mut self, request: &QuoteRequest) -> Result<(), QuoteError>;
}

/// Collects requests in memory.
impl Submitter for Vec<QuoteRequest> {
    fn submit(&mut self, request: &QuoteRequest) -> Result<(), QuoteError> {
        self.push(request.clone());
        Ok(())
    }
}

impl<T: Submitter + ?Sized> Submitter for &mut T {
    fn submit(&mut self, request: &QuoteRequest) -> Result<(), QuoteError> {
        (**self).submit(request)
    }
}
