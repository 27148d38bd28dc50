//! Persisted cart sessions.
//!
//! A [`CartSession`] owns one cart for one visitor and writes a
//! [`CartSnapshot`] to a [`KvStore`] after every change. Snapshots older than
//! the flow's freshness window are discarded when the session is opened.
//! Persistence is best-effort: failures are logged and the in-memory cart
//! stays authoritative.

use chrono::{DateTime, Duration, Utc};
use paint_cache::{KvStore, Session, SessionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::{Cart, Totals};
use crate::checkout::{check_eligibility, Eligibility, QuoteRequest, Submitter};
use crate::config::{QuoteConfig, SessionConfig};
use crate::error::QuoteError;
use crate::estimate::EstimateBreakdown;
use crate::ids::LineItemId;
use crate::service::ServiceRequest;

/// Which booking flow a cart belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Multi-service booking.
    #[default]
    Booking,
    /// Quote for one service.
    SingleService,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Booking => "booking",
            FlowKind::SingleService => "single_service",
        }
    }

    /// How long a saved cart for this flow stays usable.
    pub fn freshness(&self, config: &SessionConfig) -> Duration {
        let hours = match self {
            FlowKind::Booking => config.booking_freshness_hours,
            FlowKind::SingleService => config.single_service_freshness_hours,
        };
        Duration::hours(i64::from(hours))
    }

    fn namespace(&self) -> String {
        format!("cart.{}", self.as_str())
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What gets written to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    pub cart: Cart,
    pub totals: Totals,
    pub flow: FlowKind,
    pub saved_at: DateTime<Utc>,
}

/// A visitor's cart bound to a store.
pub struct CartSession<S: KvStore> {
    id: SessionId,
    flow: FlowKind,
    config: QuoteConfig,
    cart: Cart,
    sessions: Session<CartSnapshot, S>,
}

impl<S: KvStore> CartSession<S> {
    /// Open the session, restoring a fresh snapshot if one exists.
    pub fn open(config: QuoteConfig, store: S, id: SessionId, flow: FlowKind) -> Self {
        Self::open_at(config, store, id, flow, Utc::now())
    }

    /// Open the session as of `now`.
    pub fn open_at(
        config: QuoteConfig,
        store: S,
        id: SessionId,
        flow: FlowKind,
        now: DateTime<Utc>,
    ) -> Self {
        let sessions: Session<CartSnapshot, S> =
            Session::with_namespace(store, flow.namespace());
        let max_age = flow.freshness(&config.session);

        let cart = match sessions.get_fresh(&id, max_age, now) {
            Ok(Some(snapshot)) => {
                info!(
                    session = %id,
                    flow = %flow,
                    items = snapshot.cart.len(),
                    "restored cart"
                );
                snapshot.cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(session = %id, error = %e, "failed to load cart, starting empty");
                Cart::new()
            }
        };

        Self {
            id,
            flow,
            config,
            cart,
            sessions,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Price a request without adding it.
    pub fn preview(&self, request: &ServiceRequest) -> Result<EstimateBreakdown, QuoteError> {
        request.estimate(&self.config.rates)
    }

    /// Add a request to the cart and persist.
    pub fn add(&mut self, request: ServiceRequest) -> Result<LineItemId, QuoteError> {
        let id = self.cart.add_item(&self.config.rates, request)?;
        self.persist();
        Ok(id)
    }

    /// Replace an item's configuration and persist.
    pub fn update(
        &mut self,
        line_item_id: &LineItemId,
        request: ServiceRequest,
    ) -> Result<(), QuoteError> {
        self.cart
            .update_item(&self.config.rates, line_item_id, request)?;
        self.persist();
        Ok(())
    }

    /// Remove an item and persist. Returns whether it was present.
    pub fn remove(&mut self, line_item_id: &LineItemId) -> bool {
        let removed = self.cart.remove_item(line_item_id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals(&self.config.cart)
    }

    pub fn eligibility(&self) -> Eligibility {
        check_eligibility(&self.cart, &self.config.checkout)
    }

    /// Submit the cart and start a new one.
    ///
    /// The cart is left untouched if it is not eligible or the submitter
    /// fails.
    pub fn checkout<T: Submitter + ?Sized>(
        &mut self,
        submitter: &mut T,
    ) -> Result<QuoteRequest, QuoteError> {
        self.eligibility().into_result()?;

        let request =
            QuoteRequest::from_cart(self.id.as_str(), &self.cart, &self.config.cart, Utc::now());
        submitter.submit(&request)?;

        info!(
            session = %self.id,
            request = %request.id,
            items = request.item_count(),
            total = %request.totals.grand_total,
            "submitted quote request"
        );

        self.cart = Cart::new();
        self.persist();
        Ok(request)
    }

    fn persist(&self) {
        let now = Utc::now();
        let snapshot = CartSnapshot {
            cart: self.cart.clone(),
            totals: self.totals(),
            flow: self.flow,
            saved_at: now,
        };
        match self.sessions.set_at(&self.id, &snapshot, now) {
            Ok(version) => debug!(session = %self.id, version, "saved cart"),
            Err(e) => warn!(session = %self.id, error = %e, "failed to save cart"),
        }
    }
}

impl<S: KvStore> std::fmt::Debug for CartSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("id", &self.id)
            .field("flow", &self.flow)
            .field("items", &self.cart.len())
            .finish()
    }
}
