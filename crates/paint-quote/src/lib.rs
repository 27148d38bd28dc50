//! Estimate and cart engine for residential painting quotes.
//!
//! This crate turns room dimensions and unit counts into priced quotes:
//!
//! - **Estimate**: labor hours, setup, paint gallons and dollar breakdowns
//! - **Cart**: line items, merge-on-add for doors, travel and discount totals
//! - **Checkout**: eligibility rules and the request handed off on submit
//! - **Session**: carts persisted between visits (feature `storage`)
//!
//! # Example
//!
//! ```rust,ignore
//! use paint_quote::prelude::*;
//!
//! let rates = RateTable::default();
//! let room = RoomSpec::new(12.0, 10.0, 9.0).with_options(RoomOptions {
//!     include_ceiling: true,
//!     ..RoomOptions::default()
//! });
//!
//! let mut cart = Cart::new();
//! cart.add_item(&rates, ServiceRequest::single(ServiceKind::InteriorRoom, room))?;
//!
//! let totals = cart.totals(&CartPolicy::default());
//! println!("Total: {}", totals.grand_total.display()); // $696.00
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod rates;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod estimate;
pub mod service;
#[cfg(feature = "storage")]
pub mod session;

pub use error::{QuoteError, ValidationError};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{QuoteError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::rates::RateTable;

    // Estimate
    pub use crate::estimate::{
        estimate, BaseboardProfile, EstimateBreakdown, FixedCountForm, FixedCountSpec,
        LinearRunForm, LinearRunSpec, RoomForm, RoomOptions, RoomSpec, SurfaceSpec, TrimProfile,
        UnitKind, UnitOptions,
    };
    pub use crate::service::{ServiceFamily, ServiceKind, ServiceRequest};

    // Cart
    pub use crate::cart::{Cart, CartPolicy, LineItem, Totals, TravelMode};

    // Checkout
    pub use crate::checkout::{
        check_eligibility, CheckoutPolicy, Eligibility, QuoteRequest, RequestStatus, Submitter,
    };

    pub use crate::config::{QuoteConfig, SessionConfig};

    #[cfg(feature = "storage")]
    pub use crate::session::{CartSession, CartSnapshot, FlowKind};
}
