//! Checkout module.
//!
//! Contains the eligibility gate and the request handed off at checkout.

mod eligibility;
mod request;

pub use eligibility::{check_eligibility, CheckoutPolicy, Eligibility, EMPTY_CART_MESSAGE};
pub use request::{QuoteRequest, RequestStatus, Submitter};
