//! Quote cart module.
//!
//! Contains the cart, line items, merge-on-add and derived totals.

mod cart;
mod totals;

pub use cart::{Cart, LineItem};
pub use totals::{CartPolicy, Totals, TravelMode};
