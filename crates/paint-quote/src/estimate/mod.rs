//! Dimensional cost estimation.
//!
//! Contains surface types, the estimator functions, the priced breakdown
//! and form validation.

mod breakdown;
mod estimator;
pub mod input;
mod surface;

pub use breakdown::{EstimateBreakdown, SurfaceMeasure};
pub use estimator::{
    estimate, estimate_fixed_count, estimate_linear_run, estimate_room, estimate_units,
};
pub use input::{FixedCountForm, LinearRunForm, RoomForm, MAX_UNIT_COUNT};
pub use surface::{
    BaseboardProfile, FixedCountSpec, LinearRunSpec, RoomOptions, RoomSpec, SurfaceSpec,
    TrimProfile, UnitKind, UnitOptions,
};
