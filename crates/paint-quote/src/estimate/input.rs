//! Form-level validation in front of the estimator.
//!
//! Form fields arrive as optional numbers. A missing required field means
//! the estimate is not computable yet (`Ok(None)`); a present but unusable
//! value is a [`ValidationError`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::estimate::surface::{
    BaseboardProfile, FixedCountSpec, LinearRunSpec, RoomOptions, RoomSpec, SurfaceSpec,
    TrimProfile, UnitKind, UnitOptions,
};
use crate::rates::RateTable;

fn check_dimension(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
        Some(v) => Err(ValidationError::NonPositiveDimension { field, value: v }),
    }
}

/// Largest count accepted for any counted field.
pub const MAX_UNIT_COUNT: u32 = 10_000;

fn check_count(field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    let value = value.unwrap_or(0);
    if value < 0 {
        return Err(ValidationError::NegativeCount { field, value });
    }
    u32::try_from(value)
        .ok()
        .filter(|&count| count <= MAX_UNIT_COUNT)
        .ok_or(ValidationError::CountTooLarge { field, value })
}

fn default_true() -> bool {
    true
}

/// Room form as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomForm {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default = "default_true")]
    pub two_coats: bool,
    #[serde(default)]
    pub include_ceiling: bool,
    #[serde(default)]
    pub stucco_ceiling: bool,
    #[serde(default)]
    pub baseboard: Option<BaseboardProfile>,
    #[serde(default)]
    pub crown_molding: bool,
    #[serde(default)]
    pub door_count: Option<i64>,
    #[serde(default)]
    pub window_count: Option<i64>,
    #[serde(default)]
    pub closet_count: Option<i64>,
    #[serde(default)]
    pub accent_wall: bool,
    #[serde(default)]
    pub ensuite: bool,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            length: None,
            width: None,
            height: None,
            two_coats: true,
            include_ceiling: false,
            stucco_ceiling: false,
            baseboard: None,
            crown_molding: false,
            door_count: None,
            window_count: None,
            closet_count: None,
            accent_wall: false,
            ensuite: false,
        }
    }
}

impl RoomForm {
    /// Validate into a room surface.
    ///
    /// Invalid present values are reported before missing ones, so the user
    /// sees a bad entry as soon as it is typed.
    pub fn validate(&self, rates: &RateTable) -> Result<Option<SurfaceSpec>, ValidationError> {
        let length = check_dimension("length", self.length)?;
        let width = check_dimension("width", self.width)?;
        let height = check_dimension("height", self.height)?;
        if let Some(h) = height {
            if h < rates.min_ceiling_height {
                return Err(ValidationError::CeilingTooLow {
                    value: h,
                    min: rates.min_ceiling_height,
                });
            }
        }

        let options = RoomOptions {
            two_coats: self.two_coats,
            include_ceiling: self.include_ceiling,
            stucco_ceiling: self.stucco_ceiling,
            baseboard: self.baseboard,
            crown_molding: self.crown_molding,
            door_count: check_count("door_count", self.door_count)?,
            window_count: check_count("window_count", self.window_count)?,
            closet_count: check_count("closet_count", self.closet_count)?,
            accent_wall: self.accent_wall,
            ensuite: self.ensuite,
        };

        let (Some(length), Some(width), Some(height)) = (length, width, height) else {
            return Ok(None);
        };
        Ok(Some(
            RoomSpec::new(length, width, height)
                .with_options(options)
                .into(),
        ))
    }
}

/// Trim run form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearRunForm {
    pub length: Option<f64>,
    #[serde(default)]
    pub profile: TrimProfile,
}

impl LinearRunForm {
    pub fn validate(&self) -> Result<Option<SurfaceSpec>, ValidationError> {
        Ok(check_dimension("length", self.length)?
            .map(|length| LinearRunSpec::new(length, self.profile).into()))
    }
}

/// Counted-units form (doors, cabinet faces).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCountForm {
    pub kind: UnitKind,
    pub count: Option<i64>,
    #[serde(default)]
    pub options: UnitOptions,
}

impl FixedCountForm {
    pub fn validate(&self) -> Result<Option<SurfaceSpec>, ValidationError> {
        if self.count.is_none() {
            return Ok(None);
        }
        let count = check_count("count", self.count)?;
        if count == 0 {
            return Err(ValidationError::ZeroCount { field: "count" });
        }
        Ok(Some(
            FixedCountSpec::new(self.kind, count)
                .with_options(self.options)
                .into(),
        ))
    }
}
