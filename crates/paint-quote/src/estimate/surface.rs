//! Surface descriptions accepted by the estimator.

use serde::{Deserialize, Serialize};

/// One measurable thing to paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceSpec {
    /// A rectangular room.
    Room(RoomSpec),
    /// A run of trim measured in linear feet.
    LinearRun(LinearRunSpec),
    /// A counted set of identical units (doors, cabinet faces).
    FixedCount(FixedCountSpec),
}

impl SurfaceSpec {
    /// Short name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceSpec::Room(_) => "room",
            SurfaceSpec::LinearRun(_) => "linear run",
            SurfaceSpec::FixedCount(_) => "fixed count",
        }
    }
}

impl From<RoomSpec> for SurfaceSpec {
    fn from(room: RoomSpec) -> Self {
        SurfaceSpec::Room(room)
    }
}

impl From<LinearRunSpec> for SurfaceSpec {
    fn from(run: LinearRunSpec) -> Self {
        SurfaceSpec::LinearRun(run)
    }
}

impl From<FixedCountSpec> for SurfaceSpec {
    fn from(count: FixedCountSpec) -> Self {
        SurfaceSpec::FixedCount(count)
    }
}

/// Room dimensions in feet plus option flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub options: RoomOptions,
}

impl RoomSpec {
    /// A room with walls only, two coats.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
            options: RoomOptions::default(),
        }
    }

    /// Replace the option set.
    pub fn with_options(mut self, options: RoomOptions) -> Self {
        self.options = options;
        self
    }

    /// Wall area: `2 × (l×h + w×h)`.
    pub fn wall_area(&self) -> f64 {
        2.0 * (self.length * self.height + self.width * self.height)
    }

    /// Ceiling area: `l × w`.
    pub fn ceiling_area(&self) -> f64 {
        self.length * self.width
    }

    /// Perimeter for baseboard and crown: `2 × (l + w)`.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }
}

/// Baseboard height class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseboardProfile {
    Low,
    High,
}

/// Add-ons for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomOptions {
    /// Two coats on the walls (one coat otherwise).
    pub two_coats: bool,
    pub include_ceiling: bool,
    /// Textured ceiling; only priced when the ceiling is included.
    pub stucco_ceiling: bool,
    /// Baseboards, if included, and their profile.
    pub baseboard: Option<BaseboardProfile>,
    pub crown_molding: bool,
    pub door_count: u32,
    pub window_count: u32,
    pub closet_count: u32,
    /// Second colour on one wall (flat fee).
    pub accent_wall: bool,
    /// Attached bathroom (flat fee).
    pub ensuite: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            two_coats: true,
            include_ceiling: false,
            stucco_ceiling: false,
            baseboard: None,
            crown_molding: false,
            door_count: 0,
            window_count: 0,
            closet_count: 0,
            accent_wall: false,
            ensuite: false,
        }
    }
}

/// Trim profile for a stand-alone linear run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimProfile {
    #[default]
    BaseboardLow,
    BaseboardHigh,
    CrownMolding,
}

/// A length of trim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRunSpec {
    /// Linear feet.
    pub length: f64,
    #[serde(default)]
    pub profile: TrimProfile,
}

impl LinearRunSpec {
    pub fn new(length: f64, profile: TrimProfile) -> Self {
        Self { length, profile }
    }
}

/// Kinds of counted units, each with its own rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    InteriorDoor,
    ExteriorDoor,
    CabinetFace,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::InteriorDoor => "interior_door",
            UnitKind::ExteriorDoor => "exterior_door",
            UnitKind::CabinetFace => "cabinet_face",
        }
    }
}

/// Per-unit add-ons. Two fixed-count requests are the same configuration
/// only when every flag matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitOptions {
    /// Paint the frame / casing.
    pub frame: bool,
    /// Paint both faces.
    pub both_sides: bool,
    /// Remove and refit hardware.
    pub hardware: bool,
}

/// A number of identical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCountSpec {
    pub kind: UnitKind,
    pub count: u32,
    #[serde(default)]
    pub options: UnitOptions,
}

impl FixedCountSpec {
    pub fn new(kind: UnitKind, count: u32) -> Self {
        Self {
            kind,
            count,
            options: UnitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UnitOptions) -> Self {
        self.options = options;
        self
    }
}
