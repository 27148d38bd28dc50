//! Services offered in the cart and the surfaces each one accepts.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::estimate::{
    self, EstimateBreakdown, FixedCountSpec, SurfaceSpec, UnitKind, UnitOptions,
};
use crate::rates::RateTable;

/// A bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// One interior room.
    InteriorRoom,
    /// Several bedrooms priced together.
    Bedrooms,
    /// One or more cabinet sections.
    Cabinets,
    /// Interior doors, priced per door.
    InteriorDoors,
    /// Exterior doors, priced per door.
    ExteriorDoors,
    /// Stand-alone baseboard or crown run.
    TrimRun,
}

/// Groups of services that share checkout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceFamily {
    Rooms,
    Cabinets,
    Doors,
    Trim,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::InteriorRoom,
        ServiceKind::Bedrooms,
        ServiceKind::Cabinets,
        ServiceKind::InteriorDoors,
        ServiceKind::ExteriorDoors,
        ServiceKind::TrimRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::InteriorRoom => "interior_room",
            ServiceKind::Bedrooms => "bedrooms",
            ServiceKind::Cabinets => "cabinets",
            ServiceKind::InteriorDoors => "interior_doors",
            ServiceKind::ExteriorDoors => "exterior_doors",
            ServiceKind::TrimRun => "trim_run",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::InteriorRoom => "Interior Room",
            ServiceKind::Bedrooms => "Bedrooms",
            ServiceKind::Cabinets => "Cabinets",
            ServiceKind::InteriorDoors => "Interior Doors",
            ServiceKind::ExteriorDoors => "Exterior Doors",
            ServiceKind::TrimRun => "Trim",
        }
    }

    pub fn family(&self) -> ServiceFamily {
        match self {
            ServiceKind::InteriorRoom | ServiceKind::Bedrooms => ServiceFamily::Rooms,
            ServiceKind::Cabinets => ServiceFamily::Cabinets,
            ServiceKind::InteriorDoors | ServiceKind::ExteriorDoors => ServiceFamily::Doors,
            ServiceKind::TrimRun => ServiceFamily::Trim,
        }
    }

    /// Whether adding a matching configuration increases an existing item's
    /// count instead of appending a new item.
    pub fn is_combinable(&self) -> bool {
        self.family() == ServiceFamily::Doors
    }

    /// Whether the service takes any number of units.
    pub fn is_multi_unit(&self) -> bool {
        matches!(self, ServiceKind::Bedrooms | ServiceKind::Cabinets)
    }

    /// Whether `unit` is a surface this service can price.
    fn accepts(&self, unit: &SurfaceSpec) -> bool {
        match (self, unit) {
            (ServiceKind::InteriorRoom | ServiceKind::Bedrooms, SurfaceSpec::Room(_)) => true,
            (ServiceKind::TrimRun, SurfaceSpec::LinearRun(_)) => true,
            (ServiceKind::Cabinets, SurfaceSpec::FixedCount(c)) => c.kind == UnitKind::CabinetFace,
            (ServiceKind::InteriorDoors, SurfaceSpec::FixedCount(c)) => {
                c.kind == UnitKind::InteriorDoor
            }
            (ServiceKind::ExteriorDoors, SurfaceSpec::FixedCount(c)) => {
                c.kind == UnitKind::ExteriorDoor
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized service configuration ready to be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service: ServiceKind,
    pub units: Vec<SurfaceSpec>,
}

impl ServiceRequest {
    pub fn new(service: ServiceKind, units: Vec<SurfaceSpec>) -> Self {
        Self { service, units }
    }

    /// A single-unit request.
    pub fn single(service: ServiceKind, unit: impl Into<SurfaceSpec>) -> Self {
        Self::new(service, vec![unit.into()])
    }

    /// Check that the units fit the service.
    pub fn check(&self) -> Result<(), QuoteError> {
        let mismatch = |found: String| QuoteError::UnitMismatch {
            service: self.service.to_string(),
            found,
        };

        if self.units.is_empty() {
            return Err(mismatch("no surfaces".to_string()));
        }
        if !self.service.is_multi_unit() && self.units.len() != 1 {
            return Err(mismatch(format!("{} surfaces", self.units.len())));
        }
        if let Some(unit) = self.units.iter().find(|u| !self.service.accepts(u)) {
            let found = match unit {
                SurfaceSpec::FixedCount(c) => format!("a {} count", c.kind.as_str()),
                other => format!("a {}", other.label()),
            };
            return Err(mismatch(found));
        }
        Ok(())
    }

    /// Check and price the request.
    pub fn estimate(&self, rates: &RateTable) -> Result<EstimateBreakdown, QuoteError> {
        self.check()?;
        estimate::estimate_units(rates, &self.units)
            .ok_or_else(|| QuoteError::NotComputable(self.service.to_string()))
    }

    /// Total counted units across fixed-count surfaces.
    pub fn unit_count(&self) -> u32 {
        count_units(&self.units)
    }

    /// The merge key, if this request is combinable.
    pub fn merge_key(&self) -> Option<MergeKey> {
        MergeKey::of(self.service, &self.units)
    }
}

/// Sum of fixed-count units, saturating at `u32::MAX`; rooms and runs
/// count as zero.
pub(crate) fn count_units(units: &[SurfaceSpec]) -> u32 {
    units
        .iter()
        .map(|unit| match unit {
            SurfaceSpec::FixedCount(c) => c.count,
            _ => 0,
        })
        .fold(0, u32::saturating_add)
}

/// Configuration identity for merge-on-add: same service, same unit kind,
/// same add-on flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub service: ServiceKind,
    pub kind: UnitKind,
    pub options: UnitOptions,
}

impl MergeKey {
    /// Key for a combinable service priced from exactly one fixed count.
    pub fn of(service: ServiceKind, units: &[SurfaceSpec]) -> Option<MergeKey> {
        if !service.is_combinable() {
            return None;
        }
        match units {
            [SurfaceSpec::FixedCount(c)] => Some(MergeKey {
                service,
                kind: c.kind,
                options: c.options,
            }),
            _ => None,
        }
    }

    /// The request for `count` units of this configuration.
    pub fn request(&self, count: u32) -> ServiceRequest {
        ServiceRequest::single(
            self.service,
            FixedCountSpec::new(self.kind, count).with_options(self.options),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{LinearRunSpec, RoomSpec, TrimProfile};

    #[test]
    fn test_families() {
        assert_eq!(ServiceKind::InteriorDoors.family(), ServiceFamily::Doors);
        assert_eq!(ServiceKind::ExteriorDoors.family(), ServiceFamily::Doors);
        assert_eq!(ServiceKind::Bedrooms.family(), ServiceFamily::Rooms);
        assert!(ServiceKind::ExteriorDoors.is_combinable());
        assert!(!ServiceKind::TrimRun.is_combinable());
    }

    #[test]
    fn test_check_rejects_wrong_surface() {
        let request = ServiceRequest::single(
            ServiceKind::InteriorDoors,
            FixedCountSpec::new(UnitKind::ExteriorDoor, 1),
        );
        assert!(matches!(request.check(), Err(QuoteError::UnitMismatch { .. })));

        let request = ServiceRequest::single(
            ServiceKind::TrimRun,
            RoomSpec::new(10.0, 10.0, 8.0),
        );
        assert!(request.check().is_err());
    }

    #[test]
    fn test_unit_count_saturates() {
        let request = ServiceRequest::new(
            ServiceKind::InteriorDoors,
            vec![
                FixedCountSpec::new(UnitKind::InteriorDoor, u32::MAX).into(),
                FixedCountSpec::new(UnitKind::InteriorDoor, 2).into(),
            ],
        );
        assert_eq!(request.unit_count(), u32::MAX);
    }

    #[test]
    fn test_single_unit_services_take_one_surface() {
        let request = ServiceRequest::new(
            ServiceKind::InteriorRoom,
            vec![
                RoomSpec::new(10.0, 10.0, 8.0).into(),
                RoomSpec::new(12.0, 10.0, 8.0).into(),
            ],
        );
        assert!(request.check().is_err());

        let request = ServiceRequest::new(
            ServiceKind::Bedrooms,
            vec![
                RoomSpec::new(10.0, 10.0, 8.0).into(),
                RoomSpec::new(12.0, 10.0, 8.0).into(),
            ],
        );
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_estimate_not_computable() {
        let request = ServiceRequest::single(
            ServiceKind::TrimRun,
            LinearRunSpec::new(0.0, TrimProfile::BaseboardLow),
        );
        assert!(matches!(
            request.estimate(&RateTable::default()),
            Err(QuoteError::NotComputable(_))
        ));
    }

    #[test]
    fn test_merge_key_only_for_doors() {
        let doors = ServiceRequest::single(
            ServiceKind::InteriorDoors,
            FixedCountSpec::new(UnitKind::InteriorDoor, 2),
        );
        let key = doors.merge_key().unwrap();
        assert_eq!(key.kind, UnitKind::InteriorDoor);
        assert_eq!(doors.unit_count(), 2);

        let cabinets = ServiceRequest::single(
            ServiceKind::Cabinets,
            FixedCountSpec::new(UnitKind::CabinetFace, 2),
        );
        assert!(cabinets.merge_key().is_none());
    }
}
