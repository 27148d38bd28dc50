//! Service arguments shared by `estimate` and `cart add`.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use paint_quote::estimate::{
    BaseboardProfile, FixedCountForm, LinearRunForm, RoomForm, SurfaceSpec, TrimProfile, UnitKind,
    UnitOptions,
};
use paint_quote::rates::RateTable;
use paint_quote::service::{ServiceKind, ServiceRequest};

#[derive(Subcommand)]
pub enum ServiceCommand {
    /// One interior room
    Room(RoomArgs),

    /// Several bedrooms priced together
    Bedrooms(BedroomsArgs),

    /// Cabinet faces
    Cabinets(CountArgs),

    /// Interior or exterior doors
    Doors(DoorArgs),

    /// A stand-alone baseboard or crown run
    Trim(TrimArgs),
}

/// Room measurements and options.
#[derive(Args)]
pub struct RoomArgs {
    /// Room length in feet.
    #[arg(short, long)]
    pub length: Option<f64>,

    /// Room width in feet.
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Wall height in feet.
    #[arg(short = 'H', long)]
    pub height: Option<f64>,

    #[command(flatten)]
    pub options: RoomFlags,
}

/// Options applied to every room.
#[derive(Args, Clone)]
pub struct RoomFlags {
    /// Single coat instead of two.
    #[arg(long)]
    pub one_coat: bool,

    /// Paint the ceiling.
    #[arg(long)]
    pub ceiling: bool,

    /// The ceiling is stucco.
    #[arg(long)]
    pub stucco: bool,

    /// Paint baseboards.
    #[arg(long, value_enum)]
    pub baseboard: Option<BaseboardArg>,

    /// Paint crown molding.
    #[arg(long)]
    pub crown: bool,

    /// Doors painted in place.
    #[arg(long, allow_negative_numbers = true)]
    pub doors: Option<i64>,

    /// Window frames.
    #[arg(long, allow_negative_numbers = true)]
    pub windows: Option<i64>,

    /// Closets.
    #[arg(long, allow_negative_numbers = true)]
    pub closets: Option<i64>,

    /// Add an accent wall.
    #[arg(long)]
    pub accent_wall: bool,

    /// Include an ensuite.
    #[arg(long)]
    pub ensuite: bool,
}

/// Bedroom measurements.
#[derive(Args)]
pub struct BedroomsArgs {
    /// Room as LENGTHxWIDTHxHEIGHT in feet, e.g. 12x10x8. Repeat per room.
    #[arg(long = "room", required = true, value_parser = parse_dimensions)]
    pub rooms: Vec<(f64, f64, f64)>,

    #[command(flatten)]
    pub options: RoomFlags,
}

/// A counted service with add-ons.
#[derive(Args)]
pub struct CountArgs {
    /// Number of units.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Include frames.
    #[arg(long)]
    pub frame: bool,

    /// Paint both sides.
    #[arg(long)]
    pub both_sides: bool,

    /// Remove and refit hardware.
    #[arg(long)]
    pub hardware: bool,
}

#[derive(Args)]
pub struct DoorArgs {
    /// Exterior doors instead of interior.
    #[arg(long)]
    pub exterior: bool,

    #[command(flatten)]
    pub units: CountArgs,
}

#[derive(Args)]
pub struct TrimArgs {
    /// Run length in linear feet.
    #[arg(short, long)]
    pub length: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = TrimArg::BaseboardLow)]
    pub profile: TrimArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaseboardArg {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrimArg {
    BaseboardLow,
    BaseboardHigh,
    Crown,
}

impl ServiceCommand {
    /// Validate the arguments into a priceable request.
    pub fn into_request(self, rates: &RateTable) -> Result<ServiceRequest> {
        match self {
            ServiceCommand::Room(args) => {
                let form = args.options.form(args.length, args.width, args.height);
                let spec = required(form.validate(rates)?, "length, width and height")?;
                Ok(ServiceRequest::single(ServiceKind::InteriorRoom, spec))
            }
            ServiceCommand::Bedrooms(args) => {
                let units = args
                    .rooms
                    .iter()
                    .map(|&(length, width, height)| {
                        let form = args.options.form(Some(length), Some(width), Some(height));
                        required(form.validate(rates)?, "room dimensions")
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ServiceRequest::new(ServiceKind::Bedrooms, units))
            }
            ServiceCommand::Cabinets(args) => {
                let spec = args.form(UnitKind::CabinetFace)?;
                Ok(ServiceRequest::single(ServiceKind::Cabinets, spec))
            }
            ServiceCommand::Doors(args) => {
                let (service, kind) = if args.exterior {
                    (ServiceKind::ExteriorDoors, UnitKind::ExteriorDoor)
                } else {
                    (ServiceKind::InteriorDoors, UnitKind::InteriorDoor)
                };
                let spec = args.units.form(kind)?;
                Ok(ServiceRequest::single(service, spec))
            }
            ServiceCommand::Trim(args) => {
                let form = LinearRunForm {
                    length: args.length,
                    profile: args.profile.into(),
                };
                let spec = required(form.validate()?, "--length")?;
                Ok(ServiceRequest::single(ServiceKind::TrimRun, spec))
            }
        }
    }
}

impl RoomFlags {
    fn form(&self, length: Option<f64>, width: Option<f64>, height: Option<f64>) -> RoomForm {
        RoomForm {
            length,
            width,
            height,
            two_coats: !self.one_coat,
            include_ceiling: self.ceiling,
            stucco_ceiling: self.stucco,
            baseboard: self.baseboard.map(Into::into),
            crown_molding: self.crown,
            door_count: self.doors,
            window_count: self.windows,
            closet_count: self.closets,
            accent_wall: self.accent_wall,
            ensuite: self.ensuite,
        }
    }
}

impl CountArgs {
    fn form(&self, kind: UnitKind) -> Result<SurfaceSpec> {
        let form = FixedCountForm {
            kind,
            count: self.count,
            options: UnitOptions {
                frame: self.frame,
                both_sides: self.both_sides,
                hardware: self.hardware,
            },
        };
        required(form.validate()?, "--count")
    }
}

impl From<BaseboardArg> for BaseboardProfile {
    fn from(arg: BaseboardArg) -> Self {
        match arg {
            BaseboardArg::Low => BaseboardProfile::Low,
            BaseboardArg::High => BaseboardProfile::High,
        }
    }
}

impl From<TrimArg> for TrimProfile {
    fn from(arg: TrimArg) -> Self {
        match arg {
            TrimArg::BaseboardLow => TrimProfile::BaseboardLow,
            TrimArg::BaseboardHigh => TrimProfile::BaseboardHigh,
            TrimArg::Crown => TrimProfile::CrownMolding,
        }
    }
}

fn required(spec: Option<SurfaceSpec>, what: &str) -> Result<SurfaceSpec> {
    spec.ok_or_else(|| anyhow!("Not enough information to price this yet: {} required", what))
}

/// Parse `LxWxH`, e.g. `12x10x8` or `12.5X10X8`.
pub fn parse_dimensions(s: &str) -> Result<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(['x', 'X']).map(str::trim).collect();
    let [length, width, height] = parts.as_slice() else {
        bail!("expected LENGTHxWIDTHxHEIGHT, got '{}'", s);
    };
    let parse = |v: &str| {
        v.parse::<f64>()
            .map_err(|_| anyhow!("'{}' is not a number in '{}'", v, s))
    };
    Ok((parse(*length)?, parse(*width)?, parse(*height)?))
}
