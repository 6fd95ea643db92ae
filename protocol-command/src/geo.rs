//! Geospatial search origins, shapes, and option groups.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::command::Builder;
use crate::error::{Error, Result, invalid_argument};
use crate::token;

/// Longitude limits accepted by the server.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Latitude limit accepted by the server (the Web Mercator cutoff).
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl GeoUnit {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            GeoUnit::Meters => b"m",
            GeoUnit::Kilometers => b"km",
            GeoUnit::Miles => b"mi",
            GeoUnit::Feet => b"ft",
        }
    }
}

impl fmt::Display for GeoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        };
        f.write_str(s)
    }
}

impl FromStr for GeoUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(GeoUnit::Meters),
            "km" => Ok(GeoUnit::Kilometers),
            "mi" => Ok(GeoUnit::Miles),
            "ft" => Ok(GeoUnit::Feet),
            other => Err(invalid_argument(format!("unknown geo unit {other:?}"))),
        }
    }
}

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeospatialData {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeospatialData {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Check that both coordinates are finite and inside the indexable area.
    pub fn validate(&self) -> Result<()> {
        let lon = token::finite("longitude", self.longitude)?;
        let lat = token::finite("latitude", self.latitude)?;
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&lon) {
            return Err(invalid_argument(format!(
                "longitude {lon} outside [-{MAX_LONGITUDE}, {MAX_LONGITUDE}]"
            )));
        }
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&lat) {
            return Err(invalid_argument(format!(
                "latitude {lat} outside [-{MAX_LATITUDE}, {MAX_LATITUDE}]"
            )));
        }
        Ok(())
    }

    /// Append `longitude latitude`.
    pub(crate) fn encode(&self, cmd: &mut Builder) -> Result<()> {
        self.validate()?;
        cmd.float(self.longitude).float(self.latitude);
        Ok(())
    }
}

/// Center of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoOrigin {
    /// `FROMLONLAT lon lat`
    Coordinate(GeospatialData),
    /// `FROMMEMBER member`
    Member(Bytes),
}

impl GeoOrigin {
    pub fn coordinate(longitude: f64, latitude: f64) -> Self {
        GeoOrigin::Coordinate(GeospatialData::new(longitude, latitude))
    }

    pub fn member(member: impl AsRef<[u8]>) -> Self {
        GeoOrigin::Member(token::bytes(member))
    }

    pub(crate) fn encode(&self, cmd: &mut Builder) -> Result<()> {
        match self {
            GeoOrigin::Coordinate(position) => {
                cmd.keyword(b"FROMLONLAT");
                position.encode(cmd)?;
            }
            GeoOrigin::Member(member) => {
                cmd.keyword(b"FROMMEMBER").token(member.clone());
            }
        }
        Ok(())
    }
}

/// Area of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoShape {
    /// `BYRADIUS radius unit`
    Circle { radius: f64, unit: GeoUnit },
    /// `BYBOX width height unit`
    Box {
        width: f64,
        height: f64,
        unit: GeoUnit,
    },
}

impl GeoShape {
    pub fn circle(radius: f64, unit: GeoUnit) -> Result<Self> {
        let radius = dimension("radius", radius)?;
        Ok(GeoShape::Circle { radius, unit })
    }

    pub fn rectangle(width: f64, height: f64, unit: GeoUnit) -> Result<Self> {
        let width = dimension("width", width)?;
        let height = dimension("height", height)?;
        Ok(GeoShape::Box {
            width,
            height,
            unit,
        })
    }

    pub(crate) fn encode(&self, cmd: &mut Builder) -> Result<()> {
        match *self {
            GeoShape::Circle { radius, unit } => {
                let radius = dimension("radius", radius)?;
                cmd.keyword(b"BYRADIUS")
                    .float(radius)
                    .keyword(unit.as_bytes());
            }
            GeoShape::Box {
                width,
                height,
                unit,
            } => {
                let width = dimension("width", width)?;
                let height = dimension("height", height)?;
                cmd.keyword(b"BYBOX")
                    .float(width)
                    .float(height)
                    .keyword(unit.as_bytes());
            }
        }
        Ok(())
    }
}

fn dimension(name: &str, value: f64) -> Result<f64> {
    let value = token::finite(name, value)?;
    if value < 0.0 {
        return Err(invalid_argument(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(value)
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            SortOrder::Asc => b"ASC",
            SortOrder::Desc => b"DESC",
        }
    }
}

/// `NX` / `XX` for commands that add or update members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalChange {
    /// Only update existing members.
    OnlyIfExists,
    /// Only add new members.
    OnlyIfDoesNotExist,
}

impl ConditionalChange {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            ConditionalChange::OnlyIfExists => b"XX",
            ConditionalChange::OnlyIfDoesNotExist => b"NX",
        }
    }
}

/// Options for GEOADD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeoAddOptions {
    pub update_mode: Option<ConditionalChange>,
    /// Return the number of changed members rather than added ones (`CH`).
    pub changed: bool,
}

impl GeoAddOptions {
    pub(crate) fn encode(&self, cmd: &mut Builder) {
        if let Some(mode) = self.update_mode {
            cmd.keyword(mode.as_bytes());
        }
        cmd.flag(self.changed, b"CH");
    }
}

/// Options for GEOSEARCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeoSearchResultOptions {
    pub with_coord: bool,
    pub with_dist: bool,
    pub with_hash: bool,
    /// `COUNT n`, with `ANY` when the flag is set.
    pub count: Option<(u64, bool)>,
    pub sort_order: Option<SortOrder>,
}

impl GeoSearchResultOptions {
    pub(crate) fn encode(&self, cmd: &mut Builder) {
        cmd.flag(self.with_coord, b"WITHCOORD")
            .flag(self.with_dist, b"WITHDIST")
            .flag(self.with_hash, b"WITHHASH");
        encode_count(cmd, self.count);
        if let Some(order) = self.sort_order {
            cmd.keyword(order.as_bytes());
        }
    }
}

/// Options for GEOSEARCHSTORE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeoSearchStoreResultOptions {
    /// Store distances instead of positions (`STOREDIST`).
    pub store_dist: bool,
    pub count: Option<(u64, bool)>,
    pub sort_order: Option<SortOrder>,
}

impl GeoSearchStoreResultOptions {
    pub(crate) fn encode(&self, cmd: &mut Builder) {
        cmd.flag(self.store_dist, b"STOREDIST");
        encode_count(cmd, self.count);
        if let Some(order) = self.sort_order {
            cmd.keyword(order.as_bytes());
        }
    }
}

fn encode_count(cmd: &mut Builder, count: Option<(u64, bool)>) {
    if let Some((count, any)) = count {
        cmd.keyword(b"COUNT").int(count).flag(any, b"ANY");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RequestType;

    #[test]
    fn test_unit_from_str() {
        assert_eq!("km".parse::<GeoUnit>().unwrap(), GeoUnit::Kilometers);
        assert_eq!("ft".parse::<GeoUnit>().unwrap(), GeoUnit::Feet);
        assert!("yd".parse::<GeoUnit>().unwrap_err().is_invalid_argument());
        assert!("KM".parse::<GeoUnit>().is_err());
    }

    #[test]
    fn test_unit_display_matches_wire() {
        for unit in [GeoUnit::Meters, GeoUnit::Kilometers, GeoUnit::Miles, GeoUnit::Feet] {
            assert_eq!(unit.to_string().as_bytes(), unit.as_bytes());
        }
    }

    #[test]
    fn test_position_validation() {
        assert!(GeospatialData::new(13.361389, 38.115556).validate().is_ok());
        assert!(GeospatialData::new(181.0, 0.0).validate().is_err());
        assert!(GeospatialData::new(0.0, 86.0).validate().is_err());
        assert!(GeospatialData::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_origin_encoding() {
        let mut cmd = Builder::new(RequestType::GeoSearch);
        GeoOrigin::coordinate(15.0, 37.5).encode(&mut cmd).unwrap();
        GeoOrigin::member("Palermo").encode(&mut cmd).unwrap();
        assert_eq!(
            cmd.finish().args(),
            &["FROMLONLAT", "15", "37.5", "FROMMEMBER", "Palermo"]
        );
    }

    #[test]
    fn test_shape_encoding() {
        let mut cmd = Builder::new(RequestType::GeoSearch);
        GeoShape::circle(200.0, GeoUnit::Kilometers)
            .unwrap()
            .encode(&mut cmd)
            .unwrap();
        GeoShape::rectangle(400.0, 250.5, GeoUnit::Meters)
            .unwrap()
            .encode(&mut cmd)
            .unwrap();
        assert_eq!(
            cmd.finish().args(),
            &["BYRADIUS", "200", "km", "BYBOX", "400", "250.5", "m"]
        );
    }

    #[test]
    fn test_shape_rejects_bad_dimensions() {
        assert!(GeoShape::circle(-1.0, GeoUnit::Meters).is_err());
        assert!(GeoShape::circle(f64::INFINITY, GeoUnit::Meters).is_err());
        assert!(GeoShape::rectangle(1.0, f64::NAN, GeoUnit::Feet).is_err());
        let sneaky = GeoShape::Circle {
            radius: -5.0,
            unit: GeoUnit::Miles,
        };
        let mut cmd = Builder::new(RequestType::GeoSearch);
        assert!(sneaky.encode(&mut cmd).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_search_result_options_order() {
        let opts = GeoSearchResultOptions {
            with_coord: true,
            with_dist: true,
            with_hash: false,
            count: Some((2, true)),
            sort_order: Some(SortOrder::Asc),
        };
        let mut cmd = Builder::new(RequestType::GeoSearch);
        opts.encode(&mut cmd);
        assert_eq!(
            cmd.finish().args(),
            &["WITHCOORD", "WITHDIST", "COUNT", "2", "ANY", "ASC"]
        );
    }

    #[test]
    fn test_add_options() {
        let opts = GeoAddOptions {
            update_mode: Some(ConditionalChange::OnlyIfExists),
            changed: true,
        };
        let mut cmd = Builder::new(RequestType::GeoAdd);
        opts.encode(&mut cmd);
        assert_eq!(cmd.finish().args(), &["XX", "CH"]);
    }
}
