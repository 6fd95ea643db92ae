use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::Result;
use crate::geo::{
    GeoAddOptions, GeoOrigin, GeoSearchResultOptions, GeoSearchStoreResultOptions, GeoShape,
    GeoUnit, GeospatialData,
};
use crate::normalize::Entries;

/// `GEOADD key [NX|XX] [CH] lon lat member [lon lat member ...]`
pub fn create_geoadd(
    key: impl AsRef<[u8]>,
    members: Entries<GeospatialData>,
    options: GeoAddOptions,
) -> Result<CommandSpec> {
    let members = members.normalize()?;
    super::non_empty("members", &members)?;
    let mut cmd = Builder::new(RequestType::GeoAdd);
    cmd.arg(key);
    options.encode(&mut cmd);
    for (member, position) in members {
        position.encode(&mut cmd)?;
        cmd.token(member);
    }
    Ok(cmd.finish())
}

pub fn create_geopos<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::GeoPos);
    cmd.arg(key).args(members);
    cmd.finish()
}

/// `GEODIST key member1 member2 [m|km|mi|ft]`
pub fn create_geodist(
    key: impl AsRef<[u8]>,
    member1: impl AsRef<[u8]>,
    member2: impl AsRef<[u8]>,
    unit: Option<GeoUnit>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::GeoDist);
    cmd.arg(key).arg(member1).arg(member2);
    if let Some(unit) = unit {
        cmd.keyword(unit.as_bytes());
    }
    cmd.finish()
}

pub fn create_geohash<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::GeoHash);
    cmd.arg(key).args(members);
    cmd.finish()
}

/// `GEOSEARCH key FROMMEMBER m|FROMLONLAT lon lat BYRADIUS r u|BYBOX w h u
/// [WITHCOORD] [WITHDIST] [WITHHASH] [COUNT n [ANY]] [ASC|DESC]`
pub fn create_geosearch(
    key: impl AsRef<[u8]>,
    origin: &GeoOrigin,
    shape: &GeoShape,
    options: &GeoSearchResultOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::GeoSearch);
    cmd.arg(key);
    origin.encode(&mut cmd)?;
    shape.encode(&mut cmd)?;
    options.encode(&mut cmd);
    Ok(cmd.finish())
}

/// `GEOSEARCHSTORE destination source <origin> <shape> [STOREDIST] [COUNT n [ANY]] [ASC|DESC]`
pub fn create_geosearchstore(
    destination: impl AsRef<[u8]>,
    source: impl AsRef<[u8]>,
    origin: &GeoOrigin,
    shape: &GeoShape,
    options: &GeoSearchStoreResultOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::GeoSearchStore);
    cmd.arg(destination).arg(source);
    origin.encode(&mut cmd)?;
    shape.encode(&mut cmd)?;
    options.encode(&mut cmd);
    Ok(cmd.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{ConditionalChange, SortOrder};

    #[test]
    fn test_geoadd() {
        let members = Entries::pairs([
            ("Palermo", GeospatialData::new(13.361389, 38.115556)),
            ("Catania", GeospatialData::new(15.087269, 37.502669)),
        ]);
        let opts = GeoAddOptions {
            update_mode: Some(ConditionalChange::OnlyIfDoesNotExist),
            changed: false,
        };
        let cmd = create_geoadd("Sicily", members, opts).unwrap();
        assert_eq!(
            cmd.args(),
            &[
                "Sicily", "NX", "13.361389", "38.115556", "Palermo", "15.087269", "37.502669",
                "Catania"
            ]
        );
    }

    #[test]
    fn test_geoadd_rejects_out_of_range() {
        let members = Entries::pairs([("x", GeospatialData::new(0.0, 89.0))]);
        let err = create_geoadd("k", members, GeoAddOptions::default()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_geodist() {
        assert_eq!(
            create_geodist("k", "a", "b", Some(GeoUnit::Miles)).args(),
            &["k", "a", "b", "mi"]
        );
        assert_eq!(create_geodist("k", "a", "b", None).args(), &["k", "a", "b"]);
    }

    #[test]
    fn test_geosearch() {
        let opts = GeoSearchResultOptions {
            with_dist: true,
            count: Some((3, false)),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let cmd = create_geosearch(
            "Sicily",
            &GeoOrigin::member("Palermo"),
            &GeoShape::rectangle(400.0, 400.0, GeoUnit::Kilometers).unwrap(),
            &opts,
        )
        .unwrap();
        assert_eq!(
            cmd.args(),
            &[
                "Sicily", "FROMMEMBER", "Palermo", "BYBOX", "400", "400", "km", "WITHDIST",
                "COUNT", "3", "DESC"
            ]
        );
    }

    #[test]
    fn test_geosearchstore() {
        let opts = GeoSearchStoreResultOptions {
            store_dist: true,
            count: Some((1, true)),
            sort_order: None,
        };
        let cmd = create_geosearchstore(
            "dst",
            "src",
            &GeoOrigin::coordinate(15.0, 37.0),
            &GeoShape::circle(100.0, GeoUnit::Meters).unwrap(),
            &opts,
        )
        .unwrap();
        assert_eq!(
            cmd.args(),
            &[
                "dst", "src", "FROMLONLAT", "15", "37", "BYRADIUS", "100", "m", "STOREDIST",
                "COUNT", "1", "ANY"
            ]
        );
    }

    #[test]
    fn test_geosearch_bad_origin() {
        let err = create_geosearch(
            "k",
            &GeoOrigin::coordinate(f64::NAN, 0.0),
            &GeoShape::circle(1.0, GeoUnit::Meters).unwrap(),
            &GeoSearchResultOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
