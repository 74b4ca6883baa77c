use crate::error::HexGridError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses an extent geometry string, auto-detecting WKT or GeoJSON.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, HexGridError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(HexGridError::GeometryParseError(
            "Geometry string is empty".to_string(),
        ));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry, feature or feature collection.
///
/// A feature collection is folded into a `GeometryCollection` so its
/// overall bounding rectangle can serve as an extent.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, HexGridError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| HexGridError::GeometryParseError(e.to_string()))?;

    let to_geo = |g: geojson::Geometry| {
        Geometry::try_from(g).map_err(|e| HexGridError::GeometryParseError(e.to_string()))
    };

    match geojson {
        GeoJson::Geometry(geom) => to_geo(geom),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| HexGridError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(to_geo),
        GeoJson::FeatureCollection(fc) => {
            let geoms = fc
                .features
                .into_iter()
                .filter_map(|f| f.geometry)
                .map(to_geo)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(geo_types::GeometryCollection(
                geoms,
            )))
        }
    }
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, HexGridError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| HexGridError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        HexGridError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), HexGridError> {
        let geom = parse_geometry("POLYGON((0 0, 100 0, 100 50, 0 50, 0 0))")?;
        match geom {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 5),
            _ => panic!("Expected Polygon"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), HexGridError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[500000,6970000],[502000,6972000]]}}"#;
        let geom = parse_geometry(json)?;
        assert!(matches!(geom, Geometry::LineString(_)));
        Ok(())
    }

    #[test]
    fn test_parse_feature_collection() -> Result<(), HexGridError> {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,2]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[5,9]}}
        ]}"#;
        match parse_geometry(json)? {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0.len(), 2),
            _ => panic!("Expected GeometryCollection"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_geometry("not a geometry"),
            Err(HexGridError::GeometryParseError(_))
        ));
        assert!(matches!(
            parse_geometry("   "),
            Err(HexGridError::GeometryParseError(_))
        ));
    }
}
