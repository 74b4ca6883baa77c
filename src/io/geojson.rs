use crate::error::HexGridError;
use crate::io::arrow::FeatureSource;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Legacy named `crs` member, e.g. `urn:ogc:def:crs:EPSG::27700`.
fn named_crs(epsg: u32) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert(
        "name".to_string(),
        JsonValue::from(format!("urn:ogc:def:crs:EPSG::{}", epsg)),
    );
    let mut crs = JsonObject::new();
    crs.insert("type".to_string(), JsonValue::from("name"));
    crs.insert("properties".to_string(), JsonValue::Object(properties));

    let mut members = JsonObject::new();
    members.insert("crs".to_string(), JsonValue::Object(crs));
    members
}

pub trait HexFeaturesToGeoJson {
    /// Builds a FeatureCollection with `id`, `size`, `key` and `family` properties.
    ///
    /// With an EPSG code the collection also carries a named `crs` member.
    fn to_feature_collection(&self, epsg: Option<u32>) -> FeatureCollection;
    fn to_geojson(&self, path: impl AsRef<Path>, epsg: Option<u32>) -> Result<(), HexGridError>;
}

impl<T: FeatureSource + ?Sized> HexFeaturesToGeoJson for T {
    fn to_feature_collection(&self, epsg: Option<u32>) -> FeatureCollection {
        let features = self
            .feature_rows()
            .into_iter()
            .map(|(key, hex)| {
                let mut properties = JsonObject::new();
                properties.insert("id".to_string(), JsonValue::from(key.local_id));
                properties.insert("size".to_string(), JsonValue::from(key.radius));
                properties.insert("key".to_string(), JsonValue::from(key.encode()));
                properties.insert("family".to_string(), JsonValue::from(hex.family.as_str()));

                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::from(&hex.to_polygon())),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: epsg.map(named_crs),
        }
    }

    fn to_geojson(&self, path: impl AsRef<Path>, epsg: Option<u32>) -> Result<(), HexGridError> {
        let path = path.as_ref();
        let collection = self.to_feature_collection(epsg);

        let file = File::create(path).map_err(|e| HexGridError::IoError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &collection)
            .map_err(|e| HexGridError::IoError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| HexGridError::IoError(e.to_string()))?;

        info!(
            "wrote {} hexagons to {}",
            collection.features.len(),
            path.display()
        );
        Ok(())
    }
}
