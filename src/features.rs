//! Point features for the time-animated map.

use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::classify::{RadiusScale, TierTable};
use crate::reshape::Observation;

/// Date format carried in each feature's `time` property.
pub const TIME_FORMAT: &str = "%Y-%m-%d";

/// A single drawable observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub date: NaiveDate,
    pub country: String,
    pub lat: f64,
    pub long: f64,
    pub value: u64,
    pub radius: f64,
    pub color: &'static str,
}

impl MapPoint {
    /// GeoJSON position, longitude first.
    pub fn coordinates(&self) -> Vec<f64> {
        vec![self.long, self.lat]
    }

    pub fn time(&self) -> String {
        self.date.format(TIME_FORMAT).to_string()
    }

    pub fn popup(&self) -> String {
        format!("Confirmed cases: {}", self.value)
    }

    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("time".to_string(), json!(self.time()));
        properties.insert(
            "style".to_string(),
            json!({ "color": self.color, "weight": 2 }),
        );
        properties.insert("icon".to_string(), json!("circle"));
        properties.insert(
            "iconstyle".to_string(),
            json!({
                "radius": self.radius,
                "fillColor": self.color,
                "fillOpacity": 1,
            }),
        );
        properties.insert("popup".to_string(), json!(self.popup()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(self.coordinates()))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Builds one point per observation with a positive value.
///
/// Zero values mean nothing confirmed yet and are not drawn. Points keep the
/// observation order (date, then country and coordinate).
pub fn build_points(observations: &[Observation], tiers: &TierTable, scale: &RadiusScale) -> Vec<MapPoint> {
    observations
        .iter()
        .filter(|obs| obs.value > 0)
        .map(|obs| MapPoint {
            date: obs.date,
            country: obs.country.clone(),
            lat: obs.lat,
            long: obs.long,
            value: obs.value,
            radius: scale.radius(obs.value as f64),
            color: tiers.color_for(&obs.country),
        })
        .collect()
}

pub fn to_feature_collection(points: &[MapPoint]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: points.iter().map(MapPoint::to_feature).collect(),
        foreign_members: None,
    }
}

/// Sorted distinct feature times, the frames of the animation.
pub fn distinct_times(points: &[MapPoint]) -> Vec<String> {
    let mut dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    dates.sort();
    dates.dedup();
    dates
        .into_iter()
        .map(|d| d.format(TIME_FORMAT).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::RadiusBounds;

    fn obs(country: &str, day: u32, lat: f64, long: f64, value: u64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2020, 2, day).unwrap(),
            country: country.to_string(),
            lat,
            long,
            value,
        }
    }

    fn scale() -> RadiusScale {
        RadiusScale::new(0.0, 100.0, RadiusBounds::default())
    }

    #[test]
    fn test_zero_values_dropped_one_kept() {
        let observations = vec![obs("A", 1, 1.0, 2.0, 0), obs("A", 2, 1.0, 2.0, 1)];
        let tiers = classify(&observations);

        let points = build_points(&observations, &tiers, &scale());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 1);
    }

    #[test]
    fn test_coordinates_are_long_lat() {
        let observations = vec![obs("A", 1, 33.9, 67.7, 5)];
        let tiers = classify(&observations);

        let points = build_points(&observations, &tiers, &scale());
        assert_eq!(points[0].coordinates(), vec![67.7, 33.9]);

        let feature = points[0].to_feature();
        match feature.geometry.unwrap().value {
            Value::Point(coords) => assert_eq!(coords, vec![67.7, 33.9]),
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn test_feature_properties() {
        let observations = vec![obs("A", 9, 1.0, 2.0, 100)];
        let tiers = classify(&observations);
        let points = build_points(&observations, &tiers, &scale());

        let props = points[0].to_feature().properties.unwrap();
        assert_eq!(props["time"], json!("2020-02-09"));
        assert_eq!(props["style"]["color"], json!("green"));
        assert_eq!(props["style"]["weight"], json!(2));
        assert_eq!(props["icon"], json!("circle"));
        assert_eq!(props["iconstyle"]["fillColor"], json!("green"));
        assert_eq!(props["iconstyle"]["fillOpacity"], json!(1));
        assert_eq!(props["iconstyle"]["radius"], json!(22.0));
        assert_eq!(props["popup"], json!("Confirmed cases: 100"));
    }

    #[test]
    fn test_unranked_country_gets_fallback_color() {
        let observations = vec![obs("A", 1, 1.0, 2.0, 3)];
        let tiers = classify(&[]);
        let points = build_points(&observations, &tiers, &scale());
        assert_eq!(points[0].color, "gray");
    }

    #[test]
    fn test_collection_preserves_order_and_times_dedup() {
        let observations = vec![
            obs("A", 1, 1.0, 2.0, 1),
            obs("B", 1, 3.0, 4.0, 2),
            obs("A", 2, 1.0, 2.0, 3),
        ];
        let tiers = classify(&observations);
        let points = build_points(&observations, &tiers, &scale());

        let collection = to_feature_collection(&points);
        assert_eq!(collection.features.len(), 3);
        let popups: Vec<_> = collection
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["popup"].clone())
            .collect();
        assert_eq!(
            popups,
            vec![
                json!("Confirmed cases: 1"),
                json!("Confirmed cases: 2"),
                json!("Confirmed cases: 3"),
            ]
        );

        assert_eq!(distinct_times(&points), vec!["2020-02-01", "2020-02-02"]);
    }
}
