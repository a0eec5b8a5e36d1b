//! Self-contained HTML document with a time-animated point layer.
//!
//! The page loads Leaflet and Leaflet.TimeDimension from a CDN and embeds the
//! feature collection directly, so the file can be opened without a server.

use anyhow::{Context, Result};
use geojson::FeatureCollection;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::{MapView, TimelineOptions};

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>Confirmed cases over time</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css" />
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet-timedimension@1.1.1/dist/leaflet.timedimension.control.min.css" />
<script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://cdn.jsdelivr.net/npm/iso8601-js-period@0.2.1/iso8601.min.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet-timedimension@1.1.1/dist/leaflet.timedimension.min.js"></script>
<style>
html, body, #map { width: 100%; height: 100%; margin: 0; padding: 0; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var view = __VIEW__;
var options = __OPTIONS__;
var times = __TIMES__;
var data = __DATA__;

var map = L.map("map", {
    center: [view.center_lat, view.center_lon],
    zoom: view.zoom,
    timeDimension: true,
    timeDimensionOptions: { times: times, period: options.period }
});

L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);

map.addControl(new L.Control.TimeDimension({
    position: "bottomleft",
    autoPlay: true,
    loopButton: true,
    timeSliderDragUpdate: true,
    speedSlider: true,
    maxSpeed: options.max_speed,
    playerOptions: { transitionTime: 200, loop: options.loop, startOver: true }
}));

var layer = L.geoJson(data, {
    pointToLayer: function (feature, latLng) {
        var style = Object.assign({}, feature.properties.style, feature.properties.iconstyle);
        return L.circleMarker(latLng, style);
    },
    style: function (feature) {
        return feature.properties.style;
    },
    onEachFeature: function (feature, layer) {
        if (feature.properties.popup) {
            layer.bindPopup(feature.properties.popup);
        }
    }
});

L.timeDimension.layer.geoJson(layer, {
    updateTimeDimension: true,
    addlastPoint: false,
    duration: options.duration
}).addTo(map);
</script>
</body>
</html>
"#;

/// Renders the full HTML page for `collection`.
///
/// `times` are the animation frames (ISO dates), normally the distinct
/// `time` properties of the features.
pub fn render_html(
    collection: &FeatureCollection,
    times: &[String],
    view: &MapView,
    timeline: &TimelineOptions,
) -> Result<String> {
    let html = TEMPLATE
        .replace("__VIEW__", &script_json(view)?)
        .replace("__OPTIONS__", &script_json(timeline)?)
        .replace("__TIMES__", &script_json(&times)?)
        .replace("__DATA__", &script_json(collection)?);
    Ok(html)
}

/// Writes the rendered page, creating parent directories.
#[tracing::instrument(skip(html), fields(bytes = html.len()))]
pub fn write_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write map: {:?}", path))?;
    info!(path = %path.display(), "Map written");
    Ok(())
}

// JSON safe to inline in a <script> element.
fn script_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{MapPoint, distinct_times, to_feature_collection};
    use chrono::NaiveDate;
    use std::env;

    fn point(day: u32, value: u64) -> MapPoint {
        MapPoint {
            date: NaiveDate::from_ymd_opt(2020, 4, day).unwrap(),
            country: "A".to_string(),
            lat: 10.0,
            long: 20.0,
            value,
            radius: 4.0,
            color: "red",
        }
    }

    fn render(points: &[MapPoint]) -> String {
        render_html(
            &to_feature_collection(points),
            &distinct_times(points),
            &MapView::default(),
            &TimelineOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_placeholders_replaced() {
        let html = render(&[point(1, 5)]);
        assert!(!html.contains("__VIEW__"));
        assert!(!html.contains("__OPTIONS__"));
        assert!(!html.contains("__TIMES__"));
        assert!(!html.contains("__DATA__"));
    }

    #[test]
    fn test_timeline_options_embedded() {
        let html = render(&[point(1, 5)]);
        assert!(html.contains(r#""period":"P1D""#));
        assert!(html.contains(r#""duration":"P1D""#));
        assert!(html.contains(r#""max_speed":200"#));
        assert!(html.contains(r#""loop":true"#));
        assert!(html.contains(r#""zoom":2"#));
    }

    #[test]
    fn test_features_and_times_embedded() {
        let html = render(&[point(1, 5), point(2, 7)]);
        assert!(html.contains(r#"["2020-04-01","2020-04-02"]"#));
        assert!(html.contains("Confirmed cases: 7"));
        assert!(html.contains(r#""coordinates":[20.0,10.0]"#));
    }

    #[test]
    fn test_custom_period_reaches_map_time_dimension() {
        let points = [point(1, 5)];
        let timeline = TimelineOptions {
            period: "P7D".to_string(),
            ..Default::default()
        };
        let html = render_html(
            &to_feature_collection(&points),
            &distinct_times(&points),
            &MapView::default(),
            &timeline,
        )
        .unwrap();

        assert!(html.contains(r#""period":"P7D""#));

        let map_start = html.find("L.map(").unwrap();
        let map_block = &html[map_start..];
        let map_block = &map_block[..map_block.find("});").unwrap()];
        assert!(map_block.contains("period: options.period"));

        let layer_start = html.find("L.timeDimension.layer.geoJson(").unwrap();
        assert!(!html[layer_start..].contains("period"));
    }

    #[test]
    fn test_script_json_escapes_closing_tag() {
        let escaped = script_json(&"</script><b>").unwrap();
        assert_eq!(escaped, r#""<\/script><b>""#);
    }

    #[test]
    fn test_write_html() {
        let dir = env::temp_dir().join("case_spread_map_test_render");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("map.html");

        write_html(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");

        fs::remove_dir_all(&dir).unwrap();
    }
}
