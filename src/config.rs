//! Run configuration passed into every pipeline stage.

use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";
pub const DEFAULT_CACHE_PATH: &str = "corona_confirmed.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "animated_map.html";

/// Everything a run needs: where the data comes from, where it goes,
/// and how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub source_url: String,
    pub cache_path: PathBuf,
    pub output_path: PathBuf,
    /// Read the cached download instead of fetching when it exists.
    pub offline: bool,
    pub radius: RadiusBounds,
    pub view: MapView,
    pub timeline: TimelineOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source_url: DEFAULT_SOURCE_URL.into(),
            cache_path: DEFAULT_CACHE_PATH.into(),
            output_path: DEFAULT_OUTPUT_PATH.into(),
            offline: false,
            radius: RadiusBounds::default(),
            view: MapView::default(),
            timeline: TimelineOptions::default(),
        }
    }
}

/// On-screen radius range for the smallest and largest observed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusBounds {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        RadiusBounds {
            min_radius: 1.0,
            max_radius: 22.0,
        }
    }
}

/// Initial map position.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            center_lat: 20.0,
            center_lon: 0.0,
            zoom: 2,
        }
    }
}

/// Playback settings for the time-animated layer.
///
/// `period` and `duration` are ISO 8601 durations, as the time slider expects.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimelineOptions {
    pub period: String,
    pub duration: String,
    pub max_speed: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        TimelineOptions {
            period: "P1D".into(),
            duration: "P1D".into(),
            max_speed: 200,
            looped: true,
        }
    }
}
