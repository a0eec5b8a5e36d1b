use crate::config::RadiusBounds;

/// Log-scaled mapping from a value to a marker radius.
///
/// `log1p` keeps zero values finite. When the bounds are degenerate
/// (`max_value <= min_value`) every value maps to `min_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    pub min_value: f64,
    pub max_value: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl RadiusScale {
    pub fn new(min_value: f64, max_value: f64, bounds: RadiusBounds) -> Self {
        Self {
            min_value,
            max_value,
            min_radius: bounds.min_radius,
            max_radius: bounds.max_radius,
        }
    }

    pub fn radius(&self, value: f64) -> f64 {
        radius(
            value,
            self.min_value,
            self.max_value,
            self.min_radius,
            self.max_radius,
        )
    }
}

pub fn radius(value: f64, min_value: f64, max_value: f64, min_radius: f64, max_radius: f64) -> f64 {
    if max_value <= min_value {
        return min_radius;
    }

    let log_min = min_value.ln_1p();
    let log_max = max_value.ln_1p();
    let log_value = value.ln_1p();

    min_radius + (max_radius - min_radius) * (log_value - log_min) / (log_max - log_min)
}
