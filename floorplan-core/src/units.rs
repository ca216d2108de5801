//! Metric/imperial length conversion and dimension text.
//!
//! Editable fields and display text round differently: converting an input
//! field to feet rounds to whole feet, converting to meters keeps two
//! decimals. Read-only labels always show one decimal.

use serde::{Deserialize, Serialize};

pub const METERS_TO_FEET: f64 = 3.28084;
pub const FEET_TO_METERS: f64 = 0.3048;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    #[serde(rename = "m")]
    Metric,
    #[serde(rename = "ft")]
    Imperial,
}

impl UnitSystem {
    pub fn suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "m" | "M" | "meters" | "metric" => Some(UnitSystem::Metric),
            "ft" | "FT" | "feet" | "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let k = 10f64.powi(decimals);
    (v * k).round() / k
}

/// Convert an editable length between unit systems.
pub fn convert_length(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => (value * METERS_TO_FEET).round(),
        (UnitSystem::Imperial, UnitSystem::Metric) => round_to(value * FEET_TO_METERS, 2),
        _ => value,
    }
}

/// One decimal with exact halves rounded away from zero (`2.25` is `"2.3"`).
/// `{:.1}` alone rounds exact ties to even; values that only look like a
/// tie in decimal (`0.35` is stored below it) keep their exact rounding.
pub fn one_decimal(v: f64) -> String {
    let t = v * 10.0;
    if t.fract().abs() == 0.5 && v.mul_add(10.0, -t) == 0.0 {
        format!("{:.1}", t.round() / 10.0)
    } else {
        format!("{:.1}", v)
    }
}

/// Read-only label for a length given in meters, e.g. `"13.1ft"` or `"4.0m"`.
pub fn to_display_length(meters: f64, unit: UnitSystem) -> String {
    match unit {
        UnitSystem::Metric => format!("{}m", one_decimal(meters)),
        UnitSystem::Imperial => format!("{}ft", one_decimal(meters * METERS_TO_FEET)),
    }
}

/// Room dimension label, e.g. `"13.1ft x 16.4ft"`.
pub fn format_dimensions(width_m: f64, length_m: f64, unit: UnitSystem) -> String {
    format!(
        "{} x {}",
        to_display_length(width_m, unit),
        to_display_length(length_m, unit)
    )
}

/// Label of the external plot dimension lines. Metric values print as given
/// (`"12m"`, `"12.5m"`), imperial values with one decimal.
pub fn plot_dimension_text(meters: f64, unit: UnitSystem) -> String {
    match unit {
        UnitSystem::Metric => format!("{}m", meters),
        UnitSystem::Imperial => to_display_length(meters, unit),
    }
}

/// Plot size fields of the concept input form, expressed in the form's unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotInputs {
    pub width: f64,
    pub depth: f64,
    pub unit: UnitSystem,
}

impl PlotInputs {
    /// Switch the form to the other unit system, converting both fields.
    pub fn toggled(self) -> Self {
        let to = self.unit.toggled();
        PlotInputs {
            width: convert_length(self.width, self.unit, to),
            depth: convert_length(self.depth, self.unit, to),
            unit: to,
        }
    }

    /// Field values in meters, for building a plot.
    pub fn in_meters(self) -> (f64, f64) {
        match self.unit {
            UnitSystem::Metric => (self.width, self.depth),
            UnitSystem::Imperial => (self.width * FEET_TO_METERS, self.depth * FEET_TO_METERS),
        }
    }
}
