use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// Cardinal wall of a room rectangle. North is the top edge in drawing space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorType {
    #[default]
    Single,
    Double,
    Sliding,
    /// Archway without a leaf; only the wall cut is drawn.
    Opening,
}

impl DoorType {
    /// Nominal clear width in meters, used for both the cut and the symbol.
    pub fn nominal_width_m(self) -> f64 {
        match self {
            DoorType::Double => 1.6,
            DoorType::Opening => 1.8,
            DoorType::Single | DoorType::Sliding => 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    #[default]
    Public,
    SemiPrivate,
    Private,
}

impl PrivacyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::SemiPrivate => "semi_private",
            PrivacyLevel::Private => "private",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub wall: Wall,
    pub offset_ratio: f64,
    #[serde(rename = "type", default)]
    pub kind: DoorType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub wall: Wall,
    pub offset_ratio: f64,
    pub width_m: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
}

/// Axis-aligned room rectangle in meters, relative to the plot's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x_start_m: f64,
    pub y_start_m: f64,
    pub x_end_m: f64,
    pub y_end_m: f64,
}

impl PlotRect {
    pub fn width(&self) -> f64 {
        self.x_end_m - self.x_start_m
    }

    pub fn depth(&self) -> f64 {
        self.y_end_m - self.y_start_m
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxDimensions {
    pub width: f64,
    pub length: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub function: String,
    pub position_on_plot: PlotRect,
    #[serde(default)]
    pub privacy_level: PrivacyLevel,
    #[serde(default)]
    pub features: Features,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_dimensions_m: Option<ApproxDimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions_display: Option<String>,
    #[serde(default)]
    pub adjacent_to: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Room {
    /// Width and length used for dimension text: the declared approximate
    /// dimensions when present, otherwise the rectangle's own extent.
    pub fn dimensions_m(&self) -> ApproxDimensions {
        self.approx_dimensions_m.unwrap_or(ApproxDimensions {
            width: self.position_on_plot.width(),
            length: self.position_on_plot.depth(),
        })
    }

    /// Non-empty explicit display string, if the producer supplied one.
    pub fn display_override(&self) -> Option<&str> {
        self.dimensions_display
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub width_m: f64,
    pub depth_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_size: Option<String>,
    #[serde(default)]
    pub assumptions: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circulation {
    #[serde(default)]
    pub main_entry: String,
    #[serde(default)]
    pub stairs_location: String,
    #[serde(default)]
    pub notes: String,
}

/// Concept plan as produced by the plan generator or by manual input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptPlan {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub concept_description: String,
    pub plot: Plot,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub circulation: Circulation,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

/// Result of a generation request. The variant is named by the `mode` tag
/// carried in the payload itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum PlanResponse {
    /// Interior analysis of an uploaded plan; not drawable, kept verbatim.
    #[serde(rename = "A_INTERIOR_FROM_PLAN")]
    InteriorFromPlan(serde_json::Map<String, serde_json::Value>),
    #[serde(rename = "B_CONCEPT_PLAN")]
    ConceptPlan(ConceptPlan),
}

impl PlanResponse {
    /// Parse a response payload. Payloads without a `mode` tag are accepted
    /// as bare concept plans; an unknown tag is an error.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.get("mode").is_some() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(PlanResponse::ConceptPlan)
        }
    }

    pub fn concept_plan(&self) -> Option<&ConceptPlan> {
        match self {
            PlanResponse::ConceptPlan(plan) => Some(plan),
            PlanResponse::InteriorFromPlan(_) => None,
        }
    }

    pub fn into_concept_plan(self) -> Option<ConceptPlan> {
        match self {
            PlanResponse::ConceptPlan(plan) => Some(plan),
            PlanResponse::InteriorFromPlan(_) => None,
        }
    }
}
