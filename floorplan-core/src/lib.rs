//! Deterministic floor-plan drawing: plan model, unit text, coordinate
//! mapping, room geometry and the layered SVG drawing built from them.

pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod drawing;
pub mod geometry;
pub mod mapper;
pub mod model;
pub mod schedule;
pub mod units;

pub use compose::{build_plan_drawing, build_plan_svg};
pub use config::RenderConfig;
pub use diagnostics::{PlanWarning, diagnose};
pub use drawing::{Drawing, LayerKind, SVG_ELEMENT_ID};
pub use geometry::{GeometryBuilder, RoomGeometry, clamp_door_offset, is_wet_area};
pub use mapper::{CoordinateMapper, Point, PxRect};
pub use model::{ConceptPlan, Door, DoorType, PlanResponse, PrivacyLevel, Room, Wall, Window};
pub use schedule::{ScheduleRow, render_table, schedule};
pub use units::{UnitSystem, convert_length, format_dimensions, to_display_length};

/// Render a plan payload straight to SVG text and pixel size.
///
/// The payload may be a tagged response or a bare concept plan. Interior
/// analysis responses carry no drawable plan and yield `Ok(None)`.
pub fn render_plan_json(
    json: &str,
    cfg: &RenderConfig,
) -> Result<Option<(String, u32, u32)>, serde_json::Error> {
    let resp = PlanResponse::from_json(json)?;
    Ok(resp.concept_plan().map(|plan| build_plan_svg(plan, cfg)))
}
