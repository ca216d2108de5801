//! Plan checks that never block rendering. The renderer draws malformed
//! geometry as-is; these warnings let a caller surface what looks wrong.

use thiserror::Error;
use tracing::warn;

use crate::model::{ConceptPlan, Room, Wall};

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanWarning {
    #[error("plot size {width} x {depth} is not positive")]
    NonPositivePlot { width: f64, depth: f64 },
    #[error("room `{room}` has no doors and is drawn sealed")]
    NoDoors { room: String },
    #[error("room `{room}` has a zero or negative extent")]
    DegenerateRoom { room: String },
    #[error("room `{room}` extends outside the plot")]
    OutsidePlot { room: String },
    #[error("room `{room}`: {opening} on the {wall:?} wall has offset ratio {ratio} outside [0, 1]")]
    OffsetOutOfRange {
        room: String,
        opening: &'static str,
        wall: Wall,
        ratio: f64,
    },
}

fn check_room(room: &Room, plot_w: f64, plot_d: f64, out: &mut Vec<PlanWarning>) {
    let r = &room.position_on_plot;
    if r.width() <= 0.0 || r.depth() <= 0.0 {
        out.push(PlanWarning::DegenerateRoom {
            room: room.name.clone(),
        });
    }
    let (x0, x1) = (r.x_start_m.min(r.x_end_m), r.x_start_m.max(r.x_end_m));
    let (y0, y1) = (r.y_start_m.min(r.y_end_m), r.y_start_m.max(r.y_end_m));
    if x0 < -EPS || y0 < -EPS || x1 > plot_w + EPS || y1 > plot_d + EPS {
        out.push(PlanWarning::OutsidePlot {
            room: room.name.clone(),
        });
    }
    if room.features.doors.is_empty() {
        out.push(PlanWarning::NoDoors {
            room: room.name.clone(),
        });
    }

    let doors = room
        .features
        .doors
        .iter()
        .map(|d| ("door", d.wall, d.offset_ratio));
    let windows = room
        .features
        .windows
        .iter()
        .map(|w| ("window", w.wall, w.offset_ratio));
    for (opening, wall, ratio) in doors.chain(windows) {
        if !(0.0..=1.0).contains(&ratio) {
            out.push(PlanWarning::OffsetOutOfRange {
                room: room.name.clone(),
                opening,
                wall,
                ratio,
            });
        }
    }
}

/// Collect every warning for a plan, in room order.
pub fn diagnose(plan: &ConceptPlan) -> Vec<PlanWarning> {
    let mut out = Vec::new();
    let (w, d) = (plan.plot.width_m, plan.plot.depth_m);
    if w <= 0.0 || d <= 0.0 {
        out.push(PlanWarning::NonPositivePlot { width: w, depth: d });
    }
    for room in &plan.rooms {
        check_room(room, w, d, &mut out);
    }
    out
}

/// Run [`diagnose`] and log each finding at warn level.
pub fn log_warnings(plan: &ConceptPlan) -> usize {
    let warnings = diagnose(plan);
    for w in &warnings {
        warn!("{w}");
    }
    warnings.len()
}
