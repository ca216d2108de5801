//! Room schedule: one row per room with its size, privacy zone and notes.

use serde::Serialize;

use crate::model::{ConceptPlan, PrivacyLevel, Room};
use crate::units::{METERS_TO_FEET, UnitSystem, one_decimal};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub name: String,
    pub dimensions: String,
    pub zone: PrivacyLevel,
    pub notes: String,
}

/// Badge color of a privacy zone.
pub fn zone_color(level: PrivacyLevel) -> &'static str {
    match level {
        PrivacyLevel::Public => "#f97316",
        PrivacyLevel::SemiPrivate => "#3b82f6",
        PrivacyLevel::Private => "#22c55e",
    }
}

/// Schedule size text. Unlike drawing labels, metric values keep their
/// plain number form.
pub fn schedule_dimensions(room: &Room, unit: UnitSystem) -> String {
    if let Some(s) = room.display_override() {
        return s.to_string();
    }
    let d = room.dimensions_m();
    match unit {
        UnitSystem::Imperial => format!(
            "{}ft x {}ft",
            one_decimal(d.width * METERS_TO_FEET),
            one_decimal(d.length * METERS_TO_FEET)
        ),
        UnitSystem::Metric => format!("{}m x {}m", d.width, d.length),
    }
}

pub fn schedule(plan: &ConceptPlan, unit: UnitSystem) -> Vec<ScheduleRow> {
    plan.rooms
        .iter()
        .map(|r| ScheduleRow {
            name: r.name.clone(),
            dimensions: schedule_dimensions(r, unit),
            zone: r.privacy_level,
            notes: r.notes.clone(),
        })
        .collect()
}

/// Left-aligned plain-text table with a header row.
pub fn render_table(rows: &[ScheduleRow]) -> String {
    let header = ["Room", "Dimensions", "Zone", "Notes"];
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.dimensions.clone(),
                r.zone.as_str().to_string(),
                r.notes.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.chars().count());
        }
    }

    let line = |cols: [&str; 4]| -> String {
        let padded: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(header));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApproxDimensions, PlotRect};

    fn bedroom() -> Room {
        Room {
            name: "Bedroom".into(),
            privacy_level: PrivacyLevel::Private,
            position_on_plot: PlotRect {
                x_start_m: 0.0,
                y_start_m: 0.0,
                x_end_m: 3.5,
                y_end_m: 4.0,
            },
            approx_dimensions_m: Some(ApproxDimensions {
                width: 4.0,
                length: 5.0,
            }),
            notes: "east light".into(),
            ..Default::default()
        }
    }

    #[test]
    fn dimensions_follow_display_unit() {
        let r = bedroom();
        assert_eq!(schedule_dimensions(&r, UnitSystem::Imperial), "13.1ft x 16.4ft");
        assert_eq!(schedule_dimensions(&r, UnitSystem::Metric), "4m x 5m");
    }

    #[test]
    fn falls_back_to_rectangle_extent() {
        let mut r = bedroom();
        r.approx_dimensions_m = None;
        assert_eq!(schedule_dimensions(&r, UnitSystem::Metric), "3.5m x 4m");
        r.dimensions_display = Some("12' x 13'".into());
        assert_eq!(schedule_dimensions(&r, UnitSystem::Metric), "12' x 13'");
    }

    #[test]
    fn zones_have_distinct_colors() {
        let c = [
            zone_color(PrivacyLevel::Public),
            zone_color(PrivacyLevel::SemiPrivate),
            zone_color(PrivacyLevel::Private),
        ];
        assert_ne!(c[0], c[1]);
        assert_ne!(c[1], c[2]);
        assert_ne!(c[0], c[2]);
    }

    #[test]
    fn table_has_header_and_one_line_per_room() {
        let plan = ConceptPlan {
            rooms: vec![bedroom()],
            ..Default::default()
        };
        let rows = schedule(&plan, UnitSystem::Metric);
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Room"));
        assert!(lines[2].starts_with("Bedroom"));
        assert!(lines[2].contains("private"));
        assert!(lines[2].ends_with("east light"));
    }
}
