//! Per-room geometry derived from plan data: pixel rectangles, opening
//! placements and the wall cut spans that open gaps in the wall strokes.

use tracing::debug;

use crate::config::RenderConfig;
use crate::mapper::{CoordinateMapper, Point, PxRect};
use crate::model::{ConceptPlan, Door, DoorType, Room, Wall, Window};

/// Door offsets are kept away from the wall ends.
pub const DOOR_OFFSET_MIN: f64 = 0.2;
pub const DOOR_OFFSET_MAX: f64 = 0.8;

/// Extra cut width over the wall stroke, in pixels.
pub const CUT_MARGIN_PX: f64 = 2.0;

const WET_AREA_TOKENS: [&str; 3] = ["bath", "kitchen", "laundry"];

/// Placement of an opening on a wall: where the anchor sits on the room
/// rectangle and how a symbol drawn along +x is turned to follow the wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallFrame {
    /// Wall start corner as a fraction of the rectangle (0 or 1 per axis).
    pub origin: (f64, f64),
    /// Direction of travel along the wall for increasing offset ratios.
    pub along: (f64, f64),
    pub rotation_deg: f64,
}

const fn frame(origin: (f64, f64), along: (f64, f64), rotation_deg: f64) -> WallFrame {
    WallFrame {
        origin,
        along,
        rotation_deg,
    }
}

/// Door symbols swing into the room, so each wall has its own turn.
pub fn door_frame(wall: Wall) -> WallFrame {
    match wall {
        Wall::North => frame((0.0, 0.0), (1.0, 0.0), 0.0),
        Wall::South => frame((0.0, 1.0), (1.0, 0.0), 180.0),
        Wall::West => frame((0.0, 0.0), (0.0, 1.0), 90.0),
        Wall::East => frame((1.0, 0.0), (0.0, 1.0), -90.0),
    }
}

/// Window symbols are symmetric and only follow the wall axis.
pub fn window_frame(wall: Wall) -> WallFrame {
    match wall {
        Wall::North => frame((0.0, 0.0), (1.0, 0.0), 0.0),
        Wall::South => frame((0.0, 1.0), (1.0, 0.0), 0.0),
        Wall::West => frame((0.0, 0.0), (0.0, 1.0), 90.0),
        Wall::East => frame((1.0, 0.0), (0.0, 1.0), 90.0),
    }
}

impl WallFrame {
    pub fn anchor(&self, rect: &PxRect, offset_ratio: f64) -> Point {
        Point {
            x: rect.x + rect.w * (self.origin.0 + self.along.0 * offset_ratio),
            y: rect.y + rect.h * (self.origin.1 + self.along.1 * offset_ratio),
        }
    }
}

/// Clamp a door offset ratio into `[0.2, 0.8]`. Out-of-range values are
/// never rejected.
pub fn clamp_door_offset(ratio: f64) -> f64 {
    ratio.clamp(DOOR_OFFSET_MIN, DOOR_OFFSET_MAX)
}

/// Bath, kitchen and laundry rooms get the hatch texture.
pub fn is_wet_area(function: &str) -> bool {
    let f = function.to_lowercase();
    WET_AREA_TOKENS.iter().any(|t| f.contains(t))
}

/// Rotate a symbol-local point by `ang` degrees and move it onto `anchor`.
pub fn place_point(local: Point, anchor: Point, ang: f64) -> Point {
    let (s, c) = ang.to_radians().sin_cos();
    Point {
        x: anchor.x + local.x * c - local.y * s,
        y: anchor.y + local.x * s + local.y * c,
    }
}

/// Anchor and turn of a symbol template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub anchor: Point,
    pub rotation_deg: f64,
}

impl Placement {
    pub fn place(&self, local: Point) -> Point {
        place_point(local, self.anchor, self.rotation_deg)
    }
}

/// Background-colored segment laid over a wall stroke to open a gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutSpan {
    pub placement: Placement,
    pub length_px: f64,
    pub stroke_px: f64,
}

impl CutSpan {
    /// Segment end points in drawing space.
    pub fn endpoints(&self) -> (Point, Point) {
        let half = self.length_px / 2.0;
        (
            self.placement.place(Point { x: -half, y: 0.0 }),
            self.placement.place(Point { x: half, y: 0.0 }),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoorGeometry {
    pub kind: DoorType,
    pub wall: Wall,
    /// Offset ratio after clamping.
    pub offset_ratio: f64,
    pub width_px: f64,
    pub placement: Placement,
    pub cut: CutSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowGeometry {
    pub wall: Wall,
    pub offset_ratio: f64,
    pub width_px: f64,
    pub placement: Placement,
    pub cut: CutSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomGeometry {
    pub name: String,
    pub rect: PxRect,
    pub wet_area: bool,
    pub doors: Vec<DoorGeometry>,
    pub windows: Vec<WindowGeometry>,
}

impl RoomGeometry {
    /// Rooms without doors are drawn as sealed rectangles.
    pub fn is_sealed(&self) -> bool {
        self.doors.is_empty()
    }

    /// Name font size, `clamp(10, 14, width / 8)`.
    pub fn label_font_size(&self) -> f64 {
        (self.rect.w / 8.0).clamp(10.0, 14.0)
    }
}

/// Builds room geometry for one render pass.
#[derive(Clone, Copy, Debug)]
pub struct GeometryBuilder {
    mapper: CoordinateMapper,
    wall_px: f64,
}

impl GeometryBuilder {
    pub fn new(cfg: &RenderConfig) -> Self {
        Self {
            mapper: CoordinateMapper::from_config(cfg),
            wall_px: cfg.wall_thickness_px,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn wall_px(&self) -> f64 {
        self.wall_px
    }

    fn cut(&self, placement: Placement, length_px: f64) -> CutSpan {
        CutSpan {
            placement,
            length_px,
            stroke_px: self.wall_px + CUT_MARGIN_PX,
        }
    }

    pub fn door(&self, rect: &PxRect, door: &Door) -> DoorGeometry {
        let offset = clamp_door_offset(door.offset_ratio);
        let frame = door_frame(door.wall);
        let placement = Placement {
            anchor: frame.anchor(rect, offset),
            rotation_deg: frame.rotation_deg,
        };
        let width_px = self.mapper.to_px(door.kind.nominal_width_m());
        DoorGeometry {
            kind: door.kind,
            wall: door.wall,
            offset_ratio: offset,
            width_px,
            placement,
            cut: self.cut(placement, width_px),
        }
    }

    pub fn window(&self, rect: &PxRect, window: &Window) -> WindowGeometry {
        let frame = window_frame(window.wall);
        let placement = Placement {
            anchor: frame.anchor(rect, window.offset_ratio),
            rotation_deg: frame.rotation_deg,
        };
        let width_px = self.mapper.to_px(window.width_m);
        WindowGeometry {
            wall: window.wall,
            offset_ratio: window.offset_ratio,
            width_px,
            placement,
            cut: self.cut(placement, width_px),
        }
    }

    pub fn room(&self, room: &Room) -> RoomGeometry {
        let r = &room.position_on_plot;
        let rect = self
            .mapper
            .rect(r.x_start_m, r.y_start_m, r.x_end_m, r.y_end_m);
        RoomGeometry {
            name: room.name.clone(),
            rect,
            wet_area: is_wet_area(&room.function),
            doors: room
                .features
                .doors
                .iter()
                .map(|d| self.door(&rect, d))
                .collect(),
            windows: room
                .features
                .windows
                .iter()
                .map(|w| self.window(&rect, w))
                .collect(),
        }
    }

    pub fn rooms(&self, plan: &ConceptPlan) -> Vec<RoomGeometry> {
        let out: Vec<RoomGeometry> = plan.rooms.iter().map(|r| self.room(r)).collect();
        debug!(
            rooms = out.len(),
            openings = out
                .iter()
                .map(|g| g.doors.len() + g.windows.len())
                .sum::<usize>(),
            "built room geometry"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Features, PlotRect};

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    fn room_with(doors: Vec<Door>, windows: Vec<Window>) -> Room {
        Room {
            name: "Living".into(),
            function: "Living Room".into(),
            position_on_plot: PlotRect {
                x_start_m: 0.0,
                y_start_m: 0.0,
                x_end_m: 10.0,
                y_end_m: 10.0,
            },
            features: Features { doors, windows },
            ..Default::default()
        }
    }

    #[test]
    fn clamp_range_and_idempotence() {
        for r in [-1.0, 0.0, 0.2, 0.5, 0.8, 1.0, 2.0] {
            let c = clamp_door_offset(r);
            assert!((DOOR_OFFSET_MIN..=DOOR_OFFSET_MAX).contains(&c));
            assert_eq!(clamp_door_offset(c), c);
        }
        for r in [0.2, 0.35, 0.5, 0.8] {
            assert_eq!(clamp_door_offset(r), r);
        }
        assert_eq!(clamp_door_offset(0.05), 0.2);
        assert_eq!(clamp_door_offset(0.95), 0.8);
    }

    #[test]
    fn wet_area_is_case_insensitive() {
        assert!(is_wet_area("Kitchen"));
        assert!(is_wet_area("KITCHEN"));
        assert!(is_wet_area("kitchen"));
        assert!(is_wet_area("Master Bathroom"));
        assert!(is_wet_area("Laundry / Utility"));
        assert!(!is_wet_area("Living Room"));
        assert!(!is_wet_area(""));
    }

    #[test]
    fn centered_south_door_on_full_plot_room() {
        let b = GeometryBuilder::new(&RenderConfig::default());
        let room = room_with(
            vec![Door {
                wall: Wall::South,
                offset_ratio: 0.5,
                kind: DoorType::Single,
            }],
            Vec::new(),
        );
        let g = b.room(&room);
        assert_eq!(
            g.rect,
            PxRect {
                x: 80.0,
                y: 80.0,
                w: 400.0,
                h: 400.0
            }
        );
        let d = &g.doors[0];
        assert_eq!(d.placement.anchor, Point { x: 280.0, y: 480.0 });
        assert_eq!(d.placement.rotation_deg, 180.0);
        assert_eq!(d.width_px, 36.0);
        let (a, z) = d.cut.endpoints();
        assert!(approx(a, Point { x: 298.0, y: 480.0 }));
        assert!(approx(z, Point { x: 262.0, y: 480.0 }));
        assert_eq!(d.cut.stroke_px, 8.0);
    }

    #[test]
    fn door_near_corner_is_pulled_inward() {
        let b = GeometryBuilder::new(&RenderConfig::default());
        let room = room_with(
            vec![Door {
                wall: Wall::West,
                offset_ratio: 0.05,
                kind: DoorType::Double,
            }],
            Vec::new(),
        );
        let d = &b.room(&room).doors[0];
        assert_eq!(d.offset_ratio, 0.2);
        assert_eq!(d.placement.anchor, Point { x: 80.0, y: 160.0 });
        assert_eq!(d.placement.rotation_deg, 90.0);
        assert_eq!(d.width_px, 64.0);
    }

    #[test]
    fn windows_keep_their_raw_offset() {
        let b = GeometryBuilder::new(&RenderConfig::default());
        let room = room_with(
            Vec::new(),
            vec![Window {
                wall: Wall::East,
                offset_ratio: 0.05,
                width_m: 1.5,
            }],
        );
        let g = b.room(&room);
        assert!(g.is_sealed());
        let w = &g.windows[0];
        assert_eq!(w.offset_ratio, 0.05);
        assert_eq!(w.placement.anchor, Point { x: 480.0, y: 100.0 });
        assert_eq!(w.placement.rotation_deg, 90.0);
        let (a, z) = w.cut.endpoints();
        assert!(approx(a, Point { x: 480.0, y: 70.0 }));
        assert!(approx(z, Point { x: 480.0, y: 130.0 }));
    }

    #[test]
    fn door_table_covers_every_wall() {
        let rect = PxRect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 50.0,
        };
        let cases = [
            (Wall::North, Point { x: 50.0, y: 0.0 }, 0.0),
            (Wall::South, Point { x: 50.0, y: 50.0 }, 180.0),
            (Wall::West, Point { x: 0.0, y: 25.0 }, 90.0),
            (Wall::East, Point { x: 100.0, y: 25.0 }, -90.0),
        ];
        for (wall, anchor, rot) in cases {
            let f = door_frame(wall);
            assert_eq!(f.anchor(&rect, 0.5), anchor, "{wall:?}");
            assert_eq!(f.rotation_deg, rot, "{wall:?}");
        }
    }

    #[test]
    fn label_font_size_is_clamped() {
        let b = GeometryBuilder::new(&RenderConfig::default());
        let mut room = room_with(Vec::new(), Vec::new());
        assert_eq!(b.room(&room).label_font_size(), 14.0);
        room.position_on_plot.x_end_m = 1.0;
        assert_eq!(b.room(&room).label_font_size(), 10.0);
        room.position_on_plot.x_end_m = 2.4;
        assert!((b.room(&room).label_font_size() - 12.0).abs() < 1e-9);
    }
}
