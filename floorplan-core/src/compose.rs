//! Layer composition of a concept plan into a [`Drawing`].
//!
//! Room layers are painted fills, walls, cuts, symbols, labels. Cuts are
//! background-colored strokes laid over the walls, so they must come after
//! the walls and before the door and window symbols that sit in the gap.

use tracing::debug;

use crate::config::RenderConfig;
use crate::drawing::{Drawing, Layer, LayerKind, Pattern, Shape, Style, Text};
use crate::geometry::{DoorGeometry, GeometryBuilder, RoomGeometry, WindowGeometry};
use crate::mapper::{CoordinateMapper, Point, PxRect};
use crate::model::{ConceptPlan, DoorType, Room};
use crate::units::{UnitSystem, format_dimensions, plot_dimension_text};

pub const BACKGROUND: &str = "white";
pub const WALL_INK: &str = "#111827";
pub const SYMBOL_INK: &str = "black";
const GRID_INK: &str = "#e5e7eb";
const BOUNDARY_INK: &str = "#9ca3af";
const HATCH_INK: &str = "#1f2937";
const DIM_TEXT_INK: &str = "#6b7280";

const HATCH_OPACITY: f64 = 0.1;
const SLIDE_OFFSET_PX: f64 = 4.0;
const DIM_LINE_GAP_PX: f64 = 20.0;
const DIM_TICK_PX: f64 = 5.0;
const DIM_FONT_PX: f64 = 12.0;
const TITLE_BOX: (f64, f64) = (180.0, 30.0);
const TITLE_INSET: (f64, f64) = (200.0, 40.0);
const TITLE_MAX_CHARS: usize = 15;

/// Dimension text under a room name: the producer's own display string when
/// present, otherwise one-decimal dimensions in the display unit.
pub fn room_dimension_text(room: &Room, unit: UnitSystem) -> String {
    if let Some(s) = room.display_override() {
        return s.to_string();
    }
    let d = room.dimensions_m();
    format_dimensions(d.width, d.length, unit)
}

/// Title block text: `PROJECT: ` and the first 15 characters of the name.
pub fn title_text(project_name: &str) -> String {
    let short: String = project_name.chars().take(TITLE_MAX_CHARS).collect();
    format!("PROJECT: {}", short.to_uppercase())
}

fn fmt_path(cmds: &[(&str, &[f64])]) -> String {
    let mut parts = Vec::new();
    for (c, args) in cmds {
        parts.push(c.to_string());
        for a in args.iter() {
            parts.push(format!("{:.2}", a));
        }
    }
    parts.join(" ")
}

/// Quarter-circle swing of a leaf hinged at `hinge`, opening from the
/// closed point `from` to the leaf tip `to`.
fn swing_arc(from: (f64, f64), to: (f64, f64), radius: f64, sweep: f64) -> String {
    fmt_path(&[
        ("M", &[from.0, from.1]),
        ("A", &[radius, radius, 0.0, 0.0, sweep, to.0, to.1]),
    ])
}

/// Symbol template of a door, drawn along +x centered on the anchor with
/// the leaves opening toward +y.
pub fn door_symbol(door: &DoorGeometry) -> Vec<Shape> {
    let d = door.width_px;
    let half = d / 2.0;
    let arc_style = Style::stroke(SYMBOL_INK, 1.0);
    let leaf_style = Style::stroke(SYMBOL_INK, 2.0);
    match door.kind {
        DoorType::Opening => Vec::new(),
        DoorType::Single => vec![
            Shape::path(
                swing_arc((half, 0.0), (-half, d), d, 1.0),
                arc_style.with_stroke_opacity(0.5),
            ),
            Shape::line((-half, 0.0), (-half, d), leaf_style),
        ],
        DoorType::Double => vec![
            Shape::path(swing_arc((0.0, 0.0), (-half, half), half, 1.0), arc_style.clone()),
            Shape::line((-half, 0.0), (-half, half), leaf_style.clone()),
            Shape::path(swing_arc((0.0, 0.0), (half, half), half, 0.0), arc_style),
            Shape::line((half, 0.0), (half, half), leaf_style),
        ],
        DoorType::Sliding => vec![
            Shape::line((-half, -SLIDE_OFFSET_PX), (0.0, -SLIDE_OFFSET_PX), leaf_style.clone()),
            Shape::line((0.0, SLIDE_OFFSET_PX), (half, SLIDE_OFFSET_PX), leaf_style),
            Shape::line((-half, 0.0), (half, 0.0), arc_style.dashed("2,2")),
        ],
    }
}

/// Sill rectangle with a center mullion line.
pub fn window_symbol(window: &WindowGeometry, wall_px: f64) -> Vec<Shape> {
    let half = window.width_px / 2.0;
    vec![
        Shape::rect(
            PxRect {
                x: -half,
                y: -wall_px / 2.0,
                w: window.width_px,
                h: wall_px,
            },
            Style::stroke(SYMBOL_INK, 1.0),
        ),
        Shape::line((-half, 0.0), (half, 0.0), Style::stroke(SYMBOL_INK, 1.0)),
    ]
}

fn cut_shape(cut: &crate::geometry::CutSpan) -> Shape {
    let half = cut.length_px / 2.0;
    Shape::group(
        cut.placement.anchor,
        cut.placement.rotation_deg,
        vec![Shape::line(
            (-half, 0.0),
            (half, 0.0),
            Style::stroke(BACKGROUND, cut.stroke_px),
        )],
    )
}

/// The five ordered room layers.
pub fn room_layers(rooms: &[(RoomGeometry, String)], wall_px: f64) -> Vec<Layer> {
    let mut fills = Vec::new();
    let mut walls = Vec::new();
    let mut cuts = Vec::new();
    let mut symbols = Vec::new();
    let mut labels = Vec::new();

    for (g, dim_text) in rooms {
        fills.push(Shape::rect(g.rect, Style::fill(BACKGROUND)));
        if g.wet_area {
            fills.push(Shape::rect(
                g.rect,
                Style::fill("url(#hatch)").with_opacity(HATCH_OPACITY),
            ));
        }

        walls.push(Shape::rect(g.rect, Style::stroke(WALL_INK, wall_px)));

        for door in &g.doors {
            cuts.push(cut_shape(&door.cut));
            let sym = door_symbol(door);
            if !sym.is_empty() {
                symbols.push(Shape::group(
                    door.placement.anchor,
                    door.placement.rotation_deg,
                    sym,
                ));
            }
        }
        for win in &g.windows {
            cuts.push(cut_shape(&win.cut));
            symbols.push(Shape::group(
                win.placement.anchor,
                win.placement.rotation_deg,
                window_symbol(win, wall_px),
            ));
        }

        let fs = g.label_font_size();
        labels.push(Shape::group(
            g.rect.center(),
            0.0,
            vec![
                Shape::Text(
                    Text::new((0.0, -2.0), g.name.clone(), fs)
                        .centered()
                        .family("serif")
                        .bold(),
                ),
                Shape::Text(
                    Text::new((0.0, fs + 2.0), dim_text.clone(), fs * 0.7)
                        .centered()
                        .family("monospace")
                        .fill(DIM_TEXT_INK),
                ),
            ],
        ));
    }

    vec![
        Layer {
            kind: LayerKind::Fills,
            shapes: fills,
        },
        Layer {
            kind: LayerKind::Walls,
            shapes: walls,
        },
        Layer {
            kind: LayerKind::Cuts,
            shapes: cuts,
        },
        Layer {
            kind: LayerKind::Symbols,
            shapes: symbols,
        },
        Layer {
            kind: LayerKind::Labels,
            shapes: labels,
        },
    ]
}

fn patterns(mapper: &CoordinateMapper) -> Vec<Pattern> {
    let cell = mapper.to_px(1.0);
    vec![
        Pattern {
            id: "grid",
            width: cell,
            height: cell,
            rotate: None,
            children: vec![Shape::path(
                fmt_path(&[("M", &[cell, 0.0]), ("L", &[0.0, 0.0, 0.0, cell])]),
                Style::stroke(GRID_INK, 1.0),
            )],
        },
        Pattern {
            id: "hatch",
            width: 4.0,
            height: 4.0,
            rotate: Some(45.0),
            children: vec![Shape::rect(
                PxRect {
                    x: 0.0,
                    y: 0.0,
                    w: 2.0,
                    h: 4.0,
                },
                Style::fill(HATCH_INK),
            )],
        },
    ]
}

fn dimension_lines(mapper: &CoordinateMapper, plan: &ConceptPlan) -> Vec<Shape> {
    let unit = plan.unit_system;
    let w = mapper.to_px(plan.plot.width_m);
    let d = mapper.to_px(plan.plot.depth_m);
    let ink = Style::stroke(SYMBOL_INK, 1.0);
    let top = Shape::group(
        Point {
            x: mapper.to_x(0.0),
            y: mapper.to_y(0.0) - DIM_LINE_GAP_PX,
        },
        0.0,
        vec![
            Shape::line((0.0, 0.0), (w, 0.0), ink.clone()),
            Shape::line((0.0, -DIM_TICK_PX), (0.0, DIM_TICK_PX), ink.clone()),
            Shape::line((w, -DIM_TICK_PX), (w, DIM_TICK_PX), ink.clone()),
            Shape::Text(
                Text::new(
                    (w / 2.0, -10.0),
                    plot_dimension_text(plan.plot.width_m, unit),
                    DIM_FONT_PX,
                )
                .centered()
                .family("monospace"),
            ),
        ],
    );
    let left = Shape::group(
        Point {
            x: mapper.to_x(0.0) - DIM_LINE_GAP_PX,
            y: mapper.to_y(0.0),
        },
        0.0,
        vec![
            Shape::line((0.0, 0.0), (0.0, d), ink.clone()),
            Shape::line((-DIM_TICK_PX, 0.0), (DIM_TICK_PX, 0.0), ink.clone()),
            Shape::line((-DIM_TICK_PX, d), (DIM_TICK_PX, d), ink),
            Shape::Text(
                Text::new(
                    (-10.0, d / 2.0),
                    plot_dimension_text(plan.plot.depth_m, unit),
                    DIM_FONT_PX,
                )
                .centered()
                .family("monospace")
                .rotated(-90.0),
            ),
        ],
    );
    vec![top, left]
}

fn title_block(width: f64, height: f64, project_name: &str) -> Shape {
    Shape::group(
        Point {
            x: width - TITLE_INSET.0,
            y: height - TITLE_INSET.1,
        },
        0.0,
        vec![
            Shape::rect(
                PxRect {
                    x: 0.0,
                    y: 0.0,
                    w: TITLE_BOX.0,
                    h: TITLE_BOX.1,
                },
                Style::stroke(SYMBOL_INK, 1.0),
            ),
            Shape::Text(
                Text::new((10.0, 20.0), title_text(project_name), 12.0).bold(),
            ),
        ],
    )
}

/// Build the complete drawing of a plan. Pure function of its inputs.
pub fn build_plan_drawing(plan: &ConceptPlan, cfg: &RenderConfig) -> Drawing {
    let builder = GeometryBuilder::new(cfg);
    let mapper = *builder.mapper();
    let (width, height) = mapper.drawing_size(plan.plot.width_m, plan.plot.depth_m);
    let plot = mapper.plot_rect(plan.plot.width_m, plan.plot.depth_m);

    let rooms: Vec<(RoomGeometry, String)> = builder
        .rooms(plan)
        .into_iter()
        .zip(&plan.rooms)
        .map(|(g, r)| (g, room_dimension_text(r, plan.unit_system)))
        .collect();

    let mut layers = vec![
        Layer {
            kind: LayerKind::Background,
            shapes: vec![Shape::rect(
                PxRect {
                    x: 0.0,
                    y: 0.0,
                    w: width,
                    h: height,
                },
                Style::fill(BACKGROUND),
            )],
        },
        Layer {
            kind: LayerKind::Grid,
            shapes: vec![Shape::rect(plot, Style::fill("url(#grid)"))],
        },
        Layer {
            kind: LayerKind::Boundary,
            shapes: vec![Shape::rect(
                plot,
                Style::stroke(BOUNDARY_INK, 2.0).dashed("10,5"),
            )],
        },
    ];
    layers.extend(room_layers(&rooms, builder.wall_px()));
    layers.push(Layer {
        kind: LayerKind::Dimensions,
        shapes: dimension_lines(&mapper, plan),
    });
    layers.push(Layer {
        kind: LayerKind::TitleBlock,
        shapes: vec![title_block(width, height, &plan.project_name)],
    });

    debug!(
        rooms = rooms.len(),
        width, height, "composed plan drawing"
    );
    Drawing {
        width,
        height,
        defs: patterns(&mapper),
        layers,
    }
}

/// SVG text and whole-pixel size of a plan drawing.
pub fn build_plan_svg(plan: &ConceptPlan, cfg: &RenderConfig) -> (String, u32, u32) {
    let drawing = build_plan_drawing(plan, cfg);
    let (w, h) = drawing.pixel_size();
    (drawing.to_svg(), w, h)
}
