//! # Floor Plan Layouts
//!
//! Schematic two-dimensional room layouts for a plot, proportioned from the
//! plot dimensions and rendered as SVG. The layouts are illustrative: room
//! rectangles are fixed fractions of the drawable area, not a space plan.
//!
//! ## Geometry
//!
//! The canvas is `max(L × 3, 600)` by `max(W × 3, 500)` pixels. Rooms are
//! placed inside a 30 px padding with 25 px gaps between neighbours.
//!
//! - **Layout 1, open concept**: a full-height kitchen strip on the left
//!   (28 % of the width net of one gap); on the right, two bedrooms side by
//!   side on top and a master bedroom (65 %) with a bathroom (35 %) below.
//!   Each row is 48 % of the height net of one gap.
//! - **Layout 2, separate rooms**: bedroom 1, bedroom 2 and the master
//!   bedroom across the top in thirds; bathroom (a quarter), kitchen (35 %)
//!   and living/dining (the remainder) across the bottom. Rows split the
//!   height net of one gap in half.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::layout::{compute_layout, render_svg, Layout};
//!
//! let plan = compute_layout(30.0, 40.0, 2, Layout::OpenConcept).unwrap();
//! assert_eq!(plan.width, 600.0);
//! let svg = render_svg(&plan);
//! assert!(svg.contains("KITCHEN"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimateError, EstimateResult};

/// Pixels per foot of plot
pub const SCALE_PX_PER_FT: f64 = 3.0;
pub const MIN_CANVAS_WIDTH: f64 = 600.0;
pub const MIN_CANVAS_HEIGHT: f64 = 500.0;
pub const PADDING: f64 = 30.0;
pub const ROOM_GAP: f64 = 25.0;
pub const DIVIDER_STROKE: f64 = 5.0;

/// Which schematic arrangement to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "layout1")]
    OpenConcept,
    #[serde(rename = "layout2")]
    SeparateRooms,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::OpenConcept, Layout::SeparateRooms];

    pub fn code(&self) -> &'static str {
        match self {
            Layout::OpenConcept => "layout1",
            Layout::SeparateRooms => "layout2",
        }
    }

    /// Accepts "layout1"/"layout2" or the bare numbers
    pub fn from_code(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "layout1" | "1" => Ok(Layout::OpenConcept),
            "layout2" | "2" => Ok(Layout::SeparateRooms),
            _ => Err(EstimateError::invalid_input("layout", s, "Expected layout1 or layout2")),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Layout::OpenConcept => "LAYOUT 1: OPEN CONCEPT",
            Layout::SeparateRooms => "LAYOUT 2: SEPARATE ROOMS",
        }
    }
}

/// Room category, which decides its colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Bedroom,
    MasterBedroom,
    Kitchen,
    Bathroom,
    LivingDining,
}

impl RoomKind {
    pub fn fill(&self) -> &'static str {
        match self {
            RoomKind::Bedroom => "#ffe6e6",
            RoomKind::MasterBedroom => "#ffe6cc",
            RoomKind::Kitchen => "#fff8dc",
            RoomKind::Bathroom => "#e6f8f8",
            RoomKind::LivingDining => "#e6f2ff",
        }
    }

    pub fn stroke(&self) -> &'static str {
        match self {
            RoomKind::Bedroom => "#cc6666",
            RoomKind::MasterBedroom => "#d9a574",
            RoomKind::Kitchen => "#8b7500",
            RoomKind::Bathroom => "#66cccc",
            RoomKind::LivingDining => "#4a90e2",
        }
    }
}

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the interiors intersect (shared edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// True when `other` lies entirely within this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// A labelled room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub kind: RoomKind,
    /// Label text, one entry per rendered line
    pub label: Vec<String>,
    /// Illustrative "L × W" annotation in feet
    pub dimension_note: Option<String>,
    pub rect: Rect,
}

/// Wall divider line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub fill: String,
}

/// A computed floor-plan diagram, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanLayout {
    pub layout: Layout,
    pub width: f64,
    pub height: f64,
    /// Outer wall; every room lies inside it
    pub boundary: Rect,
    pub rooms: Vec<RoomRect>,
    pub dividers: Vec<Divider>,
    /// Top-left of the legend block
    pub legend_origin: (f64, f64),
    pub legend: Vec<LegendEntry>,
    pub title: String,
    pub footer: String,
}

/// Compute the room decomposition for a plot.
///
/// # Errors
///
/// `InvalidInput` when a plot dimension is not positive or `num_floors` is 0.
pub fn compute_layout(
    plot_length_ft: f64,
    plot_width_ft: f64,
    num_floors: u32,
    layout: Layout,
) -> EstimateResult<FloorPlanLayout> {
    for (field, value) in [("plot_length", plot_length_ft), ("plot_width", plot_width_ft)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(EstimateError::invalid_input(
                field,
                value.to_string(),
                "Must be a number greater than 0",
            ));
        }
    }
    if num_floors == 0 {
        return Err(EstimateError::invalid_input("num_floors", "0", "Must be greater than 0"));
    }

    let width = (plot_length_ft * SCALE_PX_PER_FT).trunc().max(MIN_CANVAS_WIDTH);
    let height = (plot_width_ft * SCALE_PX_PER_FT).trunc().max(MIN_CANVAS_HEIGHT);
    let boundary = Rect::new(PADDING, PADDING, width - 2.0 * PADDING, height - 2.0 * PADDING);

    let (rooms, dividers) = match layout {
        Layout::OpenConcept => open_concept(&boundary, plot_length_ft, plot_width_ft),
        Layout::SeparateRooms => separate_rooms(&boundary, plot_length_ft, plot_width_ft),
    };

    let legend = [
        ("Bedrooms", RoomKind::Bedroom),
        ("Kitchen", RoomKind::Kitchen),
        ("Living Area", RoomKind::LivingDining),
        ("Bathroom", RoomKind::Bathroom),
    ]
    .into_iter()
    .map(|(label, kind)| LegendEntry {
        label: label.to_string(),
        fill: kind.fill().to_string(),
    })
    .collect();

    let plural = if num_floors != 1 { "s" } else { "" };
    let footer = format!("{plot_length_ft}ft × {plot_width_ft}ft | {num_floors} Floor{plural}");

    debug!(layout = layout.code(), width, height, rooms = rooms.len(), "computed floor plan");

    Ok(FloorPlanLayout {
        layout,
        width,
        height,
        boundary,
        rooms,
        dividers,
        legend_origin: (width - 180.0, height - 120.0),
        legend,
        title: layout.title().to_string(),
        footer,
    })
}

fn room(kind: RoomKind, label: &[&str], note: Option<String>, rect: Rect) -> RoomRect {
    RoomRect {
        kind,
        label: label.iter().map(|s| s.to_string()).collect(),
        dimension_note: note,
        rect,
    }
}

fn dims(length: f64, width: f64) -> String {
    format!("{length:.0} × {width:.0}")
}

fn open_concept(area: &Rect, length_ft: f64, width_ft: f64) -> (Vec<RoomRect>, Vec<Divider>) {
    let g = ROOM_GAP;
    let kitchen_w = (area.width - g) * 0.28;
    let rooms_x = area.x + kitchen_w + g;
    let rooms_w = area.width - kitchen_w - g;
    let row_h = (area.height - g) * 0.48;
    let lower_y = area.y + row_h + g;

    let rooms = vec![
        room(
            RoomKind::Kitchen,
            &["KITCHEN"],
            Some(dims(length_ft / 3.0, width_ft)),
            Rect::new(area.x, area.y, kitchen_w, area.height),
        ),
        room(
            RoomKind::Bedroom,
            &["BEDROOM 1"],
            Some(dims(length_ft / 4.0, width_ft / 2.0)),
            Rect::new(rooms_x, area.y, rooms_w * 0.5 - g / 2.0, row_h),
        ),
        room(
            RoomKind::Bedroom,
            &["BEDROOM 2"],
            Some(dims(length_ft / 4.0, width_ft / 2.0)),
            Rect::new(rooms_x + rooms_w * 0.5 + g / 2.0, area.y, rooms_w * 0.5 - g / 2.0, row_h),
        ),
        room(
            RoomKind::MasterBedroom,
            &["MASTER", "BEDROOM"],
            Some(dims(length_ft / 3.0, width_ft / 2.0)),
            Rect::new(rooms_x, lower_y, rooms_w * 0.65 - g / 2.0, row_h),
        ),
        room(
            RoomKind::Bathroom,
            &["BATHROOM"],
            None,
            Rect::new(rooms_x + rooms_w * 0.65 + g / 2.0, lower_y, rooms_w * 0.35 - g / 2.0, row_h),
        ),
    ];

    let divider_x = area.x + kitchen_w + g / 2.0;
    let dividers = vec![Divider {
        x1: divider_x,
        y1: area.y,
        x2: divider_x,
        y2: area.bottom(),
        stroke_width: DIVIDER_STROKE,
        dashed: true,
    }];

    (rooms, dividers)
}

fn separate_rooms(area: &Rect, length_ft: f64, width_ft: f64) -> (Vec<RoomRect>, Vec<Divider>) {
    let g = ROOM_GAP;
    let net_w = area.width - 2.0 * g;
    let bed_w = net_w / 3.0;
    let bath_w = net_w / 4.0;
    let kitchen_w = net_w * 0.35;
    let row_h = (area.height - g) * 0.5;
    let lower_y = area.y + row_h + g;

    let master_x = area.x + 2.0 * bed_w + 2.0 * g;
    let living_x = area.x + bath_w + kitchen_w + 2.0 * g;

    let rooms = vec![
        room(RoomKind::Bedroom, &["BEDROOM", "1"], None, Rect::new(area.x, area.y, bed_w, row_h)),
        room(
            RoomKind::Bedroom,
            &["BEDROOM", "2"],
            None,
            Rect::new(area.x + bed_w + g, area.y, bed_w, row_h),
        ),
        room(
            RoomKind::MasterBedroom,
            &["MASTER", "BEDROOM"],
            None,
            Rect::new(master_x, area.y, area.right() - master_x, row_h),
        ),
        room(RoomKind::Bathroom, &["BATH"], None, Rect::new(area.x, lower_y, bath_w, row_h)),
        room(
            RoomKind::Kitchen,
            &["KITCHEN"],
            Some(dims(length_ft / 3.0, width_ft / 2.0)),
            Rect::new(area.x + bath_w + g, lower_y, kitchen_w, row_h),
        ),
        room(
            RoomKind::LivingDining,
            &["LIVING", "DINING"],
            None,
            Rect::new(living_x, lower_y, area.right() - living_x, row_h),
        ),
    ];

    (rooms, Vec::new())
}

/// Render a computed layout as a standalone SVG document.
pub fn render_svg(plan: &FloorPlanLayout) -> String {
    plan.to_string()
}

impl fmt::Display for FloorPlanLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(
            f,
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
        )?;
        writeln!(f, "  <defs>")?;
        writeln!(f, "    <style>")?;
        writeln!(f, "      .room-label {{ font-family: Arial, sans-serif; font-weight: bold; font-size: 13px; fill: #333; }}")?;
        writeln!(f, "      .room-note {{ font-family: Arial, sans-serif; font-size: 9px; fill: #666; }}")?;
        writeln!(f, "      .legend-text {{ font-family: Arial, sans-serif; font-size: 11px; fill: #333; }}")?;
        writeln!(f, "    </style>")?;
        writeln!(f, "  </defs>")?;
        writeln!(f, r##"  <rect width="{w}" height="{h}" fill="#ffffff" stroke="#333" stroke-width="2"/>"##)?;

        let b = &self.boundary;
        writeln!(
            f,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000000" stroke-width="3"/>"##,
            b.x, b.y, b.width, b.height
        )?;

        for room in &self.rooms {
            let r = &room.rect;
            writeln!(
                f,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="2" rx="3"/>"#,
                r.x,
                r.y,
                r.width,
                r.height,
                room.kind.fill(),
                room.kind.stroke()
            )?;
            let (cx, cy) = r.center();
            let lines = room.label.len() as f64;
            let mut y = cy - 9.0 * (lines - 1.0);
            for line in &room.label {
                writeln!(
                    f,
                    r#"  <text x="{cx:.2}" y="{y:.2}" text-anchor="middle" class="room-label">{line}</text>"#
                )?;
                y += 18.0;
            }
            if let Some(note) = &room.dimension_note {
                writeln!(
                    f,
                    r#"  <text x="{cx:.2}" y="{y:.2}" text-anchor="middle" class="room-note">{note}</text>"#
                )?;
            }
        }

        for d in &self.dividers {
            let dash = if d.dashed { r#" stroke-dasharray="5,5""# } else { "" };
            writeln!(
                f,
                r##"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#333" stroke-width="{}"{dash}/>"##,
                d.x1, d.y1, d.x2, d.y2, d.stroke_width
            )?;
        }

        let (lx, ly) = self.legend_origin;
        writeln!(f, r#"  <g transform="translate({lx}, {ly})">"#)?;
        writeln!(f, r##"    <text x="0" y="0" font-size="12" font-weight="bold" fill="#333">Legend:</text>"##)?;
        for (i, entry) in self.legend.iter().enumerate() {
            let top = 15.0 + 23.0 * i as f64;
            writeln!(
                f,
                r##"    <rect x="0" y="{top}" width="18" height="15" fill="{}" stroke="#333" stroke-width="1"/>"##,
                entry.fill
            )?;
            writeln!(
                f,
                r#"    <text x="25" y="{}" class="legend-text">{}</text>"#,
                top + 12.0,
                entry.label
            )?;
        }
        writeln!(f, "  </g>")?;

        writeln!(
            f,
            r##"  <text x="{}" y="25" font-size="18" font-weight="bold" text-anchor="middle" fill="#000">{}</text>"##,
            w / 2.0,
            self.title
        )?;
        writeln!(
            f,
            r##"  <text x="{}" y="{}" font-size="12" text-anchor="middle" fill="#666">{}</text>"##,
            w / 2.0,
            h - 8.0,
            self.footer
        )?;
        write!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(plan: &FloorPlanLayout) {
        for (i, a) in plan.rooms.iter().enumerate() {
            assert!(a.rect.width > 0.0 && a.rect.height > 0.0, "{:?}", a.label);
            assert!(plan.boundary.contains(&a.rect), "{:?} outside boundary", a.label);
            for b in &plan.rooms[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{:?} overlaps {:?}", a.label, b.label);
            }
        }
    }

    #[test]
    fn test_rooms_disjoint_and_inside() {
        for layout in Layout::ALL {
            for (l, w) in [(30.0, 40.0), (60.0, 30.0), (250.0, 400.0), (10.0, 10.0)] {
                let plan = compute_layout(l, w, 2, layout).unwrap();
                assert_well_formed(&plan);
            }
        }
    }

    #[test]
    fn test_minimum_canvas() {
        let plan = compute_layout(30.0, 40.0, 1, Layout::SeparateRooms).unwrap();
        assert_eq!(plan.width, 600.0);
        assert_eq!(plan.height, 500.0);
        let big = compute_layout(300.0, 200.0, 1, Layout::SeparateRooms).unwrap();
        assert_eq!(big.width, 900.0);
        assert_eq!(big.height, 600.0);
    }

    #[test]
    fn test_open_concept_proportions() {
        let plan = compute_layout(30.0, 40.0, 2, Layout::OpenConcept).unwrap();
        assert_eq!(plan.rooms.len(), 5);
        let kitchen = &plan.rooms[0];
        assert_eq!(kitchen.kind, RoomKind::Kitchen);
        // usable width 540, (540 - 25) × 0.28
        assert!((kitchen.rect.width - 144.2).abs() < 1e-9);
        assert_eq!(kitchen.rect.height, 440.0);
        assert_eq!(kitchen.dimension_note.as_deref(), Some("10 × 40"));
        assert_eq!(plan.dividers.len(), 1);
        assert!(plan.dividers[0].dashed);
        assert_eq!(plan.dividers[0].stroke_width, DIVIDER_STROKE);
    }

    #[test]
    fn test_separate_rooms_fill_width() {
        let plan = compute_layout(30.0, 40.0, 2, Layout::SeparateRooms).unwrap();
        assert_eq!(plan.rooms.len(), 6);
        let master = &plan.rooms[2];
        let living = &plan.rooms[5];
        assert!((master.rect.right() - plan.boundary.right()).abs() < 1e-9);
        assert!((living.rect.right() - plan.boundary.right()).abs() < 1e-9);
        // bath quarter of (540 - 50)
        assert!((plan.rooms[3].rect.width - 122.5).abs() < 1e-9);
        assert!(plan.dividers.is_empty());
    }

    #[test]
    fn test_svg_contains_labels_title_footer() {
        for layout in Layout::ALL {
            let plan = compute_layout(30.0, 40.0, 2, layout).unwrap();
            let svg = render_svg(&plan);
            assert!(svg.starts_with("<svg"));
            assert!(svg.ends_with("</svg>"));
            for room in &plan.rooms {
                for line in &room.label {
                    assert!(svg.contains(line.as_str()), "{line} missing");
                }
            }
            assert!(svg.contains(layout.title()));
            assert!(svg.contains("30ft × 40ft | 2 Floors"));
            assert!(svg.contains("Living Area"));
        }
    }

    #[test]
    fn test_single_floor_footer() {
        let plan = compute_layout(25.5, 40.0, 1, Layout::OpenConcept).unwrap();
        assert_eq!(plan.footer, "25.5ft × 40ft | 1 Floor");
    }

    #[test]
    fn test_legend_position() {
        let plan = compute_layout(30.0, 40.0, 2, Layout::OpenConcept).unwrap();
        assert_eq!(plan.legend_origin, (420.0, 380.0));
        assert_eq!(plan.legend.len(), 4);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(compute_layout(0.0, 40.0, 1, Layout::OpenConcept).is_err());
        assert!(compute_layout(30.0, -1.0, 1, Layout::OpenConcept).is_err());
        assert!(compute_layout(30.0, 40.0, 0, Layout::OpenConcept).is_err());
    }

    #[test]
    fn test_layout_codes() {
        assert_eq!(Layout::from_code("1").unwrap(), Layout::OpenConcept);
        assert_eq!(Layout::from_code("layout2").unwrap(), Layout::SeparateRooms);
        assert!(Layout::from_code("3").is_err());
    }
}
