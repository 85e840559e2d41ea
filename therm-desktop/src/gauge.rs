//! Thermometer gauge
//!
//! All geometry is expressed in canvas coordinates (origin at the top-left of
//! a 150 x 400 canvas) and translated to screen space only when painting.
//!
//! The scale runs from 0 °C at `y = 330` to 50 °C at `y = 50`. The fill grows
//! upwards from `y = 370` so its rounded base sits inside the bulb.

use egui::{pos2, vec2, Align2, Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use therm_protocol::ColorBand;

/// Canvas size
pub const CANVAS_SIZE: Vec2 = Vec2::new(150.0, 400.0);

/// Highest temperature on the scale
pub const SCALE_MAX_C: f32 = 50.0;

/// Scale length in pixels
const SCALE_PX: f32 = 280.0;

/// Tick spacing in degrees
const TICK_STEP_C: u32 = 10;

/// Bottom edge of the fill
const FILL_BASE_Y: f32 = 370.0;

const CANVAS_BG: Color32 = Color32::from_rgb(35, 35, 35);
const BODY_COLOR: Color32 = Color32::from_rgb(50, 50, 50);
const TICK_COLOR: Color32 = Color32::from_rgb(150, 150, 150);

/// Gradient brightening for the top of the fill, in percent
const FILL_HIGHLIGHT_PERCENT: u32 = 120;

/// Segments per rounded corner
const CORNER_SEGMENTS: usize = 8;

/// Segments per circle
const CIRCLE_SEGMENTS: usize = 48;

/// Fill height in pixels for a temperature
///
/// Truncates like an integer cast, then clamps to the 0-50 °C scale.
pub fn fill_height(celsius: f32) -> f32 {
    let height = (SCALE_PX as f64 * (celsius as f64 / SCALE_MAX_C as f64)).trunc() as f32;
    if height.is_nan() {
        return 0.0;
    }
    height.clamp(0.0, SCALE_PX)
}

/// Tick marks as `(degrees, y)` pairs, bottom to top
pub fn tick_marks() -> impl Iterator<Item = (u32, f32)> {
    let max = SCALE_MAX_C as u32;
    (0..=max).step_by(TICK_STEP_C as usize).map(move |deg| {
        let offset = SCALE_PX as u32 * deg / max;
        (deg, 300.0 - offset as f32 + 30.0)
    })
}

/// Brighten a color by `percent` (100 = unchanged), saturating each channel
pub fn lighter(color: Color32, percent: u32) -> Color32 {
    let scale = |c: u8| ((c as u32 * percent + 50) / 100).min(255) as u8;
    Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Gauge geometry and colors for one temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    /// Fill height in pixels
    pub fill_height: f32,
    /// Color band of the temperature
    pub band: ColorBand,
}

impl GaugeLayout {
    /// Compute the layout for a Celsius value
    pub fn for_celsius(celsius: f32) -> Self {
        Self {
            fill_height: fill_height(celsius),
            band: ColorBand::classify(celsius),
        }
    }

    /// Thermometer body (tube)
    pub fn body_rect() -> Rect {
        Rect::from_min_size(pos2(40.0, 20.0), vec2(70.0, 300.0))
    }

    /// Fill column, empty at 0 °C
    pub fn fill_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(45.0, FILL_BASE_Y - self.fill_height),
            vec2(60.0, self.fill_height),
        )
    }

    /// Base fill color for the band
    pub fn base_color(&self) -> Color32 {
        let [r, g, b] = self.band.rgb();
        Color32::from_rgb(r, g, b)
    }

    /// Fill color at the top of the gradient
    pub fn highlight_color(&self) -> Color32 {
        lighter(self.base_color(), FILL_HIGHLIGHT_PERCENT)
    }

    /// Fill color at canvas height `y`
    ///
    /// The gradient spans the fill column; points outside it take the
    /// nearest end color.
    pub fn shade_at(&self, y: f32) -> Color32 {
        if self.fill_height <= 0.0 {
            return self.base_color();
        }
        let top = FILL_BASE_Y - self.fill_height;
        lerp_color(
            self.highlight_color(),
            self.base_color(),
            (y - top) / self.fill_height,
        )
    }
}

/// Outline of a rounded rectangle, clockwise from the top-left corner
fn rounded_rect_outline(rect: Rect, radius: f32) -> Vec<Pos2> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let corners = [
        (pos2(rect.min.x + r, rect.min.y + r), 180.0_f32),
        (pos2(rect.max.x - r, rect.min.y + r), 270.0),
        (pos2(rect.max.x - r, rect.max.y - r), 0.0),
        (pos2(rect.min.x + r, rect.max.y - r), 90.0),
    ];

    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (center, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let angle = (start + 90.0 * i as f32 / CORNER_SEGMENTS as f32).to_radians();
            points.push(center + vec2(angle.cos(), angle.sin()) * r);
        }
    }
    points
}

fn circle_outline(center: Pos2, radius: f32) -> Vec<Pos2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Triangle fan over a convex outline with per-vertex colors
fn shaded_fan(points: &[Pos2], offset: Vec2, shade: impl Fn(f32) -> Color32) -> Mesh {
    let mut mesh = Mesh::default();
    if points.len() < 3 {
        return mesh;
    }

    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let centroid = (sum / points.len() as f32).to_pos2();
    mesh.colored_vertex(centroid + offset, shade(centroid.y));
    for p in points {
        mesh.colored_vertex(*p + offset, shade(p.y));
    }

    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Allocate the canvas and paint the thermometer for `celsius`
pub fn paint(ui: &mut Ui, celsius: f32) {
    let (response, painter) = ui.allocate_painter(CANVAS_SIZE, Sense::hover());
    let rect = response.rect;
    let offset = rect.min.to_vec2();
    let layout = GaugeLayout::for_celsius(celsius);

    painter.rect_filled(rect, 0.0, CANVAS_BG);

    // Body
    painter.rect_filled(GaugeLayout::body_rect().translate(offset), 20.0, BODY_COLOR);
    painter.circle_filled(pos2(75.0, 335.0) + offset, 35.0, BODY_COLOR);

    // Fill
    let shade = |y: f32| layout.shade_at(y);
    if layout.fill_height > 0.0 {
        let column = rounded_rect_outline(layout.fill_rect(), 15.0);
        painter.add(Shape::mesh(shaded_fan(&column, offset, shade)));
    }
    let bulb = circle_outline(pos2(75.0, 330.0), 30.0);
    painter.add(Shape::mesh(shaded_fan(&bulb, offset, shade)));

    // Scale
    for (deg, y) in tick_marks() {
        painter.line_segment(
            [pos2(30.0, y) + offset, pos2(40.0, y) + offset],
            Stroke::new(1.0, TICK_COLOR),
        );
        painter.text(
            pos2(10.0, y + 5.0) + offset,
            Align2::LEFT_BOTTOM,
            format!("{}°C", deg),
            FontId::proportional(11.0),
            TICK_COLOR,
        );
    }
}
