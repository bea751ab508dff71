use serde::{Deserialize, Serialize};

use crate::model::{self, Bbox, Element, ElementKind, Point, VerticalAlign};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    NW,
    N,
    NE,
    W,
    E,
    SW,
    S,
    SE,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::W,
        ResizeHandle::E,
        ResizeHandle::SW,
        ResizeHandle::S,
        ResizeHandle::SE,
    ];

    /// Handle position on a box, used by chrome to place grips.
    pub fn anchor_on(self, b: Bbox) -> Point {
        let (fx, fy) = match self {
            ResizeHandle::NW => (0.0, 0.0),
            ResizeHandle::N => (0.5, 0.0),
            ResizeHandle::NE => (1.0, 0.0),
            ResizeHandle::W => (0.0, 0.5),
            ResizeHandle::E => (1.0, 0.5),
            ResizeHandle::SW => (0.0, 1.0),
            ResizeHandle::S => (0.5, 1.0),
            ResizeHandle::SE => (1.0, 1.0),
        };
        Point::new(b.x + b.width * fx, b.y + b.height * fy)
    }
}

/// Moves the edges named by `handle` by `(dx, dy)`. A negative extent is
/// flipped back by shifting the origin, so the result never has a negative
/// width or height.
pub fn resize_bbox(b: Bbox, handle: ResizeHandle, dx: f32, dy: f32) -> Bbox {
    let mut out = b;
    match handle {
        ResizeHandle::NW => {
            out.x += dx;
            out.y += dy;
            out.width -= dx;
            out.height -= dy;
        }
        ResizeHandle::N => {
            out.y += dy;
            out.height -= dy;
        }
        ResizeHandle::NE => {
            out.y += dy;
            out.width += dx;
            out.height -= dy;
        }
        ResizeHandle::E => {
            out.width += dx;
        }
        ResizeHandle::SE => {
            out.width += dx;
            out.height += dy;
        }
        ResizeHandle::S => {
            out.height += dy;
        }
        ResizeHandle::SW => {
            out.x += dx;
            out.width -= dx;
            out.height += dy;
        }
        ResizeHandle::W => {
            out.x += dx;
            out.width -= dx;
        }
    }
    if out.width < 0.0 {
        out.x += out.width;
        out.width = -out.width;
    }
    if out.height < 0.0 {
        out.y += out.height;
        out.height = -out.height;
    }
    out
}

/// `new / old`, or 1 when the old extent is degenerate.
pub fn scale_factor(new: f32, old: f32) -> f32 {
    if old == 0.0 { 1.0 } else { new / old }
}

pub fn remap_point(p: Point, from: Bbox, to: Bbox) -> Point {
    let sx = scale_factor(to.width, from.width);
    let sy = scale_factor(to.height, from.height);
    Point::new(to.x + (p.x - from.x) * sx, to.y + (p.y - from.y) * sy)
}

/// Resizes a single element from its own bbox. Point kinds have every point
/// remapped into the new box and the bbox re-derived from them, so a flat
/// axis stays flat. Text geometry is left to the caller.
pub fn resize_element(element: &Element, handle: ResizeHandle, dx: f32, dy: f32) -> Element {
    let from = element.bbox();
    let to = resize_bbox(from, handle, dx, dy);
    let mut out = element.clone();
    out.set_bbox(to);
    if let Some(points) = out.points_mut() {
        for p in points.iter_mut() {
            *p = remap_point(*p, from, to);
        }
        out.sync_bbox_from_points();
    }
    out
}

/// Remaps an element living inside the shared box `from` so that it occupies
/// the same relative place in `to`. Text font size follows the area scale.
pub fn scale_element_into(element: &Element, from: Bbox, to: Bbox) -> Element {
    let sx = scale_factor(to.width, from.width);
    let sy = scale_factor(to.height, from.height);
    let mut out = element.clone();
    let origin = remap_point(Point::new(element.x, element.y), from, to);
    out.set_bbox(Bbox::new(
        origin.x,
        origin.y,
        element.width * sx,
        element.height * sy,
    ));
    if let Some(points) = out.points_mut() {
        for p in points.iter_mut() {
            *p = remap_point(*p, from, to);
        }
        out.sync_bbox_from_points();
    }
    if let Some(body) = out.text_mut() {
        body.font_size = (body.font_size * (sx * sy).abs().sqrt()).max(1.0);
    }
    out
}

/// Union bbox of every element, `None` when empty.
pub fn group_bounds<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Bbox> {
    elements
        .into_iter()
        .map(Element::bbox)
        .reduce(Bbox::union)
}

pub fn translate_element(element: &mut Element, delta_world: egui::Vec2) {
    element.x += delta_world.x;
    element.y += delta_world.y;
    if let Some(points) = element.points_mut() {
        for p in points.iter_mut() {
            *p = p.translated(delta_world.x, delta_world.y);
        }
    }
}

/// Control point of a freshly drawn curve: the chord midpoint pushed out
/// perpendicular by half the chord.
pub fn curve_control_point(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let mid = start.midpoint(end);
    Point::new(mid.x - dy * 0.5, mid.y + dx * 0.5)
}

/// Top-left corner of a `w`×`h` text block placed inside `container`.
pub fn center_in_container(
    container: Bbox,
    w: f32,
    h: f32,
    valign: VerticalAlign,
    padding: f32,
) -> Point {
    let x = container.x + (container.width - w) / 2.0;
    let y = match valign {
        VerticalAlign::Top => container.y + padding,
        VerticalAlign::Middle => container.y + (container.height - h) / 2.0,
        VerticalAlign::Bottom => container.bottom() - padding - h,
    };
    Point::new(x, y)
}

pub fn center_on_point(center: Point, w: f32, h: f32) -> Point {
    Point::new(center.x - w / 2.0, center.y - h / 2.0)
}

fn quadratic_point(p0: Point, c: Point, p1: Point, t: f32) -> egui::Pos2 {
    let u = 1.0 - t;
    egui::pos2(
        u * u * p0.x + 2.0 * u * t * c.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * c.y + t * t * p1.y,
    )
}

fn hit_test_polyline(points: &[egui::Pos2], world_pos: egui::Pos2, tolerance: f32) -> bool {
    match points {
        [] => false,
        [only] => (world_pos - *only).length() <= tolerance,
        _ => points
            .windows(2)
            .any(|w| model::distance_to_segment(world_pos, w[0], w[1]) <= tolerance),
    }
}

fn hit_test_ellipse(rect: egui::Rect, world_pos: egui::Pos2, threshold_world: f32) -> bool {
    let center = rect.center();
    let rx = rect.width() * 0.5 + threshold_world;
    let ry = rect.height() * 0.5 + threshold_world;
    if rx <= f32::EPSILON || ry <= f32::EPSILON {
        return false;
    }
    let v = world_pos - center;
    let dx = v.x / rx;
    let dy = v.y / ry;
    dx * dx + dy * dy <= 1.0
}

const CURVE_SAMPLES: usize = 24;

pub fn hit_test_element(element: &Element, world_pos: egui::Pos2, threshold_world: f32) -> bool {
    let tolerance = threshold_world + element.style.stroke_width;
    match &element.kind {
        ElementKind::Rectangle { .. } | ElementKind::Text(_) => element
            .bbox()
            .to_rect()
            .expand(threshold_world)
            .contains(world_pos),
        ElementKind::Ellipse => {
            hit_test_ellipse(element.bbox().to_rect(), world_pos, threshold_world)
        }
        ElementKind::Line { points } | ElementKind::Arrow { points } => {
            model::distance_to_segment(world_pos, points[0].to_pos2(), points[1].to_pos2())
                <= tolerance
        }
        ElementKind::Freedraw { points } => {
            let pts: Vec<egui::Pos2> = points.iter().map(|p| p.to_pos2()).collect();
            hit_test_polyline(&pts, world_pos, tolerance)
        }
        ElementKind::Curve { points } => {
            let [start, control, end] = *points;
            let pts: Vec<egui::Pos2> = (0..=CURVE_SAMPLES)
                .map(|i| quadratic_point(start, control, end, i as f32 / CURVE_SAMPLES as f32))
                .collect();
            hit_test_polyline(&pts, world_pos, tolerance)
        }
    }
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;
