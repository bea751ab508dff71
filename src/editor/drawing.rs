use crate::geometry::curve_control_point;
use crate::model::{Bbox, Element, ElementKind, PageId, Point, TextBody};

use super::{Editor, ElementRef, InteractionState, Selection, Tool};

impl Editor {
    /// Zero-size element of the current tool's kind at `at`, or `None` for
    /// tools that do not create anything.
    fn new_element(&mut self, at: Point) -> Option<Element> {
        let style = &self.default_style;
        let (kind, element_style) = match self.tool {
            Tool::Select | Tool::Hand => return None,
            Tool::Rectangle => (
                ElementKind::Rectangle {
                    roundness: style.roundness,
                },
                style.shape_style(),
            ),
            Tool::Ellipse => (ElementKind::Ellipse, style.shape_style()),
            Tool::Line => (ElementKind::Line { points: [at, at] }, style.stroke_only_style()),
            Tool::Arrow => (ElementKind::Arrow { points: [at, at] }, style.stroke_only_style()),
            Tool::Freedraw => (
                ElementKind::Freedraw { points: vec![at] },
                style.stroke_only_style(),
            ),
            Tool::Curve => (
                ElementKind::Curve {
                    points: [at, at, at],
                },
                style.stroke_only_style(),
            ),
            Tool::Text => (
                ElementKind::Text(TextBody::new(
                    "",
                    style.font_size,
                    style.font_family.clone(),
                )),
                style.text_style(),
            ),
        };
        Some(Element {
            id: self.alloc.next_id(),
            x: at.x,
            y: at.y,
            width: 0.0,
            height: 0.0,
            style: element_style,
            z_index: 0,
            seed: self.alloc.next_seed(),
            kind,
        })
    }

    pub(super) fn start_drawing(&mut self, page_id: PageId, point: egui::Pos2) {
        if !self.is_idle() {
            self.ignored("start drawing");
            return;
        }
        let Some(z_index) = self.page(page_id).map(|p| p.max_z_index() + 1) else {
            log::debug!("draw: unknown page {page_id}");
            return;
        };
        let at = Point::from_pos2(point);
        let Some(mut element) = self.new_element(at) else {
            self.ignored("start drawing with a non-drawing tool");
            return;
        };
        element.z_index = z_index;
        let current = ElementRef {
            page: page_id,
            element: element.id,
        };
        let is_text = matches!(element.kind, ElementKind::Text(_));

        self.begin_pending();
        if let Some(page) = self.history.present_mut().page_mut(page_id) {
            page.elements.push(element);
        }
        self.transient.current = Some(current);
        if is_text {
            self.selection = Selection::Single(current);
            self.interaction = InteractionState::EditingText;
        } else {
            self.transient.anchor = Some(at);
            self.selection = Selection::None;
            self.interaction = InteractionState::Drawing;
        }
    }

    /// Recomputes the element under construction from the drag anchor and
    /// `point`. Freehand strokes accumulate instead.
    pub(super) fn drawing(&mut self, point: egui::Pos2) {
        if self.interaction != InteractionState::Drawing {
            self.ignored("drawing");
            return;
        }
        let (Some(current), Some(anchor)) = (self.transient.current, self.transient.anchor) else {
            return;
        };
        let Some(element) = self
            .history
            .present_mut()
            .page_mut(current.page)
            .and_then(|p| p.element_mut(current.element))
        else {
            return;
        };
        let p = Point::from_pos2(point);
        if element.is_container() {
            element.set_bbox(Bbox::from_min_max(anchor.to_pos2(), point));
            return;
        }
        match &mut element.kind {
            ElementKind::Line { points } | ElementKind::Arrow { points } => {
                *points = [anchor, p];
            }
            ElementKind::Curve { points } => {
                *points = [anchor, curve_control_point(anchor, p), p];
            }
            ElementKind::Freedraw { points } => points.push(p),
            ElementKind::Rectangle { .. } | ElementKind::Ellipse | ElementKind::Text(_) => {}
        }
        element.sync_bbox_from_points();
    }
}

#[cfg(test)]
#[path = "drawing_test.rs"]
mod tests;
