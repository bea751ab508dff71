use crate::geometry::{
    self, ResizeHandle, resize_bbox, resize_element, scale_element_into, scale_factor,
    translate_element,
};
use crate::model::{Bbox, Element, ElementId, Page, PageId, Point};
use crate::text_metrics::TextMetrics;

use super::{Editor, InteractionState, bindings};

#[derive(Clone, Debug)]
pub(super) enum DragTarget {
    Single(Element),
    Group { bounds: Bbox, members: Vec<Element> },
}

impl DragTarget {
    fn members(&self) -> &[Element] {
        match self {
            DragTarget::Single(e) => std::slice::from_ref(e),
            DragTarget::Group { members, .. } => members,
        }
    }
}

/// Pre-drag copies every frame is computed from.
#[derive(Clone, Debug)]
pub(super) struct DragSnapshot {
    pub page: PageId,
    pub target: DragTarget,
    /// Bound texts and labels of moved elements that are not selected
    /// themselves.
    pub dependents: Vec<Element>,
}

fn snapshot_of(page: &Page, ids: &[ElementId]) -> Option<DragSnapshot> {
    let members: Vec<Element> = ids
        .iter()
        .filter_map(|id| page.element(*id).cloned())
        .collect();
    let target = match members.len() {
        0 => return None,
        1 => DragTarget::Single(members.into_iter().next()?),
        _ => DragTarget::Group {
            bounds: geometry::group_bounds(&members)?,
            members,
        },
    };
    let member_ids: Vec<ElementId> = target.members().iter().map(|e| e.id).collect();
    let dependents = bindings::dependents_of(page, &member_ids)
        .into_iter()
        .filter(|id| !member_ids.contains(id))
        .filter_map(|id| page.element(id).cloned())
        .collect();
    Some(DragSnapshot {
        page: page.id,
        target,
        dependents,
    })
}

/// Text resizes as a uniform font scale; the box takes the new width and is
/// re-measured for height with wrapping switched on.
fn resize_text(
    metrics: &dyn TextMetrics,
    element: &Element,
    handle: ResizeHandle,
    dx: f32,
    dy: f32,
) -> Element {
    let from = element.bbox();
    let to = resize_bbox(from, handle, dx, dy);
    let s = (scale_factor(to.width, from.width) * scale_factor(to.height, from.height))
        .abs()
        .sqrt();
    let mut out = element.clone();
    let mut height = to.height;
    if let Some(body) = out.text_mut() {
        body.font_size = (body.font_size * s).max(1.0);
        body.wrap = true;
        let m = metrics.measure(
            &body.text,
            body.font_size,
            &body.font_family,
            Some(to.width.max(1.0)),
        );
        height = m.height;
    }
    out.set_bbox(Bbox::new(to.x, to.y, to.width, height));
    out
}

/// Wraps a scaled text at its new width and takes the measured height.
fn fit_text_height(metrics: &dyn TextMetrics, element: &mut Element) {
    let width = element.width.max(1.0);
    let Some(body) = element.text_mut() else {
        return;
    };
    body.wrap = true;
    let m = metrics.measure(&body.text, body.font_size, &body.font_family, Some(width));
    element.height = m.height;
}

impl Editor {
    fn begin_drag(&mut self, point: egui::Pos2, what: &str) -> bool {
        if !self.is_idle() {
            self.ignored(what);
            return false;
        }
        let Some(page) = self.selection.page().and_then(|p| self.page(p)) else {
            log::debug!("{what}: nothing selected");
            return false;
        };
        let Some(snapshot) = snapshot_of(page, self.selection.ids()) else {
            log::debug!("{what}: selection no longer exists");
            return false;
        };
        self.begin_pending();
        self.transient.anchor = Some(Point::from_pos2(point));
        self.transient.snapshot = Some(snapshot);
        true
    }

    pub(super) fn start_moving(&mut self, point: egui::Pos2) {
        if self.begin_drag(point, "start moving") {
            self.interaction = InteractionState::Moving;
        }
    }

    pub(super) fn start_resizing(&mut self, point: egui::Pos2, handle: ResizeHandle) {
        if self.begin_drag(point, "start resizing") {
            self.transient.handle = Some(handle);
            self.interaction = InteractionState::Resizing;
        }
    }

    fn drag_delta(&self, point: egui::Pos2) -> Option<egui::Vec2> {
        let anchor = self.transient.anchor?;
        Some(point - anchor.to_pos2())
    }

    /// Translates the snapshot and its dependents by the pointer delta.
    pub(super) fn moving(&mut self, point: egui::Pos2) {
        if self.interaction != InteractionState::Moving {
            self.ignored("moving");
            return;
        }
        let (Some(delta), Some(snap)) = (self.drag_delta(point), self.transient.snapshot.as_ref())
        else {
            return;
        };
        let moved: Vec<Element> = snap
            .target
            .members()
            .iter()
            .chain(snap.dependents.iter())
            .map(|e| {
                let mut e = e.clone();
                translate_element(&mut e, delta);
                e
            })
            .collect();
        let ids: Vec<ElementId> = moved.iter().map(|e| e.id).collect();
        let page_id = snap.page;
        if let Some(page) = self.history.present_mut().page_mut(page_id) {
            bindings::replace_elements(page, moved);
            bindings::pin_bound_texts(self.metrics.as_ref(), page, &ids);
        }
    }

    pub(super) fn resizing(&mut self, point: egui::Pos2) {
        if self.interaction != InteractionState::Resizing {
            self.ignored("resizing");
            return;
        }
        let (Some(delta), Some(handle), Some(snap)) = (
            self.drag_delta(point),
            self.transient.handle,
            self.transient.snapshot.as_ref(),
        ) else {
            return;
        };
        let resized: Vec<Element> = match &snap.target {
            DragTarget::Single(e) if e.text().is_some() => {
                vec![resize_text(self.metrics.as_ref(), e, handle, delta.x, delta.y)]
            }
            DragTarget::Single(e) => vec![resize_element(e, handle, delta.x, delta.y)],
            DragTarget::Group { bounds, members } => {
                let target = resize_bbox(*bounds, handle, delta.x, delta.y);
                members
                    .iter()
                    .map(|m| {
                        let mut e = scale_element_into(m, *bounds, target);
                        fit_text_height(self.metrics.as_ref(), &mut e);
                        e
                    })
                    .collect()
            }
        };
        let owners: Vec<ElementId> = resized.iter().map(|e| e.id).collect();
        let page_id = snap.page;
        let Some(page) = self.history.present_mut().page_mut(page_id) else {
            return;
        };
        bindings::replace_elements(page, resized);
        bindings::reconcile_dependents(self.metrics.as_ref(), page, &owners);
        bindings::pin_bound_texts(self.metrics.as_ref(), page, &owners);
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
