//! Keeps bound text and edge labels attached to their owners.

use crate::geometry::{center_in_container, center_on_point};
use crate::model::{Bbox, Element, ElementId, Page, Point};
use crate::text_metrics::TextMetrics;

/// Writes `updated` over the page elements with matching ids.
pub(super) fn replace_elements(page: &mut Page, updated: Vec<Element>) {
    for element in updated {
        if let Some(slot) = page.element_mut(element.id) {
            *slot = element;
        }
    }
}

/// Text elements bound to or labelling any of `owners`.
pub(super) fn dependents_of(page: &Page, owners: &[ElementId]) -> Vec<ElementId> {
    page.elements
        .iter()
        .filter(|e| {
            e.text().is_some_and(|t| {
                t.container_id.is_some_and(|c| owners.contains(&c))
                    || t.attached_to_id.is_some_and(|a| owners.contains(&a))
            })
        })
        .map(|e| e.id)
        .collect()
}

/// Sizes a bound text from its content (wrapping at the container's inner
/// width when `wrap` is set) and places it per its vertical alignment.
pub(super) fn layout_bound_text(metrics: &dyn TextMetrics, text: &mut Element, container: Bbox) {
    let Some(body) = text.text() else {
        return;
    };
    let padding = body.padding;
    let inner = (container.width - padding * 2.0).max(1.0);
    let max_width = body.wrap.then_some(inner);
    let m = metrics.measure(&body.text, body.font_size, &body.font_family, max_width);
    let (w, h) = (m.width.max(1.0), m.height.max(1.0));
    let origin = center_in_container(
        container,
        w,
        h,
        body.vertical_align.unwrap_or_default(),
        padding,
    );
    text.set_bbox(Bbox::new(origin.x, origin.y, w, h));
}

pub(super) fn layout_label(label: &mut Element, midpoint: Point) {
    let origin = center_on_point(midpoint, label.width, label.height);
    label.x = origin.x;
    label.y = origin.y;
}

/// Fits a free-standing text to its content. Wrapping text keeps its width
/// (at least 10) and only grows or shrinks vertically.
pub(super) fn remeasure_text(metrics: &dyn TextMetrics, text: &mut Element) {
    let Some(body) = text.text() else {
        return;
    };
    let (w, h) = if body.wrap {
        let w = text.width.max(10.0);
        let m = metrics.measure(&body.text, body.font_size, &body.font_family, Some(w));
        (w, m.height)
    } else {
        let m = metrics.measure(&body.text, body.font_size, &body.font_family, None);
        (m.width, m.height)
    };
    text.width = w;
    text.height = h;
}

enum Anchor {
    Container(Bbox),
    Edge(Point),
}

/// Re-lays every text bound to or labelling one of `owners` against the
/// owner's current geometry.
pub(super) fn reconcile_dependents(metrics: &dyn TextMetrics, page: &mut Page, owners: &[ElementId]) {
    let anchors: Vec<(ElementId, Anchor)> = owners
        .iter()
        .filter_map(|id| {
            let owner = page.element(*id)?;
            if owner.is_container() {
                Some((*id, Anchor::Container(owner.bbox())))
            } else {
                owner.edge_midpoint().map(|mid| (*id, Anchor::Edge(mid)))
            }
        })
        .collect();
    if anchors.is_empty() {
        return;
    }
    let find = |id: Option<ElementId>| {
        let id = id?;
        anchors.iter().find(|(owner, _)| *owner == id).map(|(_, a)| a)
    };

    for element in page.elements.iter_mut() {
        let Some((container, attached)) = element
            .text()
            .map(|t| (t.container_id, t.attached_to_id))
        else {
            continue;
        };
        if let Some(Anchor::Container(bbox)) = find(container) {
            layout_bound_text(metrics, element, *bbox);
        } else if let Some(Anchor::Edge(mid)) = find(attached) {
            layout_label(element, *mid);
        }
    }
}

/// Re-lays each of `ids` that is bound to a container still on the page.
/// Bound text never leaves its container, even when dragged on its own.
pub(super) fn pin_bound_texts(metrics: &dyn TextMetrics, page: &mut Page, ids: &[ElementId]) {
    for id in ids {
        let container = page
            .element(*id)
            .and_then(Element::text)
            .and_then(|t| t.container_id)
            .and_then(|c| page.element(c))
            .filter(|c| c.is_container())
            .map(Element::bbox);
        let (Some(bbox), Some(text)) = (container, page.element_mut(*id)) else {
            continue;
        };
        layout_bound_text(metrics, text, bbox);
    }
}

/// Lays out a single text against whatever it is attached to, or fits it to
/// its content when free-standing.
pub(super) fn relayout_text(metrics: &dyn TextMetrics, page: &mut Page, id: ElementId) {
    let Some(body) = page.element(id).and_then(Element::text) else {
        return;
    };
    let container = body
        .container_id
        .and_then(|c| page.element(c))
        .filter(|c| c.is_container())
        .map(Element::bbox);
    let midpoint = body
        .attached_to_id
        .and_then(|a| page.element(a))
        .and_then(Element::edge_midpoint);

    let Some(text) = page.element_mut(id) else {
        return;
    };
    match (container, midpoint) {
        (Some(bbox), _) => layout_bound_text(metrics, text, bbox),
        (None, Some(mid)) => {
            remeasure_text(metrics, text);
            layout_label(text, mid);
        }
        (None, None) => remeasure_text(metrics, text),
    }
}

#[cfg(test)]
#[path = "bindings_test.rs"]
mod tests;
