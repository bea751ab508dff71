use crate::model::{Element, ElementId, ElementKind, Page};

use super::{Editor, ElementProperties, bindings};

fn apply_properties(element: &mut Element, props: &ElementProperties) {
    let style = &mut element.style;
    if let Some(stroke) = props.stroke {
        style.stroke = stroke;
    }
    if let Some(width) = props.stroke_width {
        style.stroke_width = width;
    }
    if let Some(stroke_style) = props.stroke_style {
        style.stroke_style = stroke_style;
    }
    match &mut element.kind {
        ElementKind::Rectangle { roundness } => {
            if let Some(r) = props.roundness {
                *roundness = r;
            }
        }
        ElementKind::Text(body) => {
            if let Some(size) = props.font_size {
                body.font_size = size.max(1.0);
            }
            if let Some(family) = &props.font_family {
                body.font_family = family.clone();
            }
            if let Some(align) = props.text_align {
                body.text_align = align;
            }
            if let Some(valign) = props.vertical_align {
                body.vertical_align = Some(valign);
            }
        }
        ElementKind::Ellipse
        | ElementKind::Line { .. }
        | ElementKind::Arrow { .. }
        | ElementKind::Freedraw { .. }
        | ElementKind::Curve { .. } => {}
    }
    // Edges and strokes stay unfilled.
    if element.is_container() {
        if let Some(fill) = props.fill {
            element.style.fill = fill;
        }
        if let Some(fill_style) = props.fill_style {
            element.style.fill_style = fill_style;
        }
    }
}

/// Position of `id` in paint order plus the ordered ids.
fn z_rank(page: &Page, id: ElementId) -> Option<(usize, Vec<ElementId>)> {
    let order = page.z_order();
    let rank = order.iter().position(|e| *e == id)?;
    Some((rank, order))
}

impl Editor {
    /// Applies `props` to every selected element and folds them into the
    /// style used for new elements.
    pub(super) fn update_element_properties(&mut self, props: ElementProperties) {
        if !self.is_idle() {
            self.ignored("update properties");
            return;
        }
        self.merge_default_style(&props);
        let Some(page_id) = self.selection.page() else {
            return;
        };
        let mut next = self.document().clone();
        let Some(page) = next.page_mut(page_id) else {
            return;
        };
        let ids = self.selection.ids().to_vec();
        for id in &ids {
            if let Some(element) = page.element_mut(*id) {
                apply_properties(element, &props);
            }
        }
        if props.affects_text_layout() {
            for id in &ids {
                bindings::relayout_text(self.metrics.as_ref(), page, *id);
            }
        }
        self.commit(next);
    }

    fn merge_default_style(&mut self, props: &ElementProperties) {
        let style = &mut self.default_style;
        if let Some(v) = props.stroke {
            style.stroke = v;
        }
        if let Some(v) = props.fill {
            style.fill = v;
        }
        if let Some(v) = props.fill_style {
            style.fill_style = v;
        }
        if let Some(v) = props.stroke_width {
            style.stroke_width = v;
        }
        if let Some(v) = props.stroke_style {
            style.stroke_style = v;
        }
        if let Some(v) = props.roundness {
            style.roundness = v;
        }
        if let Some(v) = props.font_size {
            style.font_size = v.max(1.0);
        }
        if let Some(v) = &props.font_family {
            style.font_family = v.clone();
        }
    }

    /// Runs a z-order edit on the single selected element and commits it.
    fn reorder(&mut self, what: &str, edit: impl FnOnce(&mut Page, ElementId)) {
        if !self.is_idle() {
            self.ignored(what);
            return;
        }
        let Some(sel) = self.selection.as_single() else {
            log::debug!("{what}: needs exactly one selected element");
            return;
        };
        let mut next = self.document().clone();
        let Some(page) = next.page_mut(sel.page) else {
            return;
        };
        if page.elements.len() < 2 {
            return;
        }
        edit(page, sel.element);
        self.commit(next);
    }

    pub(super) fn bring_to_front(&mut self) {
        self.reorder("bring to front", |page, id| {
            let Some((rank, order)) = z_rank(page, id) else {
                return;
            };
            if rank + 1 == order.len() {
                return;
            }
            let top = page.elements.iter().map(|e| e.z_index).max().unwrap_or(0);
            if let Some(e) = page.element_mut(id) {
                e.z_index = top + 1;
            }
        });
    }

    pub(super) fn send_to_back(&mut self) {
        self.reorder("send to back", |page, id| {
            let Some((rank, _)) = z_rank(page, id) else {
                return;
            };
            if rank == 0 {
                return;
            }
            let bottom = page.elements.iter().map(|e| e.z_index).min().unwrap_or(0);
            if let Some(e) = page.element_mut(id) {
                e.z_index = bottom - 1;
            }
        });
    }

    /// Swaps z with the neighbour one step up (`delta > 0`) or down.
    pub(super) fn move_layer_by(&mut self, delta: i32) {
        let what = if delta > 0 {
            "bring forward"
        } else {
            "send backward"
        };
        self.reorder(what, |page, id| {
            let Some((rank, order)) = z_rank(page, id) else {
                return;
            };
            let neighbour = if delta > 0 {
                order.get(rank + 1)
            } else {
                rank.checked_sub(1).and_then(|r| order.get(r))
            };
            let Some(&other) = neighbour else {
                return;
            };
            let (Some(a), Some(b)) = (
                page.element(id).map(|e| e.z_index),
                page.element(other).map(|e| e.z_index),
            ) else {
                return;
            };
            // Equal z values would make the swap a no-op.
            let (a, b) = if a == b {
                if delta > 0 { (a + 1, b) } else { (a - 1, b) }
            } else {
                (b, a)
            };
            if let Some(e) = page.element_mut(id) {
                e.z_index = a;
            }
            if let Some(e) = page.element_mut(other) {
                e.z_index = b;
            }
        });
    }
}

#[cfg(test)]
#[path = "elements_test.rs"]
mod tests;
