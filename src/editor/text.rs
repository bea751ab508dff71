use crate::geometry::{center_in_container, center_on_point};
use crate::model::{
    Element, ElementId, ElementKind, PageId, Rgba, Roundness, Style, TextAlign, TextBody,
    VerticalAlign,
};

use super::{Editor, ElementRef, InteractionState, Selection, Tool, bindings};

impl Editor {
    pub(super) fn start_editing_text(&mut self, page: PageId, element: ElementId) {
        if !self.is_idle() {
            self.ignored("start editing text");
            return;
        }
        if self.element(page, element).and_then(Element::text).is_none() {
            log::debug!("edit text: {element} on page {page} is not a text element");
            return;
        }
        self.begin_pending();
        let current = ElementRef { page, element };
        self.transient.current = Some(current);
        self.selection = Selection::Single(current);
        self.tool = Tool::Select;
        self.interaction = InteractionState::EditingText;
    }

    /// Replaces the edited text and re-lays it out against its container,
    /// its edge, or its own content.
    pub(super) fn edit_element_text(&mut self, text: String) {
        if self.interaction != InteractionState::EditingText {
            self.ignored("edit text");
            return;
        }
        let Some(current) = self.transient.current else {
            return;
        };
        let Some(page) = self.history.present_mut().page_mut(current.page) else {
            return;
        };
        let Some(body) = page.element_mut(current.element).and_then(Element::text_mut) else {
            return;
        };
        body.text = text;
        bindings::relayout_text(self.metrics.as_ref(), page, current.element);
    }

    /// Drops the element being edited when its text is blank.
    pub(super) fn finish_text_editing(&mut self) {
        self.tool = Tool::Select;
        let Some(current) = self.transient.current else {
            return;
        };
        let Some(page) = self.history.present_mut().page_mut(current.page) else {
            return;
        };
        let blank = page
            .element(current.element)
            .and_then(Element::text)
            .is_some_and(TextBody::is_blank);
        if blank {
            log::debug!("discarding blank text {}", current.element);
            page.elements.retain(|e| e.id != current.element);
            self.selection = Selection::None;
        }
    }

    fn new_text(&mut self, body: TextBody, width: f32, height: f32, z_index: i32) -> Element {
        Element {
            id: self.alloc.next_id(),
            x: 0.0,
            y: 0.0,
            width: width.max(1.0),
            height: height.max(1.0),
            style: self.default_style.text_style(),
            z_index,
            seed: self.alloc.next_seed(),
            kind: ElementKind::Text(body),
        }
    }

    fn enter_editing(&mut self, page: PageId, element: Element) {
        let current = ElementRef {
            page,
            element: element.id,
        };
        self.begin_pending();
        if let Some(p) = self.history.present_mut().page_mut(page) {
            p.elements.push(element);
        }
        self.transient.current = Some(current);
        self.selection = Selection::Single(current);
        self.interaction = InteractionState::EditingText;
    }

    /// Empty, centred, wrapping text inside a rectangle or ellipse.
    pub(super) fn create_bound_text(&mut self, page: PageId, container: ElementId) {
        if !self.is_idle() {
            self.ignored("create bound text");
            return;
        }
        let Some(owner) = self.element(page, container).filter(|e| e.is_container()) else {
            log::debug!("bound text: {container} is not a container on page {page}");
            return;
        };
        let (bbox, z) = (owner.bbox(), owner.z_index);

        let mut body = TextBody::new(
            "",
            self.default_style.font_size,
            self.default_style.font_family.clone(),
        );
        body.text_align = TextAlign::Center;
        body.vertical_align = Some(VerticalAlign::Middle);
        body.wrap = true;
        body.container_id = Some(container);
        body.padding = self.settings.bound_text_padding;

        let m = self
            .metrics
            .measure("", body.font_size, &body.font_family, None);
        let mut text = self.new_text(body, m.width, m.height, z + 1);
        let origin = center_in_container(
            bbox,
            text.width,
            text.height,
            VerticalAlign::Middle,
            self.settings.bound_text_padding,
        );
        text.x = origin.x;
        text.y = origin.y;
        self.enter_editing(page, text);
    }

    /// Empty label on a white background centred on a line or arrow.
    pub(super) fn create_edge_label(&mut self, page: PageId, edge: ElementId) {
        if !self.is_idle() {
            self.ignored("create edge label");
            return;
        }
        let Some((mid, z)) = self
            .element(page, edge)
            .and_then(|e| e.edge_midpoint().map(|mid| (mid, e.z_index)))
        else {
            log::debug!("edge label: {edge} is not an edge on page {page}");
            return;
        };

        let mut body = TextBody::new(
            "",
            self.default_style.font_size,
            self.default_style.font_family.clone(),
        );
        body.text_align = TextAlign::Center;
        body.attached_to_id = Some(edge);
        body.padding = self.settings.edge_label_padding;
        body.background = Rgba::WHITE;

        let m = self
            .metrics
            .measure("", body.font_size, &body.font_family, None);
        let mut text = self.new_text(body, m.width, m.height, z + 1);
        let origin = center_on_point(mid, text.width, text.height);
        text.x = origin.x;
        text.y = origin.y;
        self.enter_editing(page, text);
    }

    /// Grows (or shrinks) the selected container around its bound text.
    pub(super) fn fit_container_to_text(&mut self) {
        if !self.is_idle() {
            self.ignored("fit container");
            return;
        }
        let Some(sel) = self.selection.as_single() else {
            return;
        };
        let mut next = self.document().clone();
        let Some(page) = next.page_mut(sel.page) else {
            return;
        };
        let Some(container) = page.element(sel.element).filter(|e| e.is_container()) else {
            log::debug!("fit container: selection is not a container");
            return;
        };
        let (cx, cy) = (container.x, container.y);
        let Some(text) = page.bound_texts(sel.element).next() else {
            log::debug!("fit container: no bound text");
            return;
        };
        let text_id = text.id;
        let Some(body) = text.text() else {
            return;
        };
        let padding = body.padding;
        let inner_w = text.width.max(1.0);
        let m = self
            .metrics
            .measure(&body.text, body.font_size, &body.font_family, Some(inner_w));
        let min = self.settings.min_container_size;
        let width = (m.width.max(inner_w) + padding * 2.0).max(min);
        let height = (m.height + padding * 2.0).max(min);

        if let Some(c) = page.element_mut(sel.element) {
            c.width = width;
            c.height = height;
        }
        if let Some(t) = page.element_mut(text_id) {
            t.x = cx + padding;
            t.y = cy + padding;
            t.width = width - padding * 2.0;
            t.height = height - padding * 2.0;
        }
        self.commit(next);
    }

    /// Puts a padded rectangle behind the selected free text and binds the
    /// text to it. The new rectangle becomes the selection.
    pub(super) fn wrap_text_in_container(&mut self) {
        if !self.is_idle() {
            self.ignored("wrap text");
            return;
        }
        let Some(sel) = self.selection.as_single() else {
            return;
        };
        let Some(page) = self.page(sel.page) else {
            return;
        };
        let Some(text) = page
            .element(sel.element)
            .filter(|e| e.text().is_some_and(|t| t.container_id.is_none()))
            .cloned()
        else {
            log::debug!("wrap text: selection is not a free text element");
            return;
        };
        let max_z = page.max_z_index();
        let Some(body) = text.text() else {
            return;
        };
        let padding = if body.padding > 0.0 {
            body.padding
        } else {
            self.settings.bound_text_padding
        };
        let m = self
            .metrics
            .measure(&body.text, body.font_size, &body.font_family, None);
        let min = self.settings.min_container_size;

        let container = Element {
            id: self.alloc.next_id(),
            x: text.x - padding,
            y: text.y - padding,
            width: (m.width + padding * 2.0).max(min),
            height: (m.height + padding * 2.0).max(min),
            style: Style {
                stroke: Rgba::rgb(0x49, 0x50, 0x57),
                fill: Rgba::WHITE,
                stroke_width: 2.0,
                ..Style::default()
            },
            z_index: max_z + 1,
            seed: self.alloc.next_seed(),
            kind: ElementKind::Rectangle {
                roundness: Roundness::Sharp,
            },
        };

        let mut bound = text.clone();
        bound.x = container.x + padding;
        bound.y = container.y + padding;
        bound.width = container.width - padding * 2.0;
        bound.height = container.height - padding * 2.0;
        bound.z_index = max_z + 2;
        if let Some(b) = bound.text_mut() {
            b.container_id = Some(container.id);
            b.wrap = true;
            b.text_align = TextAlign::Center;
            b.vertical_align = Some(VerticalAlign::Middle);
            b.padding = padding;
        }

        let container_id = container.id;
        let mut next = self.document().clone();
        let Some(page) = next.page_mut(sel.page) else {
            return;
        };
        page.elements.retain(|e| e.id != sel.element);
        page.elements.push(container);
        page.elements.push(bound);
        self.commit(next);
        self.selection = Selection::single(sel.page, container_id);
    }
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
