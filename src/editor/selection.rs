use crate::geometry;
use crate::model::{Bbox, ElementId, PageId, Point};

use super::{Editor, ElementRef, InteractionState, Tool, bindings};

/// Selected elements, always scoped to a single page. A multi-selection holds
/// at least two ids; constructors collapse smaller sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Single(ElementRef),
    Multi {
        page: PageId,
        elements: Vec<ElementId>,
    },
}

impl Selection {
    pub fn single(page: PageId, element: ElementId) -> Self {
        Selection::Single(ElementRef { page, element })
    }

    /// Builds a selection from ids on `page`, dropping duplicates.
    pub fn from_ids(page: PageId, ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut elements: Vec<ElementId> = Vec::new();
        for id in ids {
            if !elements.contains(&id) {
                elements.push(id);
            }
        }
        match elements.as_slice() {
            [] => Selection::None,
            [only] => Selection::single(page, *only),
            _ => Selection::Multi { page, elements },
        }
    }

    pub fn page(&self) -> Option<PageId> {
        match self {
            Selection::None => None,
            Selection::Single(r) => Some(r.page),
            Selection::Multi { page, .. } => Some(*page),
        }
    }

    pub fn ids(&self) -> &[ElementId] {
        match self {
            Selection::None => &[],
            Selection::Single(r) => std::slice::from_ref(&r.element),
            Selection::Multi { elements, .. } => elements,
        }
    }

    pub fn as_single(&self) -> Option<ElementRef> {
        match self {
            Selection::Single(r) => Some(*r),
            _ => None,
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Adds or removes `id`. Toggling on another page starts over there.
    pub fn toggled(&self, page: PageId, id: ElementId) -> Selection {
        if self.page() != Some(page) {
            return Selection::single(page, id);
        }
        let mut ids = self.ids().to_vec();
        if let Some(pos) = ids.iter().position(|e| *e == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        Selection::from_ids(page, ids)
    }

    pub fn without(&self, removed: &[ElementId]) -> Selection {
        let Some(page) = self.page() else {
            return Selection::None;
        };
        Selection::from_ids(
            page,
            self.ids().iter().copied().filter(|id| !removed.contains(id)),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct MarqueeState {
    pub page: PageId,
    pub start: Point,
    pub current: Point,
}

impl MarqueeState {
    pub fn rect(&self) -> Bbox {
        Bbox::from_min_max(self.start.to_pos2(), self.current.to_pos2())
    }

    pub fn diagonal(&self) -> f32 {
        (self.current.to_pos2() - self.start.to_pos2()).length()
    }
}

impl Editor {
    pub(super) fn select_tool(&mut self, tool: Tool) {
        if !self.is_idle() {
            self.ignored("select tool");
            return;
        }
        self.tool = tool;
        self.selection = Selection::None;
    }

    pub(super) fn select_element(&mut self, page: PageId, element: ElementId) {
        if !self.is_idle() {
            self.ignored("select element");
            return;
        }
        let Some(el) = self.element(page, element) else {
            log::debug!("select: no element {element} on page {page}");
            return;
        };
        let el = el.clone();
        self.default_style.absorb(&el);
        self.selection = Selection::single(page, element);
        self.tool = Tool::Select;
    }

    pub(super) fn toggle_element(&mut self, page: PageId, element: ElementId) {
        if !self.is_idle() {
            self.ignored("toggle element");
            return;
        }
        if self.element(page, element).is_none() {
            log::debug!("toggle: no element {element} on page {page}");
            return;
        }
        self.selection = self.selection.toggled(page, element);
        self.tool = Tool::Select;
    }

    pub(super) fn clear_selection(&mut self) {
        if !self.is_idle() {
            self.ignored("clear selection");
            return;
        }
        self.selection = Selection::None;
    }

    /// Removes the selection along with any text bound to or labelling a
    /// removed element.
    pub(super) fn delete_selected(&mut self) {
        if !self.is_idle() {
            self.ignored("delete");
            return;
        }
        let Some(page_id) = self.selection.page() else {
            return;
        };
        let mut next = self.document().clone();
        let Some(page) = next.page_mut(page_id) else {
            return;
        };
        let mut doomed = self.selection.ids().to_vec();
        doomed.extend(bindings::dependents_of(page, &doomed));
        page.elements.retain(|e| !doomed.contains(&e.id));
        self.selection = Selection::None;
        self.commit(next);
    }

    pub(super) fn start_marquee(&mut self, page: PageId, point: egui::Pos2) {
        if !self.is_idle() {
            self.ignored("start marquee");
            return;
        }
        if self.page(page).is_none() {
            log::debug!("marquee: unknown page {page}");
            return;
        }
        let start = Point::from_pos2(point);
        self.transient.marquee = Some(MarqueeState {
            page,
            start,
            current: start,
        });
        self.interaction = InteractionState::MarqueeSelecting;
    }

    pub(super) fn marquee(&mut self, point: egui::Pos2) {
        if self.interaction != InteractionState::MarqueeSelecting {
            self.ignored("marquee");
            return;
        }
        if let Some(m) = self.transient.marquee.as_mut() {
            m.current = Point::from_pos2(point);
        }
    }

    /// Replaces the selection with every element whose bbox overlaps the
    /// marquee. Drags shorter than the threshold count as a click.
    pub(super) fn finish_marquee(&mut self) {
        let Some(m) = self.transient.marquee.take() else {
            return;
        };
        if m.diagonal() < self.settings.marquee_threshold {
            self.selection = Selection::None;
            return;
        }
        let rect = m.rect();
        let Some(page) = self.page(m.page) else {
            return;
        };
        let hits: Vec<ElementId> = page
            .z_order()
            .into_iter()
            .filter(|id| page.element(*id).is_some_and(|e| e.bbox().intersects(rect)))
            .collect();
        self.selection = Selection::from_ids(m.page, hits);
    }

    /// Union bbox of the selected elements.
    pub fn selection_bounds(&self) -> Option<Bbox> {
        let page = self.page(self.selection.page()?)?;
        geometry::group_bounds(
            self.selection
                .ids()
                .iter()
                .filter_map(|id| page.element(*id)),
        )
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
