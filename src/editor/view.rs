//! Read-only surface for renderers and hit testing.

use crate::geometry::hit_test_element;
use crate::model::{Bbox, DefaultStyle, Document, ElementId, NotebookId, Page, PageId, Point};

use super::{Camera, Editor, ElementRef, InteractionState, Selection, Tool};

/// One page of the visible spread, placed in world space.
#[derive(Clone, Copy, Debug)]
pub struct PageSlot<'a> {
    pub notebook: NotebookId,
    pub page: &'a Page,
    pub origin: Point,
    pub size: egui::Vec2,
}

impl PageSlot<'_> {
    pub fn world_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(self.origin.to_pos2(), self.size)
    }

    pub fn to_local(&self, world: egui::Pos2) -> egui::Pos2 {
        world - self.origin.to_pos2().to_vec2()
    }

    pub fn to_world(&self, local: egui::Pos2) -> egui::Pos2 {
        local + self.origin.to_pos2().to_vec2()
    }
}

/// The two facing pages around the active one. The left page always has an
/// even index within its notebook.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spread<'a> {
    pub left: Option<PageSlot<'a>>,
    pub right: Option<PageSlot<'a>>,
}

impl<'a> Spread<'a> {
    pub fn slots(&self) -> impl Iterator<Item = &PageSlot<'a>> {
        self.left.iter().chain(self.right.iter())
    }
}

#[derive(Clone, Debug)]
pub struct RenderView<'a> {
    pub document: &'a Document,
    pub spread: Spread<'a>,
    pub active_notebook: NotebookId,
    pub active_page: PageId,
    pub selection: &'a Selection,
    pub selection_bounds: Option<Bbox>,
    pub interaction: InteractionState,
    pub tool: Tool,
    pub camera: Camera,
    pub marquee: Option<Bbox>,
    pub current_element: Option<ElementRef>,
    pub default_style: &'a DefaultStyle,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl Editor {
    pub fn spread(&self) -> Spread<'_> {
        let doc = self.document();
        let Some(loc) = doc.find_page(self.active_page) else {
            return Spread::default();
        };
        let notebook = &doc.notebooks[loc.notebook_index];
        let left_index = loc.page_index - loc.page_index % 2;
        let size = egui::vec2(self.settings.page_width, self.settings.page_height);
        let slot = |index: usize, x: f32| {
            notebook.pages.get(index).map(|page| PageSlot {
                notebook: notebook.id,
                page,
                origin: Point::new(x, 0.0),
                size,
            })
        };
        Spread {
            left: slot(left_index, 0.0),
            right: slot(left_index + 1, self.settings.page_width + self.settings.page_gap),
        }
    }

    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            document: self.document(),
            spread: self.spread(),
            active_notebook: self.active_notebook,
            active_page: self.active_page,
            selection: &self.selection,
            selection_bounds: self.selection_bounds(),
            interaction: self.interaction,
            tool: self.tool,
            camera: self.camera,
            marquee: self.transient.marquee.map(|m| m.rect()),
            current_element: self.transient.current,
            default_style: &self.default_style,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Maps a screen point to the spread page under it and the page-local
    /// point.
    pub fn locate(&self, screen: egui::Pos2) -> Option<(PageId, egui::Pos2)> {
        let world = self.camera.screen_to_world(screen);
        self.spread()
            .slots()
            .find(|slot| slot.world_rect().contains(world))
            .map(|slot| (slot.page.id, slot.to_local(world)))
    }

    /// Topmost element on `page` under the page-local point.
    pub fn element_at(&self, page: PageId, point: egui::Pos2) -> Option<ElementId> {
        let page = self.page(page)?;
        let threshold_world = self.settings.hit_tolerance / self.camera.zoom.max(f32::EPSILON);
        page.z_order().into_iter().rev().find(|id| {
            page.element(*id)
                .is_some_and(|e| hit_test_element(e, point, threshold_world))
        })
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
