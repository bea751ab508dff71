//! The interaction state machine.
//!
//! [`Editor`] owns the undoable [`Document`] history plus every piece of
//! transient state (tool, selection, camera, drag snapshots). Chrome feeds it
//! [`Action`]s through [`Editor::dispatch`] and reads back a [`RenderView`].

use serde::{Deserialize, Serialize};

use crate::geometry::ResizeHandle;
use crate::history::History;
use crate::ids::Allocator;
use crate::model::{
    DefaultStyle, Document, Element, ElementId, Notebook, NotebookId, Page, PageId, Point,
};
use crate::settings::EditorSettings;
use crate::templates::{BuiltinTemplates, TemplateSource};
use crate::text_metrics::{EstimatedMetrics, TextMetrics};

mod action;
mod bindings;
mod camera;
mod drawing;
mod elements;
mod interaction;
mod notebooks;
mod selection;
mod text;
mod transform;
mod view;

pub use action::{Action, ElementProperties};
pub use camera::Camera;
pub use selection::Selection;
pub use view::{PageSlot, RenderView, Spread};

use camera::PanOrigin;
use selection::MarqueeState;
use transform::DragSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Select,
    Hand,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Freedraw,
    Curve,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
    Panning,
    EditingText,
    MarqueeSelecting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub page: PageId,
    pub element: ElementId,
}

/// Per-gesture state. Reset wholesale when an interaction finishes.
#[derive(Clone, Debug, Default)]
struct Transient {
    current: Option<ElementRef>,
    anchor: Option<Point>,
    snapshot: Option<DragSnapshot>,
    handle: Option<ResizeHandle>,
    pan: Option<PanOrigin>,
    marquee: Option<MarqueeState>,
}

/// External services the editor calls into.
pub struct Collaborators {
    pub metrics: Box<dyn TextMetrics>,
    pub templates: Box<dyn TemplateSource>,
    pub alloc: Allocator,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            metrics: Box::new(EstimatedMetrics::default()),
            templates: Box::new(BuiltinTemplates::default()),
            alloc: Allocator::default(),
        }
    }
}

impl Collaborators {
    /// Built-in collaborators with sequential ids and a seeded RNG.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            alloc: Allocator::seeded(seed),
            ..Self::default()
        }
    }
}

pub struct Editor {
    history: History<Document>,
    settings: EditorSettings,
    metrics: Box<dyn TextMetrics>,
    templates: Box<dyn TemplateSource>,
    alloc: Allocator,

    tool: Tool,
    interaction: InteractionState,
    active_notebook: NotebookId,
    active_page: PageId,
    selection: Selection,
    camera: Camera,
    default_style: DefaultStyle,
    pending: Option<Document>,
    transient: Transient,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default(), Collaborators::default())
    }
}

impl Editor {
    /// Starts with a single notebook holding one blank page.
    pub fn new(settings: EditorSettings, collaborators: Collaborators) -> Self {
        let Collaborators {
            metrics,
            templates,
            mut alloc,
        } = collaborators;
        let notebook_id = alloc.next_id();
        let page_id = alloc.next_id();
        let document = Document {
            notebooks: vec![Notebook {
                id: notebook_id,
                name: "My First Notebook".to_string(),
                pages: vec![Page::new(page_id, "Page 1")],
            }],
        };
        log::debug!("editor created with notebook {notebook_id} page {page_id}");
        Self {
            history: History::new(document, settings.history_limit),
            camera: settings.default_camera,
            default_style: settings.default_style.clone(),
            settings,
            metrics,
            templates,
            alloc,
            tool: Tool::Select,
            interaction: InteractionState::Idle,
            active_notebook: notebook_id,
            active_page: page_id,
            selection: Selection::None,
            pending: None,
            transient: Transient::default(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {} while {:?}", action.name(), self.interaction);
        match action {
            Action::SelectTool(tool) => self.select_tool(tool),

            Action::StartDrawing { page, point } => self.start_drawing(page, point),
            Action::Drawing(point) => self.drawing(point),

            Action::StartMoving(point) => self.start_moving(point),
            Action::Moving(point) => self.moving(point),
            Action::StartResizing { point, handle } => self.start_resizing(point, handle),
            Action::Resizing(point) => self.resizing(point),

            Action::StartPanning(point) => self.start_panning(point),
            Action::Panning(point) => self.panning(point),
            Action::Zoom { point, delta_y } => self.zoom_at(point, delta_y),
            Action::ZoomIn => self.zoom_step(true),
            Action::ZoomOut => self.zoom_step(false),
            Action::ResetZoom => self.reset_zoom(),
            Action::WheelPan(delta) => self.wheel_pan(delta),

            Action::StartMarquee { page, point } => self.start_marquee(page, point),
            Action::Marquee(point) => self.marquee(point),

            Action::FinishInteraction => self.finish_interaction(),

            Action::SelectElement { page, element } => self.select_element(page, element),
            Action::ToggleElementInSelection { page, element } => {
                self.toggle_element(page, element)
            }
            Action::ClearSelection => self.clear_selection(),
            Action::DeleteSelectedElement => self.delete_selected(),

            Action::StartEditingText { page, element } => self.start_editing_text(page, element),
            Action::EditElementText(text) => self.edit_element_text(text),
            Action::CreateBoundText { page, container } => self.create_bound_text(page, container),
            Action::CreateEdgeLabel { page, edge } => self.create_edge_label(page, edge),

            Action::UpdateElementProperties(props) => self.update_element_properties(props),
            Action::FitContainerToText => self.fit_container_to_text(),
            Action::WrapTextInContainer => self.wrap_text_in_container(),

            Action::BringToFront => self.bring_to_front(),
            Action::SendToBack => self.send_to_back(),
            Action::BringForward => self.move_layer_by(1),
            Action::SendBackward => self.move_layer_by(-1),

            Action::Undo => self.undo(),
            Action::Redo => self.redo(),

            Action::AddNotebook => self.add_notebook(),
            Action::AddPage { notebook, template } => self.add_page(notebook, template),
            Action::DeletePage { notebook, page } => self.delete_page(notebook, page),
            Action::SelectPage { notebook, page } => self.select_page(notebook, page),
            Action::RenameNotebook { notebook, name } => self.rename_notebook(notebook, name),
            Action::RenamePage {
                notebook,
                page,
                name,
            } => self.rename_page(notebook, page, name),
        }
    }

    /// By-value form of [`Editor::dispatch`].
    pub fn transition(mut self, action: Action) -> Self {
        self.dispatch(action);
        self
    }

    pub fn document(&self) -> &Document {
        self.history.present()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn active_notebook(&self) -> NotebookId {
        self.active_notebook
    }

    pub fn active_page(&self) -> PageId {
        self.active_page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn default_style(&self) -> &DefaultStyle {
        &self.default_style
    }

    pub fn current_element(&self) -> Option<ElementRef> {
        self.transient.current
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn page(&self, page: PageId) -> Option<&Page> {
        self.document().page(page)
    }

    pub fn element(&self, page: PageId, element: ElementId) -> Option<&Element> {
        self.page(page)?.element(element)
    }

    fn ignored(&self, what: &str) {
        log::debug!("ignored {what} while {:?}", self.interaction);
    }

    fn is_idle(&self) -> bool {
        self.interaction == InteractionState::Idle
    }

    /// Captures the present as the undo step for a gesture about to mutate
    /// it in place.
    fn begin_pending(&mut self) {
        self.pending = Some(self.history.present().clone());
    }

    fn commit_pending(&mut self) {
        let Some(before) = self.pending.take() else {
            return;
        };
        if !self.history.record(before) {
            log::debug!("interaction left the document unchanged");
        }
    }

    fn commit(&mut self, next: Document) {
        if !self.history.commit(next) {
            log::debug!("edit produced no change, nothing committed");
        }
    }

    fn undo(&mut self) {
        if !self.is_idle() {
            self.ignored("undo");
            return;
        }
        if self.history.undo() {
            self.after_history_jump();
        }
    }

    fn redo(&mut self) {
        if !self.is_idle() {
            self.ignored("redo");
            return;
        }
        if self.history.redo() {
            self.after_history_jump();
        }
    }

    fn after_history_jump(&mut self) {
        self.selection = Selection::None;
        self.ensure_active_page();
    }

    /// Re-points the active page at an existing page after the document was
    /// swapped underneath it.
    fn ensure_active_page(&mut self) {
        let doc = self.history.present();
        if let Some(notebook) = doc.notebook_of_page(self.active_page) {
            self.active_notebook = notebook;
            return;
        }
        if let Some(&(notebook, page)) = doc.flat_pages().first() {
            log::debug!("active page {} vanished, switching to {page}", self.active_page);
            self.active_notebook = notebook;
            self.active_page = page;
        }
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
