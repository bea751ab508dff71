use crate::geometry::ResizeHandle;
use crate::model::{
    ElementId, FillStyle, NotebookId, PageId, Rgba, Roundness, StrokeStyle, TextAlign,
    VerticalAlign,
};
use crate::templates::Template;

use super::Tool;

/// Everything the chrome can ask the editor to do.
///
/// Drawing, moving, resizing and marquee points are page-local world
/// coordinates. Panning and zooming points are screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SelectTool(Tool),

    StartDrawing { page: PageId, point: egui::Pos2 },
    Drawing(egui::Pos2),

    StartMoving(egui::Pos2),
    Moving(egui::Pos2),
    StartResizing { point: egui::Pos2, handle: ResizeHandle },
    Resizing(egui::Pos2),

    StartPanning(egui::Pos2),
    Panning(egui::Pos2),
    Zoom { point: egui::Pos2, delta_y: f32 },
    ZoomIn,
    ZoomOut,
    ResetZoom,
    WheelPan(egui::Vec2),

    StartMarquee { page: PageId, point: egui::Pos2 },
    Marquee(egui::Pos2),

    FinishInteraction,

    SelectElement { page: PageId, element: ElementId },
    ToggleElementInSelection { page: PageId, element: ElementId },
    ClearSelection,
    DeleteSelectedElement,

    StartEditingText { page: PageId, element: ElementId },
    EditElementText(String),
    CreateBoundText { page: PageId, container: ElementId },
    CreateEdgeLabel { page: PageId, edge: ElementId },

    UpdateElementProperties(ElementProperties),
    FitContainerToText,
    WrapTextInContainer,

    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,

    Undo,
    Redo,

    AddNotebook,
    AddPage { notebook: NotebookId, template: Template },
    DeletePage { notebook: NotebookId, page: PageId },
    SelectPage { notebook: NotebookId, page: PageId },
    RenameNotebook { notebook: NotebookId, name: String },
    RenamePage { notebook: NotebookId, page: PageId, name: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectTool(_) => "select-tool",
            Action::StartDrawing { .. } => "start-drawing",
            Action::Drawing(_) => "drawing",
            Action::StartMoving(_) => "start-moving",
            Action::Moving(_) => "moving",
            Action::StartResizing { .. } => "start-resizing",
            Action::Resizing(_) => "resizing",
            Action::StartPanning(_) => "start-panning",
            Action::Panning(_) => "panning",
            Action::Zoom { .. } => "zoom",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::ResetZoom => "reset-zoom",
            Action::WheelPan(_) => "wheel-pan",
            Action::StartMarquee { .. } => "start-marquee",
            Action::Marquee(_) => "marquee",
            Action::FinishInteraction => "finish-interaction",
            Action::SelectElement { .. } => "select-element",
            Action::ToggleElementInSelection { .. } => "toggle-element",
            Action::ClearSelection => "clear-selection",
            Action::DeleteSelectedElement => "delete-selected",
            Action::StartEditingText { .. } => "start-editing-text",
            Action::EditElementText(_) => "edit-text",
            Action::CreateBoundText { .. } => "create-bound-text",
            Action::CreateEdgeLabel { .. } => "create-edge-label",
            Action::UpdateElementProperties(_) => "update-properties",
            Action::FitContainerToText => "fit-container",
            Action::WrapTextInContainer => "wrap-text",
            Action::BringToFront => "bring-to-front",
            Action::SendToBack => "send-to-back",
            Action::BringForward => "bring-forward",
            Action::SendBackward => "send-backward",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::AddNotebook => "add-notebook",
            Action::AddPage { .. } => "add-page",
            Action::DeletePage { .. } => "delete-page",
            Action::SelectPage { .. } => "select-page",
            Action::RenameNotebook { .. } => "rename-notebook",
            Action::RenamePage { .. } => "rename-page",
        }
    }
}

/// Partial style/text update. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementProperties {
    pub stroke: Option<Rgba>,
    pub fill: Option<Rgba>,
    pub fill_style: Option<FillStyle>,
    pub stroke_width: Option<f32>,
    pub stroke_style: Option<StrokeStyle>,
    pub roundness: Option<Roundness>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
}

impl ElementProperties {
    /// Whether applying this patch can change a text element's layout.
    pub fn affects_text_layout(&self) -> bool {
        self.font_size.is_some() || self.font_family.is_some() || self.vertical_align.is_some()
    }
}
