use serde::{Deserialize, Serialize};

pub type ElementId = u64;
pub type PageId = u64;
pub type NotebookId = u64;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Axis-aligned bounding box. `width` and `height` are never negative once
/// produced by any of the constructors below.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Bbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bbox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_max(a: egui::Pos2, b: egui::Pos2) -> Self {
        let min = egui::pos2(a.x.min(b.x), a.y.min(b.y));
        let max = egui::pos2(a.x.max(b.x), a.y.max(b.y));
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn to_rect(self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x, self.y),
            egui::vec2(self.width, self.height),
        )
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Two boxes overlap iff each one's min is strictly below the other's max
    /// on both axes.
    pub fn intersects(self, other: Bbox) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn union(self, other: Bbox) -> Bbox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bbox::new(x, y, right - x, bottom - y)
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn expand(self, amount: f32) -> Bbox {
        Bbox::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const INK: Rgba = Rgba::rgb(0x1e, 0x1e, 0x1e);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb`, `#rgb` or the keyword `transparent`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    #[default]
    Solid,
    Hachure,
    CrossHatch,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Roundness {
    #[default]
    Sharp,
    Round,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Style {
    pub stroke: Rgba,
    pub fill: Rgba,
    pub fill_style: FillStyle,
    pub stroke_width: f32,
    pub stroke_style: StrokeStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Rgba::INK,
            fill: Rgba::TRANSPARENT,
            fill_style: FillStyle::Solid,
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
        }
    }
}

/// Style applied to newly created elements. Selecting an element copies its
/// style back into this, and property edits are merged into it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultStyle {
    pub stroke: Rgba,
    pub fill: Rgba,
    pub fill_style: FillStyle,
    pub stroke_width: f32,
    pub stroke_style: StrokeStyle,
    pub roundness: Roundness,
    pub font_size: f32,
    pub font_family: String,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            stroke: Rgba::INK,
            fill: Rgba::TRANSPARENT,
            fill_style: FillStyle::Solid,
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
            roundness: Roundness::Sharp,
            font_size: 24.0,
            font_family: "'Kalam', cursive".to_string(),
        }
    }
}

impl DefaultStyle {
    pub fn shape_style(&self) -> Style {
        Style {
            stroke: self.stroke,
            fill: self.fill,
            fill_style: self.fill_style,
            stroke_width: self.stroke_width,
            stroke_style: self.stroke_style,
        }
    }

    /// Lines, arrows, curves and strokes never take a fill.
    pub fn stroke_only_style(&self) -> Style {
        Style {
            fill: Rgba::TRANSPARENT,
            fill_style: FillStyle::Solid,
            ..self.shape_style()
        }
    }

    pub fn text_style(&self) -> Style {
        Style {
            stroke: self.stroke,
            fill: Rgba::TRANSPARENT,
            fill_style: FillStyle::Solid,
            stroke_width: 0.0,
            stroke_style: StrokeStyle::Solid,
        }
    }

    pub fn absorb(&mut self, element: &Element) {
        self.stroke = element.style.stroke;
        self.stroke_width = element.style.stroke_width;
        self.stroke_style = element.style.stroke_style;
        self.fill = element.style.fill;
        self.fill_style = element.style.fill_style;
        match &element.kind {
            ElementKind::Rectangle { roundness } => self.roundness = *roundness,
            ElementKind::Text(body) => {
                self.font_size = body.font_size;
                self.font_family = body.font_family.clone();
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TextBody {
    pub text: String,
    pub font_size: f32,
    pub font_family: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub container_id: Option<ElementId>,
    #[serde(default)]
    pub attached_to_id: Option<ElementId>,
    #[serde(default)]
    pub padding: f32,
    #[serde(default = "default_text_background")]
    pub background: Rgba,
}

fn default_text_background() -> Rgba {
    Rgba::TRANSPARENT
}

impl TextBody {
    pub fn new(text: impl Into<String>, font_size: f32, font_family: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_family: font_family.into(),
            text_align: TextAlign::Left,
            vertical_align: None,
            wrap: false,
            container_id: None,
            attached_to_id: None,
            padding: 0.0,
            background: Rgba::TRANSPARENT,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Rectangle {
        #[serde(default)]
        roundness: Roundness,
    },
    Ellipse,
    Line {
        points: [Point; 2],
    },
    Arrow {
        points: [Point; 2],
    },
    Freedraw {
        points: Vec<Point>,
    },
    Curve {
        points: [Point; 3],
    },
    Text(TextBody),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: Style,
    pub z_index: i32,
    pub seed: u32,
    pub kind: ElementKind,
}

impl Element {
    pub fn bbox(&self) -> Bbox {
        Bbox::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_bbox(&mut self, bbox: Bbox) {
        self.x = bbox.x;
        self.y = bbox.y;
        self.width = bbox.width;
        self.height = bbox.height;
    }

    pub fn points(&self) -> Option<&[Point]> {
        match &self.kind {
            ElementKind::Line { points } | ElementKind::Arrow { points } => Some(points),
            ElementKind::Curve { points } => Some(points),
            ElementKind::Freedraw { points } => Some(points),
            ElementKind::Rectangle { .. } | ElementKind::Ellipse | ElementKind::Text(_) => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut [Point]> {
        match &mut self.kind {
            ElementKind::Line { points } | ElementKind::Arrow { points } => Some(points),
            ElementKind::Curve { points } => Some(points),
            ElementKind::Freedraw { points } => Some(points),
            ElementKind::Rectangle { .. } | ElementKind::Ellipse | ElementKind::Text(_) => None,
        }
    }

    /// Recomputes the cached bbox from `points` for point-based kinds.
    pub fn sync_bbox_from_points(&mut self) {
        let Some(bbox) = self.points().and_then(aabb_of_points) else {
            return;
        };
        self.set_bbox(bbox);
    }

    pub fn text(&self) -> Option<&TextBody> {
        match &self.kind {
            ElementKind::Text(body) => Some(body),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextBody> {
        match &mut self.kind {
            ElementKind::Text(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Rectangle { .. } | ElementKind::Ellipse
        )
    }

    pub fn is_edge(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Line { .. } | ElementKind::Arrow { .. }
        )
    }

    pub fn edge_midpoint(&self) -> Option<Point> {
        match &self.kind {
            ElementKind::Line { points } | ElementKind::Arrow { points } => {
                Some(points[0].midpoint(points[1]))
            }
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ElementKind::Rectangle { .. } => "rectangle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Line { .. } => "line",
            ElementKind::Arrow { .. } => "arrow",
            ElementKind::Freedraw { .. } => "freedraw",
            ElementKind::Curve { .. } => "curve",
            ElementKind::Text(_) => "text",
        }
    }
}

pub fn aabb_of_points(points: &[Point]) -> Option<Bbox> {
    let mut it = points.iter();
    let first = it.next()?;
    let mut min = first.to_pos2();
    let mut max = first.to_pos2();
    for p in it {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Bbox::new(min.x, min.y, max.x - min.x, max.y - min.y))
}

pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len2 = ab.x * ab.x + ab.y * ab.y;
    if ab_len2 <= f32::EPSILON {
        return (p - a).length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / ab_len2;
    let t = t.clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(id: PageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn max_z_index(&self) -> i32 {
        self.elements.iter().map(|e| e.z_index).fold(0, i32::max)
    }

    /// Element ids ordered back to front. Ties keep insertion order.
    pub fn z_order(&self) -> Vec<ElementId> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered.into_iter().map(|e| e.id).collect()
    }

    pub fn bound_texts(&self, container_id: ElementId) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| {
            e.text()
                .is_some_and(|t| t.container_id == Some(container_id))
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    pub pages: Vec<Page>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLocation {
    pub notebook_index: usize,
    pub page_index: usize,
}

/// The whole notebook forest. Undo/redo snapshots are taken at this level.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub notebooks: Vec<Notebook>,
}

impl Document {
    pub fn find_page(&self, page_id: PageId) -> Option<PageLocation> {
        self.notebooks
            .iter()
            .enumerate()
            .find_map(|(notebook_index, notebook)| {
                let page_index = notebook.pages.iter().position(|p| p.id == page_id)?;
                Some(PageLocation {
                    notebook_index,
                    page_index,
                })
            })
    }

    pub fn page(&self, page_id: PageId) -> Option<&Page> {
        let loc = self.find_page(page_id)?;
        self.notebooks[loc.notebook_index].pages.get(loc.page_index)
    }

    pub fn page_mut(&mut self, page_id: PageId) -> Option<&mut Page> {
        let loc = self.find_page(page_id)?;
        self.notebooks[loc.notebook_index]
            .pages
            .get_mut(loc.page_index)
    }

    pub fn notebook(&self, notebook_id: NotebookId) -> Option<&Notebook> {
        self.notebooks.iter().find(|n| n.id == notebook_id)
    }

    pub fn notebook_mut(&mut self, notebook_id: NotebookId) -> Option<&mut Notebook> {
        self.notebooks.iter_mut().find(|n| n.id == notebook_id)
    }

    /// Every page in document order as `(notebook id, page id)`.
    pub fn flat_pages(&self) -> Vec<(NotebookId, PageId)> {
        self.notebooks
            .iter()
            .flat_map(|n| n.pages.iter().map(move |p| (n.id, p.id)))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.notebooks.iter().map(|n| n.pages.len()).sum()
    }

    pub fn notebook_of_page(&self, page_id: PageId) -> Option<NotebookId> {
        let loc = self.find_page(page_id)?;
        Some(self.notebooks[loc.notebook_index].id)
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
