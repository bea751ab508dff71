use serde::{Deserialize, Serialize};

use crate::ids::Allocator;
use crate::model::{Element, ElementKind, Point, Rgba, Style, TextBody};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    Blank,
    Cornell,
}

/// Produces the starting elements of a new page.
pub trait TemplateSource {
    fn create_template_elements(&self, template: Template, alloc: &mut Allocator) -> Vec<Element>;
}

const CUES_COLUMN_WIDTH: f32 = 180.0;
const SUMMARY_HEIGHT: f32 = 150.0;
const TOP_MARGIN: f32 = 80.0;
const BOTTOM_MARGIN: f32 = 20.0;
const SIDE_MARGIN: f32 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct BuiltinTemplates {
    pub page_width: f32,
    pub page_height: f32,
    pub font_family: String,
}

impl Default for BuiltinTemplates {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            font_family: "'Kalam', cursive".to_string(),
        }
    }
}

struct Builder<'a> {
    alloc: &'a mut Allocator,
    z: i32,
    out: Vec<Element>,
}

impl Builder<'_> {
    fn next_z(&mut self) -> i32 {
        self.z += 1;
        self.z
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: &str,
        font_size: f32,
        font_family: &str,
        color: Rgba,
    ) {
        let z_index = self.next_z();
        self.out.push(Element {
            id: self.alloc.next_id(),
            x,
            y,
            width,
            height,
            style: Style {
                stroke: color,
                stroke_width: 0.0,
                ..Style::default()
            },
            z_index,
            seed: self.alloc.next_seed(),
            kind: ElementKind::Text(TextBody::new(text, font_size, font_family)),
        });
    }

    fn divider(&mut self, a: Point, b: Point) {
        let z_index = self.next_z();
        let mut line = Element {
            id: self.alloc.next_id(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            style: Style {
                stroke: Rgba::rgb(0xcc, 0xcc, 0xcc),
                stroke_width: 1.0,
                ..Style::default()
            },
            z_index,
            seed: self.alloc.next_seed(),
            kind: ElementKind::Line { points: [a, b] },
        };
        line.sync_bbox_from_points();
        self.out.push(line);
    }
}

impl BuiltinTemplates {
    fn cornell(&self, alloc: &mut Allocator) -> Vec<Element> {
        let font = self.font_family.as_str();
        let summary_top = self.page_height - SUMMARY_HEIGHT - BOTTOM_MARGIN;
        let mut b = Builder {
            alloc,
            z: 0,
            out: Vec::new(),
        };

        b.text(30.0, 20.0, 150.0, 28.0, "Topic/Title:", 24.0, font, Rgba::INK);
        b.text(
            30.0,
            50.0,
            250.0,
            20.0,
            "Essential question(s):",
            16.0,
            font,
            Rgba::rgb(0x55, 0x55, 0x55),
        );

        b.divider(
            Point::new(CUES_COLUMN_WIDTH, TOP_MARGIN),
            Point::new(CUES_COLUMN_WIDTH, summary_top),
        );
        b.divider(
            Point::new(SIDE_MARGIN, summary_top),
            Point::new(self.page_width - SIDE_MARGIN, summary_top),
        );

        let heading = Rgba::rgb(0x33, 0x33, 0x33);
        b.text(30.0, TOP_MARGIN + 10.0, 100.0, 24.0, "Cues", 20.0, font, heading);
        b.text(
            CUES_COLUMN_WIDTH + 20.0,
            TOP_MARGIN + 10.0,
            100.0,
            24.0,
            "Notes",
            20.0,
            font,
            heading,
        );
        b.text(30.0, summary_top + 10.0, 100.0, 24.0, "Summary", 20.0, font, heading);

        b.out
    }
}

impl TemplateSource for BuiltinTemplates {
    fn create_template_elements(&self, template: Template, alloc: &mut Allocator) -> Vec<Element> {
        match template {
            Template::Blank => Vec::new(),
            Template::Cornell => self.cornell(alloc),
        }
    }
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
