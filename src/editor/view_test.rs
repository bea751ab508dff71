use super::*;
use crate::editor::{Action, Collaborators};
use crate::settings::EditorSettings;
use crate::templates::Template;

fn editor() -> Editor {
    let settings = EditorSettings {
        default_camera: Camera::new(0.0, 0.0, 1.0),
        ..EditorSettings::default()
    };
    Editor::new(settings, Collaborators::deterministic(23))
}

fn draw(ed: &mut Editor, tool: Tool, from: (f32, f32), to: (f32, f32)) -> ElementId {
    let page = ed.active_page();
    ed.dispatch(Action::SelectTool(tool));
    ed.dispatch(Action::StartDrawing {
        page,
        point: egui::pos2(from.0, from.1),
    });
    let id = ed.current_element().map(|r| r.element).unwrap_or_default();
    ed.dispatch(Action::Drawing(egui::pos2(to.0, to.1)));
    ed.dispatch(Action::FinishInteraction);
    id
}

#[test]
fn single_page_spread_has_no_right_side() {
    let ed = editor();
    let spread = ed.spread();
    assert_eq!(spread.left.map(|s| s.page.id), Some(ed.active_page()));
    assert!(spread.right.is_none());
    assert_eq!(spread.slots().count(), 1);
}

#[test]
fn spread_pairs_even_and_odd_pages() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let first = ed.active_page();
    ed.dispatch(Action::AddPage {
        notebook: nb,
        template: Template::Blank,
    });
    let second = ed.active_page();
    ed.dispatch(Action::AddPage {
        notebook: nb,
        template: Template::Blank,
    });
    let third = ed.active_page();

    let spread = ed.spread();
    assert_eq!(spread.left.map(|s| s.page.id), Some(third));
    assert!(spread.right.is_none());

    ed.dispatch(Action::SelectPage {
        notebook: nb,
        page: second,
    });
    let spread = ed.spread();
    assert_eq!(spread.left.map(|s| s.page.id), Some(first));
    assert_eq!(spread.right.map(|s| s.page.id), Some(second));
    assert_eq!(spread.right.map(|s| s.origin), Some(Point::new(625.0, 0.0)));
}

#[test]
fn locate_maps_screen_to_page_local() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let first = ed.active_page();
    ed.dispatch(Action::AddPage {
        notebook: nb,
        template: Template::Blank,
    });
    let second = ed.active_page();

    assert_eq!(
        ed.locate(egui::pos2(100.0, 200.0)),
        Some((first, egui::pos2(100.0, 200.0)))
    );
    assert_eq!(
        ed.locate(egui::pos2(635.0, 5.0)),
        Some((second, egui::pos2(10.0, 5.0)))
    );
    assert_eq!(ed.locate(egui::pos2(610.0, 5.0)), None);
    assert_eq!(ed.locate(egui::pos2(100.0, 900.0)), None);
}

#[test]
fn locate_accounts_for_camera() {
    let mut ed = editor();
    ed.dispatch(Action::WheelPan(egui::vec2(-100.0, -100.0)));
    let page = ed.active_page();
    assert_eq!(ed.camera(), Camera::new(100.0, 100.0, 1.0));
    assert_eq!(ed.locate(egui::pos2(50.0, 50.0)), None);
    assert_eq!(
        ed.locate(egui::pos2(150.0, 120.0)),
        Some((page, egui::pos2(50.0, 20.0)))
    );
}

#[test]
fn element_at_prefers_the_topmost() {
    let mut ed = editor();
    let page = ed.active_page();
    let below = draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
    let above = draw(&mut ed, Tool::Rectangle, (50.0, 50.0), (150.0, 150.0));

    assert_eq!(ed.element_at(page, egui::pos2(75.0, 75.0)), Some(above));
    assert_eq!(ed.element_at(page, egui::pos2(10.0, 10.0)), Some(below));
    assert_eq!(ed.element_at(page, egui::pos2(300.0, 300.0)), None);
    assert_eq!(ed.element_at(404, egui::pos2(10.0, 10.0)), None);
}

#[test]
fn render_view_reflects_editor_state() {
    let mut ed = editor();
    let page = ed.active_page();
    let id = draw(&mut ed, Tool::Ellipse, (0.0, 0.0), (40.0, 20.0));
    ed.dispatch(Action::SelectElement { page, element: id });

    let view = ed.render_view();
    assert_eq!(view.active_page, page);
    assert_eq!(view.tool, Tool::Select);
    assert_eq!(view.selection, &Selection::single(page, id));
    assert_eq!(view.selection_bounds, Some(Bbox::new(0.0, 0.0, 40.0, 20.0)));
    assert_eq!(view.interaction, InteractionState::Idle);
    assert!(view.can_undo && !view.can_redo);
    assert!(view.marquee.is_none());
    assert!(view.current_element.is_none());
}

#[test]
fn slot_conversions_are_inverse() {
    let ed = editor();
    let Some(slot) = ed.spread().left else {
        panic!("no page in spread");
    };
    let world = egui::pos2(12.0, 34.0);
    assert_eq!(slot.to_world(slot.to_local(world)), world);
    assert_eq!(
        slot.world_rect(),
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(595.0, 842.0))
    );
}
