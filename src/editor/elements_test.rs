use super::*;
use crate::editor::{Action, Collaborators, Tool};
use crate::model::{FillStyle, Rgba, Roundness, VerticalAlign};
use crate::settings::EditorSettings;

fn editor() -> Editor {
    Editor::new(EditorSettings::default(), Collaborators::deterministic(17))
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

fn select(ed: &mut Editor, id: ElementId) {
    let page = ed.active_page();
    ed.dispatch(Action::SelectElement { page, element: id });
}

fn z(ed: &Editor, id: ElementId) -> Option<i32> {
    ed.element(ed.active_page(), id).map(|e| e.z_index)
}

fn order(ed: &Editor) -> Vec<ElementId> {
    ed.page(ed.active_page())
        .map(Page::z_order)
        .unwrap_or_default()
}

fn three(ed: &mut Editor) -> [ElementId; 3] {
    [
        draw(ed, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0)),
        draw(ed, Tool::Ellipse, (5.0, 5.0), (15.0, 15.0)),
        draw(ed, Tool::Rectangle, (8.0, 8.0), (20.0, 20.0)),
    ]
}

#[test]
fn properties_apply_to_every_selected_element() {
    let mut ed = editor();
    let page = ed.active_page();
    let a = draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
    let b = draw(&mut ed, Tool::Line, (20.0, 0.0), (30.0, 10.0));
    select(&mut ed, a);
    ed.dispatch(Action::ToggleElementInSelection { page, element: b });

    let red = Rgba::rgb(0xe0, 0x31, 0x31);
    ed.dispatch(Action::UpdateElementProperties(ElementProperties {
        stroke: Some(red),
        fill: Some(Rgba::WHITE),
        fill_style: Some(FillStyle::Hachure),
        roundness: Some(Roundness::Round),
        ..Default::default()
    }));

    let rect = ed.element(page, a).cloned();
    let line = ed.element(page, b).cloned();
    assert!(rect.as_ref().is_some_and(|e| e.style.stroke == red
        && e.style.fill == Rgba::WHITE
        && e.style.fill_style == FillStyle::Hachure
        && e.kind
            == ElementKind::Rectangle {
                roundness: Roundness::Round
            }));
    assert!(line.as_ref().is_some_and(|e| e.style.stroke == red
        && e.style.fill == Rgba::TRANSPARENT
        && e.style.fill_style == FillStyle::Solid));

    assert_eq!(ed.default_style().stroke, red);
    assert_eq!(ed.default_style().fill, Rgba::WHITE);
}

#[test]
fn properties_without_selection_only_change_defaults() {
    let mut ed = editor();
    draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
    let depth = ed.history.undo_depth();
    ed.dispatch(Action::UpdateElementProperties(ElementProperties {
        stroke_width: Some(6.0),
        ..Default::default()
    }));
    assert_eq!(ed.default_style().stroke_width, 6.0);
    assert_eq!(ed.history.undo_depth(), depth);

    let next = draw(&mut ed, Tool::Ellipse, (0.0, 0.0), (10.0, 10.0));
    assert_eq!(
        ed.element(ed.active_page(), next).map(|e| e.style.stroke_width),
        Some(6.0)
    );
}

#[test]
fn font_change_relays_out_bound_text() {
    let mut ed = editor();
    let page = ed.active_page();
    let rect = draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (300.0, 100.0));
    ed.dispatch(Action::CreateBoundText {
        page,
        container: rect,
    });
    let text = ed.current_element().map(|r| r.element).unwrap_or_default();
    ed.dispatch(Action::EditElementText("hi".into()));
    ed.dispatch(Action::FinishInteraction);
    select(&mut ed, text);

    ed.dispatch(Action::UpdateElementProperties(ElementProperties {
        font_size: Some(40.0),
        vertical_align: Some(VerticalAlign::Top),
        ..Default::default()
    }));
    let t = ed.element(page, text).cloned();
    let Some(t) = t else {
        panic!("text vanished");
    };
    assert_eq!(t.text().map(|b| b.font_size), Some(40.0));
    assert!((t.height - 48.0).abs() < 1e-3);
    assert_eq!(t.y, 12.0);
}

#[test]
fn identical_properties_do_not_add_history() {
    let mut ed = editor();
    let a = draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
    select(&mut ed, a);
    let depth = ed.history.undo_depth();
    let stroke = ed.element(ed.active_page(), a).map(|e| e.style.stroke);
    ed.dispatch(Action::UpdateElementProperties(ElementProperties {
        stroke,
        ..Default::default()
    }));
    assert_eq!(ed.history.undo_depth(), depth);
}

#[test]
fn bring_to_front_and_send_to_back() {
    let mut ed = editor();
    let [a, b, c] = three(&mut ed);
    select(&mut ed, a);
    ed.dispatch(Action::BringToFront);
    assert_eq!(order(&ed), vec![b, c, a]);
    assert_eq!(z(&ed, a), Some(4));

    select(&mut ed, c);
    ed.dispatch(Action::SendToBack);
    assert_eq!(order(&ed), vec![c, b, a]);
    assert_eq!(z(&ed, c), Some(1));
}

#[test]
fn front_element_stays_put() {
    let mut ed = editor();
    let [_, _, c] = three(&mut ed);
    select(&mut ed, c);
    let depth = ed.history.undo_depth();
    ed.dispatch(Action::BringToFront);
    ed.dispatch(Action::BringForward);
    assert_eq!(ed.history.undo_depth(), depth);
}

#[test]
fn forward_and_backward_swap_neighbours() {
    let mut ed = editor();
    let [a, b, c] = three(&mut ed);
    select(&mut ed, a);
    ed.dispatch(Action::BringForward);
    assert_eq!(order(&ed), vec![b, a, c]);

    ed.dispatch(Action::SendBackward);
    assert_eq!(order(&ed), vec![a, b, c]);

    select(&mut ed, c);
    ed.dispatch(Action::SendBackward);
    assert_eq!(order(&ed), vec![a, c, b]);
}

#[test]
fn equal_z_values_still_reorder() {
    let mut ed = editor();
    let [a, b, _] = three(&mut ed);
    let page = ed.active_page();
    if let Some(e) = ed.history.present_mut().page_mut(page).and_then(|p| p.element_mut(b)) {
        e.z_index = 1;
    }
    assert_eq!(order(&ed)[..2], [a, b]);
    select(&mut ed, a);
    ed.dispatch(Action::BringForward);
    assert_eq!(z(&ed, a), Some(2));
    assert_eq!(order(&ed)[..2], [b, a]);
}

#[test]
fn reordering_needs_a_single_selection() {
    let mut ed = editor();
    let page = ed.active_page();
    let [a, b, _] = three(&mut ed);
    select(&mut ed, a);
    ed.dispatch(Action::ToggleElementInSelection { page, element: b });
    let depth = ed.history.undo_depth();
    ed.dispatch(Action::BringToFront);
    assert_eq!(ed.history.undo_depth(), depth);
}

#[test]
fn lone_element_is_not_reordered() {
    let mut ed = editor();
    let a = draw(&mut ed, Tool::Rectangle, (0.0, 0.0), (10.0, 10.0));
    select(&mut ed, a);
    ed.dispatch(Action::SendToBack);
    assert_eq!(z(&ed, a), Some(1));
    assert_eq!(ed.history.undo_depth(), 1);
}
