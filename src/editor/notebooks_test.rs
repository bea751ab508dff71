use super::*;
use crate::editor::{Action, Collaborators};
use crate::settings::EditorSettings;

fn editor() -> Editor {
    Editor::new(EditorSettings::default(), Collaborators::deterministic(19))
}

fn add_page(ed: &mut Editor, notebook: NotebookId, template: Template) -> PageId {
    ed.dispatch(Action::AddPage { notebook, template });
    ed.active_page()
}

fn page_names(ed: &Editor, notebook: NotebookId) -> Vec<String> {
    ed.document()
        .notebook(notebook)
        .map(|n| n.pages.iter().map(|p| p.name.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn new_notebooks_are_numbered_and_activated() {
    let mut ed = editor();
    ed.dispatch(Action::AddNotebook);
    let doc = ed.document();
    assert_eq!(doc.notebooks.len(), 2);
    assert_eq!(doc.notebooks[1].name, "Notebook 2");
    assert_eq!(doc.notebooks[1].pages.len(), 1);
    assert_eq!(ed.active_notebook(), doc.notebooks[1].id);
    assert_eq!(ed.active_page(), doc.notebooks[1].pages[0].id);
}

#[test]
fn pages_are_appended_from_templates() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let blank = add_page(&mut ed, nb, Template::Blank);
    let cornell = add_page(&mut ed, nb, Template::Cornell);
    assert_eq!(page_names(&ed, nb), vec!["Page 1", "Page 2", "Page 3"]);
    assert_eq!(ed.active_page(), cornell);
    assert_eq!(ed.page(blank).map(|p| p.elements.len()), Some(0));
    assert_eq!(ed.page(cornell).map(|p| p.elements.len()), Some(7));
}

#[test]
fn adding_to_unknown_notebook_is_ignored() {
    let mut ed = editor();
    let before = ed.active_page();
    ed.dispatch(Action::AddPage {
        notebook: 404,
        template: Template::Blank,
    });
    assert_eq!(ed.active_page(), before);
    assert!(!ed.can_undo());
}

#[test]
fn last_page_is_never_deleted() {
    let mut ed = editor();
    let (nb, page) = (ed.active_notebook(), ed.active_page());
    ed.dispatch(Action::DeletePage { notebook: nb, page });
    assert_eq!(ed.document().page_count(), 1);
    assert!(!ed.can_undo());
}

#[test]
fn deleting_active_page_falls_back_to_previous() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let first = ed.active_page();
    let second = add_page(&mut ed, nb, Template::Blank);
    let third = add_page(&mut ed, nb, Template::Blank);

    ed.dispatch(Action::SelectPage {
        notebook: nb,
        page: second,
    });
    ed.dispatch(Action::DeletePage {
        notebook: nb,
        page: second,
    });
    assert_eq!(ed.active_page(), first);
    assert!(ed.page(second).is_none());

    ed.dispatch(Action::DeletePage {
        notebook: nb,
        page: first,
    });
    assert_eq!(ed.active_page(), third);
}

#[test]
fn deleting_an_inactive_page_keeps_focus() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let first = ed.active_page();
    let second = add_page(&mut ed, nb, Template::Blank);
    ed.dispatch(Action::DeletePage {
        notebook: nb,
        page: first,
    });
    assert_eq!(ed.active_page(), second);
    assert_eq!(ed.document().page_count(), 1);
}

#[test]
fn emptied_notebook_is_removed() {
    let mut ed = editor();
    let (first_nb, first_page) = (ed.active_notebook(), ed.active_page());
    ed.dispatch(Action::AddNotebook);
    let (second_nb, second_page) = (ed.active_notebook(), ed.active_page());

    ed.dispatch(Action::DeletePage {
        notebook: second_nb,
        page: second_page,
    });
    assert_eq!(ed.document().notebooks.len(), 1);
    assert_eq!(ed.active_notebook(), first_nb);
    assert_eq!(ed.active_page(), first_page);
}

#[test]
fn page_must_belong_to_notebook() {
    let mut ed = editor();
    let page = ed.active_page();
    ed.dispatch(Action::AddNotebook);
    let other = ed.active_notebook();
    ed.dispatch(Action::DeletePage {
        notebook: other,
        page,
    });
    assert!(ed.page(page).is_some());

    ed.dispatch(Action::SelectPage {
        notebook: other,
        page,
    });
    assert_ne!(ed.active_page(), page);
}

#[test]
fn selecting_a_page_clears_selection() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    let first = ed.active_page();
    ed.dispatch(Action::SelectTool(crate::editor::Tool::Rectangle));
    ed.dispatch(Action::StartDrawing {
        page: first,
        point: egui::pos2(0.0, 0.0),
    });
    ed.dispatch(Action::Drawing(egui::pos2(10.0, 10.0)));
    let id = ed.current_element().map(|r| r.element).unwrap_or_default();
    ed.dispatch(Action::FinishInteraction);
    ed.dispatch(Action::SelectElement {
        page: first,
        element: id,
    });

    let second = add_page(&mut ed, nb, Template::Blank);
    assert!(ed.selection().is_empty());
    ed.dispatch(Action::SelectPage {
        notebook: nb,
        page: first,
    });
    assert_eq!(ed.active_page(), first);
    assert_ne!(first, second);
}

#[test]
fn renames_are_undoable() {
    let mut ed = editor();
    let (nb, page) = (ed.active_notebook(), ed.active_page());
    ed.dispatch(Action::RenameNotebook {
        notebook: nb,
        name: "Physics".into(),
    });
    ed.dispatch(Action::RenamePage {
        notebook: nb,
        page,
        name: "Optics".into(),
    });
    assert_eq!(ed.document().notebooks[0].name, "Physics");
    assert_eq!(page_names(&ed, nb), vec!["Optics"]);

    ed.dispatch(Action::Undo);
    assert_eq!(page_names(&ed, nb), vec!["Page 1"]);
    ed.dispatch(Action::Undo);
    assert_eq!(ed.document().notebooks[0].name, "My First Notebook");
}

#[test]
fn renaming_unknown_targets_is_ignored() {
    let mut ed = editor();
    let nb = ed.active_notebook();
    ed.dispatch(Action::RenameNotebook {
        notebook: 404,
        name: "x".into(),
    });
    ed.dispatch(Action::RenamePage {
        notebook: nb,
        page: 404,
        name: "x".into(),
    });
    assert!(!ed.can_undo());
}
