use super::*;
use crate::model::{ElementKind, Style, TextBody, VerticalAlign};
use crate::text_metrics::EstimatedMetrics;

fn rect(id: ElementId, b: Bbox) -> Element {
    Element {
        id,
        x: b.x,
        y: b.y,
        width: b.width,
        height: b.height,
        style: Style::default(),
        z_index: id as i32,
        seed: 1,
        kind: ElementKind::Rectangle {
            roundness: Default::default(),
        },
    }
}

fn line(id: ElementId, a: Point, b: Point) -> Element {
    let mut e = Element {
        id,
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        style: Style::default(),
        z_index: id as i32,
        seed: 1,
        kind: ElementKind::Line { points: [a, b] },
    };
    e.sync_bbox_from_points();
    e
}

fn text(id: ElementId, content: &str, edit: impl FnOnce(&mut TextBody)) -> Element {
    let mut body = TextBody::new(content, 20.0, "mono");
    edit(&mut body);
    Element {
        id,
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        style: Style::default(),
        z_index: id as i32,
        seed: 1,
        kind: ElementKind::Text(body),
    }
}

fn page_with(elements: Vec<Element>) -> Page {
    let mut page = Page::new(1, "p");
    page.elements = elements;
    page
}

#[test]
fn dependents_cover_bound_text_and_labels() {
    let page = page_with(vec![
        rect(1, Bbox::new(0.0, 0.0, 100.0, 60.0)),
        line(2, Point::new(0.0, 0.0), Point::new(50.0, 0.0)),
        text(3, "in", |b| b.container_id = Some(1)),
        text(4, "on", |b| b.attached_to_id = Some(2)),
        text(5, "free", |_| {}),
    ]);
    assert_eq!(dependents_of(&page, &[1]), vec![3]);
    assert_eq!(dependents_of(&page, &[1, 2]), vec![3, 4]);
    assert!(dependents_of(&page, &[5]).is_empty());
}

#[test]
fn bound_text_is_centred() {
    let metrics = EstimatedMetrics::default();
    let mut t = text(2, "hi", |b| {
        b.container_id = Some(1);
        b.padding = 12.0;
    });
    layout_bound_text(&metrics, &mut t, Bbox::new(0.0, 0.0, 100.0, 60.0));
    assert_eq!(t.bbox(), Bbox::new(38.0, 18.0, 24.0, 24.0));
}

#[test]
fn bound_text_respects_vertical_align() {
    let metrics = EstimatedMetrics::default();
    let container = Bbox::new(0.0, 0.0, 100.0, 60.0);
    let mut top = text(2, "hi", |b| {
        b.padding = 5.0;
        b.vertical_align = Some(VerticalAlign::Top);
    });
    layout_bound_text(&metrics, &mut top, container);
    assert_eq!(top.y, 5.0);

    let mut bottom = text(3, "hi", |b| {
        b.padding = 5.0;
        b.vertical_align = Some(VerticalAlign::Bottom);
    });
    layout_bound_text(&metrics, &mut bottom, container);
    assert_eq!(bottom.bbox().bottom(), 55.0);
}

#[test]
fn wrapping_bound_text_stays_inside_container() {
    let metrics = EstimatedMetrics::default();
    let mut t = text(2, "one two three four", |b| {
        b.wrap = true;
        b.padding = 10.0;
    });
    layout_bound_text(&metrics, &mut t, Bbox::new(0.0, 0.0, 100.0, 200.0));
    assert!(t.width <= 80.0);
    assert!(t.height > 24.0);
}

#[test]
fn empty_text_keeps_a_minimum_size() {
    let metrics = EstimatedMetrics::default();
    let mut t = text(2, "", |_| {});
    layout_bound_text(&metrics, &mut t, Bbox::new(0.0, 0.0, 100.0, 60.0));
    assert!(t.width >= 1.0 && t.height >= 1.0);
}

#[test]
fn label_centres_on_midpoint() {
    let mut label = text(2, "x", |_| {});
    label.width = 10.0;
    label.height = 20.0;
    layout_label(&mut label, Point::new(50.0, 50.0));
    assert_eq!((label.x, label.y), (45.0, 40.0));
}

#[test]
fn free_text_fits_content_unless_wrapping() {
    let metrics = EstimatedMetrics::default();
    let mut free = text(1, "abcd", |_| {});
    remeasure_text(&metrics, &mut free);
    assert_eq!((free.width, free.height), (48.0, 24.0));

    let mut wrapped = text(2, "abcd abcd", |b| b.wrap = true);
    wrapped.width = 60.0;
    remeasure_text(&metrics, &mut wrapped);
    assert_eq!(wrapped.width, 60.0);
    assert_eq!(wrapped.height, 48.0);
}

#[test]
fn reconcile_follows_moved_owners() {
    let metrics = EstimatedMetrics::default();
    let mut page = page_with(vec![
        rect(1, Bbox::new(0.0, 0.0, 100.0, 60.0)),
        line(2, Point::new(0.0, 100.0), Point::new(100.0, 100.0)),
        text(3, "hi", |b| b.container_id = Some(1)),
        text(4, "hi", |b| b.attached_to_id = Some(2)),
    ]);
    if let Some(t) = page.element_mut(4) {
        t.width = 24.0;
        t.height = 24.0;
    }
    if let Some(r) = page.element_mut(1) {
        r.x = 200.0;
    }
    reconcile_dependents(&metrics, &mut page, &[1, 2]);

    let bound = page.element(3).map(Element::bbox);
    assert_eq!(bound, Some(Bbox::new(238.0, 18.0, 24.0, 24.0)));
    let label = page.element(4).map(Element::bbox);
    assert_eq!(label, Some(Bbox::new(38.0, 88.0, 24.0, 24.0)));
}

#[test]
fn relayout_handles_each_attachment() {
    let metrics = EstimatedMetrics::default();
    let mut page = page_with(vec![
        rect(1, Bbox::new(0.0, 0.0, 100.0, 60.0)),
        line(2, Point::new(0.0, 100.0), Point::new(100.0, 100.0)),
        text(3, "hi", |b| b.container_id = Some(1)),
        text(4, "hi", |b| b.attached_to_id = Some(2)),
        text(5, "hi", |_| {}),
    ]);
    for id in [3, 4, 5] {
        relayout_text(&metrics, &mut page, id);
    }
    assert_eq!(page.element(3).map(|e| (e.x, e.y)), Some((38.0, 18.0)));
    assert_eq!(page.element(4).map(|e| (e.x, e.y)), Some((38.0, 88.0)));
    assert_eq!(
        page.element(5).map(Element::bbox),
        Some(Bbox::new(0.0, 0.0, 24.0, 24.0))
    );
}

#[test]
fn replace_only_touches_known_ids() {
    let mut page = page_with(vec![rect(1, Bbox::new(0.0, 0.0, 10.0, 10.0))]);
    let mut moved = rect(1, Bbox::new(5.0, 5.0, 10.0, 10.0));
    moved.z_index = 9;
    replace_elements(&mut page, vec![moved, rect(7, Bbox::default())]);
    assert_eq!(page.elements.len(), 1);
    assert_eq!(page.elements[0].z_index, 9);
    assert_eq!(page.elements[0].x, 5.0);
}
