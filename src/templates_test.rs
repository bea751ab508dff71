use super::*;

#[test]
fn blank_is_empty() {
    let mut alloc = Allocator::seeded(1);
    let els = BuiltinTemplates::default().create_template_elements(Template::Blank, &mut alloc);
    assert!(els.is_empty());
    assert_eq!(alloc.next_id(), 1);
}

#[test]
fn cornell_layout() {
    let mut alloc = Allocator::seeded(1);
    let els = BuiltinTemplates::default().create_template_elements(Template::Cornell, &mut alloc);
    assert_eq!(els.len(), 7);

    let texts: Vec<&str> = els
        .iter()
        .filter_map(|e| e.text().map(|t| t.text.as_str()))
        .collect();
    assert_eq!(
        texts,
        vec!["Topic/Title:", "Essential question(s):", "Cues", "Notes", "Summary"]
    );

    let cue_line = els.iter().find(|e| e.is_edge() && e.width == 0.0);
    let cue_line = cue_line.map(|e| (e.x, e.y, e.height));
    assert_eq!(cue_line, Some((180.0, 80.0, 842.0 - 150.0 - 20.0 - 80.0)));

    let mut ids: Vec<u64> = els.iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 7);

    let z: Vec<i32> = els.iter().map(|e| e.z_index).collect();
    assert_eq!(z, (1..=7).collect::<Vec<_>>());
}
