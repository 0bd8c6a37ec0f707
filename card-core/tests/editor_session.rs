//! Editing Session Integration Tests
//!
//! Exercises the mutation API, history discipline and template application
//! together:
//! - Selection state machine
//! - Commit / undo / revert workflows
//! - Template resets
//! - Property checks for id uniqueness and history cursor bounds

use std::collections::HashSet;

use card_core::{
    CanvasState, Editor, EditorConfig, ElementId, ElementKind, ElementPatch, History, Operation,
    Reorder, TemplateRegistry,
};
use proptest::prelude::*;

fn blank_editor() -> Editor {
    Editor::new(EditorConfig {
        default_template: "blank".to_string(),
        ..EditorConfig::default()
    })
    .expect("blank template is built in")
}

fn font_size(state: &CanvasState, id: ElementId) -> Option<f32> {
    state.element(id).map(|e| e.style.font_size)
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn test_text_edit_commit_and_rollback() {
    let mut state = CanvasState::default();
    let mut history = History::default();
    assert!(state.is_empty());
    assert_eq!(history.index(), -1);

    state = state.add_element(ElementKind::Text, &ElementPatch::new().with_content("Hi"));
    let id = state.selected_id().expect("add selects");
    assert_eq!(state.len(), 1);

    history.push(state.clone());
    assert_eq!(history.len(), 1);
    assert_eq!(history.index(), 0);

    state = state.update_element(id, &ElementPatch::new().with_font_size(40.0));
    assert_eq!(history.len(), 1, "uncommitted edits do not push");
    assert_eq!(font_size(&state, id), Some(40.0));

    // Undo at the first entry is a no-op...
    state = history.undo(state);
    assert_eq!(font_size(&state, id), Some(40.0));
    assert_eq!(history.index(), 0);

    // ...while revert restores the committed snapshot.
    state = history.revert(state);
    assert_eq!(font_size(&state, id), Some(16.0));
    assert_eq!(history.index(), 0);
}

#[test]
fn test_undo_after_second_commit_restores_first() {
    let mut editor = blank_editor();
    let id = editor.add_element(ElementKind::Text, &ElementPatch::new().with_content("Hi"));
    editor.commit();
    editor.update_element(id, &ElementPatch::new().with_font_size(40.0));
    editor.commit();

    assert!(editor.undo());
    assert_eq!(font_size(editor.state(), id), Some(16.0));
    assert_eq!(editor.history().index(), 0);
}

#[test]
fn test_history_truncates_after_undo() {
    let mut history = History::default();
    let a = CanvasState::new(1, 1);
    let b = CanvasState::new(2, 2);
    let c = CanvasState::new(3, 3);
    let d = CanvasState::new(4, 4);
    history.push(a.clone());
    history.push(b.clone());
    history.push(c.clone());
    assert_eq!(history.index(), 2);

    let restored = history.undo(c);
    assert_eq!(restored, b);
    history.push(d.clone());

    assert_eq!(history.entries(), &[a, b, d]);
    assert_eq!(history.index(), 2);
}

#[test]
fn test_reorder_scenario() {
    let state = CanvasState::default().add_element(
        ElementKind::Box,
        &ElementPatch::new().with_z_index(1),
    );
    let id = state.selected_id().expect("selected");

    let state = state.reorder_element(id, Reorder::Forward);
    assert_eq!(state.element(id).map(|e| e.style.z_index), Some(2));

    let state = state
        .update_element(id, &ElementPatch::new().with_z_index(0))
        .reorder_element(id, Reorder::Backward)
        .reorder_element(id, Reorder::Backward);
    assert_eq!(state.element(id).map(|e| e.style.z_index), Some(0));
}

// ============================================================================
// Selection State Machine
// ============================================================================

#[test]
fn test_selection_transitions() {
    let mut editor = blank_editor();
    assert_eq!(editor.state().selected_id(), None);

    let a = editor.add_element(ElementKind::Circle, &ElementPatch::new());
    assert_eq!(editor.state().selected_id(), Some(a));

    editor.update_element(a, &ElementPatch::new().with_opacity(0.5));
    assert_eq!(editor.state().selected_id(), Some(a), "update keeps selection");

    let b = editor.clone_element(a).expect("cloned");
    assert_eq!(editor.state().selected_id(), Some(b));

    editor.select_element(Some(a));
    editor.delete_element(a);
    assert_eq!(editor.state().selected_id(), None);

    editor.select_element(Some(b));
    editor.apply_template_id("flashcard").expect("flashcard");
    assert_eq!(editor.state().selected_id(), None);

    let c = editor.add_element(ElementKind::Icon, &ElementPatch::new());
    editor.select_element(None);
    assert_eq!(editor.state().selected_id(), None);
    assert!(editor.state().contains(c));
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_template_reset_regardless_of_prior_state() {
    for template in TemplateRegistry::builtin().iter() {
        let mut editor = blank_editor();
        editor.add_element(ElementKind::Text, &ElementPatch::new());
        editor.commit();
        editor.add_element(ElementKind::Box, &ElementPatch::new());
        editor.commit();
        editor.undo();

        editor.apply_template(template);
        assert!(editor.history().is_empty(), "{}", template.id);
        assert_eq!(editor.history().index(), -1);
        assert_eq!(editor.state().selected_id(), None);
        assert_eq!(editor.state().len(), template.fragment.elements.len());
        if let Some(dims) = template.fragment.dimensions {
            assert_eq!(editor.state().width(), dims.width);
            assert_eq!(editor.state().height(), dims.height);
        }
    }
}

#[test]
fn test_replay_script() {
    let mut editor = blank_editor();
    let script = Operation::parse_script(
        r##"[
            {"op": "add", "kind": "text", "overrides": {"content": "Hello"}},
            {"op": "commit"},
            {"op": "translate", "dx": 10, "dy": -5},
            {"op": "clone"},
            {"op": "update", "patch": {"color": "#ff0000"}},
            {"op": "apply_preset", "name": "Sunset"},
            {"op": "set_show_grid", "show": true},
            {"op": "commit"}
        ]"##,
    )
    .expect("script parses");

    for op in script {
        editor.apply(op).expect("op applies");
    }

    let state = editor.state();
    assert_eq!(state.len(), 2);
    assert!(state.show_grid());
    assert_eq!(state.background().color1, "#f97316");
    let colors: Vec<&str> = state.elements().iter().map(|e| e.style.color.as_str()).collect();
    assert_eq!(colors[1], "#ff0000");
    assert_ne!(colors[0], "#ff0000");
    assert_eq!(editor.history().len(), 2);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    Add(ElementKind),
    CloneLast,
    DeleteFirst,
}

fn arb_kind() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::ALL.to_vec())
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_kind().prop_map(Step::Add),
        2 => Just(Step::CloneLast),
        1 => Just(Step::DeleteFirst),
    ]
}

#[derive(Debug, Clone)]
enum HistoryStep {
    Push,
    Undo,
    Clear,
}

fn arb_history_step() -> impl Strategy<Value = HistoryStep> {
    prop_oneof![
        4 => Just(HistoryStep::Push),
        3 => Just(HistoryStep::Undo),
        1 => Just(HistoryStep::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_ids_pairwise_distinct(steps in prop::collection::vec(arb_step(), 0..40)) {
        let mut state = CanvasState::default();
        for step in steps {
            state = match step {
                Step::Add(kind) => state.add_element(kind, &ElementPatch::new()),
                Step::CloneLast => match state.elements().last().map(|e| e.id) {
                    Some(id) => state.clone_element(id, 20.0),
                    None => state,
                },
                Step::DeleteFirst => match state.elements().first().map(|e| e.id) {
                    Some(id) => state.delete_element(id),
                    None => state,
                },
            };
        }
        let unique: HashSet<ElementId> = state.elements().iter().map(|e| e.id).collect();
        prop_assert_eq!(unique.len(), state.len());
    }

    #[test]
    fn prop_history_cursor_in_bounds(
        depth in 0usize..6,
        steps in prop::collection::vec(arb_history_step(), 0..60)
    ) {
        let mut history = History::new(depth);
        let mut current = CanvasState::default();
        for (i, step) in steps.into_iter().enumerate() {
            match step {
                HistoryStep::Push => {
                    current = current.resize(u32::try_from(i).unwrap_or(u32::MAX) + 1, 1);
                    history.push(current.clone());
                }
                HistoryStep::Undo => current = history.undo(current),
                HistoryStep::Clear => history.clear(),
            }
            let len = isize::try_from(history.len()).unwrap_or(isize::MAX);
            prop_assert!(history.index() >= -1);
            prop_assert!(history.index() <= len - 1);
            if depth > 0 {
                prop_assert!(history.len() <= depth);
            }
        }
    }

    #[test]
    fn prop_update_unknown_id_is_noop(font in 1.0f32..200.0) {
        let state = CanvasState::default()
            .add_element(ElementKind::Text, &ElementPatch::new())
            .add_element(ElementKind::Box, &ElementPatch::new());
        let before = state.clone();
        let after = state.update_element(ElementId::new(), &ElementPatch::new().with_font_size(font));
        prop_assert_eq!(after.elements(), before.elements());
    }
}
