use super::*;
use pretty_assertions::assert_eq;

#[test]
fn selected_row_follows_the_calendar_order() {
    let mut state = state_with(Document {
        posts: vec![post("late", "2026-10-30"), post("soon", "2026-10-18")],
        ..Document::default()
    });
    user(&mut state, UserAction::SelectSection(Section::Calendar));
    user(&mut state, UserAction::DeleteSelected);

    let ids: Vec<&str> = state.document.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["late"]);
    assert_eq!(toast_message(&state), Some("Post removed"));
}

#[test]
fn selection_wraps_and_reconciles_after_delete() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false), task("b", false), task("c", false)],
        ..Document::default()
    });
    user(&mut state, UserAction::SelectSection(Section::Todos));
    user(&mut state, UserAction::SelectPrevRow);
    assert_eq!(state.selection.row, 2);

    user(&mut state, UserAction::DeleteSelected);
    assert_eq!(task_ids(&state), vec!["a", "b"]);
    assert_eq!(state.selection.row, 1);

    user(&mut state, UserAction::SelectNextRow);
    assert_eq!(state.selection.row, 0);
}

#[test]
fn selected_actions_only_apply_to_their_section() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false)],
        goals: vec![goal("g", 10.0, 1.0)],
        ..Document::default()
    });
    user(&mut state, UserAction::SelectSection(Section::Goals));
    assert!(user(&mut state, UserAction::ToggleSelected).is_empty());

    user(&mut state, UserAction::EditSelected);
    assert!(matches!(
        state.interaction.overlay,
        Overlay::Prompt {
            request: PromptRequest::GoalProgress { .. },
            ..
        }
    ));

    user(&mut state, UserAction::CloseOverlay);
    user(&mut state, UserAction::SelectSection(Section::Todos));
    user(&mut state, UserAction::ToggleSelected);
    assert!(state.document.tasks[0].done);
}

#[test]
fn overview_has_no_rows_to_select() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false)],
        ..Document::default()
    });
    assert!(user(&mut state, UserAction::SelectNextRow).is_empty());
    assert!(user(&mut state, UserAction::DeleteSelected).is_empty());
    assert_eq!(task_ids(&state), vec!["a"]);
}
