use super::*;
use pretty_assertions::assert_eq;

#[test]
fn post_with_empty_date_is_dated_today() {
    let mut state = state();
    let effects = user(
        &mut state,
        UserAction::AddPost(PostDraft {
            date: String::new(),
            platform: "TikTok".to_string(),
            post_type: "Story".to_string(),
            title: "  Pack orders with me ".to_string(),
            hook: String::new(),
        }),
    );

    assert_committed(&state, &effects, "Post added ✨");
    let added = &state.document.posts[0];
    assert_eq!(added.date, "2026-10-17");
    assert_eq!(added.title, "Pack orders with me");
    assert!(!added.id.is_empty());
}

#[test]
fn new_records_are_prepended() {
    let mut state = state_with(Document {
        tasks: vec![task("old", false)],
        ..Document::default()
    });
    user(
        &mut state,
        UserAction::AddTask(TaskDraft {
            text: "Batch captions".to_string(),
            priority: "Pink (Medium)".to_string(),
            due: String::new(),
        }),
    );

    assert_eq!(state.document.tasks.len(), 2);
    assert_eq!(state.document.tasks[0].text, "Batch captions");
    assert_eq!(state.document.tasks[0].due, "");
    assert!(!state.document.tasks[0].done);
    assert_eq!(state.document.tasks[1].id, "old");
}

#[test]
fn goal_with_blank_numbers_starts_at_zero() {
    let mut state = state();
    let effects = user(
        &mut state,
        UserAction::AddGoal(GoalDraft {
            title: "Launch course".to_string(),
            target: String::new(),
            progress: " ".to_string(),
        }),
    );

    assert_committed(&state, &effects, "Goal added 🎯");
    assert_eq!(state.document.goals[0].target, 0.0);
    assert_eq!(state.document.goals[0].progress, 0.0);
}

#[test]
fn goal_with_non_numeric_target_is_rejected() {
    let mut state = state();
    let effects = user(
        &mut state,
        UserAction::AddGoal(GoalDraft {
            title: "Launch course".to_string(),
            target: "lots".to_string(),
            progress: "0".to_string(),
        }),
    );

    assert_not_persisted(&effects);
    assert!(state.document.goals.is_empty());
    assert_eq!(toast_message(&state), Some("Enter a number"));
}

#[test]
fn metrics_save_and_reset() {
    let mut state = state();
    let effects = user(
        &mut state,
        UserAction::SaveMetrics(MetricsDraft {
            revenue: "1520".to_string(),
            clicks: "".to_string(),
            deals: "2".to_string(),
            leads: "11".to_string(),
        }),
    );
    assert_committed(&state, &effects, "Metrics saved 👑");
    assert_eq!(
        state.document.metrics,
        Metrics {
            revenue: 1520.0,
            clicks: 0.0,
            deals: 2.0,
            leads: 11.0,
        }
    );

    let effects = user(&mut state, UserAction::ResetMetrics);
    assert_committed(&state, &effects, "Metrics reset");
    assert_eq!(state.document.metrics, Metrics::default());
}

#[test]
fn delete_removes_only_the_matching_record_and_keeps_order() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false), task("b", true), task("c", false)],
        contacts: vec![contact("x"), contact("y")],
        ..Document::default()
    });

    let effects = user(
        &mut state,
        UserAction::DeleteRecord {
            kind: ListKind::Tasks,
            id: "b".to_string(),
        },
    );
    assert_committed(&state, &effects, "Task removed");
    assert_eq!(task_ids(&state), vec!["a", "c"]);

    user(
        &mut state,
        UserAction::DeleteRecord {
            kind: ListKind::Contacts,
            id: "x".to_string(),
        },
    );
    assert_eq!(toast_message(&state), Some("Contact removed"));
    assert_eq!(state.document.contacts.len(), 1);
    assert_eq!(state.document.contacts[0].id, "y");
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false)],
        ..Document::default()
    });
    let effects = user(
        &mut state,
        UserAction::DeleteRecord {
            kind: ListKind::Tasks,
            id: "missing".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(task_ids(&state), vec!["a"]);
    assert_eq!(toast_message(&state), None);
}

#[test]
fn toggling_a_task_flips_done() {
    let mut state = state_with(Document {
        tasks: vec![task("a", false)],
        ..Document::default()
    });

    let effects = user(&mut state, UserAction::ToggleTask { id: "a".to_string() });
    assert_committed(&state, &effects, "Task done 👑");
    assert!(state.document.tasks[0].done);

    user(&mut state, UserAction::ToggleTask { id: "a".to_string() });
    assert_eq!(toast_message(&state), Some("Task reopened"));
    assert!(!state.document.tasks[0].done);
}

#[test]
fn post_form_submits_into_the_calendar() {
    let mut state = state();
    user(&mut state, UserAction::OpenForm(FormKind::Post));
    for _ in 0..3 {
        user(&mut state, UserAction::FormNextField);
    }
    for ch in "Hi".chars() {
        user(&mut state, UserAction::FormInput(ch));
    }
    let effects = user(&mut state, UserAction::FormSubmit);

    assert_committed(&state, &effects, "Post added ✨");
    assert_eq!(state.interaction.overlay, Overlay::None);
    let added = &state.document.posts[0];
    assert_eq!(added.title, "Hi");
    assert_eq!(added.date, "2026-10-17");
    assert_eq!(added.platform, "Instagram");
    assert_eq!(added.post_type, "Reel / Short");
}

#[test]
fn select_fields_cycle_instead_of_taking_text() {
    let mut state = state();
    user(&mut state, UserAction::OpenForm(FormKind::Task));
    user(&mut state, UserAction::FormNextField);
    user(&mut state, UserAction::FormInput('z'));
    user(&mut state, UserAction::FormCycleChoice { forward: true });
    user(&mut state, UserAction::FormSubmit);

    assert_eq!(state.document.tasks[0].priority, "Pink (Medium)");
}

#[test]
fn invalid_goal_form_stays_open() {
    let mut state = state();
    user(&mut state, UserAction::OpenForm(FormKind::Goal));
    user(&mut state, UserAction::FormNextField);
    user(&mut state, UserAction::FormInput('x'));
    let effects = user(&mut state, UserAction::FormSubmit);

    assert_not_persisted(&effects);
    assert!(state.document.goals.is_empty());
    assert!(matches!(state.interaction.overlay, Overlay::Form(_)));
    assert_eq!(toast_message(&state), Some("Enter a number"));
}

#[test]
fn metrics_form_is_prefilled_from_current_metrics() {
    let mut state = state_with(Document {
        metrics: Metrics {
            revenue: 520.0,
            clicks: 184.0,
            deals: 1.0,
            leads: 9.0,
        },
        ..Document::default()
    });
    user(&mut state, UserAction::OpenForm(FormKind::Metrics));
    let Overlay::Form(form) = &state.interaction.overlay else {
        panic!("expected metrics form");
    };
    let values: Vec<&str> = form.fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(values, vec!["520", "184", "1", "9"]);

    user(&mut state, UserAction::FormSubmit);
    assert_eq!(toast_message(&state), Some("Metrics saved 👑"));
    assert_eq!(state.document.metrics.clicks, 184.0);
}
