use chrono::NaiveDate;
use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::HustleEffect;
pub(super) use super::GOAL_PROMPT;
pub(super) use super::IMPORT_FAILED;
pub(super) use super::MISSING_PLAN_LINK;
pub(super) use crate::actions::AppAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::document::Contact;
pub(super) use crate::document::Document;
pub(super) use crate::document::Goal;
pub(super) use crate::document::ListKind;
pub(super) use crate::document::Metrics;
pub(super) use crate::document::Post;
pub(super) use crate::document::Task;
pub(super) use crate::forms::FormKind;
pub(super) use crate::forms::GoalDraft;
pub(super) use crate::forms::MetricsDraft;
pub(super) use crate::forms::PostDraft;
pub(super) use crate::forms::TaskDraft;
pub(super) use crate::router::View;
pub(super) use crate::state::AppState;
pub(super) use crate::state::ConfirmRequest;
pub(super) use crate::state::NoteField;
pub(super) use crate::state::Overlay;
pub(super) use crate::state::PromptRequest;
pub(super) use crate::state::Section;

mod crud;
mod selection;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

fn state() -> AppState {
    AppState::new(Document::default(), today())
}

fn state_with(document: Document) -> AppState {
    AppState::new(document, today())
}

fn user(state: &mut AppState, action: UserAction) -> Vec<HustleEffect> {
    reduce(state, AppAction::User(action))
}

fn runtime(state: &mut AppState, action: RuntimeAction) -> Vec<HustleEffect> {
    reduce(state, AppAction::Runtime(action))
}

fn post(id: &str, date: &str) -> Post {
    Post {
        id: id.to_string(),
        date: date.to_string(),
        platform: "Instagram".to_string(),
        post_type: "Reel / Short".to_string(),
        title: format!("post {id}"),
        hook: String::new(),
    }
}

fn task(id: &str, done: bool) -> Task {
    Task {
        id: id.to_string(),
        text: format!("task {id}"),
        priority: "Gold (High)".to_string(),
        due: String::new(),
        done,
    }
}

fn contact(id: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: format!("contact {id}"),
        tag: "Client".to_string(),
        handle: String::new(),
        notes: String::new(),
    }
}

fn goal(id: &str, target: f64, progress: f64) -> Goal {
    Goal {
        id: id.to_string(),
        title: format!("goal {id}"),
        target,
        progress,
    }
}

fn task_ids(state: &AppState) -> Vec<String> {
    state.document.tasks.iter().map(|t| t.id.clone()).collect()
}

fn toast_message(state: &AppState) -> Option<&str> {
    state
        .interaction
        .toast
        .as_ref()
        .map(|toast| toast.message.as_str())
}

fn assert_committed(state: &AppState, effects: &[HustleEffect], message: &str) {
    assert_eq!(toast_message(state), Some(message));
    let seq = state.interaction.toast.as_ref().map(|t| t.seq).unwrap_or(0);
    assert_eq!(
        effects,
        &[
            HustleEffect::Persist,
            HustleEffect::ScheduleToastDismiss { seq },
            HustleEffect::RequestFrame,
        ]
    );
}

fn assert_not_persisted(effects: &[HustleEffect]) {
    assert!(
        !effects.contains(&HustleEffect::Persist),
        "unexpected persist in {effects:?}"
    );
}
