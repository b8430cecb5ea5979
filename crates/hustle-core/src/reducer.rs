use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use super::actions::AppAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::document::Document;
use super::document::ListKind;
use super::document::Metrics;
use super::forms::parse_number;
use super::forms::FormDraft;
use super::forms::FormKind;
use super::forms::FormState;
use super::router;
use super::router::View;
use super::sample::sample_document;
use super::state::AppState;
use super::state::ConfirmRequest;
use super::state::Overlay;
use super::state::PromptRequest;
use super::state::Section;
use super::state::Toast;
use super::views::fmt_number;

pub const IMPORT_FAILED: &str = "Import failed: not valid JSON.";
pub const MISSING_PLAN_LINK: &str =
    "Add your Stripe link in stripeLinks (import a backup or edit the store).";
pub const GOAL_PROMPT: &str = "Update progress number:";
pub const QUICK_ADD_PROMPT: &str = "Quick Add: 1) Post  2) Task  3) Contact. Type 1, 2, or 3";
pub const IMPORT_PROMPT: &str = "Backup file to import:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HustleEffect {
    RequestFrame,
    Persist,
    // Dismissals carry the toast seq; an older seq never hides a newer toast.
    ScheduleToastDismiss {
        seq: u64,
    },
    OpenExternal {
        url: String,
    },
    WriteExport {
        dir: PathBuf,
    },
    ReadImportFile {
        path: PathBuf,
    },
}

pub fn reduce(state: &mut AppState, action: AppAction) -> Vec<HustleEffect> {
    match action {
        AppAction::User(user) => reduce_user(state, user),
        AppAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut AppState, action: UserAction) -> Vec<HustleEffect> {
    match action {
        UserAction::Navigate { fragment } => {
            state.routing.view = router::resolve(&fragment);
            if router::targets_app(&fragment) {
                state.routing.section = Section::Overview;
                state.selection.row = 0;
            }
            enter_view(state)
        }
        UserAction::SelectSection(section) => select_section(state, section),
        UserAction::NextSection => {
            let next = state.routing.section.next();
            select_section(state, next)
        }
        UserAction::PrevSection => {
            let prev = state.routing.section.prev();
            select_section(state, prev)
        }
        UserAction::SelectNextRow => {
            let Some((_, ids)) = state.visible_ids() else {
                return Vec::new();
            };
            if ids.is_empty() {
                return Vec::new();
            }
            state.selection.row = (state.selection.row + 1) % ids.len();
            vec![HustleEffect::RequestFrame]
        }
        UserAction::SelectPrevRow => {
            let Some((_, ids)) = state.visible_ids() else {
                return Vec::new();
            };
            if ids.is_empty() {
                return Vec::new();
            }
            state.selection.row = if state.selection.row == 0 {
                ids.len() - 1
            } else {
                state.selection.row - 1
            };
            vec![HustleEffect::RequestFrame]
        }

        UserAction::OpenForm(kind) => {
            open_form(state, kind);
            vec![HustleEffect::RequestFrame]
        }
        UserAction::FormInput(ch) => {
            if let Overlay::Form(form) = &mut state.interaction.overlay {
                if let Some(field) = form.focused_mut() {
                    if !field.is_select() {
                        field.value.push(ch);
                    }
                }
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::FormBackspace => {
            if let Overlay::Form(form) = &mut state.interaction.overlay {
                if let Some(field) = form.focused_mut() {
                    if !field.is_select() {
                        field.value.pop();
                    }
                }
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::FormNextField => {
            if let Overlay::Form(form) = &mut state.interaction.overlay {
                form.next_field();
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::FormPrevField => {
            if let Overlay::Form(form) = &mut state.interaction.overlay {
                form.prev_field();
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::FormCycleChoice { forward } => {
            if let Overlay::Form(form) = &mut state.interaction.overlay {
                if let Some(field) = form.focused_mut() {
                    field.cycle(forward);
                }
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::FormSubmit => {
            let form = match std::mem::take(&mut state.interaction.overlay) {
                Overlay::Form(form) => form,
                other => {
                    state.interaction.overlay = other;
                    return Vec::new();
                }
            };
            let draft = form.to_draft();
            let valid = match &draft {
                FormDraft::Goal(goal) => goal.clone().into_record().is_ok(),
                FormDraft::Metrics(metrics) => metrics.clone().into_metrics().is_ok(),
                _ => true,
            };
            if !valid {
                // Keep the form open so the value can be corrected.
                state.interaction.overlay = Overlay::Form(form);
                return toast_only(state, "Enter a number");
            }
            let action = match draft {
                FormDraft::Post(draft) => UserAction::AddPost(draft),
                FormDraft::Task(draft) => UserAction::AddTask(draft),
                FormDraft::Contact(draft) => UserAction::AddContact(draft),
                FormDraft::Goal(draft) => UserAction::AddGoal(draft),
                FormDraft::Metrics(draft) => UserAction::SaveMetrics(draft),
            };
            reduce_user(state, action)
        }

        UserAction::AddPost(draft) => {
            let post = draft.into_record(state.today);
            state.document.posts.insert(0, post);
            commit(state, Some("Post added ✨"))
        }
        UserAction::AddTask(draft) => {
            state.document.tasks.insert(0, draft.into_record());
            commit(state, Some("Task added ☕"))
        }
        UserAction::AddContact(draft) => {
            state.document.contacts.insert(0, draft.into_record());
            commit(state, Some("Contact saved 💎"))
        }
        UserAction::AddGoal(draft) => match draft.into_record() {
            Ok(goal) => {
                state.document.goals.insert(0, goal);
                commit(state, Some("Goal added 🎯"))
            }
            Err(_) => toast_only(state, "Enter a number"),
        },
        UserAction::SaveMetrics(draft) => match draft.into_metrics() {
            Ok(metrics) => {
                state.document.metrics = metrics;
                commit(state, Some("Metrics saved 👑"))
            }
            Err(_) => toast_only(state, "Enter a number"),
        },
        UserAction::ResetMetrics => {
            state.document.metrics = Metrics::default();
            commit(state, Some("Metrics reset"))
        }

        UserAction::RequestClear(kind) => {
            state.interaction.overlay = Overlay::Confirm {
                prompt: kind.confirm_clear_prompt().to_string(),
                request: ConfirmRequest::Clear(kind),
            };
            vec![HustleEffect::RequestFrame]
        }
        UserAction::ResolveConfirm(accepted) => {
            let request = match &state.interaction.overlay {
                Overlay::Confirm { request, .. } => *request,
                _ => return Vec::new(),
            };
            state.interaction.overlay = Overlay::None;
            if !accepted {
                return vec![HustleEffect::RequestFrame];
            }
            match request {
                ConfirmRequest::Clear(kind) => {
                    state.document.clear(kind);
                    commit(state, Some(kind.cleared_message()))
                }
            }
        }
        UserAction::DeleteRecord { kind, id } => {
            if !state.document.remove(kind, &id) {
                return Vec::new();
            }
            commit(state, Some(kind.removed_message()))
        }
        UserAction::DeleteSelected => match state.selected_record() {
            Some((kind, id)) => reduce_user(state, UserAction::DeleteRecord { kind, id }),
            None => Vec::new(),
        },
        UserAction::ToggleTask { id } => {
            let Some(task) = state.document.tasks.iter_mut().find(|task| task.id == id) else {
                return Vec::new();
            };
            task.done = !task.done;
            let message = if task.done {
                "Task done 👑"
            } else {
                "Task reopened"
            };
            commit(state, Some(message))
        }
        UserAction::ToggleSelected => match state.selected_record() {
            Some((ListKind::Tasks, id)) => reduce_user(state, UserAction::ToggleTask { id }),
            _ => Vec::new(),
        },
        UserAction::EditGoal { id } => {
            let Some(goal) = state.document.goals.iter().find(|goal| goal.id == id) else {
                return Vec::new();
            };
            state.interaction.overlay = Overlay::Prompt {
                label: GOAL_PROMPT.to_string(),
                input: fmt_number(goal.progress),
                request: PromptRequest::GoalProgress { goal_id: id },
            };
            vec![HustleEffect::RequestFrame]
        }
        UserAction::EditSelected => match state.selected_record() {
            Some((ListKind::Goals, id)) => reduce_user(state, UserAction::EditGoal { id }),
            _ => Vec::new(),
        },

        UserAction::OpenQuickAdd => {
            state.interaction.overlay = Overlay::Prompt {
                label: QUICK_ADD_PROMPT.to_string(),
                input: String::new(),
                request: PromptRequest::QuickAdd,
            };
            vec![HustleEffect::RequestFrame]
        }
        UserAction::OpenImportPrompt => {
            state.interaction.overlay = Overlay::Prompt {
                label: IMPORT_PROMPT.to_string(),
                input: String::new(),
                request: PromptRequest::ImportPath,
            };
            vec![HustleEffect::RequestFrame]
        }
        UserAction::PromptInput(ch) => {
            if let Overlay::Prompt { input, .. } = &mut state.interaction.overlay {
                input.push(ch);
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::PromptBackspace => {
            if let Overlay::Prompt { input, .. } = &mut state.interaction.overlay {
                input.pop();
                return vec![HustleEffect::RequestFrame];
            }
            Vec::new()
        }
        UserAction::PromptSubmit => {
            let answer = match &state.interaction.overlay {
                Overlay::Prompt { input, .. } => input.clone(),
                _ => return Vec::new(),
            };
            reduce_user(state, UserAction::ResolvePrompt(Some(answer)))
        }
        UserAction::ResolvePrompt(answer) => {
            let request = match std::mem::take(&mut state.interaction.overlay) {
                Overlay::Prompt { request, .. } => request,
                other => {
                    state.interaction.overlay = other;
                    return Vec::new();
                }
            };
            let Some(answer) = answer else {
                return vec![HustleEffect::RequestFrame];
            };
            match request {
                PromptRequest::GoalProgress { goal_id } => {
                    set_goal_progress(state, &goal_id, &answer)
                }
                PromptRequest::QuickAdd => quick_add(state, &answer),
                PromptRequest::ImportPath => {
                    let path = answer.trim();
                    if path.is_empty() {
                        return vec![HustleEffect::RequestFrame];
                    }
                    reduce_user(state, UserAction::ChooseImportFile(PathBuf::from(path)))
                }
            }
        }

        UserAction::OpenNoteEditor(field) => {
            state.interaction.overlay = Overlay::NoteEditor { field };
            vec![HustleEffect::RequestFrame]
        }
        UserAction::NoteInput(ch) => edit_note(state, |text| text.push(ch)),
        UserAction::NoteNewline => edit_note(state, |text| text.push('\n')),
        UserAction::NoteBackspace => edit_note(state, |text| {
            text.pop();
        }),
        UserAction::SetNote { field, text } => {
            *field.text_mut(&mut state.document) = text;
            vec![HustleEffect::Persist, HustleEffect::RequestFrame]
        }

        UserAction::SeedSample => {
            state.document = sample_document(state.today);
            commit(state, Some("Sample loaded ✨"))
        }
        UserAction::Export { dir } => vec![HustleEffect::WriteExport { dir }],
        UserAction::ChooseImportFile(path) => {
            state.interaction.pending_import = Some(path.clone());
            vec![HustleEffect::ReadImportFile { path }]
        }
        UserAction::OpenPlan(plan) => match state.document.stripe_link(&plan) {
            Some(url) => vec![HustleEffect::OpenExternal {
                url: url.to_string(),
            }],
            None => toast_only(state, MISSING_PLAN_LINK),
        },
        UserAction::CloseOverlay => {
            state.interaction.overlay = Overlay::None;
            vec![HustleEffect::RequestFrame]
        }
        UserAction::DismissToast { seq } => {
            let current = state.interaction.toast.as_ref().map(|toast| toast.seq);
            if current != Some(seq) {
                return Vec::new();
            }
            state.interaction.toast = None;
            vec![HustleEffect::RequestFrame]
        }
    }
}

fn reduce_runtime(state: &mut AppState, action: RuntimeAction) -> Vec<HustleEffect> {
    match action {
        RuntimeAction::Boot { fragment } => {
            state.routing.view = router::resolve(&fragment);
            enter_view(state)
        }
        RuntimeAction::SetToday(today) => {
            if state.today == today {
                return Vec::new();
            }
            state.today = today;
            vec![HustleEffect::RequestFrame]
        }
        RuntimeAction::ImportLoaded(result) => {
            let path = state.interaction.pending_import.take();
            let parsed = result.and_then(|raw| {
                Document::from_json_str(&raw).map_err(|err| err.to_string())
            });
            match parsed {
                Ok(document) => {
                    state.document = document;
                    commit(state, Some("Backup imported ✨"))
                }
                Err(err) => {
                    warn!(path = ?path, error = %err, "import rejected");
                    state.interaction.overlay = Overlay::Alert {
                        message: IMPORT_FAILED.to_string(),
                    };
                    vec![HustleEffect::RequestFrame]
                }
            }
        }
        RuntimeAction::ExportFinished(Ok(_)) => toast_only(state, "Backup downloaded"),
        RuntimeAction::ExportFinished(Err(_)) => toast_only(state, "Export failed"),
        RuntimeAction::EffectFailed { message } => toast_only(state, &message),
    }
}

fn select_section(state: &mut AppState, section: Section) -> Vec<HustleEffect> {
    state.routing.section = section;
    state.selection.row = 0;
    vec![HustleEffect::RequestFrame]
}

fn enter_view(state: &mut AppState) -> Vec<HustleEffect> {
    if state.routing.view == View::App && !state.app_wired {
        state.app_wired = true;
        debug!(today = %state.today, "application view wired");
    }
    vec![HustleEffect::RequestFrame]
}

fn open_form(state: &mut AppState, kind: FormKind) {
    state.interaction.overlay = Overlay::Form(FormState::new(
        kind,
        state.today,
        &state.document.metrics,
    ));
}

fn set_goal_progress(state: &mut AppState, goal_id: &str, answer: &str) -> Vec<HustleEffect> {
    let progress = match parse_number(answer) {
        Ok(progress) => progress,
        Err(_) => return toast_only(state, "Enter a number"),
    };
    let Some(goal) = state.document.goals.iter_mut().find(|goal| goal.id == goal_id) else {
        return vec![HustleEffect::RequestFrame];
    };
    goal.progress = progress;
    commit(state, Some("Goal updated"))
}

fn quick_add(state: &mut AppState, answer: &str) -> Vec<HustleEffect> {
    if answer.is_empty() {
        return vec![HustleEffect::RequestFrame];
    }
    let (section, kind, message) = match answer.trim() {
        "1" => (Section::Calendar, FormKind::Post, "Add your post ✨"),
        "2" => (Section::Todos, FormKind::Task, "Add your task ☕"),
        "3" => (Section::Contacts, FormKind::Contact, "Add your contact 💎"),
        _ => return toast_only(state, "Choose 1, 2, or 3"),
    };
    state.routing.section = section;
    state.selection.row = 0;
    open_form(state, kind);
    toast_only(state, message)
}

fn edit_note(state: &mut AppState, edit: impl FnOnce(&mut String)) -> Vec<HustleEffect> {
    let field = match &state.interaction.overlay {
        Overlay::NoteEditor { field } => *field,
        _ => return Vec::new(),
    };
    edit(field.text_mut(&mut state.document));
    vec![HustleEffect::Persist, HustleEffect::RequestFrame]
}

fn commit(state: &mut AppState, message: Option<&str>) -> Vec<HustleEffect> {
    reconcile_selection(state);
    let mut effects = vec![HustleEffect::Persist];
    if let Some(message) = message {
        effects.push(show_toast(state, message));
    }
    effects.push(HustleEffect::RequestFrame);
    effects
}

fn toast_only(state: &mut AppState, message: &str) -> Vec<HustleEffect> {
    vec![show_toast(state, message), HustleEffect::RequestFrame]
}

fn show_toast(state: &mut AppState, message: &str) -> HustleEffect {
    state.interaction.next_toast_seq += 1;
    let seq = state.interaction.next_toast_seq;
    state.interaction.toast = Some(Toast {
        seq,
        message: message.to_string(),
    });
    HustleEffect::ScheduleToastDismiss { seq }
}

fn reconcile_selection(state: &mut AppState) {
    let len = state
        .visible_ids()
        .map(|(_, ids)| ids.len())
        .unwrap_or(0);
    if state.selection.row >= len {
        state.selection.row = len.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests;
