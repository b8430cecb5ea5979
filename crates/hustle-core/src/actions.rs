use std::path::PathBuf;

use chrono::NaiveDate;

use super::document::ListKind;
use super::forms::ContactDraft;
use super::forms::FormKind;
use super::forms::GoalDraft;
use super::forms::MetricsDraft;
use super::forms::PostDraft;
use super::forms::TaskDraft;
use super::state::NoteField;
use super::state::Section;

#[derive(Debug, Clone)]
pub enum AppAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    Navigate {
        fragment: String,
    },
    SelectSection(Section),
    NextSection,
    PrevSection,
    SelectNextRow,
    SelectPrevRow,

    OpenForm(FormKind),
    FormInput(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    FormCycleChoice {
        forward: bool,
    },
    FormSubmit,

    AddPost(PostDraft),
    AddTask(TaskDraft),
    AddContact(ContactDraft),
    AddGoal(GoalDraft),
    SaveMetrics(MetricsDraft),
    ResetMetrics,

    RequestClear(ListKind),
    ResolveConfirm(bool),
    DeleteRecord {
        kind: ListKind,
        id: String,
    },
    DeleteSelected,
    ToggleTask {
        id: String,
    },
    ToggleSelected,
    EditGoal {
        id: String,
    },
    EditSelected,

    OpenQuickAdd,
    OpenImportPrompt,
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    ResolvePrompt(Option<String>),

    OpenNoteEditor(NoteField),
    NoteInput(char),
    NoteNewline,
    NoteBackspace,
    SetNote {
        field: NoteField,
        text: String,
    },

    SeedSample,
    Export {
        dir: PathBuf,
    },
    ChooseImportFile(PathBuf),
    OpenPlan(String),
    CloseOverlay,
    DismissToast {
        seq: u64,
    },
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    // Unlike Navigate, keeps the selected section.
    Boot {
        fragment: String,
    },
    SetToday(NaiveDate),
    ImportLoaded(Result<String, String>),
    ExportFinished(Result<PathBuf, String>),
    EffectFailed {
        message: String,
    },
}

impl From<UserAction> for AppAction {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}

impl From<RuntimeAction> for AppAction {
    fn from(action: RuntimeAction) -> Self {
        Self::Runtime(action)
    }
}
