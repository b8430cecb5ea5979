use std::path::PathBuf;

use chrono::NaiveDate;

use crate::document::Document;
use crate::document::ListKind;
use crate::document::Record;
use crate::forms::FormState;
use crate::router::View;
use crate::views::sorted_posts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    Calendar,
    Todos,
    Contacts,
    Goals,
    Notes,
    Metrics,
    Export,
}

pub const FALLBACK_HEADER: (&str, &str) = ("Dashboard", "Boss mode.");

impl Section {
    pub const ALL: [Section; 8] = [
        Self::Overview,
        Self::Calendar,
        Self::Todos,
        Self::Contacts,
        Self::Goals,
        Self::Notes,
        Self::Metrics,
        Self::Export,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Calendar,
            Self::Calendar => Self::Todos,
            Self::Todos => Self::Contacts,
            Self::Contacts => Self::Goals,
            Self::Goals => Self::Notes,
            Self::Notes => Self::Metrics,
            Self::Metrics => Self::Export,
            Self::Export => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Export,
            Self::Calendar => Self::Overview,
            Self::Todos => Self::Calendar,
            Self::Contacts => Self::Todos,
            Self::Goals => Self::Contacts,
            Self::Notes => Self::Goals,
            Self::Metrics => Self::Notes,
            Self::Export => Self::Metrics,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Calendar => "Calendar",
            Self::Todos => "To-Dos",
            Self::Contacts => "Contacts",
            Self::Goals => "Goals",
            Self::Notes => "Notes",
            Self::Metrics => "Metrics",
            Self::Export => "Export",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Calendar => "calendar",
            Self::Todos => "todos",
            Self::Contacts => "contacts",
            Self::Goals => "goals",
            Self::Notes => "notes",
            Self::Metrics => "metrics",
            Self::Export => "export",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Calendar => "Content Calendar",
            Self::Todos => "CEO To‑Dos",
            Self::Contacts => "Contacts Hub",
            Self::Goals => "Goals",
            Self::Notes => "Notes + Hooks",
            Self::Metrics => "Money & Metrics",
            Self::Export => "Export / Backup",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Overview => "Your marketing day, styled in gold.",
            Self::Calendar => "Schedule posts by platform and date.",
            Self::Todos => "Checklist your way to consistent content.",
            Self::Contacts => "Brands, clients, collabs — all in one place.",
            Self::Goals => "Track the numbers that move your business.",
            Self::Notes => "Save scripts, captions, offers, ideas.",
            Self::Metrics => "Lite tracking for revenue and deals.",
            Self::Export => "Download or import your data.",
        }
    }

    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            Self::Calendar => Some(ListKind::Posts),
            Self::Todos => Some(ListKind::Tasks),
            Self::Contacts => Some(ListKind::Contacts),
            Self::Goals => Some(ListKind::Goals),
            _ => None,
        }
    }
}

pub fn section_header(name: &str) -> (&'static str, &'static str) {
    Section::from_name(name)
        .map(|section| (section.title(), section.subtitle()))
        .unwrap_or(FALLBACK_HEADER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    QuickNotes,
    NotesVault,
}

impl NoteField {
    pub fn label(self) -> &'static str {
        match self {
            Self::QuickNotes => "Quick notes",
            Self::NotesVault => "Notes vault",
        }
    }

    pub fn text(self, doc: &Document) -> &str {
        match self {
            Self::QuickNotes => &doc.quick_notes,
            Self::NotesVault => &doc.notes_vault,
        }
    }

    pub fn text_mut(self, doc: &mut Document) -> &mut String {
        match self {
            Self::QuickNotes => &mut doc.quick_notes,
            Self::NotesVault => &mut doc.notes_vault,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRequest {
    Clear(ListKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    GoalProgress { goal_id: String },
    QuickAdd,
    ImportPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Form(FormState),
    Confirm {
        prompt: String,
        request: ConfirmRequest,
    },
    Prompt {
        label: String,
        input: String,
        request: PromptRequest,
    },
    Alert {
        message: String,
    },
    NoteEditor {
        field: NoteField,
    },
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub seq: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppRouting {
    pub view: View,
    pub section: Section,
}

#[derive(Debug, Clone, Default)]
pub struct AppInteraction {
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub next_toast_seq: u64,
    pub pending_import: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct AppSelection {
    pub row: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub document: Document,
    pub routing: AppRouting,
    pub interaction: AppInteraction,
    pub selection: AppSelection,
    pub app_wired: bool,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(document: Document, today: NaiveDate) -> Self {
        Self {
            document,
            routing: AppRouting::default(),
            interaction: AppInteraction::default(),
            selection: AppSelection::default(),
            app_wired: false,
            today,
        }
    }

    pub fn visible_ids(&self) -> Option<(ListKind, Vec<String>)> {
        let kind = self.routing.section.list_kind()?;
        let doc = &self.document;
        let ids = match kind {
            ListKind::Posts => sorted_posts(doc)
                .into_iter()
                .map(|post| post.id().to_string())
                .collect(),
            ListKind::Tasks => ids_of(&doc.tasks),
            ListKind::Contacts => ids_of(&doc.contacts),
            ListKind::Goals => ids_of(&doc.goals),
        };
        Some((kind, ids))
    }

    pub fn selected_record(&self) -> Option<(ListKind, String)> {
        let (kind, ids) = self.visible_ids()?;
        ids.into_iter()
            .nth(self.selection.row)
            .map(|id| (kind, id))
    }
}

fn ids_of<T: Record>(records: &[T]) -> Vec<String> {
    records.iter().map(|record| record.id().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::Post;

    #[test]
    fn section_cycle_visits_every_section() {
        let mut section = Section::Overview;
        for expected in Section::ALL.iter().skip(1) {
            section = section.next();
            assert_eq!(section, *expected);
        }
        assert_eq!(section.next(), Section::Overview);
        assert_eq!(Section::Overview.prev(), Section::Export);
    }

    #[test]
    fn headers_by_name() {
        assert_eq!(
            section_header("calendar"),
            ("Content Calendar", "Schedule posts by platform and date.")
        );
        assert_eq!(section_header("export").0, "Export / Backup");
        assert_eq!(section_header("settings"), ("Dashboard", "Boss mode."));
    }

    #[test]
    fn calendar_selection_follows_date_order() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let mut doc = Document::default();
        for (id, date) in [("late", "2026-12-01"), ("early", "2026-11-01")] {
            doc.posts.push(Post {
                id: id.to_string(),
                date: date.to_string(),
                ..Post::default()
            });
        }
        let mut state = AppState::new(doc, today);
        state.routing.section = Section::Calendar;
        assert_eq!(
            state.selected_record(),
            Some((ListKind::Posts, "early".to_string()))
        );
        state.selection.row = 5;
        assert_eq!(state.selected_record(), None);

        state.routing.section = Section::Notes;
        assert_eq!(state.visible_ids(), None);
    }
}
