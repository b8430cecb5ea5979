use chrono::NaiveDate;

use crate::document::new_id;
use crate::document::Contact;
use crate::document::Goal;
use crate::document::Metrics;
use crate::document::Post;
use crate::document::Task;
use crate::views::iso_day;

pub const PLATFORMS: &[&str] = &[
    "Instagram",
    "TikTok",
    "Pinterest",
    "YouTube",
    "Facebook",
    "LinkedIn",
    "X",
];

pub const POST_TYPES: &[&str] = &[
    "Reel / Short",
    "Carousel",
    "Story",
    "Behind-the-scenes",
    "Pin",
    "Live",
    "Static post",
];

pub const PRIORITIES: &[&str] = &["Gold (High)", "Pink (Medium)", "Black (Low)"];

pub const CONTACT_TAGS: &[&str] = &["Brand Deal", "Client", "Collab", "Lead", "Other"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNumber(pub String);

pub fn parse_number(input: &str) -> Result<f64, InvalidNumber> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidNumber(input.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub date: String,
    pub platform: String,
    pub post_type: String,
    pub title: String,
    pub hook: String,
}

impl PostDraft {
    pub fn into_record(self, today: NaiveDate) -> Post {
        let date = self.date.trim();
        Post {
            id: new_id(),
            date: if date.is_empty() {
                iso_day(today)
            } else {
                date.to_string()
            },
            platform: self.platform,
            post_type: self.post_type,
            title: self.title.trim().to_string(),
            hook: self.hook.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub priority: String,
    pub due: String,
}

impl TaskDraft {
    pub fn into_record(self) -> Task {
        Task {
            id: new_id(),
            text: self.text.trim().to_string(),
            priority: self.priority,
            due: self.due.trim().to_string(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub tag: String,
    pub handle: String,
    pub notes: String,
}

impl ContactDraft {
    pub fn into_record(self) -> Contact {
        Contact {
            id: new_id(),
            name: self.name.trim().to_string(),
            tag: self.tag,
            handle: self.handle.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub target: String,
    pub progress: String,
}

impl GoalDraft {
    pub fn into_record(self) -> Result<Goal, InvalidNumber> {
        Ok(Goal {
            id: new_id(),
            title: self.title.trim().to_string(),
            target: parse_number(&self.target)?,
            progress: parse_number(&self.progress)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsDraft {
    pub revenue: String,
    pub clicks: String,
    pub deals: String,
    pub leads: String,
}

impl MetricsDraft {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            revenue: crate::views::fmt_number(metrics.revenue),
            clicks: crate::views::fmt_number(metrics.clicks),
            deals: crate::views::fmt_number(metrics.deals),
            leads: crate::views::fmt_number(metrics.leads),
        }
    }

    pub fn into_metrics(self) -> Result<Metrics, InvalidNumber> {
        Ok(Metrics {
            revenue: parse_number(&self.revenue)?,
            clicks: parse_number(&self.clicks)?,
            deals: parse_number(&self.deals)?,
            leads: parse_number(&self.leads)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Post,
    Task,
    Contact,
    Goal,
    Metrics,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Post => "New post",
            Self::Task => "New task",
            Self::Contact => "New contact",
            Self::Goal => "New goal",
            Self::Metrics => "Money & metrics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub choices: &'static [&'static str],
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            choices: &[],
        }
    }

    fn prefilled(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            choices: &[],
        }
    }

    fn select(label: &'static str, choices: &'static [&'static str]) -> Self {
        Self {
            label,
            value: choices.first().map(|c| c.to_string()).unwrap_or_default(),
            choices,
        }
    }

    pub fn is_select(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn cycle(&mut self, forward: bool) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len();
        let next = match self.choices.iter().position(|c| *c == self.value) {
            Some(idx) if forward => (idx + 1) % len,
            Some(0) => len - 1,
            Some(idx) => idx - 1,
            None => 0,
        };
        self.value = self.choices[next].to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDraft {
    Post(PostDraft),
    Task(TaskDraft),
    Contact(ContactDraft),
    Goal(GoalDraft),
    Metrics(MetricsDraft),
}

impl FormState {
    pub fn new(kind: FormKind, today: NaiveDate, metrics: &Metrics) -> Self {
        let fields = match kind {
            FormKind::Post => vec![
                FormField::prefilled("Date", iso_day(today)),
                FormField::select("Platform", PLATFORMS),
                FormField::select("Type", POST_TYPES),
                FormField::text("Title"),
                FormField::text("Hook"),
            ],
            FormKind::Task => vec![
                FormField::text("Task"),
                FormField::select("Priority", PRIORITIES),
                FormField::text("Due (YYYY-MM-DD)"),
            ],
            FormKind::Contact => vec![
                FormField::text("Name"),
                FormField::select("Tag", CONTACT_TAGS),
                FormField::text("Handle / email"),
                FormField::text("Notes"),
            ],
            FormKind::Goal => vec![
                FormField::text("Goal"),
                FormField::text("Target"),
                FormField::text("Progress"),
            ],
            FormKind::Metrics => {
                let draft = MetricsDraft::from_metrics(metrics);
                vec![
                    FormField::prefilled("Revenue", draft.revenue),
                    FormField::prefilled("Clicks", draft.clicks),
                    FormField::prefilled("Deals", draft.deals),
                    FormField::prefilled("Leads", draft.leads),
                ]
            }
        };
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    fn value(&self, idx: usize) -> String {
        self.fields
            .get(idx)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }

    pub fn to_draft(&self) -> FormDraft {
        match self.kind {
            FormKind::Post => FormDraft::Post(PostDraft {
                date: self.value(0),
                platform: self.value(1),
                post_type: self.value(2),
                title: self.value(3),
                hook: self.value(4),
            }),
            FormKind::Task => FormDraft::Task(TaskDraft {
                text: self.value(0),
                priority: self.value(1),
                due: self.value(2),
            }),
            FormKind::Contact => FormDraft::Contact(ContactDraft {
                name: self.value(0),
                tag: self.value(1),
                handle: self.value(2),
                notes: self.value(3),
            }),
            FormKind::Goal => FormDraft::Goal(GoalDraft {
                title: self.value(0),
                target: self.value(1),
                progress: self.value(2),
            }),
            FormKind::Metrics => FormDraft::Metrics(MetricsDraft {
                revenue: self.value(0),
                clicks: self.value(1),
                deals: self.value(2),
                leads: self.value(3),
            }),
        }
    }
}
