use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDate;

use crate::document::Contact;
use crate::document::Document;
use crate::document::Goal;
use crate::document::Post;
use crate::document::Task;
use crate::document::STRIPE_PLANS;

pub const UPCOMING_WINDOW_DAYS: i64 = 7;
pub const OVERVIEW_LIMIT: usize = 6;

pub const AFFIRMATIONS: [&str; 5] = [
    "Your brand is a luxury experience — post like it.",
    "Consistency is the flex. Show up anyway.",
    "Create in peace. Collect in profit.",
    "You’re not behind. You’re building momentum.",
    "Elegant execution beats perfect planning.",
];

pub const EMPTY_UPCOMING: &str =
    "No posts scheduled for the next 7 days. Add one in “Content Calendar”.";
pub const EMPTY_OPEN_TASKS: &str = "No open tasks. Add one in “CEO To‑Dos”.";
pub const EMPTY_POSTS: &str = "No posts yet. Add your first post.";
pub const EMPTY_TASKS: &str = "No tasks yet. Add your first CEO task.";
pub const EMPTY_CONTACTS: &str = "No contacts yet. Add a brand, client, or collab lead.";
pub const EMPTY_GOALS: &str = "No goals yet. Add one to start tracking.";

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn iso_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn today_chip(today: NaiveDate) -> String {
    today.format("%A, %b %-d").to_string()
}

// Inclusive on both ends; unparseable dates are never upcoming.
pub fn in_next_days(iso: &str, days: i64, today: NaiveDate) -> bool {
    let Some(date) = parse_iso_day(iso) else {
        return false;
    };
    let diff = date.signed_duration_since(today).num_days();
    (0..=days).contains(&diff)
}

pub fn fmt_money(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let whole = rounded as i64;
    let sign = if whole < 0 { "-" } else { "" };
    format!("${sign}{}", group_thousands(whole.unsigned_abs()))
}

pub fn fmt_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

// Clamped to 0..=100; zero without a usable target.
pub fn goal_percent(progress: f64, target: f64) -> u8 {
    if target == 0.0 || !target.is_finite() || !progress.is_finite() {
        return 0;
    }
    let pct = (progress / target * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

pub fn affirmation(today: NaiveDate, post_count: usize) -> &'static str {
    let idx = (today.day() as usize + post_count) % AFFIRMATIONS.len();
    AFFIRMATIONS[idx]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    Gold,
    Pink,
    Black,
}

impl PriorityTier {
    pub fn from_priority(priority: &str) -> Self {
        if priority.starts_with("Gold") {
            Self::Gold
        } else if priority.starts_with("Pink") {
            Self::Pink
        } else {
            Self::Black
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Gold => "p-gold",
            Self::Pink => "p-pink",
            Self::Black => "p-black",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: String,
    pub date: String,
    pub platform: String,
    pub post_type: String,
    pub title: String,
    pub hook: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            date: post.date.clone(),
            platform: post.platform.clone(),
            post_type: post.post_type.clone(),
            title: post.title.clone(),
            hook: post.hook.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub text: String,
    pub due: Option<String>,
    pub priority: String,
    pub tier: PriorityTier,
    pub done: bool,
}

impl TaskRow {
    pub fn due_prefix(&self) -> String {
        self.due
            .as_deref()
            .map(|due| format!("Due {due} • "))
            .unwrap_or_default()
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            due: Some(task.due.clone()).filter(|due| !due.is_empty()),
            priority: task.priority.clone(),
            tier: PriorityTier::from_priority(&task.priority),
            done: task.done,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub tag: String,
    pub handle: Option<String>,
    pub notes: Option<String>,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            tag: contact.tag.clone(),
            handle: Some(contact.handle.clone()).filter(|h| !h.is_empty()),
            notes: Some(contact.notes.clone()).filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRow {
    pub id: String,
    pub title: String,
    pub progress_label: String,
    pub percent: u8,
}

impl From<&Goal> for GoalRow {
    fn from(goal: &Goal) -> Self {
        let percent = goal_percent(goal.progress, goal.target);
        Self {
            id: goal.id.clone(),
            title: goal.title.clone(),
            progress_label: format!(
                "{}/{} ({percent}%)",
                fmt_number(goal.progress),
                fmt_number(goal.target)
            ),
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewView {
    pub today: String,
    pub post_count: usize,
    pub open_task_count: usize,
    pub contact_count: usize,
    pub revenue: String,
    pub affirmation: &'static str,
    pub upcoming: Vec<PostRow>,
    pub open_tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsView {
    pub count: usize,
    pub rows: Vec<PostRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksView {
    pub count: usize,
    pub rows: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsView {
    pub count: usize,
    pub rows: Vec<ContactRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalsView {
    pub count: usize,
    pub rows: Vec<GoalRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsView {
    pub revenue: String,
    pub clicks: String,
    pub deals: String,
    pub leads: String,
    pub snapshot_revenue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView {
    pub planned: usize,
    pub tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub plan: &'static str,
    pub label: &'static str,
    pub configured: bool,
}

pub fn sorted_posts(doc: &Document) -> Vec<&Post> {
    let mut posts: Vec<&Post> = doc.posts.iter().collect();
    posts.sort_by(|a, b| a.date.cmp(&b.date));
    posts
}

pub fn overview(doc: &Document, today: NaiveDate) -> OverviewView {
    let upcoming = sorted_posts(doc)
        .into_iter()
        .filter(|post| in_next_days(&post.date, UPCOMING_WINDOW_DAYS, today))
        .take(OVERVIEW_LIMIT)
        .map(PostRow::from)
        .collect();
    let open_tasks = doc
        .tasks
        .iter()
        .filter(|task| !task.done)
        .take(OVERVIEW_LIMIT)
        .map(TaskRow::from)
        .collect();

    OverviewView {
        today: today_chip(today),
        post_count: doc.posts.len(),
        open_task_count: doc.open_task_count(),
        contact_count: doc.contacts.len(),
        revenue: fmt_money(doc.metrics.revenue),
        affirmation: affirmation(today, doc.posts.len()),
        upcoming,
        open_tasks,
    }
}

pub fn posts(doc: &Document) -> PostsView {
    PostsView {
        count: doc.posts.len(),
        rows: sorted_posts(doc).into_iter().map(PostRow::from).collect(),
    }
}

pub fn tasks(doc: &Document) -> TasksView {
    TasksView {
        count: doc.tasks.len(),
        rows: doc.tasks.iter().map(TaskRow::from).collect(),
    }
}

pub fn contacts(doc: &Document) -> ContactsView {
    ContactsView {
        count: doc.contacts.len(),
        rows: doc.contacts.iter().map(ContactRow::from).collect(),
    }
}

pub fn goals(doc: &Document) -> GoalsView {
    GoalsView {
        count: doc.goals.len(),
        rows: doc.goals.iter().map(GoalRow::from).collect(),
    }
}

pub fn metrics(doc: &Document) -> MetricsView {
    let m = &doc.metrics;
    MetricsView {
        revenue: fmt_number(m.revenue),
        clicks: fmt_number(m.clicks),
        deals: fmt_number(m.deals),
        leads: fmt_number(m.leads),
        snapshot_revenue: fmt_money(m.revenue),
    }
}

pub fn landing(doc: &Document) -> LandingView {
    let or_default = |len: usize, fallback: usize| if len == 0 { fallback } else { len };
    LandingView {
        planned: or_default(doc.posts.len(), 3).max(2),
        tasks: or_default(doc.tasks.len(), 7).max(5),
    }
}

pub fn pricing(doc: &Document) -> Vec<PlanRow> {
    STRIPE_PLANS
        .iter()
        .copied()
        .map(|plan| PlanRow {
            plan,
            label: match plan {
                "starter" => "Starter",
                "boss" => "Boss",
                _ => "CEO",
            },
            configured: doc.stripe_link(plan).is_some(),
        })
        .collect()
}
