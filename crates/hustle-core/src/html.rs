use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::document::Document;
use crate::state::Section;
use crate::views;
use crate::views::ContactsView;
use crate::views::GoalsView;
use crate::views::LandingView;
use crate::views::MetricsView;
use crate::views::OverviewView;
use crate::views::PlanRow;
use crate::views::PostRow;
use crate::views::PostsView;
use crate::views::TaskRow;
use crate::views::TasksView;

static CLASS_UNSAFE: OnceLock<Regex> = OnceLock::new();

fn class_unsafe() -> &'static Regex {
    CLASS_UNSAFE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("static pattern"))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

pub fn escape_class(text: &str) -> String {
    class_unsafe().replace_all(text, "").into_owned()
}

pub fn render_section(section: Section, doc: &Document, today: NaiveDate) -> String {
    match section {
        Section::Overview => render_overview(&views::overview(doc, today)),
        Section::Calendar => render_posts(&views::posts(doc)),
        Section::Todos => render_tasks(&views::tasks(doc)),
        Section::Contacts => render_contacts(&views::contacts(doc)),
        Section::Goals => render_goals(&views::goals(doc)),
        Section::Notes => render_notes(doc),
        Section::Metrics => render_metrics(&views::metrics(doc)),
        Section::Export => render_export(),
    }
}

pub fn render_overview(view: &OverviewView) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="chip" id="todayChip">{}</div>"#,
        escape_html(&view.today)
    ));
    html.push_str(&format!(
        concat!(
            r#"<div class="stats">"#,
            r#"<div class="stat" id="statPosts">{}</div>"#,
            r#"<div class="stat" id="statTasks">{}</div>"#,
            r#"<div class="stat" id="statContacts">{}</div>"#,
            r#"<div class="stat" id="statRevenue">{}</div>"#,
            "</div>"
        ),
        view.post_count,
        view.open_task_count,
        view.contact_count,
        escape_html(&view.revenue)
    ));
    html.push_str(&format!(
        r#"<p id="affirmation">{}</p>"#,
        escape_html(view.affirmation)
    ));

    html.push_str(r#"<div id="upcomingList">"#);
    if view.upcoming.is_empty() {
        push_muted(&mut html, views::EMPTY_UPCOMING);
    }
    for post in &view.upcoming {
        html.push_str(&format!(
            concat!(
                r#"<div class="item"><div class="item__main">"#,
                r#"<div class="item__title">{}</div>"#,
                r#"<div class="item__meta">{} • {} • {}</div>"#,
                "</div></div>"
            ),
            escape_html(&post.title),
            escape_html(&post.date),
            platform_tag(post),
            escape_html(&post.post_type)
        ));
    }
    html.push_str("</div>");

    html.push_str(r#"<div id="taskList">"#);
    if view.open_tasks.is_empty() {
        push_muted(&mut html, views::EMPTY_OPEN_TASKS);
    }
    for task in &view.open_tasks {
        html.push_str(&format!(
            concat!(
                r#"<div class="item"><div class="item__main">"#,
                r#"<div class="item__title">{}</div>"#,
                r#"<div class="item__meta">{}{}</div>"#,
                "</div></div>"
            ),
            escape_html(&task.text),
            escape_html(&task.due_prefix()),
            priority_badge(task)
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_posts(view: &PostsView) -> String {
    let mut html = String::new();
    html.push_str(&format!(r#"<span id="postsCount">{}</span>"#, view.count));
    html.push_str(concat!(
        r#"<div id="postsTable"><div class="tr th">"#,
        r#"<div class="cell">Date</div><div class="cell">Platform</div>"#,
        r#"<div class="cell">Type</div><div class="cell">Title</div><div class="cell"></div>"#,
        "</div>"
    ));
    if view.rows.is_empty() {
        push_muted(&mut html, views::EMPTY_POSTS);
    }
    for post in &view.rows {
        html.push_str(&format!(
            concat!(
                r#"<div class="tr" data-id="{}">"#,
                r#"<div class="cell">{}</div>"#,
                r#"<div class="cell">{}</div>"#,
                r#"<div class="cell">{}</div>"#,
                r#"<div class="cell"><div class="title">{}</div><div class="hook">{}</div></div>"#,
                r#"<div class="cell"><button class="iconBtn" title="Delete">×</button></div>"#,
                "</div>"
            ),
            escape_html(&post.id),
            escape_html(&post.date),
            platform_tag(post),
            escape_html(&post.post_type),
            escape_html(&post.title),
            escape_html(&post.hook)
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_tasks(view: &TasksView) -> String {
    let mut html = String::new();
    html.push_str(&format!(r#"<span id="tasksCount">{}</span>"#, view.count));
    html.push_str(r#"<div id="tasksPanel">"#);
    if view.rows.is_empty() {
        push_muted(&mut html, views::EMPTY_TASKS);
    }
    for task in &view.rows {
        html.push_str(&format!(
            concat!(
                r#"<div class="item" data-id="{}"><div class="item__main">"#,
                r#"<div class="item__title">{}</div>"#,
                r#"<div class="item__meta">{}{}</div>"#,
                r#"</div><div class="item__right">"#,
                r#"<span class="check{}" title="Toggle done">✓</span>"#,
                r#"<button class="iconBtn" title="Delete">×</button>"#,
                "</div></div>"
            ),
            escape_html(&task.id),
            escape_html(&task.text),
            escape_html(&task.due_prefix()),
            priority_badge(task),
            if task.done { " is-on" } else { "" }
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_contacts(view: &ContactsView) -> String {
    let mut html = String::new();
    html.push_str(&format!(r#"<span id="contactsCount">{}</span>"#, view.count));
    html.push_str(r#"<div id="contactsPanel">"#);
    if view.rows.is_empty() {
        push_muted(&mut html, views::EMPTY_CONTACTS);
    }
    for contact in &view.rows {
        let handle = contact
            .handle
            .as_deref()
            .map(|handle| format!(" • {}", escape_html(handle)))
            .unwrap_or_default();
        let notes = contact
            .notes
            .as_deref()
            .map(|notes| format!(r#"<div class="item__meta">{}</div>"#, escape_html(notes)))
            .unwrap_or_default();
        html.push_str(&format!(
            concat!(
                r#"<div class="item" data-id="{}"><div class="item__main">"#,
                r#"<div class="item__title">{}</div>"#,
                r#"<div class="item__meta"><span class="tag tag--{}">{}</span>{}</div>{}"#,
                r#"</div><div class="item__right">"#,
                r#"<button class="iconBtn" title="Delete">×</button>"#,
                "</div></div>"
            ),
            escape_html(&contact.id),
            escape_html(&contact.name),
            escape_class(&contact.tag),
            escape_html(&contact.tag),
            handle,
            notes
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_goals(view: &GoalsView) -> String {
    let mut html = String::new();
    html.push_str(&format!(r#"<span id="goalsCount">{}</span>"#, view.count));
    html.push_str(r#"<div id="goalsPanel">"#);
    if view.rows.is_empty() {
        push_muted(&mut html, views::EMPTY_GOALS);
    }
    for goal in &view.rows {
        html.push_str(&format!(
            concat!(
                r#"<div class="item" data-id="{}"><div class="item__main">"#,
                r#"<div class="item__title">{}</div>"#,
                r#"<div class="item__meta">{}</div>"#,
                r#"<div class="bar"><div class="bar__fill" style="width:{}%"></div></div>"#,
                r#"</div><div class="item__right">"#,
                r#"<button class="iconBtn" title="Edit">✎</button>"#,
                r#"<button class="iconBtn" title="Delete">×</button>"#,
                "</div></div>"
            ),
            escape_html(&goal.id),
            escape_html(&goal.title),
            escape_html(&goal.progress_label),
            goal.percent
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_metrics(view: &MetricsView) -> String {
    format!(
        concat!(
            r#"<form id="metricsForm">"#,
            r#"<input id="mRevenue" type="number" value="{}">"#,
            r#"<input id="mClicks" type="number" value="{}">"#,
            r#"<input id="mDeals" type="number" value="{}">"#,
            r#"<input id="mLeads" type="number" value="{}">"#,
            "</form>",
            r#"<div class="snapshot">"#,
            r#"<div id="snapRevenue">{}</div><div id="snapClicks">{}</div>"#,
            r#"<div id="snapDeals">{}</div><div id="snapLeads">{}</div>"#,
            "</div>"
        ),
        escape_html(&view.revenue),
        escape_html(&view.clicks),
        escape_html(&view.deals),
        escape_html(&view.leads),
        escape_html(&view.snapshot_revenue),
        escape_html(&view.clicks),
        escape_html(&view.deals),
        escape_html(&view.leads)
    )
}

pub fn render_notes(doc: &Document) -> String {
    format!(
        concat!(
            r#"<textarea id="quickNotes">{}</textarea>"#,
            r#"<textarea id="notesVault">{}</textarea>"#
        ),
        escape_html(&doc.quick_notes),
        escape_html(&doc.notes_vault)
    )
}

pub fn render_export() -> String {
    concat!(
        r#"<button id="btnExport">Download backup</button>"#,
        r#"<input id="importFile" type="file" accept=".json">"#
    )
    .to_string()
}

pub fn render_landing(view: &LandingView) -> String {
    format!(
        r#"<div class="mini"><span id="miniPlanned">{}</span><span id="miniTasks">{}</span></div>"#,
        view.planned, view.tasks
    )
}

pub fn render_pricing(plans: &[PlanRow]) -> String {
    let mut html = String::from(r#"<div class="plans">"#);
    for plan in plans {
        html.push_str(&format!(
            r#"<button class="plan{}" data-stripe="{}">{}</button>"#,
            if plan.configured { " is-live" } else { "" },
            escape_class(plan.plan),
            escape_html(plan.label)
        ));
    }
    html.push_str("</div>");
    html
}

fn platform_tag(post: &PostRow) -> String {
    format!(
        r#"<span class="tag tag--{}">{}</span>"#,
        escape_class(&post.platform),
        escape_html(&post.platform)
    )
}

fn priority_badge(task: &TaskRow) -> String {
    format!(
        r#"<span class="priority {}">{}</span>"#,
        task.tier.class(),
        escape_html(&task.priority)
    )
}

fn push_muted(html: &mut String, text: &str) {
    html.push_str(&format!(r#"<div class="muted">{}</div>"#, escape_html(text)));
}
