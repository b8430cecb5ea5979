use chrono::NaiveDate;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use hustle_core::views;
use hustle_core::views::PriorityTier;
use hustle_core::Document;
use hustle_core::NoteField;
use hustle_core::Section;
use hustle_exec::EXPORT_FILE_NAME;

const BAR_WIDTH: usize = 20;

#[derive(Clone, Copy)]
pub struct UiPalette {
    pub accent: Color,
    pub accent_alt: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub panel_bg: Color,
    pub selected_bg: Color,
}

pub const GOLD: UiPalette = UiPalette {
    accent: Color::Rgb(212, 175, 55),
    accent_alt: Color::Rgb(255, 105, 180),
    success: Color::LightGreen,
    warning: Color::Yellow,
    muted: Color::DarkGray,
    border: Color::Rgb(140, 115, 40),
    panel_bg: Color::Black,
    selected_bg: Color::Rgb(42, 34, 8),
};

#[derive(Debug, Default)]
pub struct Panel {
    pub lines: Vec<Line<'static>>,
    pub selected_line: Option<usize>,
}

impl Panel {
    fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn heading(&mut self, text: impl Into<String>, palette: UiPalette) {
        self.push(Line::from(Span::styled(
            text.into(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
    }

    fn muted(&mut self, text: impl Into<String>, palette: UiPalette) {
        self.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(palette.muted),
        )));
    }

    fn record(&mut self, lines: Vec<Line<'static>>, selected: bool, palette: UiPalette) {
        if selected {
            self.selected_line = Some(self.lines.len());
        }
        for (idx, line) in lines.into_iter().enumerate() {
            let marker = match (selected, idx) {
                (true, 0) => "▸ ",
                _ => "  ",
            };
            let mut spans = vec![Span::styled(marker, Style::default().fg(palette.accent))];
            spans.extend(line.spans);
            let mut line = Line::from(spans);
            if selected {
                line = line.style(Style::default().bg(palette.selected_bg));
            }
            self.lines.push(line);
        }
    }
}

pub fn section_panel(
    section: Section,
    doc: &Document,
    today: NaiveDate,
    selected: Option<usize>,
    palette: UiPalette,
) -> Panel {
    let mut panel = Panel::default();
    match section {
        Section::Overview => overview(&mut panel, doc, today, palette),
        Section::Calendar => calendar(&mut panel, doc, selected, palette),
        Section::Todos => todos(&mut panel, doc, selected, palette),
        Section::Contacts => contacts(&mut panel, doc, selected, palette),
        Section::Goals => goals(&mut panel, doc, selected, palette),
        Section::Notes => notes(&mut panel, doc, palette),
        Section::Metrics => metrics(&mut panel, doc, palette),
        Section::Export => export(&mut panel, palette),
    }
    panel
}

fn overview(panel: &mut Panel, doc: &Document, today: NaiveDate, palette: UiPalette) {
    let view = views::overview(doc, today);
    panel.push(Line::from(vec![
        stat("Posts", view.post_count.to_string(), palette),
        stat("Open tasks", view.open_task_count.to_string(), palette),
        stat("Contacts", view.contact_count.to_string(), palette),
        stat("Revenue", view.revenue.clone(), palette),
    ]));
    panel.push(Line::from(Span::styled(
        view.affirmation,
        Style::default()
            .fg(palette.accent_alt)
            .add_modifier(Modifier::ITALIC),
    )));
    panel.blank();

    panel.heading("Upcoming (next 7 days)", palette);
    if view.upcoming.is_empty() {
        panel.muted(views::EMPTY_UPCOMING, palette);
    }
    for post in &view.upcoming {
        panel.record(
            vec![
                Line::from(post.title.clone()),
                meta(
                    format!("{} • {} • {}", post.date, post.platform, post.post_type),
                    palette,
                ),
            ],
            false,
            palette,
        );
    }
    panel.blank();

    panel.heading("Open tasks", palette);
    if view.open_tasks.is_empty() {
        panel.muted(views::EMPTY_OPEN_TASKS, palette);
    }
    for task in &view.open_tasks {
        panel.record(
            vec![
                Line::from(task.text.clone()),
                Line::from(vec![
                    Span::styled(task.due_prefix(), Style::default().fg(palette.muted)),
                    Span::styled(task.priority.clone(), tier_style(task.tier, palette)),
                ]),
            ],
            false,
            palette,
        );
    }
}

fn calendar(panel: &mut Panel, doc: &Document, selected: Option<usize>, palette: UiPalette) {
    let view = views::posts(doc);
    panel.heading(format!("{} posts", view.count), palette);
    if view.rows.is_empty() {
        panel.muted(views::EMPTY_POSTS, palette);
    }
    for (idx, post) in view.rows.iter().enumerate() {
        panel.record(
            vec![
                Line::from(vec![
                    Span::styled(post.date.clone(), Style::default().fg(palette.accent)),
                    Span::raw("  "),
                    Span::styled(post.platform.clone(), Style::default().fg(palette.accent_alt)),
                    Span::raw("  "),
                    Span::raw(post.post_type.clone()),
                ]),
                Line::from(post.title.clone()),
                meta(post.hook.clone(), palette),
            ],
            selected == Some(idx),
            palette,
        );
    }
}

fn todos(panel: &mut Panel, doc: &Document, selected: Option<usize>, palette: UiPalette) {
    let view = views::tasks(doc);
    panel.heading(format!("{} tasks", view.count), palette);
    if view.rows.is_empty() {
        panel.muted(views::EMPTY_TASKS, palette);
    }
    for (idx, task) in view.rows.iter().enumerate() {
        let (check, text_style) = if task.done {
            (
                "[x] ",
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", Style::default())
        };
        panel.record(
            vec![
                Line::from(vec![
                    Span::styled(check, Style::default().fg(palette.success)),
                    Span::styled(task.text.clone(), text_style),
                ]),
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(task.due_prefix(), Style::default().fg(palette.muted)),
                    Span::styled(task.priority.clone(), tier_style(task.tier, palette)),
                ]),
            ],
            selected == Some(idx),
            palette,
        );
    }
}

fn contacts(panel: &mut Panel, doc: &Document, selected: Option<usize>, palette: UiPalette) {
    let view = views::contacts(doc);
    panel.heading(format!("{} contacts", view.count), palette);
    if view.rows.is_empty() {
        panel.muted(views::EMPTY_CONTACTS, palette);
    }
    for (idx, contact) in view.rows.iter().enumerate() {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                contact.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(contact.tag.clone(), Style::default().fg(palette.accent_alt)),
        ])];
        if let Some(handle) = &contact.handle {
            lines.push(meta(handle.clone(), palette));
        }
        if let Some(notes) = &contact.notes {
            lines.push(meta(notes.clone(), palette));
        }
        panel.record(lines, selected == Some(idx), palette);
    }
}

fn goals(panel: &mut Panel, doc: &Document, selected: Option<usize>, palette: UiPalette) {
    let view = views::goals(doc);
    panel.heading(format!("{} goals", view.count), palette);
    if view.rows.is_empty() {
        panel.muted(views::EMPTY_GOALS, palette);
    }
    for (idx, goal) in view.rows.iter().enumerate() {
        panel.record(
            vec![
                Line::from(goal.title.clone()),
                Line::from(vec![
                    Span::styled(progress_bar(goal.percent), Style::default().fg(palette.accent)),
                    Span::raw(" "),
                    Span::styled(goal.progress_label.clone(), Style::default().fg(palette.muted)),
                ]),
            ],
            selected == Some(idx),
            palette,
        );
    }
}

fn notes(panel: &mut Panel, doc: &Document, palette: UiPalette) {
    for (key, field) in [('1', NoteField::QuickNotes), ('2', NoteField::NotesVault)] {
        panel.heading(format!("{}  [{key} to edit]", field.label()), palette);
        let text = field.text(doc);
        if text.is_empty() {
            panel.muted("(empty)", palette);
        }
        for line in text.lines() {
            panel.push(Line::from(line.to_string()));
        }
        panel.blank();
    }
}

fn metrics(panel: &mut Panel, doc: &Document, palette: UiPalette) {
    let view = views::metrics(doc);
    for (label, value) in [
        ("Revenue", &view.revenue),
        ("Link clicks", &view.clicks),
        ("Deals closed", &view.deals),
        ("Leads", &view.leads),
    ] {
        panel.push(Line::from(vec![
            Span::styled(format!("{label:<14}"), Style::default().fg(palette.muted)),
            Span::styled(
                value.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    panel.blank();
    panel.push(Line::from(vec![
        Span::styled("Snapshot      ", Style::default().fg(palette.muted)),
        Span::raw(view.snapshot_revenue),
    ]));
}

fn export(panel: &mut Panel, palette: UiPalette) {
    panel.push(Line::from(vec![
        key_hint("e", palette),
        Span::raw(format!("Download backup ({EXPORT_FILE_NAME})")),
    ]));
    panel.push(Line::from(vec![
        key_hint("i", palette),
        Span::raw("Import a backup file"),
    ]));
    panel.blank();
    panel.muted(
        "Importing replaces everything stored here with the file's contents.",
        palette,
    );
}

pub fn landing_panel(doc: &Document, palette: UiPalette) -> Panel {
    let view = views::landing(doc);
    let mut panel = Panel::default();
    panel.heading("Her Social Suite", palette);
    panel.push(Line::from(Span::styled(
        "Plan content, run your CEO to-dos and track the money, all in one place.",
        Style::default().fg(palette.accent_alt),
    )));
    panel.blank();
    panel.push(Line::from(vec![
        stat("Posts planned", view.planned.to_string(), palette),
        stat("CEO tasks", view.tasks.to_string(), palette),
    ]));
    panel.blank();
    panel.push(Line::from(vec![
        key_hint("a", palette),
        Span::raw("Open the dashboard"),
    ]));
    panel.push(Line::from(vec![
        key_hint("p", palette),
        Span::raw("See pricing"),
    ]));
    panel
}

pub fn pricing_panel(doc: &Document, palette: UiPalette) -> Panel {
    let mut panel = Panel::default();
    panel.heading("Pricing", palette);
    panel.blank();
    for (idx, plan) in views::pricing(doc).iter().enumerate() {
        let status = if plan.configured {
            Span::styled("checkout ready", Style::default().fg(palette.success))
        } else {
            Span::styled("no link yet", Style::default().fg(palette.muted))
        };
        panel.push(Line::from(vec![
            key_hint(&(idx + 1).to_string(), palette),
            Span::styled(
                format!("{:<10}", plan.label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            status,
        ]));
    }
    panel.blank();
    panel.push(Line::from(vec![
        key_hint("a", palette),
        Span::raw("Open the dashboard"),
    ]));
    panel.push(Line::from(vec![key_hint("h", palette), Span::raw("Home")]));
    panel
}

pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn stat(label: &str, value: String, palette: UiPalette) -> Span<'static> {
    Span::styled(
        format!("{label}: {value}   "),
        Style::default().fg(palette.accent),
    )
}

fn meta(text: String, palette: UiPalette) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(palette.muted)))
}

fn key_hint(key: &str, palette: UiPalette) -> Span<'static> {
    Span::styled(
        format!("[{key}] "),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )
}

fn tier_style(tier: PriorityTier, palette: UiPalette) -> Style {
    match tier {
        PriorityTier::Gold => Style::default().fg(palette.accent),
        PriorityTier::Pink => Style::default().fg(palette.accent_alt),
        PriorityTier::Black => Style::default().fg(Color::Gray),
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
