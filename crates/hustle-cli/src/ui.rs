use std::io;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Terminal;
use tracing::info;
use tracing::warn;

use hustle_core::forms::FormKind;
use hustle_core::forms::FormState;
use hustle_core::router::View;
use hustle_core::views;
use hustle_core::AppAction;
use hustle_core::AppState;
use hustle_core::NoteField;
use hustle_core::Overlay;
use hustle_core::RuntimeAction;
use hustle_core::Section;
use hustle_core::UserAction;
use hustle_core::STRIPE_PLANS;
use hustle_exec::dispatch;
use hustle_exec::EffectExecutor;

use crate::panels::{self, Panel, UiPalette, GOLD};

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const DAY_CHECK_INTERVAL: Duration = Duration::from_secs(30);

pub struct UiOptions {
    pub start_route: String,
    pub toast_delay: Duration,
    pub export_dir: PathBuf,
}

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run<E: EffectExecutor>(
    mut state: AppState,
    executor: &mut E,
    options: UiOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard; // Ensures terminal is restored on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(executor, &options);
    run_app(&mut terminal, &mut state, &mut session).map_err(|e| e.into())
}

struct Session<'a, E: ?Sized> {
    executor: &'a mut E,
    options: &'a UiOptions,
    toast_deadlines: Vec<(u64, Instant)>,
}

impl<'a, E: EffectExecutor + ?Sized> Session<'a, E> {
    fn new(executor: &'a mut E, options: &'a UiOptions) -> Self {
        Self {
            executor,
            options,
            toast_deadlines: Vec::new(),
        }
    }

    fn apply(&mut self, state: &mut AppState, action: impl Into<AppAction>) {
        let dispatched = dispatch(state, action.into(), &mut *self.executor);
        for failure in dispatched.failures() {
            warn!(effect = %failure.effect, logs = ?failure.logs, "effect failed");
        }
        let deadline = Instant::now() + self.options.toast_delay;
        self.toast_deadlines.extend(
            dispatched
                .toast_dismissals
                .into_iter()
                .map(|seq| (seq, deadline)),
        );
    }

    fn expire_toasts(&mut self, state: &mut AppState, now: Instant) {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .toast_deadlines
            .drain(..)
            .partition(|(_, deadline)| *deadline <= now);
        self.toast_deadlines = pending;
        for (seq, _) in due {
            self.apply(state, UserAction::DismissToast { seq });
        }
    }
}

enum KeyHandlerResult {
    Continue(Vec<UserAction>),
    Exit,
}

fn handle_form_keys(key: KeyEvent, form: &FormState) -> KeyHandlerResult {
    let focused_select = form
        .fields
        .get(form.focus)
        .is_some_and(|field| field.is_select());
    let action = match key.code {
        KeyCode::Esc => Some(UserAction::CloseOverlay),
        KeyCode::Enter => Some(UserAction::FormSubmit),
        KeyCode::Tab | KeyCode::Down => Some(UserAction::FormNextField),
        KeyCode::BackTab | KeyCode::Up => Some(UserAction::FormPrevField),
        KeyCode::Right | KeyCode::Char(' ') if focused_select => {
            Some(UserAction::FormCycleChoice { forward: true })
        }
        KeyCode::Left if focused_select => Some(UserAction::FormCycleChoice { forward: false }),
        KeyCode::Backspace => Some(UserAction::FormBackspace),
        KeyCode::Char(c) => Some(UserAction::FormInput(c)),
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_confirm_keys(key: KeyEvent) -> KeyHandlerResult {
    let action = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            Some(UserAction::ResolveConfirm(true))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            Some(UserAction::ResolveConfirm(false))
        }
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_prompt_keys(key: KeyEvent) -> KeyHandlerResult {
    let action = match key.code {
        KeyCode::Esc => Some(UserAction::ResolvePrompt(None)),
        KeyCode::Enter => Some(UserAction::PromptSubmit),
        KeyCode::Backspace => Some(UserAction::PromptBackspace),
        KeyCode::Char(c) => Some(UserAction::PromptInput(c)),
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_alert_keys(key: KeyEvent) -> KeyHandlerResult {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(UserAction::CloseOverlay),
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_note_keys(key: KeyEvent) -> KeyHandlerResult {
    let action = match key.code {
        KeyCode::Esc => Some(UserAction::CloseOverlay),
        KeyCode::Enter => Some(UserAction::NoteNewline),
        KeyCode::Backspace => Some(UserAction::NoteBackspace),
        KeyCode::Char(c) => Some(UserAction::NoteInput(c)),
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_site_keys(key: KeyEvent, view: View) -> KeyHandlerResult {
    let navigate = |view: View| UserAction::Navigate {
        fragment: view.fragment().to_string(),
    };
    let action = match key.code {
        KeyCode::Char('q') => return KeyHandlerResult::Exit,
        KeyCode::Char('a') | KeyCode::Enter => Some(navigate(View::App)),
        KeyCode::Char('p') => Some(navigate(View::Pricing)),
        KeyCode::Char('h') | KeyCode::Esc => Some(navigate(View::Landing)),
        KeyCode::Char(c @ '1'..='3') if view == View::Pricing => {
            let idx = c as usize - '1' as usize;
            STRIPE_PLANS
                .get(idx)
                .map(|plan| UserAction::OpenPlan(plan.to_string()))
        }
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn form_for(section: Section) -> Option<FormKind> {
    match section {
        Section::Calendar => Some(FormKind::Post),
        Section::Todos => Some(FormKind::Task),
        Section::Contacts => Some(FormKind::Contact),
        Section::Goals => Some(FormKind::Goal),
        Section::Metrics => Some(FormKind::Metrics),
        _ => None,
    }
}

fn handle_global_keys(key: KeyEvent, state: &AppState, options: &UiOptions) -> KeyHandlerResult {
    if state.routing.view != View::App {
        return handle_site_keys(key, state.routing.view);
    }

    let section = state.routing.section;
    let action = match key.code {
        KeyCode::Char('q') => return KeyHandlerResult::Exit,
        KeyCode::Tab | KeyCode::Right => Some(UserAction::NextSection),
        KeyCode::BackTab | KeyCode::Left => Some(UserAction::PrevSection),
        KeyCode::Down | KeyCode::Char('j') => Some(UserAction::SelectNextRow),
        KeyCode::Up | KeyCode::Char('k') => Some(UserAction::SelectPrevRow),
        KeyCode::Char('n') => form_for(section).map(UserAction::OpenForm),
        KeyCode::Char('d') | KeyCode::Delete => Some(UserAction::DeleteSelected),
        KeyCode::Char('x') | KeyCode::Char(' ') => Some(UserAction::ToggleSelected),
        KeyCode::Enter => match section {
            Section::Todos => Some(UserAction::ToggleSelected),
            Section::Goals => Some(UserAction::EditSelected),
            _ => None,
        },
        KeyCode::Char('e') if section == Section::Export => Some(UserAction::Export {
            dir: options.export_dir.clone(),
        }),
        KeyCode::Char('e') => Some(UserAction::EditSelected),
        KeyCode::Char('i') => Some(UserAction::OpenImportPrompt),
        KeyCode::Char('C') => section.list_kind().map(UserAction::RequestClear),
        KeyCode::Char('r') if section == Section::Metrics => Some(UserAction::ResetMetrics),
        KeyCode::Char('s') => Some(UserAction::SeedSample),
        KeyCode::Char('+') => Some(UserAction::OpenQuickAdd),
        KeyCode::Char('1') if section == Section::Notes => {
            Some(UserAction::OpenNoteEditor(NoteField::QuickNotes))
        }
        KeyCode::Char('2') if section == Section::Notes => {
            Some(UserAction::OpenNoteEditor(NoteField::NotesVault))
        }
        KeyCode::Char('h') => Some(UserAction::Navigate {
            fragment: View::Landing.fragment().to_string(),
        }),
        KeyCode::Char('p') => Some(UserAction::Navigate {
            fragment: View::Pricing.fragment().to_string(),
        }),
        _ => None,
    };
    KeyHandlerResult::Continue(action.into_iter().collect())
}

fn handle_key_event(key: KeyEvent, state: &AppState, options: &UiOptions) -> KeyHandlerResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyHandlerResult::Exit;
    }

    match &state.interaction.overlay {
        Overlay::Form(form) => handle_form_keys(key, form),
        Overlay::Confirm { .. } => handle_confirm_keys(key),
        Overlay::Prompt { .. } => handle_prompt_keys(key),
        Overlay::Alert { .. } => handle_alert_keys(key),
        Overlay::NoteEditor { .. } => handle_note_keys(key),
        Overlay::None => handle_global_keys(key, state, options),
    }
}

fn run_app<B: Backend, E: EffectExecutor + ?Sized>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    session: &mut Session<'_, E>,
) -> io::Result<()> {
    let fragment = session.options.start_route.clone();
    info!(route = %fragment, "terminal session started");
    session.apply(state, RuntimeAction::Boot { fragment });
    let mut last_day_check = Instant::now();

    loop {
        let now = Instant::now();
        session.expire_toasts(state, now);
        if now.duration_since(last_day_check) >= DAY_CHECK_INTERVAL {
            last_day_check = now;
            let today = views::local_today();
            if today != state.today {
                session.apply(state, RuntimeAction::SetToday(today));
            }
        }

        terminal.draw(|f| ui(f, state))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match handle_key_event(key, state, session.options) {
            KeyHandlerResult::Exit => {
                info!("terminal session closed");
                return Ok(());
            }
            KeyHandlerResult::Continue(actions) => {
                for action in actions {
                    session.apply(state, action);
                }
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame, state: &AppState) {
    let palette = GOLD;
    let in_app = state.routing.view == View::App;
    let tabs_h = if in_app { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Length(tabs_h), // Tabs
            Constraint::Min(0),         // Content
            Constraint::Length(1),      // Footer
        ])
        .split(f.area());

    // Header
    let header_text = format!(
        "Her Social Suite | {} | {}",
        state.routing.view.label(),
        views::today_chip(state.today)
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(header, chunks[0]);

    // Tabs
    if in_app {
        let titles: Vec<Line> = Section::ALL.iter().map(|s| Line::from(s.label())).collect();
        let selected = Section::ALL
            .iter()
            .position(|s| *s == state.routing.section)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[1]);
    }

    // Content
    let (title, subtitle, panel) = match state.routing.view {
        View::Landing => ("Home", "", panels::landing_panel(&state.document, palette)),
        View::Pricing => ("Pricing", "", panels::pricing_panel(&state.document, palette)),
        View::App => {
            let section = state.routing.section;
            let selected = section.list_kind().map(|_| state.selection.row);
            (
                section.title(),
                section.subtitle(),
                panels::section_panel(section, &state.document, state.today, selected, palette),
            )
        }
    };
    render_panel(f, chunks[2], title, subtitle, panel, palette);

    // Footer
    let footer = match &state.interaction.toast {
        Some(toast) => Line::from(Span::styled(
            toast.message.clone(),
            Style::default()
                .fg(palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            footer_hints(state),
            Style::default().fg(palette.muted),
        )),
    };
    f.render_widget(Paragraph::new(footer), chunks[3]);

    render_overlay(f, state, palette);
}

fn render_panel(
    f: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    panel: Panel,
    palette: UiPalette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.panel_bg))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::with_capacity(panel.lines.len() + 2);
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(palette.muted),
        )));
        lines.push(Line::default());
    }
    let offset = lines.len();
    lines.extend(panel.lines);

    // Keep the selected record a few lines below the top edge.
    let scroll = panel
        .selected_line
        .map(|line| line + offset)
        .and_then(|line| line.checked_sub(usize::from(inner.height).saturating_sub(4)))
        .unwrap_or(0);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn footer_hints(state: &AppState) -> String {
    if state.routing.view != View::App {
        return "a dashboard · p pricing · h home · q quit".to_string();
    }
    let specific = match state.routing.section {
        Section::Calendar | Section::Contacts => "n new · d delete · C clear",
        Section::Todos => "n new · x toggle · d delete · C clear",
        Section::Goals => "n new · e progress · d delete · C clear",
        Section::Notes => "1 quick notes · 2 vault",
        Section::Metrics => "n edit · r reset",
        Section::Export => "e export · i import",
        Section::Overview => "s sample data",
    };
    format!("←/→ section · ↑/↓ select · {specific} · + quick add · q quit")
}

fn render_overlay(f: &mut ratatui::Frame, state: &AppState, palette: UiPalette) {
    let (title, lines): (String, Vec<Line>) = match &state.interaction.overlay {
        Overlay::None => return,
        Overlay::Form(form) => (form.kind.title().to_string(), form_lines(form, palette)),
        Overlay::Confirm { prompt, .. } => (
            "Confirm".to_string(),
            vec![
                Line::from(prompt.clone()),
                Line::default(),
                Line::from(Span::styled(
                    "y confirm · n cancel",
                    Style::default().fg(palette.muted),
                )),
            ],
        ),
        Overlay::Prompt { label, input, .. } => (
            "Input".to_string(),
            vec![
                Line::from(label.clone()),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(palette.accent)),
                    Span::raw(input.clone()),
                    Span::styled("▏", Style::default().fg(palette.accent)),
                ]),
                Line::default(),
                Line::from(Span::styled(
                    "Enter submit · Esc cancel",
                    Style::default().fg(palette.muted),
                )),
            ],
        ),
        Overlay::Alert { message } => (
            "Alert".to_string(),
            vec![
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(palette.warning),
                )),
                Line::default(),
                Line::from(Span::styled("Enter ok", Style::default().fg(palette.muted))),
            ],
        ),
        Overlay::NoteEditor { field } => {
            let mut lines: Vec<Line> = field
                .text(&state.document)
                .split('\n')
                .map(|line| Line::from(line.to_string()))
                .collect();
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled("▏", Style::default().fg(palette.accent)));
            }
            (format!("{} (Esc to close)", field.label()), lines)
        }
    };

    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {title} "));
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(p, area);
}

fn form_lines(form: &FormState, palette: UiPalette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let focused = idx == form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            let value = if field.is_select() {
                format!("◂ {} ▸", field.value)
            } else if focused {
                format!("{}▏", field.value)
            } else {
                field.value.clone()
            };
            Line::from(vec![
                Span::styled(format!("{:<17}", field.label), label_style),
                Span::raw(value),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tab next · ←/→ choose · Enter save · Esc cancel",
        Style::default().fg(palette.muted),
    )));
    lines
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
