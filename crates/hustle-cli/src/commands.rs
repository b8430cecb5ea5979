use std::path::PathBuf;

use chrono::NaiveDate;

use hustle_core::html;
use hustle_core::views;
use hustle_core::AppState;
use hustle_core::Document;
use hustle_core::Overlay;
use hustle_core::Section;
use hustle_core::UserAction;
use hustle_core::MISSING_PLAN_LINK;
use hustle_exec::dispatch;
use hustle_exec::Dispatched;
use hustle_exec::EffectExecutor;
use hustle_exec::EXPORT_FILE_NAME;

use crate::panels;
use crate::panels::GOLD;

pub fn render(target: &str, doc: &Document, today: NaiveDate, as_html: bool) -> Result<String, String> {
    let target = target.trim().to_ascii_lowercase();
    let text = match target.as_str() {
        "landing" | "home" if as_html => html::render_landing(&views::landing(doc)),
        "landing" | "home" => panels::plain_text(&panels::landing_panel(doc, GOLD).lines),
        "pricing" if as_html => html::render_pricing(&views::pricing(doc)),
        "pricing" => panels::plain_text(&panels::pricing_panel(doc, GOLD).lines),
        name => {
            let section =
                Section::from_name(name).ok_or_else(|| format!("unknown section: {name}"))?;
            if as_html {
                html::render_section(section, doc, today)
            } else {
                let body = panels::section_panel(section, doc, today, None, GOLD);
                format!(
                    "{}\n{}\n\n{}",
                    section.title(),
                    section.subtitle(),
                    panels::plain_text(&body.lines)
                )
            }
        }
    };
    Ok(text)
}

pub fn export<E: EffectExecutor + ?Sized>(
    state: &mut AppState,
    executor: &mut E,
    dir: PathBuf,
) -> Result<String, String> {
    let path = dir.join(EXPORT_FILE_NAME);
    let dispatched = dispatch(state, UserAction::Export { dir }.into(), executor);
    finish(state, &dispatched)?;
    Ok(format!("wrote {}", path.display()))
}

pub fn import<E: EffectExecutor + ?Sized>(
    state: &mut AppState,
    executor: &mut E,
    file: PathBuf,
) -> Result<String, String> {
    let dispatched = dispatch(state, UserAction::ChooseImportFile(file).into(), executor);
    finish(state, &dispatched)
}

pub fn seed<E: EffectExecutor + ?Sized>(
    state: &mut AppState,
    executor: &mut E,
) -> Result<String, String> {
    let dispatched = dispatch(state, UserAction::SeedSample.into(), executor);
    finish(state, &dispatched)
}

pub fn open_plan<E: EffectExecutor + ?Sized>(
    state: &mut AppState,
    executor: &mut E,
    plan: &str,
) -> Result<String, String> {
    let dispatched = dispatch(state, UserAction::OpenPlan(plan.to_string()).into(), executor);
    if toast_message(state) == Some(MISSING_PLAN_LINK) {
        return Err(MISSING_PLAN_LINK.to_string());
    }
    finish(state, &dispatched)?;
    Ok(format!("opened {plan} checkout"))
}

fn finish(state: &AppState, dispatched: &Dispatched) -> Result<String, String> {
    if let Overlay::Alert { message } = &state.interaction.overlay {
        return Err(message.clone());
    }
    if let Some(failure) = dispatched.failures().next() {
        return Err(format!("{} failed: {}", failure.effect, failure.logs.join("; ")));
    }
    Ok(toast_message(state).unwrap_or_default().to_string())
}

fn toast_message(state: &AppState) -> Option<&str> {
    state
        .interaction
        .toast
        .as_ref()
        .map(|toast| toast.message.as_str())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use hustle_core::DocumentStore;
    use hustle_core::MemoryStore;
    use hustle_core::IMPORT_FAILED;
    use hustle_exec::HostExecutor;
    use hustle_exec::LinkOpener;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct NoopOpener {
        opened: Vec<String>,
    }

    impl LinkOpener for NoopOpener {
        fn open(&mut self, url: &str) -> std::io::Result<()> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    fn executor() -> HostExecutor<MemoryStore, NoopOpener> {
        HostExecutor::with_opener(DocumentStore::new(MemoryStore::new()), NoopOpener::default())
    }

    #[test]
    fn seed_persists_the_sample() {
        let mut executor = executor();
        let mut state = AppState::new(Document::default(), today());

        let message = seed(&mut state, &mut executor).expect("seed");
        assert_eq!(message, "Sample loaded ✨");
        assert_eq!(executor.store().load().tasks.len(), 5);
    }

    #[test]
    fn export_then_import_restores_the_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut executor = executor();
        let mut state = AppState::new(Document::default(), today());
        seed(&mut state, &mut executor).expect("seed");

        let message = export(&mut state, &mut executor, dir.path().to_path_buf()).expect("export");
        assert!(message.ends_with(EXPORT_FILE_NAME));

        let mut fresh = AppState::new(Document::default(), today());
        let message = import(&mut fresh, &mut executor, dir.path().join(EXPORT_FILE_NAME))
            .expect("import");
        assert_eq!(message, "Backup imported ✨");
        assert_eq!(fresh.document, state.document);
    }

    #[test]
    fn bad_import_reports_the_alert() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{oops").expect("write");
        let mut executor = executor();
        let mut state = AppState::new(Document::default(), today());

        let err = import(&mut state, &mut executor, path).expect_err("should fail");
        assert_eq!(err, IMPORT_FAILED);
    }

    #[test]
    fn plan_without_link_is_an_error() {
        let mut executor = executor();
        let mut state = AppState::new(Document::default(), today());
        assert_eq!(
            open_plan(&mut state, &mut executor, "boss"),
            Err(MISSING_PLAN_LINK.to_string())
        );

        state
            .document
            .stripe_links
            .insert("boss".to_string(), "https://buy.example/boss".to_string());
        open_plan(&mut state, &mut executor, "boss").expect("open");
        assert_eq!(executor.opener().opened, vec!["https://buy.example/boss"]);
    }

    #[test]
    fn render_accepts_sections_and_pages() {
        let doc = Document::default();
        let text = render("Todos", &doc, today(), false).expect("render");
        assert!(text.starts_with("CEO To‑Dos\nChecklist your way to consistent content."));
        assert!(render("pricing", &doc, today(), true)
            .expect("render")
            .starts_with(r#"<div class="plans">"#));
        assert_eq!(
            render("settings", &doc, today(), false),
            Err("unknown section: settings".to_string())
        );
    }
}
