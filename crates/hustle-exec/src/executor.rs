use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use hustle_core::AppAction;
use hustle_core::AppState;
use hustle_core::DocumentStore;
use hustle_core::HustleEffect;
use hustle_core::KeyValueStore;
use hustle_core::RuntimeAction;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::contracts::EffectReport;
use crate::contracts::EffectStatus;

pub const EXPORT_FILE_NAME: &str = "hustle-her-social-suite-backup.json";

#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub report: EffectReport,
    pub follow_up: Vec<RuntimeAction>,
}

pub trait EffectExecutor {
    fn execute(&mut self, effect: &HustleEffect, state: &AppState) -> ExecutionOutcome;
}

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> std::io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> std::io::Result<()> {
        let mut command = system_open_command(url);
        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "opener exited with status {status}"
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn system_open_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn system_open_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_open_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

pub struct HostExecutor<S, O = SystemOpener> {
    store: DocumentStore<S>,
    opener: O,
}

impl<S: KeyValueStore> HostExecutor<S, SystemOpener> {
    pub fn new(store: DocumentStore<S>) -> Self {
        Self::with_opener(store, SystemOpener)
    }
}

impl<S: KeyValueStore, O: LinkOpener> HostExecutor<S, O> {
    pub fn with_opener(store: DocumentStore<S>, opener: O) -> Self {
        Self { store, opener }
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    fn persist(&mut self, effect: &HustleEffect, state: &AppState) -> ExecutionOutcome {
        match self.store.save(&state.document) {
            Ok(()) => {
                info!(key = %self.store.key(), "document persisted");
                succeeded(effect, Vec::new())
            }
            Err(err) => {
                error!(key = %self.store.key(), error = %err, "persist failed");
                failed(effect, err.to_string(), Some("Could not save"))
            }
        }
    }

    fn open_external(&mut self, effect: &HustleEffect, url: &str) -> ExecutionOutcome {
        match self.opener.open(url) {
            Ok(()) => {
                info!(url, "opened external link");
                succeeded(effect, vec![format!("opened {url}")])
            }
            Err(err) => {
                error!(url, error = %err, "open link failed");
                failed(effect, err.to_string(), Some("Could not open link"))
            }
        }
    }
}

impl<S: KeyValueStore, O: LinkOpener> EffectExecutor for HostExecutor<S, O> {
    fn execute(&mut self, effect: &HustleEffect, state: &AppState) -> ExecutionOutcome {
        match effect {
            HustleEffect::Persist => self.persist(effect, state),
            HustleEffect::OpenExternal { url } => self.open_external(effect, url),
            HustleEffect::WriteExport { dir } => {
                let result = write_export(dir, state);
                let mut outcome = match &result {
                    Ok(path) => {
                        info!(path = %path.display(), "backup exported");
                        succeeded(effect, vec![format!("wrote {}", path.display())])
                    }
                    Err(err) => {
                        error!(dir = %dir.display(), error = %err, "export failed");
                        failed(effect, err.clone(), None)
                    }
                };
                outcome.follow_up.push(RuntimeAction::ExportFinished(result));
                outcome
            }
            HustleEffect::ReadImportFile { path } => {
                let result = std::fs::read_to_string(path).map_err(|err| err.to_string());
                let mut outcome = match &result {
                    Ok(raw) => {
                        info!(path = %path.display(), bytes = raw.len(), "import file read");
                        succeeded(effect, Vec::new())
                    }
                    Err(err) => {
                        error!(path = %path.display(), error = %err, "import read failed");
                        failed(effect, err.clone(), None)
                    }
                };
                outcome.follow_up.push(RuntimeAction::ImportLoaded(result));
                outcome
            }
            HustleEffect::RequestFrame | HustleEffect::ScheduleToastDismiss { .. } => {
                skipped(effect)
            }
        }
    }
}

pub fn write_export(dir: &Path, state: &AppState) -> Result<PathBuf, String> {
    let encoded = state
        .document
        .to_pretty_json()
        .map_err(|err| err.to_string())?;
    std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, encoded).map_err(|err| err.to_string())?;
    Ok(path)
}

#[derive(Debug, Default, Clone)]
pub struct RecordingExecutor {
    pub executed: Vec<HustleEffect>,
}

impl EffectExecutor for RecordingExecutor {
    fn execute(&mut self, effect: &HustleEffect, _state: &AppState) -> ExecutionOutcome {
        self.executed.push(effect.clone());
        succeeded(effect, vec!["recorded".to_string()])
    }
}

#[derive(Debug, Default, Clone)]
pub struct Dispatched {
    pub redraw: bool,
    pub toast_dismissals: Vec<u64>,
    pub reports: Vec<EffectReport>,
}

impl Dispatched {
    pub fn failures(&self) -> impl Iterator<Item = &EffectReport> {
        self.reports.iter().filter(|report| report.failed())
    }
}

pub fn dispatch<E: EffectExecutor + ?Sized>(
    state: &mut AppState,
    action: AppAction,
    executor: &mut E,
) -> Dispatched {
    let mut dispatched = Dispatched::default();
    let mut queue = VecDeque::from([action]);

    while let Some(action) = queue.pop_front() {
        debug!(?action, "dispatch");
        let effects = hustle_core::reduce(state, action);
        for effect in effects {
            match effect {
                HustleEffect::RequestFrame => dispatched.redraw = true,
                HustleEffect::ScheduleToastDismiss { seq } => {
                    dispatched.toast_dismissals.push(seq)
                }
                effect => {
                    let outcome = executor.execute(&effect, state);
                    dispatched.reports.push(outcome.report);
                    queue.extend(outcome.follow_up.into_iter().map(AppAction::Runtime));
                }
            }
        }
    }

    dispatched
}

fn succeeded(effect: &HustleEffect, logs: Vec<String>) -> ExecutionOutcome {
    ExecutionOutcome {
        report: EffectReport::new(effect, EffectStatus::Succeeded, logs),
        follow_up: Vec::new(),
    }
}

fn skipped(effect: &HustleEffect) -> ExecutionOutcome {
    ExecutionOutcome {
        report: EffectReport::new(effect, EffectStatus::Skipped, Vec::new()),
        follow_up: Vec::new(),
    }
}

fn failed(effect: &HustleEffect, log: String, toast: Option<&str>) -> ExecutionOutcome {
    ExecutionOutcome {
        report: EffectReport::new(effect, EffectStatus::Failed, vec![log]),
        follow_up: toast
            .map(|message| RuntimeAction::EffectFailed {
                message: message.to_string(),
            })
            .into_iter()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use hustle_core::Document;
    use hustle_core::FileStore;
    use hustle_core::MemoryStore;
    use hustle_core::Overlay;
    use hustle_core::UserAction;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeOpener {
        opened: Vec<String>,
        fail: bool,
    }

    impl LinkOpener for FakeOpener {
        fn open(&mut self, url: &str) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::other("no browser"));
            }
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> std::io::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::io::Result<()> {
            Err(std::io::Error::other("read-only"))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    fn memory_executor() -> HostExecutor<MemoryStore, FakeOpener> {
        HostExecutor::with_opener(
            DocumentStore::new(MemoryStore::new()),
            FakeOpener::default(),
        )
    }

    fn toast(state: &AppState) -> Option<&str> {
        state.interaction.toast.as_ref().map(|t| t.message.as_str())
    }

    #[test]
    fn committed_changes_reach_the_store() {
        let mut state = AppState::new(Document::default(), today());
        let mut executor = memory_executor();

        let dispatched = dispatch(
            &mut state,
            AppAction::User(UserAction::SeedSample),
            &mut executor,
        );

        assert!(dispatched.redraw);
        assert_eq!(dispatched.toast_dismissals, vec![1]);
        assert_eq!(dispatched.failures().count(), 0);
        assert_eq!(executor.store().load(), state.document);
    }

    #[test]
    fn persist_failure_becomes_a_toast() {
        let mut state = AppState::new(Document::default(), today());
        let mut executor =
            HostExecutor::with_opener(DocumentStore::new(ReadOnlyStore), FakeOpener::default());

        let dispatched = dispatch(
            &mut state,
            AppAction::User(UserAction::ResetMetrics),
            &mut executor,
        );

        assert_eq!(dispatched.failures().count(), 1);
        assert_eq!(toast(&state), Some("Could not save"));
        assert_eq!(dispatched.toast_dismissals, vec![1, 2]);
    }

    #[test]
    fn export_writes_pretty_json_to_the_backup_file() {
        let dir = tempdir().expect("tmpdir");
        let mut state = AppState::new(Document::default(), today());
        let mut executor = memory_executor();
        dispatch(
            &mut state,
            AppAction::User(UserAction::SeedSample),
            &mut executor,
        );

        dispatch(
            &mut state,
            AppAction::User(UserAction::Export {
                dir: dir.path().join("backups"),
            }),
            &mut executor,
        );

        let written =
            fs::read_to_string(dir.path().join("backups").join(EXPORT_FILE_NAME)).expect("read");
        assert!(written.contains("\n  \"posts\": ["));
        assert_eq!(
            Document::from_json_str(&written).expect("parse"),
            state.document
        );
        assert_eq!(toast(&state), Some("Backup downloaded"));
    }

    #[test]
    fn import_round_trips_through_a_file() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("backup.json");
        fs::write(
            &path,
            r#"{"metrics":{"revenue":100,"clicks":0,"deals":0,"leads":0},"theme":"gold"}"#,
        )
        .expect("write");

        let files = FileStore::open(dir.path().join("store")).expect("open");
        let mut executor = HostExecutor::with_opener(DocumentStore::new(files), FakeOpener::default());
        let mut state = AppState::new(Document::default(), today());

        dispatch(
            &mut state,
            AppAction::User(UserAction::ChooseImportFile(path)),
            &mut executor,
        );

        assert_eq!(state.document.metrics.revenue, 100.0);
        assert_eq!(toast(&state), Some("Backup imported ✨"));
        assert_eq!(state.interaction.pending_import, None);
        let reloaded = executor.store().load();
        assert_eq!(reloaded.metrics.revenue, 100.0);
        assert!(reloaded.extra.contains_key("theme"));
    }

    #[test]
    fn missing_import_file_alerts() {
        let mut state = AppState::new(Document::default(), today());
        let mut executor = memory_executor();

        let dispatched = dispatch(
            &mut state,
            AppAction::User(UserAction::ChooseImportFile(PathBuf::from(
                "/definitely/not/here.json",
            ))),
            &mut executor,
        );

        assert_eq!(dispatched.failures().count(), 1);
        assert!(matches!(state.interaction.overlay, Overlay::Alert { .. }));
        assert_eq!(executor.store().inner().get("hhss_v1").expect("get"), None);
    }

    #[test]
    fn plan_links_open_through_the_opener() {
        let mut doc = Document::default();
        doc.stripe_links
            .insert("starter".to_string(), "https://buy.stripe.com/s".to_string());
        let mut state = AppState::new(doc, today());
        let mut executor = memory_executor();

        dispatch(
            &mut state,
            AppAction::User(UserAction::OpenPlan("starter".to_string())),
            &mut executor,
        );
        assert_eq!(executor.opener().opened, vec!["https://buy.stripe.com/s"]);

        let mut failing = HostExecutor::with_opener(
            DocumentStore::new(MemoryStore::new()),
            FakeOpener {
                opened: Vec::new(),
                fail: true,
            },
        );
        dispatch(
            &mut state,
            AppAction::User(UserAction::OpenPlan("starter".to_string())),
            &mut failing,
        );
        assert_eq!(toast(&state), Some("Could not open link"));
    }

    #[test]
    fn recording_executor_sees_host_effects_only() {
        let mut state = AppState::new(Document::default(), today());
        let mut recorder = RecordingExecutor::default();

        let dispatched = dispatch(
            &mut state,
            AppAction::User(UserAction::SeedSample),
            &mut recorder,
        );

        assert!(dispatched.redraw);
        assert_eq!(dispatched.toast_dismissals.len(), 1);
        assert_eq!(recorder.executed, vec![HustleEffect::Persist]);
    }

    #[test]
    fn reports_serialize_with_snake_case_status() {
        let report = EffectReport::new(&HustleEffect::Persist, EffectStatus::Failed, Vec::new());
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"effect": "persist", "status": "failed", "logs": []})
        );
    }
}
