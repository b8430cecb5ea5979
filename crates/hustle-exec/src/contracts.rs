use serde::Deserialize;
use serde::Serialize;

use hustle_core::HustleEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub effect: String,
    pub status: EffectStatus,
    pub logs: Vec<String>,
}

impl EffectReport {
    pub fn new(effect: &HustleEffect, status: EffectStatus, logs: Vec<String>) -> Self {
        Self {
            effect: effect_name(effect).to_string(),
            status,
            logs,
        }
    }

    pub fn failed(&self) -> bool {
        self.status == EffectStatus::Failed
    }
}

pub fn effect_name(effect: &HustleEffect) -> &'static str {
    match effect {
        HustleEffect::RequestFrame => "request_frame",
        HustleEffect::Persist => "persist",
        HustleEffect::ScheduleToastDismiss { .. } => "schedule_toast_dismiss",
        HustleEffect::OpenExternal { .. } => "open_external",
        HustleEffect::WriteExport { .. } => "write_export",
        HustleEffect::ReadImportFile { .. } => "read_import_file",
    }
}
