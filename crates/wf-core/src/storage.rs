//! Best-effort local persistence: settings and the autosave blob.
//!
//! This is process-wide configuration with an explicit lifecycle — load at
//! startup, save on change — injected into the session instead of read ad
//! hoc. Two artifacts live under an injected base directory:
//!
//! - `settings.json` — the active theme id
//! - `autosave.bin`  — the last workflow snapshot (MessagePack)
//!
//! Every failure here degrades to a default and logs a warning. Nothing in
//! this module is allowed to surface an error to the user.

use crate::model::Workflow;
use crate::persist::WorkflowDoc;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const AUTOSAVE_FILE: &str = "autosave.bin";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    active_theme: String,
}

/// File-backed settings + autosave store rooted at a caller-chosen
/// directory.
#[derive(Debug, Clone)]
pub struct Storage {
    base: PathBuf,
}

impl Storage {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base.join(SETTINGS_FILE)
    }

    pub fn autosave_path(&self) -> PathBuf {
        self.base.join(AUTOSAVE_FILE)
    }

    // ─── Theme ───────────────────────────────────────────────────────────

    /// Load the saved theme, falling back to the default on any failure.
    pub fn load_active_theme(&self) -> &'static Theme {
        match fs::read_to_string(self.settings_path()) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => Theme::by_id(&settings.active_theme),
                Err(e) => {
                    log::warn!("unreadable settings file, using default theme: {e}");
                    Theme::default_theme()
                }
            },
            Err(_) => Theme::default_theme(),
        }
    }

    /// Persist the active theme id. Best-effort.
    pub fn save_active_theme(&self, id: &str) {
        let settings = Settings {
            active_theme: id.to_string(),
        };
        match serde_json::to_string_pretty(&settings) {
            Ok(json) => {
                if let Err(e) = write_atomic(&self.base, &self.settings_path(), json.as_bytes()) {
                    log::warn!("failed to save settings: {e}");
                }
            }
            Err(e) => log::warn!("failed to encode settings: {e}"),
        }
    }

    // ─── Autosave ────────────────────────────────────────────────────────

    /// Snapshot the workflow to the autosave blob. Best-effort.
    pub fn save_autosave(&self, wf: &Workflow) {
        let doc = WorkflowDoc::from_workflow(wf);
        match rmp_serde::to_vec(&doc) {
            Ok(bytes) => {
                if let Err(e) = write_atomic(&self.base, &self.autosave_path(), &bytes) {
                    log::warn!("autosave failed: {e}");
                }
            }
            Err(e) => log::warn!("autosave encoding failed: {e}"),
        }
    }

    /// Restore the last autosaved workflow, if a readable blob exists.
    pub fn load_autosave(&self) -> Option<Workflow> {
        let bytes = fs::read(self.autosave_path()).ok()?;
        match rmp_serde::from_slice::<WorkflowDoc>(&bytes) {
            Ok(doc) => Some(doc.into_workflow()),
            Err(e) => {
                log::warn!("discarding unreadable autosave blob: {e}");
                None
            }
        }
    }
}

fn write_atomic(base: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::create_dir_all(base)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Unique per-test scratch directory under the system temp dir.
    fn scratch(tag: &str) -> PathBuf {
        static N: AtomicU32 = AtomicU32::new(0);
        let n = N.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "wf-storage-{tag}-{}-{n}",
            std::process::id()
        ))
    }

    #[test]
    fn theme_roundtrip() {
        let storage = Storage::new(scratch("theme"));
        storage.save_active_theme("nord");
        assert_eq!(storage.load_active_theme().id, "nord");
    }

    #[test]
    fn missing_settings_fall_back_to_default() {
        let storage = Storage::new(scratch("missing"));
        assert_eq!(storage.load_active_theme().id, Theme::default_theme().id);
    }

    #[test]
    fn corrupt_settings_fall_back_to_default() {
        let base = scratch("corrupt");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join(SETTINGS_FILE), b"{ not json").unwrap();
        let storage = Storage::new(base);
        assert_eq!(storage.load_active_theme().id, Theme::default_theme().id);
    }

    #[test]
    fn autosave_roundtrip() {
        let mut wf = Workflow::new();
        let a = wf.add_node("task", Point::new(1.0, 2.0));
        let b = wf.add_node("approval", Point::new(400.0, 2.0));
        wf.add_connection(a, b).unwrap();

        let storage = Storage::new(scratch("autosave"));
        storage.save_autosave(&wf);

        let restored = storage.load_autosave().expect("blob should load");
        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.connection_count(), 1);
    }

    #[test]
    fn missing_autosave_is_none() {
        let storage = Storage::new(scratch("none"));
        assert!(storage.load_autosave().is_none());
    }
}
