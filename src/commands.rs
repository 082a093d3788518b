//! Every user action goes through [`AppState::dispatch`].

use crate::archive::{export_file_name, SnapshotArchive, SnapshotId};
use crate::composer;
use crate::config::Config;
use crate::feedback::{CopyTarget, Feedback};
use crate::fields::{FieldKey, FieldStore};
use crate::store::ArchiveStore;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetText(FieldKey, String),
    SetLabel(FieldKey, String),
    Hide(FieldKey),
    Show(FieldKey),
    Delete(FieldKey),
    /// Restore the field named by the live deletion notice.
    UndoDelete,
    Restore(FieldKey),
    ClearAll,
    SaveSnapshot,
    LoadSnapshot(SnapshotId),
    RenameSnapshot(SnapshotId, String),
    DeleteSnapshot(SnapshotId),
    ExportArchive,
    ImportArchive(Vec<u8>),
    CopyOutput,
    CopyField(FieldKey),
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    None,
    Saved(SnapshotId),
    /// Text for the presentation layer to place on the clipboard.
    Copied(String),
    Exported { file_name: String, bytes: Vec<u8> },
    Imported(usize),
    /// Blocking, user-visible message.
    Notice(String),
}

pub struct AppState<S: ArchiveStore> {
    pub fields: FieldStore,
    pub archive: SnapshotArchive<S>,
    pub feedback: Feedback,
    pub config: Config,
}

impl<S: ArchiveStore> AppState<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            fields: FieldStore::new(),
            archive: SnapshotArchive::open(store),
            feedback: Feedback::new(config.feedback.deletion_undo(), config.feedback.copied()),
            config: config.clone(),
        }
    }

    pub fn output(&self) -> String {
        composer::compose(&self.fields)
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Outcome {
        self.feedback.tick(now);

        match action {
            /* ---------- 1.  FIELD EDITS ---------- */
            Action::SetText(key, text) => self.fields.set_text(key, text),
            Action::SetLabel(key, label) => self.fields.set_label(key, label),
            Action::Hide(key) => self.fields.hide(key),
            Action::Show(key) => self.fields.show(key),
            Action::Delete(key) => {
                let note = self.fields.delete(key);
                self.feedback.note_deleted(note.key, note.label, now);
            }
            Action::UndoDelete => match self.feedback.take_deletion(now) {
                Some(notice) => {
                    self.fields.restore(notice.key);
                }
                None => debug!("Undo requested with no live deletion notice"),
            },
            Action::Restore(key) => {
                if self.fields.restore(key)
                    && self.feedback.deletion().is_some_and(|n| n.key == key)
                {
                    self.feedback.dismiss_deletion();
                }
            }
            Action::ClearAll => self.fields.clear_texts(),

            /* ---------- 2.  SNAPSHOTS ---------- */
            Action::SaveSnapshot => {
                let snapshot = self.archive.save(&self.fields);
                return Outcome::Saved(snapshot.id);
            }
            Action::LoadSnapshot(id) => {
                if let Some(snapshot) = self.archive.load(id) {
                    snapshot.restore_into(&mut self.fields);
                    self.feedback.dismiss_deletion();
                }
            }
            Action::RenameSnapshot(id, name) => self.archive.rename(id, name),
            Action::DeleteSnapshot(id) => self.archive.delete(id),
            Action::ExportArchive => {
                return match self.archive.export_all() {
                    Ok(bytes) => Outcome::Exported {
                        file_name: export_file_name(chrono::Utc::now()),
                        bytes,
                    },
                    Err(e) => Outcome::Notice(e.to_string()),
                };
            }
            Action::ImportArchive(bytes) => {
                return match self.archive.import_all(&bytes) {
                    Ok(count) => Outcome::Imported(count),
                    Err(e) => {
                        warn!("{}", e);
                        Outcome::Notice(e.to_string())
                    }
                };
            }

            /* ---------- 3.  CLIPBOARD & TIMERS ---------- */
            Action::CopyOutput => {
                self.feedback.note_copied(CopyTarget::Output, now);
                return Outcome::Copied(self.output());
            }
            Action::CopyField(key) => {
                self.feedback.note_copied(CopyTarget::Field(key), now);
                return Outcome::Copied(self.fields.text(key).to_string());
            }
            Action::Tick => {}
        }

        Outcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn state() -> (AppState<MemoryStore>, MemoryStore, Instant) {
        let store = MemoryStore::new();
        let app = AppState::new(store.clone(), &Config::default());
        (app, store, Instant::now())
    }

    #[test]
    fn undo_within_window_restores_output() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::SetText(FieldKey::TaskContext, "Summarize this".into()), t0);
        app.dispatch(Action::SetText(FieldKey::ThinkingSteps, "Be concise".into()), t0);
        let before = app.output();

        app.dispatch(Action::Delete(FieldKey::TaskContext), t0);
        assert!(!app.output().contains("Summarize this"));
        assert_eq!(app.feedback.deletion().unwrap().label, "Task Context");

        app.dispatch(Action::UndoDelete, t0 + Duration::from_secs(9));
        assert_eq!(app.output(), before);
        assert!(app.feedback.deletion().is_none());
    }

    #[test]
    fn undo_after_window_does_nothing() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::SetText(FieldKey::Examples, "e".into()), t0);
        app.dispatch(Action::Delete(FieldKey::Examples), t0);

        app.dispatch(Action::Tick, t0 + Duration::from_secs(10));
        assert!(app.feedback.deletion().is_none());

        app.dispatch(Action::UndoDelete, t0 + Duration::from_secs(11));
        assert!(app.fields.get(FieldKey::Examples).deleted);
        assert_eq!(app.output(), "");
    }

    #[test]
    fn second_delete_replaces_notice() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::Delete(FieldKey::TaskContext), t0);
        app.dispatch(Action::Delete(FieldKey::Examples), t0);
        app.dispatch(Action::UndoDelete, t0);

        assert!(app.fields.get(FieldKey::TaskContext).deleted);
        assert!(!app.fields.get(FieldKey::Examples).deleted);
    }

    #[test]
    fn explicit_restore_dismisses_matching_notice() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::Delete(FieldKey::ToneContext), t0);
        app.dispatch(Action::Restore(FieldKey::ToneContext), t0);
        assert!(app.feedback.deletion().is_none());
        assert!(app.fields.deleted_keys().is_empty());
    }

    #[test]
    fn save_and_load_snapshot() {
        let (mut app, store, t0) = state();
        app.dispatch(Action::SetText(FieldKey::TaskContext, "first".into()), t0);
        app.dispatch(Action::SetLabel(FieldKey::TaskContext, "Goal".into()), t0);
        let Outcome::Saved(id) = app.dispatch(Action::SaveSnapshot, t0) else {
            panic!("expected a saved snapshot");
        };
        assert_eq!(store.persisted().len(), 1);

        app.dispatch(Action::SetText(FieldKey::TaskContext, "second".into()), t0);
        app.dispatch(Action::Hide(FieldKey::TaskContext), t0);
        app.dispatch(Action::LoadSnapshot(id), t0);

        assert_eq!(app.output(), "Goal:\nfirst");
    }

    #[test]
    fn import_failure_becomes_notice() {
        let (mut app, _, t0) = state();
        let outcome = app.dispatch(Action::ImportArchive(b"garbage".to_vec()), t0);
        assert!(matches!(outcome, Outcome::Notice(_)));
        assert!(app.archive.is_empty());
    }

    #[test]
    fn export_names_file_and_round_trips() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::SaveSnapshot, t0);
        let Outcome::Exported { file_name, bytes } = app.dispatch(Action::ExportArchive, t0) else {
            panic!("expected export");
        };
        assert!(file_name.starts_with("prompt-builder-"));
        assert!(file_name.ends_with(".json"));

        let (mut other, _, _) = state();
        assert_eq!(
            other.dispatch(Action::ImportArchive(bytes), t0),
            Outcome::Imported(1)
        );
    }

    #[test]
    fn copy_sets_indicator_and_returns_text() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::SetText(FieldKey::Examples, "ex".into()), t0);

        assert_eq!(
            app.dispatch(Action::CopyField(FieldKey::Examples), t0),
            Outcome::Copied("ex".into())
        );
        assert_eq!(
            app.dispatch(Action::CopyOutput, t0),
            Outcome::Copied("Examples:\nex".into())
        );
        assert!(app.feedback.copied().is_some());

        app.dispatch(Action::Tick, t0 + Duration::from_secs(2));
        assert!(app.feedback.copied().is_none());
    }

    #[test]
    fn hide_show_and_clear_all() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::SetText(FieldKey::ToneContext, "warm".into()), t0);
        app.dispatch(Action::SetLabel(FieldKey::ToneContext, "Voice".into()), t0);

        app.dispatch(Action::Hide(FieldKey::ToneContext), t0);
        assert_eq!(app.output(), "");
        app.dispatch(Action::Show(FieldKey::ToneContext), t0);
        assert_eq!(app.output(), "Voice:\nwarm");

        app.dispatch(Action::ClearAll, t0);
        assert_eq!(app.output(), "");
        assert_eq!(app.fields.label(FieldKey::ToneContext), "Voice");
    }

    #[test]
    fn restore_of_other_field_keeps_notice() {
        let (mut app, _, t0) = state();
        app.dispatch(Action::Delete(FieldKey::TaskContext), t0);
        app.dispatch(Action::Delete(FieldKey::Examples), t0);

        app.dispatch(Action::Restore(FieldKey::TaskContext), t0);
        assert!(!app.fields.get(FieldKey::TaskContext).deleted);
        assert_eq!(app.feedback.deletion().unwrap().key, FieldKey::Examples);

        app.dispatch(Action::UndoDelete, t0);
        assert!(app.fields.deleted_keys().is_empty());
    }

    #[test]
    fn state_carries_config_durations() {
        let mut config = Config::default();
        config.feedback.deletion_undo_secs = 3;
        let mut app = AppState::new(MemoryStore::new(), &config);
        let t0 = Instant::now();
        assert_eq!(app.config.feedback.deletion_undo_secs, 3);

        app.dispatch(Action::Delete(FieldKey::Examples), t0);
        app.dispatch(Action::Tick, t0 + Duration::from_secs(3));
        assert!(app.feedback.deletion().is_none());
    }

    #[test]
    fn snapshot_lookups_miss_silently() {
        let (mut app, store, t0) = state();
        app.dispatch(Action::SetText(FieldKey::Examples, "kept".into()), t0);
        assert_eq!(app.dispatch(Action::LoadSnapshot(SnapshotId(9)), t0), Outcome::None);
        app.dispatch(Action::RenameSnapshot(SnapshotId(9), "x".into()), t0);
        app.dispatch(Action::DeleteSnapshot(SnapshotId(9)), t0);

        assert_eq!(app.fields.text(FieldKey::Examples), "kept");
        assert_eq!(store.writes(), 0);
    }
}
