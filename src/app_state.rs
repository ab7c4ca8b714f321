//! Application state: the user's scale, range, tab and selected note.
//!
//! `AppState` is a plain value. Every transition returns a new state with
//! the derived note lists recomputed, and persistence goes through an
//! injected [`StoragePort`].

use serde::de::DeserializeOwned;

use crate::model::{Note, NoteRange, ScaleSpec, Tab};
use crate::renderer::{StaffView, StaffViewOptions};
use crate::storage::{StoragePort, ACTIVE_TAB_KEY, NOTE_RANGE_KEY, SELECTED_SCALE_KEY};
use crate::theory::{filter_by_range, generate_scale};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    scale: ScaleSpec,
    range: NoteRange,
    tab: Tab,
    scale_notes: Vec<Note>,
    filtered_notes: Vec<Note>,
    selected: Option<Note>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScaleSpec::default(), NoteRange::default(), Tab::default())
    }
}

impl AppState {
    pub fn new(scale: ScaleSpec, range: NoteRange, tab: Tab) -> Self {
        let mut state = Self {
            scale,
            range,
            tab,
            scale_notes: Vec::new(),
            filtered_notes: Vec::new(),
            selected: None,
        };
        state.recompute();
        state
    }

    pub fn scale(&self) -> ScaleSpec {
        self.scale
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Every note of the selected scale.
    pub fn scale_notes(&self) -> &[Note] {
        &self.scale_notes
    }

    /// Scale notes inside the selected range.
    pub fn filtered_notes(&self) -> &[Note] {
        &self.filtered_notes
    }

    pub fn selected_note(&self) -> Option<Note> {
        self.selected
    }

    /// Notes the practice scheduler draws from.
    pub fn practice_notes(&self) -> Vec<Note> {
        self.filtered_notes.clone()
    }

    pub fn with_scale(mut self, scale: ScaleSpec) -> Self {
        self.scale = scale;
        self.recompute();
        self
    }

    pub fn with_range(mut self, range: NoteRange) -> Self {
        self.range = range;
        self.recompute();
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Select `note` if it is one of the filtered notes; otherwise the
    /// selection is unchanged.
    pub fn select_note(mut self, note: Note) -> Self {
        if let Some(found) = self.filtered_notes.iter().find(|n| n.same_pitch(&note)) {
            self.selected = Some(*found);
        }
        self
    }

    /// Staff view of the filtered notes, with the selection highlighted.
    pub fn staff_view(&self, options: StaffViewOptions) -> StaffView {
        let selected = self
            .selected
            .and_then(|sel| self.filtered_notes.iter().position(|n| n.same_pitch(&sel)));
        StaffView::new(self.scale, self.filtered_notes.clone(), options).with_selected(selected)
    }

    /// Select whichever note column lies under a click at `x` on the staff.
    pub fn select_at(self, x: f64, options: StaffViewOptions) -> Self {
        match self.staff_view(options).hit_test(x) {
            Some(index) => {
                let note = self.filtered_notes[index];
                self.select_note(note)
            }
            None => self,
        }
    }

    fn recompute(&mut self) {
        self.scale_notes = generate_scale(self.scale.key, self.scale.scale_type).collect();
        self.filtered_notes = filter_by_range(self.scale_notes.iter().copied(), &self.range);
        let keep = self
            .selected
            .and_then(|sel| self.filtered_notes.iter().find(|n| n.same_pitch(&sel)).copied());
        self.selected = keep.or_else(|| self.filtered_notes.first().copied());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Persistence
// ═══════════════════════════════════════════════════════════════════════

/// Restore the saved state. Each field falls back to its default on its
/// own when absent or unreadable; only `scales` and `about` tabs restore.
pub fn load_app_state(storage: &dyn StoragePort) -> AppState {
    let scale = load_json::<ScaleSpec>(storage, SELECTED_SCALE_KEY).unwrap_or_default();
    let range = load_json::<NoteRange>(storage, NOTE_RANGE_KEY).unwrap_or_default();
    let tab = load_raw(storage, ACTIVE_TAB_KEY)
        .and_then(|raw| raw.parse::<Tab>().ok())
        .filter(|tab| tab.is_restorable())
        .unwrap_or_default();
    AppState::new(scale, range, tab)
}

/// Save the state. Failures are logged and otherwise ignored.
pub fn save_app_state(storage: &mut dyn StoragePort, state: &AppState) {
    let result = serde_json::to_string(&state.scale)
        .map_err(crate::Error::from)
        .and_then(|json| storage.set(SELECTED_SCALE_KEY, &json))
        .and_then(|_| serde_json::to_string(&state.range).map_err(crate::Error::from))
        .and_then(|json| storage.set(NOTE_RANGE_KEY, &json))
        .and_then(|_| storage.set(ACTIVE_TAB_KEY, state.tab.as_str()));
    if let Err(e) = result {
        log::warn!("could not save app state: {e}");
    }
}

fn load_raw(storage: &dyn StoragePort, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("could not read '{key}': {e}");
            None
        }
    }
}

fn load_json<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Option<T> {
    let raw = load_raw(storage, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("discarding malformed '{key}': {e}");
            None
        }
    }
}
