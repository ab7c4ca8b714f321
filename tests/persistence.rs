//! Application state, storage port and fingering library tests.

use pretty_assertions::assert_eq;
use scalelib::app_state::{load_app_state, save_app_state, AppState};
use scalelib::fingering::FingeringLibrary;
use scalelib::storage::{FileStorage, MemoryStorage, StoragePort, NOTE_RANGE_KEY, SELECTED_SCALE_KEY};
use scalelib::{Note, NoteRange, PitchClass, ScaleSpec, ScaleType, Tab};
use std::path::PathBuf;

fn storage_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output").join(name);
    std::fs::remove_dir_all(&dir).ok();
    dir
}

#[test]
fn empty_storage_loads_defaults() {
    let state = load_app_state(&MemoryStorage::new());
    assert_eq!(state.scale(), ScaleSpec::new(PitchClass::C, ScaleType::Major));
    assert_eq!(state.range(), NoteRange::default());
    assert_eq!(state.tab(), Tab::Scales);
}

#[test]
fn persisted_shapes_match_the_shell() {
    let mut storage = MemoryStorage::new();
    save_app_state(&mut storage, &AppState::default());
    assert_eq!(
        storage.get(SELECTED_SCALE_KEY).unwrap().as_deref(),
        Some(r#"{"key":"C","type":"major"}"#)
    );
    assert_eq!(
        storage.get(NOTE_RANGE_KEY).unwrap().as_deref(),
        Some(r#"{"start":{"note":"B","octave":3,"label":"B3"},"end":{"note":"C","octave":5,"label":"C5"}}"#)
    );
}

#[test]
fn inverted_range_in_storage_falls_back() {
    let mut storage = MemoryStorage::new();
    storage
        .set(NOTE_RANGE_KEY, r#"{"start":{"note":"C","octave":5,"label":"C5"},"end":{"note":"B","octave":3,"label":"B3"}}"#)
        .unwrap();
    assert_eq!(load_app_state(&storage).range(), NoteRange::default());
}

#[test]
fn file_storage_survives_reopen() {
    let dir = storage_dir("prefs");
    {
        let mut storage = FileStorage::open(&dir).unwrap();
        let state = AppState::default()
            .with_scale(ScaleSpec::new(PitchClass::ASharp, ScaleType::NaturalMinor))
            .with_tab(Tab::Practice);
        save_app_state(&mut storage, &state);
    }
    let storage = FileStorage::open(&dir).unwrap();
    let state = load_app_state(&storage);
    assert_eq!(state.scale().key, PitchClass::ASharp);
    // practice is not restored
    assert_eq!(state.tab(), Tab::Scales);
}

#[test]
fn fingering_library_round_trips_through_files() {
    let dir = storage_dir("fingerings");
    let mut storage = FileStorage::open(&dir).unwrap();
    let mut lib = FingeringLibrary::new();
    lib.add("Eb4.png", "data:image/png;base64,AAA");
    lib.add("D#4a1.png", "data:image/png;base64,BBB");
    lib.save(&mut storage).unwrap();

    let loaded = FingeringLibrary::load(&storage);
    let ds4 = Note::new(PitchClass::DSharp, 4);
    let images = loaded.lookup(&ds4);
    assert_eq!(images.len(), 2);
    assert!(!images[0].is_alternate);
    assert_eq!(images[1].alternate_number, Some(1));
}
