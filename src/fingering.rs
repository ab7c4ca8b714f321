//! Fingering image library.
//!
//! Images are uploaded with names like `C#4.png` (main fingering) or
//! `C#4a2.png` (second alternate fingering). The library keys each image
//! by the note parsed from its name and hands them back per note, main
//! fingering first.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Note, PitchClass};
use crate::storage::{StoragePort, FINGERING_IMAGES_KEY};

/// Octave assumed when an asset name carries no digits.
const FALLBACK_OCTAVE: i32 = 4;

/// Note information recovered from an asset file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetName {
    pub pitch_class: PitchClass,
    pub octave: i32,
    /// Alternate number for `<Note><Octave>a<N>` names
    pub alternate: Option<u32>,
}

/// Parse an uploaded file name.
///
/// Names that do not follow `<Note><Octave>[a<N>].ext` never fail: the
/// best guess is returned and a warning is logged.
pub fn parse_asset_name(file_name: &str) -> AssetName {
    let stem = file_name.split('.').next().unwrap_or("");
    if let Some(parsed) = parse_strict(stem) {
        return parsed;
    }

    log::warn!("unrecognised fingering file name '{file_name}', guessing its note");
    guess(stem)
}

/// `^([A-G][#b]?)(\d+)(a(\d+))?$`
fn parse_strict(stem: &str) -> Option<AssetName> {
    let letter = stem.chars().next().filter(|c| ('A'..='G').contains(c))?;
    let rest = &stem[1..];
    let (accidental, rest) = match rest.chars().next() {
        Some(c @ ('#' | 'b')) => (Some(c), &rest[1..]),
        _ => (None, rest),
    };

    let digits = leading_digits(rest);
    if digits.is_empty() {
        return None;
    }
    let octave = digits.parse::<i32>().ok()?;
    let rest = &rest[digits.len()..];

    let alternate = if rest.is_empty() {
        None
    } else {
        let number = rest.strip_prefix('a')?;
        if number.is_empty() || leading_digits(number).len() != number.len() {
            return None;
        }
        Some(number.parse::<u32>().ok()?)
    };

    let name: String = std::iter::once(letter).chain(accidental).collect();
    let pitch_class = name.parse::<PitchClass>().ok()?;
    Some(AssetName { pitch_class, octave, alternate })
}

fn guess(stem: &str) -> AssetName {
    let note_chars: String = stem
        .chars()
        .filter(|c| ('A'..='G').contains(c) || *c == '#' || *c == 'b')
        .take(2)
        .collect();
    let pitch_class = note_chars
        .parse::<PitchClass>()
        .or_else(|_| note_chars.chars().take(1).collect::<String>().parse::<PitchClass>())
        .unwrap_or(PitchClass::C);

    let octave = stem
        .find(|c: char| c.is_ascii_digit())
        .and_then(|start| leading_digits(&stem[start..]).parse::<i32>().ok())
        .unwrap_or(FALLBACK_OCTAVE);

    let alternate = stem.contains('a').then_some(1);
    AssetName { pitch_class, octave, alternate }
}

fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

// ═══════════════════════════════════════════════════════════════════════
// Library
// ═══════════════════════════════════════════════════════════════════════

/// One stored image, in the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingeringImage {
    pub note: PitchClass,
    pub octave: i32,
    pub is_alternate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_number: Option<u32>,
    /// Image payload, usually a `data:` URL
    pub data_url: String,
}

impl FingeringImage {
    pub fn is_for(&self, note: &Note) -> bool {
        self.note == note.pitch_class && self.octave == note.octave
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingeringLibrary {
    images: Vec<FingeringImage>,
}

impl FingeringLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[FingeringImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Store an upload, keyed by the note parsed from `file_name`.
    pub fn add(&mut self, file_name: &str, data_url: impl Into<String>) -> &FingeringImage {
        let name = parse_asset_name(file_name);
        let image = FingeringImage {
            note: name.pitch_class,
            octave: name.octave,
            is_alternate: name.alternate.is_some(),
            alternate_number: name.alternate,
            data_url: data_url.into(),
        };
        log::debug!("fingering added for {}{}", image.note, image.octave);
        self.images.push(image);
        &self.images[self.images.len() - 1]
    }

    /// Remove the image at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<FingeringImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Images for `note`: the main fingering first, then alternates by number.
    pub fn lookup(&self, note: &Note) -> Vec<&FingeringImage> {
        let mut found: Vec<&FingeringImage> = self.images.iter().filter(|img| img.is_for(note)).collect();
        let main_index = found.iter().position(|img| !img.is_alternate);
        let main = main_index.map(|i| found.remove(i));
        found.retain(|img| img.is_alternate);
        found.sort_by_key(|img| img.alternate_number.unwrap_or(0));
        main.into_iter().chain(found).collect()
    }

    /// Load from storage. Missing or corrupt data yields an empty library.
    pub fn load(storage: &dyn StoragePort) -> Self {
        let raw = match storage.get(FINGERING_IMAGES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("could not read fingering images: {e}");
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(images) => Self { images },
            Err(e) => {
                log::debug!("discarding malformed fingering images: {e}");
                Self::default()
            }
        }
    }

    /// Persist the library; an empty library removes the key.
    pub fn save(&self, storage: &mut dyn StoragePort) -> Result<()> {
        if self.images.is_empty() {
            return storage.remove(FINGERING_IMAGES_KEY);
        }
        storage.set(FINGERING_IMAGES_KEY, &serde_json::to_string(&self.images)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn parses_main_and_alternate_names() {
        assert_eq!(
            parse_asset_name("C#4.png"),
            AssetName { pitch_class: PitchClass::CSharp, octave: 4, alternate: None }
        );
        assert_eq!(
            parse_asset_name("F#4a2.jpeg"),
            AssetName { pitch_class: PitchClass::FSharp, octave: 4, alternate: Some(2) }
        );
        assert_eq!(parse_asset_name("Bb3.png").pitch_class, PitchClass::ASharp);
    }

    #[test]
    fn malformed_names_fall_back_to_a_guess() {
        let guessed = parse_asset_name("alto G5.png");
        assert_eq!(guessed.pitch_class, PitchClass::G);
        assert_eq!(guessed.octave, 5);
        assert_eq!(guessed.alternate, Some(1));

        let nothing = parse_asset_name("photo.png");
        assert_eq!(nothing, AssetName { pitch_class: PitchClass::C, octave: 4, alternate: None });

        assert_eq!(parse_asset_name("C4x.png").octave, 4);
        assert_eq!(parse_asset_name("C4a.png").alternate, Some(1));
    }

    #[test]
    fn lookup_orders_main_then_alternates() {
        let mut lib = FingeringLibrary::new();
        lib.add("D4a2.png", "alt2");
        lib.add("D4.png", "main");
        lib.add("D4a1.png", "alt1");
        lib.add("E4.png", "other");

        let d4 = Note::new(PitchClass::D, 4);
        let urls: Vec<&str> = lib.lookup(&d4).iter().map(|img| img.data_url.as_str()).collect();
        assert_eq!(urls, vec!["main", "alt1", "alt2"]);
    }

    #[test]
    fn library_persists_through_storage() {
        let mut storage = MemoryStorage::new();
        let mut lib = FingeringLibrary::new();
        lib.add("A3.png", "data:image/png;base64,AAAA");
        lib.save(&mut storage).unwrap();

        let raw = storage.get(FINGERING_IMAGES_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""isAlternate":false"#));
        assert_eq!(FingeringLibrary::load(&storage), lib);

        assert!(lib.remove(5).is_none());
        assert!(lib.remove(0).is_some());
        lib.save(&mut storage).unwrap();
        assert_eq!(storage.get(FINGERING_IMAGES_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(FINGERING_IMAGES_KEY, "{not json").unwrap();
        assert!(FingeringLibrary::load(&storage).is_empty());
    }
}
