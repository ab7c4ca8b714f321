//! scalelib: scale generation, staff notation and practice scheduling
//! for Saxo Scales.
//!
//! The pipeline runs from a (key, scale type) choice through the scale
//! engine and range filter to the staff layout calculator, whose output
//! the renderers paint. The practice scheduler consumes the same filtered
//! notes to drive a tempo-based note carousel.
//!
//! # Example
//! ```no_run
//! use scalelib::{generate_scale, filter_by_range, NoteRange, PitchClass, ScaleType};
//!
//! let notes = generate_scale(PitchClass::D, ScaleType::HarmonicMinor);
//! let playable = filter_by_range(notes, &NoteRange::default());
//! for note in &playable {
//!     println!("{note}");
//! }
//! ```

pub mod app_state;
pub mod error;
pub mod fingering;
pub mod layout;
pub mod model;
pub mod practice;
pub mod renderer;
pub mod storage;
pub mod theory;

#[cfg(target_os = "android")]
pub mod android;

pub use error::{Error, Result};
pub use model::*;
pub use layout::{layout, NoteLayout, StaffPosition, StemDirection, LAYOUT_REFERENCE_OCTAVE};
pub use practice::{PracticeConfig, PracticeEvent, PracticeScheduler, PracticeState};
pub use renderer::{NotePreview, PracticeSheet, SheetOptions, StaffView, StaffViewOptions, Surface, SvgSurface};
pub use theory::{filter_by_range, generate_scale, generate_scale_from, generate_scale_str, ScaleNotes};

/// Render the full staff of a scale to SVG.
///
/// `key` accepts sharp or flat spellings. An unrecognised scale type falls
/// back to major. `width` sets the SVG width in user units; pass `None` to
/// use the default (800).
pub fn render_scale_to_svg(key: &str, scale_type: &str, width: Option<f64>) -> Result<String> {
    let spec = parse_spec(key, scale_type)?;
    let mut options = StaffViewOptions::default();
    if let Some(w) = width.filter(|w| *w > 0.0) {
        options.width = w;
    }
    let notes = generate_scale(spec.key, spec.scale_type).collect();
    Ok(StaffView::new(spec, notes, options).render_svg())
}

/// Render a printable practice sheet for a scale to SVG.
pub fn render_sheet_to_svg(key: &str, scale_type: &str, options: SheetOptions) -> Result<String> {
    let spec = parse_spec(key, scale_type)?;
    let notes = generate_scale(spec.key, spec.scale_type).collect();
    let sheet = PracticeSheet::new(spec, notes, options, &mut rand::rng());
    Ok(sheet.render_svg())
}

fn parse_spec(key: &str, scale_type: &str) -> Result<ScaleSpec> {
    let key = key.parse::<PitchClass>()?;
    let scale_type = scale_type.parse::<ScaleType>().unwrap_or_else(|_| {
        log::warn!("unknown scale type '{scale_type}', using major");
        ScaleType::Major
    });
    Ok(ScaleSpec::new(key, scale_type))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read a C string argument, returning `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a scale staff and return SVG as a C string.
/// The caller must free the returned string with `scalelib_free_string`.
///
/// `width` sets the SVG width in user units. Pass 0.0 to use the default.
///
/// # Safety
/// `key` and `scale_type` must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn scalelib_render_scale(
    key: *const c_char,
    scale_type: *const c_char,
    width: f64,
) -> *mut c_char {
    let (Some(key), Some(scale_type)) = (unsafe { c_str_arg(key) }, unsafe { c_str_arg(scale_type) }) else {
        return std::ptr::null_mut();
    };
    into_c_string(render_scale_to_svg(key, scale_type, Some(width)))
}

/// Render a printable sheet and return SVG as a C string.
/// The caller must free the returned string with `scalelib_free_string`.
///
/// # Safety
/// `key` and `scale_type` must be valid null-terminated UTF-8 C strings.
#[no_mangle]
pub unsafe extern "C" fn scalelib_render_sheet(
    key: *const c_char,
    scale_type: *const c_char,
    lines_count: u32,
    notes_per_line: u32,
) -> *mut c_char {
    let (Some(key), Some(scale_type)) = (unsafe { c_str_arg(key) }, unsafe { c_str_arg(scale_type) }) else {
        return std::ptr::null_mut();
    };
    let options = SheetOptions {
        lines_count: lines_count as usize,
        notes_per_line: notes_per_line as usize,
        randomized: false,
    };
    into_c_string(render_sheet_to_svg(key, scale_type, options))
}

/// Free a string previously returned by scalelib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a scalelib function, or null.
#[no_mangle]
pub unsafe extern "C" fn scalelib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
