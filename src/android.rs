//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jint, jstring};
use jni::JNIEnv;

use crate::{render_scale_to_svg, render_sheet_to_svg, Result, SheetOptions};

fn to_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render the staff of a scale to SVG.
///
/// Called from Kotlin as:
///   external fun renderScale(key: String, scaleType: String, width: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_saxoscales_app_ScaleLib_renderScale(
    mut env: JNIEnv,
    _class: JClass,
    key: JString,
    scale_type: JString,
    width: jfloat,
) -> jstring {
    let key: String = match env.get_string(&key) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let scale_type: String = match env.get_string(&scale_type) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_scale_to_svg(&key, &scale_type, Some(width as f64));
    to_jstring(&mut env, result)
}

/// Render a printable practice sheet to SVG.
///
/// Called from Kotlin as:
///   external fun renderSheet(key: String, scaleType: String, linesCount: Int, notesPerLine: Int): String?
#[no_mangle]
pub extern "system" fn Java_com_saxoscales_app_ScaleLib_renderSheet(
    mut env: JNIEnv,
    _class: JClass,
    key: JString,
    scale_type: JString,
    lines_count: jint,
    notes_per_line: jint,
) -> jstring {
    let key: String = match env.get_string(&key) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let scale_type: String = match env.get_string(&scale_type) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let options = SheetOptions {
        lines_count: lines_count.max(1) as usize,
        notes_per_line: notes_per_line.max(1) as usize,
        randomized: false,
    };
    let result = render_sheet_to_svg(&key, &scale_type, options);
    to_jstring(&mut env, result)
}
