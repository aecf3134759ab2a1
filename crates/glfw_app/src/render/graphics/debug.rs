//! OpenGL debug output hook

#![allow(unsafe_code)]

use std::ffi::{c_void, CStr};

use gl::types::{GLchar, GLenum, GLsizei, GLuint};

use crate::core::error_channel::{ErrorChannel, ErrorSource};

/// How the harness treats one driver debug message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugDisposition {
    /// Reported into the error channel and logged as an error
    Report,
    /// Logged at warn level
    Warn,
    /// Logged at info level
    Info,
    /// Logged at debug level
    Trace,
}

/// Classify a message by type and severity
pub const fn classify(gltype: GLenum, severity: GLenum) -> DebugDisposition {
    if gltype == gl::DEBUG_TYPE_ERROR || severity == gl::DEBUG_SEVERITY_HIGH {
        return DebugDisposition::Report;
    }
    match severity {
        gl::DEBUG_SEVERITY_MEDIUM => DebugDisposition::Warn,
        gl::DEBUG_SEVERITY_LOW => DebugDisposition::Info,
        _ => DebugDisposition::Trace,
    }
}

/// Callback registered with `glDebugMessageCallback`
///
/// `user_param` is the `ErrorChannel` boxed inside
/// [`GlGraphics`](super::GlGraphics); it outlives the registration.
pub(crate) extern "system" fn debug_callback(
    _source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    user_param: *mut c_void,
) {
    let text = if message.is_null() {
        String::new()
    } else {
        // SAFETY: the driver passes a NUL-terminated string valid for this call
        unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
    };

    match classify(gltype, severity) {
        DebugDisposition::Report => {
            log::error!("GL [{id}] {text}");
            // SAFETY: see above, the pointer is either null or a live ErrorChannel
            if let Some(channel) = unsafe { user_param.cast::<ErrorChannel>().as_ref() } {
                channel.report(ErrorSource::Graphics, format!("[{id}] {text}"));
            }
        }
        DebugDisposition::Warn => log::warn!("GL [{id}] {text}"),
        DebugDisposition::Info => log::info!("GL [{id}] {text}"),
        DebugDisposition::Trace => log::debug!("GL [{id}] {text}"),
    }
}
