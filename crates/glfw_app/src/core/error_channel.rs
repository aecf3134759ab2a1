//! Process-wide channel for errors reported by external backends
//!
//! GLFW and the OpenGL debug hook report problems through C callbacks that
//! cannot return a `Result`. Both are pointed at an [`ErrorChannel`] when the
//! backend is initialized; the application drains it at fixed points of the
//! lifecycle and turns what it finds into an [`AppError`](crate::AppError).
//!
//! The channel is installed once per backend and never replaced.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Which external collaborator produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    /// The windowing library (GLFW)
    Display,
    /// The graphics API debug output
    Graphics,
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => f.write_str("display"),
            Self::Graphics => f.write_str("graphics"),
        }
    }
}

/// A single error reported by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    /// Reporting collaborator
    pub source: ErrorSource,
    /// Human readable description, as given by the backend
    pub message: String,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} backend: {}", self.source, self.message)
    }
}

/// Shared queue of backend errors
///
/// Cloning yields another handle onto the same queue.
#[derive(Debug, Clone, Default)]
pub struct ErrorChannel {
    queue: Arc<Mutex<VecDeque<BackendError>>>,
}

impl ErrorChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn report(&self, source: ErrorSource, message: impl Into<String>) {
        let error = BackendError {
            source,
            message: message.into(),
        };
        log::debug!("Backend error reported: {error}");
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
    }

    /// Remove and return the oldest pending error
    pub fn take(&self) -> Option<BackendError> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Remove every pending error, oldest first
    pub fn drain(&self) -> Vec<BackendError> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Whether any error is waiting
    pub fn is_empty(&self) -> bool {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
