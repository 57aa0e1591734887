//! Open a file and position its cursor
//!
//! Opening a file makes the host move selections, and those movements come
//! back as selection events. While an open is in flight (and for one more
//! turn of the event loop after it) [`Navigator::is_navigating`] is true so
//! the engine can drop that feedback.

use crate::host::{EditorHost, HostError, LineRange, RevealMode, ShowOptions, ViewColumn, ViewId};
use crate::{Error, Result};
use logsync_fs::NormalizedPath;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Navigator {
    host: Arc<dyn EditorHost>,
    navigating: AtomicBool,
}

impl Navigator {
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            host,
            navigating: AtomicBool::new(false),
        }
    }

    /// True while a programmatic navigation is in flight.
    pub fn is_navigating(&self) -> bool {
        self.navigating.load(Ordering::Acquire)
    }

    /// Ensure a view of `path` exists with its cursor on `line` (zero-based).
    ///
    /// Reuses an open document and a visible view when there are any;
    /// otherwise opens the document and shows it in `column`, not as a
    /// preview.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the file does not exist, [`Error::Navigation`]
    /// if the host cannot open or show it.
    pub async fn open(&self, path: &NormalizedPath, line: usize, column: ViewColumn) -> Result<ViewId> {
        self.navigating.store(true, Ordering::Release);
        let result = self.open_view(path, line, column).await;
        tokio::task::yield_now().await;
        self.navigating.store(false, Ordering::Release);

        match &result {
            Ok(view) => tracing::debug!(path = %path, line, ?view, "Navigated"),
            Err(e) => tracing::warn!(path = %path, line, "Navigation failed: {}", e),
        }
        result
    }

    async fn open_view(&self, path: &NormalizedPath, line: usize, column: ViewColumn) -> Result<ViewId> {
        let document = match self.host.find_open_document(path) {
            Some(document) => document,
            None => self
                .host
                .open_document(path)
                .await
                .map_err(|e| navigation_error(path, e))?,
        };

        if let Some(view) = self.host.find_visible_view(document) {
            self.host
                .set_selection(view, line)
                .map_err(|e| navigation_error(path, e))?;
            self.host
                .reveal_range(view, LineRange::line(line), RevealMode::InCenterIfOutsideViewport)
                .map_err(|e| navigation_error(path, e))?;
            return Ok(view);
        }

        let options = ShowOptions {
            line: Some(line),
            column,
            preview: false,
        };
        self.host
            .show_view(document, options)
            .await
            .map_err(|e| navigation_error(path, e))
    }
}

fn navigation_error(path: &NormalizedPath, error: HostError) -> Error {
    match error {
        HostError::NotFound { .. } => Error::NotFound {
            path: path.to_native(),
        },
        other => Error::Navigation {
            path: path.to_native(),
            message: other.to_string(),
        },
    }
}
