//! Line highlighting on editor views

use crate::host::{DecorationStyle, EditorHost, LineRange, ViewId};
use crate::{Error, Result};
use std::sync::Arc;

/// Replaces the decoration set of one style on a view.
pub struct HighlightApplier {
    host: Arc<dyn EditorHost>,
    style: DecorationStyle,
}

impl HighlightApplier {
    pub fn new(host: Arc<dyn EditorHost>, style: DecorationStyle) -> Self {
        Self { host, style }
    }

    /// Highlight `count` whole lines starting at `start`, replacing any
    /// previous highlight on the view.
    ///
    /// # Errors
    ///
    /// [`Error::Highlight`] if the block runs past the end of the document.
    pub fn apply(&self, view: ViewId, start: usize, count: usize) -> Result<()> {
        if count == 0 {
            return self.clear(view);
        }
        if let Some(available) = self.host.line_count(view)
            && start + count > available
        {
            return Err(Error::Highlight {
                line: start,
                count,
                available,
            });
        }

        let ranges: Vec<LineRange> = (start..start + count).map(LineRange::line).collect();
        self.host.set_decorations(view, &self.style, &ranges)?;
        Ok(())
    }

    /// Remove this style's highlight from the view.
    pub fn clear(&self, view: ViewId) -> Result<()> {
        self.host.set_decorations(view, &self.style, &[])?;
        Ok(())
    }
}
