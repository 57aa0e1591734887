//! Location index for logsync
//!
//! Turns reference-file text (a build or debug log embedding `path:line`
//! tokens) into a per-file, per-line index of log offsets and highlight spans.
//!
//! # Example
//!
//! ```
//! use logsync_fs::{NormalizedPath, PathStyle};
//! use logsync_index::{LocationIndex, SkipPattern, TokenPattern};
//!
//! let text = "/src/a.c:10\n    asm0\n/src/a.c:12\n";
//! let pattern = TokenPattern::platform_default(PathStyle::Posix);
//! let index = LocationIndex::extract(text, &pattern, &SkipPattern::default(), PathStyle::Posix);
//!
//! let entry = index.lookup(&NormalizedPath::new("/src/a.c"), 10).unwrap();
//! assert_eq!((entry.log_line, entry.span), (0, 2));
//! ```

pub mod entry;
pub mod error;
pub mod index;
pub mod pattern;

pub use entry::{FileIndex, LocationEntry};
pub use error::{Error, Result};
pub use index::{LocationIndex, scan_upward};
pub use pattern::{SkipPattern, TokenMatch, TokenPattern};
