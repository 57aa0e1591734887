//! Filesystem layer for logsync
//!
//! Provides the path normalization used for every index key and the
//! text reading used to load reference and source files.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use io::{read_text, read_text_async};
pub use path::{NormalizedPath, PathStyle};
