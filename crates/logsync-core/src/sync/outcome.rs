//! Result of one selection cycle

/// Which way a cycle synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source cursor moved; the reference file was revealed.
    AssistantToMaster,
    /// Reference cursor moved; the source file was revealed or opened.
    MasterToAssistant,
}

/// Why an event was not processed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    MappingDisabled,
    /// A configuration error is pending; reload settings to clear it.
    ConfigurationError,
    /// The event was caused by the engine's own navigation.
    ProgrammaticNavigation,
    NotFileBacked,
    /// No view currently shows the reference file.
    NoReferenceView,
    /// The reference cursor moved but bidirectional mode is off.
    SingleDirection,
    /// A command changed the mode or settings while the cycle was suspended.
    Superseded,
}

/// Observable outcome of [`SyncEngine::handle_selection`](super::SyncEngine::handle_selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Ignored(IgnoreReason),
    /// Another cycle was in flight; the event was dropped.
    Busy,
    /// The view's file has no entries in the index.
    Untracked,
    /// Neither role's line changed since the last cycle.
    Unchanged,
    /// The line has no index entry.
    Missed,
    /// No token found above the reference cursor.
    NoToken,
    Synced(Direction),
    /// An error was surfaced to the user.
    Failed,
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced(_))
    }
}
