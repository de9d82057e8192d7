/// Explorer processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplorerStage {
    Querying,
    Filtering,
    Compositing,
    Index,
    Binding,
    Rendering,
}

impl std::fmt::Display for ExplorerStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Querying => write!(f, "Querying scenes"),
            Self::Filtering => write!(f, "Filtering and masking"),
            Self::Compositing => write!(f, "Compositing"),
            Self::Index => write!(f, "Computing index"),
            Self::Binding => write!(f, "Binding layers"),
            Self::Rendering => write!(f, "Rendering"),
        }
    }
}

/// Thread-safe progress reporting for the explorer.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items,
    /// if known.
    fn begin_stage(&self, _stage: ExplorerStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_explorer` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
