use std::fmt;

/// Which collaborator call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStage {
    Rows,
    Grouping,
    Regions,
}

impl fmt::Display for SourceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => write!(f, "rows"),
            Self::Grouping => write!(f, "grouping"),
            Self::Regions => write!(f, "regions"),
        }
    }
}

#[derive(Debug)]
pub enum ReconError {
    /// The data source failed to produce rows, a grouping, or region lists.
    SourceUnavailable {
        stage: SourceStage,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReconError {
    pub(crate) fn source_unavailable<E>(stage: SourceStage, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SourceUnavailable {
            stage,
            source: Box::new(err),
        }
    }

    pub fn stage(&self) -> SourceStage {
        match self {
            Self::SourceUnavailable { stage, .. } => *stage,
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { stage, source } => {
                write!(f, "source data unavailable or malformed ({stage}): {source}")
            }
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source.as_ref()),
        }
    }
}
