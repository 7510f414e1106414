//! Non-fatal notes about references skipped during tour assembly

use std::fmt;

use thiserror::Error;

/// Where a reference was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Tour,
    View(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Tour => write!(f, "tour"),
            Scope::View(id) => write!(f, "view '{}'", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("dataset '{id}' is not in the dataset registry")]
    UnknownDataset { id: String },

    #[error("basemap '{file}' is not in the basemap registry")]
    UnknownBasemap { file: String },

    #[error("basemap '{file}' has invalid bounds")]
    InvalidBasemapBounds { file: String },

    #[error("tile server '{name}' is not a known provider")]
    UnknownTileServer { name: String },

    #[error("{scope}: feature '{id}' is not shown in the tour")]
    UnknownFeature { scope: Scope, id: String },

    #[error("{scope}: start location '{id}' does not resolve to a point")]
    UnresolvedLocation { scope: Scope, id: String },

    #[error("{scope}: start bounds are invalid")]
    InvalidStartBounds { scope: Scope },

    #[error("{scope}: start distance must be a positive number")]
    InvalidStartDistance { scope: Scope },

    #[error("max bounds are invalid")]
    InvalidMaxBounds,
}

/// Collects diagnostics and mirrors each one to the log
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "Skipped reference");
        self.items.push(diagnostic);
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
