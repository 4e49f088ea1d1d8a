use tiffin_core::IndexPath;

use crate::list_view::ListViewId;

/// Failed lookups against an adapter or the side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    MissingSection {
        section: usize,
    },
    MissingItem {
        path: IndexPath,
    },
    MissingCapability {
        path: IndexPath,
        capability: &'static str,
    },
    NotPrepared {
        view: ListViewId,
    },
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::MissingSection { section } => write!(f, "section {section} missing"),
            ListError::MissingItem { path } => write!(f, "item {path} missing"),
            ListError::MissingCapability { path, capability } => {
                write!(f, "item {path} does not provide {capability}")
            }
            ListError::NotPrepared { view } => write!(f, "{view} has no adapter"),
        }
    }
}

impl std::error::Error for ListError {}
