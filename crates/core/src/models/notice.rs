use serde::{Deserialize, Serialize};

/// A user-visible notice the host must show (dialog, toast, status line).
///
/// Only user-triggered flows raise notices. The background refresh loop
/// logs its failures instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The searched asset is already on the watchlist.
    AlreadyPinned { id: String },
    /// The search endpoint returned no candidates.
    NotFound { query: String },
    /// Network, status or payload failure during search.
    SearchFailed,
    /// The price history for the selected asset could not be loaded.
    ChartUnavailable { id: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::AlreadyPinned { .. } => {
                "This cryptocurrency has already been added!".to_string()
            }
            Notice::NotFound { .. } => {
                "Cryptocurrency not found. Try a different search term.".to_string()
            }
            Notice::SearchFailed => {
                "Something went wrong while searching. Please try again later.".to_string()
            }
            Notice::ChartUnavailable { .. } => {
                "There was a problem loading the chart. Please try again later.".to_string()
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
