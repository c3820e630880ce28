use serde::{Deserialize, Serialize};

/// One match returned by the external search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: String,
    pub name: String,
    pub symbol: String,
}
