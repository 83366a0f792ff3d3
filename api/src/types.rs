//! Response payloads from the recipe server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The self-describing index: endpoint name to absolute path
pub type ApiIndex = HashMap<String, String>;

/// A recipe as listed for clients
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe id
    pub id: u64,
    /// Recipe name
    pub name: String,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Where the server thinks the client is, and when it asked
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Two letter country code
    pub country: String,
    /// Server time of the classification request
    pub request_time: DateTime<Utc>,
}

/// An action definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action name, e.g. `show-heartbeat`
    pub name: String,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
