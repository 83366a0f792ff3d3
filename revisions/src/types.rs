//! Domain types for recipe revisions and fetch requests.
//!
//! Revisions and recipes are kept as opaque JSON payloads keyed by their
//! identifiers; only the fields the store needs (`id`, `latest_revision`,
//! `approved_revision`) are typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Unique identifier for a recipe revision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(u64);

impl RevisionId {
    /// Creates a `RevisionId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RevisionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A versioned snapshot of a recipe's content
///
/// Everything except `id` is kept verbatim, so a revision serializes back to
/// the object it was parsed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Unique identifier
    pub id: RevisionId,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Revision {
    /// Creates a revision with no fields besides its id
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id: RevisionId::new(id),
            fields: Map::new(),
        }
    }

    /// Adds or replaces a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Looks up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Parses a revision from a JSON object with an integer `id`
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object or has no valid `id`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Renders the revision back to JSON, `id` included
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert("id".to_string(), Value::from(self.id.get()));
        Value::Object(object)
    }
}

/// A named recipe with its latest and (optionally) approved revision
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Most recent revision
    pub latest_revision: Revision,
    /// Revision currently approved for delivery, if any
    #[serde(default)]
    pub approved_revision: Option<Revision>,
    /// Remaining recipe fields, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Recipe {
    /// Creates a recipe with only a latest revision
    #[must_use]
    pub fn new(latest_revision: Revision) -> Self {
        Self {
            latest_revision,
            approved_revision: None,
            fields: Map::new(),
        }
    }

    /// Sets the approved revision
    #[must_use]
    pub fn with_approved(mut self, approved_revision: Revision) -> Self {
        self.approved_revision = Some(approved_revision);
        self
    }

    /// Embedded revisions: latest first, then approved if present
    pub fn revisions(&self) -> impl Iterator<Item = &Revision> {
        std::iter::once(&self.latest_revision).chain(self.approved_revision.as_ref())
    }

    /// Consumes the recipe, yielding its embedded revisions in the same order
    /// as [`Recipe::revisions`]
    pub fn into_revisions(self) -> impl Iterator<Item = Revision> {
        std::iter::once(self.latest_revision).chain(self.approved_revision)
    }
}

/// Caller-chosen key for one logical fetch request
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a `RequestId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which endpoint a request targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// A single revision
    Revision,
    /// The revision list
    RevisionList,
}

/// Error value carried by a failed fetch
///
/// Supplied by whoever dispatches the failure; the store keeps it as data.
#[derive(Error, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RequestError {
    /// Human readable description
    pub message: String,
    /// Extra detail such as a response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RequestError {
    /// Creates an error with a message and no details
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Attaches details
    #[must_use]
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Status of one fetch request
///
/// Serializes as `{"loading": bool, "error": null | <error>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatusRepr", into = "StatusRepr")]
pub enum RequestStatus {
    /// Fetch in flight
    Pending,
    /// Fetch completed
    Succeeded,
    /// Fetch failed with the carried error
    Failed(RequestError),
}

impl RequestStatus {
    /// `true` while the fetch is in flight
    #[must_use]
    pub const fn loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Error of a failed fetch
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Pending | Self::Succeeded => None,
        }
    }

    /// `true` once the fetch has either succeeded or failed
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.loading()
    }
}

/// A `{loading, error}` pair that names no valid status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request status cannot be loading and failed at once")]
pub struct InvalidRequestStatus;

#[derive(Serialize, Deserialize)]
struct StatusRepr {
    loading: bool,
    #[serde(default)]
    error: Option<RequestError>,
}

impl From<RequestStatus> for StatusRepr {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => Self {
                loading: true,
                error: None,
            },
            RequestStatus::Succeeded => Self {
                loading: false,
                error: None,
            },
            RequestStatus::Failed(error) => Self {
                loading: false,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<StatusRepr> for RequestStatus {
    type Error = InvalidRequestStatus;

    fn try_from(repr: StatusRepr) -> Result<Self, Self::Error> {
        match (repr.loading, repr.error) {
            (true, None) => Ok(Self::Pending),
            (false, None) => Ok(Self::Succeeded),
            (false, Some(error)) => Ok(Self::Failed(error)),
            (true, Some(_)) => Err(InvalidRequestStatus),
        }
    }
}
