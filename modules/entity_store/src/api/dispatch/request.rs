//! Transport-agnostic request descriptor

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Request verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LIST" => Ok(Self::List),
            other => Err(format!("unknown verb '{}'", other)),
        }
    }
}

/// Opaque request routed to one partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub verb: Verb,
    /// Resource path such as `apps/{id}/data`
    pub resource: String,
    /// Fills the `{id}` placeholder, or is appended as the last segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub query: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Already-resolved caller identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

impl Request {
    pub fn new(verb: Verb, resource: impl Into<String>) -> Self {
        Self {
            verb,
            resource: resource.into(),
            id: None,
            query: HashMap::new(),
            body: None,
            caller: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Path segments with empty segments dropped.
    ///
    /// The id fills the `{id}` segment, or becomes the last segment, and is
    /// never split itself.
    pub fn segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self
            .resource
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if let Some(id) = &self.id {
            match segments.iter_mut().find(|s| s.as_str() == "{id}") {
                Some(slot) => *slot = id.clone(),
                None => segments.push(id.clone()),
            }
        }
        segments
    }

    /// Resource path after id substitution, for error messages
    pub fn path(&self) -> String {
        self.segments().join("/")
    }
}
