//! Outgoing request descriptor handed to the transport.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// HTTP verb for a terminal operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verb {
    /// Read a collection or entity.
    Get,
    /// Create an entity.
    Post,
    /// Update an entity.
    Patch,
    /// Remove an entity.
    Delete,
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A compiled request: verb, service-relative URL, optional JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ODataRequest {
    /// HTTP verb
    verb: Verb,
    /// Compiled path and query options, relative to the service root
    url: String,
    /// JSON body for write verbs
    body: Option<serde_json::Value>,
}

impl ODataRequest {
    /// Create a request descriptor.
    pub fn new(verb: Verb, url: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            verb,
            url: url.into(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_render_uppercase() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Patch.to_string(), "PATCH");
    }

    #[test]
    fn verbs_map_to_reqwest_methods() {
        assert_eq!(reqwest::Method::from(Verb::Delete), reqwest::Method::DELETE);
    }
}
