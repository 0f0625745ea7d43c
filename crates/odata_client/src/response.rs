//! Response wrapper over raw transport output.

use odata_error::{ODataResult, ResponseParseError};

/// Wrapped service response: status plus raw body, with structured accessors
/// that parse on demand.
#[derive(Debug, Clone)]
pub struct ODataResponse {
    status: u16,
    body: Vec<u8>,
}

impl ODataResponse {
    /// Wrap a transport result.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Raw body as a string, lossily decoded.
    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> ODataResult<serde_json::Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ResponseParseError::new(format!("invalid JSON body: {e}")).into())
    }

    /// Entity list, unwrapping the OData `value` envelope.
    ///
    /// A collection response (`{"value": [...]}`) yields its array; a bare
    /// object (single-entity response) yields a one-element list.
    pub fn entities(&self) -> ODataResult<Vec<serde_json::Value>> {
        let json = self.json()?;
        match json {
            serde_json::Value::Object(ref map) => match map.get("value") {
                Some(serde_json::Value::Array(items)) => Ok(items.clone()),
                Some(other) => Ok(vec![other.clone()]),
                None => Ok(vec![json]),
            },
            serde_json::Value::Array(items) => Ok(items),
            other => Err(ResponseParseError::new(format!(
                "expected an entity or collection, got: {other}"
            ))
            .into()),
        }
    }

    /// First entity of the response, if any.
    pub fn first_entity(&self) -> ODataResult<Option<serde_json::Value>> {
        Ok(self.entities()?.into_iter().next())
    }

    /// Identifier of a created entity, read from the `id`/`Id` property of
    /// an insert response.
    pub fn created_id(&self) -> ODataResult<Option<serde_json::Value>> {
        let Some(entity) = self.first_entity()? else {
            return Ok(None);
        };
        Ok(entity
            .get("id")
            .or_else(|| entity.get("Id"))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> ODataResponse {
        ODataResponse::new(200, body.as_bytes().to_vec())
    }

    #[test]
    fn collection_envelope_unwraps() {
        let r = response(r#"{"value":[{"a":1},{"a":2}]}"#);
        let entities = r.entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["a"], 1);
    }

    #[test]
    fn bare_object_wraps_as_single_entity() {
        let r = response(r#"{"FirstName":"Russell"}"#);
        let entities = r.entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(
            r.first_entity().unwrap().unwrap()["FirstName"],
            "Russell"
        );
    }

    #[test]
    fn empty_collection_yields_no_first_entity() {
        let r = response(r#"{"value":[]}"#);
        assert!(r.first_entity().unwrap().is_none());
    }

    #[test]
    fn malformed_body_fails_structured_access() {
        let r = response("not json");
        assert!(r.json().is_err());
        assert!(r.entities().is_err());
        // Raw access still works.
        assert_eq!(r.body_str(), "not json");
    }

    #[test]
    fn created_id_reads_id_property() {
        let r = response(r#"{"Id":"n1","Name":"New"}"#);
        assert_eq!(r.created_id().unwrap().unwrap(), "n1");

        let r = response(r#"{"id":7}"#);
        assert_eq!(r.created_id().unwrap().unwrap(), 7);

        let r = response(r#"{"Name":"New"}"#);
        assert!(r.created_id().unwrap().is_none());
    }

    #[test]
    fn emptiness_check() {
        let r = ODataResponse::new(204, Vec::new());
        assert!(r.is_empty());
        assert_eq!(r.status(), 204);
    }
}
