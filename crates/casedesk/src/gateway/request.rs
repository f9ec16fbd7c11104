//! Outbound request description.

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, InvalidInputError};

/// A captured backend request.
///
/// Unlike a `reqwest::Request` this is plain data, so the gateway can send
/// it again after renewing the access token.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: RequestBody,
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`, rebuilt for every transmission.
    Multipart(Multipart),
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Append one query parameter.
    pub fn query_pair(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append the fields of a serializable struct as query parameters.
    ///
    /// `None` fields are skipped and sequences repeat the key once per
    /// element (`tags=a&tags=b`).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Query`] unless `params` serializes to a
    /// flat object.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, Error> {
        let value = serde_json::to_value(params).map_err(|e| InvalidInputError::Query {
            message: e.to_string(),
        })?;

        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(self),
            other => {
                return Err(InvalidInputError::Query {
                    message: format!("expected an object, got {}", other),
                }
                .into());
            }
        };

        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        self.query.push((key.clone(), scalar(&key, item)?));
                    }
                }
                other => {
                    let rendered = scalar(&key, other)?;
                    self.query.push((key, rendered));
                }
            }
        }
        Ok(self)
    }

    /// Set a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body does not serialize: {}", e),
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Set a url-encoded form body.
    pub fn form<K, V, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set a multipart body.
    pub fn multipart(mut self, form: Multipart) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

fn scalar(key: &str, value: Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(InvalidInputError::Query {
            message: format!("parameter '{}' is not a scalar", key),
        }
        .into()),
    }
}

/// Text fields and files of a `multipart/form-data` body.
#[derive(Debug, Clone, Default)]
pub struct Multipart {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub(crate) fn to_form(&self) -> Result<reqwest::multipart::Form, Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)
                .map_err(|e| InvalidInputError::Other {
                    message: format!("invalid MIME type '{}': {}", file.mime, e),
                })?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

/// One file in a multipart body.
#[derive(Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One logical call: the request plus whether it has been retried.
///
/// Built once per call to [`Gateway::send`](super::Gateway::send) and
/// never shared, so the caller's request is left untouched.
#[derive(Debug)]
pub struct Attempt {
    pub request: ApiRequest,
    retried: bool,
}

impl Attempt {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            retried: false,
        }
    }

    /// Mark this attempt as retried. Returns false if it already was.
    pub fn mark_retried(&mut self) -> bool {
        !std::mem::replace(&mut self.retried, true)
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Filters {
        page: u32,
        case_status: Option<&'static str>,
        tags: Vec<&'static str>,
        archived: bool,
    }

    #[test]
    fn query_skips_none_and_repeats_sequences() {
        let request = ApiRequest::get("/api/cases")
            .with_query(&Filters {
                page: 2,
                case_status: None,
                tags: vec!["urgent", "appeal"],
                archived: false,
            })
            .unwrap();

        let mut pairs: Vec<(&str, &str)> = request
            .query()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("archived", "false"),
                ("page", "2"),
                ("tags", "appeal"),
                ("tags", "urgent"),
            ]
        );
    }

    #[test]
    fn query_rejects_non_objects() {
        assert!(ApiRequest::get("/api/cases").with_query(&[1, 2]).is_err());
        assert!(
            ApiRequest::get("/api/cases")
                .with_query(&json!({"nested": {"a": 1}}))
                .is_err()
        );
    }

    #[test]
    fn attempt_retries_only_once() {
        let mut attempt = Attempt::new(ApiRequest::get("/api/cases"));
        assert!(!attempt.is_retried());
        assert!(attempt.mark_retried());
        assert!(!attempt.mark_retried());
        assert!(attempt.is_retried());
    }

    #[test]
    fn file_part_debug_omits_bytes() {
        let part = FilePart::new("file", "a.pdf", "application/pdf", vec![0xde, 0xad]);
        let debug = format!("{:?}", part);
        assert!(debug.contains("len: 2"));
        assert!(!debug.contains("222"));
    }

    #[test]
    fn multipart_builds_form() {
        let form = Multipart::new()
            .text("title", "Civil code")
            .file(FilePart::new("file", "code.pdf", "application/pdf", vec![1]));
        assert!(form.to_form().is_ok());

        let bad = Multipart::new().file(FilePart::new("file", "x", "not a mime", vec![]));
        assert!(bad.to_form().is_err());
    }
}
