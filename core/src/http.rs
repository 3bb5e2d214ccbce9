//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! Requests are plain data built once per call and handed to the transport
//! by value. Responses are produced by the transport and consumed once by
//! the decoder. Query and form parameters keep insertion order on the wire.

use bytes::Bytes;

/// HTTP method for a request. The game API only uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Form fields, sent url-encoded. Only meaningful for `Post`.
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url.into())
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url.into())
    }

    fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            form: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_form<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.form
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// An HTTP response as reported by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
    /// URL the response was received from.
    pub url: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>, url: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_starts_without_parameters() {
        let req = HttpRequest::get("http://localhost:3000/api/game");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/game");
        assert!(req.query.is_empty());
        assert!(req.form.is_empty());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn query_parameters_keep_insertion_order() {
        let req = HttpRequest::get("http://localhost/api/game")
            .with_query([("b", "2"), ("a", "1")])
            .with_query([("b", "3")]);
        assert_eq!(
            req.query,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn post_carries_form_fields() {
        let req = HttpRequest::post("http://localhost/api/game/1/hit")
            .with_form([("damage", "1")])
            .with_header("x-trace", "abc");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.form, vec![("damage".to_string(), "1".to_string())]);
        assert_eq!(req.headers, vec![("x-trace".to_string(), "abc".to_string())]);
        assert_eq!(req.method.as_str(), "POST");
    }
}
