//! HTTP values exchanged between the dispatcher and a transport.
//!
//! # Design
//! Requests and responses are plain data. The dispatcher builds an
//! `HttpRequest` and parses an `HttpResponse`; whatever sits in between
//! (the bundled ureq transport, a test double, a host application) only has
//! to move bytes. All fields are owned so values can be handed to another
//! thread or stored for inspection.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Whether parameters for this method travel in a request body rather
    /// than the query string.
    pub fn carries_body(self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_post_carries_a_body() {
        assert!(!HttpMethod::Get.carries_body());
        assert!(HttpMethod::Post.carries_body());
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn success_covers_the_whole_2xx_range() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }
}
