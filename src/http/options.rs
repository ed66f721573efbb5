//! Request option helpers
//!
//! Small values that adjust an outgoing [`Request`] before dispatch. Each one
//! sets a single query parameter, so applying the same option twice leaves
//! the last value in place.

use uuid::Uuid;

use super::request::Request;

/// A query parameter applied to list-style requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOption {
    /// `page=<n>`
    Page(u32),
    /// `size=<n>`
    Size(u32),
    /// `configurationId=<uuid>`
    Configuration(Uuid),
}

impl ListOption {
    pub fn apply(&self, req: &mut Request) {
        match self {
            ListOption::Page(n) => req.set_query("page", &n.to_string()),
            ListOption::Size(n) => req.set_query("size", &n.to_string()),
            ListOption::Configuration(id) => {
                req.set_query("configurationId", &id.hyphenated().to_string())
            }
        }
    }
}

pub fn with_page(n: u32) -> ListOption {
    ListOption::Page(n)
}

pub fn with_size(n: u32) -> ListOption {
    ListOption::Size(n)
}

pub fn with_configuration(id: Uuid) -> ListOption {
    ListOption::Configuration(id)
}

/// Apply options in order
pub fn apply_all(req: &mut Request, options: &[ListOption]) {
    for option in options {
        option.apply(req);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClient;
    use reqwest::Method;

    fn request() -> Request {
        HttpClient::new("https://api.example.com")
            .unwrap()
            .new_request(Method::GET, "v1/repositories", "acme")
            .unwrap()
    }

    #[test]
    fn test_page_and_size() {
        let mut req = request();
        apply_all(&mut req, &[with_page(2), with_size(25)]);
        assert_eq!(
            req.url().as_str(),
            "https://api.example.com/v1/repositories/acme?page=2&size=25"
        );
    }

    #[test]
    fn test_page_twice_keeps_last() {
        let mut req = request();
        apply_all(&mut req, &[with_page(1), with_page(7)]);
        assert_eq!(req.url().query(), Some("page=7"));
    }

    #[test]
    fn test_configuration_id_canonical_text() {
        let id = Uuid::parse_str("B9F1A2C3-0000-4000-8000-00000000ABCD").unwrap();
        let mut req = request();
        with_configuration(id).apply(&mut req);
        assert_eq!(
            req.query("configurationId").as_deref(),
            Some("b9f1a2c3-0000-4000-8000-00000000abcd")
        );
    }
}
