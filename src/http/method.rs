//! HTTP request methods and the name ↔ verb codec.

use crate::bimap::BijectiveMap;
use once_cell::sync::Lazy;
use std::fmt;

// Built once before first use; read-only afterwards, so the tables are safe
// for unsynchronized concurrent reads.
static NAME_TO_METHOD: Lazy<BijectiveMap<&'static str, Method>> = Lazy::new(|| {
    BijectiveMap::from_pairs([
        ("", Method::Invalid),
        ("GET", Method::Get),
        ("HEAD", Method::Head),
        ("POST", Method::Post),
        ("PUT", Method::Put),
        ("DELETE", Method::Delete),
        ("CONNECT", Method::Connect),
        ("OPTIONS", Method::Options),
        ("TRACE", Method::Trace),
        ("PATCH", Method::Patch),
    ])
    .expect("method table pairs are unique")
});

static METHOD_TO_NAME: Lazy<BijectiveMap<Method, &'static str>> =
    Lazy::new(|| NAME_TO_METHOD.inverse());

/// HTTP request methods
///
/// A closed set, bidirectionally coded against the textual verb names through
/// a static [`BijectiveMap`] table. `Invalid` is a first-class member: the
/// decode target for unrecognized text, keyed by the empty string. Callers
/// treat it as "unsupported method".
///
/// # References
///
/// - [RFC 7231, Section 4](https://datatracker.ietf.org/doc/html/rfc7231#section-4)
/// - [RFC 5789](https://datatracker.ietf.org/doc/html/rfc5789) (PATCH method)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Decode result for any verb text outside the closed set.
    #[default]
    Invalid,
    /// GET method - transfer a current representation of the target resource
    /// [[RFC7231, Section 4.3.1](https://tools.ietf.org/html/rfc7231#section-4.3.1)]
    Get,
    /// HEAD method - same as GET but without response body
    /// [[RFC7231, Section 4.3.2](https://tools.ietf.org/html/rfc7231#section-4.3.2)]
    Head,
    /// POST method - perform resource-specific processing on the request payload
    /// [[RFC7231, Section 4.3.3](https://tools.ietf.org/html/rfc7231#section-4.3.3)]
    Post,
    /// PUT method - replace all current representations of the target resource with the request payload
    /// [[RFC7231, Section 4.3.4](https://tools.ietf.org/html/rfc7231#section-4.3.4)]
    Put,
    /// DELETE method - remove all current representations of the target resource
    /// [[RFC7231, Section 4.3.5](https://tools.ietf.org/html/rfc7231#section-4.3.5)]
    Delete,
    /// CONNECT method - establish a tunnel to the server identified by the target resource
    /// [[RFC7231, Section 4.3.6](https://tools.ietf.org/html/rfc7231#section-4.3.6)]
    Connect,
    /// OPTIONS method - describe the communication options for the target resource
    /// [[RFC7231, Section 4.3.7](https://tools.ietf.org/html/rfc7231#section-4.3.7)]
    Options,
    /// TRACE method - perform a message loop-back test along the path to the target resource
    /// [[RFC7231, Section 4.3.8](https://tools.ietf.org/html/rfc7231#section-4.3.8)]
    Trace,
    /// PATCH method - apply partial modifications to a resource
    /// [[RFC5789, Section 2](https://tools.ietf.org/html/rfc5789#section-2)]
    Patch,
}

impl Method {
    /// Decodes a verb name. Unknown text yields [`Method::Invalid`], never an
    /// error.
    ///
    /// # Examples
    /// ```
    /// use fcgi_web::Method;
    ///
    /// assert_eq!(Method::from_name("GET"), Method::Get);
    /// assert_eq!(Method::from_name(""), Method::Invalid);
    /// assert_eq!(Method::from_name("BREW"), Method::Invalid);
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        NAME_TO_METHOD.get(name).copied().unwrap_or(Method::Invalid)
    }

    /// Renders the verb back to its textual name; `Invalid` renders as `""`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        METHOD_TO_NAME.get(self).copied().unwrap_or("")
    }

    /// Returns `true` for every member of the closed set except `Invalid`.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Method::Invalid)
    }
}

impl From<&str> for Method {
    #[inline]
    fn from(name: &str) -> Self {
        Method::from_name(name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
