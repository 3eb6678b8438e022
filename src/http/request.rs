//! One unit of work: the request value assembled from the host environment.

use crate::{
    bimap::BijectiveMap,
    http::{method::Method, query},
    server::accept::{FcgiHost, RequestLimits},
};
use tracing::warn;

/// A single request, assembled once per unit of work and immutable
/// afterwards.
///
/// The raw query/body text is copied once into an owned buffer, since the
/// host's environment and stream buffers are transient and do not outlive the
/// read call. The parameter map holds owned copies of the parsed pairs, so a
/// `Request` is self-contained and carries no borrow of the host.
///
/// Parameter lookup is bidirectional through the same [`BijectiveMap`]
/// semantics used everywhere else: last write wins for duplicate keys, the
/// first binding wins for a value contested by two keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    content_length: usize,
    content_type: String,
    script_name: String,
    uri: String,

    query_cache: String,
    params: BijectiveMap<String, String>,
}

impl Request {
    /// Documented fallback for request-scoped environment reads of unset
    /// names. A sentinel, not an error.
    pub const NO_CONTENT: &'static str = "No Content";

    /// Assembles a request from the current unit of work.
    ///
    /// For a `POST` the raw text is read from the body stream, up to
    /// `CONTENT_LENGTH` bytes and capped by
    /// [`RequestLimits::max_body_size`]; for every other method it is taken
    /// from `QUERY_STRING`. A body stream that delivers fewer bytes than
    /// announced is truncated to what arrived (logged, not fatal).
    pub(crate) fn receive<H: FcgiHost>(host: &mut H, limits: &RequestLimits) -> Self {
        let method = Method::from_name(&host.lookup("REQUEST_METHOD").unwrap_or_default());
        let content_length = leading_usize(&host.lookup("CONTENT_LENGTH").unwrap_or_default());

        let query_cache = match method {
            Method::Post => Self::read_body(host, content_length, limits),
            _ => host.lookup("QUERY_STRING").unwrap_or_default(),
        };

        let mut params = BijectiveMap::new();
        for (key, value) in &query::parse(&query_cache) {
            // Cannot conflict: the source map is already bijective.
            let _ = params.set(key.as_str().to_owned(), value.as_str().to_owned());
        }

        Self {
            method,
            content_length,
            content_type: host.lookup("CONTENT_TYPE").unwrap_or_default(),
            script_name: host.lookup("SCRIPT_NAME").unwrap_or_default(),
            uri: host.lookup("REQUEST_URI").unwrap_or_default(),
            query_cache,
            params,
        }
    }

    fn read_body<H: FcgiHost>(host: &mut H, content_length: usize, limits: &RequestLimits) -> String {
        let want = content_length.min(limits.max_body_size);
        if want < content_length {
            warn!(
                content_length,
                max_body_size = limits.max_body_size,
                "request body capped to configured limit"
            );
        }

        let mut buffer = vec![0u8; want];
        let got = host.read_body(&mut buffer).min(want);
        if got < want {
            warn!(expected = want, received = got, "partial body read, truncating");
        }
        buffer.truncate(got);

        // Fast path validates in place; broken sequences degrade to lossy.
        match simdutf8::basic::from_utf8(&buffer) {
            Ok(text) => text.to_owned(),
            Err(_) => String::from_utf8_lossy(&buffer).into_owned(),
        }
    }
}

// Public API
impl Request {
    #[inline]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The announced `CONTENT_LENGTH`, leniently parsed (leading digits, 0 on
    /// garbage).
    #[inline]
    pub const fn content_length(&self) -> usize {
        self.content_length
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The owned copy of the raw query/body text the parameters were parsed
    /// from.
    #[inline]
    pub fn query_cache(&self) -> &str {
        &self.query_cache
    }

    /// Looks up a query/body parameter by name.
    #[inline]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).ok().map(String::as_str)
    }

    /// The full parameter map, in encounter order.
    #[inline]
    pub const fn params(&self) -> &BijectiveMap<String, String> {
        &self.params
    }

    /// Reads a request-scoped environment parameter through the host.
    ///
    /// Unset names return the literal [`Request::NO_CONTENT`] sentinel
    /// rather than an error.
    #[inline]
    pub fn read_param<H: FcgiHost>(&self, host: &H, name: &str) -> String {
        host.lookup(name)
            .unwrap_or_else(|| Self::NO_CONTENT.to_owned())
    }
}

// atoi semantics: consume leading ASCII digits, ignore the rest, 0 on none.
fn leading_usize(text: &str) -> usize {
    let mut result: usize = 0;

    for byte in text.trim_start().bytes() {
        if !byte.is_ascii_digit() {
            break;
        }

        result = result
            .saturating_mul(10)
            .saturating_add((byte - b'0') as usize);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::MockHost;

    fn get_request(env: &[(&str, &str)]) -> Request {
        let mut host = MockHost::new(env, b"");
        Request::receive(&mut host, &RequestLimits::default())
    }

    #[test]
    fn get_uses_query_string() {
        let request = get_request(&[
            ("REQUEST_METHOD", "GET"),
            ("SCRIPT_NAME", "/app.fcgi"),
            ("REQUEST_URI", "/app.fcgi?a=1&b=2"),
            ("QUERY_STRING", "a=1&b=2"),
        ]);

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.script_name(), "/app.fcgi");
        assert_eq!(request.uri(), "/app.fcgi?a=1&b=2");
        assert_eq!(request.query_cache(), "a=1&b=2");
        assert_eq!(request.param("a"), Some("1"));
        assert_eq!(request.param("b"), Some("2"));
        assert_eq!(request.param("c"), None);
    }

    #[test]
    fn post_reads_body() {
        let mut host = MockHost::new(
            &[
                ("REQUEST_METHOD", "POST"),
                ("CONTENT_LENGTH", "11"),
                ("CONTENT_TYPE", "application/x-www-form-urlencoded"),
            ],
            b"key=val&x=y",
        );
        let request = Request::receive(&mut host, &RequestLimits::default());

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.content_length(), 11);
        assert_eq!(
            request.content_type(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(request.query_cache(), "key=val&x=y");
        assert_eq!(request.param("key"), Some("val"));
        assert_eq!(request.param("x"), Some("y"));
    }

    #[test]
    fn post_partial_body_is_truncated() {
        let mut host = MockHost::new(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "64")],
            b"a=1",
        );
        let request = Request::receive(&mut host, &RequestLimits::default());

        assert_eq!(request.content_length(), 64);
        assert_eq!(request.query_cache(), "a=1");
        assert_eq!(request.param("a"), Some("1"));
    }

    #[test]
    fn post_body_capped_by_limits() {
        let mut host = MockHost::new(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "1024")],
            b"k=0123456789",
        );
        let limits = RequestLimits { max_body_size: 3 };
        let request = Request::receive(&mut host, &limits);

        assert_eq!(request.query_cache(), "k=0");
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let request = get_request(&[
            ("REQUEST_METHOD", "GET"),
            ("QUERY_STRING", "a=1&b=2&a=3"),
        ]);

        assert_eq!(request.param("a"), Some("3"));
        assert_eq!(request.param("b"), Some("2"));
    }

    #[test]
    fn unknown_method_is_invalid() {
        let request = get_request(&[("REQUEST_METHOD", "BREW")]);

        assert_eq!(request.method(), Method::Invalid);
    }

    #[test]
    fn content_length_is_parsed_leniently() {
        assert_eq!(leading_usize("123"), 123);
        assert_eq!(leading_usize("  42"), 42);
        assert_eq!(leading_usize("12abc"), 12);
        assert_eq!(leading_usize("abc"), 0);
        assert_eq!(leading_usize(""), 0);
    }

    #[test]
    fn read_param_fallback() {
        let host = MockHost::new(&[("HTTP_HOST", "example.org")], b"");
        let request = get_request(&[("REQUEST_METHOD", "GET")]);

        assert_eq!(request.read_param(&host, "HTTP_HOST"), "example.org");
        assert_eq!(request.read_param(&host, "HTTP_REFERER"), Request::NO_CONTENT);
    }
}
