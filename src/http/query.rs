//! Zero-copy query string parsing into a bidirectional parameter map.

use crate::{
    bimap::BijectiveMap,
    seq::view::{Bundle, SplitBy, View},
};
use tracing::debug;

/// Parses delimited `key=value` text into a [`BijectiveMap`] of views.
///
/// Splits `raw` on `&`, then each segment on `=` bundled into exactly two
/// views; the value is empty when no `=` is present. Later duplicate keys
/// overwrite earlier ones (last write wins); insertion order is preserved as
/// encountered. Parsing never fails: bare keys, empty segments and duplicate
/// keys are all absorbed into empty-view or overwrite semantics.
///
/// A pair whose *value* is already bound to a different key cannot enter the
/// map without breaking two-way uniqueness; the first binding wins and the
/// conflicting pair is dropped with a `debug` log line. Flag-style queries
/// hit this directly: in `"x&y"` both bare keys carry the empty value, so
/// only the first flag enters the map.
///
/// The returned views borrow from `raw`; callers that outlive the buffer copy
/// the text out first (see [`Request`](crate::Request)).
///
/// # Examples
/// ```
/// use fcgi_web::query;
///
/// let params = query::parse("a=1&b=2&a=3");
///
/// assert_eq!(params.get("a").map(|v| v.as_str()), Ok("3"));
/// assert_eq!(params.get("b").map(|v| v.as_str()), Ok("2"));
///
/// let flags = query::parse("x&y");
///
/// assert!(flags.get("x").is_ok());
/// assert!(flags.get("y").is_err()); // "" is already bound to "x"
/// ```
pub fn parse(raw: &str) -> BijectiveMap<View<'_>, View<'_>> {
    let mut result = BijectiveMap::new();

    for segment in View::new(raw) | SplitBy(b'&') {
        let [key, value] = segment | SplitBy(b'=') | Bundle::<2>;

        if result.set(key, value).is_err() {
            debug!(
                key = key.as_str(),
                value = value.as_str(),
                "dropped parameter: value already bound to another key"
            );
        }
    }

    result
}
