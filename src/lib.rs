//! fcgi_web - Zero-copy FastCGI request toolkit
//!
//! A small toolkit of composable, non-owning sequence operations plus a
//! bidirectional lookup container, used to parse delimited text (query
//! strings, HTTP verbs) without copying, and a blocking-iteration adapter
//! that turns "accept the next unit of work" into a standard `for` loop.
//!
//! # Building blocks
//!
//! - **[`BijectiveMap`]** - a two-way unique mapping with O(1)-class lookup
//!   in both directions
//! - **[`View`] pipeline** - lazy [`SplitBy`] / [`Bundle`] / [`Search`] /
//!   [`Before`] operators over non-owning views of a string buffer
//! - **Index ranges** - lazy [`Range`] / [`Take`] / [`Drop`] / [`Reverse`]
//!   stages sharing the same pipe convention
//! - **[`Method`]** - the HTTP verb set, bidirectionally coded against its
//!   textual names
//! - **[`Request`] / [`RequestQueue`]** - one value per unit of work,
//!   delivered by iterating over a blocking [`FcgiHost`]
//!
//! Every operator supports direct-call and pipe form; both are the same
//! algorithm:
//!
//! ```
//! use fcgi_web::{Bundle, SplitBy, View};
//!
//! for segment in View::new("a=1&b=2") | SplitBy(b'&') {
//!     let [key, value] = segment | SplitBy(b'=') | Bundle::<2>;
//!     assert!(!key.is_empty() && !value.is_empty());
//! }
//! ```
//!
//! # The accept loop
//!
//! The host runtime (the FastCGI server library, or a mock in tests) is an
//! opaque collaborator behind [`FcgiHost`]; the toolkit owns no sockets and
//! spawns no threads. One thread, one blocking loop:
//!
//! ```no_run
//! use fcgi_web::{FcgiHost, RequestQueue};
//! # struct Runtime;
//! # impl FcgiHost for Runtime {
//! #     fn accept(&mut self) -> i32 { -1 }
//! #     fn lookup(&self, _: &str) -> Option<String> { None }
//! #     fn read_body(&mut self, _: &mut [u8]) -> usize { 0 }
//! #     fn send(&mut self, _: &str) -> std::io::Result<()> { Ok(()) }
//! # }
//!
//! let mut queue = RequestQueue::new(Runtime);
//!
//! while let Some(request) = queue.next() {
//!     let body = format!("{} {}", request.method(), request.uri());
//!     let _ = queue.host_mut().send(&body);
//! }
//! ```

pub mod seq {
    pub mod range;
    pub mod view;
}
pub mod http {
    pub mod method;
    pub mod query;
    pub mod request;
}
pub mod server {
    pub mod accept;
}
pub mod bimap;
pub mod errors;

pub use crate::{
    bimap::BijectiveMap,
    errors::BimapError,
    http::{method::Method, query, request::Request},
    seq::{
        range::{Drop, Range, Reverse, Take},
        view::{Before, Bundle, Search, Split, SplitBy, View},
    },
    server::accept::{FcgiHost, RequestLimits, RequestQueue},
};
