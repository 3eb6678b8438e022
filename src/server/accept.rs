//! The blocking accept loop, exposed as standard iteration.

use crate::http::request::Request;
use std::io;
use tracing::debug;

/// The opaque host-runtime collaborators consumed by the core.
///
/// The crate never touches sockets or process environment itself; a host
/// implementation supplies the blocking accept primitive, the environment
/// accessor, the body stream and the output channel. Implement this once per
/// server runtime (or as a scripted mock in tests).
pub trait FcgiHost {
    /// Blocks until the next unit of work is ready.
    ///
    /// A negative status means "no more work, terminate"; any other value
    /// means one unit of work is ready.
    fn accept(&mut self) -> i32;

    /// Environment accessor for the current unit of work. `None` when the
    /// name is unset.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Reads request body bytes into `buffer`, returning the count actually
    /// delivered (which may fall short of the buffer).
    fn read_body(&mut self, buffer: &mut [u8]) -> usize;

    /// Fire-and-forget write of response text to the current unit of work's
    /// output channel.
    fn send(&mut self, text: &str) -> io::Result<()>;
}

/// Per-request processing limits.
///
/// # Examples
/// ```
/// use fcgi_web::RequestLimits;
///
/// let limits = RequestLimits {
///     max_body_size: 16 * 1024,
///     ..RequestLimits::default()
/// };
/// # let _ = limits;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLimits {
    /// Upper bound on the bytes read from a `POST` body, regardless of the
    /// announced `CONTENT_LENGTH`.
    pub max_body_size: usize,
}

impl Default for RequestLimits {
    #[inline]
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Turns the blocking accept primitive into a standard iterator of
/// [`Request`] values.
///
/// Two states: active and terminated. Each `next()` blocks in
/// [`FcgiHost::accept`]; a negative status moves the queue to the terminal
/// state (fused — further calls return `None` without touching the host),
/// any other status yields a freshly assembled request. Termination is the
/// normal end of iteration, not an error. This models an unbounded pull loop
/// over external work items, not a finite collection.
///
/// One request is constructed, consumed and discarded per cycle, on one
/// thread; between items the host's output channel is reachable through
/// [`host_mut`](RequestQueue::host_mut).
///
/// # Examples
/// ```no_run
/// use fcgi_web::{FcgiHost, RequestQueue};
/// # struct Runtime;
/// # impl FcgiHost for Runtime {
/// #     fn accept(&mut self) -> i32 { -1 }
/// #     fn lookup(&self, _: &str) -> Option<String> { None }
/// #     fn read_body(&mut self, _: &mut [u8]) -> usize { 0 }
/// #     fn send(&mut self, _: &str) -> std::io::Result<()> { Ok(()) }
/// # }
///
/// let mut queue = RequestQueue::new(Runtime);
///
/// while let Some(request) = queue.next() {
///     let name = request.param("name").unwrap_or("world").to_owned();
///     let _ = queue.host_mut().send(&format!("Hello, {name}!"));
/// }
/// ```
#[derive(Debug)]
pub struct RequestQueue<H: FcgiHost> {
    host: H,
    limits: RequestLimits,
    terminated: bool,
}

impl<H: FcgiHost> RequestQueue<H> {
    /// Creates an active queue over `host` with default limits.
    #[inline]
    pub fn new(host: H) -> Self {
        Self::with_limits(host, RequestLimits::default())
    }

    /// Creates an active queue over `host` with explicit limits.
    #[inline]
    pub fn with_limits(host: H, limits: RequestLimits) -> Self {
        Self {
            host,
            limits,
            terminated: false,
        }
    }

    /// Shared access to the host runtime.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host runtime, e.g. for
    /// [`send`](FcgiHost::send) between work items.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns `true` once the accept stream has signalled end-of-work.
    #[inline]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Consumes the queue and returns the host runtime.
    #[inline]
    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: FcgiHost> Iterator for RequestQueue<H> {
    type Item = Request;

    fn next(&mut self) -> Option<Request> {
        if self.terminated {
            return None;
        }

        let status = self.host.accept();
        if status < 0 {
            debug!(status, "accept stream terminated");
            self.terminated = true;
            return None;
        }

        debug!(status, "accepted unit of work");
        Some(Request::receive(&mut self.host, &self.limits))
    }
}

impl<H: FcgiHost> std::iter::FusedIterator for RequestQueue<H> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::MockHost;

    #[test]
    fn yields_one_request_per_successful_accept() {
        let host = MockHost::new(&[("REQUEST_METHOD", "GET"), ("QUERY_STRING", "n=1")], b"")
            .with_accepts([0, 0, 0, -1]);

        let requests: Vec<_> = RequestQueue::new(host).collect();

        assert_eq!(requests.len(), 3);
        for request in &requests {
            assert_eq!(request.param("n"), Some("1"));
        }
    }

    #[test]
    fn terminates_immediately_on_failed_accept() {
        let host = MockHost::new(&[], b"").with_accepts([-1]);
        let mut queue = RequestQueue::new(host);

        assert!(!queue.is_terminated());
        assert!(queue.next().is_none());
        assert!(queue.is_terminated());
    }

    #[test]
    fn terminal_state_is_fused() {
        let host = MockHost::new(&[("REQUEST_METHOD", "GET")], b"").with_accepts([0, -2]);
        let mut queue = RequestQueue::new(host);

        assert!(queue.next().is_some());
        assert!(queue.next().is_none());

        // No further accept calls reach the host once terminated.
        let accepts_consumed = queue.host().accepts_consumed();
        assert!(queue.next().is_none());
        assert!(queue.next().is_none());
        assert_eq!(queue.host().accepts_consumed(), accepts_consumed);
    }

    #[test]
    fn nonnegative_status_stays_active() {
        let host = MockHost::new(&[("REQUEST_METHOD", "GET")], b"").with_accepts([7, 0, -1]);
        let mut queue = RequestQueue::new(host);

        assert!(queue.next().is_some());
        assert!(!queue.is_terminated());
        assert!(queue.next().is_some());
        assert!(queue.next().is_none());
    }

    #[test]
    fn send_between_work_items() {
        let host = MockHost::new(&[("REQUEST_METHOD", "GET"), ("QUERY_STRING", "name=ada")], b"")
            .with_accepts([0, -1]);
        let mut queue = RequestQueue::new(host);

        while let Some(request) = queue.next() {
            let name = request.param("name").unwrap_or("world").to_owned();
            queue.host_mut().send(&format!("Hello, {name}!")).unwrap();
        }

        assert_eq!(queue.into_host().sent(), ["Hello, ada!"]);
    }
}
