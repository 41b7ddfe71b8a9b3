//! Injectable message sink for geometry diagnostics.
//!
//! Hull construction reports degenerate inputs and failures here instead of
//! to a process-wide handler. The default sink discards everything.

/// Receiver for diagnostics emitted while building geometry.
pub trait MessageSink {
    fn notice(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards all messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl MessageSink for NoopSink {
    #[inline]
    fn notice(&self, _message: &str) {}
    #[inline]
    fn error(&self, _message: &str) {}
}

/// Forwards notices at `debug` and errors at `warn` to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn notice(&self, message: &str) {
        tracing::debug!(target: "geodetic::geometry", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "geodetic::geometry", "{message}");
    }
}
