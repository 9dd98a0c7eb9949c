use std::cell::Cell;

/// Monotonic counter for in-flight searches. Responses are only rendered when
/// their sequence number is still the latest issued, which turns the
/// last-response-wins race into an explicit latest-request-wins rule.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps a new request and invalidates every earlier one.
    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.get() == seq
    }
}
