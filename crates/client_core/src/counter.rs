use std::time::{Duration, Instant};

/// How long the changed-value emphasis stays on before reverting.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// View-model for the hope counter: the last displayed value plus the
/// highlight window armed when that value changes. A fetch that never
/// arrives leaves the displayed value untouched.
#[derive(Debug, Default)]
pub struct CounterView {
    value: Option<u64>,
    highlight_until: Option<Instant>,
}

impl CounterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }

    /// Applies a freshly observed counter value. A repeated value is a
    /// no-op; a changed value updates the display and re-arms the
    /// highlight. Returns whether the display changed.
    pub fn set_count(&mut self, value: u64, now: Instant) -> bool {
        if self.value == Some(value) {
            return false;
        }
        self.value = Some(value);
        self.highlight_until = Some(now + HIGHLIGHT_DURATION);
        true
    }

    pub fn is_highlighted(&self, now: Instant) -> bool {
        self.highlight_until.is_some_and(|until| now < until)
    }

    pub fn display_text(&self) -> String {
        match self.value {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/counter_tests.rs"]
mod tests;
