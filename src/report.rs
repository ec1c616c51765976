//! How query failures reach the test that issued the query.

use std::cell::RefCell;

/// The calling test, as seen by queries.
pub trait Reporter {
    /// Marks the test failed and lets it keep running.
    fn fail(&self, message: &str);

    /// Marks the test failed and stops it.
    fn fail_now(&self, message: &str) -> !;
}

/// A [`Reporter`] for Rust's test harness.
///
/// Soft failures are collected in order; `fail_now` panics, which ends the
/// current `#[test]`. Call [`Assertions::finish`] at the end of a test to turn
/// collected failures into a panic.
#[derive(Debug, Default)]
pub struct Assertions {
    failures: RefCell<Vec<String>>,
}

impl Assertions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    pub fn finish(self) {
        let failures = self.failures.into_inner();
        if !failures.is_empty() {
            panic!(
                "{} assertion(s) failed:\n  {}",
                failures.len(),
                failures.join("\n  ")
            );
        }
    }
}

impl Reporter for Assertions {
    fn fail(&self, message: &str) {
        tracing::warn!(%message, "assertion failed");
        self.failures.borrow_mut().push(message.to_string());
    }

    fn fail_now(&self, message: &str) -> ! {
        self.failures.borrow_mut().push(message.to_string());
        panic!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reporter_has_not_failed() {
        let assertions = Assertions::new();
        assert!(!assertions.failed());
        assert!(assertions.failures().is_empty());
        assertions.finish();
    }

    #[test]
    fn test_fail_records_in_order() {
        let assertions = Assertions::new();
        assertions.fail("first");
        assertions.fail("second");

        assert!(assertions.failed());
        assert_eq!(assertions.failures(), vec!["first", "second"]);
    }

    #[test]
    #[should_panic(expected = "2 assertion(s) failed")]
    fn test_finish_panics_with_recorded_failures() {
        let assertions = Assertions::new();
        assertions.fail("first");
        assertions.fail("second");
        assertions.finish();
    }

    #[test]
    #[should_panic(expected = "state is malformed")]
    fn test_fail_now_panics() {
        let assertions = Assertions::new();
        assertions.fail_now("state is malformed");
    }
}
