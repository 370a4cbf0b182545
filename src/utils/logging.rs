use log::{Level, log_enabled};
use std::time::Instant;

/// Times one batch over a set of motion states and reports it at trace level.
pub struct BatchTimer<'a> {
    label: &'a str,
    states: usize,
    start: Instant,
}

impl<'a> BatchTimer<'a> {
    pub fn new(label: &'a str, states: usize) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("{label}: {states} motion states");
        }
        Self {
            label,
            states,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for BatchTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            let micros = self.start.elapsed().as_micros();
            let per_state = micros as f64 / self.states.max(1) as f64;
            log::trace!(
                "{} done in {} µs ({:.3} µs per state)",
                self.label,
                micros,
                per_state
            );
        }
    }
}
