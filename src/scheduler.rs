use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::cycle::Cycle;

/// Runs a cycle right away, then again after each `interval` of sleep.
/// The next start is measured from the end of the previous cycle.
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Moves `cycle` onto a named background thread that never returns.
    pub fn spawn(self, cycle: Cycle) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("scheduler".into())
            .spawn(move || {
                self.run(
                    || {
                        cycle.run_once();
                    },
                    None,
                )
            })
    }

    /// Calls `tick` `limit` times, or forever when `limit` is `None`. A
    /// panicking tick is logged and the loop carries on.
    pub fn run(&self, mut tick: impl FnMut(), limit: Option<usize>) {
        let mut runs = 0usize;
        loop {
            if panic::catch_unwind(AssertUnwindSafe(&mut tick)).is_err() {
                tracing::error!("cycle panicked, continuing with next cycle");
            }
            runs += 1;
            if limit.is_some_and(|limit| runs >= limit) {
                return;
            }
            tracing::info!(minutes = self.interval.as_secs() / 60, "sleeping until next cycle");
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_immediately_and_repeats() {
        let mut count = 0;
        Scheduler::new(Duration::ZERO).run(|| count += 1, Some(3));
        assert_eq!(count, 3);
    }

    #[test]
    fn panicking_cycle_does_not_stop_the_loop() {
        let mut count = 0;
        Scheduler::new(Duration::ZERO).run(
            || {
                count += 1;
                if count == 1 {
                    panic!("selector blew up");
                }
            },
            Some(2),
        );
        assert_eq!(count, 2);
    }
}
