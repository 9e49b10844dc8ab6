use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};

use crate::core::SessionFlag;

use super::TaskMonitor;

/// Watchdog configuration.
#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    /// Budget a task may run before it is flagged.
    pub timeout: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
        }
    }
}

/// Passive monitor of the worker's running task.
///
/// Samples the scheduler state on its own thread and logs a single warning
/// when a task overruns its budget. It never cancels or preempts anything;
/// no such primitive exists in this design.
pub struct Watchdog {
    handle: Option<JoinHandle<()>>,
    stop: Sender<()>,
}

impl Watchdog {
    pub fn start(session: SessionFlag, monitor: TaskMonitor, config: WatchdogConfig) -> Self {
        // Zero-capacity channel used purely as a cancellable sleep: the
        // watchdog parks in recv_timeout and wakes immediately when the
        // runtime drops/uses the stop handle at shutdown.
        let (stop, wakeup) = bounded::<()>(0);

        let handle = std::thread::Builder::new()
            .name("gridlock-watchdog".into())
            .spawn(move || watchdog_loop(session, monitor, config.timeout, wakeup))
            .expect("failed to spawn watchdog thread");

        Self {
            handle: Some(handle),
            stop,
        }
    }

    /// Wakes the watchdog and waits for its thread to exit.
    ///
    /// The session must already be invalidated.
    pub fn join(mut self) {
        drop(self.stop);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("watchdog thread panicked");
            }
        }
    }
}

fn watchdog_loop(
    session: SessionFlag,
    monitor: TaskMonitor,
    timeout: Duration,
    wakeup: Receiver<()>,
) {
    // Id of the last task already flagged, so an overlong task produces
    // exactly one warning no matter how long it keeps running.
    let mut flagged: Option<u64> = None;

    while session.is_valid() {
        let nap = match monitor.current() {
            // Idle, or still inside the task we already warned about: nothing
            // can become newly overdue before a full budget elapses.
            None => timeout,
            Some(task) if flagged == Some(task.id) => timeout,

            Some(task) => {
                let elapsed = task.started.elapsed();
                if elapsed >= timeout {
                    log::warn!(
                        "task '{}' has been running for {:.1}s (budget {:.1}s)",
                        task.name,
                        elapsed.as_secs_f32(),
                        timeout.as_secs_f32(),
                    );
                    flagged = Some(task.id);
                    timeout
                } else {
                    // Sleep straight to this task's deadline instead of
                    // polling on a short interval.
                    timeout - elapsed
                }
            }
        };

        match wakeup.recv_timeout(nap) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::{SchedulerConfig, WorkScheduler};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    struct CapturingLogger {
        warnings: Mutex<Vec<String>>,
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        warnings: Mutex::new(Vec::new()),
    };

    // The logger sink is process-global; serialize the tests that read it.
    static SINK_GUARD: Mutex<()> = Mutex::new(());

    impl log::Log for CapturingLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if record.level() == log::Level::Warn {
                self.warnings.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    fn install_logger() {
        // Ignore the error when a second test installs it again.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);
    }

    fn take_warnings() -> Vec<String> {
        std::mem::take(&mut *LOGGER.warnings.lock().unwrap())
    }

    fn run_scenario(
        timeout: Duration,
        tasks: &[(&'static str, Duration)],
        settle: Duration,
    ) -> Vec<String> {
        let _guard = SINK_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        install_logger();
        take_warnings();

        let session = SessionFlag::new();
        let scheduler = WorkScheduler::start(session.clone(), SchedulerConfig::default());
        let watchdog = Watchdog::start(session.clone(), scheduler.monitor(), WatchdogConfig {
            timeout,
        });

        let queue = scheduler.queue();
        for (name, duration) in tasks {
            let duration = *duration;
            queue.submit(*name, move || std::thread::sleep(duration));
        }

        std::thread::sleep(settle);
        session.invalidate();
        watchdog.join();
        scheduler.join();

        take_warnings()
    }

    // Tasks well inside the budget never produce a warning.
    #[test]
    fn fast_tasks_run_silently() {
        let warnings = run_scenario(
            Duration::from_millis(1000),
            &[
                ("a", Duration::from_millis(50)),
                ("b", Duration::from_millis(50)),
            ],
            Duration::from_millis(400),
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    // A task overrunning the budget is flagged exactly once, near the
    // deadline, and still runs to completion.
    #[test]
    fn overlong_task_is_flagged_once() {
        let _guard = SINK_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();
        let done = Arc::new(Mutex::new(None::<Duration>));

        install_logger();
        take_warnings();

        let session = SessionFlag::new();
        let scheduler = WorkScheduler::start(session.clone(), SchedulerConfig::default());
        let watchdog = Watchdog::start(session.clone(), scheduler.monitor(), WatchdogConfig {
            timeout: Duration::from_millis(200),
        });

        let done2 = Arc::clone(&done);
        scheduler.queue().submit("c", move || {
            std::thread::sleep(Duration::from_millis(350));
            *done2.lock().unwrap() = Some(start.elapsed());
        });

        std::thread::sleep(Duration::from_millis(600));
        session.invalidate();
        watchdog.join();
        scheduler.join();

        let warnings = take_warnings();
        assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
        assert!(warnings[0].contains("'c'"));
        assert!(done.lock().unwrap().is_some(), "task never completed");
    }
}
