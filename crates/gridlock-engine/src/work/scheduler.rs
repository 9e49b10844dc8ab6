use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};

use crate::core::SessionFlag;

/// How often the idle worker rechecks session validity while waiting for
/// work. Only affects shutdown latency, not task latency.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Task queue capacity. When full, `submit` blocks the producer rather
    /// than dropping work, so overload shows up at the producer instead of as
    /// silently lost tasks.
    pub capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

struct Task {
    name: String,
    job: Box<dyn FnOnce() + Send + 'static>,
}

/// Snapshot of the task the worker is currently executing.
#[derive(Debug, Clone)]
pub struct RunningTask {
    /// Diagnostic label given at submission.
    pub name: String,
    /// When the worker picked the task up.
    pub started: Instant,
    /// Monotonic id; lets the watchdog warn once per task rather than once
    /// per sample.
    pub id: u64,
}

type RunningSlot = Arc<Mutex<Option<RunningTask>>>;

/// Read-only view of the scheduler's running-task slot, handed to the
/// watchdog. Written only by the worker thread.
#[derive(Debug, Clone)]
pub struct TaskMonitor {
    running: RunningSlot,
}

impl TaskMonitor {
    pub fn current(&self) -> Option<RunningTask> {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Cloneable producer handle; `submit` is the only operation.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    sender: Sender<Task>,
}

impl WorkQueue {
    /// Enqueues a named task, blocking while the queue is full.
    ///
    /// Tasks run on the single worker thread, strictly in submission order,
    /// never concurrently with each other. Submissions after shutdown are
    /// dropped with a debug log; by then nothing would run them anyway.
    pub fn submit(&self, name: impl Into<String>, job: impl FnOnce() + Send + 'static) {
        let task = Task {
            name: name.into(),
            job: Box::new(job),
        };
        if let Err(err) = self.sender.send(task) {
            log::debug!("task '{}' submitted after shutdown; dropped", err.0.name);
        }
    }
}

/// Owns the worker thread draining the bounded task queue.
///
/// Serial execution is a hard guarantee: task bodies may touch the command
/// queue and other state that is not designed for concurrent tasks, so their
/// side effects must stay linearizable.
pub struct WorkScheduler {
    queue: WorkQueue,
    running: RunningSlot,
    worker: Option<JoinHandle<()>>,
}

impl WorkScheduler {
    /// Spawns the worker thread.
    pub fn start(session: SessionFlag, config: SchedulerConfig) -> Self {
        let (sender, receiver) = bounded::<Task>(config.capacity);
        let running: RunningSlot = Arc::new(Mutex::new(None));

        let worker_running = Arc::clone(&running);
        let worker = std::thread::Builder::new()
            .name("gridlock-worker".into())
            .spawn(move || worker_loop(session, receiver, worker_running))
            .expect("failed to spawn worker thread");

        Self {
            queue: WorkQueue { sender },
            running,
            worker: Some(worker),
        }
    }

    /// Producer handle; clone freely across threads.
    pub fn queue(&self) -> WorkQueue {
        self.queue.clone()
    }

    /// Watchdog-facing view of the running task.
    pub fn monitor(&self) -> TaskMonitor {
        TaskMonitor {
            running: Arc::clone(&self.running),
        }
    }

    /// Waits for the worker thread to exit.
    ///
    /// The session must already be invalidated, otherwise this blocks until
    /// it is.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("worker thread panicked outside a task body");
            }
        }
    }
}

fn worker_loop(session: SessionFlag, receiver: Receiver<Task>, running: RunningSlot) {
    let mut next_id: u64 = 0;

    while session.is_valid() {
        let task = match receiver.recv_timeout(IDLE_POLL) {
            Ok(task) => task,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let id = next_id;
        next_id += 1;

        *running.lock().unwrap_or_else(PoisonError::into_inner) = Some(RunningTask {
            name: task.name.clone(),
            started: Instant::now(),
            id,
        });

        // A panicking task must not take the worker thread down with it:
        // every later submission would silently never run.
        if let Err(panic) = catch_unwind(AssertUnwindSafe(task.job)) {
            let msg = panic_message(&panic);
            log::error!("task '{}' panicked: {msg}", task.name);
        }

        *running.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scheduler() -> (SessionFlag, WorkScheduler) {
        let session = SessionFlag::new();
        let scheduler = WorkScheduler::start(session.clone(), SchedulerConfig::default());
        (session, scheduler)
    }

    fn drain(session: SessionFlag, scheduler: WorkScheduler) {
        // Give queued tasks a moment, then shut the worker down.
        std::thread::sleep(Duration::from_millis(300));
        session.invalidate();
        scheduler.join();
    }

    #[test]
    fn tasks_complete_in_submission_order() {
        let (session, scheduler) = scheduler();
        let queue = scheduler.queue();

        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["a", "b", "c", "d"] {
            let order = Arc::clone(&order);
            queue.submit(label, move || {
                order.lock().unwrap().push(label);
            });
        }

        drain(session, scheduler);
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn earlier_task_completes_before_later_task_starts() {
        let (session, scheduler) = scheduler();
        let queue = scheduler.queue();

        let first_done = Arc::new(AtomicUsize::new(0));

        let flag = Arc::clone(&first_done);
        queue.submit("slow", move || {
            std::thread::sleep(Duration::from_millis(50));
            flag.store(1, Ordering::SeqCst);
        });

        let flag = Arc::clone(&first_done);
        let overlap = Arc::new(AtomicUsize::new(0));
        let overlap2 = Arc::clone(&overlap);
        queue.submit("second", move || {
            // Serial execution: the first task must already be done.
            overlap2.store(flag.load(Ordering::SeqCst), Ordering::SeqCst);
        });

        drain(session, scheduler);
        assert_eq!(overlap.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_task_does_not_stall_the_worker() {
        let (session, scheduler) = scheduler();
        let queue = scheduler.queue();

        queue.submit("exploder", || panic!("boom"));

        let ran = Arc::new(AtomicUsize::new(0));
        let ran2 = Arc::clone(&ran);
        queue.submit("survivor", move || {
            ran2.store(1, Ordering::SeqCst);
        });

        drain(session, scheduler);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn full_queue_blocks_the_producer_until_the_worker_drains() {
        let session = SessionFlag::new();
        let scheduler = WorkScheduler::start(session.clone(), SchedulerConfig { capacity: 1 });
        let queue = scheduler.queue();

        // Park the worker on a task so nothing drains behind it.
        let (gate_tx, gate_rx) = bounded::<()>(0);
        queue.submit("parked", move || {
            let _ = gate_rx.recv();
        });

        let completed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completed);
        queue.submit("fills-slot", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // The single queue slot is occupied, so this submission must block
        // instead of dropping the task.
        let submitted = Arc::new(AtomicUsize::new(0));
        let producer = {
            let queue = queue.clone();
            let submitted = Arc::clone(&submitted);
            let counter = Arc::clone(&completed);
            std::thread::spawn(move || {
                queue.submit("overflow", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
                submitted.store(1, Ordering::SeqCst);
            })
        };

        std::thread::sleep(Duration::from_millis(150));
        assert_eq!(submitted.load(Ordering::SeqCst), 0);

        gate_tx.send(()).unwrap();
        producer.join().unwrap();
        assert_eq!(submitted.load(Ordering::SeqCst), 1);

        drain(session, scheduler);
        assert_eq!(completed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn monitor_sees_running_task_then_clears() {
        let (session, scheduler) = scheduler();
        let queue = scheduler.queue();
        let monitor = scheduler.monitor();

        queue.submit("nap", || std::thread::sleep(Duration::from_millis(150)));

        std::thread::sleep(Duration::from_millis(50));
        let seen = monitor.current().expect("task should be running");
        assert_eq!(seen.name, "nap");

        std::thread::sleep(Duration::from_millis(200));
        assert!(monitor.current().is_none());

        session.invalidate();
        scheduler.join();
    }
}
