//! Background work subsystem.
//!
//! One worker thread executes named tasks strictly in submission order; a
//! separate watchdog thread flags (but never interrupts) tasks that exceed a
//! time budget. Both loops poll the shared [`SessionFlag`](crate::core::SessionFlag)
//! and are joined on shutdown.

mod scheduler;
mod watchdog;

pub use scheduler::{RunningTask, SchedulerConfig, TaskMonitor, WorkQueue, WorkScheduler};
pub use watchdog::{Watchdog, WatchdogConfig};
