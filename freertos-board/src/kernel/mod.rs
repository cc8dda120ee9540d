//! Touchpoints of the external FreeRTOS kernel.
//!
//! The kernel is a collaborator this crate does not control: it is reached
//! through [`Scheduler`] and [`TaskDelay`], and the processor core through
//! [`CorePort`]. With the `freertos` feature, [`FreeRtos`] implements these
//! against the real kernel.

use core::ffi::c_void;

use crate::ticks::Ticks;

mod builder;
pub use builder::TaskBuilder;
mod handle;
pub use handle::{RawTaskHandle, TaskHandle};
mod name;
pub use name::{name_from_ptr, TaskName};
mod priority;
pub use priority::{PriorityOverflow, TaskPriority};

#[cfg(feature = "freertos")]
mod freertos;
#[cfg(feature = "freertos")]
pub use freertos::FreeRtos;

/// Entry point of a kernel task (`TaskFunction_t`).
pub type TaskFunction = extern "C" fn(*mut c_void);

/// Parameters for creating an application task.
#[derive(Debug, Clone, Copy)]
pub struct TaskParams<'n> {
  pub name: &'n str,
  /// Stack depth in words.
  pub stack_depth: u16,
  pub priority: TaskPriority,
}

/// Result of a task creation request, as reported by the kernel.
///
/// The kernel returns a status and, through an out-parameter, a handle.
/// Both are kept so that a partially created task can be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCreation {
  pub passed: bool,
  pub handle: Option<TaskHandle>,
}

/// Application-facing scheduler operations.
pub trait Scheduler {
  /// Register a new task with the kernel.
  fn create_task(&self, function: TaskFunction, params: &TaskParams<'_>, arg: *mut c_void) -> TaskCreation;

  /// Release a task and its kernel resources.
  fn delete_task(&self, task: TaskHandle);

  /// Hand control to the scheduler.
  ///
  /// Only returns if the kernel could not start, e.g. because the idle or
  /// timer task could not be created.
  fn start(&self);
}

/// Timed suspension of the calling task.
pub trait TaskDelay {
  /// Block the calling task for at least `ticks`.
  fn delay(&mut self, ticks: Ticks);
}

/// Processor core operations that do not depend on the scheduler.
///
/// Interrupts cannot be re-enabled through this trait.
pub trait CorePort {
  /// Mask all interrupts, which also stops preemption.
  fn disable_interrupts(&self);

  /// Spin for roughly `iterations` loop iterations without suspending.
  fn busy_wait(&self, iterations: u32);

  /// Spin forever.
  fn halt(&self) -> ! {
    loop {
      self.busy_wait(u32::MAX);
    }
  }
}

/// The body of an application task.
///
/// Bodies live in static memory so the kernel can run them for the rest of
/// the process lifetime.
pub trait TaskBody: Send + 'static {
  fn run(&mut self) -> !;
}

pub(crate) extern "C" fn task_function<T: TaskBody>(arg: *mut c_void) {
  // SAFETY: `arg` is the `&'static mut T` handed to `TaskBuilder::spawn`,
  // which the kernel passes to exactly one task.
  let body = unsafe { &mut *arg.cast::<T>() };
  body.run()
}
