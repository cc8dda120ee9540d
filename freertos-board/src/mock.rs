//! Stand-ins for the kernel and the board used by unit tests.

use core::{convert::Infallible, ffi::c_void, ptr};
use std::{
  boxed::Box,
  cell::{Cell, RefCell},
  panic::{self, AssertUnwindSafe},
  string::{String, ToString},
  sync::{atomic::{AtomicUsize, Ordering}, Arc, Mutex},
  vec::Vec,
};

use embedded_hal::digital::v2::OutputPin;

use crate::kernel::{CorePort, Scheduler, TaskBody, TaskCreation, TaskDelay, TaskFunction, TaskHandle, TaskParams, TaskPriority};
use crate::signal::{Level, Line, OutputLines};
use crate::ticks::Ticks;

pub fn leak<T>(value: T) -> &'static mut T {
  Box::leak(Box::new(value))
}

/// A task body the mock scheduler never runs.
pub struct ParkedTask;

impl TaskBody for ParkedTask {
  fn run(&mut self) -> ! {
    unreachable!("the mock scheduler never runs tasks")
  }
}

/// Scheduler stub recording every call.
pub struct MockScheduler {
  pub outcome: TaskCreation,
  pub created: RefCell<Vec<(String, u16, TaskPriority)>>,
  pub deleted: RefCell<Vec<TaskHandle>>,
  pub started: Cell<usize>,
}

impl MockScheduler {
  pub fn new(outcome: TaskCreation) -> Self {
    Self {
      outcome,
      created: RefCell::new(Vec::new()),
      deleted: RefCell::new(Vec::new()),
      started: Cell::new(0),
    }
  }

  pub fn passing() -> Self {
    Self::new(TaskCreation { passed: true, handle: Some(Self::handle()) })
  }

  pub fn handle() -> TaskHandle {
    static TCB: u32 = 0;
    TaskHandle::from_ptr(ptr::addr_of!(TCB).cast_mut().cast()).unwrap()
  }
}

impl Scheduler for MockScheduler {
  fn create_task(&self, _function: TaskFunction, params: &TaskParams<'_>, _arg: *mut c_void) -> TaskCreation {
    self.created.borrow_mut().push((params.name.to_string(), params.stack_depth, params.priority));
    self.outcome
  }

  fn delete_task(&self, task: TaskHandle) {
    self.deleted.borrow_mut().push(task);
  }

  fn start(&self) {
    self.started.set(self.started.get() + 1);
  }
}

/// Panic payload of [`MockCore`] once its busy-wait budget is spent.
#[derive(Debug)]
pub struct Watchdog;

/// Core whose busy-wait is cut short by a watchdog after `budget` calls.
pub struct MockCore {
  budget: usize,
  pub interrupts_disabled: AtomicUsize,
  pub busy_waits: AtomicUsize,
  pub spun: AtomicUsize,
}

impl MockCore {
  pub const fn with_budget(budget: usize) -> Self {
    Self {
      budget,
      interrupts_disabled: AtomicUsize::new(0),
      busy_waits: AtomicUsize::new(0),
      spun: AtomicUsize::new(0),
    }
  }
}

impl CorePort for MockCore {
  fn disable_interrupts(&self) {
    self.interrupts_disabled.fetch_add(1, Ordering::SeqCst);
  }

  fn busy_wait(&self, iterations: u32) {
    if self.busy_waits.fetch_add(1, Ordering::SeqCst) >= self.budget {
      panic::panic_any(Watchdog);
    }
    self.spun.fetch_add(iterations as usize, Ordering::SeqCst);
  }
}

/// Run a diverging call until the mock watchdog fires.
///
/// Fails the test if `f` returns or panics for any other reason.
pub fn run_until_watchdog<R>(f: impl FnOnce() -> R) {
  match panic::catch_unwind(AssertUnwindSafe(f)) {
    Ok(_) => panic!("diverging call returned"),
    Err(payload) => assert!(payload.is::<Watchdog>(), "panicked before the watchdog fired"),
  }
}

/// Output lines recording every write.
#[derive(Clone, Default)]
pub struct RecordingLines {
  pub writes: Arc<Mutex<Vec<(Line, Level)>>>,
}

impl RecordingLines {
  pub fn writes(&self) -> Vec<(Line, Level)> {
    self.writes.lock().unwrap().clone()
  }
}

impl OutputLines for RecordingLines {
  fn drive(&mut self, line: Line, level: Level) {
    self.writes.lock().unwrap().push((line, level));
  }
}

/// Pin recording its level changes, tagged with a pin number.
pub struct MockPin {
  pub pin: u8,
  pub log: Arc<Mutex<Vec<(u8, bool)>>>,
}

impl OutputPin for MockPin {
  type Error = Infallible;

  fn set_low(&mut self) -> Result<(), Self::Error> {
    self.log.lock().unwrap().push((self.pin, false));
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Self::Error> {
    self.log.lock().unwrap().push((self.pin, true));
    Ok(())
  }
}

/// Delay recording each requested suspension.
#[derive(Clone, Default)]
pub struct MockDelay {
  pub delays: Arc<Mutex<Vec<Ticks>>>,
}

impl TaskDelay for MockDelay {
  fn delay(&mut self, ticks: Ticks) {
    self.delays.lock().unwrap().push(ticks);
  }
}
