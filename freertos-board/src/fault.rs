//! Terminal fault state.
//!
//! Failed kernel assertions and detected stack overflows end here. Entering
//! the fault state masks interrupts, so neither the scheduler nor its tick are
//! available afterwards: the handler busy-waits and never returns. Only an
//! external reset leaves it.

use core::{
  cell::UnsafeCell,
  fmt,
  sync::atomic::{AtomicBool, Ordering},
};

use crate::{
  config::FAULT_BLINK_SPIN,
  kernel::{CorePort, TaskHandle},
  signal::{Level, Line, OutputLines},
};

/// Hook for failed kernel assertions (`configASSERT`).
pub trait FaultHook: Sync {
  fn assertion_failed(&self) -> !;
}

/// Hook for a task stack overflow detected by the kernel.
pub trait StackOverflowHook: Sync {
  fn stack_overflow(&self, task: Option<TaskHandle>, task_name: &str) -> !;
}

/// Unrecoverable condition reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault<'a> {
  Assertion,
  StackOverflow { task: Option<TaskHandle>, task_name: &'a str },
}

impl Fault<'_> {
  /// What an observer sees on the output lines.
  pub const fn signature(&self) -> Signature {
    match self {
      Self::Assertion => Signature::Blink,
      Self::StackOverflow { .. } => Signature::Freeze,
    }
  }
}

impl fmt::Display for Fault<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Assertion => f.write_str("kernel assertion failed"),
      Self::StackOverflow { task_name, .. } if !task_name.is_empty() => {
        write!(f, "task '{}' has overflowed its stack", task_name)
      },
      Self::StackOverflow { task: Some(task), .. } => write!(f, "task {:?} has overflowed its stack", task),
      Self::StackOverflow { task: None, .. } => f.write_str("unknown task has overflowed its stack"),
    }
  }
}

/// Diagnostic pattern shown while faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
  /// All lines blink in unison.
  Blink,
  /// Lines keep their last state.
  Freeze,
}

/// Whether the system is still running or has faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
  Running,
  Faulted,
}

/// Terminal fault handler driving the output lines with a busy-wait loop.
///
/// The lines are normally owned by an application task. Entering the fault
/// state masks interrupts first, so no task runs anymore and the handler is
/// the only one driving them.
pub struct FaultHandler<C, L> {
  core: C,
  lines: UnsafeCell<L>,
  faulted: AtomicBool,
}

// SAFETY: `lines` is only accessed by the first caller of `enter`, after
// interrupts are masked, and never again by anyone else.
unsafe impl<C: Sync, L: Send> Sync for FaultHandler<C, L> {}

impl<C: CorePort, L: OutputLines> FaultHandler<C, L> {
  pub const fn new(core: C, lines: L) -> Self {
    Self {
      core,
      lines: UnsafeCell::new(lines),
      faulted: AtomicBool::new(false),
    }
  }

  pub fn state(&self) -> SystemState {
    if self.faulted.load(Ordering::Acquire) {
      SystemState::Faulted
    } else {
      SystemState::Running
    }
  }

  /// Enter the fault state. Never returns.
  ///
  /// A fault raised while already faulted halts without touching the lines.
  pub fn enter(&self, fault: Fault<'_>) -> ! {
    self.core.disable_interrupts();

    if self.faulted.swap(true, Ordering::AcqRel) {
      self.core.halt()
    }

    log::error!("{}, halting", fault);

    // SAFETY: Only the first fault gets here and interrupts are masked.
    let lines = unsafe { &mut *self.lines.get() };

    match fault.signature() {
      Signature::Blink => self.blink(lines),
      Signature::Freeze => self.core.halt(),
    }
  }

  fn blink(&self, lines: &mut L) -> ! {
    let mut toggle = false;
    loop {
      toggle = !toggle;
      for line in Line::ALL {
        lines.drive(line, Level::from_toggle(toggle));
      }
      self.core.busy_wait(FAULT_BLINK_SPIN);
    }
  }
}

impl<C, L> FaultHook for FaultHandler<C, L>
where
  C: CorePort + Sync,
  L: OutputLines + Send,
{
  fn assertion_failed(&self) -> ! {
    self.enter(Fault::Assertion)
  }
}

impl<C, L> StackOverflowHook for FaultHandler<C, L>
where
  C: CorePort + Sync,
  L: OutputLines + Send,
{
  fn stack_overflow(&self, task: Option<TaskHandle>, task_name: &str) -> ! {
    self.enter(Fault::StackOverflow { task, task_name })
  }
}

/// Mask interrupts and halt on a fault no handler was registered for.
///
/// No pattern is shown, but the scheduler stops just like in the fault state.
pub fn halt_unhandled(core: &dyn CorePort, fault: Fault<'_>) -> ! {
  core.disable_interrupts();
  log::error!("unhandled fault: {}, halting", fault);
  core.halt()
}
