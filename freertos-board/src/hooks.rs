//! Registration of the application hooks the kernel calls into.
//!
//! The kernel invokes fixed C entry points (see the `ffi` module); these
//! forward to the [`Hooks`] registered once at initialization, before the
//! scheduler is started.

use core::cell::Cell;

use critical_section::Mutex;

use crate::{
  fault::{self, Fault, FaultHook, StackOverflowHook},
  idle::IdleObserver,
  kernel::{CorePort, TaskHandle},
  memory::{KernelTaskRole, StaticTaskMemory, TaskMemory, TaskMemoryProvider},
  stats::RunTimeCounter,
  BoardError,
};

/// The set of capabilities the kernel needs from the application.
#[derive(Clone, Copy)]
pub struct Hooks {
  pub task_memory: &'static dyn TaskMemoryProvider,
  pub idle: &'static dyn IdleObserver,
  pub fault: &'static dyn FaultHook,
  pub stack_overflow: &'static dyn StackOverflowHook,
  pub run_time_counter: Option<&'static dyn RunTimeCounter>,
}

/// Core used to halt on faults arriving before any hooks were registered.
#[cfg(target_arch = "arm")]
const UNHANDLED_FAULT_CORE: &(dyn CorePort + Sync) = &crate::port::CortexM;

#[cfg(not(target_arch = "arm"))]
const UNHANDLED_FAULT_CORE: &(dyn CorePort + Sync) = &HostCore;

/// Hosted builds have no interrupts to mask.
#[cfg(not(target_arch = "arm"))]
struct HostCore;

#[cfg(not(target_arch = "arm"))]
impl CorePort for HostCore {
  fn disable_interrupts(&self) {}

  fn busy_wait(&self, iterations: u32) {
    for _ in 0..iterations {
      core::hint::spin_loop();
    }
  }
}

/// Storage for the registered [`Hooks`].
pub struct HookRegistry {
  hooks: Mutex<Cell<Option<Hooks>>>,
  unhandled: &'static (dyn CorePort + Sync),
}

impl HookRegistry {
  pub const fn new() -> Self {
    Self::with_unhandled_fault_core(UNHANDLED_FAULT_CORE)
  }

  /// A registry halting on `core` for faults raised while no hooks are
  /// registered.
  pub const fn with_unhandled_fault_core(core: &'static (dyn CorePort + Sync)) -> Self {
    Self { hooks: Mutex::new(Cell::new(None)), unhandled: core }
  }

  /// Register `hooks`. Only the first registration succeeds.
  pub fn register(&self, hooks: Hooks) -> Result<(), BoardError> {
    critical_section::with(|cs| {
      let cell = self.hooks.borrow(cs);
      if cell.get().is_some() {
        return Err(BoardError::HooksAlreadyRegistered)
      }

      cell.set(Some(hooks));
      Ok(())
    })
  }

  /// The registered hooks, if any.
  pub fn hooks(&self) -> Option<Hooks> {
    critical_section::with(|cs| self.hooks.borrow(cs).get())
  }

  /// Memory for a kernel task, from the built-in static buffers unless
  /// another provider is registered.
  pub fn task_memory(&self, role: KernelTaskRole) -> TaskMemory {
    match self.hooks() {
      Some(hooks) => hooks.task_memory.task_memory(role),
      None => StaticTaskMemory.task_memory(role),
    }
  }

  pub fn idle(&self) {
    if let Some(hooks) = self.hooks() {
      hooks.idle.on_idle();
    }
  }

  pub fn assertion_failed(&self) -> ! {
    match self.hooks() {
      Some(hooks) => hooks.fault.assertion_failed(),
      None => fault::halt_unhandled(self.unhandled, Fault::Assertion),
    }
  }

  pub fn stack_overflow(&self, task: Option<TaskHandle>, task_name: &str) -> ! {
    match self.hooks() {
      Some(hooks) => hooks.stack_overflow.stack_overflow(task, task_name),
      None => fault::halt_unhandled(self.unhandled, Fault::StackOverflow { task, task_name }),
    }
  }

  pub fn configure_run_time_counter(&self) {
    if let Some(counter) = self.hooks().and_then(|hooks| hooks.run_time_counter) {
      counter.configure();
    }
  }

  pub fn run_time_count(&self) -> u32 {
    self.hooks()
      .and_then(|hooks| hooks.run_time_counter)
      .map(|counter| counter.count())
      .unwrap_or_default()
  }
}

impl Default for HookRegistry {
  fn default() -> Self {
    Self::new()
  }
}

/// The registry the kernel's entry points dispatch to.
pub static HOOKS: HookRegistry = HookRegistry::new();

/// Register the application's hooks with the kernel entry points.
///
/// # Examples
///
/// ```
/// use freertos_board::{hooks::{self, Hooks}, memory::StaticTaskMemory, idle::NoopIdle};
/// # use freertos_board::{fault::{FaultHook, StackOverflowHook}, kernel::TaskHandle};
/// # struct Halt;
/// # impl FaultHook for Halt { fn assertion_failed(&self) -> ! { loop {} } }
/// # impl StackOverflowHook for Halt { fn stack_overflow(&self, _: Option<TaskHandle>, _: &str) -> ! { loop {} } }
/// # static FAULT: Halt = Halt;
///
/// hooks::register(Hooks {
///   task_memory: &StaticTaskMemory,
///   idle: &NoopIdle,
///   fault: &FAULT,
///   stack_overflow: &FAULT,
///   run_time_counter: None,
/// }).unwrap();
/// ```
pub fn register(hooks: Hooks) -> Result<(), BoardError> {
  HOOKS.register(hooks)
}
