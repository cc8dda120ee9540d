//! Static memory for the kernel's own tasks.
//!
//! With static allocation enabled, the kernel asks the application for the
//! control block and stack of the idle task and the timer (daemon) task when
//! the scheduler starts. It keeps the pointers for the rest of the process
//! lifetime, so the storage must be `'static`.

use core::{
  cell::UnsafeCell,
  mem::{self, MaybeUninit},
  sync::atomic::{AtomicBool, Ordering},
};

use crate::config::{MINIMAL_STACK_SIZE, TASK_CONTROL_BLOCK_SIZE, TIMER_TASK_STACK_DEPTH};

/// Stack word of the port (`StackType_t`).
pub type StackType = usize;

/// Opaque storage for a kernel task control block (`StaticTask_t`).
#[repr(C, align(8))]
pub struct TaskControlBlock {
  _opaque: [u8; TASK_CONTROL_BLOCK_SIZE],
}

/// Kernel-internal task that needs statically provided memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelTaskRole {
  Idle,
  Timer,
}

impl KernelTaskRole {
  /// Configured stack size of the role in words.
  pub const fn stack_words(self) -> usize {
    match self {
      Self::Idle => MINIMAL_STACK_SIZE,
      Self::Timer => TIMER_TASK_STACK_DEPTH,
    }
  }
}

/// Memory handed to the kernel for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMemory {
  pub control_block: *mut TaskControlBlock,
  pub stack: *mut StackType,
  /// Stack size in words, not bytes.
  pub stack_words: u32,
}

/// Control block and stack for a single kernel task.
///
/// A buffer starts out reserved for the application, is handed over to the
/// kernel once, and from then on belongs to the kernel. Handing it over again
/// yields the same pointers; the application must not touch the storage after
/// the first hand-over.
pub struct StaticTaskBuffer<const WORDS: usize> {
  control_block: UnsafeCell<MaybeUninit<TaskControlBlock>>,
  stack: UnsafeCell<[MaybeUninit<StackType>; WORDS]>,
  handed_over: AtomicBool,
}

unsafe impl<const WORDS: usize> Sync for StaticTaskBuffer<WORDS> {}

impl<const WORDS: usize> StaticTaskBuffer<WORDS> {
  const STACK_WORDS: u32 = {
    assert!(WORDS > 0, "a task stack needs at least one word");
    assert!(WORDS <= u32::MAX as usize, "stack size does not fit the kernel's size type");
    WORDS as u32
  };

  /// Size of the stack storage in bytes.
  pub const STACK_BYTES: usize = WORDS * mem::size_of::<StackType>();

  pub const fn new() -> Self {
    Self {
      control_block: UnsafeCell::new(MaybeUninit::uninit()),
      stack: UnsafeCell::new([const { MaybeUninit::uninit() }; WORDS]),
      handed_over: AtomicBool::new(false),
    }
  }

  /// Give the kernel pointers to this buffer.
  ///
  /// Requires a `'static` buffer, since the kernel retains the pointers.
  pub fn hand_over(&'static self) -> TaskMemory {
    if !self.handed_over.swap(true, Ordering::AcqRel) {
      log::debug!("handing {} stack words to the kernel", WORDS);
    }

    TaskMemory {
      control_block: self.control_block.get().cast(),
      stack: self.stack.get().cast(),
      stack_words: Self::STACK_WORDS,
    }
  }

  /// Whether the kernel owns this buffer.
  pub fn is_handed_over(&self) -> bool {
    self.handed_over.load(Ordering::Acquire)
  }
}

impl<const WORDS: usize> Default for StaticTaskBuffer<WORDS> {
  fn default() -> Self {
    Self::new()
  }
}

static IDLE_TASK_MEMORY: StaticTaskBuffer<MINIMAL_STACK_SIZE> = StaticTaskBuffer::new();
static TIMER_TASK_MEMORY: StaticTaskBuffer<TIMER_TASK_STACK_DEPTH> = StaticTaskBuffer::new();

/// Supplies memory for the kernel's idle and timer tasks.
pub trait TaskMemoryProvider: Sync {
  fn task_memory(&self, role: KernelTaskRole) -> TaskMemory;
}

/// The default provider: one process-wide buffer per role.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTaskMemory;

impl StaticTaskMemory {
  /// Whether the kernel has already claimed the buffer for `role`.
  pub fn is_handed_over(role: KernelTaskRole) -> bool {
    match role {
      KernelTaskRole::Idle => IDLE_TASK_MEMORY.is_handed_over(),
      KernelTaskRole::Timer => TIMER_TASK_MEMORY.is_handed_over(),
    }
  }
}

impl TaskMemoryProvider for StaticTaskMemory {
  fn task_memory(&self, role: KernelTaskRole) -> TaskMemory {
    match role {
      KernelTaskRole::Idle => IDLE_TASK_MEMORY.hand_over(),
      KernelTaskRole::Timer => TIMER_TASK_MEMORY.hand_over(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stack_size_matches_configured_role() {
    for role in [KernelTaskRole::Idle, KernelTaskRole::Timer] {
      let memory = StaticTaskMemory.task_memory(role);
      assert_eq!(memory.stack_words as usize, role.stack_words());
      assert!(!memory.control_block.is_null());
      assert!(!memory.stack.is_null());
      assert!(StaticTaskMemory::is_handed_over(role));
    }
  }

  #[test]
  fn repeated_requests_return_the_same_storage() {
    for role in [KernelTaskRole::Idle, KernelTaskRole::Timer] {
      assert_eq!(StaticTaskMemory.task_memory(role), StaticTaskMemory.task_memory(role));
    }
  }

  #[test]
  fn roles_do_not_share_storage() {
    let idle = StaticTaskMemory.task_memory(KernelTaskRole::Idle);
    let timer = StaticTaskMemory.task_memory(KernelTaskRole::Timer);
    assert_ne!(idle.control_block, timer.control_block);
    assert_ne!(idle.stack, timer.stack);
  }

  #[test]
  fn hand_over_is_recorded_once() {
    static BUFFER: StaticTaskBuffer<16> = StaticTaskBuffer::new();

    assert!(!BUFFER.is_handed_over());
    let first = BUFFER.hand_over();
    assert!(BUFFER.is_handed_over());
    assert_eq!(BUFFER.hand_over(), first);
  }

  #[test]
  fn whole_declared_stack_is_writable() {
    static BUFFER: StaticTaskBuffer<64> = StaticTaskBuffer::new();

    let memory = BUFFER.hand_over();
    assert_eq!(memory.stack_words as usize * mem::size_of::<StackType>(), StaticTaskBuffer::<64>::STACK_BYTES);
    assert_eq!(mem::size_of_val(&BUFFER.stack), StaticTaskBuffer::<64>::STACK_BYTES);

    for i in 0..memory.stack_words as usize {
      unsafe { memory.stack.add(i).write(0xa5a5_0000 + i) };
    }
    for i in 0..memory.stack_words as usize {
      assert_eq!(unsafe { memory.stack.add(i).read() }, 0xa5a5_0000 + i);
    }
  }

  #[test]
  fn control_block_is_large_and_aligned() {
    let memory = StaticTaskMemory.task_memory(KernelTaskRole::Idle);
    assert_eq!(memory.control_block as usize % mem::align_of::<TaskControlBlock>(), 0);
    assert_eq!(mem::size_of::<TaskControlBlock>(), TASK_CONTROL_BLOCK_SIZE);
  }
}
