use core::fmt;

use crate::config::{IDLE_PRIORITY, MAX_PRIORITIES};

/// Task execution priority.
///
/// Low priority numbers denote low priority tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskPriority {
  priority: u8,
}

impl TaskPriority {
  /// Priority of the kernel's idle task.
  pub const IDLE: Self = Self { priority: IDLE_PRIORITY };

  /// Create a new `TaskPriority`.
  ///
  /// Returns `None` if `priority` is greater or equal to `MAX_PRIORITIES`.
  pub const fn new(priority: u8) -> Option<Self> {
    if priority >= MAX_PRIORITIES {
      return None
    }

    Some(Self { priority })
  }

  /// The priority directly above this one, if it exists.
  pub const fn raised(self) -> Option<Self> {
    Self::new(self.priority + 1)
  }

  /// The raw priority as passed to the kernel.
  pub const fn to_freertos(self) -> u32 {
    self.priority as u32
  }
}

impl fmt::Display for TaskPriority {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.priority.fmt(f)
  }
}

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct PriorityOverflow;

impl TryFrom<u8> for TaskPriority {
  type Error = PriorityOverflow;

  fn try_from(priority: u8) -> Result<Self, Self::Error> {
    Self::new(priority).ok_or(PriorityOverflow)
  }
}
