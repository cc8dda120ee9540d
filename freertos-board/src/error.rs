use core::fmt;

/// Basic error type for the library.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
  /// The kernel could not allocate the requested task.
  TaskCreationFailed,
  /// The kernel reported success but did not hand out a task handle.
  MissingTaskHandle,
  /// Kernel hooks can only be registered once.
  HooksAlreadyRegistered,
}

impl fmt::Display for BoardError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TaskCreationFailed => f.write_str("task creation failed"),
      Self::MissingTaskHandle => f.write_str("task was created without a handle"),
      Self::HooksAlreadyRegistered => f.write_str("hooks are already registered"),
    }
  }
}
