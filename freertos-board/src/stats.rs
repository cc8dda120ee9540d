//! Run-time statistics counter used by the kernel in debug builds.
//!
//! The kernel samples a free-running counter to attribute CPU time to tasks.
//! The counter runs at a fixed rate derived from the core clock, so its
//! increments do not change when the core clock does.

/// Free-running counter for run-time statistics.
pub trait RunTimeCounter: Sync {
  /// Configure and start the counter. Called once by the kernel before the
  /// scheduler starts.
  fn configure(&self);

  /// Current counter value.
  fn count(&self) -> u32;
}

/// Prescaler value for a 16-bit timer divider, so that a timer clocked at
/// `core_clock_hz` counts at `counter_hz`.
///
/// Returns `None` if the rate cannot be reached with a 16-bit divider.
pub const fn prescaler(core_clock_hz: u32, counter_hz: u32) -> Option<u16> {
  if counter_hz == 0 || counter_hz > core_clock_hz {
    return None
  }

  let divider = core_clock_hz / counter_hz;
  if divider - 1 > u16::MAX as u32 {
    return None
  }

  Some((divider - 1) as u16)
}
