use core::time::Duration;

use crate::config::TICK_RATE_HZ;

/// Raw tick type.
pub type TickType = u32;

/// `portMAX_DELAY`
pub const MAX_DELAY: TickType = TickType::MAX;

/// Duration in kernel ticks.
///
/// The duration of a single tick depends on `TICK_RATE_HZ`. A [`Duration`]
/// converts seamlessly; anything exceeding [`MAX_DELAY`] ticks saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Ticks {
  ticks: TickType,
}

impl Ticks {
  /// Create `Ticks` from raw ticks.
  pub const fn new(ticks: TickType) -> Self {
    Self { ticks }
  }

  /// Create `Ticks` from milliseconds, like `pdMS_TO_TICKS`.
  pub const fn from_millis(ms: u32) -> Self {
    let ticks = ms as u64 * TICK_RATE_HZ as u64 / 1000;

    if ticks > MAX_DELAY as u64 {
      return Self::new(MAX_DELAY)
    }

    Self::new(ticks as TickType)
  }

  /// Get the raw tick count.
  pub const fn as_ticks(&self) -> TickType {
    self.ticks
  }
}

impl From<Ticks> for TickType {
  fn from(ticks: Ticks) -> Self {
    ticks.ticks
  }
}

impl From<TickType> for Ticks {
  fn from(ticks: TickType) -> Self {
    Self::new(ticks)
  }
}

impl From<Duration> for Ticks {
  fn from(duration: Duration) -> Self {
    let ticks = duration.as_millis() * TICK_RATE_HZ as u128 / 1000;
    Self::new(ticks.try_into().unwrap_or(MAX_DELAY))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duration_max_saturates_to_max_delay() {
    assert_eq!(Ticks::from(Duration::MAX), Ticks::new(MAX_DELAY));
  }

  #[test]
  fn millis_follow_tick_rate() {
    let expected = 200 * TICK_RATE_HZ / 1000;
    assert_eq!(Ticks::from_millis(200).as_ticks(), expected);
    assert_eq!(Ticks::from(Duration::from_millis(200)), Ticks::from_millis(200));
  }

  #[test]
  fn zero_is_non_blocking() {
    assert_eq!(Ticks::from(Duration::ZERO), Ticks::new(0));
  }
}
