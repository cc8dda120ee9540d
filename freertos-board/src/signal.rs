//! Discrete output lines and the periodic task driving them.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::{
  config::SIGNAL_QUANTUM_MS,
  kernel::{TaskBody, TaskDelay},
  ticks::Ticks,
};

/// One of the four status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
  A,
  B,
  C,
  D,
}

impl Line {
  pub const ALL: [Line; 4] = [Line::A, Line::B, Line::C, Line::D];

  /// GPIO pin number of this line within its bank.
  pub const fn pin(self) -> u8 {
    12 + self as u8
  }

  /// Bit to write to a set/reset register (`BSRR`) to drive this line.
  ///
  /// The lower half-word sets pins, the upper half-word resets them.
  pub const fn bsrr_mask(self, level: Level) -> u32 {
    match level {
      Level::High => 1 << self.pin(),
      Level::Low => 1 << (self.pin() + 16),
    }
  }
}

/// Logic level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  High,
  Low,
}

impl Level {
  /// Level for the alternating toggle flag: a set flag resets the lines.
  pub const fn from_toggle(toggle: bool) -> Self {
    if toggle { Level::Low } else { Level::High }
  }
}

/// A set of output lines with a single logical owner.
pub trait OutputLines {
  fn drive(&mut self, line: Line, level: Level);
}

/// Four push-pull pins, indexed by [`Line`].
pub struct LineSet<P> {
  pins: [P; 4],
}

impl<P> LineSet<P>
where
  P: OutputPin<Error = Infallible>,
{
  /// Pins in the order A, B, C, D.
  pub const fn new(pins: [P; 4]) -> Self {
    Self { pins }
  }
}

impl<P> OutputLines for LineSet<P>
where
  P: OutputPin<Error = Infallible>,
{
  fn drive(&mut self, line: Line, level: Level) {
    let pin = &mut self.pins[line as usize];
    let res = match level {
      Level::High => pin.set_high(),
      Level::Low => pin.set_low(),
    };
    res.unwrap_or_else(|never| match never {})
  }
}

/// The four-phase signal pattern.
///
/// Lines are driven in the order D, C, B, A. The toggle flips at the start of
/// every cycle, so consecutive cycles drive opposite levels.
#[derive(Debug, Clone)]
pub struct SignalSequence {
  phase: usize,
  toggle: bool,
}

impl SignalSequence {
  pub const ORDER: [Line; 4] = [Line::D, Line::C, Line::B, Line::A];

  pub const fn new() -> Self {
    Self { phase: 0, toggle: false }
  }

  /// Line and level of the next phase.
  pub fn advance(&mut self) -> (Line, Level) {
    if self.phase == 0 {
      self.toggle = !self.toggle;
    }

    let line = Self::ORDER[self.phase];
    self.phase = (self.phase + 1) % Self::ORDER.len();

    (line, Level::from_toggle(self.toggle))
  }
}

impl Default for SignalSequence {
  fn default() -> Self {
    Self::new()
  }
}

/// Application task stepping through a [`SignalSequence`], sleeping one
/// quantum after every phase.
pub struct PeriodicSignalTask<L, D> {
  lines: L,
  delay: D,
  sequence: SignalSequence,
  quantum: Ticks,
}

impl<L: OutputLines, D: TaskDelay> PeriodicSignalTask<L, D> {
  pub const DEFAULT_QUANTUM: Ticks = Ticks::from_millis(SIGNAL_QUANTUM_MS);

  pub const fn new(lines: L, delay: D) -> Self {
    Self::with_quantum(lines, delay, Self::DEFAULT_QUANTUM)
  }

  pub const fn with_quantum(lines: L, delay: D, quantum: Ticks) -> Self {
    Self { lines, delay, sequence: SignalSequence::new(), quantum }
  }

  /// Drive the next line, then yield to the scheduler for one quantum.
  pub fn step(&mut self) {
    let (line, level) = self.sequence.advance();
    self.lines.drive(line, level);
    self.delay.delay(self.quantum);
  }
}

impl<L, D> TaskBody for PeriodicSignalTask<L, D>
where
  L: OutputLines + Send + 'static,
  D: TaskDelay + Send + 'static,
{
  fn run(&mut self) -> ! {
    loop {
      self.step();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::{sync::{Arc, Mutex}, vec::Vec};

  use crate::mock::{MockDelay, MockPin, RecordingLines};

  #[test]
  fn lines_map_to_pins_12_to_15() {
    assert_eq!(Line::ALL.map(Line::pin), [12, 13, 14, 15]);
  }

  #[test]
  fn bsrr_masks() {
    assert_eq!(Line::A.bsrr_mask(Level::High), 1 << 12);
    assert_eq!(Line::D.bsrr_mask(Level::High), 1 << 15);
    assert_eq!(Line::A.bsrr_mask(Level::Low), 1 << 28);
    assert_eq!(Line::D.bsrr_mask(Level::Low), 1 << 31);
  }

  #[test]
  fn line_set_drives_the_matching_pin() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pins = Line::ALL.map(|line| MockPin { pin: line.pin(), log: log.clone() });
    let mut lines = LineSet::new(pins);

    lines.drive(Line::C, Level::High);
    lines.drive(Line::A, Level::Low);

    assert_eq!(&*log.lock().unwrap(), &[(14, true), (12, false)]);
  }

  #[test]
  fn eight_quanta_walk_d_to_a_twice_with_flipped_polarity() {
    let lines = RecordingLines::default();
    let delay = MockDelay::default();
    let mut task = PeriodicSignalTask::new(lines.clone(), delay.clone());

    for _ in 0..8 {
      task.step();
    }

    use Level::*;
    use Line::*;
    assert_eq!(lines.writes(), [
      (D, Low), (C, Low), (B, Low), (A, Low),
      (D, High), (C, High), (B, High), (A, High),
    ]);
    assert_eq!(&*delay.delays.lock().unwrap(), &[Ticks::from_millis(200); 8]);
  }

  #[test]
  fn every_write_is_followed_by_one_quantum() {
    let lines = RecordingLines::default();
    let delay = MockDelay::default();
    let quantum = Ticks::new(7);
    let mut task = PeriodicSignalTask::with_quantum(lines.clone(), delay.clone(), quantum);

    for step in 1..=5 {
      task.step();
      assert_eq!(lines.writes().len(), step);
      assert_eq!(delay.delays.lock().unwrap().len(), step);
    }
    assert!(delay.delays.lock().unwrap().iter().all(|&d| d == quantum));
  }

  #[test]
  fn sequence_repeats_every_two_cycles() {
    let mut sequence = SignalSequence::new();
    let first: Vec<_> = (0..8).map(|_| sequence.advance()).collect();
    let second: Vec<_> = (0..8).map(|_| sequence.advance()).collect();
    assert_eq!(first, second);
  }
}
