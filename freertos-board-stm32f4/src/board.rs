use core::sync::atomic::{AtomicU32, Ordering};

use stm32f4xx_hal::{
  gpio::{gpiod::PD, Output, PushPull},
  prelude::*,
  stm32,
};

use freertos_board::{
  config::RUN_TIME_COUNTER_HZ,
  kernel::CorePort,
  port::CortexM,
  signal::{Level, Line, LineSet, OutputLines},
  startup::Board,
  stats::{self, RunTimeCounter},
};

/// User LEDs as push-pull outputs, in the order A..D (PD12..PD15).
pub type LedPins = LineSet<PD<Output<PushPull>>>;

/// The STM32F407 Discovery board.
pub struct DiscoveryBoard {
  rcc: Option<stm32::RCC>,
  gpiod: Option<stm32::GPIOD>,
  run_time_counter: &'static Tim2Counter,
}

impl DiscoveryBoard {
  /// Take the device peripherals. Returns `None` if they were already taken.
  pub fn take(run_time_counter: &'static Tim2Counter) -> Option<Self> {
    let dp = stm32::Peripherals::take()?;

    Some(Self {
      rcc: Some(dp.RCC),
      gpiod: Some(dp.GPIOD),
      run_time_counter,
    })
  }
}

impl Board for DiscoveryBoard {
  type Lines = LedPins;

  fn init_clocks(&mut self) {
    if let Some(rcc) = self.rcc.take() {
      let clocks = rcc.constrain().cfgr.sysclk(168.mhz()).freeze();
      self.run_time_counter.set_core_clock(clocks.sysclk().0);
    }
  }

  fn init_output_lines(&mut self) -> Self::Lines {
    let Some(gpiod) = self.gpiod.take() else {
      log::error!("GPIOD already taken, halting");
      CortexM::new().halt()
    };
    let gpiod = gpiod.split();

    LineSet::new([
      gpiod.pd12.into_push_pull_output().downgrade(),
      gpiod.pd13.into_push_pull_output().downgrade(),
      gpiod.pd14.into_push_pull_output().downgrade(),
      gpiod.pd15.into_push_pull_output().downgrade(),
    ])
  }
}

/// Direct access to the LED lines through the GPIOD set/reset register.
///
/// Only used by the fault handler, once no task runs anymore.
pub struct FaultLines;

impl OutputLines for FaultLines {
  fn drive(&mut self, line: Line, level: Level) {
    // SAFETY: `BSRR` writes are atomic and only touch the bits written.
    let gpiod = unsafe { &*stm32::GPIOD::ptr() };
    gpiod.bsrr.write(|w| unsafe { w.bits(line.bsrr_mask(level)) });
  }
}

/// TIM2 as free-running run-time statistics counter.
pub struct Tim2Counter {
  core_clock_hz: AtomicU32,
}

impl Tim2Counter {
  pub const fn new() -> Self {
    Self { core_clock_hz: AtomicU32::new(16_000_000) }
  }

  fn set_core_clock(&self, hz: u32) {
    self.core_clock_hz.store(hz, Ordering::Relaxed);
  }
}

impl Default for Tim2Counter {
  fn default() -> Self {
    Self::new()
  }
}

impl RunTimeCounter for Tim2Counter {
  fn configure(&self) {
    let core_clock_hz = self.core_clock_hz.load(Ordering::Relaxed);
    let Some(psc) = stats::prescaler(core_clock_hz, RUN_TIME_COUNTER_HZ) else {
      log::warn!("cannot run statistics counter at {} Hz from {} Hz", RUN_TIME_COUNTER_HZ, core_clock_hz);
      return
    };

    // SAFETY: TIM2 is reserved for the statistics counter.
    let (rcc, tim2) = unsafe { (&*stm32::RCC::ptr(), &*stm32::TIM2::ptr()) };

    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());
    tim2.psc.write(|w| w.psc().bits(psc));
    tim2.cr1.modify(|_, w| w.dir().up().cms().edge_aligned().cen().set_bit());
  }

  fn count(&self) -> u32 {
    // SAFETY: Reading the counter has no side effects.
    unsafe { (*stm32::TIM2::ptr()).cnt.read().bits() }
  }
}
