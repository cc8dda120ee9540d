//! Cortex-M core operations.

use cortex_m::{asm, interrupt};

use crate::kernel::CorePort;

/// The Cortex-M processor core.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct CortexM;

impl CortexM {
  pub const fn new() -> Self {
    Self
  }
}

impl CorePort for CortexM {
  #[inline(always)]
  fn disable_interrupts(&self) {
    interrupt::disable()
  }

  #[inline(never)]
  fn busy_wait(&self, iterations: u32) {
    for _ in 0..iterations {
      asm::nop();
    }
  }
}
