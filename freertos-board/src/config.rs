//! Kernel configuration mirrored from `FreeRTOSConfig.h`.
//!
//! These values must agree with the header the kernel is compiled with.

/// `configTICK_RATE_HZ`
pub const TICK_RATE_HZ: u32 = 1000;

/// `configMAX_PRIORITIES`
pub const MAX_PRIORITIES: u8 = 5;

/// `configMAX_TASK_NAME_LEN`, including the terminating NUL.
pub const MAX_TASK_NAME_LEN: usize = 16;

/// `configMINIMAL_STACK_SIZE` in words. Also the idle task's stack size.
pub const MINIMAL_STACK_SIZE: usize = 130;

/// `configTIMER_TASK_STACK_DEPTH` in words.
pub const TIMER_TASK_STACK_DEPTH: usize = MINIMAL_STACK_SIZE * 2;

/// Bytes reserved for a kernel task control block (`StaticTask_t`).
///
/// Must be at least `sizeof(StaticTask_t)` for the configured kernel.
pub const TASK_CONTROL_BLOCK_SIZE: usize = 128;

/// `tskIDLE_PRIORITY`
pub const IDLE_PRIORITY: u8 = 0;

/// Rate of the run-time statistics counter in Hz.
pub const RUN_TIME_COUNTER_HZ: u32 = 10_000;

/// Busy-wait iterations between two frames of the fault blink pattern.
pub const FAULT_BLINK_SPIN: u32 = 100_000;

/// Period of one phase of the signal task in milliseconds.
pub const SIGNAL_QUANTUM_MS: u32 = 200;
