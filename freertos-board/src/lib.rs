//! # FreeRTOS board support
//!
//! Integration layer between a FreeRTOS application and the kernel, for
//! kernels built with static allocation of their own tasks.
//!
//! - [`memory`] provides the control blocks and stacks of the kernel's idle and
//!   timer tasks from static storage, so no allocator is needed for them.
//! - [`fault`] is the terminal state entered on failed kernel assertions and
//!   stack overflows: interrupts are masked and the output lines show a
//!   diagnostic pattern until the device is reset.
//! - [`idle`] holds the observer run on every idle task pass.
//! - [`signal`] is a periodic application task walking a pattern over four
//!   output lines.
//! - [`startup`] orders hardware bring-up, hook registration, task creation and
//!   the start of the scheduler.
//!
//! The kernel is reached through the traits in [`kernel`]. With the `freertos`
//! feature, [`kernel::FreeRtos`] implements them and the C entry points the
//! kernel expects are exported, forwarding to the hooks registered with
//! [`hooks::register`].
//!
//! # Examples
//!
//! ```ignore
//! use freertos_board::{
//!   hooks::{Hooks, HOOKS},
//!   idle::NoopIdle,
//!   kernel::{CorePort, FreeRtos, TaskBuilder},
//!   memory::StaticTaskMemory,
//!   port::CortexM,
//!   signal::PeriodicSignalTask,
//!   startup::{self, Startup},
//! };
//!
//! // `board`, its `Lines` and the `FAULT` handler come from the board crate.
//! let core = CortexM::new();
//! let hooks = Hooks {
//!   task_memory: &StaticTaskMemory,
//!   idle: &NoopIdle,
//!   fault: &FAULT,
//!   stack_overflow: &FAULT,
//!   run_time_counter: None,
//! };
//!
//! let (startup, lines) = Startup::new(board).bring_up_clocks().configure_output_lines();
//! let startup = match startup.register_hooks(&HOOKS, hooks) {
//!   Ok(startup) => startup,
//!   Err(err) => startup::abort(&core, err),
//! };
//!
//! let Some(task) = cortex_m::singleton!(
//!   : PeriodicSignalTask<Lines, FreeRtos> = PeriodicSignalTask::new(lines, FreeRtos)
//! ) else {
//!   core.halt()
//! };
//!
//! match startup.spawn(&FreeRtos, &TaskBuilder::new().name("led_task"), task) {
//!   Ok((startup, _)) => startup.start_scheduler(&FreeRtos, &core),
//!   Err(err) => startup::abort(&core, err),
//! }
//! ```
#![cfg_attr(not(test), no_std)]

mod error;
pub use crate::error::BoardError;

pub mod config;
pub mod fault;
pub mod hooks;
pub mod idle;
pub mod kernel;
pub mod memory;
pub mod signal;
pub mod startup;
pub mod stats;
mod ticks;
pub use crate::ticks::{Ticks, TickType, MAX_DELAY};

#[cfg(feature = "freertos")]
pub mod ffi;

#[cfg(target_arch = "arm")]
pub mod port;

#[cfg(test)]
mod mock;
