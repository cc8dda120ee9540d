//! # STM32F407 Discovery firmware
//!
//! Walks a pattern over the four user LEDs (PD12..PD15) from a FreeRTOS task.
//! A failed kernel assertion blinks all LEDs; a stack overflow freezes them.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;

use freertos_board::{
  config::MINIMAL_STACK_SIZE,
  fault::FaultHandler,
  hooks::{Hooks, HOOKS},
  idle::NoopIdle,
  kernel::{CorePort, FreeRtos, TaskBuilder, TaskPriority},
  memory::StaticTaskMemory,
  port::CortexM,
  signal::PeriodicSignalTask,
  startup::{self, Startup},
  stats::RunTimeCounter,
};

mod board;
use board::{DiscoveryBoard, FaultLines, LedPins, Tim2Counter};

static FAULT: FaultHandler<CortexM, FaultLines> = FaultHandler::new(CortexM::new(), FaultLines);
static RUN_TIME_COUNTER: Tim2Counter = Tim2Counter::new();

#[entry]
fn main() -> ! {
  let core = CortexM::new();

  let Some(board) = DiscoveryBoard::take(&RUN_TIME_COUNTER) else {
    core.halt()
  };

  let (startup, leds) = Startup::new(board)
    .bring_up_clocks()
    .configure_output_lines();

  let run_time_counter: Option<&'static dyn RunTimeCounter> = if cfg!(debug_assertions) {
    Some(&RUN_TIME_COUNTER)
  } else {
    None
  };

  let hooks = Hooks {
    task_memory: &StaticTaskMemory,
    idle: &NoopIdle,
    fault: &FAULT,
    stack_overflow: &FAULT,
    run_time_counter,
  };
  let startup = match startup.register_hooks(&HOOKS, hooks) {
    Ok(startup) => startup,
    Err(err) => startup::abort(&core, err),
  };

  let Some(task) = cortex_m::singleton!(
    : PeriodicSignalTask<LedPins, FreeRtos> = PeriodicSignalTask::new(leds, FreeRtos)
  ) else {
    core.halt()
  };

  let builder = TaskBuilder::new()
    .name("led_task")
    .stack_size(MINIMAL_STACK_SIZE as u16)
    .priority(TaskPriority::IDLE.raised().unwrap_or(TaskPriority::IDLE));

  match startup.spawn(&FreeRtos, &builder, task) {
    Ok((startup, _)) => startup.start_scheduler(&FreeRtos, &core),
    Err(err) => startup::abort(&core, err),
  }
}
