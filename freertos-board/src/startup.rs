//! Ordered bring-up of the board up to the start of the scheduler.
//!
//! [`Startup`] only offers the next step once the previous one completed:
//! clocks, then output lines, then hooks and tasks, then the scheduler.

use core::marker::PhantomData;

use crate::{
  hooks::{HookRegistry, Hooks},
  kernel::{CorePort, Scheduler, TaskBody, TaskBuilder, TaskHandle},
  signal::OutputLines,
  BoardError,
};

/// Hardware bring-up steps of a board.
pub trait Board {
  type Lines: OutputLines;

  /// Clock, PLL and flash configuration. Runs before any peripheral access.
  fn init_clocks(&mut self);

  /// Configure the output line hardware and hand out the lines.
  fn init_output_lines(&mut self) -> Self::Lines;
}

/// Nothing is initialized.
pub struct PowerOn;
/// Core clocks are running.
pub struct ClocksReady;
/// Output lines can be driven; hooks and tasks may be registered.
pub struct LinesReady;
/// Application tasks are registered with the kernel.
pub struct TasksReady;

/// Startup sequence of board `B` in state `S`.
pub struct Startup<B, S> {
  board: B,
  _state: PhantomData<S>,
}

impl<B, S> Startup<B, S> {
  fn into_state<T>(self) -> Startup<B, T> {
    Startup { board: self.board, _state: PhantomData }
  }
}

impl<B: Board> Startup<B, PowerOn> {
  pub const fn new(board: B) -> Self {
    Startup { board, _state: PhantomData }
  }

  pub fn bring_up_clocks(mut self) -> Startup<B, ClocksReady> {
    self.board.init_clocks();
    log::info!("clocks ready");
    self.into_state()
  }
}

impl<B: Board> Startup<B, ClocksReady> {
  pub fn configure_output_lines(mut self) -> (Startup<B, LinesReady>, B::Lines) {
    let lines = self.board.init_output_lines();
    log::info!("output lines ready");
    (self.into_state(), lines)
  }
}

impl<B: Board> Startup<B, LinesReady> {
  /// Register the kernel hooks. The fault hooks may drive the output lines
  /// from here on.
  pub fn register_hooks(self, registry: &HookRegistry, hooks: Hooks) -> Result<Self, BoardError> {
    registry.register(hooks)?;
    Ok(self)
  }

  /// Create the application task. On failure the scheduler must not be
  /// started; see [`abort`].
  pub fn spawn<S, T>(
    self,
    scheduler: &S,
    builder: &TaskBuilder<'_>,
    body: &'static mut T,
  ) -> Result<(Startup<B, TasksReady>, TaskHandle), BoardError>
  where
    S: Scheduler + ?Sized,
    T: TaskBody,
  {
    let handle = builder.spawn(scheduler, body)?;
    Ok((self.into_state(), handle))
  }
}

impl<B: Board> Startup<B, TasksReady> {
  /// Hand control to the scheduler.
  ///
  /// If the kernel returns, it failed to start and the core halts.
  pub fn start_scheduler<S, C>(self, scheduler: &S, core: &C) -> !
  where
    S: Scheduler + ?Sized,
    C: CorePort + ?Sized,
  {
    log::info!("starting scheduler");
    scheduler.start();

    log::error!("scheduler returned, halting");
    core.halt()
  }
}

/// Halt after a failed startup step without starting the scheduler.
pub fn abort<C: CorePort + ?Sized>(core: &C, err: BoardError) -> ! {
  log::error!("startup failed: {}", err);
  core.halt()
}
