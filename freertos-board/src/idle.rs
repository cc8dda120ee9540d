/// Observer invoked on every pass of the kernel's idle task.
///
/// The idle task frees the resources of deleted tasks, so an observer must
/// never block, sleep or wait on anything that could suspend it, and must
/// return promptly.
pub trait IdleObserver: Sync {
  fn on_idle(&self);
}

/// Idle observer doing nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIdle;

impl IdleObserver for NoopIdle {
  #[inline]
  fn on_idle(&self) {}
}
