use core::{ffi::c_void, fmt, ptr::NonNull};

/// Raw kernel task handle (`TaskHandle_t`).
pub type RawTaskHandle = *mut c_void;

/// A non-null handle for a task owned by the kernel.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TaskHandle(NonNull<c_void>);

unsafe impl Send for TaskHandle {}
unsafe impl Sync for TaskHandle {}

impl fmt::Debug for TaskHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.as_ptr().fmt(f)
  }
}

impl TaskHandle {
  /// Wrap a raw handle, returning `None` if it is null.
  #[inline]
  pub fn from_ptr(ptr: RawTaskHandle) -> Option<Self> {
    NonNull::new(ptr).map(Self)
  }

  /// Get the raw task handle.
  #[inline]
  pub const fn as_ptr(&self) -> RawTaskHandle {
    self.0.as_ptr()
  }
}
