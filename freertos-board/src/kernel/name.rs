use core::{ffi::{c_char, CStr}, str};

/// Helper struct for passing a `&str` to `xTaskCreate`.
///
/// Names longer than `CAPACITY - 1` bytes are truncated on a character boundary.
pub struct TaskName<const CAPACITY: usize> {
  buf: [u8; CAPACITY],
}

impl<const CAPACITY: usize> TaskName<CAPACITY> {
  pub fn new(name: &str) -> Self {
    let mut buf = [0; CAPACITY];

    let mut len = 0;
    for c in name.chars() {
      if len + c.len_utf8() >= CAPACITY {
        break
      }

      c.encode_utf8(&mut buf[len..]);
      len += c.len_utf8();
    }

    Self { buf }
  }

  pub fn as_ptr(&self) -> *const c_char {
    self.buf.as_ptr().cast()
  }

  pub fn as_bytes(&self) -> &[u8] {
    let len = self.buf.iter().position(|&b| b == 0).unwrap_or(CAPACITY);
    &self.buf[..len]
  }
}

/// Borrow a task name handed out by the kernel.
///
/// Null yields an empty name; invalid UTF-8 is cut off at the first invalid byte.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
pub unsafe fn name_from_ptr<'a>(ptr: *const c_char) -> &'a str {
  unsafe { ptr.as_ref() }
    .map(|n| unsafe { CStr::from_ptr(n) })
    .map(|n| match n.to_str() {
      Ok(n) => n,
      Err(err) => unsafe { str::from_utf8_unchecked(&n.to_bytes()[..err.valid_up_to()]) },
    })
    .unwrap_or_default()
}
