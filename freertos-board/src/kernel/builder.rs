use core::ptr;

use crate::{config::MINIMAL_STACK_SIZE, BoardError};

use super::{task_function, Scheduler, TaskBody, TaskHandle, TaskParams, TaskPriority, TaskCreation};

/// Helper for spawning a new application task.
pub struct TaskBuilder<'n> {
  name: &'n str,
  stack_size: u16,
  priority: TaskPriority,
}

impl TaskBuilder<'static> {
  pub const fn new() -> Self {
    TaskBuilder {
      name: "",
      stack_size: MINIMAL_STACK_SIZE as u16,
      priority: TaskPriority::IDLE,
    }
  }
}

impl Default for TaskBuilder<'static> {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskBuilder<'_> {
  /// Set the task name.
  pub const fn name<'n>(self, name: &'n str) -> TaskBuilder<'n> {
    TaskBuilder {
      name,
      stack_size: self.stack_size,
      priority: self.priority,
    }
  }

  /// Set the stack size in words.
  pub const fn stack_size(mut self, stack_size: u16) -> Self {
    self.stack_size = stack_size;
    self
  }

  /// Set the task priority.
  pub const fn priority(mut self, priority: TaskPriority) -> Self {
    self.priority = priority;
    self
  }

  /// Create the task running `body`.
  ///
  /// A failed creation is final: any handle the kernel handed out anyway is
  /// deleted before the error is returned.
  pub fn spawn<S, T>(&self, scheduler: &S, body: &'static mut T) -> Result<TaskHandle, BoardError>
  where
    S: Scheduler + ?Sized,
    T: TaskBody,
  {
    let params = TaskParams {
      name: self.name,
      stack_depth: self.stack_size,
      priority: self.priority,
    };

    let arg = ptr::from_mut(body).cast();

    match scheduler.create_task(task_function::<T>, &params, arg) {
      TaskCreation { passed: true, handle: Some(handle) } => {
        log::info!("created task '{}' with priority {}", self.name, self.priority);
        Ok(handle)
      },
      TaskCreation { passed: true, handle: None } => {
        log::error!("task '{}' was created without a handle", self.name);
        Err(BoardError::MissingTaskHandle)
      },
      TaskCreation { passed: false, handle } => {
        log::error!("failed to create task '{}'", self.name);
        if let Some(handle) = handle {
          scheduler.delete_task(handle);
        }
        Err(BoardError::TaskCreationFailed)
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::mock::{leak, MockScheduler, ParkedTask};

  #[test]
  fn passes_parameters_to_the_kernel() {
    let scheduler = MockScheduler::passing();
    let priority = TaskPriority::new(1).unwrap();

    let handle = TaskBuilder::new()
      .name("led_task")
      .stack_size(200)
      .priority(priority)
      .spawn(&scheduler, leak(ParkedTask));

    assert_eq!(handle, Ok(MockScheduler::handle()));
    assert_eq!(&*scheduler.created.borrow(), &[("led_task".to_string(), 200, priority)]);
    assert!(scheduler.deleted.borrow().is_empty());
  }

  #[test]
  fn failed_creation_releases_the_handle() {
    let scheduler = MockScheduler::new(TaskCreation { passed: false, handle: Some(MockScheduler::handle()) });

    let res = TaskBuilder::new().name("led_task").spawn(&scheduler, leak(ParkedTask));

    assert_eq!(res, Err(BoardError::TaskCreationFailed));
    assert_eq!(&*scheduler.deleted.borrow(), &[MockScheduler::handle()]);
  }

  #[test]
  fn failed_creation_without_handle_deletes_nothing() {
    let scheduler = MockScheduler::new(TaskCreation { passed: false, handle: None });

    let res = TaskBuilder::new().spawn(&scheduler, leak(ParkedTask));

    assert_eq!(res, Err(BoardError::TaskCreationFailed));
    assert!(scheduler.deleted.borrow().is_empty());
  }

  #[test]
  fn success_without_handle_is_an_error() {
    let scheduler = MockScheduler::new(TaskCreation { passed: true, handle: None });

    let res = TaskBuilder::new().spawn(&scheduler, leak(ParkedTask));

    assert_eq!(res, Err(BoardError::MissingTaskHandle));
  }

  #[test]
  fn defaults_to_minimal_stack_at_idle_priority() {
    let scheduler = MockScheduler::passing();

    TaskBuilder::default().spawn(&scheduler, leak(ParkedTask)).unwrap();

    let created = scheduler.created.borrow();
    assert_eq!(created[0].1, MINIMAL_STACK_SIZE as u16);
    assert_eq!(created[0].2, TaskPriority::IDLE);
  }
}
