use core::{ffi::c_void, ptr};

use crate::{
  config::MAX_TASK_NAME_LEN,
  ffi::{pdPASS, vTaskDelay, vTaskDelete, vTaskStartScheduler, xTaskCreate},
  ticks::Ticks,
};

use super::{Scheduler, TaskCreation, TaskDelay, TaskFunction, TaskHandle, TaskName, TaskParams};

/// The FreeRTOS kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeRtos;

impl Scheduler for FreeRtos {
  fn create_task(&self, function: TaskFunction, params: &TaskParams<'_>, arg: *mut c_void) -> TaskCreation {
    let name = TaskName::<MAX_TASK_NAME_LEN>::new(params.name);

    let mut handle = ptr::null_mut();
    let res = unsafe {
      xTaskCreate(
        Some(function as unsafe extern "C" fn(*mut c_void)),
        name.as_ptr(),
        params.stack_depth,
        arg,
        params.priority.to_freertos().into(),
        &mut handle,
      )
    };

    TaskCreation { passed: res == pdPASS, handle: TaskHandle::from_ptr(handle) }
  }

  fn delete_task(&self, task: TaskHandle) {
    unsafe { vTaskDelete(task.as_ptr()) }
  }

  fn start(&self) {
    unsafe { vTaskStartScheduler() }
  }
}

impl TaskDelay for FreeRtos {
  fn delay(&mut self, ticks: Ticks) {
    unsafe { vTaskDelay(ticks.into()) }
  }
}
