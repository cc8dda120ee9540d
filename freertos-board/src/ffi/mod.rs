//! Low-level FreeRTOS bindings for the Cortex-M4F port.
//!
//! Only the functions this crate calls are declared; the entry points the
//! kernel calls back into live in [`hooks`].
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use core::ffi::{c_char, c_long, c_ulong, c_void};

mod hooks;

/// Signed base integer type.
pub type BaseType_t = c_long;

/// Unsigned base integer type.
pub type UBaseType_t = c_ulong;

/// Raw tick type.
pub type TickType_t = crate::ticks::TickType;

/// Raw task handle.
pub type TaskHandle_t = crate::kernel::RawTaskHandle;

/// Task entry point.
pub type TaskFunction_t = Option<unsafe extern "C" fn(*mut c_void)>;

/// Storage for a statically allocated task.
pub type StaticTask_t = crate::memory::TaskControlBlock;

/// Stack word.
pub type StackType_t = crate::memory::StackType;

pub const pdPASS: BaseType_t = 1;

extern "C" {
  pub fn xTaskCreate(
    pxTaskCode: TaskFunction_t,
    pcName: *const c_char,
    usStackDepth: u16,
    pvParameters: *mut c_void,
    uxPriority: UBaseType_t,
    pxCreatedTask: *mut TaskHandle_t,
  ) -> BaseType_t;

  pub fn vTaskDelete(xTaskToDelete: TaskHandle_t);

  pub fn vTaskStartScheduler();

  pub fn vTaskDelay(xTicksToDelay: TickType_t);
}
