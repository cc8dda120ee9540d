//! Entry points called by the kernel, forwarding to the registered hooks.

use core::ffi::c_char;

use crate::{
  hooks::HOOKS,
  kernel::{name_from_ptr, TaskHandle},
  memory::{KernelTaskRole, TaskMemory},
};

use super::{StackType_t, StaticTask_t, TaskHandle_t};

unsafe fn pass_out(
  memory: TaskMemory,
  tcb_buffer: *mut *mut StaticTask_t,
  stack_buffer: *mut *mut StackType_t,
  stack_size: *mut u32,
) {
  unsafe {
    // Pass out a pointer to the `StaticTask_t` structure in which the task's state will be stored.
    *tcb_buffer = memory.control_block;

    // Pass out the array that will be used as the task's stack.
    *stack_buffer = memory.stack;

    // Pass out the size of the array pointed to by `stack_buffer`, in words, not bytes.
    *stack_size = memory.stack_words;
  }
}

#[export_name = "vApplicationGetIdleTaskMemory"]
unsafe extern "C" fn get_idle_task_memory(
  tcb_buffer: *mut *mut StaticTask_t,
  stack_buffer: *mut *mut StackType_t,
  stack_size: *mut u32,
) {
  let memory = HOOKS.task_memory(KernelTaskRole::Idle);
  unsafe { pass_out(memory, tcb_buffer, stack_buffer, stack_size) }
}

#[export_name = "vApplicationGetTimerTaskMemory"]
unsafe extern "C" fn get_timer_task_memory(
  tcb_buffer: *mut *mut StaticTask_t,
  stack_buffer: *mut *mut StackType_t,
  stack_size: *mut u32,
) {
  let memory = HOOKS.task_memory(KernelTaskRole::Timer);
  unsafe { pass_out(memory, tcb_buffer, stack_buffer, stack_size) }
}

#[export_name = "vApplicationIdleHook"]
extern "C" fn application_idle_hook() {
  HOOKS.idle()
}

#[export_name = "vAssertCalled"]
extern "C" fn assert_called() -> ! {
  HOOKS.assertion_failed()
}

#[export_name = "vApplicationStackOverflowHook"]
unsafe extern "C" fn stack_overflow_hook(task_handle: TaskHandle_t, task_name: *const c_char) -> ! {
  let task_name = unsafe { name_from_ptr(task_name) };
  HOOKS.stack_overflow(TaskHandle::from_ptr(task_handle), task_name)
}

#[cfg(debug_assertions)]
#[export_name = "vConfigureTimerForRunTimeStats"]
extern "C" fn configure_run_time_counter() {
  HOOKS.configure_run_time_counter()
}

#[cfg(debug_assertions)]
#[export_name = "ulGetRunTimeCounterValue"]
extern "C" fn run_time_counter_value() -> u32 {
  HOOKS.run_time_count()
}
