use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;


// Cancelable one-shot timer handle. Scheduled tasks are tied to the lifetime of the
// view that created them: the view cancels its handles when it is torn down, so a
// pending task never fires into a dead view.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn cancel(&self) { self.cancelled.set(true); }
    pub fn is_cancelled(&self) -> bool { self.cancelled.get() }

    // Wraps a task so that it no-ops once the handle is cancelled. Scheduler
    // implementations run the returned closure at the deadline.
    pub fn guard(task: Box<dyn FnOnce()>) -> (TaskHandle, Box<dyn FnOnce()>) {
        let handle = TaskHandle { cancelled: Rc::new(Cell::new(false)) };
        let cancelled = Rc::clone(&handle.cancelled);
        let guarded = Box::new(move || {
            if !cancelled.get() {
                task();
            }
        });
        (handle, guarded)
    }
}

// Deferred execution is owned by the host event loop (a timer wheel, `setTimeout`, a
// test queue). The view only ever schedules fire-and-forget one-shots.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle;
}
