use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct QueueState {
    tasks: RefCell<VecDeque<Task>>,
    draining: Cell<bool>,
    waker: RefCell<Option<Rc<dyn Fn()>>>,
}

/// FIFO queue of deferred tasks, drained after the current call stack
///
/// This is the explicit stand-in for a JS microtask checkpoint: work
/// enqueued here never runs inside the call that enqueued it. The host
/// drains the queue with [`MicrotaskQueue::run_until_idle`] once its
/// synchronous work (an input handler, a render pass) has finished, or
/// installs a waker that schedules that drain on the platform's own
/// microtask queue.
#[derive(Clone, Default)]
pub struct MicrotaskQueue {
    state: Rc<QueueState>,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a callback invoked whenever the queue goes from empty to non-empty
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.state.waker.borrow_mut() = Some(Rc::new(waker));
    }

    /// Defer a task
    pub fn enqueue(&self, task: impl FnOnce() + 'static) {
        let was_empty = {
            let mut tasks = self.state.tasks.borrow_mut();
            let was_empty = tasks.is_empty();
            tasks.push_back(Box::new(task));
            was_empty
        };
        if was_empty && !self.state.draining.get() {
            let waker = self.state.waker.borrow().clone();
            if let Some(waker) = waker {
                waker();
            }
        }
    }

    /// Run queued tasks, including tasks they enqueue, until the queue is empty
    ///
    /// Returns the number of tasks run. A call made from inside a running
    /// task returns 0 immediately; the outer drain picks up the work.
    pub fn run_until_idle(&self) -> usize {
        if self.state.draining.replace(true) {
            return 0;
        }
        let mut ran = 0;
        loop {
            let next = self.state.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.state.draining.set(false);
        if ran > 0 {
            tracing::trace!(tasks = ran, "microtasks drained");
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.state.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.tasks.borrow().is_empty()
    }

    pub fn is_draining(&self) -> bool {
        self.state.draining.get()
    }

    /// Handle that does not keep the queue alive, for use inside its own waker
    pub fn downgrade(&self) -> WeakMicrotaskQueue {
        WeakMicrotaskQueue {
            state: Rc::downgrade(&self.state),
        }
    }
}

#[derive(Clone)]
pub struct WeakMicrotaskQueue {
    state: Weak<QueueState>,
}

impl WeakMicrotaskQueue {
    pub fn upgrade(&self) -> Option<MicrotaskQueue> {
        self.state.upgrade().map(|state| MicrotaskQueue { state })
    }
}
