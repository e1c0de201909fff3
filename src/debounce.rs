//! Trailing-edge debouncing for name edits
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen_futures::spawn_local;
use yew::platform::time::sleep;

/// Keeps only the most recent value of a burst. Each `push` starts a new
/// generation; a waiter holding an older generation gets nothing.
#[derive(Debug)]
pub struct Debouncer<T> {
    generation: Cell<u64>,
    pending: RefCell<Option<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Debouncer {
            generation: Cell::new(0),
            pending: RefCell::new(None),
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Debouncer<T> {
        Debouncer::default()
    }

    pub fn push(&self, value: T) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.pending.borrow_mut() = Some(value);
        generation
    }

    pub fn take_if_current(&self, generation: u64) -> Option<T> {
        if generation != self.generation.get() {
            return None;
        }
        self.pending.borrow_mut().take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// Push `value`, wait `delay_ms`, then hand it to `apply` unless a newer value
/// was pushed in the meantime
pub fn debounce<T: 'static>(debouncer: Rc<Debouncer<T>>, value: T, delay_ms: u32, apply: impl FnOnce(T) + 'static) {
    let generation = debouncer.push(value);
    spawn_local(async move {
        sleep(Duration::from_millis(u64::from(delay_ms))).await;
        if let Some(value) = debouncer.take_if_current(generation) {
            apply(value);
        }
    });
}
