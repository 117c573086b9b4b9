//! Only `fftw_execute` is thread-safe in FFTW: planning, destroying
//! plans, thread setup and wisdom transfer all touch global planner
//! state. This module provides a lock for that purpose.

use std::sync::{Mutex, PoisonError};

/// Hold this lock when doing anything thread-unsafe with FFTW.
pub static LOCK: Mutex<()> = Mutex::new(());

/// Run `f` while holding [`LOCK`].
///
/// A poisoned lock is still taken: the guarded state lives inside FFTW,
/// not in the mutex.
pub fn run<A, F: FnOnce() -> A>(f: F) -> A {
    let _g = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}

#[cfg(test)]
mod tests {
    use std::thread;

    #[test]
    fn run_returns_closure_value() {
        assert_eq!(super::run(|| 40 + 2), 42);
    }

    #[test]
    fn survives_poisoning() {
        let _ = thread::spawn(|| super::run(|| panic!("poison"))).join();
        assert!(super::run(|| true));
    }
}
