// Program Launcher
//
// Runs a user entry function against an input and an output slot, inside a
// worker pool chosen by the launch mode. A panic in the entry function is
// caught and reported as `GraphBlasError::Panic`, so a failing program yields
// a status code instead of unwinding through the caller.

use crate::core::error::{GraphBlasError, Result};
use crate::core::status::{Status, SUCCESS};
use crate::parallel;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// How the launcher sizes the worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    /// Use the process-wide pool
    #[default]
    Automatic,
    /// A single worker
    Sequential,
    /// A dedicated pool with this many workers
    Workers(usize),
}

/// Executes entry functions under a fixed launch mode
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    mode: LaunchMode,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Launcher {
    pub fn new(mode: LaunchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    /// Run `entry(input, output)` and report how it ended
    ///
    /// Fails with `InvalidValue` for `Workers(0)` or when the pool cannot be
    /// created, and with `Panic` if the entry function panics.
    pub fn exec<I, O, F>(&self, entry: F, input: &I, output: &mut O) -> Result<()>
    where
        I: Sync + ?Sized,
        O: Send + ?Sized,
        F: FnOnce(&I, &mut O) + Send,
    {
        let run = move || {
            log::debug!(
                "Launching entry function ({:?}, parallel={}, {} workers)",
                self.mode,
                parallel::is_parallel_available(),
                parallel::current_num_threads()
            );
            catch_unwind(AssertUnwindSafe(move || entry(input, output)))
        };

        let outcome = match self.pool()? {
            Some(pool) => pool.install(run),
            None => run(),
        };

        outcome.map_err(|payload| {
            let msg = panic_message(payload);
            log::error!("Entry function panicked: {}", msg);
            GraphBlasError::Panic(msg)
        })
    }

    /// Like `exec`, returning the integer status code
    pub fn exec_status<I, O, F>(&self, entry: F, input: &I, output: &mut O) -> Status
    where
        I: Sync + ?Sized,
        O: Send + ?Sized,
        F: FnOnce(&I, &mut O) + Send,
    {
        match self.exec(entry, input, output) {
            Ok(()) => SUCCESS,
            Err(e) => e.to_status(),
        }
    }

    #[cfg(feature = "parallel")]
    fn pool(&self) -> Result<Option<rayon::ThreadPool>> {
        let threads = match self.mode {
            LaunchMode::Automatic => return Ok(None),
            LaunchMode::Sequential => 1,
            LaunchMode::Workers(0) => return Err(GraphBlasError::InvalidValue),
            LaunchMode::Workers(n) => n,
        };
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map(Some)
            .map_err(|e| {
                log::error!("Failed to build a pool of {} workers: {}", threads, e);
                GraphBlasError::InvalidValue
            })
    }

    #[cfg(not(feature = "parallel"))]
    fn pool(&self) -> Result<Option<NoPool>> {
        match self.mode {
            LaunchMode::Workers(0) => Err(GraphBlasError::InvalidValue),
            _ => Ok(None),
        }
    }
}

/// Stand-in pool type when worker threads are compiled out
#[cfg(not(feature = "parallel"))]
struct NoPool;

#[cfg(not(feature = "parallel"))]
impl NoPool {
    fn install<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::PANIC;

    fn sum_entry(input: &[u64], output: &mut u64) {
        *output = input.iter().sum();
    }

    #[test]
    fn test_exec_writes_output() {
        let input = vec![1u64, 2, 3];
        for mode in [LaunchMode::Automatic, LaunchMode::Sequential, LaunchMode::Workers(3)] {
            let mut output = 0u64;
            Launcher::new(mode)
                .exec(|i: &Vec<u64>, o: &mut u64| sum_entry(i, o), &input, &mut output)
                .unwrap();
            assert_eq!(output, 6);
        }
    }

    #[test]
    fn test_exec_catches_panic() {
        let mut output = 0i32;
        let err = Launcher::default()
            .exec(
                |_: &(), _: &mut i32| panic!("entry failed"),
                &(),
                &mut output,
            )
            .unwrap_err();
        assert_eq!(err, GraphBlasError::Panic("entry failed".to_string()));
    }

    #[test]
    fn test_exec_status_codes() {
        let launcher = Launcher::new(LaunchMode::Sequential);
        let mut output = 0i32;
        assert_eq!(
            launcher.exec_status(|i: &i32, o: &mut i32| *o = *i * 2, &21, &mut output),
            SUCCESS
        );
        assert_eq!(output, 42);
        assert_eq!(
            launcher.exec_status(|_: &i32, _: &mut i32| panic!("boom"), &0, &mut output),
            PANIC
        );
    }

    #[test]
    fn test_entry_sees_requested_workers() {
        let expected = if parallel::is_parallel_available() { 3 } else { 1 };
        let mut seen = 0usize;
        Launcher::new(LaunchMode::Workers(3))
            .exec(|_: &(), o: &mut usize| *o = parallel::current_num_threads(), &(), &mut seen)
            .unwrap();
        assert_eq!(seen, expected);

        Launcher::new(LaunchMode::Sequential)
            .exec(|_: &(), o: &mut usize| *o = parallel::current_num_threads(), &(), &mut seen)
            .unwrap();
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut output = 0i32;
        assert_eq!(
            Launcher::new(LaunchMode::Workers(0)).exec(|_: &(), _: &mut i32| {}, &(), &mut output),
            Err(GraphBlasError::InvalidValue)
        );
    }
}
