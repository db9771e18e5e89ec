//! Threaded search runner
//!
//! Partitions the seed space across a fixed pool of worker threads. Workers
//! claim contiguous index chunks off a shared atomic cursor, expand each
//! seed into its frame range, and push matches and progress through
//! mutex-guarded callbacks. Cancellation is cooperative and polled at seed
//! granularity: a worker always finishes the frame range of the seed it is
//! on. A worker panic aborts the whole run and is surfaced exactly once as
//! a `SearchFailure`, never through the callbacks.

use crate::domain::frame::{Frame, FrameRange, FrameSequence};
use crate::error::SearchFailure;
use log::debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Randomly addressable, finite seed sequence.
///
/// Index addressing is what makes partitioning and resumption cheap: any
/// contiguous sub-range can be produced without touching its predecessors.
pub trait SeedSource {
    type Seed: Clone + Send;

    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed at `index`; callers only pass indexes below `len()`
    fn get(&self, index: u64) -> Self::Seed;
}

/// One delivered match: the frame plus the seed that produced it
#[derive(Clone, Debug)]
pub struct Match<S> {
    pub seed: S,
    pub frame: Frame,
}

/// Set-once cancellation signal, shareable with any number of observers
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a run ended, when it did not fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every seed in the space was processed
    Completed,
    /// Cancelled before the space was exhausted
    Cancelled,
}

/// Monotonic progress reporting; workers report at chunk boundaries
struct ProgressReporter<P> {
    callback: P,
    last: u64,
}

/// Everything the workers share, read-mostly
struct Shared<'a, S, F, C, R, P> {
    seeds: &'a S,
    factory: F,
    frame_range: FrameRange,
    checker: C,
    on_result: Mutex<R>,
    progress: Mutex<ProgressReporter<P>>,
    cancel: &'a CancelToken,
    /// set when any worker fails, to stop the others promptly
    abort: AtomicBool,
    cursor: AtomicU64,
    processed: AtomicU64,
    total: u64,
    chunk: u64,
}

/// Drives one threaded search over a seed source
#[derive(Clone, Copy, Debug)]
pub struct SearchRunner {
    /// Worker threads; 0 means one per available core
    pub num_threads: usize,
}

impl Default for SearchRunner {
    fn default() -> Self {
        SearchRunner { num_threads: 0 }
    }
}

impl SearchRunner {
    pub fn new(num_threads: usize) -> SearchRunner {
        SearchRunner { num_threads }
    }

    fn resolved_threads(&self) -> usize {
        if self.num_threads > 0 {
            self.num_threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }

    /// Run the search to completion, cancellation or failure.
    ///
    /// Every seed is expanded through a fresh frame sequence from `factory`
    /// and its frames within `frame_range` are tested by `checker`. Each
    /// match is delivered exactly once through `on_result`; no order is
    /// guaranteed across threads. `on_progress` receives monotonically
    /// non-decreasing (processed, total) pairs, ending at (total, total) on
    /// natural completion.
    pub fn run<S, G, F, C, R, P>(
        &self,
        seeds: &S,
        factory: F,
        frame_range: FrameRange,
        checker: C,
        on_result: R,
        mut on_progress: P,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome, SearchFailure>
    where
        S: SeedSource + Sync,
        G: FrameSequence,
        F: Fn(&S::Seed) -> G + Sync,
        C: Fn(&Frame) -> bool + Sync,
        R: FnMut(Match<S::Seed>) + Send,
        P: FnMut(u64, u64) + Send,
    {
        let total = seeds.len();
        if total == 0 {
            on_progress(0, 0);
            return Ok(SearchOutcome::Completed);
        }

        let threads = self.resolved_threads();
        // progress granularity: small enough for steady reporting, large
        // enough to keep the cursor and callback locks out of the hot path
        let chunk = (total / (threads as u64 * 32)).clamp(1, 4096);
        debug!(
            "search runner: {} seeds, {} workers, chunk size {}",
            total, threads, chunk
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SearchFailure::Pool {
                message: e.to_string(),
            })?;

        let shared = Shared {
            seeds,
            factory,
            frame_range,
            checker,
            on_result: Mutex::new(on_result),
            progress: Mutex::new(ProgressReporter {
                callback: on_progress,
                last: 0,
            }),
            cancel,
            abort: AtomicBool::new(false),
            cursor: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            total,
            chunk,
        };
        let failure: Mutex<Option<String>> = Mutex::new(None);

        pool.scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|_| {
                    // a panicking worker is an invariant violation; record
                    // it once and stop the others at their next poll
                    if let Err(payload) =
                        panic::catch_unwind(AssertUnwindSafe(|| worker(&shared)))
                    {
                        let mut slot = failure.lock().unwrap_or_else(|p| p.into_inner());
                        slot.get_or_insert_with(|| panic_message(payload));
                        shared.abort.store(true, Ordering::Relaxed);
                    }
                });
            }
        });

        if let Some(message) = failure.into_inner().unwrap_or_else(|p| p.into_inner()) {
            return Err(SearchFailure::Worker { message });
        }

        // final progress: (total, total) on completion, the true count on
        // cancellation
        let done = shared.processed.load(Ordering::Relaxed);
        report(&shared.progress, done, total);

        if cancel.is_cancelled() && done < total {
            Ok(SearchOutcome::Cancelled)
        } else {
            Ok(SearchOutcome::Completed)
        }
    }
}

fn worker<S, G, F, C, R, P>(shared: &Shared<'_, S, F, C, R, P>)
where
    S: SeedSource,
    G: FrameSequence,
    F: Fn(&S::Seed) -> G,
    C: Fn(&Frame) -> bool,
    R: FnMut(Match<S::Seed>),
    P: FnMut(u64, u64),
{
    let stopping =
        || shared.cancel.is_cancelled() || shared.abort.load(Ordering::Relaxed);

    loop {
        if stopping() {
            break;
        }
        let start = shared.cursor.fetch_add(shared.chunk, Ordering::Relaxed);
        if start >= shared.total {
            break;
        }
        let end = (start + shared.chunk).min(shared.total);

        for index in start..end {
            // cancellation latency is bounded by one seed's frame range
            if stopping() {
                break;
            }

            let seed = shared.seeds.get(index);
            let mut frames = (shared.factory)(&seed);
            loop {
                let frame = frames.advance();
                if frame.number > shared.frame_range.max {
                    break;
                }
                if frame.number < shared.frame_range.min {
                    continue;
                }
                if (shared.checker)(&frame) {
                    let mut deliver = lock_or_panic(&shared.on_result);
                    deliver(Match {
                        seed: seed.clone(),
                        frame,
                    });
                }
            }
            shared.processed.fetch_add(1, Ordering::Relaxed);
        }

        report(
            &shared.progress,
            shared.processed.load(Ordering::Relaxed),
            shared.total,
        );
    }
}

fn report<P: FnMut(u64, u64)>(progress: &Mutex<ProgressReporter<P>>, done: u64, total: u64) {
    let mut guard = lock_or_panic(progress);
    if done > guard.last {
        guard.last = done;
        (guard.callback)(done, total);
    }
}

/// A poisoned callback mutex means a callback already panicked; re-raising
/// routes this worker through the runner's single failure channel too.
fn lock_or_panic<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("search callback panicked"),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker thread panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ivs::Ivs;
    use crate::domain::pid::Pid;

    /// Seed stub: the seed value is just its index
    struct CountingSource(u64);

    impl SeedSource for CountingSource {
        type Seed = u64;

        fn len(&self) -> u64 {
            self.0
        }

        fn get(&self, index: u64) -> u64 {
            index
        }
    }

    /// Frame stub: frame n of seed s carries PID = s * 1000 + n
    struct StubFrames {
        seed: u64,
        number: u32,
    }

    impl FrameSequence for StubFrames {
        fn advance(&mut self) -> Frame {
            self.number += 1;
            Frame {
                number: self.number,
                pid: Pid((self.seed * 1000 + u64::from(self.number)) as u32),
                ivs: Ivs::default(),
            }
        }
    }

    fn stub_factory(seed: &u64) -> StubFrames {
        StubFrames {
            seed: *seed,
            number: 0,
        }
    }

    #[test]
    fn test_empty_source_completes_immediately() {
        let runner = SearchRunner::new(2);
        let mut calls = Vec::new();
        let outcome = runner
            .run(
                &CountingSource(0),
                stub_factory,
                FrameRange::new(1, 10),
                |_| true,
                |_: Match<u64>| {},
                |done, total| calls.push((done, total)),
                &CancelToken::new(),
            )
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Completed);
        assert_eq!(calls, vec![(0, 0)]);
    }

    #[test]
    fn test_every_frame_visited_exactly_once() {
        let runner = SearchRunner::new(4);
        let matches = Mutex::new(Vec::new());
        let outcome = runner
            .run(
                &CountingSource(50),
                stub_factory,
                FrameRange::new(1, 10),
                |_| true,
                |m: Match<u64>| matches.lock().unwrap().push(m.frame.pid.word()),
                |_, _| {},
                &CancelToken::new(),
            )
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Completed);

        let mut seen = matches.into_inner().unwrap();
        assert_eq!(seen.len(), 500);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn test_progress_is_monotonic_and_final() {
        let runner = SearchRunner::new(3);
        let calls = Mutex::new(Vec::new());
        runner
            .run(
                &CountingSource(200),
                stub_factory,
                FrameRange::new(1, 5),
                |_| false,
                |_: Match<u64>| {},
                |done, total| calls.lock().unwrap().push((done, total)),
                &CancelToken::new(),
            )
            .unwrap();

        let calls = calls.into_inner().unwrap();
        assert!(!calls.is_empty());
        for pair in calls.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        assert_eq!(*calls.last().unwrap(), (200, 200));
    }

    #[test]
    fn test_worker_panic_surfaces_as_failure() {
        let runner = SearchRunner::new(2);
        let result = runner.run(
            &CountingSource(10),
            stub_factory,
            FrameRange::new(1, 3),
            |frame: &Frame| {
                if frame.pid.word() == 4002 {
                    panic!("invariant violated at frame 2 of seed 4");
                }
                false
            },
            |_: Match<u64>| {},
            |_, _| {},
            &CancelToken::new(),
        );
        match result {
            Err(SearchFailure::Worker { message }) => {
                assert!(message.contains("invariant violated"));
            }
            other => panic!("expected worker failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_cancel_token_is_idempotent() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.clone().is_cancelled());
    }
}
