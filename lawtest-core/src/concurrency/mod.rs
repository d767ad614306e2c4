//! Concurrency-safety checks.
//!
//! [`Checker::parallel_safe`] and [`Checker::parallel_associativity`] run the
//! operation on `workers` scoped OS threads. Panics inside the operation are
//! captured per worker and reported as [`WorkerFault`]s rather than
//! unwinding into the caller. [`Checker::immutable_op`] is sequential: it
//! detects operations that mutate their operands through interior
//! mutability.

mod workers;

use std::{
    fmt,
    sync::{atomic::AtomicBool, mpsc},
    time::Instant,
};

use tracing::{info, info_span, warn};

use self::workers::{
    Cancellation, WorkerOutcome, WorkerRun, panic_message, partition, run_workers,
};
use crate::{
    equality::Equality,
    error::LawError,
    generator::{
        Generator,
        rng::{rng_from_seed, worker_rng},
    },
    law::Law,
    laws::{Checker, associativity, ensure},
    report::{
        Counterexample, FaultKind, LawReport, ParallelReport, StructureReport, Violation,
        WorkerFault,
    },
    telemetry,
};

/// Upper bound on counterexamples collected from concurrent workers.
pub const MAX_REPORTED_VIOLATIONS: usize = 3;

const FIRST_UNCHANGED: &str = "a unchanged by a∘b";
const SECOND_UNCHANGED: &str = "b unchanged by a∘b";

/// One concurrent associativity trial, sent from a worker to the collector.
struct Sample<T> {
    worker: usize,
    trial: usize,
    a: T,
    b: T,
    c: T,
    left: T,
    right: T,
}

impl<E> Checker<E> {
    /// Applies `op` concurrently from `workers` threads over a shared pool of
    /// generated inputs and checks that every worker observes the same
    /// results without faulting.
    ///
    /// The pool holds `test_cases` values and each worker applies `op` to
    /// every adjacent pair, wrapping from the last value back to the first,
    /// so every worker performs exactly `test_cases` applications. Results of
    /// the lowest-numbered worker that completed serve as the reference for
    /// the others.
    ///
    /// # Errors
    /// - [`LawError::InvalidWorkerCount`] when `workers` is zero.
    /// - [`LawError::NotParallelSafe`] listing every panicking or diverging
    ///   worker.
    /// - [`LawError::TimedOut`] when the deadline stops the workers early.
    /// - [`LawError::WorkerSpawn`] when a thread cannot be started.
    ///
    /// # Examples
    /// ```
    /// use lawtest_core::{Checker, Config, int_range};
    ///
    /// let values = int_range(-1_000_i64, 1_000)?;
    /// let report = Checker::new(Config::default())
    ///     .parallel_safe(|a: &i64, b: &i64| a.max(b) - a.min(b), &values, 4)?;
    /// assert_eq!(report.workers(), 4);
    /// assert_eq!(report.applications(), 400);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parallel_safe<T, Op, G>(
        &self,
        op: Op,
        generator: &G,
        workers: usize,
    ) -> Result<ParallelReport, LawError>
    where
        T: fmt::Debug + Send + Sync,
        Op: Fn(&T, &T) -> T + Sync,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        let law = Law::ParallelSafety;
        if workers == 0 {
            return Err(LawError::InvalidWorkerCount { workers });
        }
        let seed = self.config().resolve_seed();
        let cases = self.config().test_cases().get();
        let span = info_span!("lawtest.parallel", law = law.name(), workers, seed);
        let _entered = span.enter();

        let started = Instant::now();
        let mut rng = rng_from_seed(seed);
        let pool: Vec<T> = (0..cases).map(|_| generator.generate(&mut rng)).collect();

        let stop = AtomicBool::new(false);
        let cancellation = Cancellation::new(&stop, started.checked_add(self.config().timeout()));
        let outcomes = run_workers("safe", workers, cancellation, |_worker| {
            let mut results = Vec::with_capacity(cases);
            let successors = pool.iter().cycle().skip(1);
            for (index, (a, b)) in pool.iter().zip(successors).enumerate() {
                if cancellation.should_stop() {
                    return WorkerRun::Stopped { completed: index };
                }
                results.push(op(a, b));
            }
            WorkerRun::Completed(results)
        })?;

        let mut collected = tally(outcomes, Vec::len);
        let mut completed = std::mem::take(&mut collected.completed).into_iter();
        if let Some((_, reference)) = completed.next() {
            for (worker, results) in completed {
                let divergence = reference
                    .iter()
                    .zip(&results)
                    .enumerate()
                    .find(|(_, (expected, actual))| !self.equality().equal(*expected, *actual));
                if let Some((pair, (expected, actual))) = divergence {
                    collected.faults.push(WorkerFault::new(
                        worker,
                        FaultKind::Diverged {
                            pair,
                            expected: format!("{expected:?}"),
                            actual: format!("{actual:?}"),
                        },
                    ));
                }
            }
        }

        let requested = cases * workers;
        self.settle(law, workers, seed, started, requested, collected)
    }

    /// Checks associativity sequentially, then again with the trials spread
    /// across `workers` concurrent threads.
    ///
    /// Both phases always run, so a law broken everywhere is reported from
    /// both sides; only a sequential timeout skips the concurrent phase.
    /// Exactly `test_cases` concurrent trials run in total; the remainder of
    /// the division goes to the first workers. Each worker draws from its own
    /// random source derived from the run seed, and sends every evaluated
    /// triple to a collector that compares both association orders once all
    /// workers have joined.
    ///
    /// # Errors
    /// - The sequential phase's error when only that phase fails.
    /// - [`LawError::ConcurrentViolations`] with up to
    ///   [`MAX_REPORTED_VIOLATIONS`] counterexamples.
    /// - [`LawError::NotParallelSafe`] when a worker panics.
    /// - [`LawError::Rejected`] holding both failures when both phases fail.
    /// - [`LawError::TimedOut`], [`LawError::InvalidWorkerCount`] or
    ///   [`LawError::WorkerSpawn`].
    pub fn parallel_associativity<T, Op, G>(
        &self,
        op: Op,
        generator: &G,
        workers: usize,
    ) -> Result<ParallelReport, LawError>
    where
        T: fmt::Debug + Send,
        Op: Fn(&T, &T) -> T + Sync,
        G: Generator<T> + Sync + ?Sized,
        E: Equality<T>,
    {
        if workers == 0 {
            return Err(LawError::InvalidWorkerCount { workers });
        }
        let seed = self.config().resolve_seed();
        let started = Instant::now();
        let sequential = match self.associative_seeded(&op, generator, seed) {
            Err(error @ LawError::TimedOut { .. }) => return Err(error),
            outcome => outcome,
        };
        let concurrent = self.concurrent_associativity(&op, generator, workers, seed, started);
        match (sequential, concurrent) {
            (Ok(_), outcome) => outcome,
            (Err(error), Ok(_)) => Err(error),
            (Err(sequential), Err(concurrent)) => Err(LawError::Rejected {
                report: StructureReport::new("parallel associativity"),
                failures: vec![sequential, concurrent],
            }),
        }
    }

    /// The worker phase of [`Checker::parallel_associativity`].
    fn concurrent_associativity<T, Op, G>(
        &self,
        op: &Op,
        generator: &G,
        workers: usize,
        seed: u64,
        started: Instant,
    ) -> Result<ParallelReport, LawError>
    where
        T: fmt::Debug + Send,
        Op: Fn(&T, &T) -> T + Sync,
        G: Generator<T> + Sync + ?Sized,
        E: Equality<T>,
    {
        let law = Law::ParallelAssociativity;
        let trials = self.config().test_cases().get();
        let span = info_span!("lawtest.parallel", law = law.name(), workers, seed);
        let _entered = span.enter();

        let shares = partition(trials, workers);
        let offsets: Vec<usize> = shares
            .iter()
            .scan(0, |next, share| {
                let offset = *next;
                *next += share;
                Some(offset)
            })
            .collect();

        let (sender, receiver) = mpsc::channel::<Sample<T>>();
        let stop = AtomicBool::new(false);
        let cancellation = Cancellation::new(&stop, started.checked_add(self.config().timeout()));
        let outcomes = run_workers("assoc", workers, cancellation, |worker| {
            let mut rng = worker_rng(seed, worker);
            let share = shares[worker];
            for local in 0..share {
                if cancellation.should_stop() {
                    return WorkerRun::Stopped { completed: local };
                }
                let a = generator.generate(&mut rng);
                let b = generator.generate(&mut rng);
                let c = generator.generate(&mut rng);
                let (left, right) = associativity::associate(op, &a, &b, &c);
                let sample = Sample {
                    worker,
                    trial: offsets[worker] + local,
                    a,
                    b,
                    c,
                    left,
                    right,
                };
                if sender.send(sample).is_err() {
                    return WorkerRun::Stopped { completed: local };
                }
            }
            WorkerRun::Completed(share)
        });
        drop(sender);
        let collected = tally(outcomes?, |share| *share);

        let mut samples: Vec<Sample<T>> = receiver.into_iter().collect();
        samples.sort_by_key(|sample| sample.trial);
        let mut violations = Vec::new();
        let mut violated = 0_usize;
        for sample in &samples {
            if self.equality().equal(&sample.left, &sample.right) {
                continue;
            }
            violated += 1;
            if violations.len() < MAX_REPORTED_VIOLATIONS {
                violations.push(Violation::new(
                    law,
                    associativity::STATEMENT,
                    sample.trial,
                    seed,
                    Counterexample::new()
                        .with("worker", &sample.worker)
                        .with("a", &sample.a)
                        .with("b", &sample.b)
                        .with("c", &sample.c)
                        .with("left", &sample.left)
                        .with("right", &sample.right),
                ));
            }
        }

        if collected.faults.is_empty() && !violations.is_empty() {
            for violation in &violations {
                warn!(
                    trial = violation.trial(),
                    statement = violation.statement(),
                    counterexample = %violation.counterexample(),
                    "law violated",
                );
            }
            telemetry::record_check(law, collected.applications, started.elapsed());
            telemetry::record_violations(law, violated);
            return Err(LawError::ConcurrentViolations {
                law,
                seed,
                violations,
            });
        }

        self.settle(law, workers, seed, started, trials, collected)
    }

    /// Checks that `op` leaves both operands unchanged.
    ///
    /// Operands are snapshotted with [`Clone`] before the call and compared
    /// afterwards through the checker's equality strategy. Mutation invisible
    /// to that equality, or state shared between a value and its clone, goes
    /// unnoticed.
    ///
    /// # Errors
    /// Returns [`LawError::Violated`] naming the mutated operand with its
    /// value before and after the call, or [`LawError::TimedOut`].
    pub fn immutable_op<T, Op, G>(&self, op: Op, generator: &G) -> Result<LawReport, LawError>
    where
        T: fmt::Debug + Clone,
        Op: Fn(&T, &T) -> T,
        G: Generator<T> + ?Sized,
        E: Equality<T>,
    {
        self.run_trials(Law::Immutability, self.config().resolve_seed(), |rng| {
            let a = generator.generate(rng);
            let b = generator.generate(rng);
            let a_before = a.clone();
            let b_before = b.clone();
            let result = op(&a, &b);
            for (statement, before, after) in
                [(FIRST_UNCHANGED, &a_before, &a), (SECOND_UNCHANGED, &b_before, &b)]
            {
                ensure(self.equality().equal(before, after), statement, || {
                    Counterexample::new()
                        .with("before", before)
                        .with("after", after)
                        .with("result", &result)
                })?;
            }
            Ok(())
        })
    }

    /// Turns collected worker outcomes into the final verdict.
    fn settle<T>(
        &self,
        law: Law,
        workers: usize,
        seed: u64,
        started: Instant,
        requested: usize,
        collected: Collected<T>,
    ) -> Result<ParallelReport, LawError> {
        telemetry::record_check(law, collected.applications, started.elapsed());
        if !collected.faults.is_empty() {
            for fault in &collected.faults {
                warn!(worker = fault.worker(), fault = %fault, "worker faulted");
            }
            telemetry::record_worker_faults(law, collected.faults.len());
            return Err(LawError::NotParallelSafe {
                law,
                workers,
                seed,
                faults: collected.faults,
            });
        }
        if collected.stopped {
            warn!(
                completed = collected.applications,
                timeout = ?self.config().timeout(),
                "check timed out"
            );
            return Err(LawError::TimedOut {
                law,
                completed: collected.applications,
                requested,
                timeout: self.config().timeout(),
            });
        }
        info!(applications = collected.applications, elapsed = ?started.elapsed(), "law holds");
        Ok(ParallelReport::new(law, workers, collected.applications, seed))
    }
}

/// Worker outcomes sorted into completed runs, faults and progress.
struct Collected<T> {
    completed: Vec<(usize, T)>,
    faults: Vec<WorkerFault>,
    applications: usize,
    stopped: bool,
}

fn tally<T>(
    outcomes: Vec<WorkerOutcome<WorkerRun<T>>>,
    units: impl Fn(&T) -> usize,
) -> Collected<T> {
    let mut collected = Collected {
        completed: Vec::new(),
        faults: Vec::new(),
        applications: 0,
        stopped: false,
    };
    for (worker, outcome) in outcomes {
        match outcome {
            Ok(WorkerRun::Completed(value)) => {
                collected.applications += units(&value);
                collected.completed.push((worker, value));
            }
            Ok(WorkerRun::Stopped { completed }) => {
                collected.applications += completed;
                collected.stopped = true;
            }
            Err(payload) => collected.faults.push(WorkerFault::new(
                worker,
                FaultKind::Panicked {
                    message: panic_message(payload.as_ref()),
                },
            )),
        }
    }
    collected
}

/// Runs [`Checker::parallel_safe`] with the default configuration and
/// `PartialEq`.
///
/// # Errors
/// See [`Checker::parallel_safe`].
pub fn parallel_safe<T, Op, G>(
    op: Op,
    generator: &G,
    workers: usize,
) -> Result<ParallelReport, LawError>
where
    T: fmt::Debug + PartialEq + Send + Sync,
    Op: Fn(&T, &T) -> T + Sync,
    G: Generator<T> + ?Sized,
{
    Checker::default().parallel_safe(op, generator, workers)
}

/// Runs [`Checker::parallel_associativity`] with the default configuration
/// and `PartialEq`.
///
/// # Errors
/// See [`Checker::parallel_associativity`].
pub fn parallel_associativity<T, Op, G>(
    op: Op,
    generator: &G,
    workers: usize,
) -> Result<ParallelReport, LawError>
where
    T: fmt::Debug + PartialEq + Send,
    Op: Fn(&T, &T) -> T + Sync,
    G: Generator<T> + Sync + ?Sized,
{
    Checker::default().parallel_associativity(op, generator, workers)
}

/// Runs [`Checker::immutable_op`] with the default configuration and
/// `PartialEq`.
///
/// # Errors
/// See [`Checker::immutable_op`].
pub fn immutable_op<T, Op, G>(op: Op, generator: &G) -> Result<LawReport, LawError>
where
    T: fmt::Debug + PartialEq + Clone,
    Op: Fn(&T, &T) -> T,
    G: Generator<T> + ?Sized,
{
    Checker::default().immutable_op(op, generator)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    use super::*;
    use crate::{config::ConfigBuilder, error::LawErrorCode, generator::int_range};

    fn checker(cases: usize) -> Checker {
        let config = ConfigBuilder::new()
            .with_test_cases(cases)
            .with_seed(21)
            .build()
            .expect("config is valid");
        Checker::new(config)
    }

    #[test]
    fn zero_workers_are_rejected() {
        let values = int_range(0_i32, 9).expect("range is valid");
        let err = checker(10)
            .parallel_safe(|a: &i32, b: &i32| a + b, &values, 0)
            .expect_err("no workers");
        assert_eq!(err.code(), LawErrorCode::InvalidWorkerCount);
        let err = checker(10)
            .parallel_associativity(|a: &i32, b: &i32| a + b, &values, 0)
            .expect_err("no workers");
        assert_eq!(err.code(), LawErrorCode::InvalidWorkerCount);
    }

    #[test]
    fn parallel_associativity_counts_every_trial() {
        let values = int_range(-50_i64, 50).expect("range is valid");
        let report = checker(10)
            .parallel_associativity(|a: &i64, b: &i64| a + b, &values, 3)
            .expect("addition is associative");
        assert_eq!(report.law(), Law::ParallelAssociativity);
        assert_eq!(report.applications(), 10);
        assert_eq!(report.seed(), 21);
    }

    fn recorded_pairs(cases: usize) -> (ParallelReport, Vec<(i64, i64)>) {
        let values = int_range(0_i64, 1_000).expect("range is valid");
        let pairs = Mutex::new(Vec::new());
        let report = checker(cases)
            .parallel_safe(
                |a: &i64, b: &i64| {
                    pairs.lock().expect("lock is not poisoned").push((*a, *b));
                    a + b
                },
                &values,
                1,
            )
            .expect("addition is parallel safe");
        (report, pairs.into_inner().expect("lock is not poisoned"))
    }

    #[test]
    fn parallel_safe_pairs_each_pool_value_with_its_successor() {
        let (report, pairs) = recorded_pairs(3);
        assert_eq!(report.applications(), 3);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, pairs[1].0);
        assert_eq!(pairs[1].1, pairs[2].0);
        assert_eq!(pairs[2].1, pairs[0].0, "the last value wraps to the first");
    }

    #[test]
    fn a_single_value_pool_pairs_with_itself() {
        let (report, pairs) = recorded_pairs(1);
        assert_eq!(report.applications(), 1);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, pairs[0].1);
    }

    #[test]
    fn concurrent_phase_runs_after_a_sequential_failure() {
        let values = int_range(-50_i64, 50).expect("range is valid");
        let worker_calls = AtomicUsize::new(0);
        let err = checker(12)
            .parallel_associativity(
                |a: &i64, b: &i64| {
                    let on_worker = thread::current()
                        .name()
                        .is_some_and(|name| name.starts_with("lawtest-assoc-"));
                    if on_worker {
                        worker_calls.fetch_add(1, Ordering::Relaxed);
                        a + b
                    } else {
                        a - b
                    }
                },
                &values,
                2,
            )
            .expect_err("subtraction on the calling thread");
        assert_eq!(err.code(), LawErrorCode::Violated);
        assert_eq!(err.law(), Some(Law::Associativity));
        // Four applications per trial, twelve trials.
        assert_eq!(worker_calls.load(Ordering::Relaxed), 48);
    }

    #[test]
    fn immutable_op_names_the_mutated_operand() {
        let digits = int_range(0_i32, 9).expect("range is valid");
        let values = |rng: &mut crate::LawRng| Cell::new(digits.generate(rng));
        let err = checker(5)
            .immutable_op(
                |a: &Cell<i32>, b: &Cell<i32>| {
                    b.set(b.get() + 100);
                    Cell::new(a.get())
                },
                &values,
            )
            .expect_err("second operand is mutated");
        let violation = err.violation().expect("violation recorded");
        assert_eq!(violation.law(), Law::Immutability);
        assert_eq!(violation.statement(), SECOND_UNCHANGED);
    }
}
