use crate::classifiers::BatchClassifier;
use crate::core::instances::Dataset;
use crate::evaluation::{EvaluationTrace, PerformanceEvaluator, Snapshot};
use crate::streams::Stream;
use crate::utils::system::current_rss_gb;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::Instant;

/// Batch holdout evaluation: drain the train stream into a dataset, fit the
/// learner once (timed), then sweep the test stream through `predict`,
/// feeding every labeled example and its votes to the evaluator.
///
/// Metric snapshots are sampled every `sample_frequency` test instances and
/// memory every `mem_check_frequency`; an optional channel streams snapshots
/// to a live consumer while the sweep runs.
pub struct TrainTestEvaluator {
    learner: Box<dyn BatchClassifier>,
    train_stream: Box<dyn Stream>,
    test_stream: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,

    trace: EvaluationTrace,

    max_train_instances: Option<u64>,
    max_test_instances: Option<u64>,
    sample_frequency: u64,
    mem_check_frequency: u64,

    trained_on: u64,
    tested: u64,
    fit_seconds: f64,
    start_time: Instant,
    last_mem_sample: Instant,
    ram_hours: f64,

    progress_tx: Option<Sender<Snapshot>>,
}

impl TrainTestEvaluator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        learner: Box<dyn BatchClassifier>,
        train_stream: Box<dyn Stream>,
        test_stream: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        max_train_instances: Option<u64>,
        max_test_instances: Option<u64>,
        sample_frequency: u64,
        mem_check_frequency: u64,
    ) -> Result<Self, Error> {
        if sample_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sample_frequency must be > 0",
            ));
        }
        if mem_check_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "mem_check_frequency must be > 0",
            ));
        }

        let train_header = train_stream.header();
        let test_header = test_stream.header();
        if train_header.number_of_attributes() != test_header.number_of_attributes()
            || train_header.class_index() != test_header.class_index()
        {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "train and test streams disagree on schema",
            ));
        }

        Ok(Self {
            learner,
            train_stream,
            test_stream,
            evaluator,
            trace: EvaluationTrace::default(),
            max_train_instances,
            max_test_instances,
            sample_frequency,
            mem_check_frequency,
            trained_on: 0,
            tested: 0,
            fit_seconds: 0.0,
            start_time: Instant::now(),
            last_mem_sample: Instant::now(),
            ram_hours: 0.0,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        self.start_time = Instant::now();
        self.last_mem_sample = self.start_time;

        let dataset = Dataset::from_stream(self.train_stream.as_mut(), self.max_train_instances)?;
        self.trained_on = dataset.len() as u64;

        let fit_start = Instant::now();
        self.learner
            .fit(&dataset)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        self.fit_seconds = fit_start.elapsed().as_secs_f64();
        self.bump_ram_hours();

        while self.test_stream.has_more_instances() {
            if let Some(n) = self.max_test_instances {
                if self.tested >= n {
                    break;
                }
            }
            let Some(instance) = self.test_stream.next_instance() else {
                break;
            };
            self.tested += 1;

            let votes = self
                .learner
                .predict(instance.as_ref())
                .map_err(|e| Error::new(ErrorKind::InvalidData, e))?
                .into_votes();
            self.evaluator.add_result(instance.as_ref(), votes);

            if self.tested % self.mem_check_frequency == 0 {
                self.bump_ram_hours();
            }
            if self.tested % self.sample_frequency == 0 {
                self.push_snapshot();
            }
        }

        self.push_snapshot();
        Ok(())
    }

    pub fn trace(&self) -> &EvaluationTrace {
        &self.trace
    }

    /// Training rows drained from the train stream (before any rows the
    /// learner itself drops).
    pub fn trained_on(&self) -> u64 {
        self.trained_on
    }

    /// Wall-clock seconds spent inside `fit`.
    pub fn fit_seconds(&self) -> f64 {
        self.fit_seconds
    }

    pub fn performance(&self) -> Vec<crate::evaluation::Measurement> {
        self.evaluator.performance()
    }

    fn push_snapshot(&mut self) {
        use std::collections::BTreeMap;

        let secs = self.start_time.elapsed().as_secs_f64();
        let perf = self.evaluator.performance();

        let mut acc = f64::NAN;
        let mut kap = f64::NAN;
        let mut extras = BTreeMap::new();

        for m in perf {
            match m.name.as_str() {
                "accuracy" => acc = m.value,
                "kappa" => kap = m.value,
                _ => {
                    extras.insert(m.name, m.value);
                }
            }
        }
        extras.insert("train_instances".into(), self.trained_on as f64);
        extras.insert("train_seconds".into(), self.fit_seconds);

        let snapshot = Snapshot {
            instances_seen: self.tested,
            accuracy: acc,
            kappa: kap,
            ram_hours: self.ram_hours,
            seconds: secs,
            extras,
        };

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot.clone());
        }

        self.trace.push(snapshot);
    }

    fn bump_ram_hours(&mut self) {
        let now = Instant::now();
        let dt_h = (now - self.last_mem_sample).as_secs_f64() / 3600.0;
        self.last_mem_sample = now;

        let rss_gb = current_rss_gb().unwrap_or(0.0);
        self.ram_hours += rss_gb * dt_h;
    }
}
