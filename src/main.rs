use anyhow::{Context, Result};
use chrono::Local;
use std::sync::mpsc::channel;
use std::thread;

use vizin::evaluation::TraceFormat;
use vizin::tasks::TrainTestEvaluator;
use vizin::ui::cli::drivers::InquireDriver;
use vizin::ui::cli::wizard::prompt_choice;
use vizin::ui::types::build::{build_evaluator, build_learner, build_stream};
use vizin::ui::types::choices::TaskChoice;

fn main() -> Result<()> {
    let driver = InquireDriver;
    let task = prompt_choice::<TaskChoice, _>(&driver)?;

    match task {
        TaskChoice::EvaluateTrainTest(p) => {
            let learner = build_learner(p.learner)?;
            let train_stream = build_stream(p.train_stream)?;
            let test_stream = build_stream(p.test_stream)?;
            let evaluator = build_evaluator(p.evaluator)?;

            let (tx, rx) = channel();
            let printer = thread::spawn(move || {
                for snapshot in rx {
                    println!("{snapshot}");
                }
            });

            let mut task = TrainTestEvaluator::new(
                learner,
                train_stream,
                test_stream,
                evaluator,
                p.max_train_instances,
                p.max_test_instances,
                p.sample_frequency,
                p.mem_check_frequency,
            )?
            .with_progress(tx);

            task.run().context("evaluation task failed")?;

            let performance = task.performance();
            let trained_on = task.trained_on();
            let fit_seconds = task.fit_seconds();

            let out = format!("vizin-eval-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
            task.trace()
                .export(&out, TraceFormat::Csv)
                .with_context(|| format!("failed to export trace to {out}"))?;

            // dropping the task closes the progress channel
            drop(task);
            printer.join().expect("progress printer panicked");

            println!();
            println!("trained on {trained_on} instances in {fit_seconds:.3}s");
            for m in performance {
                println!("{:>28}: {:.6}", m.name, m.value);
            }
            println!("trace exported to {out}");
        }
    }
    Ok(())
}
