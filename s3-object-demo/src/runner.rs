/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::future::Future;
use std::io::Write;

use tracing::Instrument;

use crate::classify::{classify, Classification, RequestFailure};
use crate::error::Error;
use crate::operation::{describe, duplicate, list, remove, upload, OperationContext};
use crate::render::Render;
use crate::types::{ObjectKeys, RequestFailurePolicy, Step};
use crate::Config;

/// How a single step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The response was received and printed
    Completed,
    /// The request failed and the run continued past it
    Failed(RequestFailure),
}

/// Outcome of every step that was executed, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    steps: Vec<(Step, StepOutcome)>,
}

impl RunReport {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push((step, outcome));
    }

    /// Executed steps and how they ended
    pub fn steps(&self) -> &[(Step, StepOutcome)] {
        &self.steps
    }

    /// Steps whose request failed
    pub fn failures(&self) -> impl Iterator<Item = (Step, &RequestFailure)> + '_ {
        self.steps.iter().filter_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(failure) => Some((*step, failure)),
            StepOutcome::Completed => None,
        })
    }

    /// True when all steps ran and none failed
    pub fn is_success(&self) -> bool {
        self.steps.len() == Step::ALL.len() && self.failures().next().is_none()
    }
}

impl FromIterator<(Step, StepOutcome)> for RunReport {
    fn from_iter<I: IntoIterator<Item = (Step, StepOutcome)>>(iter: I) -> Self {
        RunReport {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Error that stopped a run, along with the report of the steps executed before it.
///
/// The step that hit a fault is not part of the report. A request failure that aborted the run
/// is recorded as the last step.
#[derive(Debug)]
pub struct RunError {
    error: Error,
    report: RunReport,
}

impl RunError {
    /// Creates a new [`RunError`] from the stopping error and the partial report.
    pub fn new(error: Error, report: RunReport) -> RunError {
        RunError { error, report }
    }

    /// The error that stopped the run
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Steps executed before the run stopped
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Consume the error, returning its parts
    pub fn into_parts(self) -> (Error, RunReport) {
        (self.error, self.report)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run stopped after {} of {} steps",
            self.report.steps().len(),
            Step::ALL.len()
        )
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Runs the put, list, head, copy, delete sequence against the configured bucket.
#[derive(Debug, Clone)]
pub struct Runner {
    config: Config,
}

impl Runner {
    /// Creates a new runner from a config.
    pub fn new(config: Config) -> Runner {
        Runner { config }
    }

    /// Returns the runner's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute every step in order, writing each response to `out` before the next request is
    /// sent.
    ///
    /// Returns an error on the first fault, or on the first request failure when the policy is
    /// [`RequestFailurePolicy::Abort`]. The error carries the report of the steps executed so far.
    /// Earlier steps are never undone.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport, RunError> {
        let mut report = RunReport::default();
        match self.run_steps(out, &mut report).await {
            Ok(()) => {
                tracing::info!(
                    "run finished: {} of {} steps failed",
                    report.failures().count(),
                    report.steps().len()
                );
                Ok(report)
            }
            Err(err) => Err(RunError::new(err, report)),
        }
    }

    async fn run_steps<W: Write>(&self, out: &mut W, report: &mut RunReport) -> Result<(), Error> {
        let keys = ObjectKeys::new(self.config.bucket(), self.config.key_prefix());
        let ctx = OperationContext::new(&self.config, &keys);

        tracing::debug!(
            "starting run against bucket {} with prefix {}",
            self.config.bucket(),
            keys.prefix()
        );

        self.step(Step::Upload, upload::put_object(&ctx), out, report)
            .await?;
        self.step(Step::List, list::list_objects(&ctx), out, report)
            .await?;
        self.step(Step::Describe, describe::head_object(&ctx), out, report)
            .await?;
        self.step(Step::Duplicate, duplicate::copy_object(&ctx), out, report)
            .await?;
        self.step(Step::Remove, remove::delete_object(&ctx), out, report)
            .await
    }

    async fn step<O, F, W>(
        &self,
        step: Step,
        operation: F,
        out: &mut W,
        report: &mut RunReport,
    ) -> Result<(), Error>
    where
        O: Render,
        F: Future<Output = Result<O, Error>>,
        W: Write,
    {
        let result = operation
            .instrument(tracing::debug_span!("step", operation = %step))
            .await;

        match classify(result.as_ref().err()) {
            Classification::None => {}
            Classification::RequestFailure(failure) => {
                log_request_failure(step, failure);
                report.record(step, StepOutcome::Failed(failure.clone()));
                if self.config.request_failure_policy() == RequestFailurePolicy::Continue {
                    return Ok(());
                }
                tracing::error!("{step} failed, aborting remaining steps");
            }
            Classification::Fault(err) => {
                tracing::error!(
                    "{step} failed with an unrecoverable error: {}",
                    aws_sdk_s3::error::DisplayErrorContext(err)
                );
            }
        }

        let output = result?;
        writeln!(out, "{step}: {}", output.render())?;
        out.flush()?;
        report.record(step, StepOutcome::Completed);
        Ok(())
    }
}

fn log_request_failure(step: Step, failure: &RequestFailure) {
    tracing::error!(
        "{step} failed: code={} message={} error={} cause={}",
        failure.code().unwrap_or("-"),
        failure.message().unwrap_or("-"),
        failure.error(),
        failure.cause().unwrap_or("-"),
    );
    if failure.has_response() {
        tracing::error!(
            "{step} failed: status={} request_id={}",
            failure.status().unwrap_or_default(),
            failure.request_id().unwrap_or("-"),
        );
    }
}
