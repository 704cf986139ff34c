/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::path::PathBuf;
use std::process::ExitCode;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use s3_object_demo::classify::{classify, Classification};
use s3_object_demo::types::RequestFailurePolicy;
use s3_object_demo::{RunError, RunReport};

/// Exit status when every step completed
const EXIT_SUCCESS: u8 = 0;

/// Exit status when at least one request failed
const EXIT_REQUEST_FAILED: u8 = 1;

/// Exit status when the run was stopped by a fault
const EXIT_FAULT: u8 = 2;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "s3-object-demo")]
#[command(
    about = "Uploads a local file to S3, then lists, heads, copies and deletes it, printing every response."
)]
pub struct Args {
    /// Bucket to run against
    #[arg(long, default_value = s3_object_demo::DEFAULT_BUCKET)]
    bucket: String,

    /// Region of the bucket
    #[arg(long, default_value = s3_object_demo::DEFAULT_REGION)]
    region: String,

    /// Key prefix; objects are written to <KEY>/path-to-readme.md and <KEY>/path-to-readme-copy.md
    #[arg(long, default_value = s3_object_demo::DEFAULT_KEY_PREFIX)]
    key: String,

    /// Local file to upload
    #[arg(long, default_value = s3_object_demo::DEFAULT_SOURCE_PATH)]
    source: PathBuf,

    /// Send requests to an S3 compatible endpoint
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Use path-style addressing
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    force_path_style: bool,

    /// What to do when S3 rejects a request <continue | abort>
    #[arg(long, default_value_t = RequestFailurePolicy::Continue)]
    on_request_failure: RequestFailurePolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("{args:?}");

    let mut loader = s3_object_demo::from_env()
        .bucket(args.bucket)
        .key_prefix(args.key)
        .source_path(args.source)
        .region(args.region)
        .force_path_style(args.force_path_style)
        .request_failure_policy(args.on_request_failure);
    if let Some(endpoint_url) = args.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    let config = match loader.load().await {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", DisplayErrorContext(&err));
            return ExitCode::from(EXIT_FAULT);
        }
    };

    let runner = s3_object_demo::Runner::new(config);
    let mut stdout = std::io::stdout().lock();
    let result = runner.run(&mut stdout).await;
    match &result {
        Ok(report) => {
            for (step, failure) in report.failures() {
                tracing::warn!("{step} did not complete: {}", failure.error());
            }
        }
        Err(err) => {
            if let Classification::Fault(fault) = classify(Some(err.error())) {
                tracing::error!("run aborted: {}", DisplayErrorContext(fault));
            }
        }
    }
    ExitCode::from(exit_status(&result))
}

/// Map the outcome of a run onto the process exit status.
fn exit_status(result: &Result<RunReport, RunError>) -> u8 {
    match result {
        Ok(report) if report.is_success() => EXIT_SUCCESS,
        Ok(_) => EXIT_REQUEST_FAILED,
        Err(err) => match classify(Some(err.error())) {
            Classification::RequestFailure(_) => EXIT_REQUEST_FAILED,
            _ => EXIT_FAULT,
        },
    }
}
