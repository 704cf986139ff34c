/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Walks a single object through the basic Amazon S3 object operations.
//!
//! The [`Runner`] uploads a local file, lists the objects under the configured key prefix,
//! fetches the uploaded object's metadata, copies it to a second key and finally deletes the
//! copy. Each response is rendered to an output sink as soon as it arrives.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = s3_object_demo::from_env()
//!     .region("ap-northeast-1")
//!     .bucket("my-bucket")
//!     .key_prefix("example-key")
//!     .load()
//!     .await?;
//!
//! let runner = s3_object_demo::Runner::new(config);
//! let report = runner.run(&mut std::io::stdout()).await?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! Errors returned by S3 are classified by [`classify::classify`]. Whether a request failure
//! stops the run is decided by [`types::RequestFailurePolicy`]; any other error is a fault and
//! always stops it.

/// Default bucket used when none is configured
pub const DEFAULT_BUCKET: &str = "your-example-bucket-name";

/// Default region used when none is configured
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Default key prefix used when none is configured
pub const DEFAULT_KEY_PREFIX: &str = "your-example-s3-key-name";

/// Default local file that gets uploaded
pub const DEFAULT_SOURCE_PATH: &str = "./README.md";

/// Error types emitted by `s3-object-demo`
pub mod error;

/// Error classification shared by every step
pub mod classify;

/// Common types used by `s3-object-demo`
pub mod types;

/// Runner configuration
pub mod config;

/// The individual S3 operations performed by the runner
pub mod operation;

/// Text rendering of operation responses
pub mod render;

/// The step sequence
pub mod runner;

use self::config::loader::ConfigLoader;
pub use self::config::Config;
pub use self::runner::{RunError, RunReport, Runner};

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
