/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::str::FromStr;

use crate::error::{self, Error};

/// File name (relative to the key prefix) the source file is uploaded as
const SOURCE_OBJECT_NAME: &str = "path-to-readme.md";

/// File name (relative to the key prefix) the uploaded object is copied to
const COPY_OBJECT_NAME: &str = "path-to-readme-copy.md";

/// Policy for how to handle a request that S3 rejected (or that failed in transit).
///
/// Faults (anything that isn't a request failure) always stop the run regardless of this policy.
///
/// Default is to continue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestFailurePolicy {
    /// Log the failure and move on to the next step. Nothing is printed for the failed step.
    #[default]
    Continue,
    /// Log the failure and stop the run.
    Abort,
}

impl FromStr for RequestFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(RequestFailurePolicy::Continue),
            "abort" => Ok(RequestFailurePolicy::Abort),
            other => Err(error::invalid_input(format!(
                "unknown request failure policy `{other}`, expected `continue` or `abort`"
            ))),
        }
    }
}

impl fmt::Display for RequestFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailurePolicy::Continue => f.write_str("continue"),
            RequestFailurePolicy::Abort => f.write_str("abort"),
        }
    }
}

/// The steps of a run, in the order they are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Upload the source file
    Upload,
    /// List objects under the key prefix
    List,
    /// Fetch the uploaded object's metadata
    Describe,
    /// Copy the uploaded object
    Duplicate,
    /// Delete the copy
    Remove,
}

impl Step {
    /// All steps in execution order
    pub const ALL: [Step; 5] = [
        Step::Upload,
        Step::List,
        Step::Describe,
        Step::Duplicate,
        Step::Remove,
    ];

    /// Name of the S3 operation this step performs
    pub fn operation_name(&self) -> &'static str {
        match self {
            Step::Upload => "PutObject",
            Step::List => "ListObjectsV2",
            Step::Describe => "HeadObject",
            Step::Duplicate => "CopyObject",
            Step::Remove => "DeleteObject",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation_name())
    }
}

/// The object keys a run touches, all derived from the bucket and key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeys {
    prefix: String,
    source_key: String,
    copy_key: String,
    copy_source: String,
}

impl ObjectKeys {
    /// Derive the keys for `bucket` and `prefix`
    pub fn new(bucket: &str, prefix: &str) -> Self {
        let source_key = format!("{prefix}/{SOURCE_OBJECT_NAME}");
        let copy_key = format!("{prefix}/{COPY_OBJECT_NAME}");
        let copy_source = format!("{bucket}/{source_key}");
        Self {
            prefix: prefix.to_owned(),
            source_key,
            copy_key,
            copy_source,
        }
    }

    /// Prefix used for listing
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key the source file is uploaded to (`<prefix>/path-to-readme.md`)
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Key the uploaded object is copied to and later deleted from
    /// (`<prefix>/path-to-readme-copy.md`)
    pub fn copy_key(&self) -> &str {
        &self.copy_key
    }

    /// `CopySource` value for the copy request (`<bucket>/<prefix>/path-to-readme.md`)
    pub fn copy_source(&self) -> &str {
        &self.copy_source
    }
}
