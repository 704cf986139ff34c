/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::types::ObjectKeys;
use crate::Config;

/// Upload the source file (`PutObject`)
pub mod upload;

/// List objects under the key prefix (`ListObjectsV2`)
pub mod list;

/// Fetch object metadata (`HeadObject`)
pub mod describe;

/// Copy an object within the bucket (`CopyObject`)
pub mod duplicate;

/// Delete an object (`DeleteObject`)
pub mod remove;

/// Everything a single operation needs to build its request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperationContext<'a> {
    config: &'a Config,
    keys: &'a ObjectKeys,
}

impl<'a> OperationContext<'a> {
    pub(crate) fn new(config: &'a Config, keys: &'a ObjectKeys) -> Self {
        Self { config, keys }
    }

    /// The S3 client to use for SDK operations
    pub(crate) fn client(&self) -> &'a aws_sdk_s3::Client {
        self.config.client()
    }

    pub(crate) fn config(&self) -> &'a Config {
        self.config
    }

    pub(crate) fn bucket(&self) -> &'a str {
        self.config.bucket()
    }

    pub(crate) fn keys(&self) -> &'a ObjectKeys {
        self.keys
    }
}
