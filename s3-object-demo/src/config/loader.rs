/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_types::SdkConfig;

use crate::config::Builder;
use crate::error::Error;
use crate::types::RequestFailurePolicy;
use crate::Config;

/// Load runner [`Config`] from the environment.
///
/// Region and credentials fall back to the default AWS provider chains when they are not set
/// explicitly.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
    region: Option<String>,
    endpoint_url: Option<String>,
    force_path_style: bool,
    credentials_provider: Option<SharedCredentialsProvider>,
}

impl ConfigLoader {
    /// Bucket to run against.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.builder = self.builder.bucket(bucket);
        self
    }

    /// Key prefix both object keys are derived from.
    pub fn key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.builder = self.builder.key_prefix(key_prefix);
        self
    }

    /// Local file to upload.
    pub fn source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.source_path(path);
        self
    }

    /// Set the policy applied when S3 rejects a request.
    pub fn request_failure_policy(mut self, policy: RequestFailurePolicy) -> Self {
        self.builder = self.builder.request_failure_policy(policy);
        self
    }

    /// Region to send requests to.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send requests to an S3 compatible endpoint instead of Amazon S3.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Use path-style addressing (`https://endpoint/bucket/key`).
    pub fn force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Resolve credentials with `provider` instead of the default credentials chain.
    pub fn credentials_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(provider));
        self
    }

    /// Load the configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub async fn load(self) -> Result<Config, Error> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = self.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(provider) = self.credentials_provider {
            loader = loader.credentials_provider(provider);
        }
        let shared_config = loader.load().await;
        let s3_client = s3_client(&shared_config, self.endpoint_url, self.force_path_style);

        self.builder.client(s3_client).build()
    }
}

fn s3_client(
    shared_config: &SdkConfig,
    endpoint_url: Option<String>,
    force_path_style: bool,
) -> aws_sdk_s3::Client {
    let mut s3_config = aws_sdk_s3::config::Builder::from(shared_config);
    if let Some(endpoint_url) = endpoint_url {
        tracing::debug!("using custom endpoint {endpoint_url}");
        s3_config = s3_config.endpoint_url(endpoint_url);
    }
    let s3_config = s3_config.force_path_style(force_path_style).build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
