/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use crate::error::{self, Error};
use crate::types::RequestFailurePolicy;
use crate::{DEFAULT_BUCKET, DEFAULT_KEY_PREFIX, DEFAULT_SOURCE_PATH};

/// Config loader
pub mod loader;

/// Configuration for a [`Runner`](crate::runner::Runner)
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    key_prefix: String,
    source_path: PathBuf,
    request_failure_policy: RequestFailurePolicy,
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket every request targets
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The prefix both object keys are derived from
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// The local file that gets uploaded
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// What to do when S3 rejects a request
    pub fn request_failure_policy(&self) -> RequestFailurePolicy {
        self.request_failure_policy
    }

    /// The Amazon S3 client instance that will be used to send requests to S3.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone)]
pub struct Builder {
    bucket: String,
    key_prefix: String,
    source_path: PathBuf,
    request_failure_policy: RequestFailurePolicy,
    client: Option<aws_sdk_s3::Client>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_owned(),
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            request_failure_policy: RequestFailurePolicy::default(),
            client: None,
        }
    }
}

impl Builder {
    /// Bucket to run against.
    ///
    /// Default is [`DEFAULT_BUCKET`](crate::DEFAULT_BUCKET)
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Key prefix used to derive the uploaded key (`<prefix>/path-to-readme.md`) and the copy
    /// key (`<prefix>/path-to-readme-copy.md`). Also used as the listing prefix.
    ///
    /// Default is [`DEFAULT_KEY_PREFIX`](crate::DEFAULT_KEY_PREFIX)
    pub fn key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Local file to upload.
    ///
    /// Default is [`DEFAULT_SOURCE_PATH`](crate::DEFAULT_SOURCE_PATH)
    pub fn source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.source_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the policy applied when S3 rejects a request.
    ///
    /// Default is [RequestFailurePolicy::Continue].
    pub fn request_failure_policy(mut self, policy: RequestFailurePolicy) -> Self {
        self.request_failure_policy = policy;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, Error> {
        if self.bucket.is_empty() {
            return Err(error::invalid_input("bucket must not be empty"));
        }
        let client = self
            .client
            .ok_or_else(|| error::invalid_input("an S3 client must be set"))?;

        Ok(Config {
            bucket: self.bucket,
            key_prefix: self.key_prefix,
            source_path: self.source_path,
            request_failure_policy: self.request_failure_policy,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::error::ErrorKind;
    use crate::types::RequestFailurePolicy;
    use std::path::Path;

    fn test_client() -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
            .region(aws_sdk_s3::config::Region::from_static("us-west-2"))
            .with_test_defaults()
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }

    #[test]
    fn test_defaults() {
        let config = Config::builder().client(test_client()).build().unwrap();
        assert_eq!(crate::DEFAULT_BUCKET, config.bucket());
        assert_eq!(crate::DEFAULT_KEY_PREFIX, config.key_prefix());
        assert_eq!(Path::new(crate::DEFAULT_SOURCE_PATH), config.source_path());
        assert_eq!(
            RequestFailurePolicy::Continue,
            config.request_failure_policy()
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::builder()
            .bucket("b")
            .key_prefix("k")
            .source_path("/tmp/other.md")
            .request_failure_policy(RequestFailurePolicy::Abort)
            .client(test_client())
            .build()
            .unwrap();
        assert_eq!("b", config.bucket());
        assert_eq!("k", config.key_prefix());
        assert_eq!(Path::new("/tmp/other.md"), config.source_path());
        assert_eq!(RequestFailurePolicy::Abort, config.request_failure_policy());
    }

    #[test]
    fn test_missing_client() {
        let err = Config::builder().build().unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    #[test]
    fn test_empty_bucket() {
        let err = Config::builder()
            .bucket("")
            .client(test_client())
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
