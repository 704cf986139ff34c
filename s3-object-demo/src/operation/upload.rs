/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;

use super::OperationContext;
use crate::error::{self, Error};
use crate::render::{Render, Value};

/// Response fields of uploading the source file
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutput {
    /// Entity tag for the uploaded object.
    pub e_tag: Option<String>,

    /// Version ID of the object, if the bucket is versioned.
    pub version_id: Option<String>,

    /// The server-side encryption algorithm used when storing the object.
    pub server_side_encryption: Option<ServerSideEncryption>,
}

impl UploadOutput {
    /// Entity tag for the uploaded object.
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Version ID of the object.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }
}

impl From<PutObjectOutput> for UploadOutput {
    fn from(value: PutObjectOutput) -> Self {
        Self {
            e_tag: value.e_tag,
            version_id: value.version_id,
            server_side_encryption: value.server_side_encryption,
        }
    }
}

impl Render for UploadOutput {
    fn render(&self) -> Value {
        Value::structure()
            .field_opt("ETag", self.e_tag())
            .field_opt(
                "ServerSideEncryption",
                self.server_side_encryption.as_ref().map(|sse| sse.as_str()),
            )
            .field_opt("VersionId", self.version_id())
    }
}

/// Upload the source file to `<prefix>/path-to-readme.md`.
///
/// The file is opened before any request is built so a missing or unreadable file never results
/// in a request. The handle moves into the request body and is closed once the call returns.
pub(crate) async fn put_object(ctx: &OperationContext<'_>) -> Result<UploadOutput, Error> {
    let path = ctx.config().source_path();
    let file = tokio::fs::File::open(path).await?;
    let content_length = file.metadata().await?.len();
    let content_length: i64 = content_length.try_into().map_err(|_| {
        error::invalid_input(format!("content_length:{} is invalid.", content_length))
    })?;
    tracing::debug!(
        "uploading {} ({content_length} bytes) to {}",
        path.display(),
        ctx.keys().source_key()
    );

    let body = ByteStream::read_from().file(file).build().await?;

    let resp = ctx
        .client()
        .put_object()
        .bucket(ctx.bucket())
        .key(ctx.keys().source_key())
        .content_length(content_length)
        .body(body)
        .send()
        .await?;
    Ok(resp.into())
}
