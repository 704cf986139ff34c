/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;

use super::OperationContext;
use crate::error::Error;
use crate::render::{Render, Value};

/// Acknowledgement of deleting the copy. Usually empty.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveOutput {
    /// Whether a delete marker was created (versioned buckets only)
    pub delete_marker: Option<bool>,

    /// Version ID of the delete marker
    pub version_id: Option<String>,
}

impl From<DeleteObjectOutput> for RemoveOutput {
    fn from(value: DeleteObjectOutput) -> Self {
        Self {
            delete_marker: value.delete_marker,
            version_id: value.version_id,
        }
    }
}

impl Render for RemoveOutput {
    fn render(&self) -> Value {
        Value::structure()
            .field_opt("DeleteMarker", self.delete_marker)
            .field_opt("VersionId", self.version_id.as_deref())
    }
}

/// Delete `<prefix>/path-to-readme-copy.md`.
pub(crate) async fn delete_object(ctx: &OperationContext<'_>) -> Result<RemoveOutput, Error> {
    let resp = ctx
        .client()
        .delete_object()
        .bucket(ctx.bucket())
        .key(ctx.keys().copy_key())
        .send()
        .await?;
    Ok(resp.into())
}
