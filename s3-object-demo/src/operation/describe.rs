/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::BTreeMap;

use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::primitives::DateTime;

use super::OperationContext;
use crate::error::Error;
use crate::render::{Render, Value};

/// Metadata of the uploaded object, fetched without its body
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeOutput {
    /// Range units the object supports (`bytes`)
    pub accept_ranges: Option<String>,

    /// Size of the object in bytes
    pub content_length: Option<i64>,

    /// MIME type of the object
    pub content_type: Option<String>,

    /// Entity tag of the object
    pub e_tag: Option<String>,

    /// Last modification time
    pub last_modified: Option<DateTime>,

    /// User defined metadata (`x-amz-meta-*`), sorted by key. May be empty.
    pub metadata: BTreeMap<String, String>,
}

impl DescribeOutput {
    /// Size of the object in bytes
    pub fn content_length(&self) -> Option<i64> {
        self.content_length
    }

    /// MIME type of the object
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Entity tag of the object
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// User defined metadata
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl From<HeadObjectOutput> for DescribeOutput {
    fn from(value: HeadObjectOutput) -> Self {
        Self {
            accept_ranges: value.accept_ranges,
            content_length: value.content_length,
            content_type: value.content_type,
            e_tag: value.e_tag,
            last_modified: value.last_modified,
            metadata: value.metadata.unwrap_or_default().into_iter().collect(),
        }
    }
}

impl Render for DescribeOutput {
    fn render(&self) -> Value {
        let metadata = self
            .metadata
            .iter()
            .fold(Value::structure(), |meta, (k, v)| meta.field(k.as_str(), v.as_str()));
        Value::structure()
            .field_opt("AcceptRanges", self.accept_ranges.as_deref())
            .field_opt("ContentLength", self.content_length)
            .field_opt("ContentType", self.content_type())
            .field_opt("ETag", self.e_tag())
            .field_opt("LastModified", self.last_modified)
            .field("Metadata", metadata)
    }
}

/// Fetch the uploaded object's metadata.
pub(crate) async fn head_object(ctx: &OperationContext<'_>) -> Result<DescribeOutput, Error> {
    let resp = ctx
        .client()
        .head_object()
        .bucket(ctx.bucket())
        .key(ctx.keys().source_key())
        .send()
        .await?;
    Ok(resp.into())
}
