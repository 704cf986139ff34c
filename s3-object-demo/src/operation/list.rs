/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::primitives::DateTime;
use aws_sdk_s3::types::{Object, Owner};

use super::OperationContext;
use crate::error::Error;
use crate::render::{Render, Value};

/// Owner of a listed object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectOwner {
    display_name: Option<String>,
    id: Option<String>,
}

impl ObjectOwner {
    /// Display name of the owner
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Canonical user ID of the owner
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl From<Owner> for ObjectOwner {
    fn from(value: Owner) -> Self {
        Self {
            display_name: value.display_name,
            id: value.id,
        }
    }
}

/// A single entry of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    key: Option<String>,
    size: Option<i64>,
    e_tag: Option<String>,
    last_modified: Option<DateTime>,
    owner: Option<ObjectOwner>,
    storage_class: Option<String>,
}

impl ObjectSummary {
    /// Object key
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Size in bytes
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// Entity tag
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Last modification time
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }

    /// Object owner. Only returned when the listing asked for it.
    pub fn owner(&self) -> Option<&ObjectOwner> {
        self.owner.as_ref()
    }

    /// Storage class (e.g. `STANDARD`)
    pub fn storage_class(&self) -> Option<&str> {
        self.storage_class.as_deref()
    }
}

impl From<Object> for ObjectSummary {
    fn from(value: Object) -> Self {
        Self {
            key: value.key,
            size: value.size,
            e_tag: value.e_tag,
            last_modified: value.last_modified,
            owner: value.owner.map(Into::into),
            storage_class: value.storage_class.map(|class| class.as_str().to_owned()),
        }
    }
}

impl Render for ObjectSummary {
    fn render(&self) -> Value {
        let owner = self.owner.as_ref().map(|owner| {
            Value::structure()
                .field_opt("DisplayName", owner.display_name())
                .field_opt("ID", owner.id())
        });
        Value::structure()
            .field_opt("ETag", self.e_tag())
            .field_opt("Key", self.key())
            .field_opt("LastModified", self.last_modified)
            .field_opt("Owner", owner)
            .field_opt("Size", self.size)
            .field_opt("StorageClass", self.storage_class())
    }
}

/// First page of the listing under the key prefix
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutput {
    /// Objects on this page, in the order S3 returned them
    pub contents: Vec<ObjectSummary>,

    /// Whether more results are available than were returned
    pub is_truncated: Option<bool>,

    /// Token to continue the listing from. Not followed.
    pub next_continuation_token: Option<String>,

    /// Maximum number of keys the page could contain
    pub max_keys: Option<i32>,

    /// Number of keys on this page
    pub key_count: Option<i32>,

    /// Bucket name
    pub name: Option<String>,

    /// Prefix the listing was restricted to
    pub prefix: Option<String>,
}

impl ListOutput {
    /// Objects on this page
    pub fn contents(&self) -> &[ObjectSummary] {
        &self.contents
    }

    /// Whether more results are available than were returned
    pub fn is_truncated(&self) -> bool {
        self.is_truncated.unwrap_or(false)
    }
}

impl From<ListObjectsV2Output> for ListOutput {
    fn from(value: ListObjectsV2Output) -> Self {
        Self {
            contents: value
                .contents
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            is_truncated: value.is_truncated,
            next_continuation_token: value.next_continuation_token,
            max_keys: value.max_keys,
            key_count: value.key_count,
            name: value.name,
            prefix: value.prefix,
        }
    }
}

impl Render for ListOutput {
    fn render(&self) -> Value {
        let contents: Vec<Value> = self.contents.iter().map(Render::render).collect();
        Value::structure()
            .field("Contents", contents)
            .field_opt("IsTruncated", self.is_truncated)
            .field_opt("KeyCount", self.key_count)
            .field_opt("MaxKeys", self.max_keys)
            .field_opt("Name", self.name.as_deref())
            .field_opt("NextContinuationToken", self.next_continuation_token.as_deref())
            .field_opt("Prefix", self.prefix.as_deref())
    }
}

/// Fetch the first page of objects whose key starts with the configured prefix.
pub(crate) async fn list_objects(ctx: &OperationContext<'_>) -> Result<ListOutput, Error> {
    let resp = ctx
        .client()
        .list_objects_v2()
        .bucket(ctx.bucket())
        .prefix(ctx.keys().prefix())
        .fetch_owner(true)
        .send()
        .await?;

    let output: ListOutput = resp.into();
    if output.is_truncated() {
        tracing::debug!(
            "listing of {} truncated after {} keys; remaining pages are not fetched",
            ctx.keys().prefix(),
            output.contents.len()
        );
    }
    Ok(output)
}
