/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::copy_object::CopyObjectOutput;
use aws_sdk_s3::primitives::DateTime;

use super::OperationContext;
use crate::error::Error;
use crate::render::{Render, Value};

/// Result of copying the uploaded object to the copy key
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateOutput {
    /// Entity tag of the new copy
    pub e_tag: Option<String>,

    /// Creation time of the new copy
    pub last_modified: Option<DateTime>,

    /// Version ID of the new copy, if the bucket is versioned
    pub version_id: Option<String>,
}

impl DuplicateOutput {
    /// Entity tag of the new copy
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Creation time of the new copy
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }
}

impl From<CopyObjectOutput> for DuplicateOutput {
    fn from(value: CopyObjectOutput) -> Self {
        let (e_tag, last_modified) = value
            .copy_object_result
            .map(|result| (result.e_tag, result.last_modified))
            .unwrap_or_default();
        Self {
            e_tag,
            last_modified,
            version_id: value.version_id,
        }
    }
}

impl Render for DuplicateOutput {
    fn render(&self) -> Value {
        let result = Value::structure()
            .field_opt("ETag", self.e_tag())
            .field_opt("LastModified", self.last_modified);
        Value::structure()
            .field("CopyObjectResult", result)
            .field_opt("VersionId", self.version_id.as_deref())
    }
}

/// Copy `<bucket>/<prefix>/path-to-readme.md` to `<prefix>/path-to-readme-copy.md` in the same
/// bucket.
pub(crate) async fn copy_object(ctx: &OperationContext<'_>) -> Result<DuplicateOutput, Error> {
    let resp = ctx
        .client()
        .copy_object()
        .bucket(ctx.bucket())
        .copy_source(ctx.keys().copy_source())
        .key(ctx.keys().copy_key())
        .send()
        .await?;
    Ok(resp.into())
}

#[cfg(test)]
mod tests {
    use super::{copy_object, DuplicateOutput};
    use crate::operation::OperationContext;
    use crate::render::Render;
    use crate::types::ObjectKeys;
    use crate::Config;
    use aws_sdk_s3::operation::copy_object::CopyObjectOutput;
    use aws_sdk_s3::primitives::DateTime;
    use aws_sdk_s3::types::CopyObjectResult;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    #[tokio::test]
    async fn test_copy_object() {
        let copy_rule = mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(|r| {
                r.bucket() == Some("b")
                    && r.copy_source() == Some("b/k/path-to-readme.md")
                    && r.key() == Some("k/path-to-readme-copy.md")
            })
            .then_output(|| {
                CopyObjectOutput::builder()
                    .copy_object_result(
                        CopyObjectResult::builder()
                            .e_tag("\"copy-etag\"")
                            .last_modified(DateTime::from_secs(1432194907))
                            .build(),
                    )
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&copy_rule]);
        let config = Config::builder()
            .bucket("b")
            .key_prefix("k")
            .client(client)
            .build()
            .unwrap();
        let keys = ObjectKeys::new(config.bucket(), config.key_prefix());

        let output = copy_object(&OperationContext::new(&config, &keys))
            .await
            .unwrap();
        assert_eq!(Some("\"copy-etag\""), output.e_tag());
        assert_eq!(Some(&DateTime::from_secs(1432194907)), output.last_modified());
    }

    #[test]
    fn test_render_copy() {
        let output: DuplicateOutput = CopyObjectOutput::builder()
            .copy_object_result(
                CopyObjectResult::builder()
                    .e_tag("\"copy-etag\"")
                    .last_modified(DateTime::from_secs(1432194907))
                    .build(),
            )
            .build()
            .into();
        assert_eq!(
            "{\n  CopyObjectResult: {\n    ETag: \"\\\"copy-etag\\\"\",\n    LastModified: 2015-05-21T07:55:07Z\n  }\n}",
            output.render().to_string()
        );
    }
}
