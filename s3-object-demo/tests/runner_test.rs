/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_mocks::{mock, mock_client, Rule, RuleMode};
use s3_object_demo::error::ErrorKind;
use s3_object_demo::runner::StepOutcome;
use s3_object_demo::types::Step;
use s3_object_demo::{Config, Runner};
use test_common::{
    copy_object_output, create_source_file, delete_object_output, head_object_output,
    list_objects_output, put_object_output, SharedBuffer, COPY_ETAG, UPLOAD_ETAG,
};

const BUCKET: &str = "b";
const PREFIX: &str = "k";
const SOURCE_SIZE: usize = 37;

/// Rules for a backend where every step succeeds, in execution order.
fn happy_path_rules() -> Vec<Rule> {
    vec![
        mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| r.bucket() == Some(BUCKET) && r.key() == Some("k/path-to-readme.md"))
            .then_output(put_object_output),
        mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|r| r.bucket() == Some(BUCKET) && r.prefix() == Some(PREFIX))
            .then_output(|| {
                list_objects_output(BUCKET, PREFIX, "k/path-to-readme.md", SOURCE_SIZE as i64)
            }),
        mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("k/path-to-readme.md"))
            .then_output(|| head_object_output(SOURCE_SIZE as i64)),
        mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(|r| {
                r.copy_source() == Some("b/k/path-to-readme.md")
                    && r.key() == Some("k/path-to-readme-copy.md")
            })
            .then_output(copy_object_output),
        mock!(aws_sdk_s3::Client::delete_object)
            .match_requests(|r| r.key() == Some("k/path-to-readme-copy.md"))
            .then_output(delete_object_output),
    ]
}

fn test_runner(client: aws_sdk_s3::Client, source: &std::path::Path) -> Runner {
    let config = Config::builder()
        .bucket(BUCKET)
        .key_prefix(PREFIX)
        .source_path(source)
        .client(client)
        .build()
        .unwrap();
    Runner::new(config)
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in output:\n{haystack}"))
}

#[tokio::test]
async fn test_successful_run_prints_every_response_in_order() {
    let (_dir, source) = create_source_file(SOURCE_SIZE);
    let rules = happy_path_rules();
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &rules);
    let runner = test_runner(client, &source);

    let mut out = Vec::new();
    let report = runner.run(&mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(report.is_success());
    let executed: Vec<_> = report.steps().iter().map(|(step, _)| *step).collect();
    assert_eq!(Step::ALL.to_vec(), executed);
    for rule in &rules {
        assert_eq!(1, rule.num_calls());
    }

    let upload = position(&out, "PutObject: {");
    let list = position(&out, "ListObjectsV2: {");
    let head = position(&out, "HeadObject: {");
    let copy = position(&out, "CopyObject: {");
    let delete = position(&out, "DeleteObject: {}");
    assert!(upload < list && list < head && head < copy && copy < delete);

    let upload_etag = format!("ETag: {UPLOAD_ETAG:?}");
    let copy_etag = format!("ETag: {COPY_ETAG:?}");
    assert!(out[upload..list].contains(&upload_etag));
    assert!(out[list..head].contains("Key: \"k/path-to-readme.md\""));
    assert!(out[list..head].contains("Size: 37"));
    assert!(out[head..copy].contains("ContentLength: 37"));
    assert!(out[head..copy].contains("Metadata: {}"));
    assert!(out[copy..delete].contains(&copy_etag));
}

#[tokio::test]
async fn test_response_is_printed_before_next_request() {
    let (_dir, source) = create_source_file(SOURCE_SIZE);
    let buffer = SharedBuffer::default();

    let printed = |label: &'static str| {
        let buffer = buffer.clone();
        move || buffer.contents().contains(label)
    };
    let after_upload = printed("PutObject: {");
    let after_list = printed("ListObjectsV2: {");
    let after_head = printed("HeadObject: {");
    let after_copy = printed("CopyObject: {");

    let rules = [
        mock!(aws_sdk_s3::Client::put_object).then_output(put_object_output),
        mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(move |_| after_upload())
            .then_output(|| list_objects_output(BUCKET, PREFIX, "k/path-to-readme.md", 37)),
        mock!(aws_sdk_s3::Client::head_object)
            .match_requests(move |_| after_list())
            .then_output(|| head_object_output(37)),
        mock!(aws_sdk_s3::Client::copy_object)
            .match_requests(move |_| after_head())
            .then_output(copy_object_output),
        mock!(aws_sdk_s3::Client::delete_object)
            .match_requests(move |_| after_copy())
            .then_output(delete_object_output),
    ];
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &rules);
    let runner = test_runner(client, &source);

    let mut out = buffer.clone();
    let report = runner.run(&mut out).await.unwrap();
    assert!(report.is_success());
    for rule in &rules {
        assert_eq!(1, rule.num_calls());
    }
}

#[tokio::test]
async fn test_missing_source_file_stops_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let rules = happy_path_rules();
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &rules);
    let runner = test_runner(client, &dir.path().join("README.md"));

    let mut out = Vec::new();
    let err = runner.run(&mut out).await.unwrap_err();

    assert_eq!(&ErrorKind::IOError, err.error().kind());
    assert!(err.report().steps().is_empty());
    assert!(out.is_empty());
    for rule in &rules {
        assert_eq!(0, rule.num_calls());
    }
}

#[tokio::test]
async fn test_delete_uses_copy_key() {
    let (_dir, source) = create_source_file(SOURCE_SIZE);
    let rules = happy_path_rules();
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &rules);
    let runner = test_runner(client, &source);

    let report = runner.run(&mut Vec::new()).await.unwrap();

    // the copy and delete rules only match `k/path-to-readme-copy.md`
    assert_eq!(
        Some(&(Step::Remove, StepOutcome::Completed)),
        report.steps().last()
    );
    assert_eq!(1, rules[3].num_calls());
    assert_eq!(1, rules[4].num_calls());
}
