/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use aws_sdk_s3::operation::copy_object::CopyObjectOutput;
use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::types::{CopyObjectResult, Object, ObjectStorageClass, Owner};
use aws_smithy_types::DateTime;
use tempfile::TempDir;

/// ETag returned for the uploaded object
pub const UPLOAD_ETAG: &str = "\"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\"";

/// ETag returned for the copy
pub const COPY_ETAG: &str = "\"cccccccccccccccccccccccccccccccc\"";

/// Create a temporary directory containing a `README.md` of `size` bytes.
///
/// Returns the directory (which removes itself on drop) and the path of the file.
pub fn create_source_file(size: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("README.md");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&vec![b'#'; size]).unwrap();
    (temp_dir, path)
}

pub fn put_object_output() -> PutObjectOutput {
    PutObjectOutput::builder().e_tag(UPLOAD_ETAG).build()
}

/// A single page listing containing one object of `size` bytes at `key`
pub fn list_objects_output(bucket: &str, prefix: &str, key: &str, size: i64) -> ListObjectsV2Output {
    ListObjectsV2Output::builder()
        .contents(
            Object::builder()
                .key(key)
                .size(size)
                .e_tag(UPLOAD_ETAG)
                .last_modified(DateTime::from_secs(1431946754))
                .owner(Owner::builder().display_name("hogehoge").id("a".repeat(64)).build())
                .storage_class(ObjectStorageClass::Standard)
                .build(),
        )
        .is_truncated(false)
        .max_keys(1000)
        .key_count(1)
        .name(bucket)
        .prefix(prefix)
        .build()
}

pub fn head_object_output(size: i64) -> HeadObjectOutput {
    HeadObjectOutput::builder()
        .accept_ranges("bytes")
        .content_length(size)
        .content_type("binary/octet-stream")
        .e_tag(UPLOAD_ETAG)
        .last_modified(DateTime::from_secs(1432194800))
        .build()
}

pub fn copy_object_output() -> CopyObjectOutput {
    CopyObjectOutput::builder()
        .copy_object_result(
            CopyObjectResult::builder()
                .e_tag(COPY_ETAG)
                .last_modified(DateTime::from_secs(1432194907))
                .build(),
        )
        .build()
}

pub fn delete_object_output() -> DeleteObjectOutput {
    DeleteObjectOutput::builder().build()
}

/// An output sink that can be inspected while a run is still writing to it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
