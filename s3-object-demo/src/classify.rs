/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::RequestId;

use crate::error::{Error, ErrorKind};

const REQUEST_ID_HEADER: &str = "x-amz-request-id";

/// Details of a request that S3 rejected or that never got a response.
///
/// `status` and `request_id` are only present when a response was received.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestFailure {
    pub(crate) code: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) request_id: Option<String>,
    pub(crate) status: Option<u16>,
    pub(crate) error: String,
    pub(crate) cause: Option<String>,
}

impl RequestFailure {
    pub(crate) fn from_sdk_error<E>(err: &SdkError<E, HttpResponse>) -> Self
    where
        E: std::error::Error + ProvideErrorMetadata + 'static,
    {
        let raw = err.raw_response();
        let request_id = err
            .as_service_error()
            .and_then(|service_err| service_err.meta().request_id())
            .or_else(|| raw.and_then(|resp| resp.headers().get(REQUEST_ID_HEADER)))
            .map(str::to_owned);

        RequestFailure {
            code: err.code().map(str::to_owned),
            message: err.message().map(str::to_owned),
            request_id,
            status: raw.map(|resp| resp.status().as_u16()),
            error: err.to_string(),
            cause: std::error::Error::source(err)
                .map(|source| DisplayErrorContext(source).to_string()),
        }
    }

    /// Machine readable error code returned by S3 (e.g. `NoSuchKey`)
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Human readable error message returned by S3
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Request ID assigned by S3 to the failed request
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// HTTP status code of the response
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Display text of the SDK error
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Display text of the underlying cause, including its own source chain
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Whether the failure was tied to an actual HTTP exchange
    pub fn has_response(&self) -> bool {
        self.status.is_some()
    }
}

/// Outcome of classifying the (possibly absent) error of a single step.
#[derive(Debug)]
pub enum Classification<'a> {
    /// The step succeeded.
    None,

    /// The request failed at the service level or in transit. Whether the run keeps going is up
    /// to the configured [`RequestFailurePolicy`](crate::types::RequestFailurePolicy).
    RequestFailure(&'a RequestFailure),

    /// Anything else. The run must stop.
    Fault(&'a Error),
}

/// Classify the error (if any) produced by a step.
///
/// Every step funnels its result through here so that they all react to failures the same way.
pub fn classify(error: Option<&Error>) -> Classification<'_> {
    match error {
        None => Classification::None,
        Some(err) => match err.kind() {
            ErrorKind::RequestFailed(failure) => Classification::RequestFailure(failure),
            _ => Classification::Fault(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Classification, RequestFailure};
    use crate::error::{Error, ErrorKind};
    use aws_sdk_s3::config::http::HttpResponse;
    use aws_sdk_s3::error::{ErrorMetadata, SdkError};
    use aws_sdk_s3::operation::head_object::HeadObjectError;
    use aws_sdk_s3::operation::put_object::PutObjectError;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use std::io;

    fn http_response(status: u16, request_id: &'static str) -> HttpResponse {
        let mut resp = HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty());
        resp.headers_mut().insert("x-amz-request-id", request_id);
        resp
    }

    #[test]
    fn test_classify_no_error() {
        assert!(matches!(classify(None), Classification::None));
    }

    #[test]
    fn test_classify_io_error_is_fault() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "README.md").into();
        match classify(Some(&err)) {
            Classification::Fault(fault) => assert_eq!(&ErrorKind::IOError, fault.kind()),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_service_error() {
        let service_err = PutObjectError::generic(
            ErrorMetadata::builder()
                .code("AccessDenied")
                .message("Access Denied")
                .build(),
        );
        let sdk_err = SdkError::service_error(service_err, http_response(403, "REQ-403"));
        let err: Error = sdk_err.into();

        let failure = match classify(Some(&err)) {
            Classification::RequestFailure(failure) => failure.clone(),
            other => panic!("expected request failure, got {other:?}"),
        };
        assert_eq!(Some("AccessDenied"), failure.code());
        assert_eq!(Some("Access Denied"), failure.message());
        assert_eq!(Some(403), failure.status());
        assert_eq!(Some("REQ-403"), failure.request_id());
        assert!(failure.has_response());
        assert!(!failure.error().is_empty());
    }

    #[test]
    fn test_classify_construction_failure_has_no_response() {
        let sdk_err: SdkError<HeadObjectError, HttpResponse> =
            SdkError::construction_failure("missing bucket");
        let err: Error = sdk_err.into();

        let failure = match classify(Some(&err)) {
            Classification::RequestFailure(failure) => failure.clone(),
            other => panic!("expected request failure, got {other:?}"),
        };
        assert_eq!(None, failure.status());
        assert_eq!(None, failure.request_id());
        assert!(!failure.has_response());
        assert!(failure.cause().unwrap().contains("missing bucket"));
    }

    #[test]
    fn test_request_failure_accessors_default() {
        let failure = RequestFailure::default();
        assert_eq!(None, failure.code());
        assert_eq!("", failure.error());
    }
}
