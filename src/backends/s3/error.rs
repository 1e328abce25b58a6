use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::TfstateError;

/// What a failed S3 call was aimed at. Drives which not-found variant applies.
#[derive(Debug, Clone, Copy)]
pub(super) enum Target<'a> {
    Bucket(&'a str),
    Object { bucket: &'a str, key: &'a str },
}

impl Target<'_> {
    fn bucket(&self) -> &str {
        match self {
            Target::Bucket(bucket) => bucket,
            Target::Object { bucket, .. } => bucket,
        }
    }

    fn describe(&self) -> String {
        match self {
            Target::Bucket(bucket) => format!("bucket '{}'", bucket),
            Target::Object { key, .. } => format!("file '{}'", key),
        }
    }
}

/// Maps an SDK failure onto the closed error taxonomy using the S3 error code.
pub(super) fn classify<E, R>(err: SdkError<E, R>, target: Target<'_>) -> TfstateError
where
    SdkError<E, R>: ProvideErrorMetadata + std::error::Error,
{
    let code = err.code().map(str::to_string);

    let classified = match (code.as_deref(), target) {
        (Some("NoSuchBucket"), _) => TfstateError::BucketNotFound {
            bucket: target.bucket().to_string(),
        },
        (Some("NoSuchKey"), Target::Object { bucket, key }) => TfstateError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        (Some("AccessDenied"), _) => TfstateError::AccessDenied {
            target: target.describe(),
        },
        _ => TfstateError::Backend(DisplayErrorContext(err).to_string()),
    };

    tracing::warn!(code = ?code, target = %target.describe(), error = %classified, "S3 request failed");

    classified
}
