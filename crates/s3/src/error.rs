//! Provider error mapping
//!
//! Every SDK failure becomes either `Error::Service`, carrying the provider's
//! code and message verbatim, or `Error::Network` when no response came back.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;

use s3mgr_core::Error;

/// Convert an SDK error into the core error type
pub(crate) fn map_sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let error = classify(err.code(), err.message(), || {
        DisplayErrorContext(&err).to_string()
    });
    tracing::debug!(error = %error, "s3 request failed");
    error
}

fn classify(code: Option<&str>, message: Option<&str>, context: impl FnOnce() -> String) -> Error {
    match code {
        Some(code) => Error::service(code, message.unwrap_or(code)),
        None => Error::Network(context()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_provider_error() {
        let err = classify(
            Some("NoSuchBucket"),
            Some("The specified bucket does not exist"),
            || unreachable!(),
        );
        assert_eq!(err.code(), Some("NoSuchBucket"));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_classify_code_without_message() {
        let err = classify(Some("NotFound"), None, || unreachable!());
        assert_eq!(err.to_string(), "NotFound: NotFound");
    }

    #[test]
    fn test_classify_transport_error() {
        let err = classify(None, None, || "dispatch failure: connection refused".into());
        assert!(matches!(err, Error::Network(ref msg) if msg.contains("connection refused")));
        assert_eq!(err.exit_code(), 3);
    }
}
