use crate::hub::domain::{PollPhase, RawNotification, ScanSummaryStatus};
use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a failed or timed out scan
/// from a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - scans completed, or notifications were processed
    Success = 0,
    /// A tracked scan failed on the hub, timed out, or the wait was interrupted
    ScanFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, network, unexpected hub response, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ScanFailed => write!(f, "Scan Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors surfaced by the scan tracker and the notification pipeline.
///
/// Adapters and configuration code work with `anyhow` (see [`crate::shared::Result`]);
/// the core entry points return this type so callers can match on the failure.
#[derive(Debug, Error)]
pub enum HubError {
    /// A referenced hub resource does not exist
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A resource lacks a link the caller needs to follow
    #[error("Missing '{rel}' link on {resource}")]
    MissingLink { rel: String, resource: String },

    #[error("{}: {} minutes", .phase.timeout_message(), .timeout_ms / 60_000)]
    Timeout {
        phase: PollPhase,
        timeout_ms: u64,
        elapsed_ms: u64,
    },

    /// A tracked scan job reported an error status
    #[error(
        "There was a problem in the Hub processing the scan(s). Error Status : {status}, {}",
        .message.as_deref().unwrap_or("no status message")
    )]
    RemoteJob {
        status: ScanSummaryStatus,
        message: Option<String>,
    },

    /// A notification could not be normalized
    #[error("Error transforming {notification}{}", .link.as_ref().map(|l| format!("; link: {}", l)).unwrap_or_default())]
    Transform {
        notification: String,
        link: Option<String>,
        #[source]
        source: Box<HubError>,
    },

    /// The wait between two polls was cancelled by the caller
    #[error("{}", .phase.interrupted_message())]
    Interrupted { phase: PollPhase },

    #[error("Failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Validation error for malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl HubError {
    /// Wraps a transport failure for `url`, keeping a hub error raised by the
    /// fetcher itself (such as [`HubError::NotFound`]) as is.
    pub fn from_fetch(url: &str, error: anyhow::Error) -> Self {
        match error.downcast::<HubError>() {
            Ok(hub_error) => hub_error,
            Err(source) => HubError::Fetch {
                url: url.to_string(),
                source,
            },
        }
    }

    /// Attaches notification context to a failure raised while transforming it
    pub fn transform(notification: &RawNotification, link: Option<&str>, cause: HubError) -> Self {
        HubError::Transform {
            notification: notification.summary(),
            link: link.map(str::to_string),
            source: Box::new(cause),
        }
    }

    /// Whether the error ends a scan wait (as opposed to a broken setup)
    pub fn is_scan_failure(&self) -> bool {
        matches!(
            self,
            HubError::Timeout { .. } | HubError::RemoteJob { .. } | HubError::Interrupted { .. }
        )
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_scan_failure() {
            ExitCode::ScanFailed
        } else {
            ExitCode::ApplicationError
        }
    }
}

/// Renders an error followed by its `source()` chain on one line.
pub fn describe_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ScanFailed.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::ScanFailed), "Scan Failed (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_timeout_display_reports_whole_minutes() {
        let error = HubError::Timeout {
            phase: PollPhase::AwaitingStart,
            timeout_ms: 300_000,
            elapsed_ms: 305_000,
        };
        let display = format!("{}", error);
        assert!(display.contains("No scan has started within the specified wait time"));
        assert!(display.contains("5 minutes"));
    }

    #[test]
    fn test_timeout_display_for_completion_phase() {
        let error = HubError::Timeout {
            phase: PollPhase::AwaitingCompletion,
            timeout_ms: 90_000,
            elapsed_ms: 95_000,
        };
        let display = format!("{}", error);
        assert!(display.contains("have not completed"));
        assert!(display.contains("1 minutes"));
    }

    #[test]
    fn test_remote_job_display() {
        let error = HubError::RemoteJob {
            status: ScanSummaryStatus::ErrorMatching,
            message: Some("matching blew up".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("ERROR_MATCHING"));
        assert!(display.contains("matching blew up"));
    }

    #[test]
    fn test_from_fetch_keeps_hub_errors() {
        let not_found: anyhow::Error = HubError::NotFound {
            resource: "project 'demo'".to_string(),
        }
        .into();
        let error = HubError::from_fetch("https://hub/api/projects", not_found);
        assert!(matches!(error, HubError::NotFound { .. }));
    }

    #[test]
    fn test_from_fetch_wraps_transport_errors() {
        let error = HubError::from_fetch("https://hub/api/x", anyhow::anyhow!("connection reset"));
        match &error {
            HubError::Fetch { url, .. } => assert_eq!(url, "https://hub/api/x"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(error.source().is_some());
    }

    #[test]
    fn test_describe_chain_includes_causes() {
        let raw = RawNotification::for_tests("RULE_VIOLATION");
        let error = HubError::transform(
            &raw,
            Some("https://hub/api/components/1/versions/2"),
            HubError::NotFound {
                resource: "component version".to_string(),
            },
        );
        let description = describe_chain(&error);
        assert!(description.contains("Error transforming RULE_VIOLATION notification"));
        assert!(description.contains("link: https://hub/api/components/1/versions/2"));
        assert!(description.ends_with("Resource not found: component version"));
    }

    #[test]
    fn test_scan_failures_map_to_exit_code_one() {
        let interrupted = HubError::Interrupted {
            phase: PollPhase::AwaitingCompletion,
        };
        assert!(interrupted.is_scan_failure());
        assert_eq!(interrupted.exit_code(), ExitCode::ScanFailed);

        let validation = HubError::Validation {
            message: "bad".to_string(),
        };
        assert!(!validation.is_scan_failure());
        assert_eq!(validation.exit_code(), ExitCode::ApplicationError);
    }
}
