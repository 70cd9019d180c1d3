//! Error types for mention-model

/// Result type for collaborator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by directories, recorders and notifiers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory could not be reached; the lookup may succeed later
    #[error("Directory unavailable: {message}")]
    DirectoryUnavailable { message: String },

    /// The directory failed in a way that retrying will not fix
    #[error("Directory failure: {message}")]
    DirectoryFailure { message: String },

    /// A mention record could not be created or listed
    #[error("Recorder failure: {message}")]
    RecorderFailure { message: String },

    /// The recipient of a new record could not be notified
    #[error("Notification failed for {recipient}: {message}")]
    NotificationFailed { recipient: String, message: String },
}

impl Error {
    /// Whether the failure only affects the current lookup.
    ///
    /// The parser treats transient failures as a miss for that token and
    /// propagates everything else.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::DirectoryUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_directory_is_transient() {
        let unavailable = Error::DirectoryUnavailable {
            message: "timeout".to_string(),
        };
        let failure = Error::DirectoryFailure {
            message: "schema mismatch".to_string(),
        };
        let recorder = Error::RecorderFailure {
            message: "disk full".to_string(),
        };

        assert!(unavailable.is_transient());
        assert!(!failure.is_transient());
        assert!(!recorder.is_transient());
    }

    #[test]
    fn notification_error_names_recipient() {
        let err = Error::NotificationFailed {
            recipient: "users:7".to_string(),
            message: "mailbox full".to_string(),
        };
        assert_eq!(err.to_string(), "Notification failed for users:7: mailbox full");
    }
}
