use thiserror::Error;

/// Unified error type for gop-setup operations
#[derive(Error, Debug)]
pub enum GopSetupError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Version file error: {0}")]
    VersionFile(String),

    #[error("No valid release tags found in upstream repository")]
    NoValidTags,

    #[error("No tag or branch satisfies version spec '{0}'")]
    NoMatchingRef(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("Installed gop version {installed} does not match expected version {expected}")]
    VersionMismatch { expected: String, installed: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gop-setup
pub type Result<T> = std::result::Result<T, GopSetupError>;

impl GopSetupError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GopSetupError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GopSetupError::Version(msg.into())
    }

    /// Create a version-file error with context
    pub fn version_file(msg: impl Into<String>) -> Self {
        GopSetupError::VersionFile(msg.into())
    }

    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        GopSetupError::Build(msg.into())
    }

    /// Create an unresolved-spec error
    pub fn no_matching_ref(spec: impl Into<String>) -> Self {
        GopSetupError::NoMatchingRef(spec.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GopSetupError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GopSetupError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(GopSetupError::version("test")
            .to_string()
            .contains("Version"));
        assert!(GopSetupError::build("test").to_string().contains("Build"));
        assert!(GopSetupError::version_file("test")
            .to_string()
            .contains("Version file"));
    }

    #[test]
    fn test_no_matching_ref_names_spec() {
        let err = GopSetupError::no_matching_ref("feature-x");
        assert!(err.to_string().contains("feature-x"));
    }

    #[test]
    fn test_version_mismatch_message() {
        let err = GopSetupError::VersionMismatch {
            expected: "1.0.0".to_string(),
            installed: "1.1.0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.0.0"));
        assert!(msg.contains("1.1.0"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GopSetupError::config("x"), "Configuration error"),
            (GopSetupError::version("x"), "Version parsing error"),
            (GopSetupError::version_file("x"), "Version file error"),
            (GopSetupError::build("x"), "Build failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
