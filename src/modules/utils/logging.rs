use env_logger::{Builder, Target, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize the logging system.
///
/// Logs go to stderr unless a file is given, in which case they are
/// appended to it. `RUST_LOG` overrides the default info level.
pub fn initialize_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Auto);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Helper function to format sensitive data for logging
pub fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Structured log line for a credential check
pub fn log_auth_event(event_type: &str, username: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            "Auth event: type={}, user={}, success=true, details={:?}",
            event_type,
            format_sensitive(username),
            details
        );
    } else {
        warn!(
            "Auth event: type={}, user={}, success=false, details={:?}",
            event_type,
            format_sensitive(username),
            details
        );
    }
}

/// Structured log line for a read or write against the admins collection
pub fn log_data_operation(
    operation: &str,
    user: &str,
    resource: &str,
    success: bool,
    details: Option<&str>,
) {
    if success {
        info!(
            "Data operation: op={}, user={}, resource={}, success=true, details={:?}",
            operation,
            format_sensitive(user),
            resource,
            details
        );
    } else {
        error!(
            "Data operation: op={}, user={}, resource={}, success=false, details={:?}",
            operation,
            format_sensitive(user),
            resource,
            details
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sensitive_data_formatting() {
        assert_eq!(format_sensitive("password"), "pa***rd");
        assert_eq!(format_sensitive("key"), "***");
        assert_eq!(format_sensitive("longpassword"), "lo***rd");
        assert_eq!(format_sensitive(""), "");
        assert_eq!(format_sensitive("ádmïnü"), "ád***nü");
    }

    #[test]
    fn test_logging_initialization() {
        let log_file = NamedTempFile::new().unwrap();

        // Another test may already have installed a logger
        let result = initialize_logging(Some(log_file.path()));
        assert!(
            result.is_ok()
                || result
                    .unwrap_err()
                    .to_string()
                    .contains("logger")
        );
    }
}
