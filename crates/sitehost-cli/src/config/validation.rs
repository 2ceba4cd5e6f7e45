use crate::config::ServeConfig;
use crate::error::{ConfigError, Result};

/// Validate that the app name is a single URL/path segment.
///
/// The name becomes both a directory under the output root and the first
/// segment of every served URL.
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "app_name".to_string(),
            value: name.to_string(),
            hint: "App name cannot be empty".to_string(),
        }
        .into());
    }

    if name == "." || name == ".." {
        return Err(ConfigError::InvalidValue {
            field: "app_name".to_string(),
            value: name.to_string(),
            hint: "App name must name a directory, not '.' or '..'".to_string(),
        }
        .into());
    }

    if let Some(c) = name
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control())
    {
        return Err(ConfigError::InvalidValue {
            field: "app_name".to_string(),
            value: name.to_string(),
            hint: format!("Invalid character {:?}; use a single path segment", c),
        }
        .into());
    }

    Ok(())
}

impl ServeConfig {
    /// Validate configuration for logical consistency.
    ///
    /// File existence (certificate, key) is checked later, once paths are
    /// resolved against the launch directory.
    pub fn validate(&self) -> Result<()> {
        validate_app_name(&self.app_name)?;

        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                value: self.host.clone(),
                hint: "Use 'localhost' or an IP address".to_string(),
            }
            .into());
        }

        if self.shutdown_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "shutdown_timeout_secs".to_string(),
                value: "0".to_string(),
                hint: "The server needs at least one second to stop gracefully".to_string(),
            }
            .into());
        }

        if self.bind_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bind_retries".to_string(),
                value: "0".to_string(),
                hint: "At least one bind attempt is required".to_string(),
            }
            .into());
        }

        if self.port != 0 && self.port < 1024 {
            crate::ui::warning(&format!(
                "Port {} is in privileged range, may require root access",
                self.port
            ));
        }

        Ok(())
    }
}
