use crate::utils::error::{PyeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PyeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PyeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Like [`validate_path`], but an empty value is accepted (it means "not set").
pub fn validate_optional_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Ok(());
    }
    validate_path(field_name, path)
}
