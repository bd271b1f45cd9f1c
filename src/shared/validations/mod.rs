use crate::shared::errors::DomainError;

/// Name must be non-empty after trimming.
pub fn validate_station_name(operation: &'static str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_input(
            operation,
            "station name must not be empty",
        ));
    }
    Ok(())
}

/// Ids address existing records only when strictly positive.
pub fn validate_station_id(operation: &'static str, id: i64) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::invalid_input(
            operation,
            format!("station id must be positive, got {}", id),
        ));
    }
    Ok(())
}
