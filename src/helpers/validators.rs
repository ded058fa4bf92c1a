use crate::error::ParameterError;

pub(crate) fn validate_probability(value: f64, name: &'static str) -> Result<(), ParameterError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ParameterError::OutOfUnitRange { name, value });
    }
    Ok(())
}

pub(crate) fn validate_positive(value: usize, name: &'static str) -> Result<(), ParameterError> {
    if value == 0 {
        return Err(ParameterError::NotPositive { name });
    }
    Ok(())
}

pub(crate) fn validate_non_negative(value: f64, name: &str) -> Result<(), ParameterError> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ParameterError::Invalid(format!(
            "{name} must be a nonnegative, finite value, got {value}"
        )));
    }
    Ok(())
}
