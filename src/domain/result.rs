//! Result type alias for Logslice

use super::errors::LogsliceError;

/// Result type alias for Logslice operations
///
/// # Examples
///
/// ```
/// use logslice::domain::result::Result;
/// use logslice::domain::errors::LogsliceError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LogsliceError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LogsliceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PlanError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_plan_error_propagates_through_question_mark() {
        fn inner() -> Result<()> {
            Err(PlanError::InvalidWindow("days must be >= 1".to_string()))?;
            Ok(())
        }

        let err = inner().unwrap_err();
        assert!(err.is_configuration());
    }
}
