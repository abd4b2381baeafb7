use derive_more::Display;

/// Simplified error system - no over-engineering!
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
    #[display(fmt = "Config Error: {}", _0)]
    Config(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
}

impl std::error::Error for AppError {}

// Simple convenience type aliases
pub type DomainResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_prefixes_kind() {
        let err = AppError::Validation("unknown instrument NGN/EUR".to_string());
        assert_eq!(err.to_string(), "Validation Error: unknown instrument NGN/EUR");
        assert_eq!(AppError::Rendering("no 2d context".into()).to_string(), "Rendering Error: no 2d context");
    }
}
