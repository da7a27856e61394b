/// Errors that abort the current script statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Wrong argument count. Carries the literal usage string.
    Usage(&'static str),
    /// A malformed enumerated token (lock direction, layer name, ...).
    InvalidArgument(String),
    /// Unrecognized notoriety/class token in a target specification.
    UnknownTargetType(String),
    /// Domain-rule violation or unknown handler name.
    Runtime(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Usage(usage) => write!(f, "{}", usage),
            ScriptError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ScriptError::UnknownTargetType(token) => {
                write!(f, "Unknown target type: '{}'", token)
            }
            ScriptError::Runtime(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_usage_string() {
        let err = ScriptError::Usage("Usage: createlist ('list name')");
        assert_eq!(err.to_string(), "Usage: createlist ('list name')");
    }

    #[test]
    fn unknown_target_type_names_the_token() {
        let err = ScriptError::UnknownTargetType("purple".to_string());
        assert!(err.to_string().contains("'purple'"));
    }
}
