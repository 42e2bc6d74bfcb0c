// ABOUTME: Error types for evaluation failures - message strings are verbatim and user-visible

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: String,
        operator: String,
        right: String,
    },

    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator { operator: String, right: String },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: String,
        operator: String,
        right: String,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("not a function: {0}")]
    NotAFunction(String),

    #[error("unusable as hash key: {0}")]
    UnusableHashKey(String),

    #[error("index operator not supported: {0}")]
    IndexNotSupported(String),

    #[error("argument to `{function}` not supported, got {got}")]
    ArgumentNotSupported { function: String, got: String },

    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: String },

    #[error("division by zero")]
    DivisionByZero,
}

impl EvalError {
    pub fn type_mismatch(left: &str, operator: &str, right: &str) -> Self {
        EvalError::TypeMismatch {
            left: left.to_string(),
            operator: operator.to_string(),
            right: right.to_string(),
        }
    }

    pub fn unknown_prefix(operator: &str, right: &str) -> Self {
        EvalError::UnknownPrefixOperator {
            operator: operator.to_string(),
            right: right.to_string(),
        }
    }

    pub fn unknown_infix(left: &str, operator: &str, right: &str) -> Self {
        EvalError::UnknownInfixOperator {
            left: left.to_string(),
            operator: operator.to_string(),
            right: right.to_string(),
        }
    }

    pub fn arity(got: usize, want: impl Into<String>) -> Self {
        EvalError::WrongArgumentCount {
            got,
            want: want.into(),
        }
    }

    pub fn argument_not_supported(function: &str, got: &str) -> Self {
        EvalError::ArgumentNotSupported {
            function: function.to_string(),
            got: got.to_string(),
        }
    }
}
