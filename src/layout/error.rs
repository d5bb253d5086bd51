use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("malformed graph: {}", .problems.join("; "))]
    MalformedGraph { problems: Vec<String> },
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl LayoutError {
    pub(super) fn malformed(problems: Vec<String>) -> Result<(), Self> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Self::MalformedGraph { problems })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_lists_every_problem() {
        let err = LayoutError::malformed(vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "malformed graph: a; b");
        assert!(LayoutError::malformed(Vec::new()).is_ok());
    }
}
