use serde::{Deserialize, Serialize};

/// Separator between field path and message in the flattened form.
pub const FIELD_SEPARATOR: &str = ":";

/// Stable, machine-readable constraint codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    NotBlank,
    Size,
    NotNull,
    Positive,
}

/// One field that failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Field path such as `title`.
    pub field: String,
    pub code: ViolationCode,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// `field:message`, the form error bodies carry.
    pub fn flattened(&self) -> String {
        format!("{}{FIELD_SEPARATOR}{}", self.field, self.message)
    }
}

/// Every violation found on a candidate, in field-table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub violations: Vec<ConstraintViolation>,
}

impl ValidationError {
    /// `None` when there is nothing to report.
    pub fn from_violations(violations: Vec<ConstraintViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    pub fn has_violation(&self, field: &str, code: ViolationCode) -> bool {
        self.violations.iter().any(|v| v.field == field && v.code == code)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ConstraintViolation::flattened).collect();
        write!(f, "validation failed: {}", parts.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn display_lists_all_violations() {
        let err = ValidationError::from_violations(vec![
            ConstraintViolation::new("title", ViolationCode::Size, "size must be between 4 and 256"),
            ConstraintViolation::new("price", ViolationCode::Positive, "must be greater than 0"),
        ])
        .unwrap();
        assert_eq!(
            err.to_string(),
            "validation failed: title:size must be between 4 and 256, price:must be greater than 0"
        );
    }

    #[test]
    fn codes_serialize_snake_case() {
        let v = ConstraintViolation::new("title", ViolationCode::NotBlank, "must not be blank");
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"{"field":"title","code":"not_blank","message":"must not be blank"}"#);
    }
}
