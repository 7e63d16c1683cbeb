use serde::{Deserialize, Serialize};
use watch_core::Watch;

use crate::diagnostics::{ConstraintViolation, ValidationError, ViolationCode};

/// Field-constraint checker for a resource type.
///
/// Implementations report every violation they find, never only the first.
pub trait Validator<T> {
    fn validate(&self, candidate: &T) -> Vec<ConstraintViolation>;
}

/// Bounds for the Watch text fields.
///
/// `price` must be positive and `fountain` present; those rules have no knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConstraints {
    pub title_min: usize,
    pub title_max: usize,
    pub description_min: usize,
    pub description_max: usize,
}

impl Default for WatchConstraints {
    fn default() -> Self {
        Self {
            title_min: 4,
            title_max: 256,
            description_min: 1,
            description_max: 256,
        }
    }
}

impl Validator<Watch> for WatchConstraints {
    fn validate(&self, candidate: &Watch) -> Vec<ConstraintViolation> {
        let mut out = Vec::new();
        check_text(&mut out, "title", candidate.title.as_deref(), self.title_min, self.title_max);

        match candidate.price {
            None => out.push(not_null("price")),
            Some(p) if p <= 0 => out.push(ConstraintViolation::new(
                "price",
                ViolationCode::Positive,
                "must be greater than 0",
            )),
            Some(_) => {}
        }

        check_text(
            &mut out,
            "description",
            candidate.description.as_deref(),
            self.description_min,
            self.description_max,
        );

        if candidate.fountain.is_none() {
            out.push(not_null("fountain"));
        }
        out
    }
}

/// Validate a watch against the default constraints.
pub fn validate_watch(watch: &Watch) -> Result<(), ValidationError> {
    match ValidationError::from_violations(WatchConstraints::default().validate(watch)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// Blankness and size are independent checks; a present value may fail both.
fn check_text(out: &mut Vec<ConstraintViolation>, field: &str, value: Option<&str>, min: usize, max: usize) {
    let Some(s) = value else {
        out.push(ConstraintViolation::new(field, ViolationCode::NotBlank, "must not be blank"));
        return;
    };

    // Blank means only ASCII control characters and spaces (U+0000..=U+0020).
    if s.trim_matches(|c: char| c <= ' ').is_empty() {
        out.push(ConstraintViolation::new(field, ViolationCode::NotBlank, "must not be blank"));
    }
    let len = s.chars().count();
    if len < min || len > max {
        out.push(ConstraintViolation::new(
            field,
            ViolationCode::Size,
            format!("size must be between {min} and {max}"),
        ));
    }
}

fn not_null(field: &str) -> ConstraintViolation {
    ConstraintViolation::new(field, ViolationCode::NotNull, "must not be null")
}
