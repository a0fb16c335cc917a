use std::fmt;

/// One violated field, addressed by path (e.g. `components[0].region`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Whether any violation concerns `field` exactly.
    pub fn touches(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Collects every violation of a record instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Required text: must contain something other than whitespace.
    pub fn text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fail(field, "must not be blank");
        }
    }

    pub fn non_empty<T>(&mut self, field: &str, items: &[T]) {
        if items.is_empty() {
            self.fail(field, "must contain at least one entry");
        }
    }

    /// Every element of a required text list must itself be non-blank.
    pub fn texts(&mut self, field: &str, items: &[String]) {
        self.non_empty(field, items);
        for (i, item) in items.iter().enumerate() {
            self.text(&format!("{field}[{i}]"), item);
        }
    }

    pub fn amount(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.fail(field, "must be a finite number");
        } else if value < 0.0 {
            self.fail(field, "must not be negative");
        }
    }

    /// Validate each nested record, prefixing its violations with `field[i].`.
    pub fn each<T: Validate>(&mut self, field: &str, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            let mut nested = Checker::new();
            item.check(&mut nested);
            for v in nested.violations {
                self.fail(format!("{field}[{i}].{}", v.field), v.message);
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Structural conformance of a request or result beyond what its types encode.
pub trait Validate {
    fn check(&self, checker: &mut Checker);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::new();
        self.check(&mut checker);
        checker.finish()
    }
}
