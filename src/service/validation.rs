//! Request validation from per-field rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};

/// JSON type a field must have. `Decimal` accepts a number or a numeric string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Decimal,
}

#[derive(Clone, Debug)]
pub struct ValidationRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub minimum: Option<f64>,
}

impl ValidationRule {
    pub const fn new(field: &'static str, kind: FieldKind) -> Self {
        ValidationRule {
            field,
            kind,
            required: false,
            nullable: false,
            min_length: None,
            max_length: None,
            pattern: None,
            minimum: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub const fn pattern(mut self, p: &'static str) -> Self {
        self.pattern = Some(p);
        self
    }

    pub const fn minimum(mut self, n: f64) -> Self {
        self.minimum = Some(n);
        self
    }
}

/// Equity: a fraction from 0 to 1, e.g. `0`, `0.25`, `1.0`.
pub const EQUITY_PATTERN: &str = r"^(0(\.\d+)?|1(\.0+)?)$";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against `rules`. Required fields must be present; fields
    /// without a rule are rejected. Collects every failure before returning.
    pub fn validate(body: &Map<String, Value>, rules: &[ValidationRule]) -> Result<(), AppError> {
        let mut errors = Vec::new();
        for key in body.keys() {
            if !rules.iter().any(|r| r.field == key) {
                errors.push(format!("{} is not allowed", key));
            }
        }
        for rule in rules {
            match body.get(rule.field) {
                None => {
                    if rule.required {
                        errors.push(format!("{} is required", rule.field));
                    }
                }
                Some(v) => {
                    if let Err(msg) = validate_field(rule, v) {
                        errors.push(msg);
                    }
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn validate_field(rule: &ValidationRule, v: &Value) -> Result<(), String> {
    let col = rule.field;
    if v.is_null() {
        return if rule.nullable && !rule.required {
            Ok(())
        } else {
            Err(format!("{} must not be null", col))
        };
    }
    let text: Option<String> = match rule.kind {
        FieldKind::String => Some(
            v.as_str()
                .ok_or_else(|| format!("{} must be a string", col))?
                .to_string(),
        ),
        FieldKind::Integer => {
            let n = v.as_i64().ok_or_else(|| format!("{} must be an integer", col))?;
            if i32::try_from(n).is_err() {
                return Err(format!("{} is out of range", col));
            }
            None
        }
        FieldKind::Decimal => match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => return Err(format!("{} must be a decimal number", col)),
        },
    };
    if let Some(s) = &text {
        if let Some(min) = rule.min_length {
            if s.chars().count() < min {
                return Err(format!("{} must be at least {} characters", col, min));
            }
        }
        if let Some(max) = rule.max_length {
            if s.chars().count() > max {
                return Err(format!("{} must be at most {} characters", col, max));
            }
        }
        if let Some(pattern) = rule.pattern {
            let re = Regex::new(pattern).map_err(|_| format!("invalid pattern for {}", col))?;
            if !re.is_match(s) {
                return Err(format!("{} does not match required pattern", col));
            }
        }
    }
    if let Some(min) = rule.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                return Err(format!("{} must be at least {}", col, min));
            }
        }
    }
    Ok(())
}
