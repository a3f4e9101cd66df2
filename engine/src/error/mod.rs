use thiserror::Error;

/// Rejected attendance entry form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Validation failed: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

impl FormError {
    pub fn messages(&self) -> &[String] {
        match self {
            FormError::Invalid(messages) => messages,
        }
    }
}

impl From<validator::ValidationErrors> for FormError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                validator::ValidationErrorsKind::Field(errs) => Some((field, errs)),
                _ => None,
            })
            .flat_map(|(field, errs)| errs.iter().map(move |e| format!("{}: {}", field, e.code)))
            .collect();
        messages.sort();
        FormError::Invalid(messages)
    }
}

/// A string that does not name a variant of one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
