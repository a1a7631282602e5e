use std::str::FromStr;

/// Value of an environment-style variable, with blank values treated as unset.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Outcome of parsing a typed variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    Unset,
    Value(T),
    /// Present but not parseable; carries the raw text.
    Invalid(String),
}

impl<T> Parsed<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(value) => Some(value),
            Parsed::Unset | Parsed::Invalid(_) => None,
        }
    }
}

pub fn parse_value<T: FromStr>(raw: Option<String>) -> Parsed<T> {
    match non_empty(raw) {
        None => Parsed::Unset,
        Some(text) => match text.parse() {
            Ok(value) => Parsed::Value(value),
            Err(_) => Parsed::Invalid(text),
        },
    }
}
