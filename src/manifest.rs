use serde::Serialize as _;
use serde_json::{
    ser::{PrettyFormatter, Serializer},
    Map, Value,
};
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Manifest isn't valid JSON: {0}")]
    Malformed(serde_json::Error),
    #[error("Manifest root must be a JSON object, but found {found}")]
    NotAnObject { found: &'static str },
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A JSON object whose keys keep the order they were read (or inserted) in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl FromStr for Manifest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match serde_json::from_str(s).map_err(ParseError::Malformed)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ParseError::NotAnObject {
                found: kind_name(&other),
            }),
        }
    }
}

impl Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl Manifest {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Existing keys stay where they are; new keys go on the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<Value> {
        self.0.insert(key.into(), Value::String(value.into()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty-prints with `indent` spaces per level and no trailing newline.
    pub fn to_vec_pretty(&self, indent: usize) -> serde_json::Result<Vec<u8>> {
        let indent = " ".repeat(indent);
        let mut bytes = Vec::new();
        let mut ser =
            Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(indent.as_bytes()));
        self.0.serialize(&mut ser)?;
        Ok(bytes)
    }
}
