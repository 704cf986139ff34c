/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt::{self, Write as _};

use aws_smithy_types::date_time::Format;
use aws_smithy_types::DateTime;

const INDENT: usize = 2;

/// Types whose contents can be printed as a [`Value`] tree.
pub trait Render {
    /// Build the value tree for `self`
    fn render(&self) -> Value;
}

/// A printable value.
///
/// Structures print their fields one per line, `Name: value`, indented by nesting depth.
/// Strings are quoted and escaped, timestamps use RFC 3339.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A quoted string
    Str(String),
    /// An integer
    Int(i64),
    /// A boolean
    Bool(bool),
    /// A point in time
    Time(DateTime),
    /// A sequence of values
    List(Vec<Value>),
    /// Named fields, printed in insertion order
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Start an empty structure
    pub fn structure() -> Self {
        Value::Struct(Vec::new())
    }

    /// Add a field to a structure. Does nothing on non-structure values.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Struct(fields) = &mut self {
            fields.push((name.into(), value.into()));
        }
        self
    }

    /// Add a field to a structure when `value` is present, the way unset response members are
    /// left out of the output.
    pub fn field_opt<T: Into<Value>>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    fn write_to(&self, out: &mut String, depth: usize) -> fmt::Result {
        match self {
            Value::Str(s) => write!(out, "{s:?}"),
            Value::Int(i) => write!(out, "{i}"),
            Value::Bool(b) => write!(out, "{b}"),
            Value::Time(t) => match t.fmt(Format::DateTime) {
                Ok(formatted) => out.write_str(&formatted),
                Err(_) => write!(out, "{}", t.secs()),
            },
            Value::List(items) => {
                out.write_char('[')?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.write_str(", ")?;
                    }
                    item.write_to(out, depth)?;
                }
                out.write_char(']')
            }
            Value::Struct(fields) if fields.is_empty() => out.write_str("{}"),
            Value::Struct(fields) => {
                let pad = " ".repeat((depth + 1) * INDENT);
                out.write_str("{\n")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    write!(out, "{pad}{name}: ")?;
                    value.write_to(out, depth + 1)?;
                    if idx + 1 < fields.len() {
                        out.write_char(',')?;
                    }
                    out.write_char('\n')?;
                }
                write!(out, "{}}}", " ".repeat(depth * INDENT))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, 0)?;
        f.write_str(&out)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::Time(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}
