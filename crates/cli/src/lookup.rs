use anyhow::{Context, Result, bail};
use argstore::{ArgumentStore, token};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Int,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Argument,
    Default,
}

#[derive(Debug, Serialize)]
pub struct Lookup {
    pub name: String,
    pub kind: Kind,
    pub value: Value,
    pub source: Source,
}

/// Resolve `name` from `store` as a program reading it with `kind` would.
///
/// `default` is given in its textual form and parsed according to `kind`.
/// With `strict`, values that the lenient accessors would silently degrade
/// are reported as errors instead.
pub fn lookup(
    store: &ArgumentStore,
    name: &str,
    kind: Kind,
    default: Option<&str>,
    strict: bool,
) -> Result<Lookup> {
    let name = token::canonical_name(name);

    let (value, present) = match kind {
        Kind::String => {
            let value = store.get_string(&name, default.unwrap_or(""));
            (Value::String(value.to_string()), store.is_set(&name))
        }
        Kind::Int => {
            let default = parse_int_default(default)?;
            let n = if strict {
                store.try_get_int(&name)?.unwrap_or(default)
            } else {
                store.get_int(&name, default)
            };
            (Value::Int(n), store.is_set(&name))
        }
        Kind::Bool => {
            let default = parse_bool_default(default)?;
            let b = if strict {
                store.try_get_bool(&name)?.unwrap_or(default)
            } else {
                store.get_bool(&name, default)
            };
            let present = store.is_set(&name) || store.is_set(&token::negated_name(&name));
            (Value::Bool(b), present)
        }
    };

    tracing::debug!(%name, ?kind, present, "resolved option");

    Ok(Lookup {
        name,
        kind,
        value,
        source: if present {
            Source::Argument
        } else {
            Source::Default
        },
    })
}

fn parse_int_default(default: Option<&str>) -> Result<i64> {
    match default {
        None => Ok(0),
        Some(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("invalid integer default: {raw}")),
    }
}

fn parse_bool_default(default: Option<&str>) -> Result<bool> {
    match default {
        None | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => bail!("invalid boolean default: {other} (expected 0, 1, true or false)"),
    }
}
