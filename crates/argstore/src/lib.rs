//! Dash-style option parsing with typed lookups that never fail.
//!
//! Arguments look like `-name`, `-name=value` or `--name=value`. Everything
//! is collected into an [`ArgumentStore`] once, then read through typed
//! accessors that fall back to a caller-supplied default:
//! - `get_string` / `get_int` return the first value given for an option
//! - `get_bool` understands `-name`, `-name=0` and the negated `-noname` form
//! - malformed integers read as `0` instead of failing
//!
//! Callers that want to see bad input can use the `try_*` accessors, which
//! report an [`ArgError`] instead of degrading.

pub mod token {
    /// Split a raw argument into its option name (without dash) and value.
    ///
    /// Returns `None` for tokens that carry no option: anything not starting
    /// with `-`, and tokens whose name part is empty (`-`, `--`, `-=v`).
    /// A leading `--` is treated as `-`. Without `=` the value is empty.
    pub fn split_token(raw: &str) -> Option<(&str, &str)> {
        let body = raw.strip_prefix('-')?;
        let body = body.strip_prefix('-').unwrap_or(body);
        let (name, value) = body.split_once('=').unwrap_or((body, ""));
        if name.is_empty() {
            return None;
        }
        Some((name, value))
    }

    /// Normalize an option name to its single-dash form.
    ///
    /// `WOOT`, `-WOOT` and `--WOOT` all become `-WOOT`.
    pub fn canonical_name(raw: &str) -> String {
        let trimmed = raw.strip_prefix('-').unwrap_or(raw);
        let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed);
        format!("-{trimmed}")
    }

    /// The negated counterpart of a canonical name: `-WOOT` -> `-noWOOT`.
    pub fn negated_name(name: &str) -> String {
        let bare = name.strip_prefix('-').unwrap_or(name);
        format!("-no{bare}")
    }

    /// Interpret `value` the way C's `atoi` does.
    ///
    /// Leading ASCII whitespace and one sign are accepted, then the longest
    /// run of decimal digits is read. No digits yields `0`; overflow saturates.
    pub fn lenient_int(value: &str) -> i64 {
        let s = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let mut acc: i64 = 0;
        for b in digits.bytes().take_while(u8::is_ascii_digit) {
            let d = i64::from(b - b'0');
            acc = if negative {
                acc.saturating_mul(10).saturating_sub(d)
            } else {
                acc.saturating_mul(10).saturating_add(d)
            };
        }
        acc
    }
}

pub mod error {
    use std::num::ParseIntError;
    use thiserror::Error;

    /// Errors reported by the strict accessors.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ArgError {
        #[error("option {name} expects an integer, got '{value}'")]
        InvalidInt {
            name: String,
            value: String,
            #[source]
            source: ParseIntError,
        },

        #[error("option {name} expects a boolean (0, 1, true, false), got '{value}'")]
        InvalidBool { name: String, value: String },
    }

    pub type Result<T> = std::result::Result<T, ArgError>;
}

pub mod store {
    use crate::error::{ArgError, Result};
    use crate::token;
    use indexmap::IndexMap;
    use serde::Serialize;
    use std::ffi::OsString;

    /// Parsed options, keyed by canonical name (`-name`).
    ///
    /// Every key holds at least one value; a bare flag stores `""`.
    /// Keys keep the order in which they first appeared on the command line.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    #[serde(transparent)]
    pub struct ArgumentStore {
        options: IndexMap<String, Vec<String>>,
    }

    impl ArgumentStore {
        /// An empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Parse `args` as command line arguments. The first item is the
        /// program name and is skipped, as with [`std::env::args`].
        ///
        /// Tokens that do not start with `-` are ignored.
        pub fn parse<I, T>(args: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: AsRef<str>,
        {
            let mut store = Self::default();
            for arg in args.into_iter().skip(1) {
                store.push_token(arg.as_ref());
            }
            store
        }

        /// Parse the arguments of the current process.
        ///
        /// Tokens that are not valid UTF-8 are converted lossily.
        pub fn from_env() -> Self {
            Self::parse(
                std::env::args_os().map(|arg: OsString| arg.to_string_lossy().into_owned()),
            )
        }

        fn push_token(&mut self, raw: &str) {
            let Some((name, value)) = token::split_token(raw) else {
                tracing::debug!(token = raw, "ignoring argument without an option name");
                return;
            };
            let name = format!("-{name}");
            tracing::trace!(%name, value, "option");
            self.options
                .entry(name)
                .or_default()
                .push(value.to_string());
        }

        /// Number of distinct options.
        pub fn len(&self) -> usize {
            self.options.len()
        }

        pub fn is_empty(&self) -> bool {
            self.options.is_empty()
        }

        /// Canonical option names in first-appearance order.
        pub fn names(&self) -> impl Iterator<Item = &str> {
            self.options.keys().map(String::as_str)
        }

        /// Whether `name` was given at all. Negated forms are not consulted.
        pub fn is_set(&self, name: &str) -> bool {
            self.options.contains_key(name)
        }

        /// Every value given for `name`, in argument order.
        pub fn get_all(&self, name: &str) -> &[String] {
            self.options.get(name).map(Vec::as_slice).unwrap_or(&[])
        }

        /// The first value given for `name`.
        pub fn get(&self, name: &str) -> Option<&str> {
            self.options
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        }

        /// The first value of `name`, or `default` if it was never given.
        pub fn get_string<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
            self.get(name).unwrap_or(default)
        }

        /// The first value of `name` as an integer.
        ///
        /// Returns `default` when the option is absent and `0` when its value
        /// is not a number (see [`token::lenient_int`]).
        pub fn get_int(&self, name: &str, default: i64) -> i64 {
            let Some(value) = self.get(name) else {
                return default;
            };
            let n = token::lenient_int(value);
            if value.parse::<i64>().is_err() {
                tracing::debug!(name, value, resolved = n, "integer option is not a plain number");
            }
            n
        }

        /// Resolve a boolean option, honoring the `-noname` form.
        ///
        /// `-name` is true unless its first value is `"0"`. Only when `-name`
        /// is absent is `-noname` consulted, with the opposite meaning.
        /// Otherwise `default` is returned.
        pub fn get_bool(&self, name: &str, default: bool) -> bool {
            if let Some(value) = self.get(name) {
                return value != "0";
            }
            if let Some(value) = self.get(&token::negated_name(name)) {
                return value == "0";
            }
            default
        }

        /// `get_bool(name, false)`.
        pub fn get_flag(&self, name: &str) -> bool {
            self.get_bool(name, false)
        }

        /// Strict integer lookup.
        ///
        /// `Ok(None)` when `name` is absent; an error when the first value is
        /// not exactly a base-10 `i64`.
        pub fn try_get_int(&self, name: &str) -> Result<Option<i64>> {
            let Some(value) = self.get(name) else {
                return Ok(None);
            };
            value
                .parse::<i64>()
                .map(Some)
                .map_err(|source| ArgError::InvalidInt {
                    name: name.to_string(),
                    value: value.to_string(),
                    source,
                })
        }

        /// Strict boolean lookup with the same precedence as [`Self::get_bool`].
        ///
        /// Accepts `""`, `1`, `true`, `0` and `false`; anything else is an
        /// error naming whichever form (`-name` or `-noname`) was read.
        pub fn try_get_bool(&self, name: &str) -> Result<Option<bool>> {
            if let Some(value) = self.get(name) {
                return strict_bool(name, value).map(Some);
            }
            let negated = token::negated_name(name);
            if let Some(value) = self.get(&negated) {
                return strict_bool(&negated, value).map(|b| Some(!b));
            }
            Ok(None)
        }
    }

    fn strict_bool(name: &str, value: &str) -> Result<bool> {
        match value {
            "" | "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(ArgError::InvalidBool {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

pub use error::{ArgError, Result};
pub use store::ArgumentStore;

/// Shorthand for [`ArgumentStore::parse`].
pub fn parse<I, T>(args: I) -> ArgumentStore
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    ArgumentStore::parse(args)
}
