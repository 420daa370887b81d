//! Multi-alias CLI option resolution.
//!
//! Every logical option has one canonical key plus any number of alias
//! spellings. The parser records values under whichever spelling the user
//! typed, and the functions here reconcile those spellings back into a
//! single typed value. Resolution is a pure function over an [`ArgBag`], so
//! it can be tested without parsing a real command line.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RelnotesError, Result};

/// Declared type of a CLI option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    Bool,
    Str,
    Num,
    StrList,
}

impl OptKind {
    /// Human readable type name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            OptKind::Bool => "boolean",
            OptKind::Str | OptKind::StrList => "string",
            OptKind::Num => "number",
        }
    }
}

/// Descriptor for one logical CLI option: a canonical key, its alias
/// spellings in declaration order, a declared type, and an optional default.
#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: OptKind,
    pub help: &'static str,
    pub default: Option<&'static str>,
}

impl OptSpec {
    /// All spellings of this option: aliases first in declaration order,
    /// then the canonical key.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> {
        self.aliases.iter().copied().chain(std::iter::once(self.key))
    }
}

/// One parsed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Str(String),
    Num(u64),
    List(Vec<ArgValue>),
}

impl ArgValue {
    fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "boolean",
            ArgValue::Str(_) => "string",
            ArgValue::Num(_) => "number",
            ArgValue::List(_) => "array",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Num(n) => write!(f, "{n}"),
            ArgValue::List(items) => {
                let rendered: Vec<String> =
                    items.iter().map(|i| i.to_string()).collect();
                f.write_str(&rendered.join(","))
            }
        }
    }
}

/// Parsed argument bag, keyed by option spelling.
pub type ArgBag = BTreeMap<String, ArgValue>;

/// Collect every value recorded for an option across all of its spellings.
///
/// Values appear aliases-first in declaration order, with the canonical key
/// last, and equal values are deduplicated. Any value whose runtime type does
/// not match `kind` fails with a type mismatch naming the offending spelling
/// and the literal value. Absent spellings are skipped silently.
pub fn values(
    bag: &ArgBag,
    spec: &OptSpec,
    kind: OptKind,
) -> Result<Vec<ArgValue>> {
    let mut out: Vec<ArgValue> = vec![];
    for spelling in spec.spellings() {
        collect_values(bag, spelling, kind, &mut out)?;
    }
    Ok(out)
}

fn collect_values(
    bag: &ArgBag,
    spelling: &str,
    kind: OptKind,
    out: &mut Vec<ArgValue>,
) -> Result<()> {
    let Some(value) = bag.get(spelling) else {
        return Ok(());
    };

    // a scalar is treated as a one-element sequence
    let items = match value {
        ArgValue::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    for item in items {
        let matches_kind = matches!(
            (kind, item),
            (OptKind::Bool, ArgValue::Bool(_))
                | (OptKind::Str | OptKind::StrList, ArgValue::Str(_))
                | (OptKind::Num, ArgValue::Num(_))
        );

        if !matches_kind {
            return Err(RelnotesError::TypeMismatch {
                option: spelling.to_string(),
                value: item.to_string(),
                expected: kind.name(),
                found: item.type_name(),
            });
        }

        if !out.contains(item) {
            out.push(item.clone());
        }
    }

    Ok(())
}

/// Get the potential value of a boolean option.
pub fn bool_value(bag: &ArgBag, spec: &OptSpec) -> Result<Option<bool>> {
    match values(bag, spec, OptKind::Bool)?.into_iter().next() {
        Some(ArgValue::Bool(b)) => Ok(Some(b)),
        _ => Ok(None),
    }
}

/// Get the potential value of a string option.
pub fn string_value(bag: &ArgBag, spec: &OptSpec) -> Result<Option<String>> {
    match values(bag, spec, OptKind::Str)?.into_iter().next() {
        Some(ArgValue::Str(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Get the potential value of a numeric option.
pub fn number_value(bag: &ArgBag, spec: &OptSpec) -> Result<Option<u64>> {
    match values(bag, spec, OptKind::Num)?.into_iter().next() {
        Some(ArgValue::Num(n)) => Ok(Some(n)),
        _ => Ok(None),
    }
}

/// Get all distinct string values of a repeatable option.
pub fn string_array_values(
    bag: &ArgBag,
    spec: &OptSpec,
) -> Result<Vec<String>> {
    let mut out = vec![];
    for value in values(bag, spec, OptKind::Str)? {
        if let ArgValue::Str(s) = value {
            out.push(s);
        }
    }
    Ok(out)
}

/// Get the value of a string option, failing if it is absent or empty.
///
/// The error distinguishes a value that was never provided from one that was
/// provided but empty.
pub fn required_string_value(bag: &ArgBag, spec: &OptSpec) -> Result<String> {
    match string_value(bag, spec)? {
        None => Err(RelnotesError::MissingValue {
            option: spec.key.to_string(),
            reason: "was not provided",
        }),
        Some(s) if s.is_empty() => Err(RelnotesError::MissingValue {
            option: spec.key.to_string(),
            reason: "value provided was empty",
        }),
        Some(s) => Ok(s),
    }
}

/// Validate that every value recorded for an option is a non-negative
/// integer and rewrite matching string values in place as numbers.
///
/// A string value must consist of one or more decimal digits; values that
/// are already numeric pass through. Absent spellings are left untouched.
pub fn coerce_positive_integer(bag: &mut ArgBag, spec: &OptSpec) -> Result<()> {
    for spelling in spec.spellings() {
        let Some(value) = bag.get(spelling) else {
            continue;
        };
        let coerced = coerce_value(spelling, value)?;
        bag.insert(spelling.to_string(), coerced);
    }
    Ok(())
}

fn coerce_value(spelling: &str, value: &ArgValue) -> Result<ArgValue> {
    let invalid = |value: String| RelnotesError::InvalidValue {
        option: spelling.to_string(),
        value,
        reason: "must be a positive integer",
    };

    match value {
        ArgValue::Num(n) => Ok(ArgValue::Num(*n)),
        ArgValue::Str(s)
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) =>
        {
            s.parse::<u64>()
                .map(ArgValue::Num)
                .map_err(|_| invalid(s.clone()))
        }
        ArgValue::List(items) => items
            .iter()
            .map(|item| coerce_value(spelling, item))
            .collect::<Result<Vec<ArgValue>>>()
            .map(ArgValue::List),
        other => Err(invalid(other.to_string())),
    }
}
