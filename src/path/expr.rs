//! Path expression parsing

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// One dotted segment: a field name followed by zero or more `[...]` suffixes
static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]]*)((?:\[[^\[\]]*\])*)$").unwrap());

/// A single `[...]` index suffix
static INDEX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

/// A parsed path expression
///
/// Cheap to clone and safe to share between threads. The original text is
/// kept for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathExpr {
    source: String,
    pub(crate) alternatives: Vec<Alternative>,
}

/// One `||`-separated branch of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Alternative {
    /// Simple field/index steps, readable and writable
    Steps(Vec<Step>),
    /// Full JSONPath query, read-only
    Query(String),
}

/// A single navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// Object field by name
    Field(String),
    /// Every value of an object (`*`)
    AnyField,
    /// Array element; negative values count from the end
    Index(i64),
    /// Every array element (`[*]` or `[]`)
    AnyIndex,
}

impl PathExpr {
    /// Parse a path expression
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(Error::path_syntax(source, "expression is empty"));
        }

        let alternatives = split_alternatives(trimmed)
            .into_iter()
            .map(|alt| parse_alternative(source, alt.trim()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            alternatives,
        })
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `assign` can write through this expression
    pub fn is_writable(&self) -> bool {
        matches!(self.alternatives.first(), Some(Alternative::Steps(_)))
    }
}

/// Split on `||` that sits outside brackets, parentheses and quotes
///
/// A JSONPath filter such as `[?(@.a == 1 || @.b == 2)]` stays in one piece.
fn split_alternatives(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    let mut chars = expr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, '|') if depth == 0 && matches!(chars.peek(), Some((_, '|'))) => {
                parts.push(&expr[start..i]);
                chars.next();
                start = i + 2;
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

fn parse_alternative(source: &str, alt: &str) -> Result<Alternative> {
    if alt.is_empty() {
        return Err(Error::path_syntax(source, "empty alternative around '||'"));
    }

    if alt.contains("..") || alt.contains("?(") {
        let query = if alt.starts_with('$') {
            alt.to_string()
        } else {
            format!("$.{alt}")
        };
        super::accessor::find_with_jsonpath(&Value::Null, &query).map_err(|e| match e {
            Error::PathSyntax { message, .. } => Error::path_syntax(source, message),
            other => other,
        })?;
        return Ok(Alternative::Query(query));
    }

    let body = alt
        .strip_prefix("$.")
        .or_else(|| alt.strip_prefix('$'))
        .unwrap_or(alt);

    let mut steps = Vec::new();
    if body.is_empty() {
        return Ok(Alternative::Steps(steps));
    }

    for segment in body.split('.') {
        let caps = SEGMENT_REGEX
            .captures(segment)
            .ok_or_else(|| Error::path_syntax(source, format!("unbalanced brackets in '{segment}'")))?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let suffix = caps.get(2).map_or("", |m| m.as_str());

        match name {
            "" if suffix.is_empty() => {
                return Err(Error::path_syntax(source, "empty path segment"));
            }
            "" => {}
            "*" => steps.push(Step::AnyField),
            field => steps.push(Step::Field(field.to_string())),
        }

        for index in INDEX_REGEX.captures_iter(suffix) {
            let raw = index.get(1).map_or("", |m| m.as_str()).trim();
            let step = match raw {
                "" | "*" => Step::AnyIndex,
                n => n.parse::<i64>().map(Step::Index).map_err(|_| {
                    Error::path_syntax(source, format!("invalid array index '{n}'"))
                })?,
            };
            steps.push(step);
        }
    }

    Ok(Alternative::Steps(steps))
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for PathExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PathExpr {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PathExpr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PathExpr> for String {
    fn from(path: PathExpr) -> Self {
        path.source
    }
}
