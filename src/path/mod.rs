//! Path accessor module
//!
//! Reads and writes values inside `serde_json::Value` documents using
//! short path expressions such as `Contents[-1].Key` or `NextMarker || Marker`.
//!
//! # Overview
//!
//! - `PathExpr` - a parsed, reusable path expression
//! - `resolve` - every value the expression matches (missing paths match nothing)
//! - `assign` - write a value at every location the expression matches
//!
//! Expressions that need recursive descent or filters fall back to full
//! JSONPath via `jsonpath-rust`; those are read-only.

mod accessor;
mod expr;

pub use accessor::{assign, resolve, resolve_first};
pub use expr::PathExpr;
