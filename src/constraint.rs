//! Version constraint expressions and matching against the version set.

use std::fmt;

use semver::{Version, VersionReq};

use crate::error::{GopSetupError, Result};

/// A parsed version constraint expression.
///
/// Supports comparison operators (`=`, `>`, `>=`, `<`, `<=`), tilde/caret
/// shorthand, wildcard components (`1.0.x`), bare partial versions ("1.0"),
/// and conjunctions of clauses separated by spaces or commas. Version
/// literals may carry a 'v' prefix. Any string either parses into a
/// constraint or is rejected here; non-version tokens such as "latest" or
/// "main" are rejected.
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    raw: String,
    req: VersionReq,
}

impl VersionConstraint {
    /// Parse a constraint expression.
    ///
    /// # Arguments
    /// * `expr` - Constraint expression (e.g., ">=1.0.0 <2.0.0")
    ///
    /// # Returns
    /// * `Ok(VersionConstraint)` - Successfully parsed constraint
    /// * `Err` - If the expression is not a valid constraint
    pub fn parse(expr: &str) -> Result<Self> {
        let normalized = normalize_expression(expr)?;
        let req = VersionReq::parse(&normalized).map_err(|e| {
            GopSetupError::version(format!("invalid version constraint '{}': {}", expr, e))
        })?;

        Ok(VersionConstraint {
            raw: expr.trim().to_string(),
            req,
        })
    }

    /// Check whether a version satisfies this constraint.
    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// The original expression text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Checks whether a string is a valid version constraint expression.
pub fn is_valid_version_constraint(expr: &str) -> bool {
    VersionConstraint::parse(expr).is_ok()
}

/// Rewrites the upstream constraint grammar into the semver crate's grammar.
///
/// Clauses arrive separated by spaces (optionally commas) and version
/// literals may carry a 'v' prefix; the semver grammar wants comma-separated
/// clauses without 'v'. An operator standing alone ("> 1.0") is re-attached
/// to the version that follows it.
fn normalize_expression(expr: &str) -> Result<String> {
    const OPERATORS: [&str; 7] = ["=", ">", ">=", "<", "<=", "~", "^"];

    let mut clauses: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in expr
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if OPERATORS.contains(&token) {
            if pending_op.is_some() {
                return Err(GopSetupError::version(format!(
                    "invalid version constraint '{}': consecutive operators",
                    expr
                )));
            }
            pending_op = Some(token);
            continue;
        }

        let clause = match pending_op.take() {
            Some(op) => format!("{}{}", op, token),
            None => token.to_string(),
        };
        clauses.push(strip_v_prefix(&clause));
    }

    if pending_op.is_some() {
        return Err(GopSetupError::version(format!(
            "invalid version constraint '{}': dangling operator",
            expr
        )));
    }
    if clauses.is_empty() {
        return Err(GopSetupError::version("empty version constraint"));
    }

    Ok(clauses.join(", "))
}

/// Drops a 'v'/'V' prefix from the version part of a single clause.
fn strip_v_prefix(clause: &str) -> String {
    let version_start = clause
        .find(|c: char| !matches!(c, '=' | '>' | '<' | '~' | '^'))
        .unwrap_or(clause.len());
    let (op, version) = clause.split_at(version_start);

    match version.strip_prefix(&['v', 'V'][..]) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => format!("{}{}", op, rest),
        _ => clause.to_string(),
    }
}

/// Finds the highest version satisfying a spec, or `None` for "no match".
///
/// Exact matches short-circuit constraint semantics: if the spec, minus a
/// leading 'v', equals a candidate's canonical form verbatim, that candidate
/// is returned directly. This allows pinning pre-release or build-tagged
/// versions that range constraints would never select. An unparsable spec
/// yields `None`, never an error - the caller falls back to branch search.
///
/// # Arguments
/// * `versions` - Valid versions, any order
/// * `spec` - Version spec: exact version or constraint expression
///
/// # Returns
/// The highest satisfying version by semantic precedence, or `None`
pub fn max_satisfying(versions: &[Version], spec: &str) -> Option<Version> {
    let trimmed = spec.trim();
    let pinned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if let Some(found) = versions.iter().find(|v| v.to_string() == pinned) {
        return Some(found.clone());
    }

    let constraint = VersionConstraint::parse(trimmed).ok()?;
    versions
        .iter()
        .filter(|v| constraint.matches(v))
        .max_by(|a, b| a.cmp_precedence(b))
        .cloned()
}
