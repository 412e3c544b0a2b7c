//! Flat ignore rule set with first-match-wins evaluation.
//!
//! Rules come from a gitignore-style file: one pattern per line, `#` lines
//! and blank lines skipped, each rule trimmed. A trailing `/` marks a
//! directory-prefix rule; everything else is shell-glob matched (`*`, `?`,
//! bracket classes) against the full relative path.
//!
//! Negation (`!pattern`), recursive `**` globs, and nested ignore files are
//! out of dialect. A `!`-prefixed line is just another literal pattern.

use std::path::Path;

use glob::Pattern;

use crate::error::ConfigError;

/// Conventional ignore-file name at a sync root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// A single compiled ignore rule.
#[derive(Debug, Clone)]
enum Rule {
    /// `dir/` — matches the directory itself and every path beneath it.
    DirPrefix(String),
    /// Shell-style glob over the full relative path.
    Glob(Pattern),
    /// A pattern that failed to compile as a glob; compared verbatim.
    Literal(String),
}

/// Ordered ignore rules for one sync root. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<Rule>,
}

impl IgnoreRuleSet {
    /// Parse rules from ignore-file text.
    ///
    /// Comments and blank lines are dropped; remaining lines are trimmed
    /// and kept in file order.
    pub fn parse(text: &str) -> Self {
        let rules = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                if let Some(prefix) = line.strip_suffix('/') {
                    Rule::DirPrefix(prefix.to_owned())
                } else {
                    match Pattern::new(line) {
                        Ok(pattern) => Rule::Glob(pattern),
                        Err(_) => Rule::Literal(line.to_owned()),
                    }
                }
            })
            .collect();
        Self { rules }
    }

    /// Load rules from an ignore file on disk.
    ///
    /// A missing file yields the empty rule set ("ignore nothing"); a file
    /// that exists but cannot be read is a [`ConfigError`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::IgnoreUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&text))
    }

    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate `rel_path` (workspace-relative, `/`-separated) against the
    /// rule set. First matching rule wins; evaluation order is rule order.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        self.rules.iter().any(|rule| match rule {
            Rule::DirPrefix(prefix) => {
                if is_dir && rel_path == prefix {
                    return true;
                }
                // Prefix match must stop at a path component boundary:
                // `build/` covers `build/main.o` but never `buildup/file`.
                rel_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            }
            Rule::Glob(pattern) => pattern.matches(rel_path),
            Rule::Literal(literal) => rel_path == literal,
        })
    }
}
