//! Size-to-controls visibility table.
//!
//! Which parameter controls a model exposes depends on its input size:
//! snapshot captures (size 0 or 1) have no conditioning knobs, size 2
//! adds one, size 3 adds two. The exact control identifiers live in the
//! host's widget markup, so the mapping is supplied as configuration —
//! either built in code or loaded from a TOML table — rather than
//! hard-wired.
//!
//! ```toml
//! [[rule]]
//! size = 2
//! visible = ["conditioned-param-1"]
//!
//! [[rule]]
//! size = 3
//! visible = ["conditioned-param-1", "conditioned-param-2"]
//! ```

use crate::surface::ControlSurface;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a visibility table.
#[derive(Debug, Error)]
pub enum VisibilityError {
    /// Failed to read the configuration file
    #[error("failed to read visibility config '{}': {source}", path.display())]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML document
    #[error("failed to parse visibility config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two rules claim the same size value
    #[error("duplicate visibility rule for size {0}")]
    DuplicateRule(i64),
}

/// Configuration table mapping a model input size to the set of
/// controls visible at that size.
///
/// Controls named by any rule form the table's universe: applying a
/// rule shows the controls it lists and hides every other control the
/// table knows about. Sizes without a rule are a deliberate no-op, so
/// an out-of-range or unexpected size leaves the surface untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityMap {
    rules: BTreeMap<i64, BTreeSet<String>>,
}

#[derive(Deserialize)]
struct MapFile {
    #[serde(default)]
    rule: Vec<RuleDef>,
}

#[derive(Deserialize)]
struct RuleDef {
    size: i64,
    #[serde(default)]
    visible: Vec<String>,
}

impl VisibilityMap {
    /// Create an empty table (every size is a no-op).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule: at `size`, exactly the listed controls are visible.
    ///
    /// Builder-style; later rules for the same size replace earlier ones.
    pub fn rule<I, S>(mut self, size: i64, visible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .insert(size, visible.into_iter().map(Into::into).collect());
        self
    }

    /// The standard table for conditioned amp captures over two
    /// caller-supplied control identifiers: sizes 0 and 1 hide both,
    /// size 2 shows only `first`, size 3 shows both.
    pub fn conditioned(first: &str, second: &str) -> Self {
        Self::new()
            .rule(0, Vec::<String>::new())
            .rule(1, Vec::<String>::new())
            .rule(2, vec![first])
            .rule(3, vec![first, second])
    }

    /// Parse a table from a TOML document.
    pub fn from_toml_str(doc: &str) -> Result<Self, VisibilityError> {
        let file: MapFile = toml::from_str(doc)?;
        let mut map = Self::new();
        for rule in file.rule {
            if map.rules.contains_key(&rule.size) {
                return Err(VisibilityError::DuplicateRule(rule.size));
            }
            map = map.rule(rule.size, rule.visible);
        }
        Ok(map)
    }

    /// Load a table from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VisibilityError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path).map_err(|source| VisibilityError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&doc)
    }

    /// Whether the table has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every control named by any rule.
    pub fn controls(&self) -> BTreeSet<&str> {
        self.rules
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
            .collect()
    }

    /// Apply the rule for `size` to the surface.
    ///
    /// Returns `true` if a rule existed; `false` means the size has no
    /// rule and the surface was not touched.
    pub fn apply(&self, size: i64, surface: &mut dyn ControlSurface) -> bool {
        let Some(visible) = self.rules.get(&size) else {
            return false;
        };
        for control in self.controls() {
            surface.set_visible(control, visible.contains(control));
        }
        true
    }
}
