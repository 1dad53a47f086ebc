//! Output naming: filename patterns and hash strategy per mode.
//!
//! Patterns use bracketed placeholders:
//!
//! - `[name]` — chunk or entry name
//! - `[hash]` — build-wide hash, identical for every artifact of one build
//! - `[chunkhash]`, `[contenthash]` — hash of the artifact's own bytes
//!
//! Hash placeholders accept a length suffix (`[contenthash:8]`); the default
//! length is [`DEFAULT_HASH_LENGTH`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::mode::Mode;

/// Hex characters kept from a BLAKE3 digest
pub const DEFAULT_HASH_LENGTH: usize = 20;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(name|hash|chunkhash|contenthash)(?::(\d+))?\]")
        .expect("placeholder regex is valid")
});

/// How entry and chunk filenames are hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashStrategy {
    /// One hash for the whole build; changes on every rebuild
    Build,
    /// Per-artifact hash; stable while the artifact's bytes are unchanged
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenamePattern(String);

impl FilenamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_name(&self) -> bool {
        self.placeholders().any(|p| p == "name")
    }

    pub fn uses_build_hash(&self) -> bool {
        self.placeholders().any(|p| p == "hash")
    }

    pub fn uses_content_hash(&self) -> bool {
        self.placeholders()
            .any(|p| p == "chunkhash" || p == "contenthash")
    }

    fn placeholders(&self) -> impl Iterator<Item = &str> {
        PLACEHOLDER
            .captures_iter(&self.0)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
    }

    /// Substitute placeholders. Hashes are full hex digests; they are cut
    /// to the requested length here.
    ///
    /// ```
    /// use kiln_config::FilenamePattern;
    ///
    /// let pattern = FilenamePattern::new("[name].[contenthash:4].css");
    /// assert_eq!(pattern.render("main", "ffff", "abcdef"), "main.abcd.css");
    /// ```
    pub fn render(&self, name: &str, build_hash: &str, content_hash: &str) -> String {
        PLACEHOLDER
            .replace_all(&self.0, |caps: &Captures<'_>| {
                let len = caps
                    .get(2)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .unwrap_or(DEFAULT_HASH_LENGTH);
                match &caps[1] {
                    "name" => name.to_string(),
                    "hash" => truncate(build_hash, len).to_string(),
                    _ => truncate(content_hash, len).to_string(),
                }
            })
            .into_owned()
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn truncate(hash: &str, len: usize) -> &str {
    &hash[..len.min(hash.len())]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputScheme {
    /// Output directory
    pub path: PathBuf,
    pub entry_filename: FilenamePattern,
    pub chunk_filename: FilenamePattern,
    pub style_filename: FilenamePattern,
    /// Strategy for entry and chunk names; styles always use content hashes
    pub hash_strategy: HashStrategy,
}

/// Artifact classes an [`OutputScheme`] names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Entry,
    Chunk,
    Style,
}

/// An artifact the external engine produced, as input to name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub kind: ArtifactKind,
    pub content: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, kind: ArtifactKind, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub name: String,
    pub kind: ArtifactKind,
    pub filename: String,
}

impl OutputScheme {
    pub fn pattern(&self, kind: ArtifactKind) -> &FilenamePattern {
        match kind {
            ArtifactKind::Entry => &self.entry_filename,
            ArtifactKind::Chunk => &self.chunk_filename,
            ArtifactKind::Style => &self.style_filename,
        }
    }

    /// Compute concrete filenames for one build's artifacts.
    ///
    /// The build-wide hash covers every artifact's name and bytes and does
    /// not depend on input order. Two artifacts resolving to the same
    /// filename are reported as [`ConfigError::FilenameCollision`].
    pub fn resolve_artifacts(&self, artifacts: &[Artifact]) -> Result<Vec<ResolvedArtifact>> {
        let build_hash = build_hash(artifacts);
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(artifacts.len());
        let mut resolved = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            let pattern = self.pattern(artifact.kind);
            let content_hash = blake3::hash(&artifact.content).to_hex();
            let filename = pattern.render(&artifact.name, &build_hash, content_hash.as_str());

            if let Some(first) = seen.insert(filename.clone(), &artifact.name) {
                return Err(ConfigError::FilenameCollision {
                    pattern: pattern.to_string(),
                    name: filename,
                    first: first.to_string(),
                    second: artifact.name.clone(),
                });
            }

            resolved.push(ResolvedArtifact {
                name: artifact.name.clone(),
                kind: artifact.kind,
                filename,
            });
        }

        Ok(resolved)
    }

    /// Check that distinct entry names cannot share an entry filename,
    /// whatever the hashes turn out to be.
    pub fn check_entry_names<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let pattern = &self.entry_filename;
        let mut seen: HashMap<String, &str> = HashMap::new();
        for name in names {
            // Content hashes may coincide for identical bytes, so assume they do.
            let filename = pattern.render(name, "", "");
            if let Some(first) = seen.insert(filename.clone(), name) {
                return Err(ConfigError::FilenameCollision {
                    pattern: pattern.to_string(),
                    name: filename,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn build_hash(artifacts: &[Artifact]) -> String {
    let mut ordered: Vec<&Artifact> = artifacts.iter().collect();
    ordered.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));

    let mut hasher = blake3::Hasher::new();
    for artifact in ordered {
        hasher.update(artifact.name.as_bytes());
        hasher.update(b"\0");
        hasher.update(blake3::hash(&artifact.content).as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

pub struct OutputNamer;

impl OutputNamer {
    /// Filename scheme for `mode`, writing into `out_dir`.
    pub fn scheme(mode: Mode, out_dir: &Path) -> OutputScheme {
        let (script, hash_strategy) = match mode {
            Mode::Development => ("[name].[hash].js", HashStrategy::Build),
            Mode::Production => ("[name].[chunkhash].js", HashStrategy::Content),
        };

        OutputScheme {
            path: out_dir.to_path_buf(),
            entry_filename: FilenamePattern::new(script),
            chunk_filename: FilenamePattern::new(script),
            style_filename: FilenamePattern::new("[name].[contenthash].css"),
            hash_strategy,
        }
    }
}
