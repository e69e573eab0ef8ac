//! Registry of supported site sections.
//!
//! The registry is an ordered list of [`SiteProfile`]s. Resolution walks the
//! list front to back and returns the first profile whose `match_key` is a
//! substring of the URL, so earlier entries take precedence. Keep narrower
//! keys ahead of the broader keys that contain them.
//!
//! The built-in table covers the CNN sections reachable from the CLI
//! categories. A replacement table can be loaded from YAML:
//!
//! ```yaml
//! - match_key: cnn.com/sport/golf
//!   selector: span.container__headline-text
//! - match_key: cnn.com
//!   selector: span.container__headline-text
//! ```

use crate::models::SiteProfile;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

const CNN_HEADLINE_SELECTOR: &str = "span.container__headline-text";

/// Built-in (match key, selector) pairs, most specific first.
const BUILTIN_PROFILES: &[(&str, &str)] = &[
    ("cnn.com/business/tech", CNN_HEADLINE_SELECTOR),
    ("cnn.com/business/media", CNN_HEADLINE_SELECTOR),
    ("cnn.com/business", CNN_HEADLINE_SELECTOR),
    ("cnn.com/politics", CNN_HEADLINE_SELECTOR),
    ("cnn.com/markets", CNN_HEADLINE_SELECTOR),
    ("cnn.com/sport/football", CNN_HEADLINE_SELECTOR),
    ("cnn.com/sport/tennis", CNN_HEADLINE_SELECTOR),
    ("cnn.com/sport/golf", CNN_HEADLINE_SELECTOR),
    ("cnn.com/sport", CNN_HEADLINE_SELECTOR),
    ("cnn.com/science/space", CNN_HEADLINE_SELECTOR),
    ("cnn.com/science/life", CNN_HEADLINE_SELECTOR),
    ("cnn.com/science/unearthed", CNN_HEADLINE_SELECTOR),
    ("cnn.com/science", CNN_HEADLINE_SELECTOR),
    ("cnn.com", CNN_HEADLINE_SELECTOR),
];

/// Failure to load a site table from disk.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read site table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site table {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("site table {path} has no entries")]
    Empty { path: String },
}

/// Immutable, ordered table of site profiles.
///
/// Built once at startup and handed to the extractor by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRegistry {
    profiles: Vec<SiteProfile>,
}

impl SiteRegistry {
    /// The CNN section table shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_PROFILES.iter().copied())
    }

    /// Build a registry from (match key, selector) pairs, keeping their order.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            profiles: pairs
                .into_iter()
                .map(|(key, selector)| SiteProfile::new(key, selector))
                .collect(),
        }
    }

    /// Load an ordered profile list from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path_str = path.as_ref().display().to_string();
        let raw = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|source| RegistryError::Io {
                path: path_str.clone(),
                source,
            })?;
        let profiles: Vec<SiteProfile> =
            serde_yaml::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: path_str.clone(),
                source,
            })?;
        if profiles.is_empty() {
            return Err(RegistryError::Empty { path: path_str });
        }

        info!(count = profiles.len(), "Loaded site table");
        Ok(Self { profiles })
    }

    /// The YAML table at `path` when one is given, otherwise [`SiteRegistry::builtin`].
    pub async fn load(path: Option<&Path>) -> Result<Self, RegistryError> {
        match path {
            Some(path) => Self::from_yaml_file(path).await,
            None => Ok(Self::builtin()),
        }
    }

    /// Return the first profile whose match key occurs anywhere in `url`.
    pub fn resolve(&self, url: &str) -> Option<&SiteProfile> {
        let hit = self.profiles.iter().find(|p| url.contains(&p.match_key));
        debug!(%url, matched = ?hit.map(|p| p.match_key.as_str()), "Resolved site profile");
        hit
    }

    /// Profiles in precedence order.
    pub fn profiles(&self) -> &[SiteProfile] {
        &self.profiles
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
