use crate::error::{MangaDlError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Per-site extraction rules: where the manga title and the first page
/// image live in the chapter page, and how page image URLs are numbered.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub name_selector: String,
    pub image_selector: String,
    /// Regex with exactly one capture group matching the numbering token.
    pub url_regex: String,
    #[serde(default = "default_step")]
    pub step: u64,
    #[serde(default)]
    pub trailing_zeros: usize,
}

fn default_step() -> u64 {
    1
}

/// Immutable hostname-keyed rule table. Loaded once at startup; lookups are
/// exact string matches, no subdomain or wildcard handling.
#[derive(Debug, Clone, Default)]
pub struct Rulebook {
    sites: HashMap<String, Rule>,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    sites: HashMap<String, Rule>,
}

impl Rulebook {
    pub fn builtin() -> Self {
        let mut sites = HashMap::new();

        sites.insert(
            "www.mangahere.co".to_string(),
            Rule {
                name_selector: ".readpage_top > div:nth-child(2) > h1:nth-child(1) > a:nth-child(1)"
                    .to_string(),
                image_selector: "#image".to_string(),
                url_regex: r"([0-9]{3})\.jpg".to_string(),
                step: 1,
                trailing_zeros: 3,
            },
        );

        sites.insert(
            "mangafox.me".to_string(),
            Rule {
                name_selector: ".no > a:nth-child(1)".to_string(),
                image_selector: "#image".to_string(),
                url_regex: r"([0-9]{3})\.jpg".to_string(),
                step: 1,
                trailing_zeros: 3,
            },
        );

        sites.insert(
            "www.mangareader.net".to_string(),
            Rule {
                name_selector: "#mangainfo > div:nth-child(1) > h1:nth-child(1)".to_string(),
                image_selector: "#img".to_string(),
                url_regex: r"([0-9]{3})\.jpg".to_string(),
                step: 2,
                trailing_zeros: 3,
            },
        );

        sites.insert(
            "www.mangapanda.com".to_string(),
            Rule {
                name_selector: "#mangainfo > div:nth-child(1) > h1:nth-child(1)".to_string(),
                image_selector: "#img".to_string(),
                url_regex: r"([0-9]{3})\.jpg".to_string(),
                step: 2,
                trailing_zeros: 3,
            },
        );

        Self { sites }
    }

    /// Merge extra rules from a TOML file. Entries shadow builtin rules for
    /// the same hostname.
    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = fs::read_to_string(path.as_ref())?;
        let parsed: RulesFile = toml::from_str(&content)
            .map_err(|e| MangaDlError::invalid_rule(e.to_string()))?;

        debug!(
            "merging {} site rules from {:?}",
            parsed.sites.len(),
            path.as_ref()
        );
        self.sites.extend(parsed.sites);
        Ok(())
    }

    pub fn lookup(&self, hostname: &str) -> Option<&Rule> {
        self.sites.get(hostname)
    }
}
