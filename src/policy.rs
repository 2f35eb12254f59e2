use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Error};
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

/// The policy shipped with the crate.
pub const BUILTIN_POLICY: &str = include_str!("../config/policy.toml");

fn default_min_token_len() -> usize {
    3
}

/// On-disk form of a [`NamePolicy`].
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default)]
    pub denylist: Vec<String>,
    #[serde(default)]
    pub noise_tokens: Vec<String>,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

/// Rules used to guess an instructor name out of an event description and
/// to drop permanent staff.
#[derive(Debug, Clone)]
pub struct NamePolicy {
    denylist: HashSet<String>,
    noise: Option<Regex>,
    min_token_len: usize,
}

impl NamePolicy {
    pub fn builtin() -> Result<NamePolicy, Error> {
        NamePolicy::from_toml(BUILTIN_POLICY).context("parsing built-in name policy")
    }

    pub fn load(path: &Path) -> Result<NamePolicy, Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading name policy {}", path.display()))?;

        NamePolicy::from_toml(&contents)
            .with_context(|| format!("parsing name policy {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<NamePolicy, Error> {
        let config: PolicyConfig = toml::from_str(contents)?;

        NamePolicy::from_config(config)
    }

    pub fn from_config(config: PolicyConfig) -> Result<NamePolicy, Error> {
        let noise = if config.noise_tokens.is_empty() {
            None
        } else {
            let pattern = config
                .noise_tokens
                .iter()
                .map(|token| regex::escape(token))
                .join("|");
            Some(Regex::new(&pattern)?)
        };

        // Nobody is ever called "".
        let denylist = config
            .denylist
            .into_iter()
            .chain(std::iter::once(String::new()))
            .collect();

        Ok(NamePolicy {
            denylist,
            noise,
            min_token_len: config.min_token_len,
        })
    }

    pub fn is_denylisted(&self, name: &str) -> bool {
        self.denylist.contains(name)
    }

    /// Whether `token` contains one of the noise tokens.
    pub fn is_noise(&self, token: &str) -> bool {
        self.noise
            .as_ref()
            .map_or(false, |noise| noise.is_match(token))
    }

    /// Whether `token` may be part of an instructor name.
    pub fn keeps_token(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len && !self.is_noise(token)
    }
}
