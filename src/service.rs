//! Request handling around the paraphrase engine
//!
//! Validates a tree/limit request, runs the engine, truncates the results to
//! the limit and serializes each tree back to bracketed text. Responses
//! serialize (via serde) to either `{"paraphrases": [{"tree": "..."}]}` or
//! `{"error": "..."}`.

use serde::Serialize;
use std::env;
use thiserror::Error;

use crate::engine::Paraphraser;
use crate::parser::{ParseError, parse_tree};
use crate::tree::Tree;
use crate::writer::to_bracketed;

/// Limit used when a request does not give one
pub const DEFAULT_LIMIT: usize = 20;

/// Caller-facing request errors
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Please, provide a tree parameter.")]
    EmptyTree,

    #[error("Please, enter a valid syntax tree.")]
    InvalidTree(#[source] ParseError),

    #[error("The limit should be an integer.")]
    InvalidLimitType(String),

    #[error("The limit should be higher than 0.")]
    InvalidLimit(i64),

    #[error("The tree has too many paraphrases to generate (more than {max}).")]
    TooManyCombinations { count: Option<usize>, max: usize },
}

/// Malformed environment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Config error: {0} must not be empty")]
    Empty(&'static str),
}

/// Service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub target_label: String,
    pub allowed_labels: Vec<String>,
    pub default_limit: usize,
    /// Reject trees with more combinations than this before generating any
    pub max_combinations: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            target_label: "NP".to_string(),
            allowed_labels: vec!["NP".to_string(), ",".to_string(), "CC".to_string()],
            default_limit: DEFAULT_LIMIT,
            max_combinations: None,
        }
    }
}

impl ServiceConfig {
    pub const TARGET_LABEL_VAR: &'static str = "TREEPERM_TARGET_LABEL";
    pub const ALLOWED_LABELS_VAR: &'static str = "TREEPERM_ALLOWED_LABELS";
    pub const DEFAULT_LIMIT_VAR: &'static str = "TREEPERM_DEFAULT_LIMIT";
    pub const MAX_COMBINATIONS_VAR: &'static str = "TREEPERM_MAX_COMBINATIONS";

    /// Defaults overridden by `TREEPERM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(label) = lookup(Self::TARGET_LABEL_VAR) {
            let label = label.trim();
            if label.is_empty() {
                return Err(ConfigError::Empty(Self::TARGET_LABEL_VAR));
            }
            config.target_label = label.to_string();
        }

        if let Some(labels) = lookup(Self::ALLOWED_LABELS_VAR) {
            let labels: Vec<String> = labels.split_whitespace().map(str::to_string).collect();
            if labels.is_empty() {
                return Err(ConfigError::Empty(Self::ALLOWED_LABELS_VAR));
            }
            config.allowed_labels = labels;
        }

        if let Some(value) = lookup(Self::DEFAULT_LIMIT_VAR) {
            config.default_limit = parse_positive(Self::DEFAULT_LIMIT_VAR, &value)?;
        }

        if let Some(value) = lookup(Self::MAX_COMBINATIONS_VAR) {
            config.max_combinations = Some(parse_positive(Self::MAX_COMBINATIONS_VAR, &value)?);
        }

        Ok(config)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}

/// One generated tree in its bracketed form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paraphrase {
    pub tree: String,
}

/// Response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Paraphrases { paraphrases: Vec<Paraphrase> },
    Error { error: String },
}

impl Response {
    pub fn to_json(&self) -> String {
        // Plain strings and vectors always serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Paraphrase request handler
#[derive(Debug, Clone)]
pub struct ParaphraseService {
    config: ServiceConfig,
    paraphraser: Paraphraser,
}

impl ParaphraseService {
    pub fn new(config: ServiceConfig) -> Self {
        let paraphraser = Paraphraser::new(&config.target_label, config.allowed_labels.iter().cloned());
        Self {
            config,
            paraphraser,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate the request, generate and serialize up to `limit` paraphrases
    pub fn handle(&self, tree: Option<&str>, limit: Option<&str>) -> Result<Vec<Paraphrase>, RequestError> {
        Ok(self
            .generate(tree, limit)?
            .iter()
            .map(|tree| Paraphrase {
                tree: to_bracketed(tree),
            })
            .collect())
    }

    /// Validate the request and generate up to `limit` paraphrases as trees
    pub fn generate(&self, tree: Option<&str>, limit: Option<&str>) -> Result<Vec<Tree>, RequestError> {
        let text = match tree {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(RequestError::EmptyTree),
        };
        let limit = self.parse_limit(limit)?;

        let tree = parse_tree(text).map_err(RequestError::InvalidTree)?;
        let paraphrases = self.paraphraser.paraphrases(&tree);

        if let Some(max) = self.config.max_combinations {
            let count = paraphrases.combination_count().map(|n| n - 1);
            if count.is_none_or(|n| n > max) {
                return Err(RequestError::TooManyCombinations { count, max });
            }
        }

        Ok(paraphrases.take(limit).collect())
    }

    /// Same as [`handle`](Self::handle), folded into a response payload
    pub fn respond(&self, tree: Option<&str>, limit: Option<&str>) -> Response {
        match self.handle(tree, limit) {
            Ok(paraphrases) => Response::Paraphrases { paraphrases },
            Err(e) => Response::Error {
                error: e.to_string(),
            },
        }
    }

    fn parse_limit(&self, limit: Option<&str>) -> Result<usize, RequestError> {
        let Some(raw) = limit else {
            return Ok(self.config.default_limit);
        };
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| RequestError::InvalidLimitType(raw.to_string()))?;
        if value < 1 {
            return Err(RequestError::InvalidLimit(value));
        }
        Ok(usize::try_from(value).unwrap_or(usize::MAX))
    }
}

impl Default for ParaphraseService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
