//! Definition Lookup
//!
//! The orchestrator asks for one definition per keyword. Any failure here is recovered
//! by the caller, which substitutes `DEFINITION_NOT_FOUND`.

use crate::error::DefinitionError;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

/// Produces a human-readable definition for a keyword.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// `context` is the optional preface text sent with the request.
    async fn define(&self, keyword: &str, context: Option<&str>)
        -> Result<String, DefinitionError>;
}

/// Looks definitions up in a Free Dictionary API compatible service.
pub struct DictionaryApiProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default, rename = "partOfSpeech")]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<DefinitionEntry>,
}

#[derive(Debug, Deserialize)]
struct DefinitionEntry {
    definition: String,
}

impl DictionaryApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DefinitionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn entry_url(&self, keyword: &str) -> String {
        format!("{}/{}", self.base_url, keyword)
    }
}

#[async_trait]
impl DefinitionProvider for DictionaryApiProvider {
    async fn define(
        &self,
        keyword: &str,
        _context: Option<&str>,
    ) -> Result<String, DefinitionError> {
        let response = self.client.get(self.entry_url(keyword)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DefinitionError::NotFound(keyword.to_string()));
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        first_definition(keyword, &body)
    }
}

/// Picks the first definition of the first meaning, prefixed with its part of speech.
pub(crate) fn first_definition(keyword: &str, body: &str) -> Result<String, DefinitionError> {
    let entries: Vec<DictionaryEntry> =
        serde_json::from_str(body).map_err(|e| DefinitionError::Malformed(e.to_string()))?;

    entries
        .into_iter()
        .flat_map(|entry| entry.meanings)
        .find_map(|meaning| {
            let definition = meaning.definitions.into_iter().next()?.definition;
            Some(match meaning.part_of_speech {
                Some(pos) if !pos.is_empty() => format!("({}) {}", pos, definition),
                _ => definition,
            })
        })
        .ok_or_else(|| DefinitionError::NotFound(keyword.to_string()))
}
