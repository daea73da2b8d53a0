//! Analysis Data Types
//!
//! The result shapes produced by the synchronous path and persisted by the asynchronous
//! one. Everything here round-trips through JSON unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single extracted keyword and its relevance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub score: f32,
}

/// Pass-through extractor parameters.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub max_keywords: usize,
    pub diversity: f32,
}

/// A definition together with the requests that contributed the keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnnotation {
    pub definition: String,
    pub source_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDefinitions {
    pub definitions: BTreeMap<String, KeywordAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    /// Extractor output order (descending relevance).
    pub keywords: Vec<Keyword>,
    pub keyword_frequencies: BTreeMap<String, usize>,
    pub is_offensive: bool,
}

/// The complete analysis of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    pub word_definitions: WordDefinitions,
    pub text_analysis: TextAnalysis,
    pub processed_at: DateTime<Utc>,
}
