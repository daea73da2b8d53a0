//! Keyword Extraction
//!
//! `StatisticalExtractor` ranks single-word candidates by normalised term frequency with
//! a small bonus for appearing early, then picks the final list by maximal marginal
//! relevance: each pick trades relevance against character-trigram similarity to the
//! keywords already chosen, weighted by the diversity factor.

use super::tokenizer::candidate_tokens;
use super::types::{ExtractionConfig, Keyword};

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Produces ranked keyword candidates from text.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Identifier of the underlying model, reported in logs.
    fn model_name(&self) -> &str;

    /// Returns at most `config.max_keywords` keywords, most relevant first.
    async fn extract(&self, text: &str, config: &ExtractionConfig) -> Result<Vec<Keyword>>;
}

const FREQUENCY_WEIGHT: f32 = 0.8;
const POSITION_WEIGHT: f32 = 0.2;

pub struct StatisticalExtractor {
    model_name: String,
}

impl StatisticalExtractor {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl KeywordExtractor for StatisticalExtractor {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn extract(&self, text: &str, config: &ExtractionConfig) -> Result<Vec<Keyword>> {
        let candidates = rank_candidates(text);
        Ok(select_diverse(candidates, config.max_keywords, config.diversity))
    }
}

/// Scores every distinct candidate token, highest relevance first.
pub fn rank_candidates(text: &str) -> Vec<Keyword> {
    let tokens = candidate_tokens(text);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        *counts.entry(token).or_insert(0) += 1;
        first_seen.entry(token).or_insert(position);
    }

    let max_count = counts.values().copied().max().unwrap_or(1) as f32;
    let total = tokens.len() as f32;

    let mut ranked: Vec<(usize, Keyword)> = counts
        .iter()
        .map(|(token, count)| {
            let position = first_seen[token];
            let frequency = *count as f32 / max_count;
            let earliness = 1.0 - position as f32 / total;
            let score = FREQUENCY_WEIGHT * frequency + POSITION_WEIGHT * earliness;
            (
                position,
                Keyword {
                    text: token.to_string(),
                    score: round4(score),
                },
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    ranked.into_iter().map(|(_, keyword)| keyword).collect()
}

/// Maximal marginal relevance selection over ranked candidates.
pub fn select_diverse(
    candidates: Vec<Keyword>,
    max_keywords: usize,
    diversity: f32,
) -> Vec<Keyword> {
    let diversity = diversity.clamp(0.0, 1.0);
    let mut remaining = candidates;
    let mut selected: Vec<Keyword> = Vec::with_capacity(max_keywords.min(remaining.len()));
    let mut selected_grams: Vec<HashSet<String>> = Vec::new();

    while selected.len() < max_keywords && !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_value = f32::MIN;

        for (index, candidate) in remaining.iter().enumerate() {
            let grams = trigrams(&candidate.text);
            let redundancy = selected_grams
                .iter()
                .map(|chosen| jaccard(&grams, chosen))
                .fold(0.0_f32, f32::max);
            let value = (1.0 - diversity) * candidate.score - diversity * redundancy;
            if value > best_value {
                best_value = value;
                best_index = index;
            }
        }

        let pick = remaining.remove(best_index);
        selected_grams.push(trigrams(&pick.text));
        selected.push(pick);
    }

    selected
}

fn trigrams(word: &str) -> HashSet<String> {
    let padded: Vec<char> = format!(" {} ", word).chars().collect();
    padded
        .windows(3)
        .map(|window| window.iter().collect())
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f32 / union as f32
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
