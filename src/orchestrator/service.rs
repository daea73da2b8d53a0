//! Analysis Service
//!
//! ## Paths
//! - **Synchronous**: validate, apply the content policy, extract, define, answer.
//! - **Asynchronous**: derive `task_<id>`, enqueue, answer immediately. A worker later
//!   runs the same analysis and stores either the completed record or an error record
//!   under the task id. Until that write lands, polling reports `processing`.
//!
//! Resubmitting a request id reuses its task id; whichever background write happens
//! last is the one polling sees.

use super::types::{JobRecord, ProcessingRequest};
use crate::analysis::definitions::{DEFINITION_NOT_FOUND, DefinitionProvider};
use crate::analysis::extractor::KeywordExtractor;
use crate::analysis::filter::ContentClassifier;
use crate::analysis::tokenizer::tokenize_text;
use crate::analysis::types::{
    ExtractionConfig, Keyword, KeywordAnnotation, OutputData, TextAnalysis, WordDefinitions,
};
use crate::config::Settings;
use crate::error::AnalysisError;
use crate::executor::queue::JobQueue;
use crate::executor::registry::TaskHandlerRegistry;
use crate::executor::types::{Task, TaskId};
use crate::storage::store::ResultStore;

use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Registry name of the background analysis task.
pub const ANALYZE_TEXT_HANDLER: &str = "analyze_text";

#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub extraction: ExtractionConfig,
    pub include_definitions: bool,
    /// Reject flagged text instead of only reporting `is_offensive`.
    pub reject_offensive: bool,
}

impl From<&Settings> for AnalyzerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            extraction: ExtractionConfig {
                max_keywords: settings.max_keywords,
                diversity: settings.keyword_diversity,
            },
            include_definitions: settings.include_definitions,
            reject_offensive: settings.reject_offensive,
        }
    }
}

pub struct Analyzer {
    extractor: Arc<dyn KeywordExtractor>,
    definitions: Arc<dyn DefinitionProvider>,
    classifier: Arc<dyn ContentClassifier>,
    store: Arc<dyn ResultStore>,
    queue: JobQueue,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(
        extractor: Arc<dyn KeywordExtractor>,
        definitions: Arc<dyn DefinitionProvider>,
        classifier: Arc<dyn ContentClassifier>,
        store: Arc<dyn ResultStore>,
        queue: JobQueue,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            extractor,
            definitions,
            classifier,
            store,
            queue,
            options,
        }
    }

    /// Registers the background analysis handler on `registry`.
    pub fn register_handlers(self: &Arc<Self>, registry: &TaskHandlerRegistry) {
        let analyzer = self.clone();
        registry.register(ANALYZE_TEXT_HANDLER, move |task: Task| {
            let analyzer = analyzer.clone();
            async move {
                match serde_json::from_value::<ProcessingRequest>(task.payload) {
                    Ok(request) => {
                        analyzer.run_async(request, &task.task_id).await;
                        Ok(())
                    }
                    Err(e) => {
                        let message = format!("Invalid task payload: {}", e);
                        analyzer.write_record(&task.task_id, &JobRecord::failed(&message)).await;
                        Err(anyhow::anyhow!(message))
                    }
                }
            }
        });
    }

    /// Analyses `request` inline.
    pub async fn process_sync(
        &self,
        request: &ProcessingRequest,
    ) -> Result<OutputData, AnalysisError> {
        tracing::info!("Received text processing request {}", request.id);

        let result = self.analyze(request).await;
        match &result {
            Ok(output) => tracing::info!(
                "Request {} produced {} keywords",
                request.id,
                output.text_analysis.keywords.len()
            ),
            Err(e) => tracing::error!("Request {} failed: {}", request.id, e),
        }
        result
    }

    /// Schedules background analysis and returns the task id without waiting.
    ///
    /// Nothing about the text is checked here; validation happens in the worker.
    pub fn submit_async(&self, request: ProcessingRequest) -> Result<TaskId, AnalysisError> {
        let task_id = TaskId::for_request(&request.id);
        let payload = serde_json::to_value(&request)
            .map_err(|e| AnalysisError::Scheduling(e.to_string()))?;

        self.queue
            .submit(Task::new(task_id.clone(), ANALYZE_TEXT_HANDLER, payload))
            .map_err(|e| {
                tracing::error!("Failed to schedule {}: {}", task_id, e);
                AnalysisError::Scheduling(e.to_string())
            })?;

        tracing::info!("Scheduled background processing as {}", task_id);
        Ok(task_id)
    }

    /// The background routine: analyse, then store a completed or error record.
    pub async fn run_async(&self, request: ProcessingRequest, task_id: &TaskId) {
        let record = match self.analyze(&request).await {
            Ok(output) => JobRecord::completed(output),
            Err(e) => {
                tracing::error!("Error during async processing of {}: {}", task_id, e);
                JobRecord::failed(e.to_string())
            }
        };

        self.write_record(task_id, &record).await;
    }

    /// Current state of `task_id`. A missing entry reads as `processing`, whether or
    /// not the task was ever submitted.
    pub async fn get_result(&self, task_id: &str) -> JobRecord {
        match self.store.get(task_id).await {
            Ok(None) => JobRecord::processing(),
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::error!("Stored result for {} is unreadable: {}", task_id, e);
                JobRecord::failed(format!("Stored result is unreadable: {}", e))
            }),
            Err(e) => {
                tracing::error!("Failed to read result for {}: {}", task_id, e);
                JobRecord::failed(e.to_string())
            }
        }
    }

    async fn write_record(&self, task_id: &TaskId, record: &JobRecord) {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize result for {}: {}", task_id, e);
                return;
            }
        };

        match self.store.set(task_id.as_str(), json).await {
            Ok(()) => tracing::info!("Stored {:?} result for {}", record.status, task_id),
            Err(e) => tracing::error!("Failed to store result for {}: {}", task_id, e),
        }
    }

    async fn analyze(&self, request: &ProcessingRequest) -> Result<OutputData, AnalysisError> {
        if request.data.trim().is_empty() {
            return Err(AnalysisError::empty_content());
        }

        let is_offensive = self.classifier.classify(&request.data);
        if is_offensive && self.options.reject_offensive {
            return Err(AnalysisError::offensive_content());
        }

        tracing::debug!(
            "Extracting keywords with {} for request {}",
            self.extractor.model_name(),
            request.id
        );
        let mut keywords = self
            .extractor
            .extract(&request.data, &self.options.extraction)
            .await
            .map_err(|e| AnalysisError::Processing(format!("Error during keyword extraction: {}", e)))?;
        keywords.truncate(self.options.extraction.max_keywords);

        let word_definitions = if self.options.include_definitions {
            self.define_keywords(&keywords, request).await
        } else {
            WordDefinitions::default()
        };

        Ok(OutputData {
            word_definitions,
            text_analysis: TextAnalysis {
                keyword_frequencies: keyword_frequencies(&request.data, &keywords),
                keywords,
                is_offensive,
            },
            processed_at: Utc::now(),
        })
    }

    /// One lookup per keyword; a failed lookup yields the placeholder and never aborts.
    async fn define_keywords(
        &self,
        keywords: &[Keyword],
        request: &ProcessingRequest,
    ) -> WordDefinitions {
        let mut definitions = BTreeMap::new();

        for keyword in keywords {
            let definition = match self
                .definitions
                .define(&keyword.text, request.preface.as_deref())
                .await
            {
                Ok(definition) => definition,
                Err(e) => {
                    tracing::warn!("No definition for '{}': {}", keyword.text, e);
                    DEFINITION_NOT_FOUND.to_string()
                }
            };

            definitions.insert(
                keyword.text.clone(),
                KeywordAnnotation {
                    definition,
                    source_ids: BTreeSet::from([request.id.clone()]),
                },
            );
        }

        WordDefinitions { definitions }
    }
}

/// Whole-token occurrence counts of each keyword in `text`.
fn keyword_frequencies(text: &str, keywords: &[Keyword]) -> BTreeMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize_text(text) {
        *counts.entry(token).or_insert(0) += 1;
    }

    keywords
        .iter()
        .map(|k| {
            let lowered = k.text.to_lowercase();
            let count = counts.get(&lowered).copied().unwrap_or(0);
            (k.text.clone(), count)
        })
        .collect()
}
