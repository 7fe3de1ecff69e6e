//! Model-backed enrichment tasks
//!
//! Each task builds prompts from a batch of items, sends them through the
//! shared gate and parses the tagged JSON payload of the reply.

use super::enricher::Enricher;
use super::payload::{find_tagged, parse_array, parse_data, truncate_chars};
use super::prompts;
use super::types::{BotContent, BotOutput, ItemText, Overview, TagAssignment, TagInfo, Translation};
use crate::config::BotConfig;
use crate::core::batch::run_batches;
use crate::core::gate::GateError;
use crate::feed::FeedItem;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Characters of each item used for tag generation
pub const TAG_SNIPPET_CHARS: usize = 30;
/// Characters of each item used for tag assignment
pub const TAG_ASSIGN_CHARS: usize = 50;
/// Characters of each item used for the overview
pub const OVERVIEW_CHARS: usize = 250;
/// Characters of a failed prompt kept in the task log
pub const LOGGED_PROMPT_CHARS: usize = 1000;
/// Overview text for a day without items
pub const NO_POSTS: &str = "[NO POSTS]";

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

impl Enricher {
    /// Send one prompt and return the full reply
    ///
    /// Failures are logged and written to the task log before being returned.
    pub(super) async fn complete(&self, task: &str, prompt: String) -> Result<String, GateError> {
        let request = self.ai().request(prompt);
        match self.gate().execute_collect(&request).await {
            Ok(text) => Ok(text),
            Err(e) => {
                error!(
                    task,
                    status = ?e.status(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Model task failed"
                );
                if let Some(log) = self.task_log() {
                    let status = e.status().map(|s| format!(" (HTTP {})", s)).unwrap_or_default();
                    log.record(&format!(
                        "{} FAILED{}\nError: {}\nPrompt: {}",
                        task,
                        status,
                        e,
                        truncate_chars(&request.prompt, LOGGED_PROMPT_CHARS)
                    ))
                    .await;
                }
                Err(e)
            }
        }
    }

    /// Translate items that are not already in Chinese
    ///
    /// Only translated items are returned; a failed batch contributes nothing.
    pub async fn translate(&self, items: Vec<ItemText>) -> Vec<Translation> {
        info!(items = items.len(), "Starting AI translation");

        let translations = run_batches(
            items,
            self.batch_size(),
            |batch, _| async move {
                let text = self
                    .complete("Translation batch", prompts::translation(&to_json(&batch)))
                    .await?;
                Ok::<_, GateError>(parse_data::<Translation>(&text, prompts::TRANSLATE_TAG))
            },
            self.batch_options(),
        )
        .await;

        info!("AI translation finished. Processed {} items.", translations.len());
        translations
    }

    /// Derive a tag set from the start of every item
    ///
    /// Any parsed tag set, even an empty one, gets the `other` tag. Returns an
    /// empty list when there is nothing to tag, the call fails, or the reply
    /// lacks a `<TagsInfo>` object with a `tags_info` array.
    pub async fn generate_tags_info(&self, contents: &[String]) -> Vec<TagInfo> {
        if contents.is_empty() {
            return Vec::new();
        }

        info!("Starting tag generation");
        let snippets: Vec<&str> = contents
            .iter()
            .map(|c| truncate_chars(c, TAG_SNIPPET_CHARS))
            .collect();

        let Ok(text) = self
            .complete("Tag generation", prompts::tags_generation(&to_json(&snippets)))
            .await
        else {
            return Vec::new();
        };

        let Some(mut tags) = find_tagged(&text, prompts::TAGS_INFO_TAG)
            .and_then(|body| parse_array::<TagInfo>(body, "tags_info"))
        else {
            warn!("Tag generation reply has no usable <{}> payload", prompts::TAGS_INFO_TAG);
            return Vec::new();
        };

        if !tags.iter().any(|t| t.tag_id == TagInfo::OTHER_ID) {
            tags.push(TagInfo::other());
        }
        info!(tags = tags.len(), "Tag generation finished");
        tags
    }

    /// Assign tags from `tags_info` to every item
    pub async fn assign_tags(&self, items: Vec<ItemText>, tags_info: &[TagInfo]) -> Vec<TagAssignment> {
        info!(items = items.len(), "Starting tag assignment");

        let items: Vec<ItemText> = items
            .into_iter()
            .map(|item| {
                let content = truncate_chars(&item.content, TAG_ASSIGN_CHARS).to_string();
                ItemText { content, ..item }
            })
            .collect();
        let tags_json = to_json(tags_info);
        let tags_json = tags_json.as_str();

        let assignments = run_batches(
            items,
            self.batch_size(),
            |batch, _| async move {
                let prompt = prompts::tags_assignment(&to_json(&batch), tags_json);
                let text = self.complete("Tag assignment batch", prompt).await?;
                Ok::<_, GateError>(parse_data::<TagAssignment>(&text, prompts::TAGS_DATA_TAG))
            },
            self.batch_options(),
        )
        .await;

        info!("Tag assignment finished. Processed {} items.", assignments.len());
        assignments
    }

    /// Run every bot over all items
    ///
    /// Bots run one after another, each as its own batched pass. Items a bot
    /// skips, or answers with blank markdown, get no entry for that bot.
    pub async fn generate_bot_content(&self, items: &[ItemText], bots: &[BotConfig]) -> BotContent {
        let mut content = BotContent::new();

        for bot in bots {
            info!(bot_id = %bot.bot_id, "Starting bot generation");
            let task = format!("Bot {} batch", bot.bot_id);
            let task = task.as_str();

            let outputs = run_batches(
                items.to_vec(),
                self.batch_size(),
                |batch, _| async move {
                    let text = self
                        .complete(task, prompts::bot(&bot.prompt, &to_json(&batch)))
                        .await?;
                    Ok::<_, GateError>(parse_data::<BotOutput>(&text, prompts::BOT_TAG))
                },
                self.batch_options(),
            )
            .await;

            for output in outputs {
                let md = output.md.trim();
                if md.is_empty() {
                    continue;
                }
                content
                    .entry(output.tw_id)
                    .or_default()
                    .insert(bot.bot_id.clone(), md.to_string());
            }
        }

        content
    }

    /// Summarize the items published on `day` (`YYYY-MM-DD`)
    ///
    /// Returns `[NO POSTS]` for a day without items and `None` when the model
    /// call fails.
    pub async fn generate_overview(&self, items: &[FeedItem], day: &str) -> Option<Overview> {
        let posts: Vec<ItemText> = items
            .iter()
            .filter(|item| item.date_published.starts_with(day))
            .map(|item| ItemText::new(&item.tw_id, truncate_chars(&item.content, OVERVIEW_CHARS)))
            .collect();

        if posts.is_empty() {
            info!("No items found for overview day: {}", day);
            return Some(HashMap::from([(day.to_string(), NO_POSTS.to_string())]));
        }

        info!(day, posts = posts.len(), "Starting overview generation");
        let text = self
            .complete("Overview generation", prompts::overview(day, &to_json(&posts)))
            .await
            .ok()?;

        Some(HashMap::from([(day.to_string(), text)]))
    }
}
