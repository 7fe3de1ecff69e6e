//! Runs all enrichment tasks over a feed

use super::types::{Enrichment, ItemText, TagAssignment, TagInfo, Translation};
use crate::config::{AiConfig, BotConfig, Config};
use crate::core::batch::BatchOptions;
use crate::core::gate::CallGate;
use crate::feed::FeedItem;
use crate::utils::logging::TaskLog;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Enriches feed items through one shared [`CallGate`]
#[derive(Debug, Clone)]
pub struct Enricher {
    gate: Arc<CallGate>,
    ai: AiConfig,
    options: BatchOptions,
    batch_size: usize,
    task_log: Option<TaskLog>,
}

impl Enricher {
    /// Create an enricher with default batching
    pub fn new(gate: Arc<CallGate>, ai: AiConfig) -> Self {
        Self {
            gate,
            ai,
            options: BatchOptions::default(),
            batch_size: crate::config::default_batch_size(),
            task_log: None,
        }
    }

    /// Create an enricher using the batching and output settings of `config`
    pub fn from_config(config: &Config, gate: Arc<CallGate>) -> Self {
        Self::new(gate, config.ai.clone())
            .with_batch_options(config.batch_options())
            .with_batch_size(config.feed.batch_size)
            .with_task_log(TaskLog::in_dir(&config.output.dir))
    }

    pub fn with_batch_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Record failed tasks in `log`
    pub fn with_task_log(mut self, log: TaskLog) -> Self {
        self.task_log = Some(log);
        self
    }

    pub fn gate(&self) -> &Arc<CallGate> {
        &self.gate
    }

    pub fn ai(&self) -> &AiConfig {
        &self.ai
    }

    pub fn batch_options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn task_log(&self) -> Option<&TaskLog> {
        self.task_log.as_ref()
    }

    /// Translate, tag and run bots over `items`
    ///
    /// The three tasks run concurrently and share the gate's limits. A
    /// translated item keeps its original text in `origin_text`. The returned
    /// items are sorted by publication date, newest first.
    pub async fn enrich(&self, mut items: Vec<FeedItem>, bots: &[BotConfig]) -> Enrichment {
        let texts: Vec<ItemText> = items.iter().map(ItemText::from).collect();

        let (translations, (tags_info, assignments), bot_content) = tokio::join!(
            self.translate(texts.clone()),
            self.tag_items(&texts),
            self.generate_bot_content(&texts, bots),
        );

        let translated = apply_translations(&mut items, translations);
        let tagged = apply_tags(&mut items, assignments);
        sort_newest_first(&mut items);

        info!(
            items = items.len(),
            translated,
            tagged,
            tags = tags_info.len(),
            bot_items = bot_content.len(),
            "Enrichment finished"
        );

        Enrichment {
            items,
            tags_info,
            bot_content,
        }
    }

    /// Generate a tag set, then assign it
    async fn tag_items(&self, texts: &[ItemText]) -> (Vec<TagInfo>, Vec<TagAssignment>) {
        let contents: Vec<String> = texts.iter().map(|t| t.content.clone()).collect();
        let tags_info = self.generate_tags_info(&contents).await;
        if tags_info.is_empty() {
            return (tags_info, Vec::new());
        }

        let assignments = self.assign_tags(texts.to_vec(), &tags_info).await;
        (tags_info, assignments)
    }
}

/// Position of the first item with each id
fn index_by_id(items: &[FeedItem]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index.entry(item.tw_id.clone()).or_insert(i);
    }
    index
}

fn apply_translations(items: &mut [FeedItem], translations: Vec<Translation>) -> usize {
    let index = index_by_id(items);
    let mut applied = 0;

    for translation in translations {
        let Some(&i) = index.get(&translation.tw_id) else {
            continue;
        };
        let item = &mut items[i];
        if item.is_translated {
            continue;
        }
        item.origin_text = std::mem::replace(&mut item.content, translation.translated_content);
        item.is_translated = true;
        applied += 1;
    }

    applied
}

fn apply_tags(items: &mut [FeedItem], assignments: Vec<TagAssignment>) -> usize {
    let index = index_by_id(items);
    let mut applied = 0;

    for assignment in assignments {
        if let Some(&i) = index.get(&assignment.tw_id) {
            items[i].tags = assignment.tags;
            applied += 1;
        }
    }

    applied
}

/// Stable sort by `date_published`, newest first; unparseable dates go last
fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by_cached_key(|item| {
        Reverse(chrono::DateTime::parse_from_rfc3339(&item.date_published).ok())
    });
}
