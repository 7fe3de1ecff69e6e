//! Feed enrichment
//!
//! Translation, tagging, bot commentary and the daily overview. Every task is
//! a batch scheduler run whose batches call the model through the shared
//! [`CallGate`](crate::core::gate::CallGate).

mod enricher;
pub mod payload;
pub mod prompts;
mod tasks;
mod types;


pub use enricher::Enricher;
pub use payload::{extract_tagged, find_tagged, parse_array, parse_data, parse_list, truncate_chars};
pub use tasks::NO_POSTS;
pub use types::{
    BotContent, BotOutput, Enrichment, ItemText, Overview, TagAssignment, TagInfo, Translation,
};
