//! Prompt templates

/// Payload tag of translation replies
pub const TRANSLATE_TAG: &str = "Translate";
/// Payload tag of tag generation replies
pub const TAGS_INFO_TAG: &str = "TagsInfo";
/// Payload tag of tag assignment replies
pub const TAGS_DATA_TAG: &str = "TagsData";
/// Payload tag of bot replies
pub const BOT_TAG: &str = "AIBOT";

pub fn translation(items_json: &str) -> String {
    format!(
        r#"You are a professional translator. Translate posts that are not written in Chinese into natural, fluent Chinese. Keep technical keywords in English.

The input is a JSON array; every entry has a tw_id and a content.
Only return entries that needed translation. Entries already in Chinese must not appear in the output.
Links, figures and other details must be preserved in full.

Reply with exactly this format and nothing else:
<{tag}>{{"data": [{{"tw_id": "id of the post", "translated_content": "full translated text"}}]}}</{tag}>

When nothing needs translating, reply:
<{tag}>{{"data": []}}</{tag}>

Posts:
{items_json}"#,
        tag = TRANSLATE_TAG,
    )
}

pub fn tags_generation(snippets_json: &str) -> String {
    format!(
        r#"You are a content classification expert. From the post snippets below (the first 30 characters of each post), infer 5 to 10 category tags covering the main topics.

Reply with exactly this format and nothing else:
<{tag}>{{"tags_info": [{{"tag_id": "unique_id", "tag_name": "tag name"}}]}}</{tag}>

Always include the catch-all tag {{"tag_id": "other", "tag_name": "其他"}}.

Snippets:
{snippets_json}"#,
        tag = TAGS_INFO_TAG,
    )
}

pub fn tags_assignment(items_json: &str, tags_info_json: &str) -> String {
    format!(
        r#"You assign tags to posts.

Every post below has a tw_id and the first 50 characters of its content. Assign each post one or more tag ids from the tag list. Use "other" when no tag fits. Every post must appear in the output.

Reply with exactly this format and nothing else:
<{tag}>{{"data": [{{"tw_id": "id of the post", "tags": ["tag_id1", "tag_id2"]}}]}}</{tag}>

Posts:
{items_json}

Tags:
{tags_info_json}"#,
        tag = TAGS_DATA_TAG,
    )
}

pub fn bot(bot_prompt: &str, items_json: &str) -> String {
    format!(
        r#"You are a bot that strictly follows its rules. Your purpose and style are defined entirely by this description:
{bot_prompt}

Read the description carefully, especially what it applies to. Only write for posts that genuinely match it.

The input is a JSON array of posts, each with a tw_id and a content.
- Post does not match: skip it and output nothing for it.
- Post matches: write a Markdown passage in your style (plain text, no code fences).

Reply with exactly this format and nothing else:
<{tag}>{{"data": [{{"tw_id": "id of the post", "md": "generated Markdown"}}]}}</{tag}>

When nothing matches, reply:
<{tag}>{{"data": []}}</{tag}>

Posts:
{items_json}"#,
        tag = BOT_TAG,
    )
}

pub fn overview(day: &str, items_json: &str) -> String {
    format!(
        r#"You are a cheerful assistant helping readers skim the posts of {day}.

Write a concise Markdown overview grouped by topic rather than summarizing post by post.
- Organize content by topic.
- Summarize the key information of each topic briefly.
- After key entries add source links in the form <tweet-link tw-id='xxx'>short title</tweet-link>; several may follow each other.
- If there is very little content for the day, say so.
- Output plain Markdown only, with no preface, explanation or code fences.

Posts:
{items_json}"#
    )
}
