//! Running chapter summarization over a chat model.
//!
//! Chapters are summarized strictly in reading order: each request carries
//! the summaries of all previous chapters, so the model can resolve
//! references back into earlier events. This makes the stage a left-to-right
//! fold, not a parallel map.

mod ollama;

pub use ollama::{ChatMessage, DEFAULT_HOST, OllamaClient};

use tracing::{debug, info};

use crate::book::Chapter;
use crate::error::Result;

const SYSTEM_PROMPT: &str = "You are an AI used to summarize chapters of books. \
    You are given the contents of a book, one chapter at a time. Summarize each chapter, one by one. \
    If a chapter has no content (for example, if it's just a title page), you can skip it and simply reply 'skip'. \
    For each chapter, you will receive summaries of the previous chapters and the text of the current chapter. \
    Your goal is to summarize the current chapter in a way that is concise and informative. \
    - Do not include anything that is not part of the book, such as the table of contents. \
    - Do not make up content, stick to the actual text of the book. \
    - Do not add additional opinions or commentary, just summarize the content. \
    - Write in full sentences, DO NOT use bullet points or lists in your replies.";

const CHAPTER_INSTRUCTION: &str = "Summarize the above chapter. \
    Do not use bullet points or lists in your summary. Write in full sentences.";

/// Reply content meaning "omit this chapter from the summary output".
const SKIP_SENTINEL: &str = "skip";

/// Response length cap passed to the model.
const NUM_PREDICT: u32 = 512;

/// Abstraction over the chat service, so summarization logic is testable
/// without a live model.
pub trait ChatClient {
    fn chat(&self, model: &str, messages: &[ChatMessage], num_predict: u32) -> Result<String>;
}

impl ChatClient for OllamaClient {
    fn chat(&self, model: &str, messages: &[ChatMessage], num_predict: u32) -> Result<String> {
        OllamaClient::chat(self, model, messages, num_predict)
    }
}

/// Stateful running summarizer.
///
/// Feed it chapters in reading order via [`Summarizer::summarize_chapter`];
/// it maintains the conversation history of prior summaries itself.
pub struct Summarizer<C = OllamaClient> {
    client: C,
    model: String,
    history: Vec<ChatMessage>,
    seen: usize,
}

impl<C: ChatClient> Summarizer<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            history: vec![ChatMessage::system(SYSTEM_PROMPT)],
            seen: 0,
        }
    }

    /// Summarize the next chapter in reading order.
    ///
    /// Returns `Ok(None)` when the model judges the chapter contentless and
    /// replies with the skip sentinel; that chapter is simply omitted from
    /// the output and from the running history.
    pub fn summarize_chapter(&mut self, chapter: &Chapter) -> Result<Option<String>> {
        self.seen += 1;
        info!(title = %chapter.title, "summarizing chapter");

        let prompt = format!(
            "Chapter: {}\n{}\n\n{}",
            chapter.title, chapter.text, CHAPTER_INSTRUCTION
        );
        let mut messages = self.history.clone();
        messages.push(ChatMessage::user(prompt));

        let reply = self.client.chat(&self.model, &messages, NUM_PREDICT)?;
        let summary = strip_think_block(&reply).trim().to_string();

        if summary.eq_ignore_ascii_case(SKIP_SENTINEL) {
            debug!(title = %chapter.title, "model skipped chapter");
            return Ok(None);
        }

        self.history.push(ChatMessage::user(format!(
            "Summary of chapter {}:\n{}",
            self.seen, summary
        )));
        Ok(Some(summary))
    }
}

/// Remove a `<think>...</think>` block from a model reply. Reasoning models
/// emit these even when asked not to.
fn strip_think_block(content: &str) -> String {
    if let (Some(start), Some(end)) = (content.find("<think>"), content.find("</think>"))
        && start < end
    {
        let mut out = String::with_capacity(content.len());
        out.push_str(&content[..start]);
        out.push_str(&content[end + "</think>".len()..]);
        return out;
    }
    content.to_string()
}
