use std::sync::LazyLock;

use regex::Regex;

static THINK_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").ok());

/// Remove `<think>…</think>` sections emitted by reasoning models and trim.
pub fn strip_reasoning(text: &str) -> String {
    match THINK_BLOCK.as_ref() {
        Some(re) => re.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}
