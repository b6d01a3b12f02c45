//! Live variable substitution for outbound chat text.
//!
//! Applied once, left to right, over non-overlapping `{...}` spans found in a
//! single pass; substituted text is never re-scanned, so expansion cannot
//! recurse.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use streambot_common::traits::{CountsRepository, ListsRepository};
use streambot_common::ListSelector;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("token regex"));

/// Expands `{token}` placeholders. Resolution order per token, first match
/// wins: the invoking user's name, a count value, a list item, or the token
/// left verbatim.
pub async fn substitute_variables(
    message: &str,
    user: Option<&str>,
    counts: &dyn CountsRepository,
    lists: &dyn ListsRepository,
) -> String {
    let mut out = String::with_capacity(message.len());
    let mut last = 0;
    for caps in TOKEN_RE.captures_iter(message) {
        let span = caps.get(0).expect("whole match");
        let token = caps.get(1).expect("inner group").as_str().trim();
        out.push_str(&message[last..span.start()]);
        match resolve_token(token, user, counts, lists).await {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(span.as_str()),
        }
        last = span.end();
    }
    out.push_str(&message[last..]);
    out
}

async fn resolve_token(
    token: &str,
    user: Option<&str>,
    counts: &dyn CountsRepository,
    lists: &dyn ListsRepository,
) -> Option<String> {
    // {user} -> display name of whoever invoked the command
    if token == "user" {
        if let Some(name) = user {
            return Some(name.to_string());
        }
    }

    // {count_name} -> current count value
    if let Ok(Some(value)) = counts.get(token).await {
        return Some(value.to_string());
    }

    // {list_name next} / {list_name random} / {list_name 2} -> list item
    let parts: Vec<&str> = token.split_whitespace().collect();
    if parts.len() == 2 {
        if let Some(selector) = ListSelector::parse(parts[1]) {
            let known = lists.list().await.ok()?;
            if !known.iter().any(|n| n == parts[0]) {
                debug!("list not found in variable: {}", parts[0]);
                return None;
            }
            match lists.get_item(parts[0], selector).await {
                Ok((item, _)) => return Some(item),
                Err(e) => debug!("list variable '{}' failed: {}", token, e),
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryCountsRepository, InMemoryListsRepository};
    use streambot_common::traits::{CountsRepository as _, ListsRepository as _};

    async fn fixtures() -> (InMemoryCountsRepository, InMemoryListsRepository) {
        let counts = InMemoryCountsRepository::new();
        counts.set("deaths", 5).await.unwrap();
        let lists = InMemoryListsRepository::new();
        lists
            .add("quotes", &["first".into(), "second".into()])
            .await
            .unwrap();
        (counts, lists)
    }

    #[tokio::test]
    async fn user_token_uses_display_name() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("{user} says hi", Some("kitten"), &counts, &lists).await;
        assert_eq!(out, "kitten says hi");
    }

    #[tokio::test]
    async fn user_token_without_context_is_verbatim() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("{user} says hi", None, &counts, &lists).await;
        assert_eq!(out, "{user} says hi");
    }

    #[tokio::test]
    async fn count_token_renders_decimal() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("deaths so far: {deaths}", None, &counts, &lists).await;
        assert_eq!(out, "deaths so far: 5");
    }

    #[tokio::test]
    async fn list_next_advances_once_per_occurrence() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("quote: {quotes next}", None, &counts, &lists).await;
        assert_eq!(out, "quote: first");
        let out = substitute_variables("quote: {quotes next}", None, &counts, &lists).await;
        assert_eq!(out, "quote: second");
    }

    #[tokio::test]
    async fn list_index_token() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("{quotes 2}", None, &counts, &lists).await;
        assert_eq!(out, "second");
    }

    #[tokio::test]
    async fn unknown_token_left_verbatim() {
        let (counts, lists) = fixtures().await;
        let out = substitute_variables("keep {mystery} intact", None, &counts, &lists).await;
        assert_eq!(out, "keep {mystery} intact");
    }

    #[tokio::test]
    async fn substituted_text_is_not_rescanned() {
        let (counts, lists) = fixtures().await;
        lists
            .add("tricky", &["{deaths}".into()])
            .await
            .unwrap();
        let out = substitute_variables("{tricky 1}", None, &counts, &lists).await;
        assert_eq!(out, "{deaths}");
    }
}
