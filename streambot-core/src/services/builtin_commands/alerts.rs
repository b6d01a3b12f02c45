use tracing::debug;

use streambot_common::{Badge, Error, badge_check};

use crate::services::command_service::CommandService;

/// The list holding banned chatter names; alert triggering consults it.
const BANNED_LIST: &str = "banned_users";

fn split_name_and_text(remainder: &str) -> (&str, Option<&str>) {
    match remainder.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim())),
        None => (remainder.trim(), None),
    }
}

/// Spam gate shared by alert and tag triggering: banned users are dropped
/// silently; sub-vip users get the in-process cooldown.
async fn spam_gate(
    svc: &CommandService,
    user: &str,
    badges: &[Badge],
) -> Result<Option<Vec<String>>, Error> {
    let banned = svc.lists.get_all(BANNED_LIST).await?;
    if banned.iter().any(|b| b == user) {
        return Ok(Some(vec![]));
    }
    if !badge_check(badges, Badge::Vip) && svc.spamming(user) {
        return Ok(Some(vec![format!(
            "No spamming {}. Wait another {} seconds.",
            user, svc.config.spam_cooldown_seconds
        )]));
    }
    Ok(None)
}

pub(crate) async fn alert(
    svc: &CommandService,
    user: &str,
    badges: &[Badge],
    remainder: &str,
) -> Result<Vec<String>, Error> {
    if let Some(lines) = spam_gate(svc, user, badges).await? {
        return Ok(lines);
    }
    let (name, display_text) = split_name_and_text(remainder);
    match svc.alerts.trigger(name, display_text).await {
        Ok(display) => Ok(vec![format!("/me {}", display)]),
        Err(e) => {
            // bad user input must not spam chat; keep operator visibility
            debug!("alert '{}' failed: {}", name, e);
            Ok(vec![])
        }
    }
}

pub(crate) async fn tag(
    svc: &CommandService,
    user: &str,
    badges: &[Badge],
    remainder: &str,
) -> Result<Vec<String>, Error> {
    if let Some(lines) = spam_gate(svc, user, badges).await? {
        return Ok(lines);
    }
    let (name, display_text) = split_name_and_text(remainder);
    match svc.alerts.trigger_tag(name, display_text).await {
        Ok(display) => Ok(vec![format!("/me {}", display)]),
        Err(e) => {
            debug!("tag alert '{}' failed: {}", name, e);
            Ok(vec![])
        }
    }
}

pub(crate) async fn ban(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let user = remainder.trim();
    svc.lists.add(BANNED_LIST, &[user.to_string()]).await?;
    Ok(vec![format!("Banned {}", user)])
}

pub(crate) async fn unban(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let user = remainder.trim();
    let remaining: Vec<String> = svc
        .lists
        .get_all(BANNED_LIST)
        .await?
        .into_iter()
        .filter(|banned| banned != user)
        .collect();
    svc.lists.set_all(BANNED_LIST, remaining).await?;
    Ok(vec![format!("Unbanned {}", user)])
}
