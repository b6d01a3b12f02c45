use streambot_common::Error;

use crate::services::command_service::CommandService;

fn count_line(name: &str, value: i64) -> String {
    format!("{}: {}", name, value)
}

pub(crate) async fn list_counts(svc: &CommandService) -> Result<Vec<String>, Error> {
    let names = svc.counts.list().await?;
    if names.is_empty() {
        return Ok(vec![]);
    }
    Ok(vec![format!("Counts: {}", names.join(", "))])
}

pub(crate) async fn get_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    match svc.counts.get(name).await? {
        Some(value) => Ok(vec![count_line(name, value)]),
        None => Ok(vec![]),
    }
}

pub(crate) async fn set_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let mut words = remainder.split_whitespace();
    let name = words.next().unwrap_or_default();
    let value: i64 = words
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| Error::Parse(format!("bad count value in '{}'", remainder)))?;
    let value = svc.counts.set(name, value).await?;
    Ok(vec![count_line(name, value)])
}

pub(crate) async fn copy_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let mut words = remainder.split_whitespace();
    let from = words.next().unwrap_or_default();
    let to = words.next().unwrap_or_default();
    match svc.counts.copy(from, to).await {
        Ok(value) => Ok(vec![count_line(to, value)]),
        Err(_) => Ok(vec![format!("{} doesn't exist.", from)]),
    }
}

pub(crate) async fn reset_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let mut lines = Vec::new();
    for name in remainder.split_whitespace() {
        let value = svc.counts.reset(name).await?;
        lines.push(count_line(name, value));
    }
    Ok(lines)
}

pub(crate) async fn remove_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    svc.counts.remove(name).await?;
    Ok(vec![format!("{} removed", name)])
}

pub(crate) async fn add_count(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    let value = svc.counts.add(name).await?;
    Ok(vec![count_line(name, value)])
}

pub(crate) async fn subtract_count(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    let value = svc.counts.subtract(name).await?;
    Ok(vec![count_line(name, value)])
}
