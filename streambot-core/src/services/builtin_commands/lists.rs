use streambot_common::{Error, ListSelector};

use crate::services::command_service::CommandService;

pub(crate) async fn list_lists(svc: &CommandService) -> Result<Vec<String>, Error> {
    let names = svc.lists.list().await?;
    if names.is_empty() {
        return Ok(vec![]);
    }
    Ok(vec![format!("Lists: {}", names.join(", "))])
}

pub(crate) async fn get_list_item(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let mut words = remainder.split_whitespace();
    let name = words.next().unwrap_or_default();
    // format guarantees a valid selector word
    let selector = ListSelector::parse(words.next().unwrap_or_default())
        .ok_or_else(|| Error::Parse(format!("bad selector in '{}'", remainder)))?;
    match svc.lists.get_item(name, selector).await {
        Ok((item, index)) => Ok(vec![format!("{}. {}", index, item)]),
        Err(e) => Ok(vec![e.to_string()]),
    }
}

pub(crate) async fn get_list_size(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    match svc.lists.size(name).await {
        Ok(size) => Ok(vec![format!("{} size: {}", name, size)]),
        Err(e) => Ok(vec![e.to_string()]),
    }
}

pub(crate) async fn add_list_item(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let (name, item) = remainder
        .split_once(char::is_whitespace)
        .ok_or_else(|| Error::Parse(format!("bad list item in '{}'", remainder)))?;
    let item = item.trim();
    let index = svc.lists.get_all(name).await?.len() + 1;
    svc.lists.add(name, &[item.to_string()]).await?;
    Ok(vec![format!("{}. {}", index, item)])
}

pub(crate) async fn remove_list_item(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let mut words = remainder.split_whitespace();
    let name = words.next().unwrap_or_default();
    let index: i64 = words
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| Error::Parse(format!("bad index in '{}'", remainder)))?;
    match svc.lists.remove_at(name, index).await {
        Ok((item, index)) => Ok(vec![format!("Removed {}. {}", index, item)]),
        Err(e) => Ok(vec![e.to_string()]),
    }
}

pub(crate) async fn remove_list(
    svc: &CommandService,
    remainder: &str,
) -> Result<Vec<String>, Error> {
    let name = remainder.trim();
    svc.lists.remove(name).await?;
    Ok(vec![format!("Removed list {}", name)])
}
