//! Builtin command handlers. Each handler returns the chat lines it wants
//! sent; the dispatcher pushes them through variable substitution and the
//! chat sink. No handler writes to the transport directly.

pub mod alerts;
pub mod core;
pub mod counts;
pub mod introspection;
pub mod lists;
pub mod timers;

use std::collections::HashMap;

use streambot_common::{Badge, Command, CommandAction, CommandGroup, Error};

use crate::services::command_service::CommandService;

pub(crate) async fn handle_builtin_command(
    svc: &CommandService,
    action: &CommandAction,
    registry: &HashMap<String, Command>,
    remainder: &str,
    user: &str,
    badges: &[Badge],
) -> Result<Vec<String>, Error> {
    use CommandAction::*;
    match action {
        Echo => Ok(core::echo(remainder)),
        Help => Ok(introspection::show_commands(registry, CommandGroup::Core, "", badges)),
        Random => Ok(core::random(remainder)),
        Spongebob => Ok(core::spongebob(remainder)),
        Taco => core::taco(svc, user, remainder).await,

        ListCounts => counts::list_counts(svc).await,
        GetCount => counts::get_count(svc, remainder).await,
        SetCount => counts::set_count(svc, remainder).await,
        CopyCount => counts::copy_count(svc, remainder).await,
        ResetCount => counts::reset_count(svc, remainder).await,
        RemoveCount => counts::remove_count(svc, remainder).await,
        AddCount => counts::add_count(svc, remainder).await,
        SubtractCount => counts::subtract_count(svc, remainder).await,

        ListLists => lists::list_lists(svc).await,
        GetListItem => lists::get_list_item(svc, remainder).await,
        GetListSize => lists::get_list_size(svc, remainder).await,
        AddListItem => lists::add_list_item(svc, remainder).await,
        RemoveListItem => lists::remove_list_item(svc, remainder).await,
        RemoveList => lists::remove_list(svc, remainder).await,

        Alert => alerts::alert(svc, user, badges, remainder).await,
        Tag => alerts::tag(svc, user, badges, remainder).await,
        Ban => alerts::ban(svc, remainder).await,
        Unban => alerts::unban(svc, remainder).await,

        Reminder => timers::reminder(svc, remainder).await,

        ShowCommands { group } => {
            Ok(introspection::show_commands(registry, *group, remainder, badges))
        }

        // alias redirection is handled inside the dispatch loop itself
        Alias { .. } => Ok(vec![]),
    }
}
