use chrono::{Datelike, Duration, Timelike, Utc};

use streambot_common::{Error, Timer};

use crate::services::command_service::CommandService;

/// `!reminder [alert_or_tag] minutes message`. Stores a one-shot timer whose
/// command re-enters the dispatcher when it fires. Repeating timers are
/// managed through the timer service API, not chat.
pub(crate) async fn reminder(svc: &CommandService, remainder: &str) -> Result<Vec<String>, Error> {
    let words: Vec<&str> = remainder.split_whitespace().collect();
    if words.len() < 2 {
        return Err(Error::Parse("reminder needs minutes and a message".into()));
    }
    let (alert_or_tag, minutes_word, message_words) =
        if words[0].chars().all(|c| c.is_ascii_digit()) {
            (None, words[0], &words[1..])
        } else {
            (Some(words[0]), words[1], &words[2..])
        };
    let minutes: i64 = minutes_word
        .parse()
        .map_err(|_| Error::Parse(format!("bad minute count '{}'", minutes_word)))?;
    let message = message_words.join(" ");

    let command = match alert_or_tag {
        Some(name) => {
            if svc.alerts.tag_exists(name).await? {
                format!("!tag {} Reminder: {}", name, message)
            } else {
                format!("!alert {} Reminder: {}", name, message)
            }
        }
        None => format!("!echo Reminder: {}", message),
    };

    let next_time = Utc::now().with_timezone(&svc.config.tz()) + Duration::minutes(minutes);
    let cron = format!(
        "{} {} {} {} *",
        next_time.minute(),
        next_time.hour(),
        next_time.day(),
        next_time.month()
    );
    svc.timers
        .add(Timer::new(&svc.config.bot_name, &command, &cron, false))
        .await?;

    Ok(vec![format!(
        "Setup reminder \"{}\" in {} minutes",
        message, minutes
    )])
}
