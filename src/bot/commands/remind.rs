use crate::bot::commands::lists::send_error;
use crate::bot::{Context, Error};
use crate::utils::time::parse_duration;
use chrono::Local;

/// Set a reminder for yourself.
#[poise::command(slash_command, prefix_command, aliases("reminder"))]
pub async fn remind(
    ctx: Context<'_>,
    #[description = "How long from now, like 10m or 2h30m"] duration: String,
    #[description = "What should I remind you about?"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let remindee = format!("<@{}>", ctx.author().id);
    schedule(ctx, remindee, &duration, text).await
}

/// Set a reminder for someone else.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "remind-other",
    aliases("reminder-other")
)]
pub async fn remind_other(
    ctx: Context<'_>,
    #[description = "Who do you want to remind?"] remindee: String,
    #[description = "How long from now, like 10m or 2h30m"] duration: String,
    #[description = "What should I remind them about?"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    schedule(ctx, remindee, &duration, text).await
}

/// Reminders live in-process only; a restart forgets them, matching the
/// lightweight persistence story of the rest of the bot.
async fn schedule(
    ctx: Context<'_>,
    remindee: String,
    duration: &str,
    text: String,
) -> Result<(), Error> {
    let delay = match parse_duration(duration) {
        Ok(delay) => delay,
        Err(reason) => return send_error(ctx, &reason).await,
    };

    let due = Local::now()
        + chrono::Duration::from_std(delay).map_err(|err| anyhow::anyhow!("bad delay: {err}"))?;
    ctx.say(format!(
        "Okay, I'll remind {remindee} at {}.",
        due.format("%Y-%m-%d %H:%M:%S")
    ))
    .await?;

    let http = ctx.serenity_context().http.clone();
    let channel = ctx.channel_id();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(err) = channel
            .say(&http, format!("{remindee} ⏰ Reminder: {text}"))
            .await
        {
            log::error!("failed to deliver reminder in {channel}: {err}");
        }
    });

    Ok(())
}
