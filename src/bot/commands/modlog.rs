use crate::bot::commands::lists::send_error;
use crate::bot::{Context, Error};
use crate::models::types::ModLogSettings;
use crate::utils::provider::Scope;
use poise::{ChoiceParameter, serenity_prelude as serenity};

#[derive(Clone, Copy, Debug, ChoiceParameter)]
pub enum ModLogToggle {
    #[name = "on"]
    On,
    #[name = "off"]
    Off,
}

/// Turn guild event logging on or off and pick the channel embeds go to.
#[poise::command(slash_command, prefix_command, rename = "mod-log")]
pub async fn mod_log(
    ctx: Context<'_>,
    #[description = "on or off"] state: ModLogToggle,
    #[description = "Channel for log embeds, required when turning on"]
    #[channel_types("Text")]
    channel: Option<serenity::ChannelId>,
) -> Result<(), Error> {
    let guild_id = match ctx.guild_id() {
        Some(id) => id.get(),
        None => {
            ctx.say("This command can only be used in a server.").await?;
            return Ok(());
        }
    };

    let provider = &ctx.data().provider;

    match state {
        ModLogToggle::On => {
            let Some(channel) = channel else {
                return send_error(ctx, "Please provide the text channel to log events to.").await;
            };

            let settings = ModLogSettings {
                enabled: true,
                channel_id: Some(channel.get()),
            };
            provider
                .set_as(Scope::Guild(guild_id), "mod_log", &settings)
                .await?;

            log::info!("mod log enabled for guild {guild_id} in channel {}", channel.get());
            ctx.say(format!("Event logging is on, posting to <#{channel}>."))
                .await?;
        }
        ModLogToggle::Off => {
            let mut settings: ModLogSettings = provider
                .get_as(Scope::Guild(guild_id), "mod_log")
                .await?
                .unwrap_or_default();
            settings.enabled = false;
            provider
                .set_as(Scope::Guild(guild_id), "mod_log", &settings)
                .await?;

            log::info!("mod log disabled for guild {guild_id}");
            ctx.say("Event logging is off.").await?;
        }
    }

    Ok(())
}
