pub mod embed;

use crate::bot::Error;
use crate::bot::data::BotData;
use crate::models::types::ModLogSettings;
use crate::utils::provider::Scope;
use self::embed::{EmbedKind, LogEmbed};
use poise::serenity_prelude as serenity;
use serenity::FullEvent;

/// Gateway events worth logging get turned into a fixed-shape embed in the
/// guild's configured mod-log channel. Everything else falls through.
pub async fn handle(
    ctx: &serenity::Context,
    event: &FullEvent,
    data: &BotData,
) -> Result<(), Error> {
    match event {
        FullEvent::GuildBanAddition {
            guild_id,
            banned_user,
        } => ban_added(ctx, data, *guild_id, banned_user).await,
        FullEvent::GuildMemberAddition { new_member } => member_joined(ctx, data, new_member).await,
        FullEvent::VoiceStateUpdate { old, new } => {
            voice_updated(ctx, data, old.as_ref(), new).await
        }
        FullEvent::MessageDelete {
            channel_id,
            deleted_message_id,
            guild_id,
        } => message_deleted(ctx, data, *channel_id, *deleted_message_id, *guild_id).await,
        FullEvent::ChannelCreate { channel } => channel_created(ctx, data, channel).await,
        _ => Ok(()),
    }
}

/// The guild's log channel, or None when logging is off or unconfigured.
async fn log_channel(
    data: &BotData,
    guild_id: serenity::GuildId,
) -> Result<Option<serenity::ChannelId>, Error> {
    let settings: Option<ModLogSettings> = data
        .provider
        .get_as(Scope::Guild(guild_id.get()), "mod_log")
        .await?;

    Ok(settings
        .filter(|settings| settings.enabled)
        .and_then(|settings| settings.channel_id)
        .map(serenity::ChannelId::new))
}

async fn ban_added(
    ctx: &serenity::Context,
    data: &BotData,
    guild_id: serenity::GuildId,
    user: &serenity::User,
) -> Result<(), Error> {
    let Some(channel) = log_channel(data, guild_id).await? else {
        return Ok(());
    };

    embed::send(
        ctx,
        channel,
        LogEmbed {
            kind: EmbedKind::User,
            description: format!("<@{}> was banned ⛔️", user.id),
            author: Some((user.tag(), user.face())),
            subject_id: user.id.get(),
        },
    )
    .await
}

async fn member_joined(
    ctx: &serenity::Context,
    data: &BotData,
    member: &serenity::Member,
) -> Result<(), Error> {
    let Some(channel) = log_channel(data, member.guild_id).await? else {
        return Ok(());
    };

    embed::send(
        ctx,
        channel,
        LogEmbed {
            kind: EmbedKind::User,
            description: format!("<@{}> joined the server", member.user.id),
            author: Some((member.user.tag(), member.user.face())),
            subject_id: member.user.id.get(),
        },
    )
    .await
}

async fn voice_updated(
    ctx: &serenity::Context,
    data: &BotData,
    old: Option<&serenity::VoiceState>,
    new: &serenity::VoiceState,
) -> Result<(), Error> {
    let Some(guild_id) = new.guild_id else {
        return Ok(());
    };
    let Some(channel) = log_channel(data, guild_id).await? else {
        return Ok(());
    };
    let Some(description) = voice_descriptor(old, new) else {
        return Ok(());
    };

    let author = new
        .member
        .as_ref()
        .map(|member| (member.user.tag(), member.user.face()));

    embed::send(
        ctx,
        channel,
        LogEmbed {
            kind: EmbedKind::Voice,
            description,
            author,
            subject_id: new.user_id.get(),
        },
    )
    .await
}

/// What changed between two voice states, or None when the user stayed in
/// the same channel (mute/deafen flips are not logged).
fn voice_descriptor(
    old: Option<&serenity::VoiceState>,
    new: &serenity::VoiceState,
) -> Option<String> {
    let before = old.and_then(|state| state.channel_id);
    let after = new.channel_id;
    let user = new.user_id;

    match (before, after) {
        (None, Some(joined)) => Some(format!("<@{user}> entered voice channel <#{joined}>")),
        (Some(left), None) => Some(format!("<@{user}> left voice channel <#{left}>")),
        (Some(from), Some(to)) if from != to => {
            Some(format!("<@{user}> moved from <#{from}> to <#{to}>"))
        }
        _ => None,
    }
}

async fn message_deleted(
    ctx: &serenity::Context,
    data: &BotData,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
    guild_id: Option<serenity::GuildId>,
) -> Result<(), Error> {
    let Some(guild_id) = guild_id else {
        return Ok(());
    };
    let Some(channel) = log_channel(data, guild_id).await? else {
        return Ok(());
    };
    // The log channel's own cleanup deletes would echo forever.
    if channel == channel_id {
        return Ok(());
    }

    embed::send(
        ctx,
        channel,
        LogEmbed {
            kind: EmbedKind::Message,
            description: format!("A message was deleted in <#{channel_id}>"),
            author: None,
            subject_id: message_id.get(),
        },
    )
    .await
}

async fn channel_created(
    ctx: &serenity::Context,
    data: &BotData,
    created: &serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(channel) = log_channel(data, created.guild_id).await? else {
        return Ok(());
    };

    embed::send(
        ctx,
        channel,
        LogEmbed {
            kind: EmbedKind::Channel,
            description: format!("Channel <#{}> was created", created.id),
            author: None,
            subject_id: created.id.get(),
        },
    )
    .await
}
