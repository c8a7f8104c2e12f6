use crate::bot::{Context, Error};
use crate::lists::{self, Entry, ListBehavior, ListDocument, ListError, ListShape};
use crate::utils::provider::Scope;
use poise::{CreateReply, serenity_prelude as serenity};
use std::time::Duration;

const GUESS: &str = "guess";
const TAG: &str = "tag";
const SHORTCUT: &str = "shortcut";

const GUESS_BEHAVIOR: ListBehavior = ListBehavior {
    require_options: false,
    multiple_options: false,
    url_only: false,
};
const TAG_BEHAVIOR: ListBehavior = ListBehavior {
    require_options: true,
    multiple_options: true,
    url_only: true,
};
const SHORTCUT_BEHAVIOR: ListBehavior = ListBehavior {
    require_options: true,
    multiple_options: false,
    url_only: false,
};

/// Shared pipeline for every mutating list command: load the document, run
/// the compute step, and only on success persist in the background, schedule
/// the invoking message for deletion and reply. Compute failures reach the
/// user as an error embed and leave the stored list untouched.
async fn run_mutation<F>(
    ctx: Context<'_>,
    list_name: &str,
    shape: ListShape,
    compute: F,
) -> Result<(), Error>
where
    F: FnOnce(&mut ListDocument) -> Result<String, ListError>,
{
    let provider = &ctx.data().provider;
    let mut doc = lists::store::get_list(provider, Scope::Global, list_name, shape).await?;

    match compute(&mut doc) {
        Err(err) => send_error(ctx, &err.to_string()).await,
        Ok(reply) => {
            lists::store::spawn_persist(
                provider.clone(),
                Scope::Global,
                list_name.to_string(),
                &doc,
            );
            schedule_invocation_cleanup(ctx);
            ctx.say(reply).await?;
            Ok(())
        }
    }
}

pub async fn send_error(ctx: Context<'_>, message: &str) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::default()
        .colour(serenity::Colour::RED)
        .description(message.to_string());
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Delete the invoking text message a couple of seconds after a successful
/// mutation, as a cleanup courtesy. Slash invocations have no message to
/// delete; failures are logged and otherwise ignored.
fn schedule_invocation_cleanup(ctx: Context<'_>) {
    let poise::Context::Prefix(prefix) = ctx else {
        return;
    };
    let http = ctx.serenity_context().http.clone();
    let msg = prefix.msg.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        if let Err(err) = msg.delete(&http).await {
            log::warn!("could not delete invoking message {}: {err}", msg.id);
        }
    });
}

/// Add a quote to the guess list.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "guess-add",
    aliases("add-guess")
)]
pub async fn guess_add(
    ctx: Context<'_>,
    #[description = "What would you like to add?"] item: String,
) -> Result<(), Error> {
    run_mutation(ctx, GUESS, ListShape::Array, move |doc| {
        lists::add::apply(GUESS, GUESS_BEHAVIOR, doc, &item, None)
    })
    .await
}

/// Remove a quote from the guess list.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "guess-remove",
    aliases("remove-guess")
)]
pub async fn guess_remove(
    ctx: Context<'_>,
    #[description = "What would you like to remove?"] item: String,
) -> Result<(), Error> {
    // Unquoted apostrophes split the argument; catch the common case before
    // it reaches the list.
    if item == "i'll" {
        return send_error(
            ctx,
            "You're trying to remove the entry `i'll`. Please wrap the whole entry in quotes, like `remove-guess \"i'll die\"`.",
        )
        .await;
    }

    let item = match item.strip_prefix("ill ") {
        Some(rest) => format!("i'll {rest}"),
        None => item,
    };

    run_mutation(ctx, GUESS, ListShape::Array, move |doc| {
        lists::remove::apply(GUESS, GUESS_BEHAVIOR, doc, &item, None)
    })
    .await
}

/// Show everything in the guess list.
#[poise::command(slash_command, prefix_command, rename = "guess-list")]
pub async fn guess_list(ctx: Context<'_>) -> Result<(), Error> {
    let doc = lists::store::get_list(
        &ctx.data().provider,
        Scope::Global,
        GUESS,
        ListShape::Array,
    )
    .await?;

    let ListDocument::Array(items) = doc else {
        return send_error(ctx, &ListError::WrongShape { list: GUESS.to_string() }.to_string())
            .await;
    };

    if items.is_empty() {
        ctx.say(format!("\"{GUESS}\" is empty.")).await?;
        return Ok(());
    }

    let (prefix, bullet) = {
        let guard = ctx.data().config.lock().await;
        (
            guard.config.embed_prefix.clone(),
            guard.config.embed_bullet.clone(),
        )
    };
    let body = items
        .iter()
        .map(|item| format!("{bullet} {item}"))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::default()
        .title(format!("{prefix} __{GUESS}__"))
        .description(body)
        .colour(serenity::Colour::BLURPLE);
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Add a URL under one or more tags.
#[poise::command(slash_command, prefix_command, rename = "tag-add", aliases("add-tag"))]
pub async fn tag_add(
    ctx: Context<'_>,
    #[description = "What would you like to add?"] item: String,
    #[description = "What tags would you like?"]
    #[rest]
    tags: String,
) -> Result<(), Error> {
    run_mutation(ctx, TAG, ListShape::Mapping, move |doc| {
        lists::add::apply(TAG, TAG_BEHAVIOR, doc, &item, Some(&tags))
    })
    .await
}

/// Remove a URL from one or more tags.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "tag-remove",
    aliases("remove-tag")
)]
pub async fn tag_remove(
    ctx: Context<'_>,
    #[description = "What would you like to remove?"] item: String,
    #[description = "From which tags?"]
    #[rest]
    tags: String,
) -> Result<(), Error> {
    run_mutation(ctx, TAG, ListShape::Mapping, move |doc| {
        lists::remove::apply(TAG, TAG_BEHAVIOR, doc, &item, Some(&tags))
    })
    .await
}

/// Show what's filed under a tag.
#[poise::command(slash_command, prefix_command)]
pub async fn tag(
    ctx: Context<'_>,
    #[description = "Which tag?"] name: String,
) -> Result<(), Error> {
    let doc =
        lists::store::get_list(&ctx.data().provider, Scope::Global, TAG, ListShape::Mapping)
            .await?;

    let key = name.to_lowercase();
    match doc.entry(&key) {
        Some(Entry::Many(values)) => {
            ctx.say(values.join("\n")).await?;
            Ok(())
        }
        Some(Entry::Scalar(value)) => {
            ctx.say(value.clone()).await?;
            Ok(())
        }
        None => {
            send_error(
                ctx,
                &ListError::UnknownKey {
                    key,
                    list: TAG.to_string(),
                }
                .to_string(),
            )
            .await
        }
    }
}

/// Save a text shortcut under a key.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "shortcut-add",
    aliases("add-shortcut")
)]
pub async fn shortcut_add(
    ctx: Context<'_>,
    #[description = "What would you like to add?"] item: String,
    #[description = "With what value?"] value: String,
) -> Result<(), Error> {
    run_mutation(ctx, SHORTCUT, ListShape::Mapping, move |doc| {
        lists::add::apply(SHORTCUT, SHORTCUT_BEHAVIOR, doc, &item, Some(&value))
    })
    .await
}

/// Remove a shortcut, or one value filed under it.
#[poise::command(
    slash_command,
    prefix_command,
    rename = "shortcut-remove",
    aliases("remove-shortcut")
)]
pub async fn shortcut_remove(
    ctx: Context<'_>,
    #[description = "What would you like to remove?"] item: String,
    #[description = "A specific value to remove"] value: Option<String>,
) -> Result<(), Error> {
    run_mutation(ctx, SHORTCUT, ListShape::Mapping, move |doc| {
        lists::remove::apply(SHORTCUT, SHORTCUT_BEHAVIOR, doc, &item, value.as_deref())
    })
    .await
}

/// Look up a text shortcut.
#[poise::command(slash_command, prefix_command)]
pub async fn shortcut(
    ctx: Context<'_>,
    #[description = "Which shortcut?"] name: String,
) -> Result<(), Error> {
    let doc = lists::store::get_list(
        &ctx.data().provider,
        Scope::Global,
        SHORTCUT,
        ListShape::Mapping,
    )
    .await?;

    let key = name.to_lowercase();
    match doc.entry(&key) {
        Some(Entry::Scalar(value)) => {
            ctx.say(value.clone()).await?;
            Ok(())
        }
        Some(Entry::Many(values)) => {
            ctx.say(values.join("\n")).await?;
            Ok(())
        }
        None => {
            send_error(
                ctx,
                &ListError::UnknownKey {
                    key,
                    list: SHORTCUT.to_string(),
                }
                .to_string(),
            )
            .await
        }
    }
}
