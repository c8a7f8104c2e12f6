use crate::bot::commands::lists::send_error;
use crate::bot::{Context, Error};
use poise::{CreateReply, serenity_prelude as serenity};
use serde::Deserialize;

/// Wolfram|Alpha's short-answers endpoint answers with 501 when it has
/// nothing to say about the query.
const WOLFRAM_ENDPOINT: &str = "https://api.wolframalpha.com/v1/result";
const YOUTUBE_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// Ask Wolfram|Alpha or solve problems.
#[poise::command(slash_command, prefix_command, aliases("wolfram-alpha", "wa", "math"))]
pub async fn wolfram(
    ctx: Context<'_>,
    #[description = "What would you like to know?"]
    #[rest]
    query: String,
) -> Result<(), Error> {
    let token = ctx.data().config.lock().await.config.tokens.wolfram.clone();
    let Some(token) = token else {
        return send_error(
            ctx,
            "Wolfram|Alpha is not configured. Set `tokens.wolfram` in config.json.",
        )
        .await;
    };

    ctx.defer().await?;

    let response = ctx
        .data()
        .http
        .get(WOLFRAM_ENDPOINT)
        .query(&[("appid", token.as_str()), ("i", query.as_str())])
        .send()
        .await;

    match response {
        Ok(result) if result.status() == reqwest::StatusCode::NOT_IMPLEMENTED => {
            ctx.say("There were no results.").await?;
        }
        Ok(result) if result.status().is_success() => {
            let answer = result.text().await?;
            let embed = serenity::CreateEmbed::default()
                .title(format!("__{query}__"))
                .description(answer)
                .colour(serenity::Colour::new(0x51C151));
            ctx.send(CreateReply::default().embed(embed)).await?;
        }
        Ok(result) => {
            log::error!("wolfram query failed with status {}", result.status());
            return send_error(ctx, "Something went wrong when searching.").await;
        }
        Err(err) => {
            log::error!("wolfram request failed: {err}");
            return send_error(ctx, "Something went wrong when searching.").await;
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

/// Search for videos on YouTube.
#[poise::command(slash_command, prefix_command, aliases("yt"))]
pub async fn youtube(
    ctx: Context<'_>,
    #[description = "What would you like to search for?"]
    #[rest]
    query: String,
) -> Result<(), Error> {
    let token = ctx.data().config.lock().await.config.tokens.youtube.clone();
    let Some(token) = token else {
        return send_error(
            ctx,
            "YouTube search is not configured. Set `tokens.youtube` in config.json.",
        )
        .await;
    };

    ctx.defer().await?;

    let response = ctx
        .data()
        .http
        .get(YOUTUBE_ENDPOINT)
        .query(&[
            ("part", "id"),
            ("type", "video"),
            ("maxResults", "1"),
            ("q", query.as_str()),
            ("key", token.as_str()),
        ])
        .send()
        .await;

    let result = match response {
        Ok(result) if result.status().is_success() => result,
        Ok(result) => {
            log::error!("youtube query failed with status {}", result.status());
            return send_error(ctx, "Something went wrong when searching for the video.").await;
        }
        Err(err) => {
            log::error!("youtube request failed: {err}");
            return send_error(ctx, "Something went wrong when searching for the video.").await;
        }
    };

    let search: SearchResponse = result.json().await?;
    let video_id = search
        .items
        .into_iter()
        .find_map(|item| item.id.video_id);

    match video_id {
        Some(id) => {
            ctx.say(format!("https://www.youtube.com/watch?v={id}"))
                .await?;
        }
        None => {
            ctx.say("There were no results.").await?;
        }
    }

    Ok(())
}
