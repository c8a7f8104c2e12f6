mod bot;
mod lists;
mod models;
mod utils;

use std::env;
use std::sync::Arc;

use anyhow::anyhow;
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;

use crate::bot::data::BotData;
use crate::utils::config::ConfigManager;
use crate::utils::provider::SettingProvider;

#[tokio::main]
async fn main() -> Result<(), bot::Error> {
    if let Err(e) = utils::logger::BotLogger::init(Some("bot.log")) {
        eprintln!("Logger initialization failed: {}", e);
    }

    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")
        .map_err(|_| anyhow!("Expected the DISCORD_TOKEN environment variable, but it's unset!"))?;

    let config_manager = ConfigManager::new("config.json")
        .map_err(|e| anyhow!("Configuration manager initialization failed: {}", e))?;
    let command_prefix = config_manager.config.command_prefix.clone();
    let shared_config = Arc::new(Mutex::new(config_manager));

    let provider = SettingProvider::open("settings.db")
        .await
        .map_err(|e| anyhow!("Settings store initialization failed: {}", e))?;

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MODERATION
        | serenity::GatewayIntents::GUILD_VOICE_STATES
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let setup_config = Arc::clone(&shared_config);
    let setup_provider = provider.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: crate::bot::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(command_prefix),
                ..Default::default()
            },
            on_error: |error| {
                Box::pin(async move {
                    log::error!("Command execution error: {}", error);

                    let error_msg = format!("An error occurred: {}", error);

                    if let poise::FrameworkError::Command { ctx, .. } = error {
                        if let Err(why) = ctx.say(error_msg).await {
                            log::error!("Failed to send the error message: {}", why);
                        }
                    }
                })
            },
            event_handler: |ctx, event, _framework, data| {
                Box::pin(crate::bot::events::handle(ctx, event, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            let config = Arc::clone(&setup_config);
            let provider = setup_provider.clone();
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                println!("{} is online!", ready.user.name);
                Ok(BotData {
                    config,
                    provider,
                    http: reqwest::Client::new(),
                })
            })
        })
        .build();

    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow!("Failed to build the Discord client: {}", e))?;

    client
        .start()
        .await
        .map_err(|e| anyhow!("Bot startup failed: {}", e))?;

    Ok(())
}
