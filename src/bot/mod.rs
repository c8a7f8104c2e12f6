pub mod commands;
pub mod data;
pub mod events;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, data::BotData, Error>;

pub fn commands() -> Vec<poise::Command<data::BotData, Error>> {
    vec![
        commands::lists::guess_add(),
        commands::lists::guess_remove(),
        commands::lists::guess_list(),
        commands::lists::tag_add(),
        commands::lists::tag_remove(),
        commands::lists::tag(),
        commands::lists::shortcut_add(),
        commands::lists::shortcut_remove(),
        commands::lists::shortcut(),
        commands::modlog::mod_log(),
        commands::web::wolfram(),
        commands::web::youtube(),
        commands::remind::remind(),
        commands::remind::remind_other(),
        commands::help::help(),
    ]
}
