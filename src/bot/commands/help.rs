use crate::bot::{Context, Error};
use poise::ChoiceParameter;

#[derive(Clone, Copy, Debug, ChoiceParameter)]
pub enum HelpMode {
    #[name = "summary"]
    Summary,
    #[name = "detailed"]
    Detailed,
}

/// Display a list of available commands.
#[poise::command(slash_command, prefix_command, aliases("commands"))]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Display mode"] mode: Option<HelpMode>,
) -> Result<(), Error> {
    match mode.unwrap_or(HelpMode::Summary) {
        HelpMode::Summary => {
            ctx.say(
                "Command quick reference:\n\
\n\
/guess-add, /guess-remove, /guess-list — manage the guess quote list.\n\
/tag-add <url> <tags...>, /tag-remove, /tag <name> — file URLs under tags.\n\
/shortcut-add <key> <text>, /shortcut-remove, /shortcut <key> — text shortcuts.\n\
/mod-log <on|off> [channel] — guild event logging.\n\
/wolfram <query> — ask Wolfram|Alpha.\n\
/youtube <query> — search YouTube.\n\
/remind <duration> <text>, /remind-other <who> <duration> <text> — reminders.\n\
/help [summary|detailed] — this list, or the long version.",
            )
            .await?;
        }
        HelpMode::Detailed => {
            ctx.say(
                r#"
# Commands

## Lists
- `/guess-add "snippet of text"`: add an entry to the guess list. Duplicates are rejected.
- `/guess-remove "snippet of text"`: remove an entry. Wrap entries containing apostrophes in quotes.
- `/guess-list`: show the whole list.
- `/tag-add http://i.imgur.com/f75Pzvn.jpg kyuu lhu`: file a URL under each tag (tags are lowercased). The item must be a URL beginning with `http`.
- `/tag-remove <url> <tags...>`: take a URL out of the given tags.
- `/tag kyuu`: show everything filed under a tag.
- `/shortcut-add lenny "( ͡° ͜ʖ ͡°)"`: save a text shortcut. A key can only be set once.
- `/shortcut-remove lenny`: delete a shortcut.
- `/shortcut lenny`: look one up.

List commands invoked as text messages get the invoking message deleted a couple of seconds after a successful change.

## Server logging
- `/mod-log on #channel`: post ban, join, voice and deletion embeds to a channel.
- `/mod-log off`: stop posting.

## Web
- `/wolfram 2^11`: short answers from Wolfram|Alpha.
- `/youtube never gonna give you up`: first matching video.

## Reminders
- `/remind 2h30m stretch`: ping yourself later.
- `/remind-other @friend 1d movie night`: ping someone else. Reminders do not survive a restart.
                "#,
            )
            .await?;
        }
    }

    Ok(())
}
