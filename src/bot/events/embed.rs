use poise::serenity_prelude as serenity;

/// Event category, which only decides the embed colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    User,
    Message,
    Channel,
    Voice,
}

impl EmbedKind {
    pub fn colour(self) -> serenity::Colour {
        match self {
            EmbedKind::User => serenity::Colour::new(0xEACB00),
            EmbedKind::Message => serenity::Colour::new(0xCB0F0F),
            EmbedKind::Channel => serenity::Colour::new(0x67A4E2),
            EmbedKind::Voice => serenity::Colour::new(0x8E72E2),
        }
    }
}

/// The one embed shape every event logger posts: bolded description, an
/// optional author line, the subject's ID in the footer, stamped now.
pub struct LogEmbed {
    pub kind: EmbedKind,
    pub description: String,
    pub author: Option<(String, String)>,
    pub subject_id: u64,
}

impl LogEmbed {
    pub fn build(self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::default()
            .description(format!("**{}**", self.description))
            .colour(self.kind.colour())
            .footer(serenity::CreateEmbedFooter::new(format!(
                "ID: {}",
                self.subject_id
            )))
            .timestamp(serenity::Timestamp::now());

        if let Some((name, icon_url)) = self.author {
            embed = embed.author(serenity::CreateEmbedAuthor::new(name).icon_url(icon_url));
        }

        embed
    }
}

pub async fn send(
    ctx: &serenity::Context,
    channel: serenity::ChannelId,
    embed: LogEmbed,
) -> Result<(), crate::bot::Error> {
    channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::default().embed(embed.build()),
        )
        .await?;
    Ok(())
}
