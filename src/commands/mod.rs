//! Prefix command parsing
//!
//! Commands are matched case-insensitively against their name and aliases,
//! e.g. `!start`, `!S`, `!募集`. [`slash`] holds the application command
//! form of `start`.

pub mod slash;

/// Text commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open a new recruitment with the author as first member
    Start,
    /// Add the mentioned members (or the author) to the open recruitment
    Join,
    /// Remove the mentioned members (or the author) from the open recruitment
    Cancel,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Start, Command::Join, Command::Cancel];

    /// Canonical name, also used as the metrics label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Join => "join",
            Self::Cancel => "cancel",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Start => &["募集", "s", "スタート", "開始", "じゃんたま"],
            Self::Join => &["参加", "can", "c", "の", "ノ"],
            Self::Cancel => &["取り消し", "d", "drop"],
        }
    }

    /// Join and cancel read the channel's roster and only make sense in a guild.
    pub fn guild_only(&self) -> bool {
        !matches!(self, Self::Start)
    }

    /// Look up a command by name or alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|command| {
            command.name() == name || command.aliases().iter().any(|alias| alias.to_lowercase() == name)
        })
    }
}

/// Parse `content` as a prefixed command.
///
/// The prefix must open the message and the command word must follow it
/// directly; anything after the first whitespace (typically mentions) is
/// left to the caller.
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    if prefix.is_empty() {
        return None;
    }
    let rest = content.strip_prefix(prefix)?;
    let word = rest.split_whitespace().next()?;
    if !rest.starts_with(word) {
        return None;
    }
    Command::from_name(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse("!start", "!"), Some(Command::Start));
        assert_eq!(parse("!join <@1> <@2>", "!"), Some(Command::Join));
        assert_eq!(parse("!cancel", "!"), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse("!募集", "!"), Some(Command::Start));
        assert_eq!(parse("!じゃんたま", "!"), Some(Command::Start));
        assert_eq!(parse("!ノ", "!"), Some(Command::Join));
        assert_eq!(parse("!c", "!"), Some(Command::Join));
        assert_eq!(parse("!drop <@5>", "!"), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse("!START", "!"), Some(Command::Start));
        assert_eq!(parse("!Can", "!"), Some(Command::Join));
        assert_eq!(parse("!D", "!"), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert_eq!(parse("start", "!"), None);
        assert_eq!(parse("!", "!"), None);
        assert_eq!(parse("! start", "!"), None);
        assert_eq!(parse("!unknown", "!"), None);
        assert_eq!(parse("!starting", "!"), None);
        assert_eq!(parse("!start", ""), None);
    }

    #[test]
    fn test_prefix_must_open_the_message() {
        assert_eq!(parse(" !start", "!"), None);
        assert_eq!(parse("\n!start", "!"), None);
        assert_eq!(parse("hi !start", "!"), None);
        assert_eq!(parse("!start ", "!"), Some(Command::Start));
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(parse("g.start", "g."), Some(Command::Start));
        assert_eq!(parse("!start", "g."), None);
    }

    #[test]
    fn test_aliases_do_not_collide() {
        let mut names: Vec<String> = Command::ALL
            .iter()
            .flat_map(|c| std::iter::once(c.name()).chain(c.aliases().iter().copied()))
            .map(str::to_lowercase)
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_guild_only() {
        assert!(!Command::Start.guild_only());
        assert!(Command::Join.guild_only());
        assert!(Command::Cancel.guild_only());
    }
}
