//! Application commands
//!
//! Only `start` doubles as a slash command; join and cancel take member
//! mentions and stay text-only.

use super::Command;
use twilight_model::application::command::{Command as ApplicationCommand, CommandType};
use twilight_model::id::Id;

/// Description shown for `/start` in the Discord client.
pub const START_DESCRIPTION: &str = "メンバーを募集します";

/// Commands to register globally at startup.
pub fn definitions() -> Vec<ApplicationCommand> {
    vec![start_command()]
}

// dm_permission is deprecated upstream but still part of the struct
#[allow(deprecated)]
fn start_command() -> ApplicationCommand {
    ApplicationCommand {
        application_id: None,
        contexts: None,
        default_member_permissions: None,
        dm_permission: None,
        description: START_DESCRIPTION.to_string(),
        description_localizations: None,
        guild_id: None,
        id: None,
        integration_types: None,
        kind: CommandType::ChatInput,
        name: Command::Start.name().to_string(),
        name_localizations: None,
        nsfw: None,
        options: Vec::new(),
        version: Id::new(1),
    }
}

/// Command bound to the slash command `name`, if it is one of ours.
pub fn from_name(name: &str) -> Option<Command> {
    definitions()
        .iter()
        .any(|definition| definition.name == name)
        .then(|| Command::from_name(name))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_definition() {
        let commands = definitions();
        assert_eq!(commands.len(), 1);

        let start = &commands[0];
        assert_eq!(start.name, "start");
        assert_eq!(start.description, START_DESCRIPTION);
        assert_eq!(start.kind, CommandType::ChatInput);
        assert!(start.options.is_empty());
        assert!(start.guild_id.is_none());
    }

    #[test]
    fn test_definition_payload() {
        let json = serde_json::to_value(definitions()).unwrap();
        assert_eq!(json[0]["name"], "start");
        assert_eq!(json[0]["type"], 1);
        assert_eq!(json[0]["description"], START_DESCRIPTION);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(from_name("start"), Some(Command::Start));
        // aliases and text-only commands are not slash commands
        assert_eq!(from_name("s"), None);
        assert_eq!(from_name("募集"), None);
        assert_eq!(from_name("join"), None);
        assert_eq!(from_name("cancel"), None);
    }
}
