use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Entity type Telegram uses for `/commands`
pub const BOT_COMMAND: &str = "bot_command";

/// A `MessageEntity` as the Bot API serializes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntity {
    pub offset: usize,
    pub length: usize,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Computes the `bot_command` entity for a message text.
///
/// Text not starting with `/` has no entities. Otherwise the entity covers
/// the text up to the first space character, including any `@botname`
/// suffix; other whitespace does not end it. Offsets and lengths count
/// UTF-16 code units.
///
/// ```
/// use fakecore::command_entities;
///
/// assert_eq!(command_entities("/start")[0].length, 6);
/// assert_eq!(command_entities("/help arg1 arg2")[0].length, 5);
/// assert_eq!(command_entities("/cmd@bot arg")[0].length, 8);
/// assert!(command_entities("hello").is_empty());
/// ```
pub fn command_entities(text: &str) -> Vec<CommandEntity> {
    if !text.starts_with('/') {
        return Vec::new();
    }

    let token = text.split(' ').next().unwrap_or(text);
    vec![CommandEntity {
        offset: 0,
        length: token.encode_utf16().count(),
        kind: BOT_COMMAND.to_string(),
    }]
}

/// `command_entities` as a JSON array, ready to drop into a message
pub fn command_entities_value(text: &str) -> Value {
    Value::Array(
        command_entities(text)
            .into_iter()
            .map(|entity| json!({ "offset": entity.offset, "length": entity.length, "type": entity.kind }))
            .collect(),
    )
}
