//! Payload skeleton library
//!
//! Each fragment is the shape of one Bot API object with placeholder leaves.
//! Skeletons are built fresh on every call; callers own and may mutate them.
//!
//! `message.from`, `message.chat` and `callback_query.from` are spelled out as
//! nested maps rather than `"botFrom"` / `"chat"` placeholders, so a partial
//! override such as `{"chat": {"id": 1}}` keeps the remaining chat fields.

use serde_json::{json, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Named skeleton fragments, addressable by their camelCase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Fragment {
    Update,
    User,
    From,
    BotFrom,
    Chat,
    Message,
    CallbackQuery,
    Photo,
    Document,
}

impl Fragment {
    /// Fresh skeleton for this fragment
    pub fn skeleton(self) -> Value {
        match self {
            Self::Update => json!({ "update_id": "id" }),
            Self::User => json!({
                "id": "id",
                "is_bot": false,
                "first_name": "firstName",
                "username": "userName",
                "can_join_groups": true,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
            }),
            Self::From => json!({
                "id": "id",
                "is_bot": false,
                "first_name": "firstName",
                "last_name": "lastName",
                "username": "userName",
                "language_code": "languageCode",
            }),
            Self::BotFrom => json!({
                "id": "id",
                "is_bot": true,
                "first_name": "botName",
                "username": "botUserName",
            }),
            Self::Chat => json!({
                "id": "id",
                "first_name": "firstName",
                "last_name": "lastName",
                "username": "userName",
                "type": "private",
            }),
            Self::Message => json!({
                "message_id": "id:7",
                "from": Self::BotFrom.skeleton(),
                "chat": Self::Chat.skeleton(),
                "date": "unixTime",
                "text": "sentence",
                "entities": [],
            }),
            Self::CallbackQuery => json!({
                "id": "idString:16",
                "from": Self::From.skeleton(),
                "message": Self::Message.skeleton(),
                "chat_instance": "idString",
                "data": "word",
            }),
            Self::Photo => json!({
                "file_id": "fileId:36",
                "file_unique_id": "fileId:16",
                "width": "numberBetween:100:1000",
                "height": "numberBetween:100:1000",
                "file_size": "numberBetween:10000:5000000",
            }),
            Self::Document => json!({
                "file_id": "fileId:36",
                "file_unique_id": "fileId:16",
                "file_name": "fileName",
                "mime_type": "mimeType",
                "file_size": "numberBetween:10000:10000000",
            }),
        }
    }

    /// Key under which this fragment sits inside an update, for the ones that have one
    pub fn update_key(self) -> Option<&'static str> {
        match self {
            Self::Message => Some("message"),
            Self::CallbackQuery => Some("callback_query"),
            _ => None,
        }
    }
}
