//! The Bot API capability a bot under test talks to
//!
//! Every call goes through [`BotApi::invoke`] with the method name and a JSON
//! argument object. The named methods (`send_message`, `answer_callback_query`,
//! ...) are thin wrappers that only fix the method name.

pub mod error;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;

use serde_json::Value;
use std::sync::Arc;

/// Declares wrappers that forward to `invoke` under a fixed Bot API method name
macro_rules! api_methods {
    ($($name:ident => $method:literal),* $(,)?) => {
        $(
            #[doc = concat!("Calls `", $method, "`")]
            fn $name(&self, arguments: Value) -> ApiResult<ApiResponse> {
                self.invoke($method, arguments)
            }
        )*
    };
}

/// Anything that can carry a Bot API call
pub trait BotApi {
    /// Performs `method` with `arguments` (a JSON object, or `null` for none)
    fn invoke(&self, method: &str, arguments: Value) -> ApiResult<ApiResponse>;

    fn get_me(&self) -> ApiResult<ApiResponse> {
        self.invoke("getMe", Value::Null)
    }

    api_methods! {
        send_message => "sendMessage",
        forward_message => "forwardMessage",
        copy_message => "copyMessage",
        send_photo => "sendPhoto",
        send_document => "sendDocument",
        send_audio => "sendAudio",
        send_video => "sendVideo",
        send_voice => "sendVoice",
        send_sticker => "sendSticker",
        send_location => "sendLocation",
        send_chat_action => "sendChatAction",
        edit_message_text => "editMessageText",
        edit_message_reply_markup => "editMessageReplyMarkup",
        delete_message => "deleteMessage",
        pin_chat_message => "pinChatMessage",
        answer_callback_query => "answerCallbackQuery",
        get_chat => "getChat",
        get_file => "getFile",
        get_updates => "getUpdates",
        set_webhook => "setWebhook",
        delete_webhook => "deleteWebhook",
        set_my_commands => "setMyCommands",
    }
}

impl<T: BotApi + ?Sized> BotApi for Arc<T> {
    fn invoke(&self, method: &str, arguments: Value) -> ApiResult<ApiResponse> {
        (**self).invoke(method, arguments)
    }
}

impl<T: BotApi + ?Sized> BotApi for &T {
    fn invoke(&self, method: &str, arguments: Value) -> ApiResult<ApiResponse> {
        (**self).invoke(method, arguments)
    }
}
