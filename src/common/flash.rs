use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use url::form_urlencoded;
use utoipa::ToSchema;

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "info" => Some(FlashLevel::Info),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

/// One-shot message carried across a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("level", self.level.as_str())
            .append_pair("message", &self.message)
            .finish()
    }

    fn decode(raw: &str) -> Option<Self> {
        let mut level = None;
        let mut message = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "level" => level = FlashLevel::parse(&value),
                "message" => message = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            level: level?,
            message: message?,
        })
    }
}

pub fn push(cookies: &Cookies, level: FlashLevel, message: &str) {
    let flash = FlashMessage {
        level,
        message: message.to_string(),
    };
    let mut cookie = Cookie::new(FLASH_COOKIE, flash.encode());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
}

pub fn success(cookies: &Cookies, message: &str) {
    push(cookies, FlashLevel::Success, message);
}

pub fn info(cookies: &Cookies, message: &str) {
    push(cookies, FlashLevel::Info, message);
}

pub fn error(cookies: &Cookies, message: &str) {
    push(cookies, FlashLevel::Error, message);
}

/// Reads the pending flash message, if any, and clears it.
pub fn take(cookies: &Cookies) -> Option<FlashMessage> {
    let raw = cookies.get(FLASH_COOKIE)?.value().to_string();
    let mut expired = Cookie::new(FLASH_COOKIE, "");
    expired.set_path("/");
    cookies.remove(expired);
    FlashMessage::decode(&raw)
}
