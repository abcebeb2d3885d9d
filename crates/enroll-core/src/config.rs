// ABOUTME: The persisted configuration of the course-registration agent.
// ABOUTME: Every section defaults field-by-field so a partial file still loads.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::course::CourseMap;

/// Listener host used when no configuration can be loaded.
pub const DEFAULT_WEB_HOST: &str = "127.0.0.1";

/// Listener port used when no configuration can be loaded.
pub const DEFAULT_WEB_PORT: u16 = 6688;

/// On/off switch, stored as `"1"` / `"0"`.
///
/// Only `"1"` is on. Anything else loads as off; values other than `"0"` and
/// `""` are kept verbatim so one stray flag never stops the file from loading
/// and `validate()` can still point at it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Toggle {
    On,
    #[default]
    Off,
    Unrecognized(String),
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }

    /// The stored form of the switch.
    pub fn as_str(&self) -> &str {
        match self {
            Toggle::On => "1",
            Toggle::Off => "0",
            Toggle::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for Toggle {
    fn from(raw: &str) -> Self {
        match raw {
            "1" => Toggle::On,
            "0" | "" => Toggle::Off,
            other => Toggle::Unrecognized(other.to_string()),
        }
    }
}

impl Serialize for Toggle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ToggleVisitor)
    }
}

struct ToggleVisitor;

impl<'de> Visitor<'de> for ToggleVisitor {
    type Value = Toggle;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a \"1\" or \"0\" switch")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Toggle, E> {
        Ok(Toggle::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Toggle, E> {
        Ok(Toggle::from(v.to_string().as_str()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Toggle, E> {
        Ok(Toggle::from(v.to_string().as_str()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Toggle, E> {
        Ok(Toggle::Unrecognized(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Toggle, E> {
        Ok(Toggle::Off)
    }
}

/// Username/password login against one of the school's portals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginAccount {
    pub enabled: Toggle,
    pub username: String,
    pub password: String,
}

/// Reuse of an existing portal session instead of logging in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cookies {
    pub enabled: Toggle,
    #[serde(rename = "JSESSIONID")]
    pub jsessionid: String,
    pub route: String,
}

/// The registration window, as `YYYY-MM-DD HH:MM:SS` local times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Time {
    pub select_start: String,
    pub select_end: String,
}

/// Polling for seats in full courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitCourse {
    pub enabled: Toggle,
    /// Seconds between polls.
    pub interval: u64,
}

impl Default for WaitCourse {
    fn default() -> Self {
        Self {
            enabled: Toggle::Off,
            interval: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpEmail {
    pub enabled: Toggle,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub to: String,
}

impl Default for SmtpEmail {
    fn default() -> Self {
        Self {
            enabled: Toggle::Off,
            host: String::new(),
            port: 465,
            username: String::new(),
            password: String::new(),
            to: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Telegram {
    pub enabled: Toggle,
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bark {
    pub enabled: Toggle,
    /// Push URL including the device key.
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub enabled: Toggle,
    pub url: String,
}

/// HTTP Basic credentials guarding the web editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebAuth {
    pub enabled: Toggle,
    pub username: String,
    pub password: String,
}

impl WebAuth {
    /// Whether requests must authenticate. A half-filled credential counts as
    /// disabled so the operator cannot lock themselves out.
    pub fn is_enabled(&self) -> bool {
        self.enabled.is_on() && !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Where the web editor listens, and who may use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub auth: WebAuth,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_WEB_HOST.to_string(),
            port: DEFAULT_WEB_PORT,
            auth: WebAuth::default(),
        }
    }
}

/// The full persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollConfig {
    pub cas_login: LoginAccount,
    pub newjw_login: LoginAccount,
    pub cookies: Cookies,
    pub time: Time,
    /// Course code to the agent's per-course setting, tried in this order.
    pub course: CourseMap,
    pub wait_course: WaitCourse,
    pub smtp_email: SmtpEmail,
    pub telegram: Telegram,
    pub bark: Bark,
    pub webhook: Webhook,
    pub web: WebConfig,
    /// When the agent should start running, same format as `time`; empty starts immediately.
    pub start_time: String,
}
