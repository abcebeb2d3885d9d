// ABOUTME: Business-rule validation for EnrollConfig before it is persisted.
// ABOUTME: Reports the first violated rule; a config that passes is safe for the agent to run with.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::{EnrollConfig, LoginAccount, Toggle};

/// Format of every time field in the configuration.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A configuration rule that the submitted values violate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be \"1\" or \"0\", got {value:?}")]
    InvalidToggle { field: &'static str, value: String },

    #[error("no usable login method: enable cas_login, newjw_login or cookies")]
    NoLoginMethod,

    #[error("{0} is enabled but its username or password is empty")]
    IncompleteLogin(&'static str),

    #[error("cookies are enabled but JSESSIONID is empty")]
    MissingSessionCookie,

    #[error("{field} must look like YYYY-MM-DD HH:MM:SS, got {value:?}")]
    InvalidTime { field: &'static str, value: String },

    #[error("time.select_start is later than time.select_end")]
    WindowReversed,

    #[error("course list contains an empty course code")]
    EmptyCourseCode,

    #[error("wait_course is enabled but interval is 0")]
    ZeroWaitInterval,

    #[error("{channel} is enabled but {field} is empty")]
    IncompleteChannel {
        channel: &'static str,
        field: &'static str,
    },

    #[error("web.host must not be empty")]
    EmptyWebHost,

    #[error("web.port must not be 0")]
    ZeroWebPort,
}

impl EnrollConfig {
    /// Check every business rule, returning the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_toggles()?;
        validate_login(&self.cas_login, "cas_login")?;
        validate_login(&self.newjw_login, "newjw_login")?;
        if self.cookies.enabled.is_on() && self.cookies.jsessionid.is_empty() {
            return Err(ValidationError::MissingSessionCookie);
        }
        if !(self.cas_login.enabled.is_on()
            || self.newjw_login.enabled.is_on()
            || self.cookies.enabled.is_on())
        {
            return Err(ValidationError::NoLoginMethod);
        }

        let start = parse_time("time.select_start", &self.time.select_start)?;
        let end = parse_time("time.select_end", &self.time.select_end)?;
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ValidationError::WindowReversed);
        }
        parse_time("start_time", &self.start_time)?;

        if self.course.keys().any(|code| code.trim().is_empty()) {
            return Err(ValidationError::EmptyCourseCode);
        }

        if self.wait_course.enabled.is_on() && self.wait_course.interval == 0 {
            return Err(ValidationError::ZeroWaitInterval);
        }

        self.validate_channels()?;

        if self.web.host.trim().is_empty() {
            return Err(ValidationError::EmptyWebHost);
        }
        if self.web.port == 0 {
            return Err(ValidationError::ZeroWebPort);
        }

        Ok(())
    }

    fn validate_toggles(&self) -> Result<(), ValidationError> {
        let toggles = [
            ("cas_login.enabled", &self.cas_login.enabled),
            ("newjw_login.enabled", &self.newjw_login.enabled),
            ("cookies.enabled", &self.cookies.enabled),
            ("wait_course.enabled", &self.wait_course.enabled),
            ("smtp_email.enabled", &self.smtp_email.enabled),
            ("telegram.enabled", &self.telegram.enabled),
            ("bark.enabled", &self.bark.enabled),
            ("webhook.enabled", &self.webhook.enabled),
            ("web.auth.enabled", &self.web.auth.enabled),
        ];
        for (field, toggle) in toggles {
            if let Toggle::Unrecognized(value) = toggle {
                return Err(ValidationError::InvalidToggle {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_channels(&self) -> Result<(), ValidationError> {
        let smtp = &self.smtp_email;
        if smtp.enabled.is_on() {
            require("smtp_email", "host", &smtp.host)?;
            require("smtp_email", "username", &smtp.username)?;
            require("smtp_email", "password", &smtp.password)?;
            require("smtp_email", "to", &smtp.to)?;
            if smtp.port == 0 {
                return Err(ValidationError::IncompleteChannel {
                    channel: "smtp_email",
                    field: "port",
                });
            }
        }
        if self.telegram.enabled.is_on() {
            require("telegram", "bot_token", &self.telegram.bot_token)?;
            require("telegram", "chat_id", &self.telegram.chat_id)?;
        }
        if self.bark.enabled.is_on() {
            require("bark", "url", &self.bark.url)?;
        }
        if self.webhook.enabled.is_on() {
            require("webhook", "url", &self.webhook.url)?;
        }
        Ok(())
    }
}

fn validate_login(account: &LoginAccount, name: &'static str) -> Result<(), ValidationError> {
    if account.enabled.is_on() && (account.username.is_empty() || account.password.is_empty()) {
        return Err(ValidationError::IncompleteLogin(name));
    }
    Ok(())
}

fn require(channel: &'static str, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::IncompleteChannel { channel, field });
    }
    Ok(())
}

/// Parse an optional time field; empty means "not set".
fn parse_time(field: &'static str, value: &str) -> Result<Option<NaiveDateTime>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}
