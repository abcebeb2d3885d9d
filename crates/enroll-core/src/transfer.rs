// ABOUTME: TransferConfig, the browser-facing shadow of EnrollConfig.
// ABOUTME: Identical shape except `course`, which travels as an ordered pair list.

use serde::{Deserialize, Serialize};

use crate::config::{
    Bark, Cookies, EnrollConfig, LoginAccount, SmtpEmail, Telegram, Time, WaitCourse, WebConfig,
    Webhook,
};
use crate::course::{PairList, to_course_map, to_pair_list};

/// Configuration as exchanged with the web editor. Lives for one request.
///
/// Every top-level field is required on the wire: a save always replaces the
/// whole web-editable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    pub cas_login: LoginAccount,
    pub newjw_login: LoginAccount,
    pub cookies: Cookies,
    pub time: Time,
    pub course: PairList,
    pub wait_course: WaitCourse,
    pub smtp_email: SmtpEmail,
    pub telegram: Telegram,
    pub bark: Bark,
    pub webhook: Webhook,
    pub web: WebConfig,
    pub start_time: String,
}

impl From<&EnrollConfig> for TransferConfig {
    fn from(cfg: &EnrollConfig) -> Self {
        Self {
            cas_login: cfg.cas_login.clone(),
            newjw_login: cfg.newjw_login.clone(),
            cookies: cfg.cookies.clone(),
            time: cfg.time.clone(),
            course: to_pair_list(&cfg.course),
            wait_course: cfg.wait_course.clone(),
            smtp_email: cfg.smtp_email.clone(),
            telegram: cfg.telegram.clone(),
            bark: cfg.bark.clone(),
            webhook: cfg.webhook.clone(),
            web: cfg.web.clone(),
            start_time: cfg.start_time.clone(),
        }
    }
}

impl TransferConfig {
    /// Overwrite every web-editable field of `cfg` with the submitted values.
    pub fn apply_to(self, cfg: &mut EnrollConfig) {
        cfg.cas_login = self.cas_login;
        cfg.newjw_login = self.newjw_login;
        cfg.cookies = self.cookies;
        cfg.time = self.time;
        cfg.course = to_course_map(self.course);
        cfg.wait_course = self.wait_course;
        cfg.smtp_email = self.smtp_email;
        cfg.telegram = self.telegram;
        cfg.bark = self.bark;
        cfg.webhook = self.webhook;
        cfg.web = self.web;
        cfg.start_time = self.start_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Toggle;

    fn sample() -> EnrollConfig {
        let mut cfg = EnrollConfig::default();
        cfg.cas_login.enabled = Toggle::On;
        cfg.cas_login.username = "student".into();
        cfg.course.set("COURSE2", "1");
        cfg.course.set("COURSE1", "0");
        cfg.web.port = 7001;
        cfg.start_time = "2026-02-01 08:00:00".into();
        cfg
    }

    #[test]
    fn course_is_serialized_as_pair_array() {
        let transfer = TransferConfig::from(&sample());
        let json = serde_json::to_value(&transfer).unwrap();

        assert_eq!(
            json["course"],
            serde_json::json!([["COURSE2", "1"], ["COURSE1", "0"]])
        );
        assert_eq!(json["web"]["port"], 7001);
        assert_eq!(json["cas_login"]["enabled"], "1");
    }

    #[test]
    fn exposes_all_top_level_fields() {
        let json = serde_json::to_value(TransferConfig::from(&sample())).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        for field in [
            "cas_login",
            "newjw_login",
            "cookies",
            "time",
            "course",
            "wait_course",
            "smtp_email",
            "telegram",
            "bark",
            "webhook",
            "web",
            "start_time",
        ] {
            assert!(keys.contains(&field), "missing {field}");
        }
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn apply_overwrites_every_field() {
        let original = sample();
        let mut target = EnrollConfig::default();
        target.course.set("STALE", "1");

        TransferConfig::from(&original).apply_to(&mut target);

        assert_eq!(target, original);
    }

    #[test]
    fn missing_top_level_field_fails_to_parse() {
        let mut json = serde_json::to_value(TransferConfig::from(&sample())).unwrap();
        json.as_object_mut().unwrap().remove("course");

        assert!(serde_json::from_value::<TransferConfig>(json).is_err());
    }
}
