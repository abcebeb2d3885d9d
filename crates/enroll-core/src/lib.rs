// ABOUTME: Core library for enroll, holding the configuration model shared by store and server.
// ABOUTME: Defines the ordered course map, its pair-list codec, transfer types and validation.

pub mod config;
pub mod course;
pub mod transfer;
pub mod validate;

pub use config::{
    Bark, Cookies, DEFAULT_WEB_HOST, DEFAULT_WEB_PORT, EnrollConfig, LoginAccount, SmtpEmail,
    Telegram, Time, Toggle, WaitCourse, WebAuth, WebConfig, Webhook,
};
pub use course::{CourseMap, PairList, to_course_map, to_pair_list};
pub use transfer::TransferConfig;
pub use validate::{TIME_FORMAT, ValidationError};
