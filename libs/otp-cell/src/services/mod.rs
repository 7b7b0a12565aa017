pub mod store;
pub mod lifecycle;
pub mod notification;

pub use store::{InMemoryOtpStore, OtpStore, RedisOtpStore};
pub use lifecycle::OtpService;
pub use notification::{sender_from_config, CodeSender, LogOnlySender, SmsGatewaySender};
