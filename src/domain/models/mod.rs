pub mod credentials;
pub mod sms;

pub use credentials::TelegramCredentials;
pub use sms::{DeviceInfo, ReceivedSms, SimInfo, SmsFragment};
