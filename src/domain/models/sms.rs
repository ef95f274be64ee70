/// One piece of a possibly multi-part inbound SMS. Each fragment is forwarded
/// as its own independent message.
#[derive(Debug, Clone)]
pub struct SmsFragment {
    pub originating_address: String,
    pub display_originating_address: String,
    pub message_body: String,
    pub display_message_body: String,
    pub timestamp_millis: i64,
}

#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub manufacturer: String,
    pub model: String,
}

/// SIM metadata as supplied by the event source. Carrier and phone number are
/// empty when the source lacked permission to read them.
#[derive(Debug, Clone)]
pub struct SimInfo {
    pub slot_index: i32,
    pub carrier: String,
    pub phone_number: String,
}

/// The raw notification event handed in by the external event source.
#[derive(Debug, Clone)]
pub struct ReceivedSms {
    pub device: DeviceInfo,
    pub sim: SimInfo,
    pub fragments: Vec<SmsFragment>,
}
