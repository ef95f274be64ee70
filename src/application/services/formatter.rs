use chrono::{Local, LocalResult, TimeZone};

use crate::domain::markdown::escape_markdown_v2;
use crate::domain::models::{DeviceInfo, SimInfo, SmsFragment};

/// Render one fragment into the fixed MarkdownV2 template.
///
/// Every field value is escaped exactly once here; the template's own markup
/// (bold markers, code spans) stays literal. Display variants are omitted
/// when identical to their primary field, carrier and phone lines are omitted
/// entirely when the source could not supply them.
pub fn render_fragment(fragment: &SmsFragment, device: &DeviceInfo, sim: &SimInfo) -> String {
    let mut text = String::from("*New SMS Received*\n\n");
    text.push_str(&format!(
        "*Device*: {} {}\n",
        escape_markdown_v2(&device.manufacturer),
        escape_markdown_v2(&device.model)
    ));
    text.push_str(&format!(
        "*SIM Slot Index:* {}\n",
        escape_markdown_v2(&sim.slot_index.to_string())
    ));
    if !sim.phone_number.is_empty() {
        text.push_str(&format!(
            "*Phone:* {}\n",
            escape_markdown_v2(&sim.phone_number)
        ));
    }
    if !sim.carrier.is_empty() {
        text.push_str(&format!(
            "*Carrier:* {}\n",
            escape_markdown_v2(&sim.carrier)
        ));
    }
    text.push_str(&format!(
        "*OriginatingAddress:* `{}`\n",
        escape_markdown_v2(&fragment.originating_address)
    ));
    if fragment.display_originating_address != fragment.originating_address {
        text.push_str(&format!(
            "*DisplayOriginatingAddress:* `{}`\n",
            escape_markdown_v2(&fragment.display_originating_address)
        ));
    }
    text.push_str(&format!(
        "*MessageBody:* `{}`\n",
        escape_markdown_v2(&fragment.message_body)
    ));
    if fragment.display_message_body != fragment.message_body {
        text.push_str(&format!(
            "*DisplayMessageBody:* `{}`\n",
            escape_markdown_v2(&fragment.display_message_body)
        ));
    }
    text.push_str(&format!(
        "*Time:* {}",
        escape_markdown_v2(&local_timestamp(fragment.timestamp_millis))
    ));
    text
}

/// Epoch millis rendered in the host's local zone.
pub fn local_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        _ => millis.to_string(),
    }
}
