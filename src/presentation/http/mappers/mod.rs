use crate::{
    domain::models::{DeviceInfo, ReceivedSms, SimInfo, SmsFragment},
    presentation::http::requests::{IngestSmsRequestDto, SmsFragmentDto},
};

pub fn map_received_sms(dto: &IngestSmsRequestDto) -> ReceivedSms {
    ReceivedSms {
        device: DeviceInfo {
            manufacturer: dto.device_manufacturer.clone().unwrap_or_default(),
            model: dto.device_model.clone().unwrap_or_default(),
        },
        sim: SimInfo {
            slot_index: dto.sim_slot_index.unwrap_or(-1),
            carrier: dto.carrier.clone().unwrap_or_default(),
            phone_number: dto.phone_number.clone().unwrap_or_default(),
        },
        fragments: dto.fragments.iter().map(map_fragment).collect(),
    }
}

fn map_fragment(dto: &SmsFragmentDto) -> SmsFragment {
    let originating_address = dto.originating_address.clone().unwrap_or_default();
    let message_body = dto.message_body.clone().unwrap_or_default();
    SmsFragment {
        // An absent display variant means "same as the primary", which the
        // formatter then omits.
        display_originating_address: dto
            .display_originating_address
            .clone()
            .unwrap_or_else(|| originating_address.clone()),
        display_message_body: dto
            .display_message_body
            .clone()
            .unwrap_or_else(|| message_body.clone()),
        originating_address,
        message_body,
        timestamp_millis: dto.timestamp_millis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_to_empty_and_unknown_slot() {
        let dto = IngestSmsRequestDto {
            fragments: vec![SmsFragmentDto {
                originating_address: Some("+15551234567".to_string()),
                display_originating_address: None,
                message_body: Some("hi".to_string()),
                display_message_body: None,
                timestamp_millis: 0,
            }],
            device_manufacturer: None,
            device_model: None,
            sim_slot_index: None,
            carrier: None,
            phone_number: None,
        };

        let sms = map_received_sms(&dto);
        assert_eq!(sms.sim.slot_index, -1);
        assert_eq!(sms.sim.carrier, "");
        // Display variants fall back to their primary so the formatter omits
        // the duplicate lines.
        assert_eq!(
            sms.fragments[0].display_originating_address,
            sms.fragments[0].originating_address
        );
        assert_eq!(
            sms.fragments[0].display_message_body,
            sms.fragments[0].message_body
        );
    }
}
