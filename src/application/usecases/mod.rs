pub mod ingest_sms;
pub mod send_test_message;
pub mod update_credentials;
