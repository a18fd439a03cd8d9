use crate::domain::registration::models::email::UserEmail;
use crate::domain::welcome_email::models::message::EmailMessage;

/// RFC 2822 message as the Gmail API expects it in the `raw` field, before
/// encoding. Header values come from types that already refuse line breaks.
pub fn build_raw_message(recipient: &UserEmail, message: &EmailMessage) -> String {
    format!(
        "To: {}\r\nSubject: {}\r\nContent-Type: text/html; charset=utf-8\r\n\r\n{}",
        recipient.as_ref(),
        encode_header_value(message.subject_as_ref().as_ref()),
        message.html_as_ref().as_ref()
    )
}

/// base64url without padding.
pub fn encode_raw_message(raw: &str) -> String {
    base64::encode_config(raw.as_bytes(), base64::URL_SAFE_NO_PAD)
}

/// RFC 2047 encoded word for anything outside printable ASCII.
fn encode_header_value(value: &str) -> String {
    if value.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        value.to_string()
    } else {
        format!("=?utf-8?B?{}?=", base64::encode(value.as_bytes()))
    }
}
