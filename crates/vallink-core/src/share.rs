use crate::domain::phone::phone_digits;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Fixed reply sent back to the sender once the proposal is accepted.
pub fn accepted_message(sender_name: &str) -> String {
    let sender = sender_name.trim();
    let greeting = if sender.is_empty() {
        "Hey!".to_string()
    } else {
        format!("Hey {sender}!")
    };
    format!(
        "{greeting} 💕 I just said YES to your Valentine proposal on ValLink! I'm so happy! Let's celebrate together! 🎉❤️ - Your Valentine"
    )
}

pub fn build_share_link(phone_number: &str, sender_name: &str) -> String {
    let digits = phone_digits(phone_number);
    let message = accepted_message(sender_name);
    let text = urlencoding::encode(&message);
    format!("{WHATSAPP_BASE_URL}{digits}?text={text}")
}

#[cfg(test)]
mod tests {
    use super::{accepted_message, build_share_link};

    #[test]
    fn share_link_strips_number_and_encodes_message() {
        let link = build_share_link("+1 (234) 567-8901", "Sam");
        assert!(link.starts_with("https://wa.me/12345678901?text="));
        let text = link.split_once("?text=").unwrap().1;
        assert!(text.starts_with("Hey%20Sam%21%20"));
        assert!(!text.contains(' '));
        let decoded = urlencoding::decode(text).unwrap();
        assert_eq!(decoded, accepted_message("Sam"));
    }

    #[test]
    fn accepted_message_mentions_sender() {
        assert!(accepted_message(" Sam ").starts_with("Hey Sam! "));
        assert!(accepted_message("").starts_with("Hey! "));
    }

    #[test]
    fn share_link_escapes_reserved_characters_in_names() {
        let link = build_share_link("1234567890", "A&B");
        assert!(link.contains("Hey%20A%26B%21"));
    }
}
