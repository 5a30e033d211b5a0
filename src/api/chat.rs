use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

pub const DESTINATION_SUGGESTIONS: [&str; 4] = [
    "1. Bali, Indonesia - Perfect blend of beaches, culture, and relaxation. Known for its pristine beaches, ancient temples, and vibrant arts scene.",
    "2. Swiss Alps - Ideal for nature lovers and adventure seekers. Offering breathtaking mountain views, hiking trails, and luxury resorts.",
    "3. Kyoto, Japan - Rich in cultural heritage with beautiful temples, traditional gardens, and authentic Japanese experiences.",
    "4. Santorini, Greece - Stunning island views, white-washed buildings, and romantic sunsets. Perfect for couples and photography enthusiasts.",
];

const HOTEL_REPLY: &str =
    "I can help you find the perfect hotel! Please let me know your destination and dates.";
const FLIGHT_REPLY: &str =
    "I'd be happy to help you find flights. Where would you like to travel to?";
const DEFAULT_REPLY: &str = "I'm here to help plan your perfect trip. Would you like to search for hotels or get destination recommendations?";

/// Reply keyed on the most recent user message.
pub(super) fn canned_reply(messages: &[ChatMessage]) -> &'static str {
    let last_user = messages
        .iter()
        .rev()
        .find(|message| message.role == ChatRole::User)
        .map(|message| message.content.to_lowercase())
        .unwrap_or_default();

    if last_user.contains("hotel") {
        HOTEL_REPLY
    } else if last_user.contains("flight") {
        FLIGHT_REPLY
    } else {
        DEFAULT_REPLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_uses_latest_user_message() {
        let history = vec![
            ChatMessage::new(ChatRole::System, "be helpful"),
            ChatMessage::new(ChatRole::User, "Any Hotels near the beach?"),
            ChatMessage::new(ChatRole::Assistant, "sure"),
            ChatMessage::new(ChatRole::User, "Actually, book me a FLIGHT"),
        ];
        assert_eq!(canned_reply(&history), FLIGHT_REPLY);
        assert_eq!(canned_reply(&history[..3]), HOTEL_REPLY);
    }

    #[test]
    fn hotel_wins_over_flight() {
        let history = vec![ChatMessage::new(ChatRole::User, "flight and hotel please")];
        assert_eq!(canned_reply(&history), HOTEL_REPLY);
    }

    #[test]
    fn no_user_message_gets_default() {
        assert_eq!(canned_reply(&[]), DEFAULT_REPLY);
    }
}
