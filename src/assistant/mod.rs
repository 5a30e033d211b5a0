//! Scripted travel assistant conversation over the mock API.

use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::api::{ChatMessage, ChatRole, Hotel, HotelSearchParams, MockApi};
use crate::config::Config;

pub const WELCOME: &str = "Hi! I'm your personal travel assistant powered by AI. How can I help you plan your perfect trip today?";
pub const SYSTEM_PROMPT: &str = "You are a helpful travel assistant. Keep responses concise and focused on travel-related queries.";
pub const SUGGESTION_PREFERENCES: &str = "looking for a mix of culture, nature, and relaxation";

const HOTEL_SEARCH_REQUEST: &str = "I want to search for hotels";
const SUGGESTIONS_REQUEST: &str = "I need destination suggestions";
const FORM_PROMPT: &str = "Please fill in the details for your hotel search:";
const HOTEL_SEARCH_APOLOGY: &str = "I apologize, but I encountered an error while searching for hotels. Would you like to try again?";
const SUGGESTIONS_APOLOGY: &str = "I apologize, but I encountered an error while getting destination suggestions. Would you like to try again?";
const CHAT_APOLOGY: &str =
    "I apologize, but I encountered an error processing your request. How else can I help you?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Follow-up buttons attached to bot messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    FindHotels,
    SuggestDestinations,
    SearchHotels,
    GetSuggestions,
    NewSearch,
    ModifySearch,
    MoreSuggestions,
    RetryHotelSearch,
    RetrySuggestions,
}

impl OptionKind {
    pub fn label(self) -> &'static str {
        match self {
            OptionKind::FindHotels => "Find Hotels",
            OptionKind::SuggestDestinations => "Suggest Destinations",
            OptionKind::SearchHotels => "Search Hotels",
            OptionKind::GetSuggestions => "Get Suggestions",
            OptionKind::NewSearch => "New Search",
            OptionKind::ModifySearch => "Modify Search",
            OptionKind::MoreSuggestions => "More Suggestions",
            OptionKind::RetryHotelSearch | OptionKind::RetrySuggestions => "Try Again",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub options: Vec<OptionKind>,
    /// Blank hotel search form carried by the form prompt.
    pub form: Option<HotelSearchParams>,
}

impl Message {
    fn user(content: impl Into<String>) -> Self {
        Self {
            id: message_id("user"),
            sender: Sender::User,
            content: content.into(),
            options: Vec::new(),
            form: None,
        }
    }

    fn bot(prefix: &str, content: impl Into<String>, options: Vec<OptionKind>) -> Self {
        Self {
            id: message_id(prefix),
            sender: Sender::Bot,
            content: content.into(),
            options,
            form: None,
        }
    }
}

fn message_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Formats search results the way the assistant reports them.
pub fn hotel_results_text(hotels: &[Hotel]) -> String {
    let entries: Vec<String> = hotels
        .iter()
        .take(3)
        .enumerate()
        .map(|(index, hotel)| {
            format!(
                "{}. {}\n   • Location: {}\n   • Price: ${}/night\n",
                index + 1,
                hotel.name,
                hotel.location,
                hotel.price
            )
        })
        .collect();
    format!(
        "I found {} hotels matching your criteria. Here are the top options:\n\n{}",
        hotels.len(),
        entries.join("\n")
    )
}

/// One assistant conversation. Messages only ever get appended.
pub struct Assistant {
    api: MockApi,
    typing_delay: Duration,
    messages: Vec<Message>,
    pending_form: Option<HotelSearchParams>,
    typing: bool,
}

impl Assistant {
    pub fn new(api: MockApi, typing_delay: Duration) -> Self {
        let welcome = Message {
            id: "welcome".into(),
            sender: Sender::Bot,
            content: WELCOME.into(),
            options: vec![OptionKind::FindHotels, OptionKind::SuggestDestinations],
            form: None,
        };
        Self {
            api,
            typing_delay,
            messages: vec![welcome],
            pending_form: None,
            typing: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(MockApi::from_config(config), config.typing_delay())
    }

    /// Picks up new delay and failure settings; the transcript is kept.
    pub fn reconfigure(&mut self, config: &Config) {
        self.api = MockApi::from_config(config);
        self.typing_delay = config.typing_delay();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_form(&self) -> Option<&HotelSearchParams> {
        self.pending_form.as_ref()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Options on the most recent bot message that offers any.
    pub fn latest_options(&self) -> &[OptionKind] {
        self.messages
            .iter()
            .rev()
            .find(|message| message.sender == Sender::Bot && !message.options.is_empty())
            .map(|message| message.options.as_slice())
            .unwrap_or(&[])
    }

    /// Runs the action bound to an option button.
    pub async fn choose(&mut self, kind: OptionKind) {
        tracing::debug!(option = ?kind, "assistant option chosen");
        match kind {
            OptionKind::FindHotels
            | OptionKind::SearchHotels
            | OptionKind::NewSearch
            | OptionKind::ModifySearch
            | OptionKind::RetryHotelSearch => self.open_hotel_search().await,
            OptionKind::SuggestDestinations
            | OptionKind::GetSuggestions
            | OptionKind::MoreSuggestions
            | OptionKind::RetrySuggestions => self.suggest_destinations().await,
        }
    }

    /// Sends free text. Blank input is ignored.
    pub async fn send(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.messages.push(Message::user(text));
        self.typing = true;

        let mut history = vec![ChatMessage::new(ChatRole::System, SYSTEM_PROMPT)];
        history.extend(self.messages.iter().skip(1).map(|message| {
            let role = match message.sender {
                Sender::User => ChatRole::User,
                Sender::Bot => ChatRole::Assistant,
            };
            ChatMessage::new(role, message.content.clone())
        }));

        let options = vec![OptionKind::SearchHotels, OptionKind::GetSuggestions];
        let reply = match self.api.chat(&history).await {
            Ok(reply) => Message::bot("response", reply, options),
            Err(err) => {
                tracing::warn!(error = %err, "assistant chat failed");
                Message::bot("error", CHAT_APOLOGY, options)
            }
        };
        self.simulate_typing(vec![reply]).await;
    }

    pub async fn open_hotel_search(&mut self) {
        self.messages.push(Message::user(HOTEL_SEARCH_REQUEST));
        self.pending_form = Some(HotelSearchParams::default());
        let mut prompt = Message::bot("form", FORM_PROMPT, Vec::new());
        prompt.form = Some(HotelSearchParams::default());
        self.simulate_typing(vec![prompt]).await;
    }

    /// Submits the hotel search form. The pending form is cleared either way.
    pub async fn submit_hotel_search(&mut self, params: &HotelSearchParams) {
        self.typing = true;
        let reply = match self.api.search_hotels(params).await {
            Ok(hotels) => {
                tracing::info!(
                    location = %params.location,
                    found = hotels.len(),
                    "hotel search answered"
                );
                Message::bot(
                    "hotels-result",
                    hotel_results_text(&hotels),
                    vec![OptionKind::NewSearch, OptionKind::ModifySearch],
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant hotel search failed");
                Message::bot(
                    "error",
                    HOTEL_SEARCH_APOLOGY,
                    vec![OptionKind::RetryHotelSearch],
                )
            }
        };
        self.simulate_typing(vec![reply]).await;
        self.pending_form = None;
    }

    pub async fn suggest_destinations(&mut self) {
        self.messages.push(Message::user(SUGGESTIONS_REQUEST));
        self.typing = true;
        let reply = match self
            .api
            .destination_suggestions(SUGGESTION_PREFERENCES)
            .await
        {
            Ok(text) => Message::bot(
                "suggestions",
                text,
                vec![OptionKind::SearchHotels, OptionKind::MoreSuggestions],
            ),
            Err(err) => {
                tracing::warn!(error = %err, "assistant suggestions failed");
                Message::bot(
                    "error",
                    SUGGESTIONS_APOLOGY,
                    vec![OptionKind::RetrySuggestions],
                )
            }
        };
        self.simulate_typing(vec![reply]).await;
    }

    async fn simulate_typing(&mut self, replies: Vec<Message>) {
        self.typing = true;
        tokio::time::sleep(self.typing_delay).await;
        self.messages.extend(replies);
        self.typing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(fail: bool) -> Assistant {
        Assistant::new(MockApi::new(Duration::ZERO).failing(fail), Duration::ZERO)
    }

    fn last(assistant: &Assistant) -> &Message {
        assistant.messages().last().unwrap()
    }

    #[test]
    fn starts_with_welcome_and_two_options() {
        let assistant = assistant(false);
        assert_eq!(assistant.messages().len(), 1);
        assert_eq!(assistant.messages()[0].content, WELCOME);
        assert_eq!(
            assistant.latest_options(),
            &[OptionKind::FindHotels, OptionKind::SuggestDestinations]
        );
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut assistant = assistant(false);
        assistant.send("   ").await;
        assert_eq!(assistant.messages().len(), 1);
    }

    #[tokio::test]
    async fn chat_reply_matches_keyword() {
        let mut assistant = assistant(false);
        assistant.send("I need a hotel in Dubai").await;
        assert_eq!(assistant.messages().len(), 3);
        assert_eq!(assistant.messages()[1].sender, Sender::User);
        let reply = last(&assistant);
        let expected = "I can help you find the perfect hotel!";
        assert!(reply.content.starts_with(expected));
        assert!(reply.id.starts_with("response-"));
        assert_eq!(
            reply.options,
            vec![OptionKind::SearchHotels, OptionKind::GetSuggestions]
        );
        assert!(!assistant.is_typing());
    }

    #[tokio::test]
    async fn chat_failure_apologises_with_same_options() {
        let mut assistant = assistant(true);
        assistant.send("hello").await;
        let reply = last(&assistant);
        assert_eq!(reply.content, CHAT_APOLOGY);
        assert_eq!(
            reply.options,
            vec![OptionKind::SearchHotels, OptionKind::GetSuggestions]
        );
    }

    #[tokio::test]
    async fn hotel_search_flow() {
        let mut assistant = assistant(false);
        assistant.choose(OptionKind::FindHotels).await;
        assert_eq!(assistant.messages()[1].content, HOTEL_SEARCH_REQUEST);
        let prompt = last(&assistant);
        assert_eq!(prompt.content, FORM_PROMPT);
        assert_eq!(prompt.form.as_ref().map(|f| f.guests), Some(1));
        assert!(assistant.pending_form().is_some());

        let params = HotelSearchParams {
            location: "maldives".into(),
            ..HotelSearchParams::default()
        };
        assistant.submit_hotel_search(&params).await;
        assert!(assistant.pending_form().is_none());
        assert_eq!(
            last(&assistant).content,
            "I found 1 hotels matching your criteria. Here are the top options:\n\n\
             1. Grand Resort & Spa\n   • Location: Maldives\n   • Price: $450/night\n"
        );
        assert_eq!(
            assistant.latest_options(),
            &[OptionKind::NewSearch, OptionKind::ModifySearch]
        );
    }

    #[tokio::test]
    async fn failed_search_offers_try_again() {
        let mut assistant = assistant(true);
        assistant.open_hotel_search().await;
        let blank = HotelSearchParams::default();
        assistant.submit_hotel_search(&blank).await;
        let reply = last(&assistant);
        assert_eq!(reply.content, HOTEL_SEARCH_APOLOGY);
        assert_eq!(reply.options, vec![OptionKind::RetryHotelSearch]);
        assert_eq!(OptionKind::RetryHotelSearch.label(), "Try Again");
        assert!(assistant.pending_form().is_none());
    }

    #[tokio::test]
    async fn suggestions_and_their_failure() {
        let mut assistant = assistant(false);
        assistant.choose(OptionKind::SuggestDestinations).await;
        assert!(last(&assistant).content.contains("Kyoto, Japan"));
        assert_eq!(
            assistant.latest_options(),
            &[OptionKind::SearchHotels, OptionKind::MoreSuggestions]
        );

        let mut failing = self::assistant(true);
        failing.choose(OptionKind::MoreSuggestions).await;
        assert_eq!(last(&failing).content, SUGGESTIONS_APOLOGY);
        assert_eq!(failing.latest_options(), &[OptionKind::RetrySuggestions]);
    }

    #[test]
    fn results_list_is_capped_at_three() {
        let hotels: Vec<Hotel> = crate::api::hotel_catalog()
            .iter()
            .chain(crate::api::hotel_catalog())
            .cloned()
            .collect();
        let text = hotel_results_text(&hotels);
        assert!(text.starts_with("I found 6 hotels"));
        assert!(text.contains("3. Marina Bay Hotel"));
        assert!(!text.contains("4. "));
    }

    #[tokio::test(start_paused = true)]
    async fn replies_wait_for_typing_delay() {
        let mut assistant = Assistant::new(
            MockApi::new(Duration::from_millis(1000)),
            Duration::from_millis(1000),
        );
        let started = tokio::time::Instant::now();
        assistant.send("flights to Tokyo").await;
        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert!(last(&assistant).content.contains("find flights"));
    }
}
