use chrono::{DateTime, Local};

/// Opening assistant turn of every conversation.
pub const GREETING: &str = "Hello! I'm your AI Health Assistant. I can help you understand your symptoms and provide preliminary health insights. Please describe your symptoms.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// A single message in the transcript. Turns are never mutated after they
/// are appended, so the fields are only exposed through accessors.
#[derive(Debug, Clone)]
pub struct Turn {
    id: u64,
    text: String,
    sender: Sender,
    timestamp: DateTime<Local>,
}

impl Turn {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Clock time in the `3:07 PM` style used by the transcript.
    pub fn formatted_time(&self) -> String {
        self.timestamp().format("%-I:%M %p").to_string()
    }
}

/// Append-only, ordered transcript. Insertion order is display order.
#[derive(Debug, Default)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// A fresh conversation holding only the assistant greeting.
    pub fn seeded() -> Self {
        let mut state = Self::new();
        state.add_assistant_message(GREETING);
        state
    }

    /// Appends a turn with the next sequential id and the current time.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> &Turn {
        let text = text.into();
        debug_assert!(!text.trim().is_empty(), "turns must carry text");

        let id = self.turns.last().map_or(1, |turn| turn.id + 1);
        self.turns.push(Turn {
            id,
            text,
            sender,
            timestamp: Local::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn add_assistant_message(&mut self, message: &str) -> &Turn {
        self.append(Sender::Assistant, message)
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_conversation_starts_with_greeting() {
        let state = ConversationState::seeded();

        assert_eq!(state.len(), 1);
        let greeting = &state.all()[0];
        assert_eq!(greeting.id(), 1);
        assert_eq!(greeting.sender(), Sender::Assistant);
        assert_eq!(greeting.text(), GREETING);
    }

    #[test]
    fn append_assigns_sequential_ids_in_order() {
        let mut state = ConversationState::new();
        assert_eq!(state.len(), 0);

        state.append(Sender::User, "first");
        state.add_assistant_message("second");
        state.append(Sender::User, "third");

        let ids: Vec<u64> = state.all().iter().map(Turn::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let texts: Vec<&str> = state.all().iter().map(Turn::text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn append_returns_the_new_turn() {
        let mut state = ConversationState::seeded();

        let turn = state.append(Sender::User, "I have a cough");
        assert_eq!(turn.id(), 2);
        assert_eq!(turn.sender(), Sender::User);

        assert_eq!(state.last().map(Turn::text), Some("I have a cough"));
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut state = ConversationState::seeded();
        state.append(Sender::User, "one");
        state.add_assistant_message("two");

        let turns = state.all();
        assert!(turns.windows(2).all(|pair| pair[0].timestamp() <= pair[1].timestamp()));
    }

    #[test]
    fn formatted_time_uses_twelve_hour_clock() {
        let mut state = ConversationState::new();
        let formatted = state.append(Sender::User, "hi").formatted_time();

        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"), "{formatted}");
        assert!(formatted.contains(':'));
    }

    #[test]
    fn sender_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Assistant.label(), "Assistant");
    }
}
