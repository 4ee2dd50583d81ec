use serde::Serialize;

use crate::models::GenerateResponse;

pub const THINKING_TEXT: &str = "Thinking...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Bot,
    Thinking,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
    pub caption: Option<String>,
}

/// Returned by [`ChatSession::submit`]; the caller sends `prompt` and later
/// resolves `placeholder`.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReply {
    pub prompt: String,
    pub placeholder: u64,
}

/// The transcript plus everything shown in the message list. Error turns are
/// shown but never enter the transcript.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    transcript: Vec<ChatTurn>,
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatSession {
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.messages.iter().any(|m| m.kind == MessageKind::Thinking)
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.transcript.push(ChatTurn {
            role,
            content: content.into(),
        });
    }

    /// Blank input changes nothing and returns `None`.
    pub fn submit(&mut self, raw: &str) -> Option<PendingReply> {
        let prompt = raw.trim();
        if prompt.is_empty() {
            return None;
        }

        self.push_message(MessageKind::User, prompt, None);
        self.append(Role::User, prompt);
        let placeholder = self.push_message(MessageKind::Thinking, THINKING_TEXT, None);

        Some(PendingReply {
            prompt: prompt.to_string(),
            placeholder,
        })
    }

    pub fn resolve(&mut self, placeholder: u64, outcome: Result<GenerateResponse, String>) {
        self.messages.retain(|m| m.id != placeholder);
        match outcome {
            Ok(reply) => {
                let caption = reply.caption();
                self.push_message(MessageKind::Bot, &reply.answer, caption);
                self.append(Role::Assistant, reply.answer);
            }
            Err(msg) => {
                self.push_message(MessageKind::Error, &msg, None);
            }
        }
    }

    fn push_message(&mut self, kind: MessageKind, text: &str, caption: Option<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(ChatMessage {
            id,
            kind,
            text: text.to_string(),
            caption,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(answer: &str) -> GenerateResponse {
        GenerateResponse {
            answer: answer.to_string(),
            model: None,
            meta: None,
        }
    }

    #[test]
    fn whitespace_message_changes_nothing() {
        let mut session = ChatSession::default();
        assert_eq!(session.submit("   \n\t"), None);
        assert_eq!(session, ChatSession::default());
    }

    #[test]
    fn submit_shows_user_message_and_placeholder_immediately() {
        let mut session = ChatSession::default();
        let pending = session.submit("  How do I budget?  ").unwrap();

        assert_eq!(pending.prompt, "How do I budget?");
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::User);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].id, pending.placeholder);
        assert!(session.is_waiting());
    }

    #[test]
    fn successful_round_trip_adds_two_turns() {
        let mut session = ChatSession::default();
        let pending = session.submit("How do I budget?").unwrap();
        session.resolve(pending.placeholder, Ok(reply("Track every expense.")));

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].role, Role::Assistant);
        assert_eq!(session.transcript()[1].content, "Track every expense.");
        assert!(session.messages().iter().all(|m| m.id != pending.placeholder));
        assert!(!session.is_waiting());
    }

    #[test]
    fn failed_round_trip_keeps_error_out_of_transcript() {
        let mut session = ChatSession::default();
        let pending = session.submit("How do I budget?").unwrap();
        session.resolve(pending.placeholder, Err("Error: API request failed".into()));

        assert_eq!(session.transcript().len(), 1);
        let last = session.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Error);
        assert_eq!(last.text, "Error: API request failed");
        assert!(!session.is_waiting());
    }

    #[test]
    fn message_ids_are_unique_across_rapid_sends() {
        let mut session = ChatSession::default();
        let first = session.submit("one").unwrap();
        let second = session.submit("two").unwrap();
        session.resolve(second.placeholder, Ok(reply("b")));
        session.resolve(first.placeholder, Ok(reply("a")));

        let mut ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), session.messages().len());
        assert_eq!(session.transcript().len(), 4);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let turn = ChatTurn {
            role: Role::Assistant,
            content: "hi".into(),
        };
        assert_eq!(
            serde_json::to_string(&turn).unwrap(),
            r#"{"role":"assistant","content":"hi"}"#
        );
    }
}
