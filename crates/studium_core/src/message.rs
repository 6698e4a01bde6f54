//! Message types for conversation history.

use crate::{Input, Role};
use serde::{Deserialize, Serialize};

/// A message in a conversation.
///
/// # Examples
///
/// ```
/// use studium_core::{Message, Role, Input};
///
/// let message = Message {
///     role: Role::User,
///     content: vec![Input::Text("Hello!".to_string())],
/// };
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The content of the message
    pub content: Vec<Input>,
}

impl Message {
    /// Convenience constructor for a single-text user message.
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::User,
            content: vec![Input::Text(text.into())],
        }
    }

    /// Convenience constructor for a single-text system message.
    pub fn system<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::System,
            content: vec![Input::Text(text.into())],
        }
    }
}
