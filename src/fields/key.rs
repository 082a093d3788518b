//! The ten canonical prompt sections, in the order they are composed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    TaskContext,
    ToneContext,
    BackgroundData,
    TaskDescription,
    Examples,
    ConversationHistory,
    ImmediateTask,
    ThinkingSteps,
    OutputFormatting,
    PrefilledResponse,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field key: {0}")]
pub struct UnknownFieldKey(pub String);

impl FieldKey {
    /// Canonical order. Never reordered by user action.
    pub const ALL: [FieldKey; 10] = [
        FieldKey::TaskContext,
        FieldKey::ToneContext,
        FieldKey::BackgroundData,
        FieldKey::TaskDescription,
        FieldKey::Examples,
        FieldKey::ConversationHistory,
        FieldKey::ImmediateTask,
        FieldKey::ThinkingSteps,
        FieldKey::OutputFormatting,
        FieldKey::PrefilledResponse,
    ];

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Identifier used in persisted documents and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::TaskContext => "taskContext",
            FieldKey::ToneContext => "toneContext",
            FieldKey::BackgroundData => "backgroundData",
            FieldKey::TaskDescription => "taskDescription",
            FieldKey::Examples => "examples",
            FieldKey::ConversationHistory => "conversationHistory",
            FieldKey::ImmediateTask => "immediateTask",
            FieldKey::ThinkingSteps => "thinkingSteps",
            FieldKey::OutputFormatting => "outputFormatting",
            FieldKey::PrefilledResponse => "prefilledResponse",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            FieldKey::TaskContext => "Task Context",
            FieldKey::ToneContext => "Tone Context",
            FieldKey::BackgroundData => "Background Data, Documents & Images",
            FieldKey::TaskDescription => "Detailed Task Description & Rules",
            FieldKey::Examples => "Examples",
            FieldKey::ConversationHistory => "Conversation History",
            FieldKey::ImmediateTask => "Immediate Task Description",
            FieldKey::ThinkingSteps => "Thinking Steps / Take a Deep Breath",
            FieldKey::OutputFormatting => "Output Formatting",
            FieldKey::PrefilledResponse => "Prefilled Response (If Any)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldKey::TaskContext => "Describe the main task...",
            FieldKey::ToneContext => "Define the tone and style...",
            FieldKey::BackgroundData => "Provide background information...",
            FieldKey::TaskDescription => "Detail the task and rules...",
            FieldKey::Examples => "Provide examples of expected behavior...",
            FieldKey::ConversationHistory => "Paste conversation history...",
            FieldKey::ImmediateTask => "Describe the immediate request...",
            FieldKey::ThinkingSteps => "Instructions for reasoning...",
            FieldKey::OutputFormatting => "Specify output format...",
            FieldKey::PrefilledResponse => "Optional prefilled response...",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}
