use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Position {
    Start,
    Stop { number: usize },
    End,
}

impl Position {
    pub fn label(&self) -> String {
        match self {
            Self::Start => "Start Location".into(),
            Self::Stop { number } => format!("Stop {}", number),
            Self::End => "End Location".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelSequenceEntry {
    pub position: Position,
    pub label: String,
}

impl TravelSequenceEntry {
    pub fn new(position: Position, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}
