use std::fmt;

use serde::{Deserialize, Serialize};

/// An autocomplete input on the planning form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Start,
    End,
    Waypoints,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Start, Field::End, Field::Waypoints];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Waypoints => "waypoints",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
