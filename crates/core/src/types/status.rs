//! Event and RSVP status enums.

use serde::{Deserialize, Serialize};

/// Which of the two recurring parties a record or setting belongs to.
///
/// Also selects the active theme and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Christmas,
    #[default]
    NewYear,
}

impl EventMode {
    /// Both event occurrences, in calendar order.
    pub const ALL: [Self; 2] = [Self::Christmas, Self::NewYear];

    /// The storage/wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Christmas => "christmas",
            Self::NewYear => "newyear",
        }
    }
}

impl std::fmt::Display for EventMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "christmas" => Ok(Self::Christmas),
            "newyear" => Ok(Self::NewYear),
            _ => Err(format!("invalid event: {s}")),
        }
    }
}

/// A participant's answer to the invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Confirmed,
    Maybe,
    Declined,
}

impl RsvpStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Maybe => "maybe",
            Self::Declined => "declined",
        }
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "maybe" => Ok(Self::Maybe),
            "declined" => Ok(Self::Declined),
            _ => Err(format!("invalid rsvp status: {s}")),
        }
    }
}
