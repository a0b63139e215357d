//! Application configuration.
//!
//! The configuration is a singleton: the active event, per-event location and
//! date, house rules, playlist link, and the copy shown after an RSVP.
//! Stored configurations from older releases may lack fields; loading
//! backfills every missing field from the defaults.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use revelion_core::{EventMode, RsvpStatus};

const DEFAULT_ADMIN_PASSWORD: &str = "1234";
const DEFAULT_PLAYLIST_URL: &str = "https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd";
const DEFAULT_RULES: &str = "1. No street shoes inside.\n2. Everyone brings their favourite drink.\n3. Maximum fun is mandatory!";

/// Date format used for event dates (`datetime-local` style).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Where and when one event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationConfig {
    pub venue_name: String,
    pub lat: String,
    pub lng: String,
    /// ISO-8601 local date and time, e.g. `2026-12-25T14:00`.
    pub date: String,
}

/// Partial update for a [`LocationConfig`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPatch {
    pub venue_name: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub date: Option<String>,
}

impl LocationPatch {
    /// Merge this patch into `location`.
    pub fn apply(self, location: &mut LocationConfig) {
        if let Some(venue_name) = self.venue_name {
            location.venue_name = venue_name;
        }
        if let Some(lat) = self.lat {
            location.lat = lat;
        }
        if let Some(lng) = self.lng {
            location.lng = lng;
        }
        if let Some(date) = self.date {
            location.date = date;
        }
    }
}

/// Title and body shown after submitting an RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpMessage {
    pub title: String,
    pub message: String,
}

impl RsvpMessage {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// RSVP confirmation copy, one entry per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpMessages {
    pub confirmed: RsvpMessage,
    pub maybe: RsvpMessage,
    pub declined: RsvpMessage,
}

impl RsvpMessages {
    #[must_use]
    pub const fn get(&self, status: RsvpStatus) -> &RsvpMessage {
        match status {
            RsvpStatus::Confirmed => &self.confirmed,
            RsvpStatus::Maybe => &self.maybe,
            RsvpStatus::Declined => &self.declined,
        }
    }

    pub const fn get_mut(&mut self, status: RsvpStatus) -> &mut RsvpMessage {
        match status {
            RsvpStatus::Confirmed => &mut self.confirmed,
            RsvpStatus::Maybe => &mut self.maybe,
            RsvpStatus::Declined => &mut self.declined,
        }
    }
}

impl Default for RsvpMessages {
    fn default() -> Self {
        Self {
            confirmed: RsvpMessage::new("Yay!", "We can't wait to see you!"),
            maybe: RsvpMessage::new("OK!", "We hope you can make it!"),
            declined: RsvpMessage::new("Too bad!", "We'll miss you..."),
        }
    }
}

/// The application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Active event; selects theme and location.
    pub mode: EventMode,
    /// Password unlocking the admin dashboard. Stored in plain text.
    pub admin_password: String,
    pub christmas: LocationConfig,
    pub newyear: LocationConfig,
    pub playlist_url: String,
    pub rules: String,
    pub rsvp_messages: RsvpMessages,
}

impl AppConfig {
    /// Default configuration with event dates set to their next occurrence
    /// after `now`.
    #[must_use]
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self {
            mode: EventMode::NewYear,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
            christmas: LocationConfig {
                venue_name: "Mountain Cabin".to_owned(),
                lat: "45.4214".to_owned(),
                lng: "25.5229".to_owned(),
                date: next_occurrence(now, 12, 25, 14),
            },
            newyear: LocationConfig {
                venue_name: "Party House (Bucharest)".to_owned(),
                lat: "44.4268".to_owned(),
                lng: "26.1025".to_owned(),
                date: next_occurrence(now, 1, 1, 0),
            },
            playlist_url: DEFAULT_PLAYLIST_URL.to_owned(),
            rules: DEFAULT_RULES.to_owned(),
            rsvp_messages: RsvpMessages::default(),
        }
    }

    /// Merge a stored configuration over `defaults`.
    ///
    /// Stored values win field by field at every nesting level; missing or
    /// `null` fields keep the default.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored field has the wrong type.
    pub fn from_stored(defaults: &Self, stored: Value) -> Result<Self, serde_json::Error> {
        let mut merged = serde_json::to_value(defaults)?;
        merge_value(&mut merged, stored);
        serde_json::from_value(merged)
    }

    #[must_use]
    pub const fn location(&self, mode: EventMode) -> &LocationConfig {
        match mode {
            EventMode::Christmas => &self.christmas,
            EventMode::NewYear => &self.newyear,
        }
    }

    pub const fn location_mut(&mut self, mode: EventMode) -> &mut LocationConfig {
        match mode {
            EventMode::Christmas => &mut self.christmas,
            EventMode::NewYear => &mut self.newyear,
        }
    }

    /// Location of the active event.
    #[must_use]
    pub const fn active_location(&self) -> &LocationConfig {
        self.location(self.mode)
    }

    /// Shallow merge: each `Some` field replaces the whole top-level value.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(admin_password) = patch.admin_password {
            self.admin_password = admin_password;
        }
        if let Some(christmas) = patch.christmas {
            self.christmas = christmas;
        }
        if let Some(newyear) = patch.newyear {
            self.newyear = newyear;
        }
        if let Some(playlist_url) = patch.playlist_url {
            self.playlist_url = playlist_url;
        }
        if let Some(rules) = patch.rules {
            self.rules = rules;
        }
        if let Some(rsvp_messages) = patch.rsvp_messages {
            self.rsvp_messages = rsvp_messages;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults_at(Utc::now())
    }
}

/// Top-level partial update for [`AppConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub mode: Option<EventMode>,
    pub admin_password: Option<String>,
    pub christmas: Option<LocationConfig>,
    pub newyear: Option<LocationConfig>,
    pub playlist_url: Option<String>,
    pub rules: Option<String>,
    pub rsvp_messages: Option<RsvpMessages>,
}

fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None if !value.is_null() => {
                        base.insert(key, value);
                    }
                    None => {}
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Next `month/day hour:00` (UTC) at or after `now`.
fn next_occurrence(now: DateTime<Utc>, month: u32, day: u32, hour: u32) -> String {
    let at = |year: i32| Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single();

    at(now.year())
        .filter(|date| *date >= now)
        .or_else(|| at(now.year() + 1))
        .unwrap_or(now)
        .format(DATE_FORMAT)
        .to_string()
}
