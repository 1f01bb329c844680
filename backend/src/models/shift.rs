use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Time};

use crate::roster::rejection::RosterRejection;

const HH_MM: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const HH_MM_SS: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// A schedulable work period, held to whole minutes. Start is strictly
/// before end on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(with = "hh_mm")]
    pub start_time: Time,
    #[serde(with = "hh_mm")]
    pub end_time: Time,
}

impl Shift {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        start_time: Time,
        end_time: Time,
    ) -> Result<Self, RosterRejection> {
        let id = id.into();
        let (start_time, end_time) = (whole_minute(start_time), whole_minute(end_time));
        if start_time >= end_time {
            return Err(RosterRejection::InvalidShiftTimes {
                shift_id: id,
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            id,
            code: code.into(),
            name: name.into(),
            start_time,
            end_time,
        })
    }

    pub fn duration_minutes(&self) -> u16 {
        crate::roster::overlap::minutes_since_midnight(self.end_time)
            - crate::roster::overlap::minutes_since_midnight(self.start_time)
    }
}

/// Shift catalog entry as the HR backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftRecord {
    #[serde(deserialize_with = "crate::models::id_string")]
    pub id: String,
    #[serde(alias = "shift_code")]
    pub code: String,
    #[serde(alias = "shift_name")]
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftRecord {
    /// Convert to a [`Shift`], or `None` if the times are malformed or the
    /// shift spans midnight.
    pub fn into_shift(self) -> Option<Shift> {
        let id = self.id;
        let start = parse_time(&self.start_time);
        let end = parse_time(&self.end_time);
        let (Some(start), Some(end)) = (start, end) else {
            tracing::warn!(
                "Skipping shift {} with unparseable times {:?}-{:?}",
                id,
                self.start_time,
                self.end_time
            );
            return None;
        };

        match Shift::new(id, self.code, self.name, start, end) {
            Ok(shift) => Some(shift),
            Err(e) => {
                tracing::warn!("Skipping catalog shift: {}", e);
                None
            }
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS`. Seconds are dropped.
pub fn parse_time(s: &str) -> Option<Time> {
    let s = s.trim();
    Time::parse(s, HH_MM)
        .or_else(|_| Time::parse(s, HH_MM_SS))
        .ok()
        .map(whole_minute)
}

fn whole_minute(t: Time) -> Time {
    Time::from_hms(t.hour(), t.minute(), 0).unwrap_or(t)
}

/// Serde adapter for `HH:MM` times.
pub mod hh_mm {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(t: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let s = t.format(super::HH_MM).map_err(S::Error::custom)?;
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).ok_or_else(|| D::Error::custom(format!("invalid time of day: {s}")))
    }
}
