// src/native/system_time.rs

//! Native SYSTEMTIME calendar values

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A SYSTEMTIME: eight little-endian u16 words in local time of the host
/// that wrote it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemTime {
    pub year: u16,
    pub month: u16,
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub milliseconds: u16,
}

impl SystemTime {
    /// Build a SYSTEMTIME from a naive date-time
    ///
    /// Returns `None` when the year does not fit the native u16 word or is
    /// zero, since a zero year reads back as an unset value.
    pub fn from_naive(value: &NaiveDateTime) -> Option<Self> {
        use chrono::{Datelike, Timelike};

        let year = u16::try_from(value.year()).ok().filter(|year| *year != 0)?;

        Some(Self {
            year,
            month: value.month() as u16,
            day_of_week: value.weekday().num_days_from_sunday() as u16,
            day: value.day() as u16,
            hour: value.hour() as u16,
            minute: value.minute() as u16,
            second: value.second() as u16,
            milliseconds: (value.nanosecond() / 1_000_000).min(999) as u16,
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a naive date-time
    ///
    /// Returns `None` for an unset (all-zero) value or when any component is
    /// out of range. The day-of-week word is ignored.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        // chrono reads 1000..=1999 as a leap second; the native word stops at 999
        if self.year == 0 || self.milliseconds > 999 {
            return None;
        }

        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)?
            .and_hms_milli_opt(
                self.hour as u32,
                self.minute as u32,
                self.second as u32,
                self.milliseconds as u32,
            )
    }

    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let word = |i: usize| u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]);

        Self {
            year: word(0),
            month: word(1),
            day_of_week: word(2),
            day: word(3),
            hour: word(4),
            minute: word(5),
            second: word(6),
            milliseconds: word(7),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; 16] {
        let words = [
            self.year,
            self.month,
            self.day_of_week,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.milliseconds,
        ];

        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}
