//! Station-local schedule arithmetic
//!
//! The schedule is a flat list of shows with a start hour in station
//! time. A show stays on air until the next one starts, so the show on
//! air at hour H is the one with the latest `time_slot <= H`. There is
//! no wrap-around: before the first slot of the day, nothing is on air.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::models::Show;

/// Hour of day (0-23) at the station, given its fixed UTC offset.
pub fn station_hour_at(utc: DateTime<Utc>, offset_hours: i64) -> u32 {
    (utc + Duration::hours(offset_hours)).hour()
}

/// Current hour of day (0-23) at the station.
pub fn station_hour(offset_hours: i64) -> u32 {
    station_hour_at(Utc::now(), offset_hours)
}

/// The show on air at `hour`, if any has started yet.
pub fn pick_on_air(shows: &[Show], hour: u32) -> Option<&Show> {
    shows
        .iter()
        .filter(|s| s.time_slot <= hour)
        .max_by_key(|s| s.time_slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn show(title: &str, time_slot: u32) -> Show {
        Show {
            title: title.to_string(),
            slug: String::new(),
            time_slot,
            description: None,
            vibe: None,
            stream_url: None,
            image_url: None,
            hosts: vec![],
        }
    }

    #[test]
    fn test_pick_latest_started_show() {
        let shows = vec![show("Morning", 7), show("Midday", 10), show("Drive", 15)];

        assert_eq!(pick_on_air(&shows, 12).map(|s| &*s.title), Some("Midday"));
        assert_eq!(pick_on_air(&shows, 15).map(|s| &*s.title), Some("Drive"));
        assert_eq!(pick_on_air(&shows, 23).map(|s| &*s.title), Some("Drive"));
        assert_eq!(pick_on_air(&shows, 7).map(|s| &*s.title), Some("Morning"));
    }

    #[test]
    fn test_nothing_on_air_before_first_slot() {
        let shows = vec![show("Morning", 7), show("Midday", 10)];
        assert_eq!(pick_on_air(&shows, 6), None);
        assert_eq!(pick_on_air(&[], 12), None);
    }

    #[test]
    fn test_station_hour_applies_offset() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 1, 5, 30, 0).unwrap();
        assert_eq!(station_hour_at(utc, 2), 7);
        assert_eq!(station_hour_at(utc, 0), 5);
    }

    #[test]
    fn test_station_hour_wraps_across_midnight() {
        let late = Utc.with_ymd_and_hms(2025, 6, 1, 22, 30, 0).unwrap();
        assert_eq!(station_hour_at(late, 2), 0);

        let early = Utc.with_ymd_and_hms(2025, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(station_hour_at(early, -5), 22);
    }
}
