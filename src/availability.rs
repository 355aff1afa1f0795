//! Date-range and opening-hours gate, evaluated in a fixed UTC offset.

use crate::error::ConfigError;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::Deserialize;

const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub utc_offset_hours: i32,
    pub not_before: Option<NaiveDate>,
    pub not_after: Option<NaiveDate>,
    pub open_hour: Option<u32>,
    pub close_hour: Option<u32>,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            not_before: None,
            not_after: None,
            open_hour: None,
            close_hour: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    NotYetOpen(NaiveDate),
    Expired(NaiveDate),
    OutsideHours { open: u32, close: u32 },
}

impl Unavailable {
    pub fn message(&self) -> String {
        match self {
            Unavailable::NotYetOpen(date) => format!("Available from {}", date),
            Unavailable::Expired(date) => format!("The usage period ended on {}", date),
            Unavailable::OutsideHours { open, close } => {
                format!("Available between {:02}:00 and {:02}:00", open, close)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    offset: FixedOffset,
    not_before: Option<NaiveDate>,
    not_after: Option<NaiveDate>,
    hours: Option<(u32, u32)>,
}

impl Availability {
    pub fn from_config(config: &AvailabilityConfig) -> Result<Self, ConfigError> {
        let offset = config
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::Offset(config.utc_offset_hours))?;

        let hours = match (config.open_hour, config.close_hour) {
            (Some(open), Some(close)) => {
                for hour in [open, close] {
                    if hour > 23 {
                        return Err(ConfigError::Hour(hour));
                    }
                }
                Some((open, close))
            }
            (None, None) => None,
            _ => return Err(ConfigError::HourWindow),
        };

        Ok(Self {
            offset,
            not_before: config.not_before,
            not_after: config.not_after,
            hours,
        })
    }

    pub fn always() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
            not_before: None,
            not_after: None,
            hours: None,
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    pub fn check(&self, now: DateTime<Utc>) -> Result<(), Unavailable> {
        let local = now.with_timezone(&self.offset);
        let today = local.date_naive();

        if let Some(start) = self.not_before
            && today < start
        {
            return Err(Unavailable::NotYetOpen(start));
        }
        if let Some(end) = self.not_after
            && today > end
        {
            return Err(Unavailable::Expired(end));
        }
        if let Some((open, close)) = self.hours {
            let hour = local.hour();
            let inside = if open <= close {
                hour >= open && hour < close
            } else {
                hour >= open || hour < close
            };
            if !inside {
                return Err(Unavailable::OutsideHours { open, close });
            }
        }
        Ok(())
    }
}

/// Days from today (in the gate's offset) until `target`; negative once passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_always_open() {
        assert_eq!(Availability::always().check(utc(2030, 1, 1, 3)), Ok(()));
    }

    #[test]
    fn test_expiry_date_is_inclusive_in_japan_time() {
        let gate = Availability::from_config(&AvailabilityConfig {
            not_after: Some(date(2025, 9, 30)),
            ..Default::default()
        })
        .unwrap();

        // 2025-09-30 14:00 UTC is 23:00 JST on the last day.
        assert_eq!(gate.check(utc(2025, 9, 30, 14)), Ok(()));
        // 15:00 UTC is already 2025-10-01 in JST.
        assert_eq!(
            gate.check(utc(2025, 9, 30, 15)),
            Err(Unavailable::Expired(date(2025, 9, 30)))
        );
    }

    #[test]
    fn test_not_before() {
        let gate = Availability::from_config(&AvailabilityConfig {
            not_before: Some(date(2025, 4, 1)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            gate.check(utc(2025, 3, 31, 10)),
            Err(Unavailable::NotYetOpen(date(2025, 4, 1)))
        );
        // 2025-03-31 16:00 UTC is 2025-04-01 01:00 JST.
        assert_eq!(gate.check(utc(2025, 3, 31, 16)), Ok(()));
    }

    #[test]
    fn test_hour_window() {
        let gate = Availability::from_config(&AvailabilityConfig {
            open_hour: Some(6),
            close_hour: Some(22),
            ..Default::default()
        })
        .unwrap();
        // 21:00 UTC = 06:00 JST
        assert_eq!(gate.check(utc(2025, 5, 1, 21)), Ok(()));
        // 13:00 UTC = 22:00 JST
        assert_eq!(
            gate.check(utc(2025, 5, 1, 13)),
            Err(Unavailable::OutsideHours { open: 6, close: 22 })
        );
    }

    #[test]
    fn test_hour_window_across_midnight() {
        let gate = Availability::from_config(&AvailabilityConfig {
            utc_offset_hours: 0,
            open_hour: Some(22),
            close_hour: Some(2),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gate.check(utc(2025, 5, 1, 23)), Ok(()));
        assert_eq!(gate.check(utc(2025, 5, 1, 1)), Ok(()));
        assert!(gate.check(utc(2025, 5, 1, 12)).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let bad_hour = AvailabilityConfig {
            open_hour: Some(6),
            close_hour: Some(24),
            ..Default::default()
        };
        assert!(matches!(
            Availability::from_config(&bad_hour),
            Err(ConfigError::Hour(24))
        ));

        let open_only = AvailabilityConfig {
            open_hour: Some(6),
            ..Default::default()
        };
        assert!(matches!(
            Availability::from_config(&open_only),
            Err(ConfigError::HourWindow)
        ));

        let close_only = AvailabilityConfig {
            close_hour: Some(22),
            ..Default::default()
        };
        assert!(matches!(
            Availability::from_config(&close_only),
            Err(ConfigError::HourWindow)
        ));

        let bad_offset = AvailabilityConfig {
            utc_offset_hours: 30,
            ..Default::default()
        };
        assert!(matches!(
            Availability::from_config(&bad_offset),
            Err(ConfigError::Offset(30))
        ));
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(date(2026, 1, 17), date(2026, 1, 1)), 16);
        assert_eq!(days_until(date(2026, 1, 17), date(2026, 1, 17)), 0);
        assert_eq!(days_until(date(2026, 1, 17), date(2026, 1, 18)), -1);
    }

    #[test]
    fn test_today_uses_offset() {
        let gate = Availability::always();
        assert_eq!(gate.today(utc(2025, 12, 31, 16)), date(2026, 1, 1));
    }
}
