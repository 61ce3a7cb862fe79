//! Selection token grammar.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

static SLOT_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^d(\d+)t(\d+)$").expect("valid slot ref regex"));
static DAY_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^day(\d+)$").expect("valid day ref regex"));
static PERIOD_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(morning|afternoon|evening)(\d+)$").expect("valid period ref regex")
});
static RAW_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*,\s*\d+").expect("valid raw list regex"));

/// Named time-of-day band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// 06:00 to 11:59.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 to 23:59.
    Evening,
}

impl DayPeriod {
    /// Half-open wall-clock hour range.
    pub fn hours(self) -> Range<u32> {
        match self {
            Self::Morning => 6..12,
            Self::Afternoon => 12..17,
            Self::Evening => 17..24,
        }
    }

    pub fn contains_hour(self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }
}

/// Parsed form of one whitespace-delimited word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToken {
    /// `d<day>t<index>`
    SlotRef { day: u32, slot_index: u32 },
    /// `day<day>`
    DayRef { day: u32 },
    /// `morning<day>`, `afternoon<day>`, `evening<day>`
    PeriodRef { day: u32, period: DayPeriod },
    Unrecognized,
}

impl SelectionToken {
    /// Classifies one word. Grammars are tried in fixed precedence and the
    /// first match wins; numbers that overflow `u32` are unrecognized.
    pub fn parse(word: &str) -> Self {
        if let Some(caps) = SLOT_REF_RE.captures(word) {
            return match (caps[1].parse(), caps[2].parse()) {
                (Ok(day), Ok(slot_index)) => Self::SlotRef { day, slot_index },
                _ => Self::Unrecognized,
            };
        }
        if let Some(caps) = DAY_REF_RE.captures(word) {
            return caps[1]
                .parse()
                .map(|day| Self::DayRef { day })
                .unwrap_or(Self::Unrecognized);
        }
        if let Some(caps) = PERIOD_REF_RE.captures(word) {
            let period = DayPeriod::from_keyword(&caps[1]);
            return match (period, caps[2].parse()) {
                (Some(period), Ok(day)) => Self::PeriodRef { day, period },
                _ => Self::Unrecognized,
            };
        }
        Self::Unrecognized
    }
}

/// Whether `input` should be read as a comma-separated timestamp list.
pub fn is_raw_timestamp_list(input: &str) -> bool {
    RAW_LIST_RE.is_match(input.trim())
}

/// Splits `input` into classified tokens.
pub fn tokenize(input: &str) -> Vec<SelectionToken> {
    input.split_whitespace().map(SelectionToken::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::{is_raw_timestamp_list, tokenize, DayPeriod, SelectionToken};

    #[test]
    fn classifies_each_grammar_case_insensitively() {
        assert_eq!(
            SelectionToken::parse("D2T11"),
            SelectionToken::SlotRef {
                day: 2,
                slot_index: 11
            }
        );
        assert_eq!(SelectionToken::parse("Day3"), SelectionToken::DayRef { day: 3 });
        assert_eq!(
            SelectionToken::parse("EVENING0"),
            SelectionToken::PeriodRef {
                day: 0,
                period: DayPeriod::Evening
            }
        );
    }

    #[test]
    fn partial_matches_are_unrecognized() {
        for word in ["d1", "t1", "d1t", "day", "days1", "night0", "morning", "d1t1x", "xday1"] {
            assert_eq!(SelectionToken::parse(word), SelectionToken::Unrecognized, "{word}");
        }
    }

    #[test]
    fn overflowing_numbers_are_unrecognized() {
        assert_eq!(
            SelectionToken::parse("day99999999999"),
            SelectionToken::Unrecognized
        );
    }

    #[test]
    fn period_bands_are_half_open() {
        assert!(!DayPeriod::Morning.contains_hour(5));
        assert!(DayPeriod::Morning.contains_hour(6));
        assert!(!DayPeriod::Morning.contains_hour(12));
        assert!(DayPeriod::Afternoon.contains_hour(16));
        assert!(DayPeriod::Evening.contains_hour(17));
        assert!(DayPeriod::Evening.contains_hour(23));
    }

    #[test]
    fn raw_list_detection_requires_two_leading_integers() {
        assert!(is_raw_timestamp_list("100, 200"));
        assert!(is_raw_timestamp_list("  100,200,abc"));
        assert!(!is_raw_timestamp_list("100"));
        assert!(!is_raw_timestamp_list("d0t0, 100"));
        assert!(!is_raw_timestamp_list("100 200"));
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        let tokens = tokenize("  d0t0 \t day1\n\nfoo ");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2], SelectionToken::Unrecognized);
    }
}
