use chrono::{DateTime, Days, Local, NaiveDate, Utc};

use crate::model::DueFilter;
use crate::util::time::end_of_day;

/// Calendar formats accepted for due dates, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid date format: {0}")]
    InvalidFormat(String),
}

/// Resolve free text to a calendar day relative to `today`.
pub fn parse_day(text: &str, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
    let trimmed = text.trim();
    let offset = match trimmed.to_lowercase().as_str() {
        "today" => Some(0),
        "tomorrow" => Some(1),
        "next-week" | "nextweek" => Some(7),
        _ => None,
    };
    if let Some(days) = offset {
        return today
            .checked_add_days(Days::new(days))
            .ok_or_else(|| DateParseError::InvalidFormat(text.to_string()));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DateParseError::InvalidFormat(text.to_string()))
}

/// Parse a due date: the resolved day at 23:59:59 local time.
pub fn parse_due(text: &str, now: DateTime<Local>) -> Result<DateTime<Utc>, DateParseError> {
    let day = parse_day(text, now.date_naive())?;
    Ok(end_of_day(day).with_timezone(&Utc))
}

/// Parse a listing filter: a relative window name or a specific day.
pub fn parse_due_filter(text: &str, now: DateTime<Local>) -> Result<DueFilter, DateParseError> {
    match text.trim().to_lowercase().as_str() {
        "today" => Ok(DueFilter::Today),
        "tomorrow" => Ok(DueFilter::Tomorrow),
        "next-week" | "nextweek" => Ok(DueFilter::NextWeek),
        "overdue" => Ok(DueFilter::Overdue),
        _ => parse_day(text, now.date_naive()).map(DueFilter::On),
    }
}
