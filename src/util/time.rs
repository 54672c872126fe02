use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Local midnight at the start of `date`.
///
/// Where a DST transition removes midnight, the first valid instant of the
/// day is used; an ambiguous midnight resolves to the earlier instant.
pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    local_at(date, NaiveTime::MIN)
}

/// Local midnight at the start of the day after `date`.
pub fn start_of_day_after(date: NaiveDate) -> DateTime<Local> {
    start_of_day(date.checked_add_days(Days::new(1)).unwrap_or(date))
}

/// 23:59:59 local time on `date`, the canonical instant for a due day.
pub fn end_of_day(date: NaiveDate) -> DateTime<Local> {
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    local_at(date, time)
}

fn local_at(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    let naive = date.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            // Skipped by a DST jump: retry an hour later.
            let shifted = naive + chrono::Duration::hours(1);
            Local.from_local_datetime(&shifted).earliest()
        })
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Calendar day in local time, `2026-03-10`
pub fn format_day(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Local date and minute, `2026-03-10 14:05`
pub fn format_stamp(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Short month/day for narrow columns, `Mar 10`
pub fn format_short(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%b %-d").to_string()
}
