use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};

/// Timestamp format for The Odds API's commenceTime parameters: whole
/// seconds, UTC, trailing Z
const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The two weekly reference points for NFL lines.
///
/// Odds are queried up to the Wednesday 01:00 cutoff, while week numbers
/// count from Tuesday midnight. The two days are configured separately so
/// either rule can move without dragging the other along.
#[derive(Debug, Clone, Copy)]
pub struct WeekAnchors {
    /// Day whose early-morning cutoff closes the query window
    pub cutoff_day: Weekday,
    /// Local hour of the query cutoff
    pub cutoff_hour: i64,
    /// Day whose midnight starts a new betting week
    pub week_start_day: Weekday,
}

impl Default for WeekAnchors {
    fn default() -> Self {
        Self {
            cutoff_day: Weekday::Wed,
            cutoff_hour: 1,
            week_start_day: Weekday::Tue,
        }
    }
}

/// The window handed to the odds fetch: from "now" until the next weekly
/// cutoff. `from` keeps the full precision of the clock reading; truncation
/// to whole seconds happens only when formatting the API parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn from_param(&self) -> String {
        self.from.format(TIMESTAMP_FMT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(TIMESTAMP_FMT).to_string()
    }
}

/// Compute the window covering the rest of the current betting week.
///
/// `to` lands on the next `cutoff_day` at `cutoff_hour`:00 in `now`'s
/// timezone. If today is the cutoff day and the cutoff has already passed,
/// the window rolls a full week forward, so `to` is always strictly after
/// `now`.
pub fn query_window<Tz: TimeZone>(now: &DateTime<Tz>, anchors: &WeekAnchors) -> TimeWindow {
    // Today at the cutoff hour, same date as `now`
    let since_midnight = now.time() - NaiveTime::MIN;
    let candidate = now.clone() - since_midnight + Duration::hours(anchors.cutoff_hour);

    let mut days_ahead = (anchors.cutoff_day.num_days_from_sunday() as i64
        - candidate.weekday().num_days_from_sunday() as i64)
        .rem_euclid(7);

    // Already past this week's cutoff: jump to next week
    if days_ahead == 0 && *now >= candidate {
        days_ahead = 7;
    }

    TimeWindow {
        from: now.with_timezone(&Utc),
        to: (candidate + Duration::days(days_ahead)).with_timezone(&Utc),
    }
}

/// The most recent `week_start_day` midnight at or before `now`.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>, anchors: &WeekAnchors) -> DateTime<Tz> {
    let midnight = now.clone() - (now.time() - NaiveTime::MIN);
    let days_back = (midnight.weekday().num_days_from_sunday() as i64
        - anchors.week_start_day.num_days_from_sunday() as i64)
        .rem_euclid(7);
    midnight - Duration::days(days_back)
}

/// Betting week number relative to an explicit week start: 1 during the week
/// beginning at `start`, 2 the week after, and so on.
pub fn week_number_from<Tz: TimeZone>(start: &DateTime<Tz>, now: &DateTime<Tz>) -> u32 {
    let weeks = now
        .clone()
        .signed_duration_since(start.clone())
        .num_weeks();
    (weeks + 1).max(1) as u32
}

/// Betting week number for `now`, counted from the most recent
/// `week_start_day` midnight.
pub fn week_number<Tz: TimeZone>(now: &DateTime<Tz>, anchors: &WeekAnchors) -> u32 {
    week_number_from(&week_start(now, anchors), now)
}
