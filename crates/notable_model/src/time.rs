#![forbid(unsafe_code)]

use chrono::{DateTime, Duration, Months, Utc};
use notable_domain::NoteTimeGroup;

/// Classify a note timestamp against the current time.
pub fn time_group_for_timestamp(timestamp: i64) -> NoteTimeGroup {
	time_group_at(timestamp, Utc::now())
}

/// Classify a note timestamp against an explicit `now`.
///
/// Precedence is month, week, two-days, yesterday, today. The two-days
/// bucket also captures timestamps on the same calendar day as `now` minus
/// two days even when the instant itself is not yet two full days old.
pub fn time_group_at(timestamp: i64, now: DateTime<Utc>) -> NoteTimeGroup {
	let then = DateTime::from_timestamp(timestamp, 0).unwrap_or(DateTime::UNIX_EPOCH);

	let month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
	if then < month_ago {
		return NoteTimeGroup::OlderMonth;
	}
	if then < now - Duration::weeks(1) {
		return NoteTimeGroup::OlderWeek;
	}

	let two_days_ago = now - Duration::days(2);
	if then < two_days_ago || then.date_naive() == two_days_ago.date_naive() {
		return NoteTimeGroup::OlderTwoDays;
	}
	if then.date_naive() == (now - Duration::days(1)).date_naive() {
		return NoteTimeGroup::Yesterday;
	}

	NoteTimeGroup::Today
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	fn noon() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
	}

	#[test]
	fn buckets_by_age() {
		let now = noon();
		assert_eq!(time_group_at((now - Duration::days(32)).timestamp(), now), NoteTimeGroup::OlderMonth);
		assert_eq!(time_group_at((now - Duration::days(8)).timestamp(), now), NoteTimeGroup::OlderWeek);
		assert_eq!(time_group_at((now - Duration::days(2)).timestamp(), now), NoteTimeGroup::OlderTwoDays);
		assert_eq!(time_group_at((now - Duration::days(1)).timestamp(), now), NoteTimeGroup::Yesterday);
		assert_eq!(time_group_at(now.timestamp(), now), NoteTimeGroup::Today);
	}

	#[test]
	fn two_days_bucket_includes_the_whole_calendar_day() {
		let now = noon();
		// 18:00 two days back is less than 48h old but still that calendar day
		let late_that_day = Utc.with_ymd_and_hms(2026, 8, 27, 18, 0, 0).unwrap();
		assert_eq!(time_group_at(late_that_day.timestamp(), now), NoteTimeGroup::OlderTwoDays);
	}

	#[test]
	fn yesterday_is_calendar_day_based() {
		let now = noon();
		let early_yesterday = Utc.with_ymd_and_hms(2026, 8, 28, 0, 30, 0).unwrap();
		assert_eq!(time_group_at(early_yesterday.timestamp(), now), NoteTimeGroup::Yesterday);
	}

	#[test]
	fn month_check_wins_over_week_check() {
		let now = noon();
		let old = now - Duration::days(45);
		assert_eq!(time_group_at(old.timestamp(), now), NoteTimeGroup::OlderMonth);
	}

	#[test]
	fn month_subtraction_is_calendar_aware() {
		// Mar 31 minus one month clamps to Feb 28: thirty days back is only
		// week-old, one more day crosses the month boundary
		let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
		let thirty_days_back = now - Duration::days(30);
		assert_eq!(time_group_at(thirty_days_back.timestamp(), now), NoteTimeGroup::OlderWeek);

		let before_clamp = Utc.with_ymd_and_hms(2026, 2, 28, 11, 0, 0).unwrap();
		assert_eq!(time_group_at(before_clamp.timestamp(), now), NoteTimeGroup::OlderMonth);
	}

	#[test]
	fn unparseable_timestamp_is_oldest_bucket() {
		assert_eq!(time_group_at(0, noon()), NoteTimeGroup::OlderMonth);
	}
}
