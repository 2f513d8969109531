//! Business-day counting.

use chrono::{Datelike, NaiveDate, Weekday};

/// Count the weekdays (Mon-Fri) in the half-open range `(start, end]`.
///
/// Returns 0 when `end <= start`. Whole weeks contribute five days each; the
/// leftover 0-6 days are counted by looking at which weekdays they cover.
///
/// ```text
/// Su Mo Tu We Th Fr Sa      Su Mo Tu We Th Fr Sa
///  .  .  .  .  s  x  x       .  .  .  .  s  .  .
///  x  x  x  x  e  .  .       .  .  .  .  .  x  x
///                            x  x  e  .  .  .  .
/// ```
///
/// On the left the remainder does not wrap past Saturday, so only a leading
/// Sunday or a trailing Saturday can be a day off. On the right it wraps and
/// always contains exactly one Saturday and one Sunday.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days_between = (end - start).num_days();
    if days_between <= 0 {
        return 0;
    }

    let whole_weeks = days_between / 7;
    let mut extra_days = days_between % 7;

    if extra_days != 0 {
        let first = start.succ_opt().unwrap_or(start).weekday();
        let last = end.weekday();
        extra_days -= if first.num_days_from_sunday() <= last.num_days_from_sunday() {
            i64::from(first == Weekday::Sun) + i64::from(last == Weekday::Sat)
        } else {
            2
        };
    }

    u32::try_from(whole_weeks * 5 + extra_days).unwrap_or(u32::MAX)
}

/// Business days left after `date` until December 31st of its year.
pub fn business_days_left_in_year(date: NaiveDate) -> u32 {
    match NaiveDate::from_ymd_opt(date.year(), 12, 31) {
        Some(last) => business_days_between(date, last),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn brute_force(start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .skip(1)
            .take_while(|day| *day <= end)
            .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32
    }

    #[rstest]
    #[case(d(2024, 1, 1), d(2024, 1, 8), 5)] // Mon -> Mon
    #[case(d(2024, 1, 1), d(2024, 1, 1), 0)]
    #[case(d(2024, 1, 8), d(2024, 1, 1), 0)] // inverted
    #[case(d(2024, 1, 6), d(2024, 1, 7), 0)] // Sat -> Sun
    #[case(d(2024, 1, 5), d(2024, 1, 7), 0)] // Fri -> Sun
    #[case(d(2024, 1, 5), d(2024, 1, 8), 1)] // Fri -> Mon
    #[case(d(2024, 1, 7), d(2024, 1, 13), 5)] // Sun -> Sat
    #[case(d(2024, 1, 6), d(2024, 1, 12), 5)] // Sat -> Fri
    #[case(d(2024, 1, 3), d(2024, 1, 9), 4)] // Wed -> Tue, wraps weekend
    #[case(d(2023, 12, 29), d(2024, 1, 2), 2)] // across year end
    #[case(d(2024, 2, 27), d(2024, 3, 1), 3)] // across leap day
    fn counts_business_days(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: u32,
    ) {
        assert_eq!(business_days_between(start, end), expected);
    }

    #[test]
    fn matches_day_by_day_count() {
        let base = d(2023, 12, 20);
        for offset in 0..14 {
            let start = base + chrono::Duration::days(offset);
            for span in 0..40 {
                let end = start + chrono::Duration::days(span);
                assert_eq!(
                    business_days_between(start, end),
                    brute_force(start, end),
                    "{start} -> {end}"
                );
            }
        }
    }

    #[test]
    fn days_left_in_year() {
        assert_eq!(business_days_left_in_year(d(2024, 12, 31)), 0);
        assert_eq!(business_days_left_in_year(d(2024, 12, 27)), 2); // Fri -> Mon 30, Tue 31
        assert_eq!(business_days_left_in_year(d(2023, 12, 31)), 0);
    }
}
