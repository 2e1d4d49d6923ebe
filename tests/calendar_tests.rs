use chrono::{NaiveDate, Weekday};
use gantt_tool::Calendar;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn built_in_default_blocks_weekends_only() {
    let cal = Calendar::built_in_default();
    assert!(!cal.is_business_day(d(2024, 1, 6))); // Saturday
    assert!(!cal.is_business_day(d(2024, 1, 7))); // Sunday
    assert!(cal.is_business_day(d(2024, 1, 8))); // Monday
    assert!(cal.holidays.is_empty());
}

#[test]
fn fresh_calendar_has_no_weekends() {
    let cal = Calendar::new("always-on");
    assert!(cal.is_business_day(d(2024, 1, 6))); // Saturday counts
    assert!(cal.is_business_day(d(2024, 1, 7))); // Sunday counts
}

#[test]
fn holidays_block_business_days() {
    let mut cal = Calendar::new("holidays");
    cal.add_holiday(d(2024, 1, 1));
    assert!(!cal.is_business_day(d(2024, 1, 1)));
    assert!(cal.is_business_day(d(2024, 1, 2)));
}

#[test]
fn add_one_day_on_friday_lands_on_monday() {
    let cal = Calendar::built_in_default();
    assert_eq!(cal.add_business_days(d(2024, 1, 5), 1), d(2024, 1, 8));
}

#[test]
fn add_one_day_skips_weekend_and_holiday() {
    let mut cal = Calendar::built_in_default();
    cal.add_holiday(d(2024, 1, 1)); // Monday holiday
    // Friday 2023-12-29 + 1 business day: skip Sat, Sun, and the holiday.
    assert_eq!(cal.add_business_days(d(2023, 12, 29), 1), d(2024, 1, 2));
}

#[test]
fn add_five_days_over_a_weekend() {
    let mut cal = Calendar::built_in_default();
    cal.add_holiday(d(2024, 1, 1));
    assert_eq!(cal.add_business_days(d(2024, 1, 2), 5), d(2024, 1, 9));
}

#[test]
fn add_business_days_never_counts_the_start() {
    let cal = Calendar::new("no-weekends");
    assert_eq!(cal.add_business_days(d(2024, 1, 1), 5), d(2024, 1, 6));
}

#[test]
fn advancement_is_monotonic_and_lands_on_business_days() {
    let mut cal = Calendar::built_in_default();
    cal.add_holiday(d(2024, 1, 15));

    let start = d(2024, 1, 1);
    let mut previous = start;
    for days in 1..30 {
        let result = cal.add_business_days(start, days);
        assert!(result > previous, "{days} days did not advance past {previous}");
        assert!(cal.is_business_day(result));
        previous = result;
    }
}

#[test]
fn custom_weekends_respected() {
    let mut cal = Calendar::new("mid-east");
    cal.set_weekends([Weekday::Fri, Weekday::Sat]);
    assert!(!cal.is_business_day(d(2024, 1, 5))); // Friday
    assert!(!cal.is_business_day(d(2024, 1, 6))); // Saturday
    assert!(cal.is_business_day(d(2024, 1, 7))); // Sunday works
}
