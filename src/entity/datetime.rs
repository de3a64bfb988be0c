use chrono::{Datelike, NaiveDate};

// "2024-01-01" 形式。idとコマンド入力で使う
pub fn format_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn ordinal_suffix(day: u32) -> &'static str {
    // 11日〜13日は例外的にth
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }

    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

// "January 1st, 2024" 形式
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

#[test]
fn test_format_long_date_1日の場合() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(format_long_date(date), "January 1st, 2024");
}

#[test]
fn test_format_long_date_11日から13日はthになること() {
    for day in 11..=13 {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        assert_eq!(format_long_date(date), format!("March {}th, 2024", day));
    }
}

#[test]
fn test_format_long_date_22日と23日() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 22).unwrap();
    assert_eq!(format_long_date(date), "February 22nd, 2024");

    let date = NaiveDate::from_ymd_opt(2024, 2, 23).unwrap();
    assert_eq!(format_long_date(date), "February 23rd, 2024");
}

#[test]
fn test_parse_date_正常系() {
    let actual = parse_date(" 2024-01-07 ");
    assert_eq!(actual, NaiveDate::from_ymd_opt(2024, 1, 7));
}

#[test]
fn test_parse_date_異常系() {
    assert_eq!(parse_date("2024/01/07"), None);
    assert_eq!(parse_date("2024-02-30"), None);
}

#[test]
fn test_format_date_key() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    assert_eq!(format_date_key(date), "2024-01-07");
}
