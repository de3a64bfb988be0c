use crate::entity::class_schedule::ClassSchedule;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

#[cfg(test)]
use crate::entity::time_slot::{SlotTimes, TimeSlot};

// 1つ以上の授業がある日付の集合 (カレンダー上で強調表示される日)
pub fn event_dates(sessions: &[ClassSchedule]) -> BTreeSet<NaiveDate> {
    sessions.iter().map(|session| session.get_date()).collect()
}

// 生成順を保ったまま日付が一致する授業のみを返す
pub fn sessions_on(sessions: &[ClassSchedule], date: NaiveDate) -> Vec<&ClassSchedule> {
    sessions
        .iter()
        .filter(|session| session.get_date() == date)
        .collect()
}

/// Range of dates the date picker lets the user choose, both ends inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CalendarWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl CalendarWindow {
    pub fn new(reference_date: NaiveDate, window_days: u32) -> Self {
        let to = reference_date
            .checked_add_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(NaiveDate::MAX);

        Self {
            from: reference_date,
            to,
        }
    }

    pub fn get_from(&self) -> NaiveDate {
        self.from
    }

    pub fn get_to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[cfg(test)]
fn session_on(course_name: &str, date: NaiveDate) -> ClassSchedule {
    ClassSchedule::new(
        course_name.to_string(),
        date,
        TimeSlot::Morning,
        SlotTimes::from_hm(9, 0, 11, 0),
        10,
        0,
        0,
    )
}

#[cfg(test)]
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_event_dates_重複する日付は1つにまとめられること() {
    let sessions = vec![
        session_on("IELTS Intensive", ymd(2024, 1, 2)),
        session_on("PTE Academic", ymd(2024, 1, 2)),
        session_on("TOEFL Workshop", ymd(2024, 1, 3)),
    ];

    let actual: Vec<NaiveDate> = event_dates(&sessions).into_iter().collect();
    assert_eq!(actual, vec![ymd(2024, 1, 2), ymd(2024, 1, 3)]);
}

#[test]
fn test_event_dates_空の場合() {
    assert!(event_dates(&[]).is_empty());
}

#[test]
fn test_sessions_on_生成順を保って絞り込むこと() {
    let sessions = vec![
        session_on("PTE Academic", ymd(2024, 1, 2)),
        session_on("TOEFL Workshop", ymd(2024, 1, 3)),
        session_on("IELTS Intensive", ymd(2024, 1, 2)),
    ];

    let actual: Vec<&str> = sessions_on(&sessions, ymd(2024, 1, 2))
        .iter()
        .map(|session| session.get_course_name())
        .collect();
    assert_eq!(actual, vec!["PTE Academic", "IELTS Intensive"]);
}

#[test]
fn test_sessions_on_授業のない日は空になること() {
    let sessions = vec![session_on("PTE Academic", ymd(2024, 1, 2))];

    let date = ymd(2024, 1, 7);
    assert!(!event_dates(&sessions).contains(&date));
    assert!(sessions_on(&sessions, date).is_empty());
}

#[test]
fn test_calendar_window_両端を含むこと() {
    let window = CalendarWindow::new(ymd(2024, 1, 1), 45);

    assert_eq!(window.get_to(), ymd(2024, 2, 15));
    assert!(window.contains(ymd(2024, 1, 1)));
    assert!(window.contains(ymd(2024, 2, 15)));
    assert!(!window.contains(ymd(2023, 12, 31)));
    assert!(!window.contains(ymd(2024, 2, 16)));
}
