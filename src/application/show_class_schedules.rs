use crate::application::booking_desk::BookingDesk;
use crate::entity::availability::available_seats;
use crate::entity::class_schedule::ClassSchedule;
use crate::entity::datetime::format_long_date;
use crate::entity::selection::SelectionState;
use std::fmt;

#[cfg(test)]
use crate::entity::datetime::parse_date;
#[cfg(test)]
use crate::entity::schedule_config::ScheduleConfig;
#[cfg(test)]
use crate::entity::time_slot::{SlotTimes, TimeSlot};
#[cfg(test)]
use rand::rngs::mock::StepRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectButton {
    Select,
    Selected,
    Full,
}

impl fmt::Display for SelectButton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectButton::Select => write!(f, "Select"),
            SelectButton::Selected => write!(f, "Selected"),
            SelectButton::Full => write!(f, "Full"),
        }
    }
}

// 授業一覧の1行分
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionListing {
    pub id: String,
    pub course_name: String,
    pub time: String,
    pub seats: String,
    pub button: SelectButton,
}

pub fn seat_label(session: &ClassSchedule) -> String {
    let available = available_seats(session);
    if available > 0 {
        format!("{} seats available", available)
    } else {
        "Class is full".to_string()
    }
}

pub fn session_listing(session: &ClassSchedule, selection: &SelectionState) -> SessionListing {
    let is_selected = selection.get_selected_session() == Some(session.get_id());

    // 選択済みの表示が満席より優先される
    let button = if is_selected {
        SelectButton::Selected
    } else if available_seats(session) == 0 {
        SelectButton::Full
    } else {
        SelectButton::Select
    };

    SessionListing {
        id: session.get_id().to_string(),
        course_name: session.get_course_name().to_string(),
        time: session.get_slot_times().to_string(),
        seats: seat_label(session),
        button,
    }
}

pub fn daily_heading(selection: &SelectionState) -> String {
    match selection.get_selected_date() {
        Some(date) => format!("Classes for {}", format_long_date(date)),
        None => "Select a date".to_string(),
    }
}

pub fn empty_day_message(selection: &SelectionState) -> &'static str {
    match selection.get_selected_date() {
        Some(_) => "No classes scheduled for this day.",
        None => "Please select a date from the calendar.",
    }
}

pub fn selection_summary(desk: &BookingDesk) -> String {
    match desk.selected_session() {
        Some(session) => format!(
            "You have selected: {} on {}. Complete the form to book.",
            session.get_course_name(),
            format_long_date(session.get_date())
        ),
        None => "Select a class from the calendar above to begin.".to_string(),
    }
}

pub fn show_class_schedules(desk: &BookingDesk) -> Vec<SessionListing> {
    desk.visible_sessions()
        .into_iter()
        .map(|session| session_listing(session, desk.get_selection()))
        .collect()
}

#[cfg(test)]
fn session_with_counts(total: u32, booked: u32, reserved: u32) -> ClassSchedule {
    ClassSchedule::new(
        "TOEFL Workshop".to_string(),
        parse_date("2024-01-04").unwrap(),
        TimeSlot::Evening,
        SlotTimes::from_hm(18, 0, 20, 0),
        total,
        booked,
        reserved,
    )
}

#[test]
fn test_seat_label_空席がある場合() {
    assert_eq!(seat_label(&session_with_counts(12, 2, 3)), "7 seats available");
}

#[test]
fn test_seat_label_満席の場合() {
    assert_eq!(seat_label(&session_with_counts(12, 10, 2)), "Class is full");
}

#[test]
fn test_session_listing_ボタンの状態() {
    let open = session_with_counts(12, 2, 3);
    let full = session_with_counts(12, 12, 0);
    let nothing_selected = SelectionState::default();

    assert_eq!(session_listing(&open, &nothing_selected).button, SelectButton::Select);
    assert_eq!(session_listing(&full, &nothing_selected).button, SelectButton::Full);

    let selected = SelectionState::default().choose_session(open.get_id().clone());
    let listing = session_listing(&open, &selected);
    assert_eq!(listing.button, SelectButton::Selected);
    assert_eq!(listing.time, "18:00 - 20:00");
    assert_eq!(listing.id, "toefl-workshop-2024-01-04-pm");
}

#[test]
fn test_daily_heading_と_empty_day_message() {
    let selection = SelectionState::new(parse_date("2024-01-07").unwrap());
    assert_eq!(daily_heading(&selection), "Classes for January 7th, 2024");
    assert_eq!(empty_day_message(&selection), "No classes scheduled for this day.");

    let selection = selection.clear_date();
    assert_eq!(daily_heading(&selection), "Select a date");
    assert_eq!(
        empty_day_message(&selection),
        "Please select a date from the calendar."
    );
}

#[test]
fn test_selection_summary_選択前後で文言が変わること() {
    let mut desk = BookingDesk::new(parse_date("2024-01-01").unwrap(), ScheduleConfig::default());
    desk.generate(&mut StepRng::new(0, 0));

    assert_eq!(
        selection_summary(&desk),
        "Select a class from the calendar above to begin."
    );

    let id = desk.visible_sessions()[1].get_id().clone();
    desk.choose_session(&id).unwrap();

    assert_eq!(
        selection_summary(&desk),
        "You have selected: PTE Academic on January 1st, 2024. Complete the form to book."
    );
}

#[test]
fn test_show_class_schedules_選択中の日付の一覧を返すこと() {
    let mut desk = BookingDesk::new(parse_date("2024-01-01").unwrap(), ScheduleConfig::default());
    desk.generate(&mut StepRng::new(0, 0));

    let listings = show_class_schedules(&desk);
    let names: Vec<&str> = listings.iter().map(|l| l.course_name.as_str()).collect();

    assert_eq!(names, vec!["IELTS Intensive", "PTE Academic"]);
    assert!(listings.iter().all(|l| l.seats == "10 seats available"));
}
