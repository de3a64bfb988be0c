use crate::entity::datetime::format_date_key;
use crate::entity::time_slot::{SlotTimes, TimeSlot};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(String);

impl ScheduleId {
    // 同じコース名・日付・時間帯からは必ず同じidが得られる
    pub fn derive(course_name: &str, date: NaiveDate, time_slot: TimeSlot) -> Self {
        let course_slug = WHITESPACE_PATTERN
            .replace_all(course_name.trim(), "-")
            .to_lowercase();

        Self(format!(
            "{}-{}-{}",
            course_slug,
            format_date_key(date),
            time_slot.id_suffix()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScheduleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One offered class at a specific date and time slot with finite seat capacity.
///
/// The constructor does not reject sessions whose booked and reserved counts
/// exceed the total; see [`crate::entity::availability`] for how such sessions
/// are reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSchedule {
    id: ScheduleId,
    course_name: String,
    date: NaiveDate,
    time_slot: TimeSlot,
    slot_times: SlotTimes,
    total_seats: u32,
    booked_seats: u32,
    reserved_seats: u32,
}

impl ClassSchedule {
    pub fn new(
        course_name: String,
        date: NaiveDate,
        time_slot: TimeSlot,
        slot_times: SlotTimes,
        total_seats: u32,
        booked_seats: u32,
        reserved_seats: u32,
    ) -> Self {
        let id = ScheduleId::derive(&course_name, date, time_slot);

        Self {
            id,
            course_name,
            date,
            time_slot,
            slot_times,
            total_seats,
            booked_seats,
            reserved_seats,
        }
    }

    pub fn get_id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn get_course_name(&self) -> &str {
        &self.course_name
    }

    pub fn get_date(&self) -> NaiveDate {
        self.date
    }

    pub fn get_time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    pub fn get_slot_times(&self) -> SlotTimes {
        self.slot_times
    }

    pub fn get_total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn get_booked_seats(&self) -> u32 {
        self.booked_seats
    }

    pub fn get_reserved_seats(&self) -> u32 {
        self.reserved_seats
    }
}

#[cfg(test)]
fn sample_schedule(course_name: &str, time_slot: TimeSlot) -> ClassSchedule {
    ClassSchedule::new(
        course_name.to_string(),
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        time_slot,
        SlotTimes::from_hm(9, 0, 11, 0),
        12,
        3,
        1,
    )
}

#[test]
fn test_schedule_id_derive_空白はハイフンに置き換えて小文字にすること() {
    let schedule = sample_schedule("IELTS Intensive", TimeSlot::Morning);
    assert_eq!(schedule.get_id().as_str(), "ielts-intensive-2024-01-02-am");
}

#[test]
fn test_schedule_id_derive_連続する空白は1つのハイフンになること() {
    let schedule = sample_schedule("TOEFL   Weekend\tWorkshop", TimeSlot::Evening);
    assert_eq!(
        schedule.get_id().as_str(),
        "toefl-weekend-workshop-2024-01-02-pm"
    );
}

#[test]
fn test_schedule_id_derive_同じ入力からは同じidが得られること() {
    let a = sample_schedule("PTE Academic", TimeSlot::Evening);
    let b = sample_schedule("PTE Academic", TimeSlot::Evening);
    assert_eq!(a.get_id(), b.get_id());

    let c = sample_schedule("PTE Academic", TimeSlot::Morning);
    assert_ne!(a.get_id(), c.get_id());
}
