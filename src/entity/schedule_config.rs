use crate::entity::time_slot::{SlotTimes, TimeSlot};
use chrono::Weekday;

pub const DEFAULT_COURSE_NAMES: [&str; 4] = [
    "IELTS Intensive",
    "PTE Academic",
    "TOEFL Workshop",
    "IELTS General",
];
pub const DEFAULT_WINDOW_DAYS: u32 = 45;
pub const DEFAULT_MIN_SEATS: u32 = 10;
pub const DEFAULT_MAX_SEATS: u32 = 15;

/// Data the schedule generator draws from: the course offerings, the times of
/// the two daily slots, how far ahead to generate, which weekdays have no
/// classes and the range of seats a class may have.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub course_names: Vec<String>,
    pub morning: SlotTimes,
    pub evening: SlotTimes,
    pub window_days: u32,
    pub off_days: Vec<Weekday>,
    pub min_seats: u32,
    pub max_seats: u32,
}

impl ScheduleConfig {
    pub fn slot_times(&self, time_slot: TimeSlot) -> SlotTimes {
        match time_slot {
            TimeSlot::Morning => self.morning,
            TimeSlot::Evening => self.evening,
        }
    }

    pub fn is_off_day(&self, weekday: Weekday) -> bool {
        self.off_days.contains(&weekday)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            course_names: DEFAULT_COURSE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            morning: SlotTimes::from_hm(9, 0, 11, 0),
            evening: SlotTimes::from_hm(18, 0, 20, 0),
            window_days: DEFAULT_WINDOW_DAYS,
            off_days: vec![Weekday::Sun],
            min_seats: DEFAULT_MIN_SEATS,
            max_seats: DEFAULT_MAX_SEATS,
        }
    }
}

#[test]
fn test_default_日曜日のみ休講日であること() {
    let config = ScheduleConfig::default();

    assert!(config.is_off_day(Weekday::Sun));
    assert!(!config.is_off_day(Weekday::Sat));
    assert!(!config.is_off_day(Weekday::Mon));
}

#[test]
fn test_slot_times_時間帯ごとの時刻を返すこと() {
    let config = ScheduleConfig::default();

    assert_eq!(config.slot_times(TimeSlot::Morning).to_string(), "09:00 - 11:00");
    assert_eq!(config.slot_times(TimeSlot::Evening).to_string(), "18:00 - 20:00");
}
