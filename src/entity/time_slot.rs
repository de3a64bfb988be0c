use chrono::NaiveTime;
use std::fmt;

#[cfg(test)]
use chrono::Timelike;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    // 午前の部
    Morning,

    // 夜の部
    Evening,
}

impl TimeSlot {
    // idの末尾に付ける接尾辞
    pub fn id_suffix(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "am",
            TimeSlot::Evening => "pm",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeSlot::Morning => {
                write!(f, "morning")
            }
            TimeSlot::Evening => {
                write!(f, "evening")
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotTimes {
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl SlotTimes {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn from_hm(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        // 範囲外の時刻は00:00に丸める
        let start_time = NaiveTime::from_hms_opt(start_hour, start_minute, 0).unwrap_or_default();
        let end_time = NaiveTime::from_hms_opt(end_hour, end_minute, 0).unwrap_or_default();

        Self::new(start_time, end_time)
    }

    pub fn get_start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn get_end_time(&self) -> NaiveTime {
        self.end_time
    }
}

impl fmt::Display for SlotTimes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

pub fn parse_slot_times(s: &str) -> Option<SlotTimes> {
    let cols: Vec<&str> = s.split('-').map(|col| col.trim()).collect();
    if cols.len() != 2 {
        return None;
    }

    let start_time = NaiveTime::parse_from_str(cols[0], "%H:%M").ok()?;
    let end_time = NaiveTime::parse_from_str(cols[1], "%H:%M").ok()?;

    if end_time <= start_time {
        return None;
    }

    Some(SlotTimes::new(start_time, end_time))
}

#[test]
fn test_parse_slot_times_正常系() {
    let actual = parse_slot_times("09:00 - 11:00").unwrap();

    assert_eq!(actual.get_start_time().hour(), 9);
    assert_eq!(actual.get_end_time().hour(), 11);
    assert_eq!(actual.to_string(), "09:00 - 11:00");
}

#[test]
fn test_parse_slot_times_空白なしでも読めること() {
    let actual = parse_slot_times("18:00-20:30");

    assert_eq!(actual, Some(SlotTimes::from_hm(18, 0, 20, 30)));
}

#[test]
#[allow(non_snake_case)]
fn test_parse_slot_times_終了が開始より前ならNoneを返す() {
    assert_eq!(parse_slot_times("11:00 - 09:00"), None);
}

#[test]
#[allow(non_snake_case)]
fn test_parse_slot_times_区切りが不正ならNoneを返す() {
    assert_eq!(parse_slot_times("09:00"), None);
    assert_eq!(parse_slot_times("9時 - 11時"), None);
}

#[test]
fn test_time_slot_id_suffix() {
    assert_eq!(TimeSlot::Morning.id_suffix(), "am");
    assert_eq!(TimeSlot::Evening.id_suffix(), "pm");
}
