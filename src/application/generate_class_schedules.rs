use crate::entity::class_schedule::{ClassSchedule, ScheduleId};
use crate::entity::schedule_config::ScheduleConfig;
use crate::entity::time_slot::TimeSlot;
use chrono::{Datelike, Duration, NaiveDate};
use linked_hash_map::LinkedHashMap;
use rand::Rng;

#[cfg(test)]
use crate::entity::availability::{available_seats, check_capacity};
#[cfg(test)]
use crate::entity::calendar::{event_dates, sessions_on};
#[cfg(test)]
use crate::entity::datetime::parse_date;
#[cfg(test)]
use chrono::Weekday;
#[cfg(test)]
use rand::rngs::mock::StepRng;
#[cfg(test)]
use rand::rngs::StdRng;
#[cfg(test)]
use rand::SeedableRng;

/// Synthesizes the bookable sessions for `window_days` offsets starting at
/// `reference_date`.
///
/// Two consecutive offsets share a calendar date, so every date gets up to two
/// candidates before the date advances. Candidates on an off-day are dropped.
/// The course is chosen round-robin by offset, the time slot by a coin flip,
/// and the seat counts are drawn total first, then booked, then reserved so
/// that booked + reserved never exceeds the total. Sessions sharing an id are
/// merged: the later one wins and the earlier one's position is kept.
pub fn generate_class_schedules<R: Rng>(
    config: &ScheduleConfig,
    window_days: u32,
    reference_date: NaiveDate,
    rng: &mut R,
) -> Vec<ClassSchedule> {
    if config.course_names.is_empty() {
        tracing::warn!("no course names configured, nothing to generate");
        return vec![];
    }

    let min_seats = config.min_seats.min(config.max_seats);
    let max_seats = config.max_seats.max(config.min_seats);

    let mut schedules: LinkedHashMap<ScheduleId, ClassSchedule> = LinkedHashMap::new();
    let mut skipped = 0;

    for offset in 0..window_days {
        let date = match reference_date.checked_add_signed(Duration::days(i64::from(offset / 2)))
        {
            Some(date) => date,
            None => break,
        };

        if config.is_off_day(date.weekday()) {
            skipped += 1;
            continue;
        }

        let course_name = &config.course_names[offset as usize % config.course_names.len()];
        let time_slot = if rng.gen_bool(0.5) {
            TimeSlot::Morning
        } else {
            TimeSlot::Evening
        };

        // この順で決めることで 予約済み + 仮押さえ <= 総席数 が保証される
        let total_seats = rng.gen_range(min_seats..=max_seats);
        let booked_seats = rng.gen_range(0..=total_seats);
        let reserved_seats = rng.gen_range(0..=total_seats - booked_seats);

        let schedule = ClassSchedule::new(
            course_name.clone(),
            date,
            time_slot,
            config.slot_times(time_slot),
            total_seats,
            booked_seats,
            reserved_seats,
        );

        // LinkedHashMap::insertは既存キーを末尾に移すので、位置を保ったまま値だけ差し替える
        match schedules.get_mut(schedule.get_id()) {
            Some(existing) => {
                tracing::debug!(id = %schedule.get_id(), "duplicate session id, replacing");
                *existing = schedule;
            }
            None => {
                schedules.insert(schedule.get_id().clone(), schedule);
            }
        }
    }

    tracing::debug!(
        generated = schedules.len(),
        skipped,
        %reference_date,
        window_days,
        "generated class schedules"
    );

    schedules.into_iter().map(|(_, schedule)| schedule).collect()
}

#[cfg(test)]
fn monday_2024_01_01() -> NaiveDate {
    parse_date("2024-01-01").unwrap()
}

#[test]
fn test_generate_class_schedules_日曜日には授業が生成されないこと() {
    let config = ScheduleConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let schedules = generate_class_schedules(&config, 45, monday_2024_01_01(), &mut rng);

    assert!(!schedules.is_empty());
    for schedule in schedules.iter() {
        assert_ne!(schedule.get_date().weekday(), Weekday::Sun);
    }

    for sunday in ["2024-01-07", "2024-01-14", "2024-01-21"] {
        let date = parse_date(sunday).unwrap();
        assert!(sessions_on(&schedules, date).is_empty());
        assert!(!event_dates(&schedules).contains(&date));
    }
}

#[test]
fn test_generate_class_schedules_席数の不変条件が常に成り立つこと() {
    let config = ScheduleConfig::default();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedules = generate_class_schedules(&config, 45, monday_2024_01_01(), &mut rng);

        for schedule in schedules.iter() {
            let total = schedule.get_total_seats();
            assert!((10..=15).contains(&total));
            assert!(schedule.get_booked_seats() + schedule.get_reserved_seats() <= total);

            let available = check_capacity(schedule).unwrap();
            assert_eq!(
                available,
                total - schedule.get_booked_seats() - schedule.get_reserved_seats()
            );
        }
    }
}

#[test]
fn test_generate_class_schedules_固定の乱数源で結果が決まること() {
    // StepRng(0, 0) は常に午前・総席数は最小・予約と仮押さえは0を引く
    let config = ScheduleConfig::default();
    let mut rng = StepRng::new(0, 0);
    let schedules = generate_class_schedules(&config, 45, monday_2024_01_01(), &mut rng);

    // 1/1〜1/22のうち日曜3日を除く19日に2件ずつ、1/23に1件
    assert_eq!(schedules.len(), 39);

    let first = &schedules[0];
    assert_eq!(first.get_id().as_str(), "ielts-intensive-2024-01-01-am");
    assert_eq!(first.get_time_slot(), TimeSlot::Morning);
    assert_eq!(first.get_slot_times().to_string(), "09:00 - 11:00");
    assert_eq!(first.get_total_seats(), 10);
    assert_eq!(available_seats(first), 10);

    let second = &schedules[1];
    assert_eq!(second.get_id().as_str(), "pte-academic-2024-01-01-am");

    let last = schedules.last().unwrap();
    assert_eq!(last.get_date(), parse_date("2024-01-23").unwrap());
    assert_eq!(last.get_course_name(), "IELTS Intensive");
}

#[test]
fn test_generate_class_schedules_コースは休講日も含めたオフセットで巡回すること() {
    let config = ScheduleConfig::default();
    let mut rng = StepRng::new(0, 0);
    let schedules = generate_class_schedules(&config, 45, monday_2024_01_01(), &mut rng);

    // 1/8はオフセット14と15 → 14 % 4 = 2, 15 % 4 = 3
    let monday = parse_date("2024-01-08").unwrap();
    let names: Vec<&str> = sessions_on(&schedules, monday)
        .iter()
        .map(|schedule| schedule.get_course_name())
        .collect();
    assert_eq!(names, vec!["TOEFL Workshop", "IELTS General"]);
}

#[test]
fn test_generate_class_schedules_同じidは1つにまとめられ順序が保たれること() {
    let config = ScheduleConfig {
        course_names: vec!["IELTS Intensive".to_string()],
        ..ScheduleConfig::default()
    };
    let mut rng = StepRng::new(0, 0);
    let schedules = generate_class_schedules(&config, 6, monday_2024_01_01(), &mut rng);

    let ids: Vec<&str> = schedules.iter().map(|s| s.get_id().as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "ielts-intensive-2024-01-01-am",
            "ielts-intensive-2024-01-02-am",
            "ielts-intensive-2024-01-03-am",
        ]
    );
}

#[test]
fn test_generate_class_schedules_コース名が空なら何も生成しないこと() {
    let config = ScheduleConfig {
        course_names: vec![],
        ..ScheduleConfig::default()
    };
    let mut rng = StepRng::new(0, 0);

    assert!(generate_class_schedules(&config, 45, monday_2024_01_01(), &mut rng).is_empty());
}

#[test]
fn test_generate_class_schedules_期間0日なら何も生成しないこと() {
    let config = ScheduleConfig::default();
    let mut rng = StepRng::new(0, 0);

    assert!(generate_class_schedules(&config, 0, monday_2024_01_01(), &mut rng).is_empty());
}

#[test]
fn test_generate_class_schedules_休講日を設定で差し替えられること() {
    let config = ScheduleConfig {
        off_days: vec![Weekday::Mon, Weekday::Tue],
        ..ScheduleConfig::default()
    };
    let mut rng = StepRng::new(0, 0);
    let schedules = generate_class_schedules(&config, 14, monday_2024_01_01(), &mut rng);

    // 1/1(月)〜1/7(日)のうち水〜日の5日分
    let dates: Vec<NaiveDate> = event_dates(&schedules).into_iter().collect();
    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0], parse_date("2024-01-03").unwrap());
}
