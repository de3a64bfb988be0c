use crate::entity::class_schedule::{ClassSchedule, ScheduleId};
use thiserror::Error;

#[cfg(test)]
use crate::entity::time_slot::{SlotTimes, TimeSlot};
#[cfg(test)]
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session {id} holds {booked} booked and {reserved} reserved seats out of {total}")]
pub struct CapacityInvariantViolated {
    pub id: ScheduleId,
    pub total: u32,
    pub booked: u32,
    pub reserved: u32,
}

// 予約済み + 仮押さえ <= 総席数 を満たす場合のみ空席数を返す
pub fn check_capacity(session: &ClassSchedule) -> Result<u32, CapacityInvariantViolated> {
    let total = session.get_total_seats();
    let booked = session.get_booked_seats();
    let reserved = session.get_reserved_seats();

    booked
        .checked_add(reserved)
        .and_then(|taken| total.checked_sub(taken))
        .ok_or_else(|| CapacityInvariantViolated {
            id: session.get_id().clone(),
            total,
            booked,
            reserved,
        })
}

/// Remaining bookable seats. A session violating the capacity invariant is
/// reported through the log and counted as having no seats left.
pub fn available_seats(session: &ClassSchedule) -> u32 {
    match check_capacity(session) {
        Ok(available) => available,
        Err(err) => {
            tracing::warn!(%err, "capacity invariant violated, clamping available seats to 0");
            0
        }
    }
}

pub fn is_full(session: &ClassSchedule) -> bool {
    available_seats(session) == 0
}

#[cfg(test)]
fn session_with_counts(total: u32, booked: u32, reserved: u32) -> ClassSchedule {
    ClassSchedule::new(
        "IELTS General".to_string(),
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        TimeSlot::Evening,
        SlotTimes::from_hm(18, 0, 20, 0),
        total,
        booked,
        reserved,
    )
}

#[test]
fn test_available_seats_総席数から予約と仮押さえを引いた値になること() {
    let session = session_with_counts(15, 4, 3);

    assert_eq!(available_seats(&session), 8);
    assert!(!is_full(&session));
}

#[test]
fn test_available_seats_ちょうど満席の場合() {
    let session = session_with_counts(10, 7, 3);

    assert_eq!(available_seats(&session), 0);
    assert!(is_full(&session));
}

#[test]
fn test_available_seats_不変条件が破れている場合は0に丸めること() {
    let session = session_with_counts(10, 8, 5);

    assert_eq!(available_seats(&session), 0);
    assert!(is_full(&session));
}

#[test]
fn test_check_capacity_不変条件が破れている場合はエラーを返す() {
    let session = session_with_counts(10, 8, 5);
    let actual = check_capacity(&session);

    let expected = CapacityInvariantViolated {
        id: session.get_id().clone(),
        total: 10,
        booked: 8,
        reserved: 5,
    };
    assert_eq!(actual, Err(expected));
}

#[test]
fn test_check_capacity_加算が溢れる場合もエラーを返す() {
    let session = session_with_counts(10, u32::MAX, 1);
    assert!(check_capacity(&session).is_err());
    assert_eq!(available_seats(&session), 0);
}
