use crate::application::generate_class_schedules::generate_class_schedules;
use crate::application::interface::BookingNotifierTrait;
use crate::application::submit_booking::{submit_booking, SubmitError};
use crate::entity::availability::is_full;
use crate::entity::booking_request::BookingRequest;
use crate::entity::calendar::{event_dates, sessions_on, CalendarWindow};
use crate::entity::class_schedule::{ClassSchedule, ScheduleId};
use crate::entity::contact::ContactFields;
use crate::entity::schedule_config::ScheduleConfig;
use crate::entity::selection::SelectionState;
use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

#[cfg(test)]
use crate::application::interface::{Acknowledgement, NotifyError};
#[cfg(test)]
use crate::entity::availability::available_seats;
#[cfg(test)]
use crate::entity::datetime::parse_date;
#[cfg(test)]
use crate::entity::time_slot::{SlotTimes, TimeSlot};
#[cfg(test)]
use chrono::{Datelike, Weekday};
#[cfg(test)]
use rand::rngs::mock::StepRng;
#[cfg(test)]
use rand::rngs::StdRng;
#[cfg(test)]
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("class schedule is still loading")]
    NotReady,

    #[error("{0} is outside the bookable calendar")]
    DateOutOfRange(NaiveDate),

    #[error("no class with id {0}")]
    UnknownSession(ScheduleId),

    #[error("class {0} is full")]
    SessionFull(ScheduleId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Schedules {
    // 生成が終わるまで日付・授業は選べない
    Loading,
    Ready(Vec<ClassSchedule>),
}

/// Everything one visit to the booking page owns: the generated sessions, the
/// bookable calendar window and the user's selection.
pub struct BookingDesk {
    config: ScheduleConfig,
    window: CalendarWindow,
    schedules: Schedules,
    selection: SelectionState,
}

impl BookingDesk {
    pub fn new(today: NaiveDate, config: ScheduleConfig) -> Self {
        let window = CalendarWindow::new(today, config.window_days);

        Self {
            config,
            window,
            schedules: Schedules::Loading,
            selection: SelectionState::new(today),
        }
    }

    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        if self.is_ready() {
            tracing::warn!("class schedules already generated for this visit, ignoring");
            return;
        }

        let schedules = generate_class_schedules(
            &self.config,
            self.config.window_days,
            self.window.get_from(),
            rng,
        );
        tracing::info!(sessions = schedules.len(), "class schedule ready");

        self.schedules = Schedules::Ready(schedules);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.schedules, Schedules::Ready(_))
    }

    pub fn get_window(&self) -> CalendarWindow {
        self.window
    }

    pub fn get_selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn all_sessions(&self) -> &[ClassSchedule] {
        match &self.schedules {
            Schedules::Loading => &[],
            Schedules::Ready(schedules) => schedules,
        }
    }

    pub fn event_dates(&self) -> BTreeSet<NaiveDate> {
        event_dates(self.all_sessions())
    }

    // 選択中の日付の授業。日付未選択なら空
    pub fn visible_sessions(&self) -> Vec<&ClassSchedule> {
        match self.selection.get_selected_date() {
            Some(date) => sessions_on(self.all_sessions(), date),
            None => vec![],
        }
    }

    pub fn session(&self, id: &ScheduleId) -> Option<&ClassSchedule> {
        self.all_sessions()
            .iter()
            .find(|session| session.get_id() == id)
    }

    pub fn selected_session(&self) -> Option<&ClassSchedule> {
        self.selection
            .get_selected_session()
            .and_then(|id| self.session(id))
    }

    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), SelectionError> {
        if !self.is_ready() {
            return Err(SelectionError::NotReady);
        }

        if !self.window.contains(date) {
            return Err(SelectionError::DateOutOfRange(date));
        }

        self.selection = self.selection.clone().choose_date(date);
        Ok(())
    }

    pub fn clear_date(&mut self) {
        self.selection = self.selection.clone().clear_date();
    }

    pub fn choose_session(&mut self, id: &ScheduleId) -> Result<(), SelectionError> {
        if !self.is_ready() {
            return Err(SelectionError::NotReady);
        }

        let session = self
            .session(id)
            .ok_or_else(|| SelectionError::UnknownSession(id.clone()))?;

        if is_full(session) {
            tracing::warn!(%id, "refusing to select a full class");
            return Err(SelectionError::SessionFull(id.clone()));
        }

        self.selection = self.selection.clone().choose_session(id.clone());
        tracing::info!(%id, "class selected");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.selection = self.selection.clone().reset();
    }

    pub fn submit(
        &mut self,
        contact: &ContactFields,
        notifier: &mut dyn BookingNotifierTrait,
    ) -> Result<BookingRequest, SubmitError> {
        let request = submit_booking(contact, &self.selection, notifier)?;
        self.reset();

        Ok(request)
    }
}

#[cfg(test)]
#[derive(Default)]
struct RecordingNotifier {
    received: Vec<BookingRequest>,
}

#[cfg(test)]
impl BookingNotifierTrait for RecordingNotifier {
    fn notify(&mut self, request: BookingRequest) -> Result<Acknowledgement, NotifyError> {
        self.received.push(request);
        Ok(Acknowledgement {
            title: "Booking Request Sent!".to_string(),
            description: "Thank you! We will contact you shortly to confirm.".to_string(),
        })
    }
}

#[cfg(test)]
fn ready_desk() -> BookingDesk {
    let mut desk = BookingDesk::new(parse_date("2024-01-01").unwrap(), ScheduleConfig::default());
    desk.generate(&mut StepRng::new(0, 0));
    desk
}

#[cfg(test)]
fn full_session_desk() -> (BookingDesk, ScheduleId) {
    let mut desk = ready_desk();
    let full = ClassSchedule::new(
        "IELTS General".to_string(),
        parse_date("2024-01-02").unwrap(),
        TimeSlot::Evening,
        SlotTimes::from_hm(18, 0, 20, 0),
        12,
        9,
        3,
    );
    let id = full.get_id().clone();
    if let Schedules::Ready(schedules) = &mut desk.schedules {
        schedules.push(full);
    }
    (desk, id)
}

#[cfg(test)]
fn jo_lee() -> ContactFields {
    ContactFields::new(
        "Jo Lee",
        "jo@example.com",
        None,
        "I would like to join this class please.",
    )
}

#[test]
fn test_generate_前は日付も授業も選べないこと() {
    let mut desk = BookingDesk::new(parse_date("2024-01-01").unwrap(), ScheduleConfig::default());

    assert!(!desk.is_ready());
    assert!(desk.event_dates().is_empty());
    assert!(desk.visible_sessions().is_empty());
    assert_eq!(
        desk.choose_date(parse_date("2024-01-02").unwrap()),
        Err(SelectionError::NotReady)
    );
    assert_eq!(
        desk.choose_session(&ScheduleId::from("ielts-intensive-2024-01-01-am")),
        Err(SelectionError::NotReady)
    );
}

#[test]
fn test_generate_2回目は無視されること() {
    let mut desk = ready_desk();
    let before = desk.all_sessions().to_vec();

    desk.generate(&mut StdRng::seed_from_u64(1));

    assert_eq!(desk.all_sessions(), before.as_slice());
}

#[test]
fn test_visible_sessions_選択中の日付の授業のみ返すこと() {
    let mut desk = ready_desk();
    let today = parse_date("2024-01-01").unwrap();

    assert!(!desk.visible_sessions().is_empty());
    assert!(desk.visible_sessions().iter().all(|s| s.get_date() == today));

    desk.clear_date();
    assert!(desk.visible_sessions().is_empty());
}

#[test]
fn test_choose_date_カレンダーの範囲外は選べないこと() {
    let mut desk = ready_desk();
    let too_late = parse_date("2024-02-16").unwrap();

    assert_eq!(
        desk.choose_date(too_late),
        Err(SelectionError::DateOutOfRange(too_late))
    );
    assert_eq!(desk.get_selection().get_selected_date(), parse_date("2024-01-01"));

    let last_day = parse_date("2024-02-15").unwrap();
    assert_eq!(desk.choose_date(last_day), Ok(()));
    assert!(desk.visible_sessions().is_empty());
}

#[test]
fn test_choose_session_満席の授業は選べないこと() {
    let (mut desk, full_id) = full_session_desk();

    assert_eq!(
        desk.choose_session(&full_id),
        Err(SelectionError::SessionFull(full_id.clone()))
    );
    assert_eq!(desk.get_selection().get_selected_session(), None);
}

#[test]
fn test_choose_session_存在しない授業は選べないこと() {
    let mut desk = ready_desk();
    let id = ScheduleId::from("cambridge-b2-2024-01-01-am");

    assert_eq!(
        desk.choose_session(&id),
        Err(SelectionError::UnknownSession(id.clone()))
    );
}

#[test]
fn test_choose_session_どの到達可能な状態でも満席の授業は選択されていないこと() {
    let (mut desk, _) = full_session_desk();
    let ids: Vec<ScheduleId> = desk
        .all_sessions()
        .iter()
        .map(|s| s.get_id().clone())
        .collect();

    for id in ids.iter() {
        let _ = desk.choose_session(id);
        if let Some(selected) = desk.selected_session() {
            assert!(!is_full(selected));
        }
    }
}

#[test]
fn test_choose_date_他の日付を見ても選択中の授業は残ること() {
    let mut desk = ready_desk();
    let id = desk.visible_sessions()[0].get_id().clone();
    desk.choose_session(&id).unwrap();

    desk.choose_date(parse_date("2024-01-09").unwrap()).unwrap();

    assert_eq!(desk.selected_session().map(|s| s.get_id()), Some(&id));
}

#[test]
fn test_reset_授業の選択のみ解除されること() {
    let mut desk = ready_desk();
    let date = parse_date("2024-01-03").unwrap();
    desk.choose_date(date).unwrap();
    let id = desk.visible_sessions()[0].get_id().clone();
    desk.choose_session(&id).unwrap();

    desk.reset();

    assert_eq!(desk.get_selection().get_selected_session(), None);
    assert_eq!(desk.get_selection().get_selected_date(), Some(date));
}

#[test]
fn test_submit_45日分を生成して最初の空き授業を予約する一連の流れ() {
    let reference = parse_date("2024-01-01").unwrap();
    let mut desk = BookingDesk::new(reference, ScheduleConfig::default());
    desk.generate(&mut StdRng::seed_from_u64(2024));

    let sessions = desk.all_sessions();
    let last_date = parse_date("2024-01-23").unwrap();
    let mut date = reference;
    while date <= last_date {
        let on_date = sessions_on(sessions, date);
        if date.weekday() == Weekday::Sun {
            assert!(on_date.is_empty());
        } else {
            // 1日あたり2回の試行なので最大2件
            assert!(on_date.len() <= 2);
        }
        date = date.succ_opt().unwrap();
    }

    let first_available = sessions
        .iter()
        .find(|session| available_seats(session) > 0)
        .map(|session| session.get_id().clone())
        .unwrap();
    desk.choose_session(&first_available).unwrap();

    let mut notifier = RecordingNotifier::default();
    let request = desk.submit(&jo_lee(), &mut notifier).unwrap();

    assert_eq!(request.get_session_id(), &first_available);
    assert_eq!(notifier.received.len(), 1);
    assert_eq!(desk.get_selection().get_selected_session(), None);
    assert_eq!(desk.get_selection().get_selected_date(), Some(reference));
}

#[test]
fn test_submit_失敗した場合は選択が残ること() {
    let mut desk = ready_desk();
    let id = desk.visible_sessions()[0].get_id().clone();
    desk.choose_session(&id).unwrap();

    let contact = ContactFields {
        name: "A".to_string(),
        ..jo_lee()
    };
    let mut notifier = RecordingNotifier::default();

    assert!(desk.submit(&contact, &mut notifier).is_err());
    assert!(notifier.received.is_empty());
    assert_eq!(desk.get_selection().get_selected_session(), Some(&id));
}

#[test]
#[allow(non_snake_case)]
fn test_submit_授業未選択ならMissingSelectionになること() {
    let mut desk = ready_desk();
    let mut notifier = RecordingNotifier::default();

    let err = desk.submit(&jo_lee(), &mut notifier).unwrap_err();

    assert!(err.is_missing_selection());
    assert!(notifier.received.is_empty());
}
