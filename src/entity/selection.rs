use crate::entity::class_schedule::ScheduleId;
use chrono::NaiveDate;

#[cfg(test)]
use crate::entity::datetime::parse_date;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionStage {
    NoDateChosen,
    DateChosen,
    // 日付の選択を外した後も授業の選択は残る
    SessionChosen,
    DateAndSessionChosen,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    ChooseDate(NaiveDate),
    ClearDate,
    ChooseSession(ScheduleId),
    Reset,
}

/// The user's in-progress choice of date and session for one visit.
///
/// Transitions never validate the session against seat availability; callers
/// check [`crate::entity::availability::is_full`] before choosing a session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected_date: Option<NaiveDate>,
    selected_session: Option<ScheduleId>,
}

impl SelectionState {
    // 訪問開始時は「今日」が選ばれている
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: Some(today),
            selected_session: None,
        }
    }

    pub fn get_selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn get_selected_session(&self) -> Option<&ScheduleId> {
        self.selected_session.as_ref()
    }

    pub fn stage(&self) -> SelectionStage {
        match (&self.selected_date, &self.selected_session) {
            (None, None) => SelectionStage::NoDateChosen,
            (Some(_), None) => SelectionStage::DateChosen,
            (None, Some(_)) => SelectionStage::SessionChosen,
            (Some(_), Some(_)) => SelectionStage::DateAndSessionChosen,
        }
    }

    pub fn reduce(self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::ChooseDate(date) => Self {
                selected_date: Some(date),
                ..self
            },
            SelectionAction::ClearDate => Self {
                selected_date: None,
                ..self
            },
            SelectionAction::ChooseSession(id) => Self {
                selected_session: Some(id),
                ..self
            },
            SelectionAction::Reset => Self {
                selected_session: None,
                ..self
            },
        }
    }

    pub fn choose_date(self, date: NaiveDate) -> Self {
        self.reduce(SelectionAction::ChooseDate(date))
    }

    pub fn clear_date(self) -> Self {
        self.reduce(SelectionAction::ClearDate)
    }

    pub fn choose_session(self, id: ScheduleId) -> Self {
        self.reduce(SelectionAction::ChooseSession(id))
    }

    pub fn reset(self) -> Self {
        self.reduce(SelectionAction::Reset)
    }
}

#[test]
fn test_new_今日の日付が選択された状態で始まること() {
    let today = parse_date("2024-01-01").unwrap();
    let state = SelectionState::new(today);

    assert_eq!(state.get_selected_date(), Some(today));
    assert_eq!(state.get_selected_session(), None);
    assert_eq!(state.stage(), SelectionStage::DateChosen);
}

#[test]
fn test_default_何も選択されていない状態() {
    assert_eq!(SelectionState::default().stage(), SelectionStage::NoDateChosen);
}

#[test]
fn test_choose_date_同じ日付を2回選んでも状態は変わらないこと() {
    let date = parse_date("2024-01-05").unwrap();
    let once = SelectionState::default().choose_date(date);
    let twice = once.clone().choose_date(date);

    assert_eq!(once, twice);
}

#[test]
fn test_choose_date_選択中の授業は維持されること() {
    let id = ScheduleId::from("pte-academic-2024-01-02-am");
    let state = SelectionState::new(parse_date("2024-01-02").unwrap())
        .choose_session(id.clone())
        .choose_date(parse_date("2024-01-09").unwrap());

    assert_eq!(state.get_selected_session(), Some(&id));
    assert_eq!(state.get_selected_date(), parse_date("2024-01-09"));
    assert_eq!(state.stage(), SelectionStage::DateAndSessionChosen);
}

#[test]
fn test_clear_date_授業の選択は残ること() {
    let id = ScheduleId::from("pte-academic-2024-01-02-am");
    let state = SelectionState::new(parse_date("2024-01-02").unwrap())
        .choose_session(id.clone())
        .clear_date();

    assert_eq!(state.get_selected_date(), None);
    assert_eq!(state.get_selected_session(), Some(&id));
    assert_eq!(state.stage(), SelectionStage::SessionChosen);
}

#[test]
fn test_reset_授業の選択のみ解除され日付は残ること() {
    let date = parse_date("2024-01-03").unwrap();
    let state = SelectionState::new(date)
        .choose_session(ScheduleId::from("ielts-general-2024-01-03-pm"))
        .reset();

    assert_eq!(state.get_selected_session(), None);
    assert_eq!(state.get_selected_date(), Some(date));
}

#[test]
fn test_choose_session_後から選んだ授業で上書きされること() {
    let second = ScheduleId::from("toefl-workshop-2024-01-04-pm");
    let state = SelectionState::default()
        .choose_session(ScheduleId::from("ielts-general-2024-01-03-pm"))
        .choose_session(second.clone());

    assert_eq!(state.get_selected_session(), Some(&second));
}
