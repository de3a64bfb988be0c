use crate::application::interface::{BookingNotifierTrait, NotifyError};
use crate::entity::booking_request::BookingRequest;
use crate::entity::contact::{ContactFields, FieldError};
use crate::entity::selection::SelectionState;
use thiserror::Error;

#[cfg(test)]
use crate::application::interface::Acknowledgement;
#[cfg(test)]
use crate::entity::class_schedule::ScheduleId;
#[cfg(test)]
use crate::entity::datetime::parse_date;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),

    // 特定の欄ではなくフォーム全体への案内として表示する
    #[error("Please select a class from the calendar above.")]
    MissingSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("booking request rejected with {} validation error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    NotDelivered(#[from] NotifyError),
}

impl SubmitError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SubmitError::Invalid(errors) => errors,
            SubmitError::NotDelivered(_) => &[],
        }
    }

    pub fn is_missing_selection(&self) -> bool {
        self.validation_errors()
            .contains(&ValidationError::MissingSelection)
    }
}

/// Validates the contact fields and the selection and hands the resulting
/// booking request to the notifier.
///
/// Field errors come first, in form order, followed by `MissingSelection` when
/// no session is chosen. Nothing reaches the notifier unless every check
/// passes. On `Ok` the caller is expected to reset the selection and clear the
/// form; on `NotDelivered` it keeps both so the user can retry.
pub fn submit_booking(
    contact: &ContactFields,
    selection: &SelectionState,
    notifier: &mut dyn BookingNotifierTrait,
) -> Result<BookingRequest, SubmitError> {
    let mut errors: Vec<ValidationError> = contact
        .validate()
        .into_iter()
        .map(ValidationError::from)
        .collect();

    let session_id = selection.get_selected_session();
    if session_id.is_none() {
        errors.push(ValidationError::MissingSelection);
    }

    let session_id = match session_id {
        Some(session_id) if errors.is_empty() => session_id.clone(),
        _ => {
            tracing::debug!(?errors, "booking request rejected");
            return Err(SubmitError::Invalid(errors));
        }
    };

    let request = BookingRequest::new(session_id, contact.clone());
    let ack = notifier.notify(request.clone())?;

    tracing::info!(
        request_id = %request.get_request_id(),
        session_id = %request.get_session_id(),
        title = %ack.title,
        "booking request accepted"
    );

    Ok(request)
}

#[cfg(test)]
#[derive(Default)]
struct RecordingNotifier {
    received: Vec<BookingRequest>,
    refuse: bool,
}

#[cfg(test)]
impl BookingNotifierTrait for RecordingNotifier {
    fn notify(&mut self, request: BookingRequest) -> Result<Acknowledgement, NotifyError> {
        if self.refuse {
            return Err(NotifyError {
                reason: "offline".to_string(),
            });
        }

        self.received.push(request);
        Ok(Acknowledgement {
            title: "Booking Request Sent!".to_string(),
            description: "Thank you!".to_string(),
        })
    }
}

#[cfg(test)]
fn valid_contact() -> ContactFields {
    ContactFields::new(
        "Jo Lee",
        "jo@example.com",
        Some("0400 000 000"),
        "I would like to join this class please.",
    )
}

#[cfg(test)]
fn selection_with_session() -> SelectionState {
    SelectionState::new(parse_date("2024-01-01").unwrap())
        .choose_session(ScheduleId::from("ielts-intensive-2024-01-01-am"))
}

#[test]
fn test_submit_booking_正常系() {
    let mut notifier = RecordingNotifier::default();
    let request = submit_booking(&valid_contact(), &selection_with_session(), &mut notifier).unwrap();

    assert_eq!(
        request.get_session_id().as_str(),
        "ielts-intensive-2024-01-01-am"
    );
    assert_eq!(request.get_contact(), &valid_contact());
    assert_eq!(notifier.received, vec![request]);
}

#[test]
#[allow(non_snake_case)]
fn test_submit_booking_授業未選択ならMissingSelectionになること() {
    let mut notifier = RecordingNotifier::default();
    let selection = SelectionState::new(parse_date("2024-01-01").unwrap());

    let actual = submit_booking(&valid_contact(), &selection, &mut notifier);

    assert_eq!(
        actual,
        Err(SubmitError::Invalid(vec![ValidationError::MissingSelection]))
    );
    assert!(notifier.received.is_empty());
}

#[test]
#[allow(non_snake_case)]
fn test_submit_booking_入力が不正でも授業未選択ならMissingSelectionが含まれること() {
    let mut notifier = RecordingNotifier::default();
    let contact = ContactFields::new("A", "not-an-email", None, "short");

    let err = submit_booking(&contact, &SelectionState::default(), &mut notifier).unwrap_err();

    assert!(err.is_missing_selection());
    assert_eq!(
        err.validation_errors(),
        &[
            ValidationError::Field(FieldError::Name),
            ValidationError::Field(FieldError::Email),
            ValidationError::Field(FieldError::Message),
            ValidationError::MissingSelection,
        ]
    );
}

#[test]
fn test_submit_booking_名前が1文字なら通知しないこと() {
    let mut notifier = RecordingNotifier::default();
    let contact = ContactFields {
        name: "A".to_string(),
        ..valid_contact()
    };

    let err = submit_booking(&contact, &selection_with_session(), &mut notifier).unwrap_err();

    assert_eq!(err.validation_errors(), &[ValidationError::Field(FieldError::Name)]);
    assert!(notifier.received.is_empty());
}

#[test]
fn test_submit_booking_メールアドレスが不正なら通知しないこと() {
    let mut notifier = RecordingNotifier::default();
    let contact = ContactFields {
        email: "not-an-email".to_string(),
        ..valid_contact()
    };

    let err = submit_booking(&contact, &selection_with_session(), &mut notifier).unwrap_err();

    assert_eq!(err.validation_errors(), &[ValidationError::Field(FieldError::Email)]);
    assert!(!err.is_missing_selection());
    assert!(notifier.received.is_empty());
}

#[test]
fn test_submit_booking_通知先が受け付けなかった場合() {
    let mut notifier = RecordingNotifier {
        refuse: true,
        ..RecordingNotifier::default()
    };

    let err = submit_booking(&valid_contact(), &selection_with_session(), &mut notifier).unwrap_err();

    assert!(matches!(err, SubmitError::NotDelivered(_)));
    assert!(err.validation_errors().is_empty());
}
