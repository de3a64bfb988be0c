use crate::application::interface::{Acknowledgement, BookingNotifierTrait, NotifyError};
use crate::entity::booking_request::BookingRequest;

#[cfg(test)]
use crate::entity::class_schedule::ScheduleId;
#[cfg(test)]
use crate::entity::contact::ContactFields;

pub const ACK_TITLE: &str = "Booking Request Sent!";
pub const ACK_DESCRIPTION: &str = "Thank you! We will contact you shortly to confirm.";

// 予約リクエストをログに書き出すだけの通知先。送信済みの件数を数える
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: usize,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self { sent: 0 }
    }

    pub fn get_sent(&self) -> usize {
        self.sent
    }
}

impl BookingNotifierTrait for LogNotifier {
    fn notify(&mut self, request: BookingRequest) -> Result<Acknowledgement, NotifyError> {
        let contact = request.get_contact();

        tracing::info!(
            request_id = %request.get_request_id(),
            course_id = %request.get_session_id(),
            name = %contact.name,
            email = %contact.email,
            phone = contact.phone.as_deref().unwrap_or(""),
            message = %contact.message,
            "Booking Request"
        );
        self.sent += 1;

        Ok(Acknowledgement {
            title: ACK_TITLE.to_string(),
            description: ACK_DESCRIPTION.to_string(),
        })
    }
}

#[test]
fn test_notify_常に受け付けて件数が増えること() {
    let mut notifier = LogNotifier::new();
    let request = BookingRequest::new(
        ScheduleId::from("pte-academic-2024-01-02-pm"),
        ContactFields::new("Jo Lee", "jo@example.com", None, "Looking forward to it."),
    );

    let ack = notifier.notify(request.clone()).unwrap();
    notifier.notify(request).unwrap();

    assert_eq!(ack.title, ACK_TITLE);
    assert_eq!(ack.description, ACK_DESCRIPTION);
    assert_eq!(notifier.get_sent(), 2);
}
