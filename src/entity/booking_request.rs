use crate::entity::class_schedule::ScheduleId;
use crate::entity::contact::ContactFields;
use uuid::Uuid;

// 通知先に渡した時点で所有権ごと手放す。保存はしない
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    request_id: Uuid,
    session_id: ScheduleId,
    contact: ContactFields,
}

impl BookingRequest {
    pub fn new(session_id: ScheduleId, contact: ContactFields) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            session_id,
            contact,
        }
    }

    pub fn get_request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn get_session_id(&self) -> &ScheduleId {
        &self.session_id
    }

    pub fn get_contact(&self) -> &ContactFields {
        &self.contact
    }
}

#[test]
fn test_new_リクエストごとに異なるidが振られること() {
    let contact = ContactFields::new("Jo Lee", "jo@example.com", None, "See you in class soon.");
    let session_id = ScheduleId::from("ielts-intensive-2024-01-01-am");

    let a = BookingRequest::new(session_id.clone(), contact.clone());
    let b = BookingRequest::new(session_id.clone(), contact);

    assert_ne!(a.get_request_id(), b.get_request_id());
    assert_eq!(a.get_session_id(), &session_id);
    assert_eq!(a.get_contact().name, "Jo Lee");
}
