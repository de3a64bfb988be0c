use crate::entity::booking_request::BookingRequest;
use thiserror::Error;

// 通知先が受け付けたことを示す。トースト表示用の文言を持つ
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acknowledgement {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("booking request was not accepted: {reason}")]
pub struct NotifyError {
    pub reason: String,
}

pub trait BookingNotifierTrait {
    fn notify(&mut self, request: BookingRequest) -> Result<Acknowledgement, NotifyError>;
}
