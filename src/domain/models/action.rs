use super::ConfirmAnswer;
use crate::domain::services::PendingExchange;
use crate::domain::services::PendingUpload;

#[derive(Debug)]
pub enum Action {
    CreateSession(),
    NewSession(ConfirmAnswer),
    SendMessage(PendingExchange),
    UploadDocument(PendingUpload),
}
