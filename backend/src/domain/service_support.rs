//! Mapping from port errors to domain errors shared by the services.

use crate::domain::Error;
use crate::domain::ports::{
    InquiryPersistenceError, OrderPersistenceError, PaymentGatewayError, UserPersistenceError,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_order_error(error: OrderPersistenceError) -> Error {
    match error {
        OrderPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderPersistenceError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
        OrderPersistenceError::Duplicate { order_id } => {
            Error::internal(format!("payment gateway reissued order id {order_id}"))
        }
    }
}

pub(crate) fn map_inquiry_error(error: InquiryPersistenceError) -> Error {
    match error {
        InquiryPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("inquiry repository unavailable: {message}"))
        }
        InquiryPersistenceError::Query { message } => {
            Error::internal(format!("inquiry repository error: {message}"))
        }
    }
}

/// Gateway failures surface as `payment_gateway`, carrying the collaborator's
/// wording through to the client.
pub(crate) fn map_gateway_error(error: PaymentGatewayError) -> Error {
    Error::payment_gateway(error.to_string())
}
