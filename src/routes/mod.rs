//! JSON endpoints of the CRM API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::dto::api::ApiResponse;
use crate::models::config::ServerConfig;
use crate::notifications::{Notice, NoticeLog, Notifier};
use crate::remote::backend::Backend;
use crate::repository::RemoteRepository;
use crate::services::{ServiceError, ServiceResult};

pub mod activities;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod reports;

/// Repository bound to the shared backend and the notices of one request.
pub(crate) fn repository<'a>(
    client: &'a web::Data<Backend>,
    config: &web::Data<ServerConfig>,
    notices: &'a NoticeLog,
) -> RemoteRepository<'a, Backend, NoticeLog> {
    RemoteRepository::new(client.get_ref(), notices).with_delete_policy(config.delete_policy)
}

/// Wraps `data` and the collected notices into the response body.
pub(crate) fn respond<T: Serialize>(
    status: StatusCode,
    data: Option<T>,
    notices: &NoticeLog,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::new(data, notices.take()))
}

/// Maps a service outcome to the response, raising a notice for errors the
/// backend did not already report.
pub(crate) fn service_response<T: Serialize>(
    result: ServiceResult<T>,
    success: StatusCode,
    notices: &NoticeLog,
) -> HttpResponse {
    let err = match result {
        Ok(data) => return respond(success, Some(data), notices),
        Err(err) => err,
    };

    let status = match &err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            log::warn!("Rejected form: {message}");
            notices.notify(Notice::error(message.clone()));
            StatusCode::BAD_REQUEST
        }
        ServiceError::NotFound => {
            if notices.is_empty() {
                notices.notify(Notice::error("Record not found"));
            }
            StatusCode::NOT_FOUND
        }
        ServiceError::Rejected(message) => {
            log::error!("{message}");
            StatusCode::BAD_GATEWAY
        }
    };
    respond::<T>(status, None, notices)
}
