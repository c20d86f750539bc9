use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::dto::api::ListParams;
use crate::forms::DeleteForm;
use crate::forms::contact::{AddContactForm, ContactStatusForm, SaveContactForm};
use crate::models::config::ServerConfig;
use crate::notifications::NoticeLog;
use crate::remote::backend::Backend;
use crate::routes::{repository, respond, service_response};
use crate::services::activities::contact_timeline;
use crate::services::contacts::{
    change_contact_status, create_contact, delete_contacts, get_contact, load_contacts_page,
    update_contact,
};
use crate::services::deals::list_contact_deals;

#[get("/contacts")]
pub async fn list_contacts(
    params: web::Query<ListParams>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let page = load_contacts_page(&repo, params.into_inner(), config.page_size).await;
    respond(StatusCode::OK, Some(page), &notices)
}

#[get("/contacts/{contact_id}")]
pub async fn show_contact(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = get_contact(&repo, contact_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[get("/contacts/{contact_id}/deals")]
pub async fn contact_deals(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = list_contact_deals(&repo, contact_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[get("/contacts/{contact_id}/activities")]
pub async fn contact_activities(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = contact_timeline(&repo, contact_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/contacts")]
pub async fn add_contact(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<AddContactForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = create_contact(&repo, &notices, form).await;
    service_response(result, StatusCode::CREATED, &notices)
}

#[patch("/contacts/{contact_id}")]
pub async fn save_contact(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveContactForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = update_contact(&repo, &notices, contact_id.into_inner(), form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[patch("/contacts/{contact_id}/status")]
pub async fn save_contact_status(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<ContactStatusForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = change_contact_status(&repo, &notices, contact_id.into_inner(), form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[delete("/contacts/{contact_id}")]
pub async fn delete_contact(
    contact_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);
    let form = DeleteForm {
        ids: vec![contact_id.into_inner()],
    };

    let result = delete_contacts(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/contacts/delete")]
pub async fn delete_selected_contacts(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<DeleteForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = delete_contacts(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}
