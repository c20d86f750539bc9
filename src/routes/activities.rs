use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::dto::api::ListParams;
use crate::forms::DeleteForm;
use crate::forms::activity::{AddActivityForm, SaveActivityForm};
use crate::models::config::ServerConfig;
use crate::notifications::NoticeLog;
use crate::remote::backend::Backend;
use crate::routes::{repository, respond, service_response};
use crate::services::activities::{
    create_activity, delete_activities, get_activity, load_activities_page, update_activity,
};

#[get("/activities")]
pub async fn list_activities(
    params: web::Query<ListParams>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let page = load_activities_page(&repo, params.into_inner(), config.page_size).await;
    respond(StatusCode::OK, Some(page), &notices)
}

#[get("/activities/{activity_id}")]
pub async fn show_activity(
    activity_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = get_activity(&repo, activity_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/activities")]
pub async fn add_activity(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<AddActivityForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = create_activity(&repo, &notices, form).await;
    service_response(result, StatusCode::CREATED, &notices)
}

#[patch("/activities/{activity_id}")]
pub async fn save_activity(
    activity_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveActivityForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = update_activity(&repo, &notices, activity_id.into_inner(), form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[delete("/activities/{activity_id}")]
pub async fn delete_activity(
    activity_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);
    let form = DeleteForm {
        ids: vec![activity_id.into_inner()],
    };

    let result = delete_activities(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/activities/delete")]
pub async fn delete_selected_activities(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<DeleteForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = delete_activities(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}
