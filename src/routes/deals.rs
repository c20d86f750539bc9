use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::dto::api::ListParams;
use crate::forms::DeleteForm;
use crate::forms::deal::{AddDealForm, SaveDealForm};
use crate::models::config::ServerConfig;
use crate::notifications::NoticeLog;
use crate::remote::backend::Backend;
use crate::routes::{repository, respond, service_response};
use crate::services::deals::{create_deal, delete_deals, get_deal, load_deals_page, update_deal};

#[get("/deals")]
pub async fn list_deals(
    params: web::Query<ListParams>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let page = load_deals_page(&repo, params.into_inner(), config.page_size).await;
    respond(StatusCode::OK, Some(page), &notices)
}

#[get("/deals/{deal_id}")]
pub async fn show_deal(
    deal_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = get_deal(&repo, deal_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/deals")]
pub async fn add_deal(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<AddDealForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = create_deal(&repo, &notices, form).await;
    service_response(result, StatusCode::CREATED, &notices)
}

#[patch("/deals/{deal_id}")]
pub async fn save_deal(
    deal_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveDealForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = update_deal(&repo, &notices, deal_id.into_inner(), form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[delete("/deals/{deal_id}")]
pub async fn delete_deal(
    deal_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);
    let form = DeleteForm {
        ids: vec![deal_id.into_inner()],
    };

    let result = delete_deals(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/deals/delete")]
pub async fn delete_selected_deals(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<DeleteForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = delete_deals(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}
