use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::dto::api::ListParams;
use crate::forms::DeleteForm;
use crate::forms::company::{AddCompanyForm, SaveCompanyForm};
use crate::models::config::ServerConfig;
use crate::notifications::NoticeLog;
use crate::remote::backend::Backend;
use crate::routes::{repository, respond, service_response};
use crate::services::companies::{
    create_company, delete_companies, get_company, load_companies_page, update_company,
};

#[get("/companies")]
pub async fn list_companies(
    params: web::Query<ListParams>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let page = load_companies_page(&repo, params.into_inner(), config.page_size).await;
    respond(StatusCode::OK, Some(page), &notices)
}

#[get("/companies/{company_id}")]
pub async fn show_company(
    company_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = get_company(&repo, company_id.into_inner()).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/companies")]
pub async fn add_company(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<AddCompanyForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = create_company(&repo, &notices, form).await;
    service_response(result, StatusCode::CREATED, &notices)
}

#[patch("/companies/{company_id}")]
pub async fn save_company(
    company_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveCompanyForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = update_company(&repo, &notices, company_id.into_inner(), form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[delete("/companies/{company_id}")]
pub async fn delete_company(
    company_id: web::Path<i32>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);
    let form = DeleteForm {
        ids: vec![company_id.into_inner()],
    };

    let result = delete_companies(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}

#[post("/companies/delete")]
pub async fn delete_selected_companies(
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<DeleteForm>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);

    let result = delete_companies(&repo, &notices, form).await;
    service_response(result, StatusCode::OK, &notices)
}
