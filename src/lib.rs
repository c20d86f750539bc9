#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpResponse, HttpServer, ResponseError, error, middleware, web};

#[cfg(feature = "server")]
use crate::dto::api::ApiResponse;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::notifications::Notice;
#[cfg(feature = "server")]
use crate::remote::backend::Backend;
#[cfg(feature = "server")]
use crate::routes::activities::{
    add_activity, delete_activity, delete_selected_activities, list_activities, save_activity,
    show_activity,
};
#[cfg(feature = "server")]
use crate::routes::companies::{
    add_company, delete_company, delete_selected_companies, list_companies, save_company,
    show_company,
};
#[cfg(feature = "server")]
use crate::routes::contacts::{
    add_contact, contact_activities, contact_deals, delete_contact, delete_selected_contacts,
    list_contacts, save_contact, save_contact_status, show_contact,
};
#[cfg(feature = "server")]
use crate::routes::deals::{
    add_deal, delete_deal, delete_selected_deals, list_deals, save_deal, show_deal,
};
#[cfg(feature = "server")]
use crate::routes::reports::show_analytics;

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod notifications;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod remote;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Turns extractor failures into the API body with a single error notice.
#[cfg(feature = "server")]
fn bad_request<E>(err: E) -> actix_web::Error
where
    E: ResponseError + 'static,
{
    log::warn!("Malformed request: {err}");
    let body = ApiResponse::<()>::new(None, vec![Notice::error(err.to_string())]);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Registers the `/api/v1` endpoints. Expects `web::Data<Backend>` and
/// `web::Data<ServerConfig>` in the app data.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api/v1")
                .service(list_companies)
                .service(add_company)
                .service(delete_selected_companies)
                .service(show_company)
                .service(save_company)
                .service(delete_company)
                .service(list_contacts)
                .service(add_contact)
                .service(delete_selected_contacts)
                .service(contact_deals)
                .service(contact_activities)
                .service(save_contact_status)
                .service(show_contact)
                .service(save_contact)
                .service(delete_contact)
                .service(list_deals)
                .service(add_deal)
                .service(delete_selected_deals)
                .service(show_deal)
                .service(save_deal)
                .service(delete_deal)
                .service(list_activities)
                .service(add_activity)
                .service(delete_selected_activities)
                .service(show_activity)
                .service(save_activity)
                .service(delete_activity)
                .service(show_analytics),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = Backend::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build remote client: {e}")))?;
    let backend = web::Data::new(backend);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving CRM API on {}:{} with the {:?} backend",
        server_config.address,
        server_config.port,
        server_config.backend
    );
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(backend.clone())
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
