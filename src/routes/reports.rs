use actix_web::http::StatusCode;
use actix_web::{Responder, get, web};
use chrono::Utc;

use crate::dto::reports::{AnalyticsParams, Timeframe};
use crate::models::config::ServerConfig;
use crate::notifications::NoticeLog;
use crate::remote::backend::Backend;
use crate::routes::{repository, respond};
use crate::services::reports::load_analytics;

#[get("/reports/analytics")]
pub async fn show_analytics(
    params: web::Query<AnalyticsParams>,
    client: web::Data<Backend>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let notices = NoticeLog::new();
    let repo = repository(&client, &config, &notices);
    let timeframe = params
        .timeframe
        .as_deref()
        .map(Timeframe::from)
        .unwrap_or_default();

    let analytics = load_analytics(&repo, timeframe, Utc::now()).await;
    respond(StatusCode::OK, Some(analytics), &notices)
}
