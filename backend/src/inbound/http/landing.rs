//! Static landing page with forms for the users and exercises endpoints.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

const INDEX_HTML: &str = include_str!("../../../views/index.html");

/// Serve the landing page.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
