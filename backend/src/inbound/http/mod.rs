//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod exercises;
pub mod health;
pub mod landing;
pub mod payload;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;

/// Register the `/api` users and exercises resources.
///
/// Unmatched paths and methods under `/api` answer with a JSON `not_found`
/// error.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::api_routes;
///
/// let _app = App::new().configure(api_routes);
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(users::create_user)
            .service(users::list_users)
            .service(exercises::add_exercise)
            .service(exercises::exercise_log)
            .default_service(web::to(unknown_api_route)),
    );
}

async fn unknown_api_route(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}
