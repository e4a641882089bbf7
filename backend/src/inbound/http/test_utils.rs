//! Test helpers for inbound HTTP components.

use actix_web::{App, web};

use crate::domain::Username;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::search_users;
use crate::middleware::Trace;

/// Build an app exposing the search route over `state`.
pub fn search_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(search_users)
}

/// Usernames from string literals.
pub fn usernames(raw: &[&str]) -> Vec<Username> {
    raw.iter()
        .map(|name| Username::new(*name).expect("valid username"))
        .collect()
}
