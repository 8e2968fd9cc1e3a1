use axum::Router;

use crate::presentation::AppState;

pub(crate) mod ads;
pub(crate) mod users;

pub(crate) fn router() -> Router<AppState> {
    let api = Router::new().merge(ads::router()).merge(users::router());

    Router::new().nest("/api/v1", api)
}
