use axum::Router;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::ads::{
    change_ad_status, create_ad, delete_ad, get_ad, list_ads, update_ad,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/ads", post(create_ad).get(list_ads))
        .route("/ads/{ad_id}", get(get_ad).put(update_ad).delete(delete_ad))
        .route("/ads/{ad_id}/status", put(change_ad_status))
}
