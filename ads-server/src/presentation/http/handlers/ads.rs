use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::filter::AdFilter;
use crate::presentation::AppState;
use crate::presentation::dates::{format_date_time, parse_date};
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::envelope::Envelope;
use crate::presentation::http::extract::{AppPath, AppQuery, ValidJson};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateAdDto {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ChangeAdStatusDto {
    pub(crate) published: bool,
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateAdDto {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteAdQuery {
    pub(crate) user_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListAdsQuery {
    pub(crate) published: Option<bool>,
    pub(crate) user_id: Option<i64>,
    pub(crate) date: Option<String>,
    pub(crate) title: Option<String>,
}

impl ListAdsQuery {
    fn into_filter(self) -> AppResult<AdFilter> {
        let date = self
            .date
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(|err| AppError::BadRequest(format!("date must be YYYY-MM-DD: {err}")))?;

        Ok(AdFilter {
            published: self.published,
            author_id: self.user_id,
            title: self.title,
            date,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AdDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) author_id: i64,
    pub(crate) published: bool,
    pub(crate) date_created: String,
    pub(crate) date_changed: String,
}

impl From<Ad> for AdDto {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            text: ad.text,
            author_id: ad.author_id,
            published: ad.published,
            date_created: format_date_time(ad.date_created),
            date_changed: format_date_time(ad.date_changed),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/ads",
    tag = "ads",
    request_body = CreateAdDto,
    responses(
        (status = 200, description = "Ad created", body = AdDto),
        (status = 400, description = "Validation error"),
        (status = 424, description = "Author does not exist")
    )
)]
pub(crate) async fn create_ad(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CreateAdDto>,
) -> AppResult<(StatusCode, Json<Envelope<AdDto>>)> {
    let ad = state
        .ad_service
        .create_ad(dto.title, dto.text, dto.user_id)
        .await
        .map_err(|err| match err {
            DomainError::UserNotFound(_) => AppError::FailedDependency(err),
            other => AppError::Domain(other),
        })?;

    Ok((StatusCode::OK, Json(Envelope::data(AdDto::from(ad)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/ads/{ad_id}/status",
    tag = "ads",
    params(
        ("ad_id" = i64, Path, description = "Ad id")
    ),
    request_body = ChangeAdStatusDto,
    responses(
        (status = 200, description = "Status changed", body = AdDto),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Ad not found")
    )
)]
pub(crate) async fn change_ad_status(
    State(state): State<AppState>,
    AppPath(ad_id): AppPath<i64>,
    ValidJson(dto): ValidJson<ChangeAdStatusDto>,
) -> AppResult<(StatusCode, Json<Envelope<AdDto>>)> {
    let ad = state
        .ad_service
        .change_ad_status(ad_id, dto.user_id, dto.published)
        .await?;

    Ok((StatusCode::OK, Json(Envelope::data(AdDto::from(ad)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/ads/{ad_id}",
    tag = "ads",
    params(
        ("ad_id" = i64, Path, description = "Ad id")
    ),
    request_body = UpdateAdDto,
    responses(
        (status = 200, description = "Ad updated", body = AdDto),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Ad not found")
    )
)]
pub(crate) async fn update_ad(
    State(state): State<AppState>,
    AppPath(ad_id): AppPath<i64>,
    ValidJson(dto): ValidJson<UpdateAdDto>,
) -> AppResult<(StatusCode, Json<Envelope<AdDto>>)> {
    let ad = state
        .ad_service
        .update_ad(ad_id, dto.user_id, dto.title, dto.text)
        .await?;

    Ok((StatusCode::OK, Json(Envelope::data(AdDto::from(ad)))))
}

#[utoipa::path(
    get,
    path = "/api/v1/ads/{ad_id}",
    tag = "ads",
    params(
        ("ad_id" = i64, Path, description = "Ad id")
    ),
    responses(
        (status = 200, description = "Ad found", body = AdDto),
        (status = 404, description = "Ad not found")
    )
)]
pub(crate) async fn get_ad(
    State(state): State<AppState>,
    AppPath(ad_id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Envelope<AdDto>>)> {
    let ad = state.ad_service.get_ad(ad_id).await?;

    Ok((StatusCode::OK, Json(Envelope::data(AdDto::from(ad)))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ads/{ad_id}",
    tag = "ads",
    params(
        ("ad_id" = i64, Path, description = "Ad id"),
        ("user_id" = i64, Query, description = "Id of the caller, must be the author")
    ),
    responses(
        (status = 200, description = "Ad deleted"),
        (status = 400, description = "user_id missing"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Ad not found")
    )
)]
pub(crate) async fn delete_ad(
    State(state): State<AppState>,
    AppPath(ad_id): AppPath<i64>,
    AppQuery(query): AppQuery<DeleteAdQuery>,
) -> AppResult<(StatusCode, Json<Envelope<()>>)> {
    state.ad_service.delete_ad(ad_id, query.user_id).await?;

    Ok((StatusCode::OK, Json(Envelope::empty())))
}

#[utoipa::path(
    get,
    path = "/api/v1/ads",
    tag = "ads",
    params(
        ("published" = Option<bool>, Query, description = "Publication state"),
        ("user_id" = Option<i64>, Query, description = "Author id"),
        ("date" = Option<String>, Query, description = "Creation date, YYYY-MM-DD (UTC)"),
        ("title" = Option<String>, Query, description = "Exact title")
    ),
    responses(
        (status = 200, description = "Ads listed; only published ads when no filter is given", body = [AdDto]),
        (status = 400, description = "Malformed filter")
    )
)]
pub(crate) async fn list_ads(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListAdsQuery>,
) -> AppResult<(StatusCode, Json<Envelope<Vec<AdDto>>>)> {
    let filter = query.into_filter()?;
    let ads = state.ad_service.list_ads(filter).await?;

    let ads = ads.into_iter().map(AdDto::from).collect();
    Ok((StatusCode::OK, Json(Envelope::data(ads))))
}
