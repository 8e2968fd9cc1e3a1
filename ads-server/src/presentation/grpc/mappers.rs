use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use tonic::Status;

use crate::domain::ad::Ad;
use crate::domain::filter::AdFilter;
use crate::domain::user::User;
use crate::presentation::dates::parse_date;

use super::proto::{AdResponse, ListAdsRequest, ListAdsResponse, UserResponse};

pub(crate) fn to_domain_filter(input: ListAdsRequest) -> Result<AdFilter, Status> {
    let date = input
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|err| Status::invalid_argument(format!("date must be YYYY-MM-DD: {err}")))?;

    Ok(AdFilter {
        published: input.published,
        author_id: input.user_id,
        title: input.title,
        date,
    })
}

pub(crate) fn to_proto_ad(ad: Ad) -> AdResponse {
    AdResponse {
        id: ad.id,
        title: ad.title,
        text: ad.text,
        author_id: ad.author_id,
        published: ad.published,
        date_created: Some(to_proto_timestamp(ad.date_created)),
        date_changed: Some(to_proto_timestamp(ad.date_changed)),
    }
}

pub(crate) fn to_proto_ad_list(ads: Vec<Ad>) -> ListAdsResponse {
    ListAdsResponse {
        ads: ads.into_iter().map(to_proto_ad).collect(),
    }
}

pub(crate) fn to_proto_user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        nickname: user.nickname,
        email: user.email,
    }
}

fn to_proto_timestamp(value: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: value.timestamp(),
        nanos: value.timestamp_subsec_nanos() as i32,
    }
}
