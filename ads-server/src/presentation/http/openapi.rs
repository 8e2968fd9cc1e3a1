use utoipa::OpenApi;

use crate::presentation::http::handlers::ads::{
    AdDto, ChangeAdStatusDto, CreateAdDto, UpdateAdDto,
};
use crate::presentation::http::handlers::users::{CreateUserDto, UpdateUserDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Classified ads API",
        description = "Responses are wrapped as {\"data\": ..., \"error\": ...}; the documented body is the data payload."
    ),
    paths(
        crate::presentation::http::handlers::ads::create_ad,
        crate::presentation::http::handlers::ads::change_ad_status,
        crate::presentation::http::handlers::ads::update_ad,
        crate::presentation::http::handlers::ads::get_ad,
        crate::presentation::http::handlers::ads::delete_ad,
        crate::presentation::http::handlers::ads::list_ads,
        crate::presentation::http::handlers::users::create_user,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::update_user,
        crate::presentation::http::handlers::users::delete_user
    ),
    components(
        schemas(
            CreateAdDto,
            ChangeAdStatusDto,
            UpdateAdDto,
            AdDto,
            CreateUserDto,
            UpdateUserDto,
            UserDto
        )
    ),
    tags(
        (name = "ads", description = "Ad endpoints"),
        (name = "users", description = "User endpoints")
    )
)]
pub(crate) struct ApiDoc;
