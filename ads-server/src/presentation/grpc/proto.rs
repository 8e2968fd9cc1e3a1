pub(crate) mod pb {
    tonic::include_proto!("ads");
}

pub(crate) use pb::ad_service_server::{AdService as AdRpc, AdServiceServer};
pub(crate) use pb::{
    AdResponse, ChangeAdStatusRequest, CreateAdRequest, CreateUserRequest, DeleteAdRequest,
    DeleteUserRequest, GetAdRequest, GetUserRequest, ListAdsRequest, ListAdsResponse,
    UpdateAdRequest, UpdateUserRequest, UserResponse,
};
