use tonic::{Request, Response, Status};
use validator::ValidateEmail;

use crate::presentation::AppState;
use crate::presentation::grpc::mappers::{
    to_domain_filter, to_proto_ad, to_proto_ad_list, to_proto_user,
};

use super::proto::{
    AdResponse, AdRpc, AdServiceServer, ChangeAdStatusRequest, CreateAdRequest,
    CreateUserRequest, DeleteAdRequest, DeleteUserRequest, GetAdRequest, GetUserRequest,
    ListAdsRequest, ListAdsResponse, UpdateAdRequest, UpdateUserRequest, UserResponse,
};
use super::status::{map_create_ad_error, map_domain_error, required};

#[derive(Clone)]
pub(crate) struct GrpcAdService {
    state: AppState,
}

impl GrpcAdService {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    pub(crate) fn into_server(self) -> AdServiceServer<Self> {
        AdServiceServer::new(self)
    }
}

fn check_email(email: &str) -> Result<(), Status> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(Status::invalid_argument(format!("invalid email address: {email}")))
    }
}

#[tonic::async_trait]
impl AdRpc for GrpcAdService {
    async fn create_ad(
        &self,
        request: Request<CreateAdRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let input = request.into_inner();
        let user_id = required(input.user_id, "user_id")?;

        let ad = self
            .state
            .ad_service
            .create_ad(input.title, input.text, user_id)
            .await
            .map_err(map_create_ad_error)?;

        Ok(Response::new(to_proto_ad(ad)))
    }

    async fn change_ad_status(
        &self,
        request: Request<ChangeAdStatusRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let input = request.into_inner();
        let ad_id = required(input.ad_id, "ad_id")?;
        let user_id = required(input.user_id, "user_id")?;

        let ad = self
            .state
            .ad_service
            .change_ad_status(ad_id, user_id, input.published)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_ad(ad)))
    }

    async fn update_ad(
        &self,
        request: Request<UpdateAdRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let input = request.into_inner();
        let ad_id = required(input.ad_id, "ad_id")?;
        let user_id = required(input.user_id, "user_id")?;

        let ad = self
            .state
            .ad_service
            .update_ad(ad_id, user_id, input.title, input.text)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_ad(ad)))
    }

    async fn get_ad(&self, request: Request<GetAdRequest>) -> Result<Response<AdResponse>, Status> {
        let ad_id = required(request.into_inner().ad_id, "ad_id")?;

        let ad = self
            .state
            .ad_service
            .get_ad(ad_id)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_ad(ad)))
    }

    async fn delete_ad(&self, request: Request<DeleteAdRequest>) -> Result<Response<()>, Status> {
        let input = request.into_inner();
        let ad_id = required(input.ad_id, "ad_id")?;
        let user_id = required(input.user_id, "user_id")?;

        self.state
            .ad_service
            .delete_ad(ad_id, user_id)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(()))
    }

    async fn list_ads(
        &self,
        request: Request<ListAdsRequest>,
    ) -> Result<Response<ListAdsResponse>, Status> {
        let filter = to_domain_filter(request.into_inner())?;

        let ads = self
            .state
            .ad_service
            .list_ads(filter)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_ad_list(ads)))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let input = request.into_inner();
        check_email(&input.email)?;

        let user = self
            .state
            .ad_service
            .create_user(input.nickname, input.email)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_user(user)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let id = required(request.into_inner().id, "id")?;

        let user = self
            .state
            .ad_service
            .get_user(id)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_user(user)))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let input = request.into_inner();
        let id = required(input.id, "id")?;
        check_email(&input.email)?;

        let user = self
            .state
            .ad_service
            .update_user(id, input.nickname, input.email)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(to_proto_user(user)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<()>, Status> {
        let id = required(request.into_inner().id, "id")?;

        self.state
            .ad_service
            .delete_user(id)
            .await
            .map_err(map_domain_error)?;

        Ok(Response::new(()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tonic::{Code, Request};

    use super::GrpcAdService;
    use crate::application::ad_service::AdService;
    use crate::data::repositories::memory::InMemoryRepository;
    use crate::presentation::AppState;
    use crate::presentation::grpc::proto::{
        AdRpc, ChangeAdStatusRequest, CreateAdRequest, CreateUserRequest, DeleteAdRequest,
        DeleteUserRequest, GetAdRequest, GetUserRequest, ListAdsRequest, UpdateAdRequest,
        UpdateUserRequest,
    };

    fn grpc_service() -> GrpcAdService {
        let state = AppState::new(Arc::new(AdService::new(InMemoryRepository::new())));
        GrpcAdService::new(state)
    }

    async fn create_user(service: &GrpcAdService, nickname: &str, email: &str) -> i64 {
        service
            .create_user(Request::new(CreateUserRequest {
                nickname: nickname.to_string(),
                email: email.to_string(),
            }))
            .await
            .expect("create_user must succeed")
            .into_inner()
            .id
    }

    async fn create_ad(service: &GrpcAdService, user_id: i64) -> i64 {
        service
            .create_ad(Request::new(CreateAdRequest {
                title: "hello".to_string(),
                text: "world".to_string(),
                user_id: Some(user_id),
            }))
            .await
            .expect("create_ad must succeed")
            .into_inner()
            .id
    }

    #[tokio::test]
    async fn publish_flow_over_grpc() {
        let service = grpc_service();
        let uid = create_user(&service, "J.Cole", "foresthill@drive.com").await;
        let ad_id = create_ad(&service, uid).await;

        let listed = service
            .list_ads(Request::new(ListAdsRequest::default()))
            .await
            .expect("list must succeed")
            .into_inner();
        assert!(listed.ads.is_empty());

        let changed = service
            .change_ad_status(Request::new(ChangeAdStatusRequest {
                ad_id: Some(ad_id),
                user_id: Some(uid),
                published: true,
            }))
            .await
            .expect("change must succeed")
            .into_inner();
        assert!(changed.published);
        assert!(changed.date_changed.is_some());

        let listed = service
            .list_ads(Request::new(ListAdsRequest::default()))
            .await
            .expect("list must succeed")
            .into_inner();
        assert_eq!(listed.ads, vec![changed]);
    }

    #[tokio::test]
    async fn missing_author_is_failed_precondition() {
        let service = grpc_service();

        let status = service
            .create_ad(Request::new(CreateAdRequest {
                title: "hello".to_string(),
                text: "world".to_string(),
                user_id: Some(9),
            }))
            .await
            .expect_err("unknown author");
        assert_eq!(status.code(), Code::FailedPrecondition);

        let status = service
            .create_ad(Request::new(CreateAdRequest {
                title: "hello".to_string(),
                text: "world".to_string(),
                user_id: None,
            }))
            .await
            .expect_err("missing author id");
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn invalid_content_and_email_are_invalid_argument() {
        let service = grpc_service();
        let uid = create_user(&service, "Kendrick", "section80@damn.com").await;
        let ad_id = create_ad(&service, uid).await;

        let status = service
            .update_ad(Request::new(UpdateAdRequest {
                ad_id: Some(ad_id),
                user_id: Some(uid),
                title: "t".repeat(100),
                text: "world".to_string(),
            }))
            .await
            .expect_err("title too long");
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = service
            .update_user(Request::new(UpdateUserRequest {
                id: Some(uid),
                nickname: "KDot".to_string(),
                email: "not-an-email".to_string(),
            }))
            .await
            .expect_err("bad email");
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn foreign_delete_is_permission_denied() {
        let service = grpc_service();
        let owner = create_user(&service, "Mac Miller", "swimming@circles.com").await;
        let other = create_user(&service, "Childish Gambino", "because@internet.com").await;
        let ad_id = create_ad(&service, owner).await;

        let status = service
            .delete_ad(Request::new(DeleteAdRequest {
                ad_id: Some(ad_id),
                user_id: Some(other),
            }))
            .await
            .expect_err("foreign delete");
        assert_eq!(status.code(), Code::PermissionDenied);

        service
            .get_ad(Request::new(GetAdRequest { ad_id: Some(ad_id) }))
            .await
            .expect("ad must survive");
    }

    #[tokio::test]
    async fn delete_user_cascades_over_grpc() {
        let service = grpc_service();
        let uid = create_user(&service, "Mac Miller", "swimming@circles.com").await;
        let ad_id = create_ad(&service, uid).await;

        service
            .delete_user(Request::new(DeleteUserRequest { id: Some(uid) }))
            .await
            .expect("delete must succeed");

        let status = service
            .get_user(Request::new(GetUserRequest { id: Some(uid) }))
            .await
            .expect_err("user is gone");
        assert_eq!(status.code(), Code::NotFound);

        let status = service
            .get_ad(Request::new(GetAdRequest { ad_id: Some(ad_id) }))
            .await
            .expect_err("ad is gone");
        assert_eq!(status.code(), Code::NotFound);
    }
}
