// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! gRPC service implementation.

use std::sync::Arc;

use bytes::Bytes;
use depot_core::Error;
use depot_storage::StorageService;
use tonic::{Request, Response, Status};
use tracing::info;

use crate::proto::storage_service_server::StorageService as StorageServiceHandler;
use crate::proto::{
    CreateBucketRequest, CreateBucketResponse, GetDownloadUrlRequest, GetDownloadUrlResponse,
    GetObjectMetadataRequest, GetObjectMetadataResponse, HealthRequest, HealthResponse,
    ListObjectsRequest, ListObjectsResponse, UploadObjectRequest, UploadObjectResponse,
};

/// gRPC handler wrapping the storage service facade.
pub struct StorageRpc {
    service: Arc<StorageService>,
}

impl StorageRpc {
    /// Creates a handler over the given service.
    #[must_use]
    pub fn new(service: Arc<StorageService>) -> Self {
        Self { service }
    }
}

/// Maps engine errors to transport status codes: NotFound stays NotFound,
/// everything else reports as internal.
fn to_status(err: Error) -> Status {
    if err.is_not_found() {
        Status::not_found(err.to_string())
    } else {
        Status::internal(err.to_string())
    }
}

#[tonic::async_trait]
impl StorageServiceHandler for StorageRpc {
    async fn create_bucket(
        &self,
        request: Request<CreateBucketRequest>,
    ) -> Result<Response<CreateBucketResponse>, Status> {
        let req = request.into_inner();
        info!(name = %req.name, "CreateBucket");

        self.service.create_bucket(&req.name).await.map_err(to_status)?;
        Ok(Response::new(CreateBucketResponse {}))
    }

    async fn upload_object(
        &self,
        request: Request<UploadObjectRequest>,
    ) -> Result<Response<UploadObjectResponse>, Status> {
        let req = request.into_inner();
        info!(bucket = %req.bucket, name = %req.name, size = req.data.len(), "UploadObject");

        self.service
            .upload_object(&req.bucket, &req.name, Bytes::from(req.data), req.metadata)
            .await
            .map_err(to_status)?;
        Ok(Response::new(UploadObjectResponse {}))
    }

    async fn get_object_metadata(
        &self,
        request: Request<GetObjectMetadataRequest>,
    ) -> Result<Response<GetObjectMetadataResponse>, Status> {
        let req = request.into_inner();
        info!(bucket = %req.bucket, name = %req.name, "GetObjectMetadata");

        let object_info = self
            .service
            .get_object_metadata(&req.bucket, &req.name)
            .await
            .map_err(to_status)?;

        Ok(Response::new(GetObjectMetadataResponse {
            bucket: object_info.bucket,
            name: object_info.name,
            size: object_info.size as i64,
            metadata: object_info.metadata,
        }))
    }

    async fn list_objects(
        &self,
        request: Request<ListObjectsRequest>,
    ) -> Result<Response<ListObjectsResponse>, Status> {
        let req = request.into_inner();
        info!(bucket = %req.bucket, prefix = %req.prefix, "ListObjects");

        let object_names =
            self.service.list_objects(&req.bucket, &req.prefix).await.map_err(to_status)?;
        Ok(Response::new(ListObjectsResponse { object_names }))
    }

    async fn get_download_url(
        &self,
        request: Request<GetDownloadUrlRequest>,
    ) -> Result<Response<GetDownloadUrlResponse>, Status> {
        let req = request.into_inner();
        info!(bucket = %req.bucket, name = %req.name, "GetDownloadUrl");

        let url =
            self.service.download_locator(&req.bucket, &req.name).await.map_err(to_status)?;
        Ok(Response::new(GetDownloadUrlResponse { url }))
    }

    async fn health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        Ok(Response::new(HealthResponse { status: "ok".to_string() }))
    }
}
