// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests driving the gRPC surface with the generated client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use depot_core::{MetadataBackendKind, StorageConfig};
use depot_rpc::proto::storage_service_client::StorageServiceClient;
use depot_rpc::proto::storage_service_server::StorageServiceServer;
use depot_rpc::proto::{
    CreateBucketRequest, GetDownloadUrlRequest, GetObjectMetadataRequest, HealthRequest,
    ListObjectsRequest, UploadObjectRequest,
};
use depot_rpc::StorageRpc;
use depot_storage::StorageService;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;

/// A test server instance.
struct TestServer {
    addr: SocketAddr,
    _handle: JoinHandle<()>,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Start a server on an ephemeral port with the given metadata backend.
    async fn start(backend: MetadataBackendKind) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = StorageConfig {
            root_dir: temp_dir.path().join("data"),
            metadata_backend: backend,
        };

        let service = StorageService::open(&config).await.expect("Failed to create storage");

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let handle = tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(StorageServiceServer::new(StorageRpc::new(Arc::new(service))))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        Self { addr, _handle: handle, _temp_dir: temp_dir }
    }

    async fn client(&self) -> StorageServiceClient<Channel> {
        StorageServiceClient::connect(format!("http://{}", self.addr))
            .await
            .expect("Failed to connect")
    }
}

#[tokio::test]
async fn test_basic_upload_flow() {
    let server = TestServer::start(MetadataBackendKind::Database).await;
    let mut client = server.client().await;

    client
        .create_bucket(CreateBucketRequest { name: "b1".into() })
        .await
        .expect("Failed to create bucket");

    client
        .upload_object(UploadObjectRequest {
            bucket: "b1".into(),
            name: "o1".into(),
            data: b"content".to_vec(),
            metadata: HashMap::new(),
        })
        .await
        .expect("Failed to upload");

    let names = client
        .list_objects(ListObjectsRequest { bucket: "b1".into(), prefix: String::new() })
        .await
        .expect("Failed to list")
        .into_inner()
        .object_names;
    assert_eq!(names, vec!["o1"]);

    let info = client
        .get_object_metadata(GetObjectMetadataRequest { bucket: "b1".into(), name: "o1".into() })
        .await
        .expect("Failed to stat")
        .into_inner();
    assert_eq!(info.size, 7);
    assert!(info.metadata.is_empty());

    let url = client
        .get_download_url(GetDownloadUrlRequest { bucket: "b1".into(), name: "o1".into() })
        .await
        .expect("Failed to resolve")
        .into_inner()
        .url;
    assert!(!url.is_empty());
}

#[tokio::test]
async fn test_upload_with_metadata() {
    for backend in [MetadataBackendKind::Database, MetadataBackendKind::Sidecar] {
        let server = TestServer::start(backend).await;
        let mut client = server.client().await;

        client
            .create_bucket(CreateBucketRequest { name: "meta-bucket".into() })
            .await
            .expect("Failed to create bucket");

        let mut metadata = HashMap::new();
        metadata.insert("type".to_string(), "binary".to_string());
        metadata.insert("owner".to_string(), "jules".to_string());

        client
            .upload_object(UploadObjectRequest {
                bucket: "meta-bucket".into(),
                name: "data.bin".into(),
                data: vec![0, 1, 2],
                metadata: metadata.clone(),
            })
            .await
            .expect("Failed to upload");

        let info = client
            .get_object_metadata(GetObjectMetadataRequest {
                bucket: "meta-bucket".into(),
                name: "data.bin".into(),
            })
            .await
            .expect("Failed to stat")
            .into_inner();
        assert_eq!(info.size, 3);
        assert_eq!(info.metadata, metadata);

        let names = client
            .list_objects(ListObjectsRequest {
                bucket: "meta-bucket".into(),
                prefix: String::new(),
            })
            .await
            .expect("Failed to list")
            .into_inner()
            .object_names;
        assert_eq!(names, vec!["data.bin"]);
    }
}

#[tokio::test]
async fn test_not_found_over_the_wire() {
    let server = TestServer::start(MetadataBackendKind::Database).await;
    let mut client = server.client().await;

    let status = client
        .upload_object(UploadObjectRequest {
            bucket: "never-created".into(),
            name: "obj".into(),
            data: b"x".to_vec(),
            metadata: HashMap::new(),
        })
        .await
        .expect_err("Upload to missing bucket should fail");
    assert_eq!(status.code(), tonic::Code::NotFound);

    let status = client
        .get_object_metadata(GetObjectMetadataRequest {
            bucket: "never-created".into(),
            name: "obj".into(),
        })
        .await
        .expect_err("Stat of missing object should fail");
    assert_eq!(status.code(), tonic::Code::NotFound);

    let status = client
        .get_download_url(GetDownloadUrlRequest {
            bucket: "never-created".into(),
            name: "obj".into(),
        })
        .await
        .expect_err("Locator for missing object should fail");
    assert_eq!(status.code(), tonic::Code::NotFound);

    // Listing a missing bucket is empty, not an error
    let names = client
        .list_objects(ListObjectsRequest { bucket: "never-created".into(), prefix: String::new() })
        .await
        .expect("List should succeed")
        .into_inner()
        .object_names;
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_nested_names_and_prefix_listing() {
    let server = TestServer::start(MetadataBackendKind::Sidecar).await;
    let mut client = server.client().await;

    client
        .create_bucket(CreateBucketRequest { name: "b".into() })
        .await
        .expect("Failed to create bucket");

    let mut metadata = HashMap::new();
    metadata.insert("k".to_string(), "v".to_string());

    for name in ["logs/2026/jan.log", "logs/2026/feb.log", "data/raw.bin"] {
        client
            .upload_object(UploadObjectRequest {
                bucket: "b".into(),
                name: name.into(),
                data: b"x".to_vec(),
                metadata: metadata.clone(),
            })
            .await
            .expect("Failed to upload");
    }

    // Sidecar records stay invisible; ordering is lexicographic
    let names = client
        .list_objects(ListObjectsRequest { bucket: "b".into(), prefix: String::new() })
        .await
        .expect("Failed to list")
        .into_inner()
        .object_names;
    assert_eq!(names, vec!["data/raw.bin", "logs/2026/feb.log", "logs/2026/jan.log"]);

    let names = client
        .list_objects(ListObjectsRequest { bucket: "b".into(), prefix: "logs/".into() })
        .await
        .expect("Failed to list")
        .into_inner()
        .object_names;
    assert_eq!(names, vec!["logs/2026/feb.log", "logs/2026/jan.log"]);
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(MetadataBackendKind::Database).await;
    let mut client = server.client().await;

    let response = client.health(HealthRequest {}).await.expect("Health failed").into_inner();
    assert_eq!(response.status, "ok");
}
