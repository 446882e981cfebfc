//! Tests for the blob content repository.

use coffer_core::{ContentItem, FileClassification, StorageDescriptor, StorageLocation};
use coffer_error::{BackendError, CofferErrorKind, CofferResult};
use coffer_storage::{
    BlobBackend, BlobStorageConfig, BlobStorageContentRepository, ContentRepository,
    InMemoryBlobBackend, StorageErrorKind,
};
use std::sync::Arc;

const CONTAINER: &str = "test-container";

async fn repository() -> (BlobStorageContentRepository, InMemoryBlobBackend) {
    let backend = InMemoryBlobBackend::new();
    let config = BlobStorageConfig::new("memory://", CONTAINER).with_create_if_not_exists(true);
    let repository = BlobStorageContentRepository::new(Arc::new(backend.clone()), config)
        .await
        .unwrap();
    (repository, backend)
}

fn item(storage_path: &str, data: &[u8]) -> ContentItem {
    ContentItem::builder()
        .storage_path(storage_path)
        .data(data.to_vec())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get() {
    let (repository, _) = repository().await;

    let mut created = item("docs/testfile.txt", b"Test content");
    let descriptor = repository.create(&mut created).await.unwrap();

    assert_eq!(descriptor.file_size, 12);
    assert_eq!(descriptor.storage_path, "docs/testfile.txt");
    assert_eq!(descriptor.file_name, "testfile.txt");
    assert_eq!(descriptor.location, StorageLocation::Blob);
    assert!(descriptor.created.is_none());
    assert_eq!(created.file_name, "docs/testfile.txt");

    let fetched = repository.get(&descriptor).await.unwrap();
    assert_eq!(fetched.data, b"Test content");
    assert_eq!(fetched.file_name, "test-container/docs/testfile.txt");
}

#[tokio::test]
async fn test_scope_qualified_path_round_trips() {
    let (repository, backend) = repository().await;
    let path = format!("{}/retrieval-test.txt", CONTAINER);

    let mut created = item(&path, b"This is test content for retrieval");
    let descriptor = repository.create(&mut created).await.unwrap();

    assert_eq!(created.file_name, "retrieval-test.txt");
    assert_eq!(descriptor.storage_path, path);
    assert_eq!(backend.keys(CONTAINER).await, vec!["retrieval-test.txt"]);

    let fetched = repository.get(&descriptor).await.unwrap();
    assert_eq!(fetched.file_name, path);
    assert_eq!(fetched.data, b"This is test content for retrieval");
}

#[tokio::test]
async fn test_qualified_and_bare_paths_address_same_object() {
    let (repository, _) = repository().await;

    let mut created = item("test-container/shared.xml", b"<a/>");
    repository.create(&mut created).await.unwrap();

    let bare = StorageDescriptor::for_path("shared.xml");
    assert_eq!(repository.get(&bare).await.unwrap().data, b"<a/>");
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let (repository, _) = repository().await;

    let descriptor = StorageDescriptor::for_path("docs/missing.txt");
    assert!(repository.get(&descriptor).await.is_none());
    assert!(repository.try_get(&descriptor).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_then_get() {
    let (repository, _) = repository().await;

    let mut created = item("test-container/delete-test.txt", b"Content to be deleted");
    let descriptor = repository.create(&mut created).await.unwrap();
    assert!(repository.get(&descriptor).await.is_some());

    repository.delete(&descriptor).await;
    assert!(repository.get(&descriptor).await.is_none());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (repository, _) = repository().await;

    let mut created = item("docs/twice.txt", b"x");
    let descriptor = repository.create(&mut created).await.unwrap();

    repository.try_delete(&descriptor).await.unwrap();
    repository.try_delete(&descriptor).await.unwrap();
    assert!(repository.get(&descriptor).await.is_none());

    let never_stored = StorageDescriptor::for_path("docs/nonexistent.txt");
    repository.try_delete(&never_stored).await.unwrap();
}

#[tokio::test]
async fn test_create_overwrites() {
    let (repository, backend) = repository().await;

    let mut first = item("docs/report.csv", b"first");
    let mut second = item("docs/report.csv", b"second payload");
    repository.create(&mut first).await.unwrap();
    let descriptor = repository.create(&mut second).await.unwrap();

    assert_eq!(descriptor.file_size, 14);
    assert_eq!(backend.keys(CONTAINER).await.len(), 1);
    assert_eq!(repository.get(&descriptor).await.unwrap().data, b"second payload");
}

#[tokio::test]
async fn test_create_resolves_file_type() {
    let (repository, _) = repository().await;

    let mut image = item("test-container/testimage.png", &[0x89, 0x50, 0x4E, 0x47]);
    let descriptor = repository.create(&mut image).await.unwrap();
    assert_eq!(descriptor.file_type.name, "PNG");
    assert_eq!(descriptor.file_type.mime_type, "image/png");

    let mut document = item("test-container/testdoc.docx", b"Test document content");
    let descriptor = repository.create(&mut document).await.unwrap();
    assert_eq!(
        descriptor.file_type.classification(),
        Some(FileClassification::Docx)
    );
    assert!(descriptor.file_type.mime_type.contains("document"));
}

#[tokio::test]
async fn test_create_without_extension_is_total() {
    let (repository, _) = repository().await;

    let mut created = item("docs/LICENSE", b"MIT");
    let descriptor = repository.create(&mut created).await.unwrap();

    assert!(descriptor.file_type.is_empty());
    assert_eq!(descriptor.file_size, 3);
}

#[tokio::test]
async fn test_get_uses_descriptor_mime_type() {
    let (repository, _) = repository().await;

    let mut created = item("test-container/testfile.csv", b"CSV content,column1,column2");
    let descriptor = repository.create(&mut created).await.unwrap();
    let fetched = repository.get(&descriptor).await.unwrap();
    assert_eq!(fetched.mime_type, "text/csv");

    // A bare descriptor carries no file type, so neither does the item.
    let bare = StorageDescriptor::for_path("test-container/testfile.csv");
    let fetched = repository.get(&bare).await.unwrap();
    assert!(fetched.mime_type.is_empty());
}

#[tokio::test]
async fn test_large_payload_size() {
    let (repository, _) = repository().await;

    let payload: Vec<u8> = (0..1024 * 100).map(|i| (i % 251) as u8).collect();
    let mut created = item("test-container/largefile.bin", &payload);
    let descriptor = repository.create(&mut created).await.unwrap();

    assert_eq!(descriptor.file_size, payload.len() as u64);
    assert!(descriptor.file_type.is_empty());
    assert_eq!(repository.get(&descriptor).await.unwrap().data, payload);
}

#[tokio::test]
async fn test_container_name_is_lower_cased() {
    let backend = InMemoryBlobBackend::new();
    let config = BlobStorageConfig::new("memory://", "Mixed-Case").with_create_if_not_exists(true);
    let repository = BlobStorageContentRepository::new(Arc::new(backend.clone()), config)
        .await
        .unwrap();

    assert_eq!(repository.container_name(), "mixed-case");
    assert!(backend.has_container("mixed-case").await);
}

#[tokio::test]
async fn test_non_ascii_container_prefix_is_stripped() {
    let backend = InMemoryBlobBackend::new();
    let config = BlobStorageConfig::new("memory://", "Média").with_create_if_not_exists(true);
    let repository = BlobStorageContentRepository::new(Arc::new(backend.clone()), config)
        .await
        .unwrap();
    assert_eq!(repository.container_name(), "média");

    let mut created = item("MÉDIA/x.txt", b"accented");
    repository.create(&mut created).await.unwrap();

    assert_eq!(created.file_name, "x.txt");
    assert_eq!(backend.keys("média").await, vec!["x.txt"]);

    let bare = StorageDescriptor::for_path("x.txt");
    assert_eq!(repository.get(&bare).await.unwrap().data, b"accented");
}

#[tokio::test]
async fn test_with_container_returns_new_handle() {
    let (repository, backend) = repository().await;

    let archive = repository.with_container("Archive").await.unwrap();
    assert_eq!(archive.container_name(), "archive");
    assert_eq!(repository.container_name(), CONTAINER);
    assert!(backend.has_container("archive").await);

    let mut created = item("archive/old.pdf", b"%PDF");
    let descriptor = archive.create(&mut created).await.unwrap();

    assert_eq!(backend.keys("archive").await, vec!["old.pdf"]);
    assert!(backend.keys(CONTAINER).await.is_empty());
    assert!(repository.get(&descriptor).await.is_none());
    assert!(archive.get(&descriptor).await.is_some());
}

#[tokio::test]
async fn test_missing_container_without_create_flag() {
    let backend = InMemoryBlobBackend::new();
    let config = BlobStorageConfig::new("memory://", "absent");
    let repository = BlobStorageContentRepository::new(Arc::new(backend.clone()), config)
        .await
        .unwrap();

    assert!(!backend.has_container("absent").await);

    let mut created = item("docs/a.txt", b"a");
    let err = repository.try_create(&mut created).await.unwrap_err();
    assert!(matches!(
        err.storage_kind(),
        Some(StorageErrorKind::ContainerNotFound(_))
    ));
    assert!(err.is_not_found());

    let mut created = item("docs/a.txt", b"a");
    assert!(repository.create(&mut created).await.is_none());
}

/// Backend whose every call fails, standing in for an unreachable service.
struct UnreachableBackend;

#[async_trait::async_trait]
impl BlobBackend for UnreachableBackend {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn ensure_container_exists(&self, _container: &str) -> CofferResult<()> {
        Err(BackendError::new("connection refused").into())
    }

    async fn upload_or_replace(&self, _: &str, _: &str, _: &[u8]) -> CofferResult<()> {
        Err(BackendError::new("connection refused").into())
    }

    async fn exists(&self, _: &str, _: &str) -> CofferResult<bool> {
        Err(BackendError::new("connection refused").into())
    }

    async fn download_all(&self, _: &str, _: &str) -> CofferResult<Vec<u8>> {
        Err(BackendError::new("connection refused").into())
    }

    async fn delete_if_exists(&self, _: &str, _: &str) -> CofferResult<bool> {
        Err(BackendError::new("connection refused").into())
    }
}

#[tokio::test]
async fn test_backend_failures_degrade_to_none() {
    let config = BlobStorageConfig::new("memory://", CONTAINER);
    let repository = BlobStorageContentRepository::new(Arc::new(UnreachableBackend), config)
        .await
        .unwrap();

    let mut created = item("docs/a.txt", b"a");
    assert!(repository.create(&mut created).await.is_none());

    let descriptor = StorageDescriptor::for_path("docs/a.txt");
    assert!(repository.get(&descriptor).await.is_none());

    // Best effort: returns without surfacing the failure.
    repository.delete(&descriptor).await;
}

#[tokio::test]
async fn test_backend_failures_are_distinguishable_internally() {
    let config = BlobStorageConfig::new("memory://", CONTAINER);
    let repository = BlobStorageContentRepository::new(Arc::new(UnreachableBackend), config)
        .await
        .unwrap();

    let descriptor = StorageDescriptor::for_path("docs/a.txt");
    let err = repository.try_get(&descriptor).await.unwrap_err();
    assert!(matches!(err.kind(), CofferErrorKind::Backend(_)));
    assert!(!err.is_not_found());

    assert!(repository.try_delete(&descriptor).await.is_err());
}

#[tokio::test]
async fn test_container_creation_failure_fails_construction() {
    let config = BlobStorageConfig::new("memory://", CONTAINER).with_create_if_not_exists(true);
    let result = BlobStorageContentRepository::new(Arc::new(UnreachableBackend), config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_concurrent_creates_on_distinct_paths() {
    let (repository, backend) = repository().await;
    let repository = Arc::new(repository);

    let mut handles = Vec::new();
    for i in 0..16 {
        let repository = repository.clone();
        handles.push(tokio::spawn(async move {
            let mut created = item(&format!("batch/{}.txt", i), format!("payload {}", i).as_bytes());
            repository.create(&mut created).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }
    assert_eq!(backend.keys(CONTAINER).await.len(), 16);
}
