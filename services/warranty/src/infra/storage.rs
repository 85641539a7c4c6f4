//! Invoice object storage: S3 (or S3-compatible) and local filesystem backends.

use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, anyhow, bail};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use futures::StreamExt as _;
use tokio_util::io::ReaderStream;

use crate::config::{StorageBackendKind, WarrantyConfig};
use crate::domain::repository::{InvoiceObject, InvoiceStorage};
use crate::error::WarrantyServiceError;

/// Backend selected by `STORAGE_BACKEND`.
#[derive(Clone)]
pub enum InvoiceStore {
    S3(S3InvoiceStore),
    Local(LocalInvoiceStore),
}

impl InvoiceStore {
    pub fn from_config(config: &WarrantyConfig) -> anyhow::Result<Self> {
        match config.storage_backend {
            StorageBackendKind::S3 => {
                let required = |value: &Option<String>, name: &str| {
                    value
                        .clone()
                        .ok_or_else(|| anyhow!("{name} is required when STORAGE_BACKEND=s3"))
                };
                Ok(Self::S3(S3InvoiceStore::new(
                    required(&config.aws_region, "AWS_REGION")?,
                    &required(&config.aws_access_key_id, "AWS_ACCESS_KEY_ID")?,
                    &required(&config.aws_secret_access_key, "AWS_SECRET_ACCESS_KEY")?,
                    required(&config.aws_s3_bucket, "AWS_S3_BUCKET")?,
                    config.s3_endpoint.as_deref(),
                )))
            }
            StorageBackendKind::Local => Ok(Self::Local(LocalInvoiceStore::new(
                config.local_storage_path.clone(),
            ))),
        }
    }
}

impl InvoiceStorage for InvoiceStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), WarrantyServiceError> {
        match self {
            Self::S3(store) => store.put(key, body, content_type).await,
            Self::Local(store) => store.put(key, body, content_type).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<InvoiceObject>, WarrantyServiceError> {
        match self {
            Self::S3(store) => store.get(key).await,
            Self::Local(store) => store.get(key).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), WarrantyServiceError> {
        match self {
            Self::S3(store) => store.delete(key).await,
            Self::Local(store) => store.delete(key).await,
        }
    }
}

// ── S3 ───────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct S3InvoiceStore {
    client: Client,
    bucket: String,
}

impl S3InvoiceStore {
    pub fn new(
        region: String,
        access_key_id: &str,
        secret_access_key: &str,
        bucket: String,
        endpoint: Option<&str>,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "warranty-config",
        );
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region))
            .credentials_provider(credentials);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        Self {
            client: Client::from_conf(builder.build()),
            bucket,
        }
    }
}

impl InvoiceStorage for S3InvoiceStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), WarrantyServiceError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow!("s3 put_object {key}: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<InvoiceObject>, WarrantyServiceError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                return Ok(None);
            }
            Err(e) => {
                return Err(anyhow!("s3 get_object {key}: {}", DisplayErrorContext(&e)).into());
            }
        };
        let content_length = output.content_length().and_then(|n| u64::try_from(n).ok());
        let body = futures::stream::try_unfold(output.body, |mut body| async move {
            let chunk = body.try_next().await.map_err(io::Error::other)?;
            Ok(chunk.map(|bytes| (bytes, body)))
        })
        .boxed();
        Ok(Some(InvoiceObject {
            body,
            content_length,
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), WarrantyServiceError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("s3 delete_object {key}: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }
}

// ── Local filesystem ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LocalInvoiceStore {
    root: PathBuf,
}

impl LocalInvoiceStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Keys are relative paths of plain components only.
    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key);
        if key.is_empty() || relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            bail!("invalid storage key {key:?}");
        }
        Ok(self.root.join(relative))
    }
}

impl InvoiceStorage for LocalInvoiceStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        _content_type: &str,
    ) -> Result<(), WarrantyServiceError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<InvoiceObject>, WarrantyServiceError> {
        let path = self.path_for(key)?;
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("open {}", path.display()))
                    .into());
            }
        };
        let content_length = file.metadata().await.ok().map(|m| m.len());
        Ok(Some(InvoiceObject {
            body: ReaderStream::new(file).boxed(),
            content_length,
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), WarrantyServiceError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove {}", path.display()))
                .into()),
        }
    }
}
