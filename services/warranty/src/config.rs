use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use warranty_core::config::Config;

/// Warranty service configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct WarrantyConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HS256 signing key for bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// HTTP listen port (default 3002). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// `s3` (default) or `local`. Env var: `STORAGE_BACKEND`.
    #[serde(default)]
    pub storage_backend: StorageBackendKind,
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_s3_bucket: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO etc.).
    pub s3_endpoint: Option<String>,
    /// Root directory of the `local` backend (default `./files`).
    #[serde(default = "default_local_storage_path")]
    pub local_storage_path: PathBuf,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Request body limit for multipart registration (default 10 MiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    S3,
    Local,
}

impl Config for WarrantyConfig {}

fn default_port() -> u16 {
    3002
}

fn default_local_storage_path() -> PathBuf {
    PathBuf::from("./files")
}

fn default_admin_email() -> String {
    "admin@example.com".to_owned()
}

fn default_admin_password() -> String {
    "admin123".to_owned()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl fmt::Debug for WarrantyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarrantyConfig")
            .field("port", &self.port)
            .field("storage_backend", &self.storage_backend)
            .field("aws_region", &self.aws_region)
            .field("aws_s3_bucket", &self.aws_s3_bucket)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("local_storage_path", &self.local_storage_path)
            .field("admin_email", &self.admin_email)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}
