// ABOUTME: Bollard-based Engine implementation over the local Docker socket.
// ABOUTME: Maps bollard server errors onto EngineError variants.

use crate::project::BuildSpec;
use crate::runtime::engine::{Engine, EngineError};
use crate::types::ImageRef;
use async_trait::async_trait;
use bollard::Docker;
use bollard::body_full;
use bollard::query_parameters::{BuildImageOptions, CreateImageOptions};
use futures::StreamExt;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_pull_error(e: bollard::errors::Error, image_name: &str) -> EngineError {
    EngineError::PullFailed(format!("{}: {}", image_name, e))
}

fn map_build_error(e: bollard::errors::Error, tag: &str) -> EngineError {
    EngineError::BuildFailed(format!("{}: {}", tag, e))
}

/// Engine backed by a Docker-compatible daemon on the local machine.
pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    /// Connect to the daemon, either at an explicit socket path or at the
    /// platform default.
    pub fn connect(socket: Option<&str>) -> Result<Self, EngineError> {
        let client = match socket {
            Some(path) => Docker::connect_with_unix(path, 120, bollard::API_DEFAULT_VERSION),
            None => Docker::connect_with_local_defaults(),
        }
        .map_err(|e| EngineError::Connection(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Engine for DockerEngine {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, EngineError> {
        let image_name = reference.to_string();

        match self.client.inspect_image(&image_name).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(EngineError::Runtime(format!(
                "failed to inspect {}: {}",
                image_name, e
            ))),
        }
    }

    async fn image_id(&self, reference: &ImageRef) -> Result<Option<String>, EngineError> {
        let image_name = reference.to_string();

        match self.client.inspect_image(&image_name).await {
            Ok(inspect) => Ok(inspect.id),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(None),
            Err(e) => Err(EngineError::Runtime(format!(
                "failed to inspect {}: {}",
                image_name, e
            ))),
        }
    }

    async fn pull_image(&self, reference: &ImageRef) -> Result<String, EngineError> {
        let image_name = reference.to_string();

        let opts = CreateImageOptions {
            from_image: Some(image_name.clone()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it into the log
        let mut log = String::new();
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| map_pull_error(e, &image_name))?;
            if let Some(error) = info.error_detail.and_then(|d| d.message) {
                return Err(EngineError::PullFailed(format!("{}: {}", image_name, error)));
            }
            if let Some(status) = info.status {
                log.push_str(&status);
                log.push('\n');
            }
        }

        Ok(log)
    }

    async fn build_image(
        &self,
        spec: &BuildSpec,
        platform: Option<&str>,
    ) -> Result<String, EngineError> {
        let tag = spec.tag.to_string();

        // The daemon wants the build context as a tar archive.
        let mut archive = tar::Builder::new(Vec::new());
        let contents = archive
            .append_dir_all(".", &spec.context)
            .and_then(|_| archive.into_inner())
            .map_err(|e| {
                EngineError::BuildFailed(format!(
                    "failed to archive context {}: {}",
                    spec.context.display(),
                    e
                ))
            })?;

        let opts = BuildImageOptions {
            dockerfile: spec
                .dockerfile
                .clone()
                .unwrap_or_else(|| "Dockerfile".to_string()),
            t: Some(tag.clone()),
            platform: platform.unwrap_or_default().to_string(),
            ..Default::default()
        };

        let mut log = String::new();
        let mut stream =
            self.client
                .build_image(opts, None, Some(body_full(bytes::Bytes::from(contents))));
        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| map_build_error(e, &tag))?;
            if let Some(error) = info.error_detail.and_then(|d| d.message) {
                return Err(EngineError::BuildFailed(format!("{}: {}", tag, error)));
            }
            if let Some(line) = info.stream {
                log.push_str(&line);
            }
        }

        Ok(log)
    }
}
