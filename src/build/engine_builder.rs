// ABOUTME: Default ImageBuilder that drives the local Engine.
// ABOUTME: Pulls plain images, builds build-spec services, records logs and image ids.

use super::{BuildError, BuildRequest, ImageBuilder, ImageRecord};
use crate::project::ServiceImage;
use crate::runtime::Engine;
use crate::types::ServiceName;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Builds each service in the pruned composition through the container
/// runtime. Dispatch is sequential; logs stay per-service.
pub struct EngineBuilder<'a> {
    engine: &'a dyn Engine,
}

impl<'a> EngineBuilder<'a> {
    pub fn new(engine: &'a dyn Engine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ImageBuilder for EngineBuilder<'_> {
    async fn build(
        &self,
        request: &BuildRequest<'_>,
    ) -> Result<BTreeMap<ServiceName, ImageRecord>, BuildError> {
        // Cross-arch builds go through the daemon's emulation support; native
        // builds leave the platform unset.
        let platform = request
            .emulated
            .then(|| format!("linux/{}", request.arch));

        let mut records = BTreeMap::new();

        for (service, spec) in &request.composition.services {
            tracing::debug!("building service {service} for {}", request.device_type);

            let logs = match spec {
                ServiceImage::Build(build) => self
                    .engine
                    .build_image(build, platform.as_deref())
                    .await
                    .map_err(|e| BuildError::Service {
                        service: service.clone(),
                        message: e.to_string(),
                    })?,
                ServiceImage::Image(image) => self
                    .engine
                    .pull_image(image)
                    .await
                    .map_err(|e| BuildError::Service {
                        service: service.clone(),
                        message: e.to_string(),
                    })?,
            };

            let reference = spec.reference();
            let mut props = request.options.clone();
            if let Ok(Some(id)) = self.engine.image_id(reference).await {
                props.insert("image_id".to_string(), id);
            }

            records.insert(
                service.clone(),
                ImageRecord {
                    service_name: service.clone(),
                    name: reference.to_string(),
                    logs,
                    props,
                },
            );
        }

        Ok(records)
    }
}
