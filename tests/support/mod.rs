// ABOUTME: Test support utilities.
// ABOUTME: Provides in-memory fakes for the engine, builder, and release API seams.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use stevedore::build::{BuildError, BuildRequest, ImageBuilder, ImageRecord};
use stevedore::fleet::{
    Fleet, FleetError, LegacyDeployRequest, Release, ReleaseApi, ReleaseId, ReleaseRequest,
    TargetCapabilities, User,
};
use stevedore::project::{BuildSpec, ServiceImage};
use stevedore::runtime::{Engine, EngineError};
use stevedore::types::{ImageRef, ServiceName};

/// In-memory engine. Probes answer from `existing`; references listed in
/// `failing` raise a runtime error instead.
#[derive(Default)]
pub struct FakeEngine {
    existing: Mutex<BTreeSet<String>>,
    failing: BTreeSet<String>,
    probe_count: AtomicUsize,
}

impl FakeEngine {
    pub fn with_existing(references: &[&str]) -> Self {
        FakeEngine {
            existing: Mutex::new(references.iter().map(|r| r.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, reference: &str) -> Self {
        self.failing.insert(reference.to_string());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, EngineError> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        let name = reference.to_string();
        if self.failing.contains(&name) {
            return Err(EngineError::Runtime(format!("daemon unreachable for {name}")));
        }
        Ok(self.existing.lock().unwrap().contains(&name))
    }

    async fn image_id(&self, reference: &ImageRef) -> Result<Option<String>, EngineError> {
        let name = reference.to_string();
        Ok(self
            .existing
            .lock()
            .unwrap()
            .contains(&name)
            .then(|| format!("sha256:{name}")))
    }

    async fn pull_image(&self, reference: &ImageRef) -> Result<String, EngineError> {
        let name = reference.to_string();
        self.existing.lock().unwrap().insert(name.clone());
        Ok(format!("Pulled {name}\n"))
    }

    async fn build_image(
        &self,
        spec: &BuildSpec,
        _platform: Option<&str>,
    ) -> Result<String, EngineError> {
        let name = spec.tag.to_string();
        self.existing.lock().unwrap().insert(name.clone());
        Ok(format!("Built {name}\n"))
    }
}

/// Builder fake: returns one record per requested service, logged as
/// "built". Optionally fails, or smuggles in an extra undeclared record.
#[derive(Default)]
pub struct FakeBuilder {
    pub calls: Mutex<Vec<Vec<ServiceName>>>,
    fail_with: Option<String>,
    extra_service: Option<String>,
}

impl FakeBuilder {
    pub fn failing(message: &str) -> Self {
        FakeBuilder {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_extra_record(service: &str) -> Self {
        FakeBuilder {
            extra_service: Some(service.to_string()),
            ..Default::default()
        }
    }

    pub fn build_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageBuilder for FakeBuilder {
    async fn build(
        &self,
        request: &BuildRequest<'_>,
    ) -> Result<BTreeMap<ServiceName, ImageRecord>, BuildError> {
        let services: Vec<ServiceName> = request.composition.service_names().cloned().collect();
        self.calls.lock().unwrap().push(services.clone());

        if let Some(message) = &self.fail_with {
            return Err(BuildError::Dispatch(message.clone()));
        }

        let mut records: BTreeMap<ServiceName, ImageRecord> = request
            .composition
            .services
            .iter()
            .map(|(name, spec)| {
                (
                    name.clone(),
                    ImageRecord {
                        service_name: name.clone(),
                        name: spec.reference().to_string(),
                        logs: format!("built {name}"),
                        props: BTreeMap::from([(
                            "image_id".to_string(),
                            format!("sha256:{name}"),
                        )]),
                    },
                )
            })
            .collect();

        if let Some(extra) = &self.extra_service {
            let name = ServiceName::new(extra).unwrap();
            records.insert(
                name.clone(),
                ImageRecord {
                    service_name: name,
                    name: format!("{extra}:latest"),
                    logs: "built".to_string(),
                    props: BTreeMap::new(),
                },
            );
        }

        Ok(records)
    }
}

/// Captured release API traffic.
#[derive(Default)]
pub struct FakeReleaseApi {
    pub legacy_calls: Mutex<Vec<LegacyDeployRequest>>,
    pub release_lookups: Mutex<Vec<ReleaseId>>,
    pub modern_calls: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl FakeReleaseApi {
    pub fn failing(message: &str) -> Self {
        FakeReleaseApi {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.legacy_calls.lock().unwrap().len() + self.modern_calls.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<(), FleetError> {
        match &self.fail_with {
            Some(message) => Err(FleetError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReleaseApi for FakeReleaseApi {
    async fn deploy_legacy(&self, request: &LegacyDeployRequest) -> Result<ReleaseId, FleetError> {
        self.check_failure()?;
        self.legacy_calls.lock().unwrap().push(request.clone());
        Ok(ReleaseId(17))
    }

    async fn get_release(&self, id: ReleaseId) -> Result<Release, FleetError> {
        self.check_failure()?;
        self.release_lookups.lock().unwrap().push(id);
        Ok(Release {
            id,
            commit: "abc123".to_string(),
        })
    }

    async fn create_release(&self, request: &ReleaseRequest) -> Result<Release, FleetError> {
        self.check_failure()?;
        // Keep the serialized request so tests can assert on the payload.
        self.modern_calls
            .lock()
            .unwrap()
            .push(serde_json::to_string(request).unwrap());
        Ok(Release {
            id: ReleaseId(42),
            commit: "deadbeef".to_string(),
        })
    }
}

/// A fleet record with the given capability flags.
pub fn fleet(is_legacy: bool, supports_multicontainer: bool) -> Fleet {
    Fleet {
        id: 7,
        slug: "acme/widgets".to_string(),
        arch: "amd64".to_string(),
        device_type: "generic-x86".to_string(),
        capabilities: TargetCapabilities {
            is_legacy,
            supports_multicontainer,
        },
    }
}

pub fn user() -> User {
    User {
        id: 99,
        username: "shipper".to_string(),
    }
}

/// A plain-image service entry for hand-built compositions.
pub fn plain_service(name: &str, image: &str) -> (ServiceName, ServiceImage) {
    (
        ServiceName::new(name).unwrap(),
        ServiceImage::Image(ImageRef::parse(image).unwrap()),
    )
}
