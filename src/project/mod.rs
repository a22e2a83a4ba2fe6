// ABOUTME: Project loading: compose file -> descriptors + composition.
// ABOUTME: Every descriptor name appears exactly once in the composition.

mod compose;

use crate::types::{ImageRef, ParseImageRefError, ServiceName, ServiceNameError};
use compose::ComposeFile;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COMPOSE_FILENAMES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Name used for the synthetic service when deploying a bare image.
pub const DEFAULT_SERVICE: &str = "main";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no compose file found in {0}")]
    ComposeNotFound(PathBuf),

    #[error("compose file declares no services")]
    NoServices,

    #[error("invalid service name '{service}': {source}")]
    InvalidServiceName {
        service: String,
        source: ServiceNameError,
    },

    #[error("invalid image for service '{service}': {source}")]
    InvalidImage {
        service: String,
        source: ParseImageRefError,
    },

    #[error("service '{0}' declares neither an image nor a build")]
    ServiceWithoutImage(String),

    #[error("an explicit image cannot target a project with {0} services")]
    ImageOverrideMultiService(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How a service is built: a context directory plus the tag the resulting
/// image will carry locally.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSpec {
    pub context: PathBuf,
    pub dockerfile: Option<String>,
    pub tag: ImageRef,
}

/// A service's image source. Probing and pruning always work on the resolved
/// reference, so both variants expose one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceImage {
    Image(ImageRef),
    Build(BuildSpec),
}

impl ServiceImage {
    /// The reference this service resolves to locally: the plain image, or
    /// the tag a build produces.
    pub fn reference(&self) -> &ImageRef {
        match self {
            ServiceImage::Image(image) => image,
            ServiceImage::Build(spec) => &spec.tag,
        }
    }
}

/// One declared service. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub name: ServiceName,
    pub image: ServiceImage,
}

/// The normalized service-name -> image-spec mapping the orchestrator
/// consumes. Pruning produces reduced copies; the original is never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub services: BTreeMap<ServiceName, ServiceImage>,
}

impl Composition {
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn service_names(&self) -> impl Iterator<Item = &ServiceName> {
        self.services.keys()
    }

    /// A copy of this composition with the given services removed.
    pub fn without_services(&self, removed: &BTreeSet<ServiceName>) -> Composition {
        Composition {
            services: self
                .services
                .iter()
                .filter(|(name, _)| !removed.contains(name))
                .map(|(name, spec)| (name.clone(), spec.clone()))
                .collect(),
        }
    }
}

/// A loaded deploy target.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub source: PathBuf,
    pub descriptors: Vec<ServiceDescriptor>,
    pub composition: Composition,
}

impl Project {
    /// Load a project from a source directory. An explicit image argument
    /// yields a synthetic single-service project around that image; it
    /// cannot target a source whose compose file declares several services.
    pub fn load(
        source: &Path,
        name_override: Option<&str>,
        image: Option<ImageRef>,
    ) -> Result<Self, ProjectError> {
        let name = match name_override {
            Some(name) => name.to_string(),
            None => project_name_from_dir(source),
        };

        let compose_path = COMPOSE_FILENAMES
            .iter()
            .map(|f| source.join(f))
            .find(|p| p.is_file());

        if let Some(image) = image {
            if let Some(path) = &compose_path {
                let raw: ComposeFile = serde_yaml::from_str(&std::fs::read_to_string(path)?)?;
                if raw.services.len() > 1 {
                    return Err(ProjectError::ImageOverrideMultiService(raw.services.len()));
                }
            }
            return Ok(Self::from_single_image(source, name, image));
        }

        let compose_path =
            compose_path.ok_or_else(|| ProjectError::ComposeNotFound(source.to_path_buf()))?;

        let raw: ComposeFile = serde_yaml::from_str(&std::fs::read_to_string(&compose_path)?)?;
        if raw.services.is_empty() {
            return Err(ProjectError::NoServices);
        }

        let mut descriptors = Vec::with_capacity(raw.services.len());
        let mut services = BTreeMap::new();

        for (raw_name, service) in &raw.services {
            let service_name =
                ServiceName::new(raw_name).map_err(|source| ProjectError::InvalidServiceName {
                    service: raw_name.clone(),
                    source,
                })?;

            let image = resolve_service_image(&name, raw_name, service, source)?;

            descriptors.push(ServiceDescriptor {
                name: service_name.clone(),
                image: image.clone(),
            });
            services.insert(service_name, image);
        }

        Ok(Project {
            name,
            source: source.to_path_buf(),
            descriptors,
            composition: Composition { services },
        })
    }

    fn from_single_image(source: &Path, name: String, image: ImageRef) -> Self {
        let service_name =
            ServiceName::new(DEFAULT_SERVICE).expect("default service name is valid");
        let spec = ServiceImage::Image(image);

        Project {
            name,
            source: source.to_path_buf(),
            descriptors: vec![ServiceDescriptor {
                name: service_name.clone(),
                image: spec.clone(),
            }],
            composition: Composition {
                services: BTreeMap::from([(service_name, spec)]),
            },
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} services)", self.name, self.descriptors.len())
    }
}

fn resolve_service_image(
    project: &str,
    service: &str,
    raw: &compose::ComposeService,
    source: &Path,
) -> Result<ServiceImage, ProjectError> {
    let parse_image = |input: &str| {
        ImageRef::parse(input).map_err(|source| ProjectError::InvalidImage {
            service: service.to_string(),
            source,
        })
    };

    match (&raw.build, &raw.image) {
        (Some(build), image) => {
            // A built service is tagged with its declared image name when one
            // is given, otherwise with a project-scoped default.
            let tag = match image {
                Some(image) => parse_image(image)?,
                None => {
                    ImageRef::local_tag(&format!("{}_{}", sanitize_tag(project), service), "latest")
                        .map_err(|source| ProjectError::InvalidImage {
                            service: service.to_string(),
                            source,
                        })?
                }
            };

            Ok(ServiceImage::Build(BuildSpec {
                context: source.join(build.context()),
                dockerfile: build.dockerfile().map(str::to_string),
                tag,
            }))
        }
        (None, Some(image)) => Ok(ServiceImage::Image(parse_image(image)?)),
        (None, None) => Err(ProjectError::ServiceWithoutImage(service.to_string())),
    }
}

fn project_name_from_dir(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

/// Image repository names are stricter than directory names; keep only the
/// characters Docker accepts.
fn sanitize_tag(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if cleaned.is_empty() {
        "project".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_invalid_chars() {
        assert_eq!(sanitize_tag("My App!"), "myapp");
        assert_eq!(sanitize_tag("$$$"), "project");
    }
}
