// ABOUTME: Raw serde types for the subset of compose files stevedore reads.
// ABOUTME: Only service image/build entries are interpreted; the rest passes through untouched.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct ComposeFile {
    #[serde(default)]
    #[allow(dead_code)]
    pub version: Option<String>,

    #[serde(default)]
    pub services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComposeService {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub build: Option<ComposeBuild>,
}

/// `build:` accepts either a bare context path or a detailed mapping.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ComposeBuild {
    Context(String),
    Detailed {
        context: String,
        #[serde(default)]
        dockerfile: Option<String>,
    },
}

impl ComposeBuild {
    pub fn context(&self) -> &str {
        match self {
            ComposeBuild::Context(context) => context,
            ComposeBuild::Detailed { context, .. } => context,
        }
    }

    pub fn dockerfile(&self) -> Option<&str> {
        match self {
            ComposeBuild::Context(_) => None,
            ComposeBuild::Detailed { dockerfile, .. } => dockerfile.as_deref(),
        }
    }
}
