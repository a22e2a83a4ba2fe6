// ABOUTME: Integration tests for the composition pruner and image probe.
// ABOUTME: Force-rebuild bypass, probe error coercion, and the all-skip terminal state.

mod support;

use std::collections::BTreeMap;
use stevedore::deploy::{ProbeResult, probe_image, prune_composition};
use stevedore::project::Composition;
use stevedore::types::ImageRef;
use support::{FakeEngine, plain_service};

fn composition(entries: &[(&str, &str)]) -> Composition {
    Composition {
        services: entries
            .iter()
            .map(|(name, image)| plain_service(name, image))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[tokio::test]
async fn force_rebuild_returns_composition_unchanged_with_zero_probes() {
    let engine = FakeEngine::with_existing(&["nginx:latest", "redis:latest", "api:latest"]);
    let composition = composition(&[
        ("web", "nginx:latest"),
        ("cache", "redis:latest"),
        ("api", "api:latest"),
    ]);

    let (pruned, skipped) = prune_composition(&engine, &composition, true).await;

    // Three build candidates regardless of local image state.
    assert_eq!(pruned.len(), 3);
    assert!(skipped.is_empty());
    assert_eq!(engine.probe_count(), 0);
}

#[tokio::test]
async fn prunes_exactly_the_services_whose_images_exist() {
    let engine = FakeEngine::with_existing(&["nginx:latest"]);
    let composition = composition(&[("web", "nginx:latest"), ("api", "acme/api:dev")]);

    let (pruned, skipped) = prune_composition(&engine, &composition, false).await;

    assert_eq!(pruned.len(), 1);
    assert!(pruned.service_names().any(|s| s.as_str() == "api"));
    assert_eq!(skipped.len(), 1);
    assert!(skipped.iter().any(|s| s.as_str() == "web"));
}

#[tokio::test]
async fn all_existing_images_prune_to_empty_composition() {
    let engine = FakeEngine::with_existing(&["nginx:latest", "redis:latest"]);
    let composition = composition(&[("web", "nginx:latest"), ("cache", "redis:latest")]);

    let (pruned, skipped) = prune_composition(&engine, &composition, false).await;

    assert!(pruned.is_empty());
    assert_eq!(skipped.len(), 2);
}

#[tokio::test]
async fn probe_error_is_equivalent_to_not_found() {
    // One engine cleanly reports not-found, the other raises.
    let clean = FakeEngine::default();
    let broken = FakeEngine::default().failing_on("acme/api:dev");
    let composition = composition(&[("api", "acme/api:dev")]);

    let (pruned_clean, _) = prune_composition(&clean, &composition, false).await;
    let (pruned_broken, _) = prune_composition(&broken, &composition, false).await;

    assert_eq!(pruned_clean.len(), pruned_broken.len());
    assert_eq!(pruned_clean.len(), 1);
}

#[tokio::test]
async fn probe_failure_does_not_affect_sibling_probes() {
    let engine = FakeEngine::with_existing(&["nginx:latest"]).failing_on("acme/api:dev");
    let composition = composition(&[("web", "nginx:latest"), ("api", "acme/api:dev")]);

    let (pruned, skipped) = prune_composition(&engine, &composition, false).await;

    // The failing probe rebuilds its own service; the sibling still skips.
    assert_eq!(pruned.len(), 1);
    assert!(skipped.iter().any(|s| s.as_str() == "web"));
}

#[tokio::test]
async fn build_spec_services_are_probed_by_resolved_tag() {
    use stevedore::project::{BuildSpec, ServiceImage};
    use stevedore::types::ServiceName;

    let engine = FakeEngine::with_existing(&["shop_api:latest"]);
    let composition = Composition {
        services: BTreeMap::from([(
            ServiceName::new("api").unwrap(),
            ServiceImage::Build(BuildSpec {
                context: "./api".into(),
                dockerfile: None,
                tag: ImageRef::parse("shop_api:latest").unwrap(),
            }),
        )]),
    };

    let (pruned, skipped) = prune_composition(&engine, &composition, false).await;

    assert!(pruned.is_empty());
    assert_eq!(skipped.len(), 1);
}

#[tokio::test]
async fn probing_is_idempotent() {
    let engine = FakeEngine::with_existing(&["nginx:latest"]);
    let reference = ImageRef::parse("nginx:latest").unwrap();

    let first = probe_image(&engine, &reference).await;
    let second = probe_image(&engine, &reference).await;

    assert_eq!(first, ProbeResult::Found);
    assert_eq!(first, second);
}

#[tokio::test]
async fn probe_coerces_engine_error_to_not_found() {
    let engine = FakeEngine::default().failing_on("ghost:latest");
    let reference = ImageRef::parse("ghost:latest").unwrap();

    assert_eq!(probe_image(&engine, &reference).await, ProbeResult::NotFound);
}
