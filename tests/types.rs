// ABOUTME: Integration tests for validated domain types.
// ABOUTME: Tests image reference parsing and service name validation.

use stevedore::types::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_simple_name() {
        let img = ImageRef::parse("nginx").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("latest"));
        assert!(img.registry().is_none());
        assert!(img.digest().is_none());
    }

    #[test]
    fn parse_name_with_tag() {
        let img = ImageRef::parse("nginx:1.25").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("1.25"));
    }

    #[test]
    fn parse_with_registry() {
        let img = ImageRef::parse("registry.example.com/myapp:v1.2.3").unwrap();
        assert_eq!(img.registry(), Some("registry.example.com"));
        assert_eq!(img.name(), "myapp");
        assert_eq!(img.tag(), Some("v1.2.3"));
    }

    #[test]
    fn parse_with_registry_port() {
        let img = ImageRef::parse("localhost:5000/myapp").unwrap();
        assert_eq!(img.registry(), Some("localhost:5000"));
        assert_eq!(img.name(), "myapp");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_with_org() {
        let img = ImageRef::parse("ghcr.io/org/repo:latest").unwrap();
        assert_eq!(img.registry(), Some("ghcr.io"));
        assert_eq!(img.name(), "org/repo");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_with_digest() {
        let digest = "sha256:abc123def456";
        let img = ImageRef::parse(&format!("nginx@{}", digest)).unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.digest(), Some(digest));
        assert!(img.tag().is_none());
    }

    #[test]
    fn parse_empty_returns_error() {
        assert!(matches!(
            ImageRef::parse(""),
            Err(ParseImageRefError::Empty)
        ));
    }

    #[test]
    fn parse_rejects_invalid_chars() {
        assert!(matches!(
            ImageRef::parse("nginx latest"),
            Err(ParseImageRefError::InvalidChar(' '))
        ));
    }

    #[test]
    fn local_tag_builds_tagged_reference() {
        let img = ImageRef::local_tag("myproject_api", "latest").unwrap();
        assert_eq!(img.to_string(), "myproject_api:latest");
    }

    #[test]
    fn display_round_trips() {
        for input in ["nginx:1.25", "ghcr.io/org/repo:v1@sha256:abc123"] {
            assert_eq!(ImageRef::parse(input).unwrap().to_string(), input);
        }
    }
}

mod service_name_tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        for name in ["web", "api-v2", "db_replica", "svc1"] {
            assert!(ServiceName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(ServiceName::new(""), Err(ServiceNameError::Empty)));
    }

    #[test]
    fn rejects_uppercase() {
        assert!(matches!(
            ServiceName::new("Web"),
            Err(ServiceNameError::NotLowercase)
        ));
    }

    #[test]
    fn rejects_edge_hyphens() {
        assert!(matches!(
            ServiceName::new("-web"),
            Err(ServiceNameError::EdgeHyphen)
        ));
        assert!(matches!(
            ServiceName::new("web-"),
            Err(ServiceNameError::EdgeHyphen)
        ));
    }

    #[test]
    fn rejects_long_names() {
        let name = "a".repeat(64);
        assert!(matches!(
            ServiceName::new(&name),
            Err(ServiceNameError::TooLong)
        ));
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(matches!(
            ServiceName::new("web.front"),
            Err(ServiceNameError::InvalidChar('.'))
        ));
    }
}
