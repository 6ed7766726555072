use bundlegen_core::routing::{derive_import_key, AddOutcome, RoutingManipulator};
use bundlegen_core::{Error, RoutingFormat};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn routing_file(tmp: &TempDir, content: &str) -> PathBuf {
    let path = tmp.path().join("routing.yml");
    fs::write(&path, content).unwrap();
    path
}

// ════════════════════════════════════════════════════════════════════
// Import key derivation
// ════════════════════════════════════════════════════════════════════

#[test]
fn import_keys_match_known_prefixes() {
    let cases = [
        ("AppBundle", "", "app"),
        ("AppBundle", "/", "app"),
        ("AppBundle", "//", "app"),
        ("AppBundle", "/{foo}", "app"),
        ("AppBundle", "/{_foo}", "app"),
        ("AppBundle", "/{/foo}", "app"),
        ("AppBundle", "/{/foo/}", "app"),
        ("AppBundle", "/{_locale}", "app"),
        ("AppBundle", "/{_locale}/foo", "app_foo"),
        ("AppBundle", "/{_locale}/foo/", "app_foo"),
        ("AppBundle", "/{_locale}/foo/{_format}", "app_foo"),
        ("AppBundle", "/{_locale}/foo/{_format}/", "app_foo"),
        ("AppBundle", "/{_locale}/foo/{_format}/bar", "app_foo_bar"),
        ("AppBundle", "/{_locale}/foo/{_format}/bar/", "app_foo_bar"),
        ("AppBundle", "/{_locale}/foo/{_format}/bar//", "app_foo_bar"),
        ("AcmeBlogBundle", "", "acme_blog"),
        ("AcmeBlogBundle", "/", "acme_blog"),
        ("AcmeBlogBundle", "//", "acme_blog"),
        ("AcmeBlogBundle", "/{_locale}", "acme_blog"),
        ("AcmeBlogBundle", "/{_locale}/foo", "acme_blog_foo"),
        ("AcmeBlogBundle", "/{_locale}/foo/", "acme_blog_foo"),
        ("AcmeBlogBundle", "/{_locale}/foo/{_format}", "acme_blog_foo"),
        ("AcmeBlogBundle", "/{_locale}/foo/{_format}/", "acme_blog_foo"),
        ("AcmeBlogBundle", "/{_locale}/foo/{_format}/bar", "acme_blog_foo_bar"),
        ("AcmeBlogBundle", "/{_locale}/foo/{_format}/bar/", "acme_blog_foo_bar"),
        ("AcmeBlogBundle", "/{_locale}/foo/{_format}/bar//", "acme_blog_foo_bar"),
    ];

    for (bundle, prefix, expected) in cases {
        assert_eq!(
            derive_import_key(bundle, prefix).unwrap(),
            expected,
            "bundle={bundle} prefix={prefix}"
        );
    }
}

#[test]
fn import_key_without_bundle_suffix() {
    assert_eq!(derive_import_key("Acme", "/blog").unwrap(), "acme_blog");
}

#[test]
fn import_key_placeholder_only_prefixes_reduce_to_base() {
    let base = derive_import_key("AcmeShopBundle", "").unwrap();
    for prefix in ["/{id}", "/{a}/{b}//", "{x}", "///{_locale}/"] {
        assert_eq!(derive_import_key("AcmeShopBundle", prefix).unwrap(), base);
    }
}

#[test]
fn import_key_rejects_empty_bundle() {
    assert!(matches!(
        derive_import_key("", "/foo"),
        Err(Error::InvalidBundleName(_))
    ));
}

#[test]
fn import_key_rejects_malformed_bundle() {
    assert!(matches!(
        derive_import_key("Acme/BlogBundle", ""),
        Err(Error::InvalidBundleName(_))
    ));
}

// ════════════════════════════════════════════════════════════════════
// Directory-level annotation detection
// ════════════════════════════════════════════════════════════════════

#[test]
fn detects_directory_import() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(
        &tmp,
        "acme_demo:\n    resource: \"@AcmeDemoBundle/Controller/\"\n    type:     annotation\n",
    );

    let manipulator = RoutingManipulator::new(&path);
    assert!(manipulator.has_resource_in_annotation("AcmeDemoBundle").unwrap());
}

#[test]
fn single_controller_import_is_not_directory_import() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(
        &tmp,
        "acme_demo_post:\n    resource: \"@AcmeDemoBundle/Controller/PostController.php\"\n    type:     annotation\n",
    );

    let manipulator = RoutingManipulator::new(&path);
    assert!(!manipulator.has_resource_in_annotation("AcmeDemoBundle").unwrap());
}

#[test]
fn detects_inline_directory_import_after_other_entries() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(
        &tmp,
        "app:\n    resource: '@AppBundle/Controller/'\n    type: annotation\n\nacme_demo: { resource: '@AcmeDemoBundle/Controller/', type: annotation }\n",
    );

    let manipulator = RoutingManipulator::new(&path);
    assert!(manipulator.has_resource_in_annotation("AcmeDemoBundle").unwrap());
    assert!(manipulator.has_resource_in_annotation("AppBundle").unwrap());
    assert!(!manipulator.has_resource_in_annotation("OtherBundle").unwrap());
}

#[test]
fn commented_directory_import_is_ignored() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(
        &tmp,
        "#acme_demo:\n#    resource: \"@AcmeDemoBundle/Controller/\"\n",
    );

    let manipulator = RoutingManipulator::new(&path);
    assert!(!manipulator.has_resource_in_annotation("AcmeDemoBundle").unwrap());
}

#[test]
fn bundle_name_prefix_does_not_match_longer_bundle() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "x:\n    resource: \"@AcmeDemoBundle/Controller/\"\n");

    let manipulator = RoutingManipulator::new(&path);
    assert!(!manipulator.has_resource_in_annotation("AcmeDemo").unwrap());
}

#[test]
fn detection_rejects_empty_bundle() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "x:\n    resource: \"@/Controller/\"\n");

    let manipulator = RoutingManipulator::new(&path);
    assert!(matches!(
        manipulator.has_resource_in_annotation(""),
        Err(Error::InvalidBundleName(_))
    ));
}

#[test]
fn missing_routing_file_is_not_an_error_for_detection() {
    let tmp = TempDir::new().unwrap();
    let manipulator = RoutingManipulator::new(tmp.path().join("missing.yml"));
    assert!(!manipulator.has_resource_in_annotation("AcmeDemoBundle").unwrap());
}

// ════════════════════════════════════════════════════════════════════
// add_resource
// ════════════════════════════════════════════════════════════════════

#[test]
fn annotation_add_is_noop_when_directory_already_imported() {
    let tmp = TempDir::new().unwrap();
    let original = "# app routes\nacme_blog:\n    resource: \"@AcmeBlogBundle/Controller/\"\n    type:     annotation\n";
    let path = routing_file(&tmp, original);
    let manipulator = RoutingManipulator::new(&path);

    let first = manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Annotation, Some("Post"), "/blog")
        .unwrap();
    let after_first = fs::read(&path).unwrap();
    let second = manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Annotation, Some("Post"), "/blog")
        .unwrap();
    let after_second = fs::read(&path).unwrap();

    assert_eq!(first, AddOutcome::AlreadyCovered);
    assert_eq!(second, AddOutcome::AlreadyCovered);
    assert_eq!(after_first, original.as_bytes());
    assert_eq!(after_second, after_first);
}

#[test]
fn annotation_add_appends_directory_import_without_controller() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "app:\n    resource: \"@AppBundle/Controller/\"\n    type:     annotation\n");
    let manipulator = RoutingManipulator::new(&path);

    let outcome = manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Annotation, None, "/blog")
        .unwrap();

    assert_eq!(
        outcome,
        AddOutcome::Appended {
            key: "acme_blog_blog".into(),
            resource: "@AcmeBlogBundle/Controller/".into(),
        }
    );
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "app:\n    resource: \"@AppBundle/Controller/\"\n    type:     annotation\n\n\
         acme_blog_blog:\n    resource: \"@AcmeBlogBundle/Controller/\"\n    type:     annotation\n    prefix:   /blog\n"
    );
    assert!(manipulator.has_resource_in_annotation("AcmeBlogBundle").unwrap());
}

#[test]
fn yml_add_appends_every_time() {
    let tmp = TempDir::new().unwrap();
    let original = "app:\n    resource: \"@AppBundle/Controller/\"\n    type:     annotation\n";
    let path = routing_file(&tmp, original);
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Yml, Some("Post"), "/")
        .unwrap();
    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Yml, Some("Comment"), "/")
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(original));
    assert!(content.contains(
        "acme_blog_post: { resource: \"@AcmeBlogBundle/Controller/PostController.php\" }\n"
    ));
    assert!(content.contains(
        "acme_blog_comment: { resource: \"@AcmeBlogBundle/Controller/CommentController.php\" }\n"
    ));
}

#[test]
fn yml_add_does_not_deduplicate() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "");
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Yml, Some("Post"), "/admin")
        .unwrap();
    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Yml, Some("Post"), "/admin")
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let block = "acme_blog_admin_post: { resource: \"@AcmeBlogBundle/Controller/PostController.php\", prefix: /admin }\n";
    assert_eq!(content.matches(block).count(), 2);
}

#[test]
fn xml_add_without_controller_imports_bundle_routing_file() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "");
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Xml, None, "")
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "acme_blog: { resource: \"@AcmeBlogBundle/Resources/config/routing.xml\" }\n"
    );
}

#[test]
fn add_keeps_content_without_trailing_newline() {
    let tmp = TempDir::new().unwrap();
    let original = "app:\n    resource: \"@AppBundle/Controller/\"\n    type:     annotation";
    let path = routing_file(&tmp, original);
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Php, Some("Post"), "")
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(original));
    assert_eq!(
        &content[original.len()..],
        "\n\nacme_blog_post: { resource: \"@AcmeBlogBundle/Controller/PostController.php\" }\n"
    );
}

#[test]
fn add_to_missing_file_fails_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let manipulator = RoutingManipulator::new(tmp.path().join("missing.yml"));

    let result = manipulator.add_resource("AcmeBlogBundle", RoutingFormat::Yml, Some("Post"), "");
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn add_validates_bundle_before_touching_file() {
    let tmp = TempDir::new().unwrap();
    // The file does not exist: a bundle error proves validation happens first.
    let manipulator = RoutingManipulator::new(tmp.path().join("missing.yml"));

    let result = manipulator.add_resource("", RoutingFormat::Annotation, None, "");
    assert!(matches!(result, Err(Error::InvalidBundleName(_))));
}

#[test]
fn scaffolding_a_controller_next_to_a_file_scoped_import() {
    let tmp = TempDir::new().unwrap();
    let original = "acme_blog: { resource: \"@AcmeBlogBundle/Controller/OtherController.php\", type: annotation }\n";
    let path = routing_file(&tmp, original);
    let manipulator = RoutingManipulator::new(&path);

    assert!(!manipulator.has_resource_in_annotation("AcmeBlogBundle").unwrap());
    let outcome = manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Annotation, Some("Post"), "")
        .unwrap();

    assert_eq!(
        outcome,
        AddOutcome::Appended {
            key: "acme_blog_post".into(),
            resource: "@AcmeBlogBundle/Controller/PostController.php".into(),
        }
    );
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!(
            "{original}\nacme_blog_post:\n    resource: \"@AcmeBlogBundle/Controller/PostController.php\"\n    type:     annotation\n"
        )
    );
}

// ════════════════════════════════════════════════════════════════════
// import_bundle
// ════════════════════════════════════════════════════════════════════

#[test]
fn import_bundle_creates_missing_routing_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app/config/routing.yml");
    let manipulator = RoutingManipulator::new(&path);

    let key = manipulator
        .import_bundle("AcmeBlogBundle", RoutingFormat::Annotation, "")
        .unwrap();

    assert_eq!(key, "acme_blog");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "acme_blog:\n    resource: \"@AcmeBlogBundle/Controller/\"\n    type:     annotation\n    prefix:   /\n"
    );
}

#[test]
fn import_bundle_with_yml_references_bundle_routing() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "app:\n    resource: \"@AppBundle/Controller/\"\n");
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .import_bundle("AcmeBlogBundle", RoutingFormat::Yml, "/{_locale}/blog")
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with(
        "\n\nacme_blog_blog:\n    resource: \"@AcmeBlogBundle/Resources/config/routing.yml\"\n    prefix:   /{_locale}/blog\n"
    ));
}

#[test]
fn import_bundle_twice_is_refused() {
    let tmp = TempDir::new().unwrap();
    let path = routing_file(&tmp, "");
    let manipulator = RoutingManipulator::new(&path);

    manipulator
        .import_bundle("AcmeBlogBundle", RoutingFormat::Annotation, "/blog")
        .unwrap();
    let before = fs::read(&path).unwrap();
    let result = manipulator.import_bundle("AcmeBlogBundle", RoutingFormat::Annotation, "/blog");

    assert!(matches!(result, Err(Error::AlreadyImported { ref key, .. }) if key == "acme_blog_blog"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn annotation_controller_key_leaves_prefix_out() {
    let tmp = TempDir::new().unwrap();
    let original = "acme_blog:\n    resource: \"@AcmeBlogBundle/Resources/config/routing.xml\"\n    prefix:   /\n";
    let path = routing_file(&tmp, original);
    let manipulator = RoutingManipulator::new(&path);

    let outcome = manipulator
        .add_resource("AcmeBlogBundle", RoutingFormat::Annotation, Some("Post"), "/foobar")
        .unwrap();

    assert_eq!(
        outcome,
        AddOutcome::Appended {
            key: "acme_blog_post".into(),
            resource: "@AcmeBlogBundle/Controller/PostController.php".into(),
        }
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!(
            "{original}\nacme_blog_post:\n    resource: \"@AcmeBlogBundle/Controller/PostController.php\"\n    type:     annotation\n    prefix:   /foobar\n"
        )
    );
}
