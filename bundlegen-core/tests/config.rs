use bundlegen_core::{Error, GeneratorConfig, RoutingFormat};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn defaults() {
    let config = GeneratorConfig::default();
    assert_eq!(config.routing_file, PathBuf::from("app/config/routing.yml"));
    assert_eq!(config.kernel_file, PathBuf::from("app/AppKernel.php"));
    assert_eq!(config.route_format, RoutingFormat::Annotation);
    assert_eq!(config.template_format, "twig");
    assert_eq!(config.prefix, "/");
}

#[test]
fn yaml_overrides_only_given_keys() {
    let config = GeneratorConfig::from_yaml_str(
        "routing_file: config/routes.yaml\nroute_format: yaml\n",
    )
    .unwrap();
    assert_eq!(config.routing_file, PathBuf::from("config/routes.yaml"));
    assert_eq!(config.route_format, RoutingFormat::Yml);
    assert_eq!(config.kernel_file, PathBuf::from("app/AppKernel.php"));
}

#[test]
fn empty_yaml_is_defaults() {
    assert_eq!(GeneratorConfig::from_yaml_str("\n").unwrap(), GeneratorConfig::default());
}

#[test]
fn yaml_with_unknown_format_is_rejected() {
    let result = GeneratorConfig::from_yaml_str("route_format: ini\n");
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("ini")));
}

#[test]
fn yaml_with_unknown_key_is_rejected() {
    assert!(GeneratorConfig::from_yaml_str("routing: x\n").is_err());
}

#[test]
fn env_overrides_yaml() {
    let mut config = GeneratorConfig::from_yaml_str("prefix: /blog\n").unwrap();
    config
        .apply_env(vars(&[
            ("BUNDLEGEN_PREFIX", "/admin"),
            ("BUNDLEGEN_ROUTE_FORMAT", "xml"),
            ("BUNDLEGEN_KERNEL_FILE", "app/Kernel.php"),
            ("PATH", "/usr/bin"),
        ]))
        .unwrap();

    assert_eq!(config.prefix, "/admin");
    assert_eq!(config.route_format, RoutingFormat::Xml);
    assert_eq!(config.kernel_file, PathBuf::from("app/Kernel.php"));
}

#[test]
fn env_with_unknown_format_is_rejected() {
    let mut config = GeneratorConfig::default();
    let result = config.apply_env(vars(&[("BUNDLEGEN_ROUTE_FORMAT", "ini")]));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn bundle_path_follows_namespace() {
    let config = GeneratorConfig::default();
    assert_eq!(
        config.bundle_path("Acme\\BlogBundle"),
        PathBuf::from("src").join("Acme").join("BlogBundle")
    );
    assert_eq!(config.bundle_path("Acme/BlogBundle"), config.bundle_path("Acme\\BlogBundle"));
}

#[test]
#[serial]
fn load_reads_file_and_environment() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("bundlegen.yaml", "template_format: php\nbundles_dir: lib\n").unwrap();
    std::env::set_var("BUNDLEGEN_BUNDLES_DIR", "packages");

    let config = GeneratorConfig::load(Path::new("bundlegen.yaml"));
    std::env::remove_var("BUNDLEGEN_BUNDLES_DIR");

    let config = config.unwrap();
    assert_eq!(config.template_format, "php");
    assert_eq!(config.bundles_dir, PathBuf::from("packages"));
}

#[test]
#[serial]
fn load_without_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    let config = GeneratorConfig::load(Path::new("bundlegen.yaml")).unwrap();
    assert_eq!(config.routing_file, PathBuf::from("app/config/routing.yml"));
}
