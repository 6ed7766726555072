//! Routing file manipulation.
//!
//! The routing file is treated as semi-structured text. Detection is a
//! line-oriented scan and every mutation is a pure append. Existing content
//! is never reformatted.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs;
use crate::model::RoutingFormat;
use crate::naming::{bundle_base_name, literal_segments, to_snake_case, validate_bundle_name};

/// Result of [`RoutingManipulator::add_resource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A block was appended under `key`.
    Appended { key: String, resource: String },
    /// The bundle's whole controller directory is already imported for
    /// annotation routing; nothing was written.
    AlreadyCovered,
}

/// Derive the routing import key for a bundle mounted under `prefix`.
///
/// The bundle name loses its `Bundle` suffix and is snake-cased; every literal
/// segment of the prefix is appended with `_`. Placeholders (`{_locale}`,
/// `{id}`, ...) and empty segments contribute nothing.
///
/// ```
/// use bundlegen_core::routing::derive_import_key;
///
/// assert_eq!(derive_import_key("AcmeBlogBundle", "").unwrap(), "acme_blog");
/// assert_eq!(
///     derive_import_key("AppBundle", "/{_locale}/foo/{_format}/bar//").unwrap(),
///     "app_foo_bar"
/// );
/// ```
pub fn derive_import_key(bundle: &str, prefix: &str) -> Result<String> {
    validate_bundle_name(bundle)?;
    let mut key = bundle_base_name(bundle);
    for segment in literal_segments(prefix) {
        key.push('_');
        key.push_str(&segment);
    }
    Ok(key)
}

/// Reads, inspects and appends to one routing configuration file.
#[derive(Debug, Clone)]
pub struct RoutingManipulator {
    file: PathBuf,
}

impl RoutingManipulator {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        RoutingManipulator { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Whether the routing file imports the bundle's whole `Controller/`
    /// directory (`resource: "@AcmeBlogBundle/Controller/"`).
    ///
    /// Imports of a single controller file do not count. A missing routing
    /// file yields `false`.
    pub fn has_resource_in_annotation(&self, bundle: &str) -> Result<bool> {
        validate_bundle_name(bundle)?;
        let Some(content) = fs::read_optional(&self.file)? else {
            tracing::debug!(file = %self.file.display(), "routing file missing");
            return Ok(false);
        };
        Ok(imports_controller_directory(&content, bundle))
    }

    /// Append an import for a freshly generated controller.
    ///
    /// With [`RoutingFormat::Annotation`] nothing is written when the bundle's
    /// controller directory is already imported. Otherwise the block imports
    /// `controller`'s file, or the whole directory when no controller is given.
    ///
    /// Other formats always append an inline block referencing the controller
    /// file, or the bundle's own routing file when no controller is given.
    /// Colliding keys are left for the user to resolve.
    pub fn add_resource(
        &self,
        bundle: &str,
        format: RoutingFormat,
        controller: Option<&str>,
        prefix: &str,
    ) -> Result<AddOutcome> {
        let base_key = derive_import_key(bundle, prefix)?;
        let current = fs::read_file(&self.file)?;

        // Annotation controller keys leave the prefix out: it is already the
        // block's `prefix:` field.
        let key = match controller {
            Some(controller) if format.is_annotation() => format!(
                "{}_{}",
                bundle_base_name(bundle),
                to_snake_case(controller_short(controller))
            ),
            Some(controller) => format!("{base_key}_{}", to_snake_case(controller_short(controller))),
            None => base_key,
        };

        let (resource, block) = if format.is_annotation() {
            if imports_controller_directory(&current, bundle) {
                tracing::info!(bundle, "controller directory already imported, routing untouched");
                return Ok(AddOutcome::AlreadyCovered);
            }
            let resource = match controller {
                Some(controller) => controller_file_resource(bundle, controller),
                None => controller_dir_resource(bundle),
            };
            let block = annotation_block(&key, &resource, meaningful_prefix(prefix));
            (resource, block)
        } else {
            let resource = match controller {
                Some(controller) => controller_file_resource(bundle, controller),
                None => bundle_routing_resource(bundle, format),
            };
            let block = inline_block(&key, &resource, meaningful_prefix(prefix));
            (resource, block)
        };

        self.append(current, &block)?;
        tracing::info!(file = %self.file.display(), key, resource, "routing import appended");
        Ok(AddOutcome::Appended { key, resource })
    }

    /// Append a bundle-level import keyed by [`derive_import_key`].
    ///
    /// Fails with [`Error::AlreadyImported`] when a block with that key
    /// already exists. A missing routing file is created.
    pub fn import_bundle(&self, bundle: &str, format: RoutingFormat, prefix: &str) -> Result<String> {
        let key = derive_import_key(bundle, prefix)?;
        let current = fs::read_optional(&self.file)?.unwrap_or_default();

        if has_block_key(&current, &key) {
            return Err(Error::AlreadyImported {
                bundle: bundle.to_string(),
                key,
            });
        }

        let mut block = format!("{key}:\n");
        if format.is_annotation() {
            block.push_str(&format!(
                "    resource: \"{}\"\n    type:     annotation\n",
                controller_dir_resource(bundle)
            ));
        } else {
            block.push_str(&format!(
                "    resource: \"{}\"\n",
                bundle_routing_resource(bundle, format)
            ));
        }
        let prefix = if prefix.is_empty() { "/" } else { prefix };
        block.push_str(&format!("    prefix:   {prefix}\n"));

        if current.is_empty() {
            if let Some(dir) = self.file.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|source| Error::FileWriteFailure {
                    path: self.file.clone(),
                    source,
                })?;
            }
        }
        self.append(current, &block)?;
        tracing::info!(file = %self.file.display(), key, "bundle import appended");
        Ok(key)
    }

    fn append(&self, mut content: String, block: &str) -> Result<()> {
        if !content.is_empty() {
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push('\n');
        }
        content.push_str(block);
        fs::write_atomic(&self.file, &content)
    }
}

fn controller_dir_resource(bundle: &str) -> String {
    format!("@{bundle}/Controller/")
}

fn controller_short(controller: &str) -> &str {
    controller.strip_suffix("Controller").unwrap_or(controller)
}

fn controller_file_resource(bundle: &str, controller: &str) -> String {
    format!("@{bundle}/Controller/{}Controller.php", controller_short(controller))
}

fn bundle_routing_resource(bundle: &str, format: RoutingFormat) -> String {
    format!("@{bundle}/Resources/config/routing.{format}")
}

fn meaningful_prefix(prefix: &str) -> Option<&str> {
    let trimmed = prefix.trim();
    if trimmed.is_empty() || trimmed == "/" {
        None
    } else {
        Some(trimmed)
    }
}

fn annotation_block(key: &str, resource: &str, prefix: Option<&str>) -> String {
    let mut block = format!("{key}:\n    resource: \"{resource}\"\n    type:     annotation\n");
    if let Some(prefix) = prefix {
        block.push_str(&format!("    prefix:   {prefix}\n"));
    }
    block
}

fn inline_block(key: &str, resource: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{key}: {{ resource: \"{resource}\", prefix: {prefix} }}\n"),
        None => format!("{key}: {{ resource: \"{resource}\" }}\n"),
    }
}

/// Whether a top-level block named `key` starts on some line.
fn has_block_key(content: &str, key: &str) -> bool {
    content.lines().any(|line| {
        line.strip_prefix(key)
            .map(|rest| rest.trim_start().starts_with(':'))
            .unwrap_or(false)
    })
}

/// Extract the value of a `resource:` field on this line, if any.
///
/// Handles block style (`    resource: "@X/Controller/"`) and inline
/// mappings (`x: { resource: '@X/Controller/', type: annotation }`), quoted
/// or bare. Commented lines are skipped.
fn resource_value(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }

    let start = find_field(trimmed, "resource")?;
    let rest = trimmed[start..].trim_start();

    match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            inner.find(quote).map(|end| &inner[..end])
        }
        _ => {
            let end = rest
                .find(|c: char| c == ',' || c == '}' || c == '#' || c.is_whitespace())
                .unwrap_or(rest.len());
            Some(&rest[..end])
        }
    }
}

/// Byte offset just past `name:` where `name` appears as a field key.
fn find_field(line: &str, name: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(name) {
        let at = from + pos;
        let before_ok = line[..at]
            .chars()
            .next_back()
            .map_or(true, |c| c == '{' || c == ',' || c.is_whitespace());
        let after = line[at + name.len()..].trim_start();
        if before_ok && after.starts_with(':') {
            let colon = line.len() - after.len();
            return Some(colon + 1);
        }
        from = at + name.len();
    }
    None
}

fn imports_controller_directory(content: &str, bundle: &str) -> bool {
    let found = content
        .lines()
        .filter_map(resource_value)
        .any(|resource| is_controller_directory(resource, bundle));
    tracing::debug!(bundle, found, "scanned for directory-level annotation import");
    found
}

/// `@Bundle/Controller/` or `@Bundle/Controller`, but not a file or subdirectory.
fn is_controller_directory(resource: &str, bundle: &str) -> bool {
    resource
        .strip_prefix('@')
        .and_then(|r| r.strip_prefix(bundle))
        .and_then(|r| r.strip_prefix("/Controller"))
        .map_or(false, |rest| rest.is_empty() || rest == "/")
}
