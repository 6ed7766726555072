//! Command implementations for the `bundlegen` CLI.
//!
//! Each submodule corresponds to a top-level CLI command. Commands receive the
//! resolved [`bundlegen_core::GeneratorConfig`] explicitly.

/// Code generation: `bundlegen generate`.
///
/// Subcommands: `controller` (skeleton + routing import), `bundle`
/// (bundle class + kernel registration + routing import) and `command`
/// (console command skeleton).
pub mod generate;

/// Kernel edits: `bundlegen kernel register <class>`.
pub mod kernel;

/// Routing file inspection and imports: `bundlegen routing`.
///
/// `key` prints the import key for a bundle and prefix, `check` reports
/// whether the bundle's controller directory is imported, `import` appends a
/// bundle-level import.
pub mod routing;
