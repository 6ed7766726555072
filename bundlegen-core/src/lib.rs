//! # bundlegen-core
//!
//! Building blocks of the `bundlegen` scaffolding tool.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`routing`] | derive import keys, detect and append routing imports |
//! | [`kernel`] | register a bundle in the kernel's `registerBundles()` |
//! | [`generator`] | write controller, test, bundle class and console command skeletons |
//! | [`model`] | bundles, `Bundle:Controller` shortcuts, action specs, formats |
//! | [`naming`] | case conversion and route placeholder helpers |
//! | [`config`] | `bundlegen.yaml` + environment configuration |
//!
//! File edits never reparse the target: detection is a text scan and
//! mutation is an insertion, written atomically.

pub mod config;
pub mod error;
pub mod fs;
pub mod generator;
pub mod kernel;
pub mod model;
pub mod naming;
pub mod routing;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use generator::{
    generate_bundle_class, generate_command, ControllerGenerator, GeneratedController, SkeletonControllerGenerator,
};
pub use kernel::KernelManipulator;
pub use model::{bundle_name_from_namespace, parse_actions, Action, Bundle, ControllerShortcut, RoutingFormat};
pub use routing::{derive_import_key, AddOutcome, RoutingManipulator};
