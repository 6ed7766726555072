//! # bundlegen-cli
//!
//! Command-line front end for scaffolding bundles and controllers.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bundlegen generate controller <Bundle:Name>` | Write a controller skeleton and import it in the routing file |
//! | `bundlegen generate bundle <namespace>` | Write a bundle class, register it in the kernel, import its routes |
//! | `bundlegen generate command <bundle> <name>` | Write a console command skeleton |
//! | `bundlegen routing key <bundle> [prefix]` | Print the import key for a bundle and prefix |
//! | `bundlegen routing check <bundle>` | Check for a directory-level annotation import |
//! | `bundlegen routing import <bundle>` | Append a bundle-level routing import |
//! | `bundlegen kernel register <class>` | Register a bundle class in the kernel |
//!
//! Paths and defaults come from `bundlegen.yaml` and `BUNDLEGEN_*` variables,
//! see [`bundlegen_core::GeneratorConfig`].

pub mod commands;
