use bundlegen_core::{derive_import_key, GeneratorConfig, RoutingFormat, RoutingManipulator};
use colored::Colorize;

/// Print the import key derived from `bundle` and `prefix`.
pub fn key(bundle: &str, prefix: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", derive_import_key(bundle, prefix)?);
    Ok(())
}

/// Report whether the routing file imports the bundle's whole controller directory.
///
/// Returns the detection result so callers can turn it into an exit status.
pub fn check(config: &GeneratorConfig, bundle: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let manipulator = RoutingManipulator::new(&config.routing_file);
    let imported = manipulator.has_resource_in_annotation(bundle)?;

    if imported {
        println!(
            "{} {} controllers are imported by {}",
            "✓".green(),
            bundle.cyan(),
            manipulator.file().display()
        );
    } else {
        println!(
            "{} No directory-level annotation import for {} in {}",
            "!".yellow(),
            bundle.cyan(),
            manipulator.file().display()
        );
    }

    Ok(imported)
}

/// Append a bundle-level import.
pub fn import(
    config: &GeneratorConfig,
    bundle: &str,
    format: Option<RoutingFormat>,
    prefix: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let manipulator = RoutingManipulator::new(&config.routing_file);
    let format = format.unwrap_or(config.route_format);
    let prefix = prefix.unwrap_or(&config.prefix);

    let key = manipulator.import_bundle(bundle, format, prefix)?;
    println!(
        "{} Imported {} as {} in {}",
        "✓".green(),
        bundle.cyan(),
        key.cyan(),
        manipulator.file().display()
    );

    Ok(())
}
