use bundlegen_core::{GeneratorConfig, KernelManipulator};
use colored::Colorize;

/// Register a bundle class (`Acme\BlogBundle\AcmeBlogBundle`) in the kernel.
///
/// Prints a warning (but returns `Ok`) if the bundle is already registered.
pub fn register(config: &GeneratorConfig, class: &str) -> Result<(), Box<dyn std::error::Error>> {
    let kernel = KernelManipulator::new(&config.kernel_file);

    if kernel.is_bundle_registered(class)? {
        println!(
            "{} {} is already registered in {}",
            "!".yellow(),
            class.cyan(),
            kernel.file().display()
        );
        return Ok(());
    }

    kernel.register_bundle(class)?;
    println!(
        "{} Registered {} in {}",
        "✓".green(),
        class.cyan(),
        kernel.file().display()
    );

    Ok(())
}
