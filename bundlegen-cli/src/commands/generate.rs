use bundlegen_core::{
    bundle_name_from_namespace, generate_bundle_class, generate_command, parse_actions, AddOutcome, Bundle,
    ControllerGenerator, ControllerShortcut, GeneratorConfig, KernelManipulator, RoutingFormat,
    RoutingManipulator, SkeletonControllerGenerator,
};
use colored::Colorize;
use std::path::PathBuf;

/// Options of `bundlegen generate controller`. Unset values fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// `AcmeBlogBundle:Post`
    pub controller: String,
    pub route_format: Option<RoutingFormat>,
    pub template_format: Option<String>,
    pub actions: Vec<String>,
    pub prefix: Option<String>,
    /// Bundle namespace; defaults to the bundle name.
    pub namespace: Option<String>,
    /// Bundle root; defaults to `<bundles_dir>/<namespace>`.
    pub bundle_path: Option<PathBuf>,
}

/// Options of `bundlegen generate bundle`.
#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    /// `Acme\BlogBundle` or `Acme/BlogBundle`
    pub namespace: String,
    pub bundle_name: Option<String>,
    pub format: Option<RoutingFormat>,
    pub prefix: Option<String>,
    pub skip_kernel: bool,
    pub skip_routing: bool,
}

/// Options of `bundlegen generate command`.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// `AcmeBlogBundle`
    pub bundle: String,
    /// Console name, e.g. `app:foo-bar`
    pub name: String,
    pub namespace: Option<String>,
    pub bundle_path: Option<PathBuf>,
}

/// Generate a controller skeleton and import it in the application routing.
///
/// With annotation routing the import is skipped when the bundle's whole
/// `Controller/` directory is already imported.
pub fn controller(
    config: &GeneratorConfig,
    options: &ControllerOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    controller_with(&SkeletonControllerGenerator, config, options)
}

/// Same as [`controller`] with a caller-supplied generator.
pub fn controller_with<G: ControllerGenerator>(
    generator: &G,
    config: &GeneratorConfig,
    options: &ControllerOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let shortcut: ControllerShortcut = options.controller.parse()?;
    let route_format = options.route_format.unwrap_or(config.route_format);
    let template_format = options
        .template_format
        .as_deref()
        .unwrap_or(&config.template_format);
    let prefix = options.prefix.as_deref().unwrap_or(&config.prefix);
    let actions = parse_actions(&options.actions)?;

    let namespace = options.namespace.as_deref().unwrap_or(&shortcut.bundle);
    let path = options
        .bundle_path
        .clone()
        .unwrap_or_else(|| config.bundle_path(namespace));
    let bundle = Bundle::new(shortcut.bundle.as_str(), namespace, path)?;

    // Nothing is generated unless the routing file can be updated afterwards.
    let manipulator = RoutingManipulator::new(&config.routing_file);
    bundlegen_core::fs::read_file(manipulator.file())?;

    let generated = generator.generate(
        &bundle,
        &shortcut.controller,
        route_format,
        template_format,
        &actions,
    )?;

    let outcome = match manipulator.add_resource(
        &bundle.name,
        route_format,
        Some(shortcut.controller.as_str()),
        prefix,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            for path in [&generated.controller, &generated.test] {
                if let Err(err) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %err, "could not remove generated file");
                }
            }
            return Err(e.into());
        }
    };

    println!(
        "{} Generated controller: {}",
        "✓".green(),
        generated.controller.display().to_string().cyan()
    );
    println!(
        "{} Generated test: {}",
        "✓".green(),
        generated.test.display().to_string().cyan()
    );
    if let Some(routing) = &generated.routing {
        println!(
            "{} Updated {}",
            "✓".green(),
            routing.display().to_string().cyan()
        );
    }

    match outcome {
        AddOutcome::Appended { key, resource } => println!(
            "{} Imported {} as {} in {}",
            "✓".green(),
            resource.cyan(),
            key.cyan(),
            manipulator.file().display()
        ),
        AddOutcome::AlreadyCovered => println!(
            "{} {} controllers are already imported in {}",
            "!".yellow(),
            bundle.name.cyan(),
            manipulator.file().display()
        ),
    }

    Ok(())
}

/// Generate a bundle class, register it in the kernel and import its routes.
pub fn bundle(
    config: &GeneratorConfig,
    options: &BundleOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespace = options.namespace.replace('/', "\\");
    let name = match &options.bundle_name {
        Some(name) => name.clone(),
        None => bundle_name_from_namespace(&namespace)?,
    };
    let format = options.format.unwrap_or(config.route_format);
    let prefix = options.prefix.as_deref().unwrap_or(&config.prefix);
    let bundle = Bundle::new(name, namespace.as_str(), config.bundle_path(&namespace))?;

    let class_file = generate_bundle_class(&bundle)?;
    println!(
        "{} Generated bundle: {}",
        "✓".green(),
        class_file.display().to_string().cyan()
    );

    if options.skip_kernel {
        println!("{} Kernel left untouched", "!".yellow());
    } else {
        let kernel = KernelManipulator::new(&config.kernel_file);
        kernel.register_bundle(&bundle.class_name())?;
        println!(
            "{} Registered {} in {}",
            "✓".green(),
            bundle.class_name().cyan(),
            kernel.file().display()
        );
    }

    if options.skip_routing {
        println!("{} Routing left untouched", "!".yellow());
    } else {
        let routing = RoutingManipulator::new(&config.routing_file);
        let key = routing.import_bundle(&bundle.name, format, prefix)?;
        println!(
            "{} Imported {} as {} in {}",
            "✓".green(),
            bundle.name.cyan(),
            key.cyan(),
            routing.file().display()
        );
    }

    Ok(())
}

/// Generate a console command skeleton in a bundle.
pub fn command(
    config: &GeneratorConfig,
    options: &CommandOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespace = options.namespace.as_deref().unwrap_or(&options.bundle);
    let path = options
        .bundle_path
        .clone()
        .unwrap_or_else(|| config.bundle_path(namespace));
    let bundle = Bundle::new(options.bundle.as_str(), namespace, path)?;

    let file = generate_command(&bundle, &options.name)?;
    println!(
        "{} Generated command {}: {}",
        "✓".green(),
        options.name.cyan(),
        file.display().to_string().cyan()
    );

    Ok(())
}
