use bundlegen_cli::commands::generate::{BundleOptions, CommandOptions, ControllerOptions};
use bundlegen_cli::commands::{generate, kernel, routing};
use bundlegen_core::{GeneratorConfig, RoutingFormat};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bundlegen", version, about = "Scaffold bundles and controllers")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = bundlegen_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a controller or a bundle
    Generate {
        #[command(subcommand)]
        kind: GenerateKind,
    },
    /// Inspect or extend the application routing file
    Routing {
        #[command(subcommand)]
        action: RoutingAction,
    },
    /// Edit the application kernel
    Kernel {
        #[command(subcommand)]
        action: KernelAction,
    },
}

#[derive(Subcommand)]
enum GenerateKind {
    /// Generate a new controller
    Controller {
        /// Controller shortcut (e.g. AcmeBlogBundle:Post)
        controller: String,
        /// Routing format (annotation, yml, xml, php)
        #[arg(long)]
        route_format: Option<RoutingFormat>,
        /// Template format (e.g. twig, php)
        #[arg(long)]
        template_format: Option<String>,
        /// Actions as name[:route[:template]] (e.g. showAction:/{slug})
        #[arg(long, num_args = 1..)]
        actions: Vec<String>,
        /// Route prefix used for the routing import key
        #[arg(long)]
        prefix: Option<String>,
        /// Bundle namespace (defaults to the bundle name)
        #[arg(long)]
        namespace: Option<String>,
        /// Bundle root directory (defaults to <bundles_dir>/<namespace>)
        #[arg(long)]
        bundle_path: Option<PathBuf>,
    },
    /// Generate a new bundle
    Bundle {
        /// Bundle namespace (e.g. Acme/BlogBundle)
        namespace: String,
        /// Bundle name (defaults to the namespace without separators)
        #[arg(long)]
        bundle_name: Option<String>,
        /// Routing format (annotation, yml, xml, php)
        #[arg(long)]
        format: Option<RoutingFormat>,
        /// Route prefix of the bundle import
        #[arg(long)]
        prefix: Option<String>,
        /// Do not register the bundle in the kernel
        #[arg(long)]
        no_kernel: bool,
        /// Do not import the bundle in the routing file
        #[arg(long)]
        no_routing: bool,
    },
    /// Generate a console command in a bundle
    Command {
        /// Bundle name (e.g. AcmeBlogBundle)
        bundle: String,
        /// Command name (e.g. app:foo-bar)
        name: String,
        /// Bundle namespace (defaults to the bundle name)
        #[arg(long)]
        namespace: Option<String>,
        /// Bundle root directory (defaults to <bundles_dir>/<namespace>)
        #[arg(long)]
        bundle_path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RoutingAction {
    /// Print the import key for a bundle and prefix
    Key {
        /// Bundle name (e.g. AcmeBlogBundle)
        bundle: String,
        /// Route prefix (e.g. /{_locale}/blog)
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Check whether the bundle's controller directory is imported (exits 1 when it is not)
    Check {
        /// Bundle name (e.g. AcmeBlogBundle)
        bundle: String,
    },
    /// Append a bundle-level import
    Import {
        /// Bundle name (e.g. AcmeBlogBundle)
        bundle: String,
        /// Routing format (annotation, yml, xml, php)
        #[arg(long)]
        format: Option<RoutingFormat>,
        /// Route prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[derive(Subcommand)]
enum KernelAction {
    /// Register a bundle class (e.g. Acme\BlogBundle\AcmeBlogBundle)
    Register {
        /// Fully qualified bundle class
        class: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = GeneratorConfig::load(&cli.config)?;
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Generate { kind } => match kind {
            GenerateKind::Controller {
                controller,
                route_format,
                template_format,
                actions,
                prefix,
                namespace,
                bundle_path,
            } => generate::controller(
                &config,
                &ControllerOptions {
                    controller,
                    route_format,
                    template_format,
                    actions,
                    prefix,
                    namespace,
                    bundle_path,
                },
            )?,
            GenerateKind::Bundle {
                namespace,
                bundle_name,
                format,
                prefix,
                no_kernel,
                no_routing,
            } => generate::bundle(
                &config,
                &BundleOptions {
                    namespace,
                    bundle_name,
                    format,
                    prefix,
                    skip_kernel: no_kernel,
                    skip_routing: no_routing,
                },
            )?,
            GenerateKind::Command {
                bundle,
                name,
                namespace,
                bundle_path,
            } => generate::command(
                &config,
                &CommandOptions {
                    bundle,
                    name,
                    namespace,
                    bundle_path,
                },
            )?,
        },
        Commands::Routing { action } => match action {
            RoutingAction::Key { bundle, prefix } => routing::key(&bundle, &prefix)?,
            RoutingAction::Check { bundle } => {
                if !routing::check(&config, &bundle)? {
                    return Ok(1);
                }
            }
            RoutingAction::Import {
                bundle,
                format,
                prefix,
            } => routing::import(&config, &bundle, format, prefix.as_deref())?,
        },
        Commands::Kernel { action } => match action {
            KernelAction::Register { class } => kernel::register(&config, &class)?,
        },
    }

    Ok(0)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
    }
}
