//! Controller skeleton generation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs;
use crate::model::{Action, Bundle, RoutingFormat};
use crate::naming::{action_base, command_class_name, to_pascal_case, to_snake_case};

/// Files written by a [`ControllerGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedController {
    pub controller: PathBuf,
    pub test: PathBuf,
    /// Bundle routing file that received route definitions, for the yml format.
    pub routing: Option<PathBuf>,
}

/// Writes the source files for a new controller.
pub trait ControllerGenerator {
    fn generate(
        &self,
        bundle: &Bundle,
        controller: &str,
        route_format: RoutingFormat,
        template_format: &str,
        actions: &[Action],
    ) -> Result<GeneratedController>;
}

/// Writes a minimal controller, its functional test and, for yml routing, the
/// bundle's route definitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkeletonControllerGenerator;

impl ControllerGenerator for SkeletonControllerGenerator {
    fn generate(
        &self,
        bundle: &Bundle,
        controller: &str,
        route_format: RoutingFormat,
        template_format: &str,
        actions: &[Action],
    ) -> Result<GeneratedController> {
        let controller = controller.strip_suffix("Controller").unwrap_or(controller);
        let controller_path = bundle
            .path
            .join("Controller")
            .join(format!("{controller}Controller.php"));

        if controller_path.exists() {
            return Err(Error::FileExists(controller_path));
        }

        let source = controller_source(bundle, controller, route_format, template_format, actions);
        fs::write_new(&controller_path, &source)?;
        tracing::info!(path = %controller_path.display(), "controller generated");

        let test_path = bundle
            .path
            .join("Tests")
            .join("Controller")
            .join(format!("{controller}ControllerTest.php"));
        fs::write_new(&test_path, &test_source(bundle, controller, actions))?;

        let routing = if route_format == RoutingFormat::Yml {
            let path = bundle.path.join("Resources").join("config").join("routing.yml");
            append_yml_routes(&path, bundle, controller, actions)?;
            Some(path)
        } else {
            None
        };

        Ok(GeneratedController {
            controller: controller_path,
            test: test_path,
            routing,
        })
    }
}

/// Write the bundle class `<path>/<Name>.php`.
pub fn generate_bundle_class(bundle: &Bundle) -> Result<PathBuf> {
    let path = bundle.path.join(format!("{}.php", bundle.name));
    if path.exists() {
        return Err(Error::FileExists(path));
    }
    let source = format!(
        "<?php\n\nnamespace {};\n\nuse Symfony\\Component\\HttpKernel\\Bundle\\Bundle;\n\nclass {} extends Bundle\n{{\n}}\n",
        bundle.namespace, bundle.name
    );
    fs::write_new(&path, &source)?;
    tracing::info!(path = %path.display(), "bundle class generated");
    Ok(path)
}

/// Write a console command skeleton `<path>/Command/<Class>.php` for `name`
/// (`app:foo-bar` -> `FooBarCommand`).
pub fn generate_command(bundle: &Bundle, name: &str) -> Result<PathBuf> {
    let class = command_class_name(name)?;
    let path = bundle.path.join("Command").join(format!("{class}.php"));
    if path.exists() {
        return Err(Error::FileExists(path));
    }

    let source = format!(
        r#"<?php

namespace {namespace}\Command;

use Symfony\Bundle\FrameworkBundle\Command\ContainerAwareCommand;
use Symfony\Component\Console\Input\InputArgument;
use Symfony\Component\Console\Input\InputInterface;
use Symfony\Component\Console\Input\InputOption;
use Symfony\Component\Console\Output\OutputInterface;

class {class} extends ContainerAwareCommand
{{
    protected function configure()
    {{
        $this
            ->setName('{name}')
            ->setDescription('...')
            ->addArgument('argument', InputArgument::OPTIONAL, 'Argument description')
            ->addOption('option', null, InputOption::VALUE_NONE, 'Option description')
        ;
    }}

    protected function execute(InputInterface $input, OutputInterface $output)
    {{
        $argument = $input->getArgument('argument');

        if ($input->getOption('option')) {{
            // ...
        }}

        $output->writeln('Command result.');
    }}
}}
"#,
        namespace = bundle.namespace,
    );
    fs::write_new(&path, &source)?;
    tracing::info!(path = %path.display(), command = name, "command generated");
    Ok(path)
}

/// Template reference used by an action, resolving `default`.
pub fn action_template(
    bundle: &Bundle,
    controller: &str,
    template_format: &str,
    action: &Action,
) -> String {
    if action.template == Action::DEFAULT_TEMPLATE {
        format!(
            "{}:{controller}:{}.html.{template_format}",
            bundle.name,
            action_base(&action.name)
        )
    } else {
        action.template.clone()
    }
}

fn controller_source(
    bundle: &Bundle,
    controller: &str,
    route_format: RoutingFormat,
    template_format: &str,
    actions: &[Action],
) -> String {
    let mut out = format!("<?php\n\nnamespace {}\\Controller;\n\n", bundle.namespace);
    if route_format.is_annotation() {
        out.push_str("use Sensio\\Bundle\\FrameworkExtraBundle\\Configuration\\Route;\n");
    }
    out.push_str("use Symfony\\Bundle\\FrameworkBundle\\Controller\\Controller;\n\n");
    out.push_str(&format!("class {controller}Controller extends Controller\n{{\n"));

    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if route_format.is_annotation() {
            out.push_str(&format!("    /**\n     * @Route(\"{}\")\n     */\n", action.route));
        }
        let params = action
            .placeholders
            .iter()
            .map(|p| format!("${p}"))
            .collect::<Vec<_>>()
            .join(", ");
        let template = action_template(bundle, controller, template_format, action);
        out.push_str(&format!(
            "    public function {}({params})\n    {{\n        return $this->render('{template}', array(\n            // ...\n        ));\n    }}\n",
            action.name
        ));
    }

    out.push_str("}\n");
    out
}

fn test_source(bundle: &Bundle, controller: &str, actions: &[Action]) -> String {
    let mut out = format!(
        "<?php\n\nnamespace {}\\Tests\\Controller;\n\nuse Symfony\\Bundle\\FrameworkBundle\\Test\\WebTestCase;\n\nclass {controller}ControllerTest extends WebTestCase\n{{\n",
        bundle.namespace
    );
    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let method = to_pascal_case(action_base(&action.name));
        out.push_str(&format!(
            "    public function test{method}()\n    {{\n        $client = static::createClient();\n\n        $crawler = $client->request('GET', '{}');\n    }}\n",
            action.route
        ));
    }
    out.push_str("}\n");
    out
}

fn append_yml_routes(path: &Path, bundle: &Bundle, controller: &str, actions: &[Action]) -> Result<()> {
    let mut content = fs::read_optional(path)?.unwrap_or_default();
    for action in actions {
        if !content.is_empty() && !content.ends_with("\n\n") {
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push('\n');
        }
        let base = action_base(&action.name);
        content.push_str(&format!(
            "{}:\n    path:     {}\n    defaults: {{ _controller: {}:{controller}:{base} }}\n",
            to_snake_case(base),
            action.route,
            bundle.name
        ));
    }
    if path.exists() {
        fs::write_atomic(path, &content)
    } else {
        fs::write_new(path, &content)
    }
}
