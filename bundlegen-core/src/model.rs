//! Parameters handed to the manipulators and generators.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::naming::{action_base, is_identifier, route_placeholders, validate_bundle_name};

/// How a bundle declares its routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoutingFormat {
    /// Routes live in controller annotations; the routing file imports a directory.
    Annotation,
    Yml,
    Xml,
    Php,
}

impl RoutingFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingFormat::Annotation => "annotation",
            RoutingFormat::Yml => "yml",
            RoutingFormat::Xml => "xml",
            RoutingFormat::Php => "php",
        }
    }

    pub fn is_annotation(self) -> bool {
        self == RoutingFormat::Annotation
    }
}

impl fmt::Display for RoutingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annotation" => Ok(RoutingFormat::Annotation),
            "yml" | "yaml" => Ok(RoutingFormat::Yml),
            "xml" => Ok(RoutingFormat::Xml),
            "php" => Ok(RoutingFormat::Php),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for RoutingFormat {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RoutingFormat> for String {
    fn from(format: RoutingFormat) -> Self {
        format.as_str().to_string()
    }
}

/// A bundle on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Short identifier, e.g. `AcmeBlogBundle`.
    pub name: String,
    /// PHP namespace, e.g. `Acme\BlogBundle`.
    pub namespace: String,
    /// Bundle root directory.
    pub path: PathBuf,
}

impl Bundle {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let name = name.into();
        validate_bundle_name(&name)?;
        Ok(Bundle {
            name,
            namespace: namespace.into().replace('/', "\\"),
            path: path.into(),
        })
    }

    /// Fully qualified bundle class, as registered in the kernel.
    pub fn class_name(&self) -> String {
        format!("{}\\{}", self.namespace, self.name)
    }
}

/// Bundle name implied by a namespace: `Acme\BlogBundle` -> `AcmeBlogBundle`.
///
/// A `Bundle` namespace segment is dropped (`Acme\Bundle\BlogBundle` also
/// yields `AcmeBlogBundle`). Accepts `/` as separator.
pub fn bundle_name_from_namespace(namespace: &str) -> Result<String> {
    let invalid = || Error::InvalidBundleName(namespace.to_string());
    let parts: Vec<&str> = namespace
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .collect();

    let last = parts.last().ok_or_else(invalid)?;
    if !last.ends_with("Bundle") || !parts.iter().all(|part| is_identifier(part)) {
        return Err(invalid());
    }

    let name: String = parts
        .iter()
        .enumerate()
        .filter(|(i, part)| *i + 1 == parts.len() || **part != "Bundle")
        .map(|(_, part)| *part)
        .collect();
    validate_bundle_name(&name)?;
    Ok(name)
}

/// A parsed `AcmeBlogBundle:Post` controller reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerShortcut {
    pub bundle: String,
    pub controller: String,
}

impl FromStr for ControllerShortcut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidShortcut(s.to_string());
        let (bundle, controller) = s.split_once(':').ok_or_else(invalid)?;
        if controller.contains(':') || !is_identifier(bundle) || !is_identifier(controller) {
            return Err(invalid());
        }
        let controller = controller.strip_suffix("Controller").unwrap_or(controller);
        if controller.is_empty() {
            return Err(invalid());
        }
        Ok(ControllerShortcut {
            bundle: bundle.to_string(),
            controller: controller.to_string(),
        })
    }
}

/// A controller action to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Method name, always ending in `Action`.
    pub name: String,
    pub route: String,
    /// Names of the `{...}` placeholders in `route`, in order.
    pub placeholders: Vec<String>,
    /// Template reference, or `default` to derive one from the controller.
    pub template: String,
}

impl Action {
    pub const DEFAULT_TEMPLATE: &'static str = "default";

    /// Parse a single `name[:route[:template]]` spec.
    ///
    /// The template may itself contain colons (`AcmeBlogBundle:Post:show.html.twig`).
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default();
        if !is_identifier(name) || !name.ends_with("Action") || name == "Action" {
            return Err(Error::InvalidAction(spec.to_string()));
        }

        let route = match parts.next() {
            Some(route) if !route.is_empty() => route.to_string(),
            _ => format!("/{}", action_base(name)),
        };

        let template = parts.collect::<Vec<_>>().join(":");
        let template = if template.trim_matches(':').is_empty() {
            Self::DEFAULT_TEMPLATE.to_string()
        } else {
            template
        };

        Ok(Action {
            name: name.to_string(),
            placeholders: route_placeholders(&route),
            route,
            template,
        })
    }
}

/// Parse action specs. Each input may hold several whitespace separated specs.
///
/// A repeated action name replaces the earlier definition in place.
pub fn parse_actions<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Action>> {
    let mut actions: Vec<Action> = Vec::new();
    for spec in inputs.iter().flat_map(|input| input.as_ref().split_whitespace()) {
        let action = Action::parse(spec)?;
        match actions.iter_mut().find(|a| a.name == action.name) {
            Some(existing) => *existing = action,
            None => actions.push(action),
        }
    }
    Ok(actions)
}
