//! Static command tree: root → component → action.
//!
//! The tree is plain data built once per run. Parsing walks it in
//! `parser.rs`; help screens are rendered from it in `commands/help.rs`.

use crate::domain::constants::BIN_NAME;
use crate::domain::models::{Action, Component};

pub const HELP_OPTION: &str = "help";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Component(Component),
    Action(Component, Action),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub takes_value: bool,
    pub positional: bool,
    pub help: String,
}

impl OptionSpec {
    fn flag(name: &'static str, short: Option<char>, help: &str) -> Self {
        Self {
            name,
            short,
            takes_value: false,
            positional: false,
            help: help.to_string(),
        }
    }

    fn valued(name: &'static str, help: &str) -> Self {
        Self {
            name,
            short: None,
            takes_value: true,
            positional: false,
            help: help.to_string(),
        }
    }

    fn positional(name: &'static str, help: String) -> Self {
        Self {
            name,
            short: None,
            takes_value: true,
            positional: true,
            help,
        }
    }

    fn help() -> Self {
        Self::flag(HELP_OPTION, Some('h'), "Show this help message and exit")
    }

    pub fn is_help(&self) -> bool {
        self.name == HELP_OPTION
    }

    /// Matches `-name`, `--name`, `-x` and their `=value` forms.
    ///
    /// Returns the inline value when one was attached with `=`.
    pub fn matches<'a>(&self, token: &'a str) -> Option<Option<&'a str>> {
        let body = token
            .strip_prefix("--")
            .or_else(|| token.strip_prefix('-'))?;
        let (key, inline) = match body.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };
        let long_hit = key == self.name;
        let short_hit = !token.starts_with("--")
            && self.short.is_some_and(|s| key.len() == s.len_utf8() && key.starts_with(s));
        if !(long_hit || short_hit) {
            return None;
        }
        if inline.is_some() && !self.takes_value {
            return None;
        }
        Some(inline)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandNode {
    pub name: &'static str,
    pub kind: NodeKind,
    /// Set on a component and inherited by its actions; `None` on the root.
    pub resource_label: Option<&'static str>,
    /// Space-joined invocation prefix, e.g. `promptctl prompt new`.
    pub qualified_name: String,
    pub about: String,
    pub declared_options: Vec<OptionSpec>,
    pub children: Vec<CommandNode>,
}

impl CommandNode {
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, NodeKind::Action(..))
    }

    /// Finds the declared option a flag-looking token refers to.
    pub fn match_option<'a>(&self, token: &'a str) -> Option<(&OptionSpec, Option<&'a str>)> {
        self.declared_options
            .iter()
            .find_map(|spec| spec.matches(token).map(|inline| (spec, inline)))
    }

    pub fn positionals(&self) -> impl Iterator<Item = &OptionSpec> {
        self.declared_options.iter().filter(|o| o.positional)
    }
}

pub fn build_tree() -> CommandNode {
    CommandNode {
        name: BIN_NAME,
        kind: NodeKind::Root,
        resource_label: None,
        qualified_name: BIN_NAME.to_string(),
        about: "Admin tool for stored prompts and scripts".to_string(),
        declared_options: vec![
            OptionSpec::help(),
            OptionSpec::valued("store", "Directory holding stored prompts and scripts"),
            OptionSpec::valued("config", "Settings file to load"),
            OptionSpec::flag("json", None, "Output machine-readable JSON"),
            OptionSpec::flag("verbose", Some('v'), "Enable debug logging"),
        ],
        children: Component::ALL.into_iter().map(component_node).collect(),
    }
}

fn component_node(component: Component) -> CommandNode {
    let label = component.label();
    let qualified_name = format!("{} {}", BIN_NAME, component.as_str());
    let children = Action::ALL
        .into_iter()
        .map(|action| action_node(component, action, &qualified_name))
        .collect();
    CommandNode {
        name: component.as_str(),
        kind: NodeKind::Component(component),
        resource_label: Some(label),
        about: format!("Manage stored {}s", label.to_lowercase()),
        qualified_name,
        declared_options: vec![OptionSpec::help()],
        children,
    }
}

fn action_node(component: Component, action: Action, parent: &str) -> CommandNode {
    let label = component.label();
    let (about, options) = match action {
        Action::Edit => (
            format!("Edit a {label}"),
            vec![OptionSpec::positional("name", format!("{label} to edit"))],
        ),
        Action::New => (
            format!("Create a new {label}"),
            vec![OptionSpec::positional("name", format!("{label} name"))],
        ),
        Action::Clone => (
            format!("Clone a {label}"),
            vec![
                OptionSpec::positional("name", format!("{label} to clone")),
                OptionSpec::positional("as", format!("Name of the cloned {label}")),
            ],
        ),
        Action::Browse => (format!("Browse {label}s"), vec![]),
        Action::Search => (format!("Search {label}s"), vec![]),
    };
    let mut declared_options = vec![OptionSpec::help()];
    declared_options.extend(options);
    CommandNode {
        name: action.as_str(),
        kind: NodeKind::Action(component, action),
        resource_label: Some(label),
        qualified_name: format!("{} {}", parent, action.as_str()),
        about,
        declared_options,
        children: Vec::new(),
    }
}
