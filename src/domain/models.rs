use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: String,
    pub causes: Vec<String>,
}

/// Resource category managed by the tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Prompt,
    Script,
}

impl Component {
    pub const ALL: [Component; 2] = [Component::Prompt, Component::Script];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Prompt => "prompt",
            Component::Script => "script",
        }
    }

    /// Human-readable label shown in help text.
    pub fn label(self) -> &'static str {
        match self {
            Component::Prompt => "Prompt",
            Component::Script => "Script",
        }
    }

    /// Directory under the store root holding this component's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            Component::Prompt => "prompts",
            Component::Script => "scripts",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Component::Prompt => "md",
            Component::Script => "sh",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation applicable to every component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Edit,
    New,
    Clone,
    Browse,
    Search,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Edit,
        Action::New,
        Action::Clone,
        Action::Browse,
        Action::Search,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Edit => "edit",
            Action::New => "new",
            Action::Clone => "clone",
            Action::Browse => "browse",
            Action::Search => "search",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Resource {
    pub component: Component,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub component: Component,
    pub name: String,
    /// First non-empty line of the resource body.
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct CloneReport {
    pub source: String,
    pub resource: Resource,
}
