//! Layered, top-down argument resolution over the static command tree.
//!
//! Each level claims only its own help flag, its declared options and one
//! child-name token. Everything else is handed to the next level verbatim,
//! so a parent never rejects tokens that belong to a child it has not
//! resolved yet. Nothing here fails: strictness lives in the dispatcher.

use crate::cli::CommandNode;
use std::collections::BTreeMap;

/// An argv token together with its original position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Present,
    Value(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFrame<'t> {
    pub node: &'t CommandNode,
    pub consumed_options: BTreeMap<&'static str, OptionValue>,
    pub help_requested: bool,
    /// Tokens claimed at this level, in original order.
    pub consumed: Vec<Token>,
    /// Tokens left for the next level, in original order.
    pub residual: Vec<Token>,
}

impl<'t> ParseFrame<'t> {
    fn new(node: &'t CommandNode) -> Self {
        Self {
            node,
            consumed_options: BTreeMap::new(),
            help_requested: false,
            consumed: Vec::new(),
            residual: Vec::new(),
        }
    }

    pub fn value(&self, option: &str) -> Option<&str> {
        match self.consumed_options.get(option)? {
            OptionValue::Value(v) => Some(v.as_str()),
            OptionValue::Present => None,
        }
    }

    pub fn is_set(&self, option: &str) -> bool {
        self.consumed_options.contains_key(option)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedInvocation<'t> {
    /// Root first; never empty.
    pub path: Vec<ParseFrame<'t>>,
    pub terminal_reached: bool,
    /// First bare token left over when resolution stopped short of an action.
    pub unmatched_selector: Option<Token>,
}

impl<'t> ResolvedInvocation<'t> {
    pub fn root(&self) -> &ParseFrame<'t> {
        &self.path[0]
    }

    pub fn deepest(&self) -> &ParseFrame<'t> {
        &self.path[self.path.len() - 1]
    }

    /// Node names along the path, e.g. `promptctl prompt new`.
    pub fn describe(&self) -> String {
        self.deepest().node.qualified_name.clone()
    }
}

pub fn looks_like_flag(text: &str) -> bool {
    text.len() > 1 && text.starts_with('-')
}

pub fn resolve<'t, I, S>(tree: &'t CommandNode, argv: I) -> ResolvedInvocation<'t>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut input: Vec<Token> = argv
        .into_iter()
        .enumerate()
        .map(|(index, text)| Token {
            index,
            text: text.into(),
        })
        .collect();

    let mut path = Vec::new();
    let mut node = tree;
    loop {
        let (frame, descent) = parse_level(node, input);
        input = frame.residual.clone();
        path.push(frame);
        match descent {
            Some(child) => node = child,
            None => break,
        }
    }

    let terminal_reached = node.is_action();
    let unmatched_selector = if terminal_reached {
        None
    } else {
        input.into_iter().find(|t| !looks_like_flag(&t.text))
    };

    ResolvedInvocation {
        path,
        terminal_reached,
        unmatched_selector,
    }
}

fn parse_level(node: &CommandNode, input: Vec<Token>) -> (ParseFrame<'_>, Option<&CommandNode>) {
    let mut frame = ParseFrame::new(node);
    let mut descent = None;
    // Index of a `--` separator; later tokens are never treated as flags.
    let mut literal_after: Option<usize> = None;
    let is_leaf = node.children.is_empty();

    let mut tokens = input.into_iter().peekable();
    while let Some(token) = tokens.next() {
        if descent.is_some() || literal_after.is_some() {
            frame.residual.push(token);
            continue;
        }

        if is_leaf && token.text == "--" {
            literal_after = Some(token.index);
            frame.consumed.push(token);
            continue;
        }

        if looks_like_flag(&token.text) {
            let matched = node
                .match_option(&token.text)
                .map(|(spec, inline)| (spec, inline.map(str::to_string)));
            let Some((spec, inline)) = matched else {
                frame.residual.push(token);
                continue;
            };
            let (name, is_help, takes_value) = (spec.name, spec.is_help(), spec.takes_value);
            frame.consumed.push(token);

            if is_help {
                frame.help_requested = true;
            } else if !takes_value {
                frame.consumed_options.insert(name, OptionValue::Present);
            } else {
                let value = match inline {
                    Some(v) => Some(v),
                    None if tokens.peek().is_some_and(|next| !looks_like_flag(&next.text)) => {
                        tokens.next().map(|next| {
                            let text = next.text.clone();
                            frame.consumed.push(next);
                            text
                        })
                    }
                    None => None,
                };
                if let Some(v) = value {
                    frame.consumed_options.insert(name, OptionValue::Value(v));
                }
            }
            continue;
        }

        if let Some(child) = node.child(&token.text) {
            frame.consumed.push(token);
            descent = Some(child);
            continue;
        }

        frame.residual.push(token);
    }

    fill_positionals(&mut frame, literal_after);
    frame.consumed.sort_by_key(|t| t.index);
    (frame, descent)
}

/// Fills still-unset positional options from bare residual tokens, in
/// declaration order.
fn fill_positionals(frame: &mut ParseFrame<'_>, literal_after: Option<usize>) {
    let is_bare = |t: &Token| {
        literal_after.is_some_and(|sep| t.index > sep) || !looks_like_flag(&t.text)
    };
    let node = frame.node;
    for spec in node.positionals() {
        if frame.consumed_options.contains_key(spec.name) {
            continue;
        }
        let Some(pos) = frame.residual.iter().position(is_bare) else {
            break;
        };
        let token = frame.residual.remove(pos);
        frame
            .consumed_options
            .insert(spec.name, OptionValue::Value(token.text.clone()));
        frame.consumed.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{build_tree, NodeKind};
    use crate::domain::models::{Action, Component};

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn named_form_resolves_every_component_action_pair() {
        let tree = build_tree();
        for component in Component::ALL {
            for action in Action::ALL {
                let inv = resolve(&tree, [component.as_str(), action.as_str(), "-name", "X"]);
                assert!(inv.terminal_reached);
                assert_eq!(inv.path.len(), 3);
                let leaf = inv.deepest();
                assert_eq!(leaf.node.kind, NodeKind::Action(component, action));
                match action {
                    Action::Browse | Action::Search => {
                        assert_eq!(leaf.value("name"), None);
                        assert_eq!(texts(&leaf.residual), ["-name", "X"]);
                    }
                    _ => assert_eq!(leaf.value("name"), Some("X")),
                }
            }
        }
    }

    #[test]
    fn positional_form_fills_in_declaration_order() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt", "clone", "base", "copy", "extra"]);
        let leaf = inv.deepest();
        assert_eq!(leaf.value("name"), Some("base"));
        assert_eq!(leaf.value("as"), Some("copy"));
        assert_eq!(texts(&leaf.residual), ["extra"]);
    }

    #[test]
    fn named_and_positional_forms_mix() {
        let tree = build_tree();
        let inv = resolve(&tree, ["script", "clone", "-as", "copy", "base"]);
        let leaf = inv.deepest();
        assert_eq!(leaf.value("name"), Some("base"));
        assert_eq!(leaf.value("as"), Some("copy"));
    }

    #[test]
    fn help_after_descent_belongs_to_the_child() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt", "-h"]);
        assert!(!inv.root().help_requested);
        assert!(inv.deepest().help_requested);
        assert_eq!(inv.deepest().node.name, "prompt");
    }

    #[test]
    fn help_before_descent_stays_at_root() {
        let tree = build_tree();
        let inv = resolve(&tree, ["-h", "prompt", "new", "--help"]);
        assert!(inv.root().help_requested);
        assert!(!inv.path[1].help_requested);
        assert!(inv.path[2].help_requested);
    }

    #[test]
    fn stops_at_component_without_action() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt"]);
        assert!(!inv.terminal_reached);
        assert_eq!(inv.path.len(), 2);
        assert_eq!(inv.deepest().node.kind, NodeKind::Component(Component::Prompt));
        assert!(inv.unmatched_selector.is_none());
    }

    #[test]
    fn empty_argv_yields_root_only() {
        let tree = build_tree();
        let inv = resolve(&tree, Vec::<String>::new());
        assert_eq!(inv.path.len(), 1);
        assert!(!inv.terminal_reached);
    }

    #[test]
    fn unknown_selector_is_recorded_not_rejected() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompts", "--weird"]);
        assert_eq!(inv.path.len(), 1);
        assert_eq!(inv.unmatched_selector.as_ref().map(|t| t.text.as_str()), Some("prompts"));

        let inv = resolve(&tree, ["script", "--weird", "delete"]);
        assert_eq!(inv.path.len(), 2);
        assert_eq!(inv.unmatched_selector.map(|t| t.text), Some("delete".to_string()));
    }

    #[test]
    fn root_options_are_claimed_before_descent() {
        let tree = build_tree();
        let inv = resolve(
            &tree,
            ["--store", "/tmp/s", "-v", "--json", "prompt", "browse", "--json"],
        );
        let root = inv.root();
        assert_eq!(root.value("store"), Some("/tmp/s"));
        assert!(root.is_set("verbose"));
        assert!(root.is_set("json"));
        assert_eq!(texts(&inv.deepest().residual), ["--json"]);
    }

    #[test]
    fn value_option_does_not_swallow_a_flag() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt", "new", "-name", "-h"]);
        let leaf = inv.deepest();
        assert!(leaf.help_requested);
        assert!(!leaf.is_set("name"));
    }

    #[test]
    fn inline_empty_value_is_kept() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt", "edit", "--name="]);
        assert_eq!(inv.deepest().value("name"), Some(""));
    }

    #[test]
    fn double_dash_makes_flag_like_names_positional() {
        let tree = build_tree();
        let inv = resolve(&tree, ["prompt", "new", "--", "-odd"]);
        let leaf = inv.deepest();
        assert_eq!(leaf.value("name"), Some("-odd"));
        assert!(!leaf.help_requested);
    }

    #[test]
    fn residual_tokens_survive_to_the_next_level_in_order() {
        let tree = build_tree();
        let argv = ["--zzz", "stray", "prompt", "-q", "new", "draft", "--json"];
        let inv = resolve(&tree, argv);

        let root = inv.root();
        assert_eq!(texts(&root.residual), ["--zzz", "stray", "-q", "new", "draft", "--json"]);
        assert_eq!(texts(&inv.path[1].residual), ["--zzz", "stray", "-q", "draft", "--json"]);
        // the first bare residual fills the positional
        assert_eq!(inv.deepest().value("name"), Some("stray"));

        let mut input: Vec<Token> = argv
            .iter()
            .enumerate()
            .map(|(index, t)| Token {
                index,
                text: t.to_string(),
            })
            .collect();
        for frame in &inv.path {
            let mut merged: Vec<Token> =
                frame.consumed.iter().chain(&frame.residual).cloned().collect();
            merged.sort_by_key(|t| t.index);
            assert_eq!(merged, input);
            input = frame.residual.clone();
        }
    }

    #[test]
    fn resolving_twice_is_identical() {
        let tree = build_tree();
        let argv = ["-h", "script", "clone", "-name", "a", "b", "--noise"];
        assert_eq!(resolve(&tree, argv), resolve(&tree, argv));
    }
}
