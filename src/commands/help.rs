//! Deferred help dispatch.
//!
//! Help flags are only recorded while parsing. Once the whole path is known,
//! the deepest level that asked for help wins, so `promptctl prompt new -h`
//! shows the `new` screen even if `-h` was also typed before `prompt`.

use crate::cli::{CommandNode, NodeKind};
use crate::domain::models::{Action, Component};
use crate::error::AdminError;
use crate::parser::{ParseFrame, ResolvedInvocation};
use clap::{Arg, ArgAction, Command};

#[derive(Debug)]
pub enum Outcome<'t> {
    /// Print this node's help to stdout, exit 0.
    Help(&'t CommandNode),
    /// Print this node's help to stderr and fail with `error`.
    Usage {
        error: AdminError,
        node: &'t CommandNode,
    },
    Dispatch {
        component: Component,
        action: Action,
    },
}

fn explicit<'a, 't>(invocation: &'a ResolvedInvocation<'t>) -> Option<&'a ParseFrame<'t>> {
    invocation.path.iter().rev().find(|f| f.help_requested)
}

/// The node whose help should be shown, if any.
pub fn select<'t>(invocation: &ResolvedInvocation<'t>) -> Option<&'t CommandNode> {
    if let Some(frame) = explicit(invocation) {
        return Some(frame.node);
    }
    (!invocation.terminal_reached).then(|| invocation.deepest().node)
}

pub fn plan<'t>(invocation: &ResolvedInvocation<'t>) -> Outcome<'t> {
    let Some(node) = select(invocation) else {
        return match invocation.deepest().node.kind {
            NodeKind::Action(component, action) => Outcome::Dispatch { component, action },
            _ => Outcome::Help(invocation.deepest().node),
        };
    };
    if explicit(invocation).is_some() {
        return Outcome::Help(node);
    }
    let Some(token) = invocation.unmatched_selector.as_ref() else {
        return Outcome::Help(node);
    };
    let error = match node.kind {
        NodeKind::Component(component) => AdminError::UnknownAction {
            component: component.to_string(),
            token: token.text.clone(),
        },
        _ => AdminError::UnknownComponent {
            token: token.text.clone(),
        },
    };
    Outcome::Usage { error, node }
}

pub fn render(node: &CommandNode) -> String {
    to_clap(node).render_help().to_string()
}

/// Mirrors one node into a clap command used purely for help layout.
fn to_clap(node: &CommandNode) -> Command {
    let mut cmd = Command::new(node.name)
        .bin_name(node.qualified_name.clone())
        .about(node.about.clone())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true);

    for spec in &node.declared_options {
        let mut arg = Arg::new(spec.name).help(spec.help.clone());
        if spec.positional {
            arg = arg
                .value_name(spec.name.to_uppercase())
                .required(true)
                .action(ArgAction::Set);
        } else {
            arg = arg.long(spec.name);
            if let Some(short) = spec.short {
                arg = arg.short(short);
            }
            arg = if spec.is_help() {
                arg.action(ArgAction::Help)
            } else if spec.takes_value {
                arg.value_name(spec.name.to_uppercase())
                    .action(ArgAction::Set)
            } else {
                arg.action(ArgAction::SetTrue)
            };
        }
        cmd = cmd.arg(arg);
    }

    match node.kind {
        NodeKind::Root => {
            cmd = cmd
                .subcommand_value_name("component")
                .subcommand_help_heading("Components")
                .after_help("Use to manage saved prompts and command-line scripts.");
        }
        NodeKind::Component(_) => {
            let label = node.resource_label.unwrap_or("Resource");
            cmd = cmd
                .subcommand_value_name("action")
                .subcommand_help_heading(format!("{} actions", label));
        }
        NodeKind::Action(..) => {
            let named: Vec<String> = node
                .positionals()
                .map(|p| format!("-{} <{}>", p.name, p.name.to_uppercase()))
                .collect();
            if !named.is_empty() {
                cmd = cmd.after_help(format!(
                    "Arguments may also be passed by name: {}",
                    named.join(" ")
                ));
            }
        }
    }

    if !node.children.is_empty() {
        cmd = cmd.subcommand_required(true);
        for child in &node.children {
            cmd = cmd.subcommand(Command::new(child.name).about(child.about.clone()));
        }
    }
    cmd
}
