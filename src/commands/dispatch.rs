//! Action dispatch: the point where the lenient parse becomes strict.

use crate::domain::models::{Action, CloneReport, Component, Resource, SearchHit};
use crate::error::AdminError;
use crate::parser::ParseFrame;
use crate::services::editor;
use crate::services::output::Printer;
use crate::services::storage::ResourceStore;

#[derive(Debug)]
pub enum Report {
    Created(Resource),
    Editing(Resource),
    Cloned(CloneReport),
    Listing(Vec<Resource>),
    Matches(Vec<SearchHit>),
}

fn required<'f>(
    frame: &'f ParseFrame<'_>,
    component: Component,
    action: Action,
    field: &'static str,
) -> Result<&'f str, AdminError> {
    match frame.value(field) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AdminError::MissingArgument {
            action: format!("{} {}", component, action),
            field,
        }),
    }
}

pub fn dispatch(
    component: Component,
    action: Action,
    frame: &ParseFrame<'_>,
    store: &dyn ResourceStore,
) -> Result<Report, AdminError> {
    tracing::info!(%component, %action, "dispatching");
    let field = |name: &'static str| required(frame, component, action, name);

    let report = match action {
        Action::New => {
            let name = field("name")?;
            store
                .create_resource(component, name)
                .map(Report::Created)
                .map_err(|e| AdminError::collaborator("create_resource", e))?
        }
        Action::Edit => {
            let name = field("name")?;
            store
                .fetch_for_edit(component, name)
                .map(Report::Editing)
                .map_err(|e| AdminError::collaborator("fetch_for_edit", e))?
        }
        Action::Clone => {
            let name = field("name")?;
            let new_name = field("as")?;
            store
                .clone_resource(component, name, new_name)
                .map(|resource| {
                    Report::Cloned(CloneReport {
                        source: name.to_string(),
                        resource,
                    })
                })
                .map_err(|e| AdminError::collaborator("clone_resource", e))?
        }
        Action::Browse => store
            .list_resources(component)
            .map(Report::Listing)
            .map_err(|e| AdminError::collaborator("list_resources", e))?,
        Action::Search => store
            .search_resources(component, None)
            .map(Report::Matches)
            .map_err(|e| AdminError::collaborator("search_resources", e))?,
    };
    Ok(report)
}

/// Prints a report, opening the editor first for `edit`.
pub fn emit(report: Report, printer: Printer, editor_cmd: &str) -> anyhow::Result<()> {
    match report {
        Report::Created(r) => {
            printer.one(r, |r| format!("created {} {}", r.component, r.path.display()))
        }
        Report::Editing(r) => {
            editor::open(editor_cmd, &r.path)?;
            printer.one(r, |r| format!("edited {} {}", r.component, r.path.display()))
        }
        Report::Cloned(c) => printer.one(c, |c| {
            format!(
                "cloned {} {} as {}",
                c.resource.component, c.source, c.resource.name
            )
        }),
        Report::Listing(items) => {
            printer.rows(&items, |r| format!("{}\t{}", r.name, r.path.display()))
        }
        Report::Matches(hits) => printer.rows(&hits, |h| format!("{}\t{}", h.name, h.summary)),
    }
}
