use std::process::ExitCode;

#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    #[error("unknown component: {token}")]
    UnknownComponent { token: String },
    #[error("unknown action for {component}: {token}")]
    UnknownAction { component: String, token: String },
    #[error("`{action}` requires a non-empty `{field}`")]
    MissingArgument { action: String, field: &'static str },
    #[error("storage operation `{operation}` failed")]
    CollaboratorFailure {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdminError {
    pub fn collaborator(operation: &'static str, source: anyhow::Error) -> Self {
        Self::CollaboratorFailure {
            operation,
            source: source.into(),
        }
    }

    /// 2 for invocation mistakes, 1 for everything that failed while running.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AdminError::UnknownComponent { .. }
            | AdminError::UnknownAction { .. }
            | AdminError::MissingArgument { .. } => ExitCode::from(2),
            AdminError::CollaboratorFailure { .. } | AdminError::Other(_) => ExitCode::FAILURE,
        }
    }
}
