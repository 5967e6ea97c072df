use crate::diagnostics::Diagnostics;
use thiserror::Error;

/// Errors surfaced by the simulation engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input failed static validation; carries every finding
    #[error("invalid configuration:\n{0}")]
    InvalidConfig(Diagnostics),

    /// Two bodies occupy the same coordinates, so the pairwise force is undefined
    #[error("domain '{domain}': bodies '{a}' and '{b}' coincide at t = {t}")]
    Singularity {
        domain: String,
        a: String,
        b: String,
        t: f64,
    },

    #[error("domain '{domain}' has already been started")]
    AlreadyStarted { domain: String },

    /// A campaign member failed
    #[error("domain '{domain}' failed")]
    Domain {
        domain: String,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Diagnostics attached to a configuration failure, looking through
    /// campaign wrappers
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            EngineError::InvalidConfig(diagnostics) => Some(diagnostics),
            EngineError::Domain { source, .. } => source.diagnostics(),
            _ => None,
        }
    }
}
