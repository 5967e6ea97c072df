use crate::analyzer::analyze_campaign;
use crate::clock::RunState;
use crate::config::{CampaignSpec, DomainSpec, Parameters};
use crate::domain::DomainRun;
use crate::error::EngineError;
use tracing::{debug, info, warn};

/// Build a domain run without starting it
pub fn build_domain(spec: &DomainSpec, shared: Option<&Parameters>) -> Result<DomainRun, EngineError> {
    DomainRun::new(spec, shared)
}

/// Main entry point for a single domain: validate, build and run to completion
pub fn run_domain(spec: &DomainSpec, shared: Option<&Parameters>) -> Result<DomainRun, EngineError> {
    let mut run = build_domain(spec, shared)?;
    run.begin()?;
    Ok(run)
}

/// Independent domains run one after another, each on its own time grid
#[derive(Debug, Clone)]
pub struct Campaign {
    domains: Vec<DomainRun>,
}

impl Campaign {
    pub fn new(domains: Vec<DomainRun>) -> Self {
        Self { domains }
    }

    /// Validate the whole campaign up front and build every domain.
    /// Nothing is built if any domain is invalid.
    pub fn from_spec(spec: &CampaignSpec) -> Result<Self, EngineError> {
        let diagnostics = analyze_campaign(spec);
        if diagnostics.has_errors() {
            return Err(EngineError::InvalidConfig(diagnostics));
        }
        // per-domain warnings are logged as each domain is built
        if spec.domains.is_empty() {
            warn!("campaign has no domains");
        }

        let domains = spec
            .domains
            .iter()
            .map(|d| {
                build_domain(d, spec.parameters.as_ref()).map_err(|e| EngineError::Domain {
                    domain: d.id.clone(),
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { domains })
    }

    /// Run each pending domain to completion in order.
    /// The first failure stops the campaign; domains after it stay unstarted.
    pub fn begin(&mut self) -> Result<(), EngineError> {
        info!(domains = self.domains.len(), "starting campaign");

        for run in self.domains.iter_mut() {
            if run.state() != RunState::NotStarted {
                debug!(domain = run.id(), state = ?run.state(), "skipping domain");
                continue;
            }

            debug!(domain = run.id(), "handing off to domain");
            run.begin().map_err(|e| EngineError::Domain {
                domain: run.id().to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }

    pub fn domains(&self) -> &[DomainRun] {
        &self.domains
    }

    pub fn domain(&self, id: &str) -> Option<&DomainRun> {
        self.domains.iter().find(|d| d.id() == id)
    }

    pub fn into_domains(self) -> Vec<DomainRun> {
        self.domains
    }

    pub fn is_complete(&self) -> bool {
        self.domains.iter().all(|d| d.state() == RunState::Completed)
    }
}

/// Build and run a whole campaign
pub fn run_campaign(spec: &CampaignSpec) -> Result<Campaign, EngineError> {
    let mut campaign = Campaign::from_spec(spec)?;
    campaign.begin()?;
    Ok(campaign)
}
