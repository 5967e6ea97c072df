//! Multi-domain campaigns

use gravsim_core::tests::test_helpers::{body, domain};
use gravsim_core::{
    run_campaign, Campaign, CampaignSpec, DomainRun, DomainSpec, EngineError, ForceField,
    Parameters, RunState,
};

fn shared_domain(id: &str) -> DomainSpec {
    DomainSpec::new(id)
        .with_body(body("a", 1.0e6, [0.0, 0.0], [0.0, 0.0]))
        .with_body(body("b", 1.0e6, [4.0, 0.0], [0.0, 0.01]))
}

#[test]
fn test_domains_use_shared_or_own_grid() {
    let spec = CampaignSpec::new(
        Some(Parameters::new(2.0, 250.0)),
        vec![
            shared_domain("shared"),
            shared_domain("own").with_parameters(Parameters::new(1.0, 10.0)),
        ],
    );

    let campaign = run_campaign(&spec).expect("campaign succeeds");
    assert!(campaign.is_complete());

    let shared = campaign.domain("shared").unwrap();
    assert_eq!(shared.time_grid().len(), 126);
    assert!(shared.bodies().iter().all(|b| b.len() == 126));

    let own = campaign.domain("own").unwrap();
    assert_eq!(own.time_grid().len(), 11);
    assert!(own.bodies().iter().all(|b| b.len() == 11));
}

#[test]
fn test_domains_do_not_interact() {
    let alone = DomainRun::new(&shared_domain("x"), Some(&Parameters::new(1.0, 50.0)))
        .and_then(|mut run| run.begin().map(|_| run))
        .expect("single run succeeds");

    let spec = CampaignSpec::new(
        Some(Parameters::new(1.0, 50.0)),
        vec![
            domain("crowd", 1.0, 50.0, vec![body("heavy", 1.0e12, [1.0, 1.0], [0.0, 0.0])]),
            shared_domain("x"),
        ],
    );
    let campaign = run_campaign(&spec).expect("campaign succeeds");
    let together = campaign.domain("x").unwrap();

    for (a, b) in alone.bodies().iter().zip(together.bodies()) {
        assert_eq!(a.trajectory(), b.trajectory());
    }
}

#[test]
fn test_invalid_member_rejects_whole_campaign() {
    let spec = CampaignSpec::new(
        None,
        vec![
            domain("ok", 1.0, 5.0, vec![body("a", 1.0, [0.0, 0.0], [0.0, 0.0])]),
            DomainSpec::new("no-grid").with_body(body("a", 1.0, [0.0, 0.0], [0.0, 0.0])),
        ],
    );

    let err = Campaign::from_spec(&spec).unwrap_err();
    let diagnostics = err.diagnostics().expect("configuration error");
    assert!(diagnostics.errors().any(|e| e.message.contains("no time parameters")));
}

#[test]
fn test_runtime_failure_stops_campaign() {
    let crash = domain(
        "crash",
        1.0,
        5.0,
        vec![
            body("l", 1.0, [-1.0, 0.0], [1.0, 0.0]),
            body("r", 1.0, [1.0, 0.0], [-1.0, 0.0]),
        ],
    );
    let first = DomainRun::new(&shared_domain("first"), Some(&Parameters::new(1.0, 5.0))).unwrap();
    let crashing = DomainRun::new(&crash, None)
        .unwrap()
        .with_force_field(ForceField { g: 0.0 });
    let last = DomainRun::new(&shared_domain("last"), Some(&Parameters::new(1.0, 5.0))).unwrap();

    let mut campaign = Campaign::new(vec![first, crashing, last]);
    match campaign.begin() {
        Err(EngineError::Domain { domain, source }) => {
            assert_eq!(domain, "crash");
            assert!(matches!(*source, EngineError::Singularity { .. }));
        }
        other => panic!("expected Domain error, got {:?}", other),
    }

    assert_eq!(campaign.domain("first").unwrap().state(), RunState::Completed);
    assert_eq!(campaign.domain("crash").unwrap().state(), RunState::Aborted);
    assert_eq!(campaign.domain("last").unwrap().state(), RunState::NotStarted);
    assert!(!campaign.is_complete());
}
