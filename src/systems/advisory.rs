use bevy::prelude::*;
use std::time::Instant;

use crate::{
    components::{
        Advisories, Advisory, AdvisoryRule, AircraftProfile, Criticality, FlightState,
        TerminationReason,
    },
    resources::{Classifier, FlightLog, RuleConfig, SimulationConfig},
};

/// Builds the ranked advisory list for one tick.
///
/// The classifier advisory, when the score crosses the critical threshold,
/// is listed before the rule advisories; rules follow in declaration order.
/// Ranking keeps that order among equal priorities.
pub fn evaluate(
    state: &FlightState,
    profile: &AircraftProfile,
    rules: &RuleConfig,
    criticality: f64,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if criticality > rules.critical_score {
        advisories.push(Advisory::critical(rules));
    }
    advisories.extend(
        AdvisoryRule::ALL
            .iter()
            .filter_map(|rule| rule.check(state, profile, rules)),
    );
    rank(&mut advisories);
    advisories
}

/// Stable sort, highest priority first.
pub fn rank(advisories: &mut [Advisory]) {
    advisories.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}

/// Scores the state and refreshes the aircraft's advisories.
///
/// A classifier error ends the flight; no fallback score is used.
pub fn advisory_system(
    mut query: Query<(
        &FlightState,
        &AircraftProfile,
        &mut Advisories,
        &mut Criticality,
    )>,
    classifier: Res<Classifier>,
    rules: Res<RuleConfig>,
    simulation: Res<SimulationConfig>,
    mut log: ResMut<FlightLog>,
) {
    let budget = simulation.classifier_budget();

    for (state, profile, mut advisories, mut criticality) in query.iter_mut() {
        let started = Instant::now();
        let result = classifier.evaluate(&state.features());
        let elapsed = started.elapsed();
        if elapsed > budget {
            warn!(
                "Classifier took {:?} at tick {}, over the {:?} budget",
                elapsed, log.ticks, budget
            );
        }

        match result {
            Ok(score) => {
                criticality.0 = score;
                advisories.0 = evaluate(state, profile, &rules, score);
            }
            Err(err) => {
                error!("Classifier failed at tick {}: {}", log.ticks, err);
                advisories.0.clear();
                log.terminate(TerminationReason::ClassifierFailure);
            }
        }
    }
}
