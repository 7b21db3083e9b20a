use serde::Serialize;

use crate::model::{Network, PersonId};

/// A candidate collaboration between two unconnected people of different
/// programs with at least one shared interest. Never stored; recomputed from
/// the live model on every request.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub a: PersonId,
    pub b: PersonId,
    pub program_a: String,
    pub program_b: String,
    pub shared_interests: Vec<String>,
}

/// Interdisciplinary candidate edges, in person-enumeration order. A pure
/// filter: no scoring, no ranking.
pub fn recommendations(network: &Network) -> Vec<Recommendation> {
    let people = network.people();
    let mut out = Vec::new();

    for (pos, first) in people.iter().enumerate() {
        for second in &people[pos + 1..] {
            if network.is_connected(&first.id, &second.id) {
                continue;
            }
            if first.program.trim() == second.program.trim() {
                continue;
            }
            let shared = first.shared_interests(second);
            if shared.is_empty() {
                continue;
            }
            out.push(Recommendation {
                a: first.id.clone(),
                b: second.id.clone(),
                program_a: first.program.clone(),
                program_b: second.program.clone(),
                shared_interests: shared,
            });
        }
    }

    out
}
