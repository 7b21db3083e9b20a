use serde::Serialize;

use crate::analysis::metrics::summarize;
use crate::graph::{GraphQuery, Snapshot};
use crate::model::{Collaboration, Network, NetworkError, PersonId};

/// Losing more than this many connections marks the removed node critical.
const CRITICAL_LOSS: usize = 3;

/// Outcome of hypothetically removing one person. Derived from a transient
/// snapshot; the live network is never touched.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalImpact {
    pub removed: PersonId,
    pub components_before: usize,
    pub components_after: usize,
    pub lost_connections: Vec<Collaboration>,
    /// Component partition of the surviving graph, for the resilience view.
    pub components: Vec<Vec<PersonId>>,
    pub fragmented: bool,
    pub critical: bool,
}

pub fn simulate_removal(network: &Network, id: &PersonId) -> Result<RemovalImpact, NetworkError> {
    if !network.contains(id) {
        return Err(NetworkError::UnknownPerson(id.clone()));
    }

    let before = summarize(&Snapshot::of(network));
    let after = Snapshot::excluding(network, Some(id));

    let lost_connections: Vec<Collaboration> = network
        .collaborations()
        .iter()
        .filter(|collab| collab.involves(id))
        .cloned()
        .collect();

    let components: Vec<Vec<PersonId>> = after
        .components()
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .map(|node| after.id_at(node).clone())
                .collect()
        })
        .collect();
    let components_after = components.len();

    Ok(RemovalImpact {
        removed: id.clone(),
        components_before: before.components,
        components_after,
        fragmented: components_after > before.components,
        critical: lost_connections.len() > CRITICAL_LOSS,
        lost_connections,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::demo_network;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    fn bridge_network() -> Network {
        // a - bridge - b : removing the bridge splits the graph.
        let mut network = Network::new();
        for pid in ["a", "bridge", "b"] {
            network.add_person(pid, pid, "CS", "").expect("add person");
        }
        network
            .add_collaboration(&id("a"), &id("bridge"))
            .expect("connect");
        network
            .add_collaboration(&id("bridge"), &id("b"))
            .expect("connect");
        network
    }

    #[test]
    fn unknown_person_is_rejected() {
        let network = bridge_network();
        assert!(matches!(
            simulate_removal(&network, &id("ghost")),
            Err(NetworkError::UnknownPerson(_))
        ));
    }

    #[test]
    fn simulation_never_mutates_the_live_model() {
        let network = bridge_network();
        let nodes = network.node_count();
        let edges = network.edge_count();
        simulate_removal(&network, &id("bridge")).expect("simulate");
        assert_eq!(network.node_count(), nodes);
        assert_eq!(network.edge_count(), edges);
        assert!(network.contains(&id("bridge")));
    }

    #[test]
    fn bridge_removal_fragments_the_graph() {
        let network = bridge_network();
        let impact = simulate_removal(&network, &id("bridge")).expect("simulate");
        assert_eq!(impact.components_before, 1);
        assert_eq!(impact.components_after, 2);
        assert!(impact.fragmented);
        assert_eq!(impact.lost_connections.len(), 2);
        assert_eq!(impact.components, vec![vec![id("a")], vec![id("b")]]);
    }

    #[test]
    fn leaf_removal_does_not_fragment() {
        let network = bridge_network();
        let impact = simulate_removal(&network, &id("a")).expect("simulate");
        assert_eq!(impact.components_after, 1);
        assert!(!impact.fragmented);
        assert_eq!(impact.lost_connections.len(), 1);
    }

    #[test]
    fn isolated_graph_reports_all_singletons() {
        let mut network = Network::new();
        for pid in ["a", "b", "c"] {
            network.add_person(pid, pid, "CS", "").expect("add person");
        }
        let impact = simulate_removal(&network, &id("a")).expect("simulate");
        assert_eq!(impact.components_before, 3);
        assert_eq!(impact.components_after, 2);
        assert!(impact.lost_connections.is_empty());
        assert!(!impact.fragmented);
        assert!(!impact.critical);
    }

    #[test]
    fn hub_with_many_edges_is_critical() {
        let mut network = Network::new();
        for pid in ["hub", "w", "x", "y", "z"] {
            network.add_person(pid, pid, "CS", "").expect("add person");
        }
        for leaf in ["w", "x", "y", "z"] {
            network
                .add_collaboration(&id("hub"), &id(leaf))
                .expect("connect");
        }
        let impact = simulate_removal(&network, &id("hub")).expect("simulate");
        assert!(impact.critical);
        assert_eq!(impact.lost_connections.len(), 4);
        assert_eq!(impact.components_after, 4);
    }

    #[test]
    fn demo_network_maria_removal() {
        let network = demo_network();
        let impact = simulate_removal(&network, &id("maria")).expect("simulate");
        assert_eq!(impact.components_before, 5);
        assert_eq!(impact.components_after, 7);
        assert_eq!(impact.lost_connections.len(), 3);
        assert!(impact.fragmented);
        assert!(!impact.critical);
    }
}
