use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;

use crate::model::{Network, PersonId};

/// Narrow query surface over a graph snapshot. The analyses depend only on
/// this trait so the storage backend can be swapped without touching them.
pub trait GraphQuery {
    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn neighbors(&self, node: usize) -> Vec<usize>;

    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Partition into connected components, each ordered by insertion and the
    /// component list ordered by its first-inserted member.
    fn components(&self) -> Vec<Vec<usize>>;
}

/// Immutable petgraph-backed view of the network at a point in time,
/// optionally excluding one person and their incident edges. Node positions
/// follow the network's insertion order of the included people.
pub struct Snapshot {
    graph: UnGraph<PersonId, ()>,
    ids: Vec<PersonId>,
}

impl Snapshot {
    pub fn of(network: &Network) -> Self {
        Self::excluding(network, None)
    }

    pub fn excluding(network: &Network, excluded: Option<&PersonId>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut ids = Vec::new();

        for person in network.people() {
            if Some(&person.id) == excluded {
                continue;
            }
            graph.add_node(person.id.clone());
            ids.push(person.id.clone());
        }
        for collab in network.collaborations() {
            if let Some(id) = excluded {
                if collab.involves(id) {
                    continue;
                }
            }
            let a = ids.iter().position(|id| id == &collab.a);
            let b = ids.iter().position(|id| id == &collab.b);
            if let (Some(a), Some(b)) = (a, b) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        }

        Self { graph, ids }
    }

    pub fn ids(&self) -> &[PersonId] {
        &self.ids
    }

    pub fn id_at(&self, node: usize) -> &PersonId {
        &self.ids[node]
    }

    pub fn position_of(&self, id: &PersonId) -> Option<usize> {
        self.ids.iter().position(|own| own == id)
    }
}

impl GraphQuery for Snapshot {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.graph
            .neighbors(NodeIndex::new(node))
            .map(NodeIndex::index)
            .collect()
    }

    fn components(&self) -> Vec<Vec<usize>> {
        let n = self.graph.node_count();
        let mut union = UnionFind::<usize>::new(n);
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                union.union(a.index(), b.index());
            }
        }

        let mut roots: Vec<usize> = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();
        for node in 0..n {
            let root = union.find(node);
            match roots.iter().position(|&seen| seen == root) {
                Some(pos) => members[pos].push(node),
                None => {
                    roots.push(root);
                    members.push(vec![node]);
                }
            }
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Network;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    fn triangle_plus_isolate() -> Network {
        let mut network = Network::new();
        for (pid, name) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            network.add_person(pid, name, "CS", "").expect("add person");
        }
        network.add_collaboration(&id("a"), &id("b")).expect("ab");
        network.add_collaboration(&id("b"), &id("c")).expect("bc");
        network.add_collaboration(&id("a"), &id("c")).expect("ac");
        network
    }

    #[test]
    fn snapshot_mirrors_network_counts() {
        let network = triangle_plus_isolate();
        let snapshot = Snapshot::of(&network);
        assert_eq!(snapshot.node_count(), 4);
        assert_eq!(snapshot.edge_count(), 3);
        assert_eq!(snapshot.degree(0), 2);
        assert_eq!(snapshot.degree(3), 0);
    }

    #[test]
    fn components_are_ordered_by_first_inserted_member() {
        let network = triangle_plus_isolate();
        let snapshot = Snapshot::of(&network);
        let components = snapshot.components();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn excluding_a_person_drops_its_edges() {
        let network = triangle_plus_isolate();
        let snapshot = Snapshot::excluding(&network, Some(&id("b")));
        assert_eq!(snapshot.node_count(), 3);
        // a -- c survives, both b edges are gone.
        assert_eq!(snapshot.edge_count(), 1);
        assert!(snapshot.position_of(&id("b")).is_none());
        assert_eq!(snapshot.id_at(0), &id("a"));
    }
}
