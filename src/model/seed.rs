use crate::model::network::Network;
use crate::model::person::PersonId;

/// Built-in demo network: nine people across six programs with a small
/// starting set of collaborations.
pub fn demo_network() -> Network {
    let people = [
        ("maria", "Maria", "Engineering", "ai, programming, algorithms"),
        ("ana", "Ana", "Engineering", "systems, ai, databases"),
        ("luis", "Luis", "Business Intelligence", "networks, security"),
        ("carlos", "Carlos", "Engineering", "programming, web"),
        ("sofia", "Sofia", "Business Intelligence", "data, ai, statistics"),
        ("elena", "Elena", "Medicine", "biology, genetics"),
        ("jorge", "Jorge", "Administration", "management, economics"),
        ("pedro", "Pedro", "Mathematics", "algebra, algorithms, logic"),
        ("laura", "Laura", "Economics", "economics, statistics, data"),
    ];
    let collaborations = [
        ("ana", "maria"),
        ("carlos", "maria"),
        ("sofia", "ana"),
        ("pedro", "maria"),
    ];

    let mut network = Network::new();
    for (id, name, program, interests) in people {
        // The demo data is static and well-formed; failures here are bugs.
        if let Err(err) = network.add_person(id, name, program, interests) {
            debug_assert!(false, "demo person {id}: {err}");
        }
    }
    for (x, y) in collaborations {
        if let Err(err) = network.add_collaboration(&PersonId::new(x), &PersonId::new(y)) {
            debug_assert!(false, "demo collaboration {x}-{y}: {err}");
        }
    }
    network
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_network_has_expected_shape() {
        let network = demo_network();
        assert_eq!(network.node_count(), 9);
        assert_eq!(network.edge_count(), 4);
        assert!(network.is_connected(&PersonId::new("ana"), &PersonId::new("maria")));
        assert!(!network.is_connected(&PersonId::new("elena"), &PersonId::new("jorge")));
    }

    #[test]
    fn demo_people_keep_insertion_order() {
        let network = demo_network();
        let first = network.people().first().map(|p| p.id.as_str());
        assert_eq!(first, Some("maria"));
        assert_eq!(network.position(&PersonId::new("laura")), Some(8));
    }
}
