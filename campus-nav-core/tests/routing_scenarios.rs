use campus_nav_core::algo::{attach, connect_custom_nodes, distance::DEFAULT_DISTANCE_SCALE_FACTOR};
use campus_nav_core::prelude::*;
use proptest::prelude::*;
use rstest::rstest;

fn abc_nodes() -> Vec<Node> {
    vec![
        Node::waypoint("A", 0.0, 0.0),
        Node::waypoint("B", 0.0, 1.0),
        Node::waypoint("C", 0.0, 2.0),
    ]
}

fn abc_edges() -> Vec<Edge> {
    vec![Edge::new("A", "B", 10.0), Edge::new("B", "C", 10.0)]
}

#[test]
fn line_network_route() {
    let graph = PathGraph::build(&abc_nodes(), &abc_edges()).unwrap();
    let path = shortest_path(&graph, "A", "C", None).unwrap();
    assert_eq!(path.node_ids(), vec!["A", "B", "C"]);
    assert_eq!(path.total_weight, 20.0);
}

#[test]
fn custom_node_attaches_to_closer_segment() {
    let mut nodes = abc_nodes();
    let dorm = Node::custom("D", 0.0, 0.5, "Dorm");
    nodes.push(dorm.clone());

    let attachment = attach(&dorm, &nodes, &abc_edges(), DEFAULT_DISTANCE_SCALE_FACTOR).unwrap();
    assert_eq!(attachment.connection_point, Coordinate::new(0.0, 0.5));
    assert!(["A", "B"].contains(&attachment.connected_to.as_str()));

    let edges = connect_custom_nodes(&[dorm], &nodes, &abc_edges(), DEFAULT_DISTANCE_SCALE_FACTOR);
    let graph = PathGraph::build(&nodes, &edges).unwrap();
    let path = shortest_path(&graph, "D", "C", None).unwrap();
    assert_eq!(path.node_ids().first(), Some(&"D"));
    assert_eq!(path.node_ids().last(), Some(&"C"));
}

#[test]
fn disconnected_pair_has_no_path() {
    let nodes = vec![Node::waypoint("A", 0.0, 0.0), Node::waypoint("B", 0.0, 1.0)];
    let graph = PathGraph::build(&nodes, &[]).unwrap();
    assert!(matches!(
        shortest_path(&graph, "A", "B", None),
        Err(Error::NoPathExists { .. })
    ));
}

#[test]
fn negative_weight_never_yields_a_route() {
    let mut edges = abc_edges();
    edges.push(Edge::new("A", "C", -100.0));
    assert!(matches!(
        PathGraph::build(&abc_nodes(), &edges),
        Err(Error::InvalidWeight { .. })
    ));
    assert!(matches!(
        Network::new(abc_nodes(), edges, RouterConfig::default()),
        Err(Error::InvalidWeight { .. })
    ));
}

/// Random multigraphs on a handful of nodes. Self-loops and parallel
/// edges are allowed, weights are whole meters so sums compare exactly.
fn synthetic_graph() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (2usize..=7).prop_flat_map(|node_count| {
        prop::collection::vec((0..node_count, 0..node_count, 1u32..=20), 0..=12).prop_map(
            move |raw_edges| {
                let nodes: Vec<Node> = (0..node_count)
                    .map(|i| Node::waypoint(format!("N{i}"), i as f64 * 0.001, 0.0))
                    .collect();
                let edges: Vec<Edge> = raw_edges
                    .into_iter()
                    .map(|(a, b, weight)| Edge::new(format!("N{a}"), format!("N{b}"), f64::from(weight)))
                    .collect();
                (nodes, edges)
            },
        )
    })
}

/// Minimum weight over every simple path, `None` when unreachable
fn brute_force_min(nodes: &[Node], edges: &[Edge], from: usize, to: usize) -> Option<f64> {
    fn explore(
        edges: &[Edge],
        current: &str,
        target: &str,
        visited: &mut Vec<String>,
        weight: f64,
        best: &mut Option<f64>,
    ) {
        if current == target {
            if best.is_none_or(|b| weight < b) {
                *best = Some(weight);
            }
            return;
        }
        for edge in edges {
            let next = if edge.from == current {
                &edge.to
            } else if edge.to == current {
                &edge.from
            } else {
                continue;
            };
            if visited.contains(next) {
                continue;
            }
            visited.push(next.clone());
            explore(edges, next, target, visited, weight + edge.weight, best);
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![nodes[from].id.clone()];
    explore(edges, &nodes[from].id, &nodes[to].id, &mut visited, 0.0, &mut best);
    best
}

proptest! {
    #[test]
    fn dijkstra_matches_brute_force((nodes, edges) in synthetic_graph()) {
        let graph = PathGraph::build(&nodes, &edges).unwrap();

        for from in 0..nodes.len() {
            for to in 0..nodes.len() {
                let expected = brute_force_min(&nodes, &edges, from, to);
                let result = shortest_path(&graph, &nodes[from].id, &nodes[to].id, None);
                match expected {
                    Some(weight) => {
                        let path = result.unwrap();
                        prop_assert_eq!(path.total_weight, weight, "{} -> {}", from, to);
                        prop_assert!(path.is_consistent_with(&graph));
                        prop_assert_eq!(&path.nodes.first().unwrap().id, &nodes[from].id);
                        prop_assert_eq!(&path.nodes.last().unwrap().id, &nodes[to].id);
                    }
                    None => {
                        let is_no_path = matches!(result, Err(Error::NoPathExists { .. }));
                        prop_assert!(is_no_path);
                    }
                }
            }
        }
    }

    #[test]
    fn path_weights_agree_with_paths((nodes, edges) in synthetic_graph()) {
        let graph = PathGraph::build(&nodes, &edges).unwrap();
        let weights = shortest_path_weights(&graph, "N0", None).unwrap();

        for node in &nodes {
            match weights.get(node.id.as_str()) {
                Some(&weight) => {
                    let path = shortest_path(&graph, "N0", &node.id, None).unwrap();
                    prop_assert_eq!(path.total_weight, weight);
                }
                None => prop_assert!(shortest_path(&graph, "N0", &node.id, None).is_err()),
            }
        }
    }
}

#[test]
fn every_campus_location_is_reachable() {
    let network = campus_network().unwrap();
    let locations = list_routable_locations(&network, &[]);
    assert_eq!(locations.len(), 7);

    for from in &locations {
        for to in &locations {
            let route = compute_route_between(&network, &from.id, &to.id, &[]).unwrap();
            assert_eq!(route.start, from.id);
            assert_eq!(route.end, to.id);
            if from.id == to.id {
                assert_eq!(route.distance(), 0.0);
            } else {
                assert!(route.distance() > 0.0);
            }
        }
    }
}

#[rstest]
#[case("HOME", "GYM")]
#[case("MAT101", "EES101")]
#[case("CSC107", "MAT102")]
#[case("CSC201", "HOME")]
fn campus_routes_are_symmetric(#[case] from: &str, #[case] to: &str) {
    let network = campus_network().unwrap();
    let there = compute_route_between(&network, from, to, &[]).unwrap();
    let back = compute_route_between(&network, to, from, &[]).unwrap();
    assert_eq!(there.distance(), back.distance());
}

#[test]
fn campus_route_with_custom_location() {
    let network = campus_network().unwrap();
    let store = InMemoryLocationStore::new();
    store
        .add(Node::location("CAFE", 43.4733, -80.5447, "Cafe"))
        .unwrap();
    let custom = store.list().unwrap();

    let locations = list_routable_locations(&network, &custom);
    assert_eq!(locations.len(), 8);
    assert!(locations.last().unwrap().is_custom);

    let route = compute_route(
        &network,
        Coordinate::new(43.4720, -80.5440),
        Coordinate::new(43.4733, -80.5447),
        &custom,
    )
    .unwrap();
    assert_eq!(route.start, "MAT101");
    assert_eq!(route.end, "CAFE");
    assert_eq!(route.coordinates().last(), Some(&Coordinate::new(43.4733, -80.5447)));

    // a later request without the custom location is unaffected
    let route = compute_route(
        &network,
        Coordinate::new(43.4720, -80.5440),
        Coordinate::new(43.4733, -80.5447),
        &[],
    )
    .unwrap();
    assert_ne!(route.end, "CAFE");
}

fn extra_custom_nodes() -> Vec<Node> {
    vec![
        Node::custom("X1", 43.4712, -80.5452, "X1"),
        Node::custom("X2", 43.4761, -80.5333, "X2"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spatial_index_matches_linear_scan(lat in 43.464f64..43.479, lng in -80.550f64..-80.528) {
        let network = campus_network().unwrap();
        let custom = extra_custom_nodes();
        let all_nodes = network.nodes_with_custom(&custom);
        let coordinate = Coordinate::new(lat, lng);

        let indexed = network.nearest_node(coordinate, &custom).unwrap();
        let scanned = resolve(coordinate, &all_nodes).unwrap();
        prop_assert_eq!(&indexed.id, &scanned.id);
    }
}

#[test]
fn node_positions_resolve_to_themselves() {
    let network = campus_network().unwrap();
    let custom = extra_custom_nodes();
    let all_nodes = network.nodes_with_custom(&custom);

    for node in &all_nodes {
        let nearest = network.nearest_node(node.coordinate(), &custom).unwrap();
        assert_eq!(nearest.coordinate(), node.coordinate());
        assert_eq!(nearest.id, resolve(node.coordinate(), &all_nodes).unwrap().id);
    }

    // CSC107 and N13 share a position, the first one listed wins
    assert_eq!(
        network.nearest_node(Coordinate::new(43.4740, -80.5450), &[]).unwrap().id,
        "CSC107"
    );
}
