use super::*;
use crate::core::error::GraphError;
use crate::core::types::PublicationRecord;
use proptest::prelude::*;

type Graph = CitationGraph<PublicationRecord<u32>>;
type NamedGraph = CitationGraph<PublicationRecord<&'static str>>;

fn sorted<T: Ord>(mut ids: Vec<T>) -> Vec<T> {
    ids.sort();
    ids
}

fn children(graph: &Graph, id: u32) -> Vec<u32> {
    sorted(graph.children_of(&id).unwrap())
}

fn parents(graph: &Graph, id: u32) -> Vec<u32> {
    sorted(graph.parents_of(&id).unwrap())
}

/// Nine publications rooted at 1:
/// 1 → 2 → 3, 1 → 4 → {5, 6, 9}, {6, 2} → 7, {5, 7} → 8, 5 → 9
fn build_nine() -> Graph {
    let mut graph = Graph::new(&1).unwrap();
    graph.create(&2, &[1]).unwrap();
    graph.create(&3, &[2]).unwrap();
    graph.create(&4, &[1]).unwrap();
    graph.create(&5, &[4]).unwrap();
    graph.create(&6, &[4]).unwrap();
    graph.create(&7, &[6, 2]).unwrap();
    graph.create(&8, &[5, 7]).unwrap();
    graph.create(&9, &[5]).unwrap();
    graph.add_citation(&9, &4).unwrap();
    graph.assert_consistent();
    graph
}

fn check_nine(graph: &Graph) {
    assert!(parents(graph, 1).is_empty());
    assert_eq!(parents(graph, 2), vec![1]);
    assert_eq!(parents(graph, 3), vec![2]);
    assert_eq!(parents(graph, 4), vec![1]);
    assert_eq!(parents(graph, 5), vec![4]);
    assert_eq!(parents(graph, 6), vec![4]);
    assert_eq!(parents(graph, 7), vec![2, 6]);
    assert_eq!(parents(graph, 8), vec![5, 7]);
    assert_eq!(parents(graph, 9), vec![4, 5]);

    assert_eq!(children(graph, 1), vec![2, 4]);
    assert_eq!(children(graph, 2), vec![3, 7]);
    assert!(children(graph, 3).is_empty());
    assert_eq!(children(graph, 4), vec![5, 6, 9]);
    assert_eq!(children(graph, 5), vec![8, 9]);
    assert_eq!(children(graph, 6), vec![7]);
    assert_eq!(children(graph, 7), vec![8]);
    assert!(children(graph, 8).is_empty());
    assert!(children(graph, 9).is_empty());
}

#[test]
fn new_graph_holds_only_the_root() {
    let graph = NamedGraph::new(&"R").unwrap();
    assert_eq!(graph.exists(&"R"), Ok(true));
    assert_eq!(graph.root_id(), Ok("R"));
    assert!(graph.children_of(&"R").unwrap().is_empty());
    assert!(graph.parents_of(&"R").unwrap().is_empty());
    assert_eq!(graph.publication_count(), 1);
}

#[test]
fn create_links_every_parent() {
    let mut graph = NamedGraph::new(&"R").unwrap();
    graph.create(&"A", &["R"]).unwrap();
    graph.create(&"B", &["R"]).unwrap();
    graph.create(&"C", &["A", "B"]).unwrap();

    assert_eq!(sorted(graph.parents_of(&"C").unwrap()), vec!["A", "B"]);
    assert_eq!(sorted(graph.children_of(&"R").unwrap()), vec!["A", "B"]);
    assert_eq!(graph.get(&"C").unwrap().id_ref(), &"C");
    graph.assert_consistent();
}

#[test]
fn create_rejects_taken_id() {
    let mut graph = build_nine();
    assert_eq!(graph.create(&5, &[1]), Err(GraphError::AlreadyExists));
    assert_eq!(graph.create(&1, &[2]), Err(GraphError::AlreadyExists));
    check_nine(&graph);
}

#[test]
fn create_requires_existing_parents() {
    let mut graph = build_nine();
    assert_eq!(graph.create(&22, &[]), Err(GraphError::NotFound));
    assert_eq!(graph.create(&22, &[1, 2, 40]), Err(GraphError::NotFound));
    assert_eq!(graph.exists(&22), Ok(false));
    check_nine(&graph);
    graph.assert_consistent();
}

#[test]
fn create_ignores_repeated_parents() {
    let mut graph = build_nine();
    graph.create(&22, &[3, 3, 8, 3]).unwrap();
    assert_eq!(parents(&graph, 22), vec![3, 8]);
    assert_eq!(children(&graph, 3), vec![22]);
    graph.assert_consistent();
}

#[test]
fn create_with_many_parents() {
    let mut graph = build_nine();
    graph.create(&22, &[1, 2, 3, 4, 6, 7, 8, 9]).unwrap();

    assert_eq!(parents(&graph, 22), vec![1, 2, 3, 4, 6, 7, 8, 9]);
    assert_eq!(children(&graph, 1), vec![2, 4, 22]);
    assert_eq!(children(&graph, 2), vec![3, 7, 22]);
    assert_eq!(children(&graph, 5), vec![8, 9]);
    assert_eq!(children(&graph, 9), vec![22]);
    assert!(children(&graph, 22).is_empty());
    graph.assert_consistent();
}

#[test]
fn create_with_single_parent() {
    let mut graph = build_nine();
    graph.create_with_parent(&22, &9).unwrap();
    assert_eq!(parents(&graph, 22), vec![9]);
    assert_eq!(children(&graph, 9), vec![22]);
}

#[test]
fn root_cannot_be_removed() {
    let mut graph = build_nine();
    assert_eq!(graph.remove(&1), Err(GraphError::TriedToRemoveRoot));
    check_nine(&graph);
}

#[test]
fn remove_missing_is_not_found() {
    let mut graph = build_nine();
    assert_eq!(graph.remove(&42), Err(GraphError::NotFound));
    check_nine(&graph);
}

#[test]
fn remove_keeps_nodes_cited_elsewhere() {
    let mut graph = NamedGraph::new(&"R").unwrap();
    graph.create(&"A", &["R"]).unwrap();
    graph.create(&"B", &["R"]).unwrap();
    graph.create(&"C", &["A", "B"]).unwrap();

    graph.remove(&"A").unwrap();
    assert_eq!(graph.exists(&"A"), Ok(false));
    assert_eq!(graph.exists(&"C"), Ok(true));
    assert_eq!(graph.parents_of(&"C").unwrap(), vec!["B"]);
    assert_eq!(graph.children_of(&"R").unwrap(), vec!["B"]);
    graph.assert_consistent();
}

#[test]
fn remove_cascades_to_orphans() {
    let mut graph = build_nine();
    graph.remove(&4).unwrap();

    for gone in [4, 5, 6, 9] {
        assert_eq!(graph.exists(&gone), Ok(false));
        assert!(matches!(graph.get(&gone), Err(GraphError::NotFound)));
    }
    assert_eq!(parents(&graph, 7), vec![2]);
    assert_eq!(parents(&graph, 8), vec![7]);
    assert_eq!(children(&graph, 1), vec![2]);
    assert_eq!(children(&graph, 2), vec![3, 7]);
    assert_eq!(children(&graph, 7), vec![8]);
    assert_eq!(graph.publication_count(), 5);
    graph.assert_consistent();
}

#[test]
fn remove_inner_node_scrubs_back_references() {
    let mut graph = build_nine();
    graph.remove(&7).unwrap();

    assert_eq!(graph.exists(&7), Ok(false));
    assert_eq!(parents(&graph, 8), vec![5]);
    assert_eq!(children(&graph, 2), vec![3]);
    assert!(children(&graph, 6).is_empty());
    assert_eq!(graph.publication_count(), 8);
    graph.assert_consistent();
}

#[test]
fn removing_every_citation_of_the_root_empties_the_graph() {
    let mut graph = NamedGraph::new(&"Goto Considered Harmful").unwrap();
    let root = graph.root_id().unwrap();
    graph.create(&"A", &[root]).unwrap();
    graph.create(&"B", &[root]).unwrap();
    graph.create(&"C", &["A"]).unwrap();
    graph.add_citation(&"C", &"B").unwrap();
    graph.create(&"D", &["A", "B"]).unwrap();
    assert_eq!(graph.children_of(&"A").unwrap().len(), 2);

    graph.remove(&"A").unwrap();
    for id in ["B", "C", "D"] {
        assert_eq!(graph.exists(&id), Ok(true));
    }
    graph.remove(&"B").unwrap();
    for id in ["A", "B", "C", "D"] {
        assert_eq!(graph.exists(&id), Ok(false));
    }
    assert_eq!(graph.publication_count(), 1);
    graph.assert_consistent();
}

#[test]
fn add_citation_links_existing_nodes() {
    let mut graph = build_nine();
    graph.add_citation(&5, &1).unwrap();
    assert_eq!(parents(&graph, 5), vec![1, 4]);
    assert_eq!(children(&graph, 1), vec![2, 4, 5]);

    graph.add_citation(&9, &2).unwrap();
    assert_eq!(parents(&graph, 9), vec![2, 4, 5]);
    assert_eq!(children(&graph, 2), vec![3, 7, 9]);
    graph.assert_consistent();
}

#[test]
fn add_citation_twice_is_a_no_op() {
    let mut graph = NamedGraph::new(&"R").unwrap();
    graph.create(&"A", &["R"]).unwrap();
    graph.create(&"C", &["A"]).unwrap();
    graph.add_citation(&"C", &"R").unwrap();
    graph.add_citation(&"C", &"R").unwrap();
    assert_eq!(sorted(graph.parents_of(&"C").unwrap()), vec!["A", "R"]);
    assert_eq!(sorted(graph.children_of(&"R").unwrap()), vec!["A", "C"]);
    graph.assert_consistent();
}

#[test]
fn add_citation_requires_both_ids() {
    let mut graph = build_nine();
    assert_eq!(graph.add_citation(&42, &1), Err(GraphError::NotFound));
    assert_eq!(graph.add_citation(&3, &42), Err(GraphError::NotFound));
    check_nine(&graph);
}

#[test]
fn add_citation_refuses_cycles() {
    let mut graph = build_nine();
    assert_eq!(graph.add_citation(&4, &8), Err(GraphError::CycleDetected));
    assert_eq!(graph.add_citation(&1, &3), Err(GraphError::CycleDetected));
    assert_eq!(graph.add_citation(&6, &6), Err(GraphError::CycleDetected));
    check_nine(&graph);
    graph.assert_consistent();
}

#[test]
fn fan_in_node_survives_truncated_chain() {
    let mut graph = Graph::new(&1).unwrap();
    for i in 2..=100 {
        graph.create(&i, &[i - 1]).unwrap();
    }
    let fan_in: Vec<u32> = (1..=50).collect();
    graph.create(&0, &fan_in).unwrap();

    graph.remove(&10).unwrap();
    for i in 0..=9 {
        assert_eq!(graph.exists(&i), Ok(true));
    }
    for i in 10..=100 {
        assert_eq!(graph.exists(&i), Ok(false));
    }
    for i in 1..9 {
        assert_eq!(children(&graph, i), vec![0, i + 1]);
    }
    assert_eq!(children(&graph, 9), vec![0]);
    assert_eq!(parents(&graph, 0), (1..=9).collect::<Vec<_>>());
    graph.assert_consistent();
}

#[test]
fn payload_is_mutable_in_place() {
    let mut graph = build_nine();
    graph.get_mut(&7).unwrap().title = Some("Structured Programming".to_string());
    assert_eq!(graph.get(&7).unwrap().title.as_deref(), Some("Structured Programming"));
    assert!(matches!(graph.get_mut(&70), Err(GraphError::NotFound)));
}

fn records(graph: &Graph) -> Vec<PublicationRecord<u32>> {
    graph
        .ids()
        .unwrap()
        .iter()
        .map(|id| graph.get(id).unwrap().clone())
        .collect()
}

#[test]
fn moving_preserves_contents() {
    let mut graph = build_nine();
    graph.get_mut(&7).unwrap().title = Some("Structured Programming".to_string());
    let expected = records(&graph);

    let moved = Box::new(graph);
    check_nine(&moved);
    assert_eq!(records(&moved), expected);

    let mut target = Graph::new(&0).unwrap();
    assert_eq!(target.exists(&0), Ok(true));
    target = *moved;
    check_nine(&target);
    assert_eq!(records(&target), expected);
    assert_eq!(
        target.get(&7).unwrap().title.as_deref(),
        Some("Structured Programming")
    );
    assert_eq!(target.exists(&0), Ok(false));
    assert!(matches!(target.get(&0), Err(GraphError::NotFound)));
    assert_eq!(target.ids().unwrap(), (1..=9).collect::<Vec<_>>());
}

/// Sorted parents and children of every live id, in key order.
fn shape(graph: &Graph) -> Vec<(u32, Vec<u32>, Vec<u32>)> {
    graph
        .ids()
        .unwrap()
        .into_iter()
        .map(|id| (id, parents(graph, id), children(graph, id)))
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Create(u32, Vec<u32>),
    Cite(u32, u32),
    Remove(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..40, prop::collection::vec(0u32..40, 0..4)).prop_map(|(id, parents)| Op::Create(id, parents)),
        2 => (0u32..40, 0u32..40).prop_map(|(child, parent)| Op::Cite(child, parent)),
        1 => (0u32..40).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn random_operations_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut graph = Graph::new(&0).unwrap();
        for op in ops {
            let before = shape(&graph);
            let result = match &op {
                Op::Create(id, parents) => graph.create(id, parents),
                Op::Cite(child, parent) => graph.add_citation(child, parent),
                Op::Remove(id) => graph.remove(id),
            };
            if result.is_err() {
                prop_assert_eq!(shape(&graph), before);
            }
            graph.assert_consistent();
            prop_assert_eq!(graph.exists(&0), Ok(true));
        }
    }
}
