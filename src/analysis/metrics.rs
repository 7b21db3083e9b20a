//! Centrality metrics over a graph snapshot.
//!
//! Betweenness uses Brandes' algorithm (2001) for unweighted graphs: one BFS
//! per source plus a reverse-order dependency accumulation, O(V * E) overall.
//! Scores are normalized so both centralities land in [0, 1] and can be
//! combined into the single relevance score.

use std::collections::VecDeque;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::RelevanceConfig;
use crate::graph::{GraphQuery, Snapshot};
use crate::model::PersonId;

/// Below this node count the per-source Brandes passes run sequentially;
/// the fan-out only pays off on larger graphs.
const PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct CentralityEntry {
    pub id: PersonId,
    pub degree: f64,
    pub betweenness: f64,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
}

pub fn summarize(snapshot: &Snapshot) -> NetworkSummary {
    NetworkSummary {
        nodes: snapshot.node_count(),
        edges: snapshot.edge_count(),
        components: snapshot.components().len(),
    }
}

/// Degree centrality per node: incident-edge count / (n - 1), zero for a
/// graph of at most one node.
pub fn degree_centrality(graph: &impl GraphQuery) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|node| graph.degree(node) as f64 / (n - 1) as f64)
        .collect()
}

/// Betweenness centrality per node: the fraction of all-pairs shortest paths
/// passing through it, normalized by (n-1)(n-2)/2 for the undirected graph.
pub fn betweenness_centrality(graph: &(impl GraphQuery + Sync)) -> Vec<f64> {
    let n = graph.node_count();
    if n < 3 {
        return vec![0.0; n];
    }

    let sum = |mut acc: Vec<f64>, contribution: Vec<f64>| {
        for (slot, value) in acc.iter_mut().zip(contribution) {
            *slot += value;
        }
        acc
    };

    let raw = if n >= PARALLEL_THRESHOLD {
        (0..n)
            .into_par_iter()
            .map(|source| brandes_pass(graph, source))
            .reduce(|| vec![0.0; n], sum)
    } else {
        (0..n).fold(vec![0.0; n], |acc, source| {
            sum(acc, brandes_pass(graph, source))
        })
    };

    // Each unordered pair is counted from both endpoints, so the raw sums
    // carry a factor of two that the (n-1)(n-2) divisor absorbs.
    let scale = ((n - 1) * (n - 2)) as f64;
    raw.into_iter().map(|score| score / scale).collect()
}

/// One Brandes source pass: BFS shortest-path counting followed by
/// dependency accumulation in reverse discovery order.
fn brandes_pass(graph: &impl GraphQuery, source: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for w in graph.neighbors(v) {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta: Vec<f64> = vec![0.0; n];
    let mut contribution: Vec<f64> = vec![0.0; n];
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            if sigma[w] > 0.0 {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
        }
        if w != source {
            contribution[w] = delta[w];
        }
    }
    contribution
}

/// Per-person centrality entries in the snapshot's insertion order, with the
/// combined relevance score `w_d * degree + w_b * betweenness`.
pub fn centrality(snapshot: &Snapshot, weights: &RelevanceConfig) -> Vec<CentralityEntry> {
    let degree = degree_centrality(snapshot);
    let betweenness = betweenness_centrality(snapshot);
    snapshot
        .ids()
        .iter()
        .zip(degree.iter().zip(betweenness.iter()))
        .map(|(id, (&degree, &betweenness))| CentralityEntry {
            id: id.clone(),
            degree,
            betweenness,
            relevance: weights.degree_weight * degree + weights.betweenness_weight * betweenness,
        })
        .collect()
}

/// The k most relevant people. Entries must be in insertion order; the sort
/// is stable, so ties go to the first-created person.
pub fn top_central(entries: &[CentralityEntry], k: usize) -> Vec<PersonId> {
    let mut ranked: Vec<&CentralityEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(k).map(|e| e.id.clone()).collect()
}
