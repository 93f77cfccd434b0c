//! Candidate graph construction and connected-component resolution.
//!
//! The candidate graph proposes an undirected edge between two records when
//! heuristic evidence suggests they are fragments of one logical message.
//! Records are compared only within their phone partition, which bounds the
//! otherwise quadratic pass to a per-phone quadratic cost.
//!
//! An edge (i, j) exists when both hold:
//! 1. `|t_j - t_i|` is within the configured time window, and
//! 2. the two token sets share at least `min_shared_tokens` tokens, **or**
//!    at least one of the two texts does not end in terminal punctuation.
//!
//! The shared-token rule catches messages split across records carrying the
//! same tracking or verification code. The completeness rule catches
//! boilerplate truncated by the transport length limit, which rarely ends
//! cleanly. The combination is intentionally permissive once either fires:
//! it accepts some false-positive merges to keep recall high, and that
//! trade-off is part of the contract rather than something to optimize away.
//!
//! Components are then the transitive closure of the edge relation: if A
//! pairs with B and B pairs with C, all three merge even when A and C alone
//! would not have matched.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::ReassemblyConfig;
use crate::core::tokens::TokenExtractor;
use crate::record::Record;

/// Adjacency list over record indices. Both directions of every edge are
/// recorded.
pub type AdjacencyList = Vec<Vec<usize>>;

/// Returns `true` if `text` ends with terminal punctuation (`.`, `!`, `?`).
///
/// A message that stops without it is suspected to continue in a sibling
/// record.
pub fn ends_complete(text: &str) -> bool {
    matches!(text.trim_end().chars().last(), Some('.' | '!' | '?'))
}

/// Builds the candidate graph over `records`.
///
/// Pure with respect to its inputs: the adjacency list is keyed by stable
/// indices into the record slice, and the slice itself is never touched.
/// Records with no qualifying neighbor simply keep an empty adjacency row
/// and later pass through as singleton clusters.
pub fn build_candidate_graph(records: &[Record], config: &ReassemblyConfig) -> AdjacencyList {
    let extractor = TokenExtractor::new();
    let mut graph: AdjacencyList = vec![Vec::new(); records.len()];

    let mut by_phone: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, rec) in records.iter().enumerate() {
        by_phone.entry(rec.phone.as_str()).or_default().push(i);
    }

    for indices in by_phone.values() {
        // Token sets are needed for every pair in the partition; extract once.
        let tokens: HashMap<usize, HashSet<String>> = indices
            .iter()
            .map(|&i| (i, extractor.extract(&records[i].text)))
            .collect();

        for (pos, &i) in indices.iter().enumerate() {
            for &j in &indices[pos + 1..] {
                let delta = (records[j].timestamp - records[i].timestamp)
                    .num_seconds()
                    .abs();
                if delta > config.time_window_secs {
                    continue;
                }

                let shared = tokens[&i].intersection(&tokens[&j]).count();
                if shared >= config.min_shared_tokens
                    || !ends_complete(&records[i].text)
                    || !ends_complete(&records[j].text)
                {
                    graph[i].push(j);
                    graph[j].push(i);
                }
            }
        }
    }

    graph
}

/// Computes the connected components of the candidate graph.
///
/// Breadth-first traversal from each unvisited node, in index order, so
/// component discovery order is deterministic for a given input enumeration.
/// The components partition `0..n` exactly: every index appears in exactly
/// one component.
///
/// # Panics
///
/// Panics if an adjacency entry references an index outside `0..n`. That can
/// only happen when the partition-before-compare invariant was broken while
/// building the graph, which is a programming error, not an input condition.
pub fn find_components(graph: &AdjacencyList) -> Vec<Vec<usize>> {
    let n = graph.len();
    let mut seen = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        let mut queue = VecDeque::from([start]);
        let mut component = Vec::new();
        seen[start] = true;
        while let Some(u) = queue.pop_front() {
            component.push(u);
            for &v in &graph[u] {
                assert!(v < n, "adjacency entry {v} out of range for {n} records");
                if !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        components.push(component);
    }

    components
}
