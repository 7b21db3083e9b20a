//! Plain-text tables and reports for the terminal.

use console::style;

use crate::analysis::metrics::{CentralityEntry, NetworkSummary};
use crate::analysis::recommend::Recommendation;
use crate::analysis::resilience::RemovalImpact;
use crate::model::{Network, PersonId};

pub fn people_table(network: &Network) -> String {
    let mut rows: Vec<[String; 4]> = vec![[
        "ID".to_string(),
        "NAME".to_string(),
        "PROGRAM".to_string(),
        "INTERESTS".to_string(),
    ]];
    for person in network.people() {
        rows.push([
            person.id.as_str().to_string(),
            person.name.clone(),
            person.program.clone(),
            person.interests.join(", "),
        ]);
    }
    aligned(&rows)
}

pub fn collaborations_table(network: &Network) -> String {
    let mut rows: Vec<[String; 2]> = vec![["PERSON".to_string(), "PERSON".to_string()]];
    for collab in network.collaborations() {
        rows.push([collab.a.as_str().to_string(), collab.b.as_str().to_string()]);
    }
    aligned(&rows)
}

pub fn summary_line(summary: &NetworkSummary) -> String {
    format!(
        "{} people, {} collaborations, {} components",
        summary.nodes, summary.edges, summary.components
    )
}

pub fn recommendations_report(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "no interdisciplinary recommendations available\n".to_string();
    }

    let mut out = String::new();
    for (idx, rec) in recs.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) -- {} ({})\n   shared interests: {}\n",
            idx + 1,
            rec.a,
            rec.program_a,
            rec.b,
            rec.program_b,
            rec.shared_interests.join(", ")
        ));
    }
    out
}

pub fn resilience_report(impact: &RemovalImpact) -> String {
    let mut out = format!("removal simulation for '{}'\n", impact.removed);
    out.push_str(&format!(
        "components: {} -> {}\n",
        impact.components_before, impact.components_after
    ));
    out.push_str(&format!(
        "connections lost: {}\n",
        impact.lost_connections.len()
    ));
    for collab in &impact.lost_connections {
        out.push_str(&format!("  {} -- {}\n", collab.a, collab.b));
    }
    if impact.fragmented {
        let extra = impact.components_after - impact.components_before;
        out.push_str(&format!(
            "{}\n",
            style(format!("warning: the network fragments into {extra} extra component(s)"))
                .yellow()
        ));
    }
    if impact.critical {
        out.push_str(&format!(
            "{}\n",
            style(format!(
                "warning: critical node, {} connections depend on it",
                impact.lost_connections.len()
            ))
            .red()
        ));
    }
    out
}

/// Ranked centrality listing for the gap-detection view; the `top` set is
/// marked with a star.
pub fn gap_report(entries: &[CentralityEntry], top: &[PersonId], limit: usize) -> String {
    if entries.is_empty() {
        return "no people in the network\n".to_string();
    }

    let mut ranked: Vec<&CentralityEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    for (idx, entry) in ranked.iter().take(limit).enumerate() {
        let marker = if top.contains(&entry.id) { "*" } else { " " };
        out.push_str(&format!(
            "{} {}. {}  degree {:.3}  betweenness {:.3}  relevance {:.3}\n",
            marker,
            idx + 1,
            entry.id,
            entry.degree,
            entry.betweenness,
            entry.relevance
        ));
    }
    out
}

fn aligned<const N: usize>(rows: &[[String; N]]) -> String {
    let mut widths = [0usize; N];
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.len());
        }
    }

    let mut out = String::new();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if col + 1 == N {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{cell:<width$}  ", width = widths[col]));
            }
        }
        out.push('\n');
    }
    out
}
