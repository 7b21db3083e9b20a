//! Graphviz DOT output for the four view modes. The DOT text is the contract
//! with the external rendering collaborator: nodes filled by program color,
//! collaborations as solid edges, per-mode overlays as described below.

use std::collections::HashMap;

use crate::analysis::recommend::Recommendation;
use crate::analysis::resilience::RemovalImpact;
use crate::config::ColorsConfig;
use crate::model::{program_color, Network, PersonId};

/// Extra drawing layer for a view mode beyond the plain graph.
pub enum Overlay<'a> {
    /// Plain program-colored graph.
    None,
    /// Dashed red candidate edges.
    Recommendations(&'a [Recommendation]),
    /// Surviving graph colored per connected component; the removed person
    /// and their edges are not drawn.
    Removal(&'a RemovalImpact),
    /// Most relevant people highlighted.
    TopCentral(&'a [PersonId]),
}

const HIGHLIGHT_COLOR: &str = "#FF4500";

pub fn render_dot(network: &Network, overlay: &Overlay<'_>, colors: &ColorsConfig) -> String {
    let mut out = String::from("graph collabnet {\n");
    out.push_str("  node [shape=circle, style=filled, color=black];\n");
    push_legend(&mut out, network, colors);

    match overlay {
        Overlay::Removal(impact) => push_removal_nodes(&mut out, network, impact, colors),
        Overlay::TopCentral(top) => push_nodes(&mut out, network, colors, |id| {
            top.contains(id)
                .then_some(format!("fillcolor=\"{HIGHLIGHT_COLOR}\", penwidth=2, width=1.1"))
        }),
        _ => push_nodes(&mut out, network, colors, |_| None),
    }

    let skip_edges_of = match overlay {
        Overlay::Removal(impact) => Some(&impact.removed),
        _ => None,
    };
    for collab in network.collaborations() {
        if let Some(removed) = skip_edges_of {
            if collab.involves(removed) {
                continue;
            }
        }
        out.push_str(&format!(
            "  \"{}\" -- \"{}\";\n",
            escape(collab.a.as_str()),
            escape(collab.b.as_str())
        ));
    }

    if let Overlay::Recommendations(recs) = overlay {
        for rec in *recs {
            out.push_str(&format!(
                "  \"{}\" -- \"{}\" [style=dashed, color=red, constraint=false];\n",
                escape(rec.a.as_str()),
                escape(rec.b.as_str())
            ));
        }
    }

    out.push_str("}\n");
    out
}

fn push_legend(out: &mut String, network: &Network, colors: &ColorsConfig) {
    let mut seen: Vec<&str> = Vec::new();
    for person in network.people() {
        let program = person.program.as_str();
        if seen.contains(&program) {
            continue;
        }
        seen.push(program);
        out.push_str(&format!(
            "  // legend: {} = {}\n",
            program,
            program_color(program, colors)
        ));
    }
}

fn push_nodes<F>(out: &mut String, network: &Network, colors: &ColorsConfig, extra: F)
where
    F: Fn(&PersonId) -> Option<String>,
{
    for person in network.people() {
        let attrs = extra(&person.id).unwrap_or_else(|| {
            format!("fillcolor=\"{}\"", program_color(&person.program, colors))
        });
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\\n({})\", {}];\n",
            escape(person.id.as_str()),
            escape(&person.name),
            escape(&person.program),
            attrs
        ));
    }
}

fn push_removal_nodes(
    out: &mut String,
    network: &Network,
    impact: &RemovalImpact,
    colors: &ColorsConfig,
) {
    let mut component_of: HashMap<&PersonId, usize> = HashMap::new();
    for (idx, members) in impact.components.iter().enumerate() {
        for member in members {
            component_of.insert(member, idx);
        }
    }

    for person in network.people() {
        if person.id == impact.removed {
            continue;
        }
        let color = component_of
            .get(&person.id)
            .and_then(|&idx| {
                if colors.palette.is_empty() {
                    None
                } else {
                    Some(colors.palette[idx % colors.palette.len()].as_str())
                }
            })
            .unwrap_or(colors.fallback.as_str());
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\\n({})\", fillcolor=\"{}\", penwidth=2];\n",
            escape(person.id.as_str()),
            escape(&person.name),
            escape(&person.program),
            color
        ));
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{recommendations, simulate_removal};
    use crate::model::seed::demo_network;

    #[test]
    fn normal_view_colors_nodes_by_program() {
        let network = demo_network();
        let colors = ColorsConfig::default();
        let dot = render_dot(&network, &Overlay::None, &colors);
        assert!(dot.starts_with("graph collabnet {"));
        assert!(dot.contains("\"maria\" [label=\"Maria\\n(Engineering)\""));
        assert!(dot.contains("\"ana\" -- \"maria\";"));
        assert!(dot.contains("// legend: Engineering ="));
        // Same program, same fill color.
        let maria_color = program_color("Engineering", &colors);
        assert!(dot.contains(&format!(
            "\"carlos\" [label=\"Carlos\\n(Engineering)\", fillcolor=\"{maria_color}\""
        )));
    }

    #[test]
    fn recommendation_overlay_draws_dashed_red_edges() {
        let network = demo_network();
        let recs = recommendations(&network);
        assert!(!recs.is_empty());
        let dot = render_dot(
            &network,
            &Overlay::Recommendations(&recs),
            &ColorsConfig::default(),
        );
        assert!(dot.contains("[style=dashed, color=red, constraint=false];"));
    }

    #[test]
    fn removal_overlay_hides_the_removed_person() {
        let network = demo_network();
        let impact =
            simulate_removal(&network, &PersonId::new("maria")).expect("simulate removal");
        let dot = render_dot(&network, &Overlay::Removal(&impact), &ColorsConfig::default());
        assert!(!dot.contains("\"maria\""));
        assert!(dot.contains("\"ana\" -- \"sofia\";") || dot.contains("\"sofia\" -- \"ana\";"));
    }

    #[test]
    fn top_central_overlay_highlights_nodes() {
        let network = demo_network();
        let top = vec![PersonId::new("maria")];
        let dot = render_dot(
            &network,
            &Overlay::TopCentral(&top),
            &ColorsConfig::default(),
        );
        assert!(dot.contains(&format!(
            "\"maria\" [label=\"Maria\\n(Engineering)\", fillcolor=\"{HIGHLIGHT_COLOR}\""
        )));
    }
}
