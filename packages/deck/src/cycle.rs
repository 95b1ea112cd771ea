//! The cycle of supply and local impact.
//!
//! Five stages form a closed loop; two impact nodes hang off the buyers and
//! reinforcement stages. [`CycleDiagram::to_dot`] produces Graphviz source
//! for the front end to lay out.

use std::fmt::Write as _;

/// Fill colour of cycle stages.
const NAVY: &str = "#0e1b3c";
/// Fill colour of the social impact node and colour of impact edges.
const ALERT_RED: &str = "#d92828";
/// Fill colour of the council cost node.
const WARNING_YELLOW: &str = "#ffcc00";
/// Colour of cycle edges.
const EDGE_GREY: &str = "#555555";

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Solid edge within the main cycle.
    Cycle,
    /// Dashed red consequence edge.
    Impact,
}

/// A box in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleNode {
    /// Graphviz node id.
    pub id: &'static str,
    /// Label, lines separated by `\n`.
    pub label: &'static str,
    /// Fill colour.
    pub fill: &'static str,
    /// Text colour.
    pub font_color: &'static str,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    /// Source node id.
    pub from: &'static str,
    /// Target node id.
    pub to: &'static str,
    /// Edge style.
    pub style: EdgeStyle,
}

/// The full diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDiagram {
    /// Nodes in declaration order.
    pub nodes: Vec<CycleNode>,
    /// Edges in declaration order.
    pub edges: Vec<CycleEdge>,
}

/// Returns the supply and local impact cycle.
#[must_use]
pub fn supply_cycle() -> CycleDiagram {
    let stage = |id: &'static str, label: &'static str| CycleNode {
        id,
        label,
        fill: NAVY,
        font_color: "white",
    };
    let edge = |from: &'static str, to: &'static str, style| CycleEdge { from, to, style };

    CycleDiagram {
        nodes: vec![
            stage("A", "1. Providers"),
            stage("B", "2. Distributors"),
            stage("C", "3. The Market\n(Hub)"),
            stage("D", "4. Buyers"),
            stage("E", "5. Reinforcement"),
            CycleNode {
                id: "Impact",
                label: "SOCIAL IMPACT:\nRough Sleepers,\nbeggars, thieves,\nand those involved\nin violent crime",
                fill: ALERT_RED,
                font_color: "white",
            },
            CycleNode {
                id: "Cost",
                label: "£ Council Costs\n& Crime Rates",
                fill: WARNING_YELLOW,
                font_color: "black",
            },
        ],
        edges: vec![
            edge("A", "B", EdgeStyle::Cycle),
            edge("B", "C", EdgeStyle::Cycle),
            edge("C", "D", EdgeStyle::Cycle),
            edge("D", "E", EdgeStyle::Cycle),
            edge("E", "A", EdgeStyle::Cycle),
            edge("D", "Impact", EdgeStyle::Impact),
            edge("E", "Cost", EdgeStyle::Impact),
            edge("Impact", "Cost", EdgeStyle::Impact),
        ],
    }
}

impl CycleDiagram {
    /// Renders the diagram as a Graphviz `digraph`.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        out.push_str(
            "    graph [rankdir=TB newrank=true splines=curved nodesep=0.3 ranksep=0.4 bgcolor=transparent]\n",
        );
        out.push_str(
            "    node [shape=box style=\"filled, rounded\" fontname=Arial fontsize=10 margin=\"0.1,0.1\" height=0.4]\n",
        );

        for node in &self.nodes {
            let _ = writeln!(
                out,
                "    {} [label=\"{}\" fillcolor=\"{}\" fontcolor={}]",
                quote_id(node.id),
                escape_label(node.label),
                node.fill,
                node.font_color
            );
        }

        for edge in &self.edges {
            let attrs = match edge.style {
                EdgeStyle::Cycle => {
                    format!("color=\"{EDGE_GREY}\" arrowsize=0.6 penwidth=1.2")
                }
                EdgeStyle::Impact => {
                    format!("style=dashed color=\"{ALERT_RED}\" arrowsize=0.6 penwidth=1.2")
                }
            };
            let _ = writeln!(
                out,
                "    {} -> {} [{attrs}]",
                quote_id(edge.from),
                quote_id(edge.to)
            );
        }

        out.push_str("}\n");
        out
    }
}

fn quote_id(id: &str) -> String {
    format!("\"{}\"", id.replace('"', "\\\""))
}

fn escape_label(label: &str) -> String {
    label.replace('"', "\\\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_cycle_is_closed() {
        let diagram = supply_cycle();
        let cycle: Vec<_> = diagram
            .edges
            .iter()
            .filter(|e| e.style == EdgeStyle::Cycle)
            .collect();
        assert_eq!(cycle.len(), 5);
        for pair in cycle.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(cycle[4].to, cycle[0].from);
    }

    #[test]
    fn every_edge_references_a_node() {
        let diagram = supply_cycle();
        for edge in &diagram.edges {
            assert!(diagram.nodes.iter().any(|n| n.id == edge.from));
            assert!(diagram.nodes.iter().any(|n| n.id == edge.to));
        }
    }

    #[test]
    fn dot_output_escapes_newlines_and_styles_impact_edges() {
        let dot = supply_cycle().to_dot();
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"3. The Market\\n(Hub)\""));
        assert!(dot.contains("\"D\" -> \"Impact\" [style=dashed"));
        assert!(dot.contains("\"E\" -> \"A\" [color=\"#555555\""));
        assert_eq!(dot.matches("->").count(), 8);
    }
}
