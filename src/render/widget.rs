use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::Serialize;

use super::{GraphRenderer, RenderContext};
use crate::classify::Classifier;
use crate::error::RenderError;
use crate::graph::KnowledgeGraph;
use crate::style::to_hex;

const VIS_NETWORK_SCRIPT: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

#[derive(Debug, Serialize)]
struct WidgetNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    color: String,
    size: f32,
    group: &'static str,
}

#[derive(Debug, Serialize)]
struct WidgetEdge<'a> {
    from: &'a str,
    to: &'a str,
    title: &'a str,
    arrows: &'static str,
}

#[derive(Debug, Serialize)]
struct WidgetData<'a> {
    nodes: Vec<WidgetNode<'a>>,
    edges: Vec<WidgetEdge<'a>>,
}

/// Self-contained interactive page describing the subgraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDocument {
    pub html: String,
    pub node_count: usize,
    pub edge_count: usize,
}

impl WidgetDocument {
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

/// Embedded network widget backend (vis-network). The document is built in
/// memory, nothing touches the filesystem.
#[derive(Debug, Clone)]
pub struct WidgetRenderer {
    pub height: String,
    pub width: String,
}

impl Default for WidgetRenderer {
    fn default() -> Self {
        Self {
            height: "700px".to_string(),
            width: "100%".to_string(),
        }
    }
}

impl WidgetRenderer {
    fn data<'a>(
        g: &'a KnowledgeGraph,
        classifier: &Classifier,
        ctx: &RenderContext,
    ) -> WidgetData<'a> {
        let nodes = g
            .nodes()
            .map(|label| {
                let category = classifier.classify(label);
                let style = ctx.style.category(category);
                WidgetNode {
                    id: label,
                    label,
                    title: label,
                    color: to_hex(style.color),
                    size: style.size,
                    group: category.group(),
                }
            })
            .collect();

        let edges = g
            .g()
            .edge_references()
            .map(|e| WidgetEdge {
                from: g.g()[e.source()].as_str(),
                to: g.g()[e.target()].as_str(),
                title: e.weight().as_str(),
                arrows: "to",
            })
            .collect();

        WidgetData { nodes, edges }
    }

    fn page(&self, title: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{VIS_NETWORK_SCRIPT}"></script>
<style>
  body {{ margin: 0; font-family: sans-serif; }}
  #graph {{ width: {width}; height: {height}; border: 1px solid lightgray; }}
  .empty {{ padding: 2em; color: #888; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
            title = escape_html(title),
            width = self.width,
            height = self.height,
        )
    }
}

impl GraphRenderer for WidgetRenderer {
    type Output = WidgetDocument;

    fn render(
        &self,
        g: &KnowledgeGraph,
        classifier: &Classifier,
        ctx: &RenderContext,
    ) -> Result<WidgetDocument, RenderError> {
        if g.is_empty() {
            return Ok(WidgetDocument {
                html: self.page(
                    &ctx.title,
                    r#"<div class="empty">No graph data to display.</div>"#,
                ),
                node_count: 0,
                edge_count: 0,
            });
        }

        let data = serde_json::to_string(&Self::data(g, classifier, ctx))?;
        let body = format!(
            r#"<div id="graph"></div>
<script>
  const data = {data};
  const container = document.getElementById("graph");
  const options = {{
    edges: {{ color: {{ inherit: true }}, smooth: false }},
    interaction: {{ hover: true }},
    physics: {{ solver: "barnesHut", stabilization: {{ iterations: 1000 }} }}
  }};
  new vis.Network(container, {{
    nodes: new vis.DataSet(data.nodes),
    edges: new vis.DataSet(data.edges)
  }}, options);
</script>"#,
            data = escape_script(&data),
        );

        Ok(WidgetDocument {
            html: self.page(&ctx.title, &body),
            node_count: g.node_count(),
            edge_count: g.edge_count(),
        })
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps JSON embedded in a `<script>` element from closing it early.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Triplet, Triplets};
    use crate::style::StyleGraph;

    fn render(t: &Triplets) -> WidgetDocument {
        WidgetRenderer::default()
            .render(
                &KnowledgeGraph::from_triplets(t),
                &Classifier::new(t),
                &RenderContext::new("Knowledge Graph: DrugA", StyleGraph::default()),
            )
            .unwrap()
    }

    #[test]
    fn document_describes_nodes_and_edges() {
        let t = Triplets::new(vec![
            Triplet::new("NCT001", "treats", "DrugA"),
            Triplet::new("DrugA", "has_condition", "CancerX"),
        ]);
        let doc = render(&t);
        assert_eq!(doc.node_count, 3);
        assert_eq!(doc.edge_count, 2);
        assert!(doc.html.contains(r##""id":"NCT001""##));
        assert!(doc.html.contains(r##""color":"#1f77b4""##));
        assert!(doc.html.contains(r#""group":"condition""#));
        assert!(doc.html.contains(r#""title":"has_condition""#));
        assert!(doc.html.contains(r#""arrows":"to""#));
        assert!(doc.html.contains("<title>Knowledge Graph: DrugA</title>"));
    }

    #[test]
    fn empty_graph_gives_message_page() {
        let doc = render(&Triplets::empty());
        assert!(doc.is_empty());
        assert!(doc.html.contains("No graph data to display."));
        assert!(!doc.html.contains("vis.Network"));
    }

    #[test]
    fn script_content_is_escaped() {
        let t = Triplets::new(vec![Triplet::new("</script><b>", "r", "X")]);
        let doc = render(&t);
        assert!(!doc.html.contains("</script><b>"));
        assert!(doc.html.contains("<\\/script><b>"));
    }

    #[test]
    fn title_is_escaped() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
