use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mindmap_rs_layout::config::Config;
use mindmap_rs_layout::document::{
    CrossLink, LayoutMode, MapNode, MindMapDocument, Position,
};
use mindmap_rs_layout::layout::{
    HeuristicMeasurer, apply_theme, compute_layout, connector_layouts,
};
use mindmap_rs_layout::render::render_svg;
use mindmap_rs_layout::theme::{Theme, default_node_style};
use std::hint::black_box;

fn node(id: String, parent: Option<String>, content: String) -> MapNode {
    MapNode {
        id,
        parent_id: parent,
        content,
        note: None,
        position: Position::default(),
        style: default_node_style(),
        is_expanded: None,
        width: None,
        height: None,
    }
}

/// Balanced tree with `fanout` children per node down to `depth` levels.
fn balanced_document(fanout: usize, depth: usize, mode: LayoutMode) -> MindMapDocument {
    let mut nodes = vec![node("n0".to_string(), None, "Central topic".to_string())];
    let mut frontier = vec!["n0".to_string()];
    let mut counter = 1usize;
    for level in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            for child in 0..fanout {
                let id = format!("n{counter}");
                counter += 1;
                nodes.push(node(
                    id.clone(),
                    Some(parent.clone()),
                    format!("Topic {level}.{child} with some label text"),
                ));
                next.push(id);
            }
        }
        frontier = next;
    }

    // Sprinkle cross-links between consecutive leaves.
    let mut connections = Vec::new();
    for pair in frontier.chunks(2) {
        if let [a, b] = pair {
            connections.push(CrossLink {
                id: format!("x-{a}-{b}"),
                source_id: a.clone(),
                target_id: b.clone(),
                label: Some("related".to_string()),
            });
        }
    }

    MindMapDocument {
        id: "bench".to_string(),
        title: "Benchmark".to_string(),
        description: None,
        theme_id: "meister".to_string(),
        layout_mode: mode,
        nodes,
        connections,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn shapes() -> Vec<(&'static str, MindMapDocument)> {
    vec![
        ("tree_wide", balanced_document(8, 2, LayoutMode::Tree)),
        ("tree_deep", balanced_document(2, 7, LayoutMode::Tree)),
        ("orgchart_medium", balanced_document(4, 3, LayoutMode::OrgChart)),
        ("list_long", balanced_document(3, 4, LayoutMode::List)),
    ]
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for (name, doc) in shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| {
                let nodes = compute_layout(
                    black_box(&doc.nodes),
                    doc.layout_mode,
                    &config.layout,
                    &HeuristicMeasurer,
                );
                black_box(nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_connectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectors");
    let config = Config::default();
    for (name, doc) in shapes() {
        let nodes = compute_layout(
            &doc.nodes,
            doc.layout_mode,
            &config.layout,
            &HeuristicMeasurer,
        );
        group.bench_with_input(BenchmarkId::from_parameter(name), &nodes, |b, nodes| {
            b.iter(|| {
                let connectors = connector_layouts(
                    black_box(nodes),
                    &doc.connections,
                    doc.layout_mode,
                    &config.layout,
                );
                black_box(connectors.len());
            });
        });
    }
    group.finish();
}

fn bench_theme(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_theme");
    let theme = Theme::midnight();
    for (name, doc) in shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| {
                let styled = apply_theme(black_box(&doc.nodes), &theme);
                black_box(styled.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    let theme = Theme::meister();
    for (name, doc) in shapes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| {
                let themed = apply_theme(&doc.nodes, &theme);
                let nodes =
                    compute_layout(&themed, doc.layout_mode, &config.layout, &HeuristicMeasurer);
                let connectors =
                    connector_layouts(&nodes, &doc.connections, doc.layout_mode, &config.layout);
                let svg = render_svg(&nodes, &connectors, &theme, &config, &HeuristicMeasurer);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_connectors, bench_theme, bench_end_to_end
);
criterion_main!(benches);
