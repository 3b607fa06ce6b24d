use pp_data::{AxisTransform, Dataset, DatasetFrameBuilder, RowValue};
use pp_preset::{AxisNode, FigureNode, Preset, PresetKind, SubplotNode, Value};
use pp_render::{AxisPanel, FrameRequest, PlottersRenderer, Renderer, SubfigurePanel};

fn preset(kind: PresetKind, fields: &[(&str, Value)]) -> Preset {
    let mut p = Preset::new(kind);
    for (name, value) in fields {
        p.set(name, value.clone()).unwrap();
    }
    p
}

#[test]
#[ignore = "text layout needs a system sans-serif font"]
fn line_and_phase_plots_render_to_svg() {
    let figure = preset(
        PresetKind::Figure,
        &[
            ("name", Value::text("wide")),
            ("rows", Value::Int(1)),
            ("cols", Value::Int(1)),
            ("width", Value::Int(800)),
            ("height", Value::Int(400)),
        ],
    );
    let subplot = preset(
        PresetKind::Subplot,
        &[
            ("name", Value::text("pair")),
            ("rows", Value::Int(1)),
            ("cols", Value::Int(2)),
        ],
    );
    let line = preset(
        PresetKind::Axis,
        &[
            ("name", Value::text("rmsd")),
            ("type", Value::text("line")),
            ("numPlots", Value::Int(1)),
        ],
    );
    let rama = preset(
        PresetKind::Axis,
        &[
            ("name", Value::text("phi-psi")),
            ("type", Value::text("Ramachandran")),
            ("numPlots", Value::Int(1)),
            ("startNs", Value::Int(0)),
            ("endNs", Value::Int(1)),
        ],
    );

    let mut tree = FigureNode::new(figure);
    tree.subplots.push(SubplotNode {
        preset: subplot,
        axes: vec![AxisNode { preset: line }, AxisNode { preset: rama }],
    });
    let resolved = tree.resolve().unwrap();

    let mut lines = DatasetFrameBuilder::new(AxisTransform::default());
    lines.push(Dataset::from_rows(
        "rmsd",
        vec![RowValue::Scalar(0.1), RowValue::Scalar(0.4), RowValue::Scalar(0.3)],
    ));
    let line_table = lines.build().unwrap();
    let mut angles = DatasetFrameBuilder::new(AxisTransform::default());
    angles.push(Dataset::from_rows(
        "res 12",
        vec![RowValue::Tuple(vec![-60.0, -45.0]), RowValue::Tuple(vec![-120.0, 130.0])],
    ));
    let angle_table = angles.build().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("frame_0.svg");
    let sub = &resolved.subfigures[0];
    let request = FrameRequest {
        output: output.clone(),
        frame: 0,
        title: "Run 0".to_string(),
        layout: &resolved.layout,
        subfigures: vec![SubfigurePanel {
            title: "Backbone".to_string(),
            layout: &sub.layout,
            axes: vec![
                AxisPanel {
                    title: "RMSD".to_string(),
                    settings: &sub.axes[0],
                    table: &line_table,
                },
                AxisPanel {
                    title: "Angles".to_string(),
                    settings: &sub.axes[1],
                    table: &angle_table,
                },
            ],
        }],
    };

    PlottersRenderer::new().render_frame(&request).unwrap();
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Run 0"));
}

fn table(name: &str, rows: Vec<RowValue>) -> pp_data::LongTable {
    let mut builder = DatasetFrameBuilder::new(AxisTransform::default());
    builder.push(Dataset::from_rows(name, rows));
    builder.build().unwrap()
}

fn axis(name: &str, plot_type: &str, extra: &[(&str, Value)]) -> AxisNode {
    let mut p = preset(
        PresetKind::Axis,
        &[
            ("name", Value::text(name)),
            ("type", Value::text(plot_type)),
            ("numPlots", Value::Int(1)),
        ],
    );
    for (field, value) in extra {
        p.set(field, value.clone()).unwrap();
    }
    AxisNode { preset: p }
}

#[test]
fn every_plot_type_draws_without_text() {
    let figure = preset(
        PresetKind::Figure,
        &[
            ("name", Value::text("grid")),
            ("width", Value::Int(800)),
            ("height", Value::Int(600)),
        ],
    );
    let subplot = preset(
        PresetKind::Subplot,
        &[
            ("name", Value::text("quad")),
            ("rows", Value::Int(2)),
            ("cols", Value::Int(2)),
        ],
    );
    let mut tree = FigureNode::new(figure);
    tree.subplots.push(SubplotNode {
        preset: subplot,
        axes: vec![
            axis("energy", "line", &[]),
            axis("rg", "scatter", &[]),
            axis("phi-psi", "Ramachandran", &[("startNs", Value::Int(0)), ("endNs", Value::Int(1))]),
            axis("bar", "gradient", &[]),
        ],
    });
    let resolved = tree.resolve().unwrap();

    let mut lines = DatasetFrameBuilder::new(AxisTransform::default());
    lines.push(Dataset::from_rows(
        "potential",
        vec![RowValue::Scalar(1.0), RowValue::Scalar(3.0), RowValue::Scalar(2.0)],
    ));
    lines.push(Dataset::from_rows(
        "kinetic",
        vec![RowValue::Scalar(0.5), RowValue::Scalar(0.7), RowValue::Scalar(0.6)],
    ));
    let line_table = lines.build().unwrap();
    let scatter_table = table(
        "rg",
        vec![RowValue::Scalar(5.0), RowValue::Scalar(7.0), RowValue::Scalar(6.0)],
    );
    let angle_table = table(
        "res 12",
        vec![RowValue::Tuple(vec![-60.0, -45.0]), RowValue::Tuple(vec![-120.0, 130.0])],
    );
    let empty = pp_data::LongTable::default();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("plain.svg");
    let sub = &resolved.subfigures[0];
    let tables = [&line_table, &scatter_table, &angle_table, &empty];
    let request = FrameRequest {
        output: output.clone(),
        frame: 0,
        title: "Not drawn".to_string(),
        layout: &resolved.layout,
        subfigures: vec![SubfigurePanel {
            title: "Also not drawn".to_string(),
            layout: &sub.layout,
            axes: sub
                .axes
                .iter()
                .zip(tables)
                .map(|(settings, table)| AxisPanel {
                    title: settings.name.clone(),
                    settings,
                    table,
                })
                .collect(),
        }],
    };

    PlottersRenderer::without_text().render_frame(&request).unwrap();

    assert!(output.exists());
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(!svg.contains("<text"));
    // One polyline per line series.
    assert_eq!(svg.matches("<polyline").count(), 2);
    // Three scatter points plus two phase-plot points.
    assert_eq!(svg.matches("<circle").count(), 5);
    // Background plus the colour bar.
    assert!(svg.matches("<rect").count() > 200);
}
