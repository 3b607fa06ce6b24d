use pp_data::*;
use std::fs;
use std::path::PathBuf;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_drops_header_and_index_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "rmsd.csv", "h1,h2\n1,10\n2,20\n");
    let ds = Dataset::read("rmsd", &path).unwrap();
    assert_eq!(ds.rows(), &[RowValue::Scalar(10.0), RowValue::Scalar(20.0)]);
    assert_eq!(ds.display_name(), "rmsd");
    assert_eq!(ds.source_path(), path.as_path());
}

#[test]
fn tsv_with_several_columns_gives_tuples() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "angles.tsv", "frame\tphi\tpsi\n0\t-60.5\t-45\n1\t-70\t140.25\n");
    let ds = Dataset::read("angles", &path).unwrap();
    assert_eq!(
        ds.rows(),
        &[
            RowValue::Tuple(vec![-60.5, -45.0]),
            RowValue::Tuple(vec![-70.0, 140.25]),
        ]
    );
}

#[test]
fn dat_tolerates_variable_spacing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "energy.dat",
        "#Frame      Energy\n       1     -12.5\n   2   3.\n\n       3\n  4      7      8\n",
    );
    let ds = Dataset::read("energy", &path).unwrap();
    assert_eq!(
        ds.rows(),
        &[
            RowValue::Scalar(-12.5),
            RowValue::Scalar(3.0),
            RowValue::Tuple(vec![7.0, 8.0]),
        ]
    );
}

#[test]
fn non_numeric_cell_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.csv", "a,b\n1,2\n2,oops\n");
    let err = Dataset::read("bad", &path).unwrap_err();
    match err {
        DataError::Parse { line, cell, .. } => {
            assert_eq!(line, 3);
            assert_eq!(cell, "oops");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_extension_is_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "data.xvg", "1 2\n");
    assert!(matches!(
        Dataset::read("x", &path),
        Err(DataError::UnsupportedFormat { .. })
    ));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Dataset::read("x", dir.path().join("absent.csv")),
        Err(DataError::NotFound { .. })
    ));
}

#[test]
fn failed_populate_keeps_previous_rows() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(&dir, "good.csv", "i,v\n0,1\n");
    let mut ds = Dataset::read("ds", &good).unwrap();
    fs::write(&good, "i,v\n0,nope\n").unwrap();
    assert!(ds.populate().is_err());
    assert_eq!(ds.rows(), &[RowValue::Scalar(1.0)]);
}

#[test]
fn files_of_different_length_align_by_row() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.csv", "i,v\n0,1\n1,2\n2,3\n");
    let b = write(&dir, "b.dat", "header\n0 5\n");

    let transform = AxisTransform {
        x_scale: 2.0,
        x_offset: 1.0,
        ..Default::default()
    };
    let mut builder = DatasetFrameBuilder::new(transform);
    builder.push(Dataset::read("a", a).unwrap());
    builder.push(Dataset::read("b", b).unwrap());
    let table = builder.build().unwrap();

    assert_eq!(table.len(), 6);
    assert_eq!(table.index_bounds(), Some((1.0, 2.0)));
    assert_eq!(table.points("b").count(), 1);
    let a_index: Vec<f64> = table.points("a").map(|(i, _)| i).collect();
    assert_eq!(a_index, vec![1.0, 1.5, 2.0]);
}
