use flexfringe_wrapper::render::GraphViewer;
use flexfringe_wrapper::runner::{Invocation, MockRunner};
use flexfringe_wrapper::{FittedModel, FlexFringe, Options, OutputKind, Session};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const RESULT: &str = "row nr; abbadingo trace; state sequence; score sequence; sum scores; mean scores; min score\n\
                      0; \"1 5 a b c d e\"; [0,1,2,3,4]; [-0.1,-0.2,-0.3,-0.4,-0.5]; -1.5; -0.3; -0.5\n\
                      1; \"0 2 a a\"; [0,1]; [-0.7,-0.9]; -1.6; -0.8; -0.9\n";

fn append(path: &str, suffix: &str) -> String {
    format!("{}{}", path, suffix)
}

/// Behaves like flexfringe for fits and predictions and like `dot` for
/// rendering
fn fake_toolchain() -> MockRunner {
    MockRunner::new().on_run(|inv: &Invocation| {
        if let Some(pos) = inv.args.iter().position(|a| a == "-o") {
            return std::fs::write(&inv.args[pos + 1], b"image");
        }
        if inv.program.ends_with("xdg-open") {
            return Ok(());
        }
        let trace = &inv.args[0];
        match inv.args.iter().find_map(|a| a.strip_prefix("--aptafile=")) {
            Some(aptafile) => std::fs::write(append(aptafile, ".result"), RESULT),
            None => {
                std::fs::write(append(trace, ".ff.final.dot"), "digraph { 0 -> 1 }")?;
                std::fs::write(append(trace, ".ff.final.json"), "{\"nodes\": []}")
            }
        }
    })
}

fn write_trace(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "2 5\n1 5 a b c d e\n0 2 a a\n").unwrap();
    path
}

#[tokio::test]
async fn fit_predict_show_round() {
    let dir = tempfile::tempdir().unwrap();
    let train = write_trace(dir.path(), "train.dat");
    let test = write_trace(dir.path(), "test.dat");
    let runner = Arc::new(fake_toolchain());
    let ff = FlexFringe::from_parts("flexfringe", runner.clone());

    let model = ff
        .fit(&train, &Options::default().set("state_count", "25"))
        .await
        .unwrap();
    let table = ff.predict(&model, &test, &Options::default()).await.unwrap();

    assert_eq!(table.len(), 2);
    let first = table.row(0).unwrap();
    assert_eq!(first.trace_type, "1");
    assert_eq!(first.trace_length, "5");
    assert_eq!(first.symbols.len(), 5);
    assert_eq!(first.state_sequence.len(), first.score_sequence.len());
    assert_eq!(table.row(1).unwrap().trace, "0 2 a a");

    let viewer = GraphViewer::new(runner.clone())
        .with_viewer("xdg-open", Vec::new())
        .with_delay(Duration::ZERO);
    let image = viewer.show(&model, "svg").await.unwrap();
    assert!(image.to_string_lossy().ends_with(".ff.final.dot.svg"));

    assert_eq!(runner.invocations().len(), 4);
}

#[tokio::test]
async fn all_accessors_succeed_only_when_all_files_exist() {
    let dir = tempfile::tempdir().unwrap();
    let train = write_trace(dir.path(), "train.dat");
    let runner = Arc::new(fake_toolchain());
    let mut session = Session::new(FlexFringe::from_parts("flexfringe", runner));

    session.fit(&train, &Options::default()).await.unwrap();
    assert!(session.result_out().is_err());

    std::fs::write(
        FittedModel::new(&train).expected_path(OutputKind::Result),
        RESULT,
    )
    .unwrap();
    assert!(session.dot_out().is_ok());
    assert!(session.json_out().is_ok());
    assert!(session.result_out().is_ok());
}

#[tokio::test]
async fn model_can_be_located_after_an_earlier_fit() {
    let dir = tempfile::tempdir().unwrap();
    let train = write_trace(dir.path(), "train.dat");
    let runner = Arc::new(fake_toolchain());
    let ff = FlexFringe::from_parts("flexfringe", runner);

    assert!(FittedModel::locate(&train).unwrap_err().is_missing_output());
    let fitted = ff.fit(&train, &Options::default()).await.unwrap();
    assert_eq!(FittedModel::locate(&train).unwrap(), fitted);
}
