mod test_helpers;

use std::io;
use std::sync::{Arc, Mutex};
use test_helpers::dataset;
use tracing::Level;
use valhook::{MemorySummaryWriter, ValidationConfig, Validator};

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_logged(batches: &[(usize, usize, f32)], step: u64) -> String {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .finish();

    let config = ValidationConfig::builder().prefix("val").show_progress(false).build();
    let mut validator = Validator::new(
        config,
        Box::new(dataset(batches)),
        Arc::new(test_helpers::classifier_graph()),
        Arc::new(MemorySummaryWriter::new()),
    )
    .unwrap();

    tracing::subscriber::with_default(subscriber, || {
        validator.setup().unwrap();
        validator.run_pass(step).unwrap();
    });
    logs.contents()
}

fn line_with<'a>(logs: &'a str, needle: &str) -> &'a str {
    logs.lines()
        .find(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no log line containing {:?} in:\n{}", needle, logs))
}

#[test]
fn test_pass_logs_both_values_to_four_decimals() {
    let logs = run_logged(&[(3, 1, 2.0), (1, 0, 5.0)], 42);

    let cost = line_with(&logs, "val_cost: 2.7500");
    let error = line_with(&logs, "val_error: 0.2500");
    assert!(cost.contains("INFO"));
    assert!(error.contains("INFO"));
    assert!(logs.find("val_cost:").unwrap() < logs.find("val_error:").unwrap());
}

#[test]
fn test_summary_lines_carry_pass_span() {
    let logs = run_logged(&[(2, 1, 1.0)], 7);

    let cost = line_with(&logs, "val_cost: 1.0000");
    assert!(cost.contains("validation_pass"));
    assert!(cost.contains("step=7"));
    assert!(line_with(&logs, "val_error: 0.5000").contains("validation_pass"));
}

#[test]
fn test_empty_dataset_warns_and_logs_nan() {
    let logs = run_logged(&[], 1);

    let warning = line_with(&logs, "reporting NaN");
    assert!(warning.contains("WARN"));
    line_with(&logs, "val_cost: NaN");
    line_with(&logs, "val_error: NaN");
}
