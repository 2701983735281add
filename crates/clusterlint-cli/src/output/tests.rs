// Tests for report and machine type output
//
// Writers are backed by a shared buffer so the rendered text can be
// inspected after the writer is done with it.

use super::*;
use clusterlint_core::{ErrorList, FieldPath, MachineTypeCatalog};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn failing_report() -> ValidationReport {
    let sg = FieldPath::new(["spec", "additionalSecurityGroups"]);
    let errors: ErrorList = vec![
        ValidationError::duplicate(sg.index(1), "sg-1"),
        ValidationError::forbidden(
            FieldPath::new(["nodes", "spec", "machineType"]),
            "nodes cannot use machineType c5.large with image based on Debian jessie.",
        ),
    ]
    .into();
    ValidationReport::new("nodes.yaml", 1, errors)
}

#[test]
fn test_human_report_lists_every_violation() {
    let formatted = format_report_human(&failing_report(), false);
    assert_eq!(
        formatted,
        "✗ nodes.yaml: 1 document(s), 2 violation(s) (1 duplicate, 0 invalid, 1 forbidden)\n\
         \x20 spec.additionalSecurityGroups[1]: Duplicate value: \"sg-1\"\n\
         \x20 nodes.spec.machineType: Forbidden: nodes cannot use machineType c5.large with image based on Debian jessie.\n"
    );
}

#[test]
fn test_human_clean_report() {
    let report = ValidationReport::new("cluster.yaml", 2, ErrorList::new());
    assert_eq!(
        format_report_human(&report, false),
        "✓ cluster.yaml: 2 document(s), no violations\n"
    );
}

#[test]
fn test_reports_printed_even_when_quiet() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("hidden").unwrap();
    output.reports(&[failing_report()]).unwrap();

    let contents = buffer.contents();
    assert!(!contents.contains("hidden"));
    assert!(contents.contains("Duplicate value"));
}

#[test]
fn test_json_reports_are_an_array() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.reports(&[failing_report()]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["source"], "nodes.yaml");
    assert_eq!(reports[0]["errors"][0]["kind"], "Duplicate");
    assert_eq!(reports[0]["errors"][1]["value"], "");
}

#[test]
fn test_yaml_reports() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.reports(&[failing_report()]).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&buffer.contents()).unwrap();
    assert_eq!(value[0]["errors"][1]["kind"], serde_yaml::Value::from("Forbidden"));
}

#[test]
fn test_messages_suppressed_for_machine_formats() {
    let (mut output, buffer) = writer(OutputFormat::JsonPretty, false);
    output.info("info").unwrap();
    output.success("done").unwrap();
    output.warning("careful").unwrap();
    assert_eq!(buffer.contents(), "");
}

#[test]
fn test_machine_type_table() {
    let catalog = MachineTypeCatalog::aws();
    let types: Vec<MachineTypeInfo> = ["m5.large", "p3.2xlarge"]
        .iter()
        .filter_map(|name| catalog.get(name).cloned())
        .collect();

    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.machine_types(&types).unwrap();

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[1].starts_with("m5.large"));
    assert!(lines[2].starts_with("p3.2xlarge"));
    assert!(lines[2].contains("yes"));
}

#[test]
fn test_machine_types_as_json() {
    let types = vec![MachineTypeCatalog::aws().get("m5.large").cloned().unwrap()];

    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.machine_types(&types).unwrap();

    let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
    assert_eq!(value[0]["name"], "m5.large");
    assert_eq!(value[0]["cores"], 2);
}

#[test]
fn test_no_progress_bar_for_custom_writer() {
    let (output, _) = writer(OutputFormat::Human, false);
    assert!(output.progress_bar(10, "Validating").is_none());
}
