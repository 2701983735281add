//! Validation command handler and related utilities

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use clusterlint_core::{load_manifest_file, AwsValidator, MachineTypeResolver, ValidationReport};
use std::path::Path;
use tracing::{info, instrument};

/// Handle the validate command
///
/// Every file is validated before anything is printed. A missing or
/// unparsable file aborts the run after printing the reports of the files
/// before it; violations are reported and then turned into
/// [`Error::ValidationFailed`].
#[instrument(skip(args, validator, output), fields(files = args.files.len()))]
pub fn handle_validate<R: MachineTypeResolver>(
    args: ValidateArgs,
    validator: &AwsValidator<R>,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::new("validate_command");
    output.info(&format!("Validating {} manifest file(s)", args.files.len()))?;
    let progress = output.progress_bar(args.files.len() as u64, "Validating manifests");

    let mut reports = Vec::with_capacity(args.files.len());
    let mut aborted = None;
    for path in &args.files {
        let report = if path.exists() {
            validate_file(path, validator)
        } else {
            Err(Error::FileNotFound { path: path.clone() })
        };

        match report {
            Ok(report) => reports.push(report),
            Err(e) => {
                aborted = Some(e);
                break;
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Some(e) = aborted {
        if !reports.is_empty() {
            output.reports(&reports)?;
        }
        return Err(e);
    }

    output.reports(&reports)?;

    let count: usize = reports.iter().map(|r| r.errors.len()).sum();
    let failed = reports.iter().filter(|r| !r.is_clean()).count();
    info!(
        files = reports.len(),
        failed,
        violations = count,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Validation finished"
    );

    if count == 0 {
        output.success(&format!("All {} file(s) passed validation", reports.len()))?;
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            count,
            files: failed,
        })
    }
}

/// Load one manifest file and validate every document in it
pub fn validate_file<R: MachineTypeResolver>(
    path: &Path,
    validator: &AwsValidator<R>,
) -> Result<ValidationReport> {
    let _timer = Timer::with_details("validate_file", &path.display().to_string());

    let documents = load_manifest_file(path)?;
    let errors = validator.validate_documents(&documents);
    info!(
        file = %path.display(),
        documents = documents.len(),
        violations = errors.len(),
        "Validated manifest"
    );

    Ok(ValidationReport::new(
        path.display().to_string(),
        documents.len(),
        errors,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use clusterlint_core::FixedResolver;
    use std::cell::RefCell;
    use std::io::Write;
    use std::path::PathBuf;
    use std::rc::Rc;

    const BAD_GROUP: &str = "kind: InstanceGroup\nmetadata:\n  name: nodes\nspec:\n  machineType: m5.large\n  additionalSecurityGroups: [sg-1, sg-1]\n";
    const GOOD_GROUP: &str = "kind: InstanceGroup\nmetadata:\n  name: nodes\nspec:\n  machineType: m5.large\n";

    fn manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn validator() -> AwsValidator<FixedResolver> {
        AwsValidator::new(FixedResolver::new(["m5.large"]))
    }

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(std::io::sink()))
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_validate_file_report() {
        let file = manifest(BAD_GROUP);
        let report = validate_file(file.path(), &validator()).unwrap();
        assert_eq!(report.documents, 1);
        assert_eq!(report.counts(), (1, 0, 0));
    }

    #[test]
    fn test_clean_files_succeed() {
        let file = manifest(GOOD_GROUP);
        let args = ValidateArgs {
            files: vec![file.path().to_path_buf()],
        };
        assert!(handle_validate(args, &validator(), &mut sink()).is_ok());
    }

    #[test]
    fn test_violations_fail_with_counts() {
        let bad = manifest(BAD_GROUP);
        let good = manifest(GOOD_GROUP);
        let args = ValidateArgs {
            files: vec![bad.path().to_path_buf(), good.path().to_path_buf()],
        };

        let err = handle_validate(args, &validator(), &mut sink()).unwrap_err();
        assert!(matches!(err, Error::ValidationFailed { count: 1, files: 1 }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            files: vec![PathBuf::from("/nonexistent/nodes.yaml")],
        };
        let err = handle_validate(args, &validator(), &mut sink()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_unsupported_kind_is_core_error() {
        let file = manifest("kind: Secret\nmetadata:\n  name: x\n");
        let err = validate_file(file.path(), &validator()).unwrap_err();
        assert!(matches!(err, Error::Core(clusterlint_core::Error::Manifest { .. })));
    }

    #[test]
    fn test_reports_before_a_broken_file_are_printed() {
        let bad = manifest(BAD_GROUP);
        let broken = manifest("kind: Secret\nmetadata:\n  name: x\n");
        let args = ValidateArgs {
            files: vec![bad.path().to_path_buf(), broken.path().to_path_buf()],
        };

        let buffer = SharedBuffer::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
        let err = handle_validate(args, &validator(), &mut output).unwrap_err();
        assert!(matches!(err, Error::Core(clusterlint_core::Error::Manifest { .. })));

        let printed = String::from_utf8(buffer.0.borrow().clone()).unwrap();
        assert!(printed.contains(r#"spec.additionalSecurityGroups[1]: Duplicate value: "sg-1""#));
    }

    #[test]
    fn test_missing_later_file_keeps_earlier_reports() {
        let bad = manifest(BAD_GROUP);
        let args = ValidateArgs {
            files: vec![bad.path().to_path_buf(), PathBuf::from("/nonexistent/nodes.yaml")],
        };

        let buffer = SharedBuffer::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(buffer.clone()));
        let err = handle_validate(args, &validator(), &mut output).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let printed: serde_json::Value =
            serde_json::from_slice(&buffer.0.borrow()).unwrap();
        assert_eq!(printed.as_array().map(Vec::len), Some(1));
    }
}
