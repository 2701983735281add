//! Machine type lookup command handler

use crate::cli::MachineTypeArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use clusterlint_core::{MachineTypeCatalog, MachineTypeResolver};
use tracing::{debug, instrument};

/// Handle the machine-type command
///
/// Prints every name that resolves, then fails if any did not.
#[instrument(skip(args, catalog, output), fields(names = args.names.len()))]
pub fn handle_machine_type(
    args: MachineTypeArgs,
    catalog: &MachineTypeCatalog,
    output: &mut OutputWriter,
) -> Result<()> {
    let mut found = Vec::new();
    let mut unknown = Vec::new();

    for name in args.names {
        match catalog.resolve(&name) {
            Ok(info) => found.push(info),
            Err(e) => {
                debug!(machine_type = %name, error = %e, "Lookup failed");
                unknown.push(name);
            }
        }
    }

    if !found.is_empty() {
        output.machine_types(&found)?;
    }

    if unknown.is_empty() {
        return Ok(());
    }

    for name in &unknown {
        output.warning(&format!("{} is not in the machine type catalog", name))?;
    }
    Err(Error::UnknownMachineTypes { names: unknown })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_known_names() {
        let args = MachineTypeArgs {
            names: vec!["m5.large".to_string(), "t2.micro".to_string()],
        };
        assert!(handle_machine_type(args, &MachineTypeCatalog::aws(), &mut sink()).is_ok());
    }

    #[test]
    fn test_unknown_names_are_collected() {
        let args = MachineTypeArgs {
            names: vec![
                "bogus.type".to_string(),
                "m5.large".to_string(),
                "m5.large ".to_string(),
            ],
        };
        match handle_machine_type(args, &MachineTypeCatalog::aws(), &mut sink()) {
            Err(Error::UnknownMachineTypes { names }) => {
                assert_eq!(names, vec!["bogus.type".to_string(), "m5.large ".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
