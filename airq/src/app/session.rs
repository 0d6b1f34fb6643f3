use super::{DashboardContext, DashboardError, PredictionForm};
use airq_core::model::Region;
use std::io::{BufRead, Write};
use std::path::Path;

const HELP: &str = "commands:
  predict region=<label>; country=<name>; city=<name>; pm10=<value>; no2=<value>; year=<value>
      omitted fields other than region use the configured defaults
  upload <path>   summarize a .csv or spreadsheet file
  regions         list WHO region labels
  help            show this message
  quit            end the session";

/// one line of session input
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Predict(String),
    Upload(String),
    Regions,
    Help,
    Quit,
}

impl TryFrom<&str> for SessionCommand {
    type Error = DashboardError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let (command, rest) = match line.trim().split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line.trim(), ""),
        };
        match command {
            "predict" => Ok(SessionCommand::Predict(rest.to_string())),
            "upload" if !rest.is_empty() => Ok(SessionCommand::Upload(rest.to_string())),
            "upload" => Err(DashboardError::InputError(String::from(
                "upload requires a file path",
            ))),
            "regions" => Ok(SessionCommand::Regions),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(DashboardError::InputError(format!(
                "unknown command '{other}', type 'help' for a list of commands"
            ))),
        }
    }
}

/// writes the canonical WHO region labels with their encoded values
pub fn write_regions<W: Write>(output: &mut W) -> std::io::Result<()> {
    for region in Region::ALL {
        writeln!(output, "{}  {}", region.code(), region.label())?;
    }
    Ok(())
}

fn write_error<W: Write>(output: &mut W, error: &DashboardError) -> std::io::Result<()> {
    writeln!(output, "error [{}]: {error}", error.code())
}

/// interactive loop over line commands. every failure is written inline and
/// the loop continues with the next line; only `quit` or the end of input
/// ends the session.
///
/// # Arguments
///
/// * `ctx`    - context loaded at startup
/// * `input`  - command lines
/// * `output` - where results and errors are written
pub fn run_session<R: BufRead, W: Write>(
    ctx: &DashboardContext,
    input: R,
    mut output: W,
) -> Result<(), DashboardError> {
    writeln!(output, "Air Quality Prediction Dashboard, type 'help' for commands")?;
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }
        match SessionCommand::try_from(line.as_str()) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => writeln!(output, "{HELP}")?,
            Ok(SessionCommand::Regions) => write_regions(&mut output)?,
            Ok(SessionCommand::Predict(fields)) => {
                match PredictionForm::parse_fields(&fields) {
                    Ok(form) => match ctx.predict(&form) {
                        Ok(report) => write!(output, "{report}")?,
                        Err(e) => {
                            write_error(&mut output, &e)?;
                            let charts = ctx.unpredicted_input_charts(&form);
                            ctx.render_charts(&charts);
                        }
                    },
                    Err(e) => write_error(&mut output, &e)?,
                }
            }
            Ok(SessionCommand::Upload(path)) => match ctx.analyze(Path::new(&path)) {
                Ok(report) => write!(output, "{report}")?,
                Err(e) => write_error(&mut output, &e)?,
            },
            Err(e) => write_error(&mut output, &e)?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}
