//! Interactive terminal session
//!
//! Drives the Input / History / Results views over any line-based reader
//! and writer. Used when the binary is started without `--web`.

use crate::error::ApiError;
use crate::repositories::HistoryStore;
use crate::services::BmiService;
use anyhow::Result;
use bmi_calculator_shared::validation::{get_field_display_label, parse_gender, VALID_GENDERS};
use bmi_calculator_shared::{history_lines, DisplayPayload, MeasurementForm, NavEvent, View};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const INVALID_INPUT_MESSAGE: &str = "Please enter valid values.";

/// What a view asks the loop to do next
enum Step {
    Quit,
    Stay,
    Go(NavEvent),
}

/// Terminal front-end over a reader and a writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self, store: &mut HistoryStore) -> Result<()> {
        let mut view = View::default();

        loop {
            debug!(route = view.route(), "Showing view");
            let step = match &view {
                View::Input => self.input_view(store)?,
                View::History => self.history_view(store)?,
                View::Results(payload) => self.results_view(payload)?,
            };

            match step {
                Step::Quit => return Ok(()),
                Step::Stay => {}
                Step::Go(event) => view = view.handle(event),
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn field(&mut self, name: &str) -> Result<Option<String>> {
        self.prompt(&format!("{}: ", get_field_display_label(name)))
    }

    fn input_view(&mut self, store: &mut HistoryStore) -> Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "== BMI Calculator ==")?;
        writeln!(self.output, "[c] Calculate  [h] History  [q] Quit")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };

        match choice.to_lowercase().as_str() {
            "c" => self.calculate(store),
            "h" => Ok(Step::Go(NavEvent::ShowHistory)),
            "q" => Ok(Step::Quit),
            other => {
                writeln!(self.output, "Unknown option: {}", other)?;
                Ok(Step::Stay)
            }
        }
    }

    fn calculate(&mut self, store: &mut HistoryStore) -> Result<Step> {
        let Some(weight) = self.field("weight")? else {
            return Ok(Step::Quit);
        };
        let Some(height) = self.field("height")? else {
            return Ok(Step::Quit);
        };
        let Some(age) = self.field("age")? else {
            return Ok(Step::Quit);
        };
        let gender_label = format!(
            "{} ({}): ",
            get_field_display_label("gender"),
            VALID_GENDERS.join("/")
        );
        let Some(gender) = self.prompt(&gender_label)? else {
            return Ok(Step::Quit);
        };

        let outcome = parse_gender(&gender)
            .map_err(ApiError::from)
            .and_then(|gender| {
                let form = MeasurementForm {
                    weight,
                    height,
                    age,
                    gender,
                };
                BmiService::calculate(store, &form, BmiService::now())
            });

        match outcome {
            Ok(payload) => Ok(Step::Go(NavEvent::Computed(payload))),
            Err(ApiError::Validation(e)) => {
                writeln!(self.output, "Error: {} {}", INVALID_INPUT_MESSAGE, e.user_message())?;
                Ok(Step::Stay)
            }
            Err(e) => {
                warn!(error = %e, "Calculation could not be saved");
                writeln!(self.output, "Error: {}", e)?;
                Ok(Step::Stay)
            }
        }
    }

    fn results_view(&mut self, payload: &DisplayPayload) -> Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "== Results ==")?;
        for line in payload.lines() {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "Image: {}", payload.asset.file_name())?;

        match self.prompt("Press Enter to go back ")? {
            Some(_) => Ok(Step::Go(NavEvent::Back)),
            None => Ok(Step::Quit),
        }
    }

    fn history_view(&mut self, store: &mut HistoryStore) -> Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "== History ==")?;
        let lines = history_lines(store.entries());
        if lines.is_empty() {
            writeln!(self.output, "(no entries)")?;
        }
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "[c] Clear history  [b] Back")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };

        match choice.to_lowercase().as_str() {
            "c" => {
                match BmiService::clear_history(store) {
                    Ok(()) => writeln!(self.output, "History cleared.")?,
                    Err(e) => {
                        warn!(error = %e, "History could not be cleared");
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Ok(Step::Stay)
            }
            "b" => Ok(Step::Go(NavEvent::Back)),
            other => {
                writeln!(self.output, "Unknown option: {}", other)?;
                Ok(Step::Stay)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_calculator_shared::{BmiCategory, HISTORY_CAPACITY};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(store: &mut HistoryStore, script: &str) -> String {
        let mut output = Vec::new();
        Console::new(Cursor::new(script.as_bytes()), &mut output)
            .run(store)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_calculate_shows_results_and_history() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open(dir.path().join("h.xml"), HISTORY_CAPACITY);

        let out = run_script(&mut store, "c\n70\n175\n30\nmale\n\nh\nb\nq\n");

        assert!(out.contains("BMI: 22.86"));
        assert!(out.contains("Category: Normal"));
        assert!(out.contains("Ideal weight: 70.46 kg"));
        assert!(out.contains("BMR: 1695.67 kcal/day"));
        assert!(out.contains("Image: normal.png"));
        assert!(out.contains("- BMI: 22.86 - Normal"));
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].category, BmiCategory::Normal);
    }

    #[test]
    fn test_invalid_input_shows_error_and_stays() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open(dir.path().join("h.xml"), HISTORY_CAPACITY);

        let out = run_script(&mut store, "c\nabc\n175\n30\nmale\nq\n");

        assert!(out.contains("Error: Please enter valid values. Weight (kg): must be a number"));
        assert!(!out.contains("== Results =="));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_clear_from_history_view() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open(dir.path().join("h.xml"), HISTORY_CAPACITY);

        let out = run_script(&mut store, "c\n50\n160\n25\nf\n\nh\nc\nb\nq\n");

        assert!(out.contains("BMI: 19.53"));
        assert!(out.contains("History cleared."));
        assert!(out.contains("(no entries)"));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_end_of_input_quits() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open(dir.path().join("h.xml"), HISTORY_CAPACITY);

        let out = run_script(&mut store, "c\n70\n");

        assert!(out.contains("Height (cm): "));
        assert!(store.entries().is_empty());
    }
}
