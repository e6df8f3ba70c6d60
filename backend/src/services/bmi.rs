//! BMI calculation service
//!
//! The submit flow shared by the HTTP API and the terminal session:
//! parse the form, compute, save to history, present.

use crate::error::ApiError;
use crate::repositories::HistoryStore;
use bmi_calculator_shared::{
    compute_metrics, present, DisplayPayload, HistoryEntry, MeasurementForm,
};
use chrono::{Local, NaiveDateTime};
use tracing::info;

/// BMI service for business logic
pub struct BmiService;

impl BmiService {
    /// Validate and compute a submitted form, then record it in the history.
    ///
    /// Invalid input is rejected before the store is touched. If the
    /// history cannot be written the error is returned and the in-memory
    /// history is left as it was.
    pub fn calculate(
        store: &mut HistoryStore,
        form: &MeasurementForm,
        recorded_at: NaiveDateTime,
    ) -> Result<DisplayPayload, ApiError> {
        let input = form.parse()?;
        let result = compute_metrics(&input);

        store.record(HistoryEntry::new(&input, &result, recorded_at))?;

        info!(
            bmi = result.bmi,
            category = %result.category,
            entries = store.entries().len(),
            "BMI calculated"
        );

        Ok(present(&result))
    }

    /// All stored entries, oldest first
    pub fn history(store: &HistoryStore) -> Vec<HistoryEntry> {
        store.entries().to_vec()
    }

    /// Empty the history
    pub fn clear_history(store: &mut HistoryStore) -> Result<(), ApiError> {
        store.clear()?;
        info!("History cleared");
        Ok(())
    }

    /// Local wall-clock time used to stamp new entries
    pub fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}
