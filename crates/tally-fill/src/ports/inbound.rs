//! Inbound Ports (Driving Ports / API)

use crate::application::cancel::CancelToken;
use crate::application::report::RunReport;
use crate::domain::errors::PropagationError;
use crate::domain::value_objects::Index;

/// Primary gap filling API
pub trait GapFillApi {
    /// Fill every value reachable from `index`.
    ///
    /// This is the main entry point. It:
    /// 1. Seeds the four derivation roles around `index` for every span
    /// 2. Drains the work queue, scheduling follow-ups after each derivation
    /// 3. Returns the run report, or every task failure with the report attached
    fn run(&mut self, index: Index) -> Result<RunReport, PropagationError>;

    /// Same as [`GapFillApi::run`], stopping before the next task once `cancel` fires.
    ///
    /// Values derived before the stop stay written.
    fn run_until(
        &mut self,
        index: Index,
        cancel: &CancelToken,
    ) -> Result<RunReport, PropagationError>;
}
