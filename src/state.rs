use std::time::Instant;

use crate::chart::geometry::max_len;
use crate::chart::{ChartLayout, HoverDebouncer};
use crate::gateway::{OptimizationResult, RunPipeline, SolverParams};
use crate::importer::parse_delimited;
use crate::records::{RecordSlot, RecordStore};

/// The whole application state as one explicit value: record store, solver
/// parameters, the current run lifecycle, and chart hover. Every mutation
/// goes through a transition method, so join/scale/tooltip logic stays
/// testable without any rendering surface.
pub struct AppState {
    pub store: RecordStore,
    pub params: SolverParams,
    run: Option<RunPipeline>,
    hover: Option<usize>,
    layout: ChartLayout,
    debouncer: HoverDebouncer,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            store: RecordStore::default(),
            params: SolverParams::default(),
            run: None,
            hover: None,
            layout: ChartLayout::default(),
            debouncer: HoverDebouncer::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    /// Imports uploaded text into one slot, replacing it wholesale, and
    /// returns the record count ("N records loaded").
    pub fn load_slot(&mut self, slot: RecordSlot, text: &str) -> usize {
        let raw = parse_delimited(text);
        self.store.load(slot, &raw);
        self.store.count(slot)
    }

    pub fn set_params(&mut self, params: SolverParams) {
        self.params = params;
    }

    /// Starts a run if the required record sets are present. A new run
    /// clears the previous results and hover state.
    pub fn begin_run(&mut self) -> Result<(), &'static str> {
        if !self.store.ready_for_run() {
            return Err("Please upload all required data files first!");
        }
        self.run = Some(RunPipeline::Pending);
        self.hover = None;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.run,
            Some(RunPipeline::Pending) | Some(RunPipeline::TraditionalDone(_))
        )
    }

    pub fn finish_run(&mut self, pipeline: RunPipeline) {
        self.run = Some(pipeline);
    }

    /// Both results, once a run has completed. Replaced wholesale by the
    /// next run; there is no history of past runs.
    pub fn results(&self) -> Option<(&OptimizationResult, &OptimizationResult)> {
        self.run.as_ref().and_then(RunPipeline::completed)
    }

    pub fn run_error(&self) -> Option<&str> {
        self.run.as_ref().and_then(RunPipeline::error)
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Applies a pointer movement at pixel position `x`. Moves inside the
    /// debounce interval keep the previous hover index; accepted moves
    /// recompute it over the shared axis of the current results.
    pub fn hover_move(&mut self, x: f64, now: Instant) -> Option<usize> {
        let (traditional, hybrid) = self.results()?;
        let shared_len = max_len(&traditional.history, &hybrid.history);
        if self.debouncer.accept(now) {
            self.hover = Some(self.layout.pointer_index(x, shared_len));
        }
        self.hover
    }

    pub fn hover_leave(&mut self) {
        self.hover = None;
        self.debouncer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::CostPoint;
    use std::time::Duration;

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.load_slot(RecordSlot::Courses, "id,name,instructor_id\nC1,Algebra,I1\n");
        state.load_slot(RecordSlot::Timeslots, "id,day,time\nT1,Sunday,08:00\n");
        state.load_slot(RecordSlot::Rooms, "id,name,capacity\nR1,Hall,30\n");
        state
    }

    fn result(costs: &[f64]) -> OptimizationResult {
        OptimizationResult {
            solution: Vec::new(),
            cost: *costs.last().unwrap(),
            history: costs.iter().map(|&cost| CostPoint { cost }).collect(),
        }
    }

    #[test]
    fn run_requires_the_three_mandatory_uploads() {
        let mut state = AppState::new();
        assert_eq!(
            state.begin_run(),
            Err("Please upload all required data files first!")
        );
        let mut state = loaded_state();
        assert!(state.begin_run().is_ok());
        assert!(state.is_running());
    }

    #[test]
    fn failed_run_leaves_no_results() {
        let mut state = loaded_state();
        state.begin_run().unwrap();
        state.finish_run(RunPipeline::Failed("backend down".into()));
        assert!(!state.is_running());
        assert!(state.results().is_none());
        assert_eq!(state.run_error(), Some("backend down"));
    }

    #[test]
    fn hover_needs_completed_results() {
        let mut state = loaded_state();
        assert_eq!(state.hover_move(400.0, Instant::now()), None);

        state.begin_run().unwrap();
        state.finish_run(RunPipeline::Complete {
            traditional: result(&[100.0, 80.0]),
            hybrid: result(&[120.0, 90.0, 85.0]),
        });
        let index = state.hover_move(800.0, Instant::now());
        assert_eq!(index, Some(2)); // clamped to the right edge of 3 points
        state.hover_leave();
        assert_eq!(state.hover(), None);
    }

    #[test]
    fn rapid_moves_keep_the_previous_hover_index() {
        let mut state = loaded_state();
        state.begin_run().unwrap();
        state.finish_run(RunPipeline::Complete {
            traditional: result(&[100.0, 80.0, 70.0]),
            hybrid: result(&[120.0, 90.0, 85.0]),
        });
        let start = Instant::now();
        let first = state.hover_move(0.0, start);
        assert_eq!(first, Some(0));
        // Inside the debounce window the index stays put even though the
        // pointer jumped to the far edge.
        let second = state.hover_move(800.0, start + Duration::from_millis(5));
        assert_eq!(second, Some(0));
        let third = state.hover_move(800.0, start + Duration::from_millis(60));
        assert_eq!(third, Some(2));
    }

    #[test]
    fn new_run_clears_hover() {
        let mut state = loaded_state();
        state.begin_run().unwrap();
        state.finish_run(RunPipeline::Complete {
            traditional: result(&[100.0]),
            hybrid: result(&[90.0]),
        });
        state.hover_move(400.0, Instant::now());
        assert!(state.hover().is_some());
        state.begin_run().unwrap();
        assert_eq!(state.hover(), None);
        assert!(state.results().is_none());
    }
}
