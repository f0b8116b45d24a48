use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::records::{Course, Instructor, RecordStore, Room, Student, Timeslot};

/// The two solver variants exposed by the optimization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Traditional,
    Hybrid,
}

impl Variant {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Variant::Traditional => "traditional_sa",
            Variant::Hybrid => "hybrid_sa",
        }
    }

    /// Display label used in printed summaries and table headings.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Traditional => "Traditional SA",
            Variant::Hybrid => "Hybrid SA",
        }
    }

    /// Short form used in export filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            Variant::Traditional => "traditional",
            Variant::Hybrid => "hybrid",
        }
    }
}

/// Tunable solver parameters, camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverParams {
    pub max_iterations: u32,
    pub initial_temp: f64,
    pub cooling_rate: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_iterations: 1000,
            initial_temp: 100.0,
            cooling_rate: 0.95,
        }
    }
}

#[derive(Serialize)]
struct SolveRequest<'a> {
    courses: &'a [Course],
    timeslots: &'a [Timeslot],
    rooms: &'a [Room],
    instructors: &'a [Instructor],
    students: &'a [Student],
    params: &'a SolverParams,
}

/// One solution entry: a course bound to a timeslot, room and instructor.
/// All references are by id and may dangle; joins degrade to placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub course: String,
    pub timeslot: String,
    pub room: String,
    pub instructor_id: String,
}

/// One point of the per-iteration cost trace. The service also sends
/// iteration/temp/best fields; only the cost matters here and the rest is
/// ignored on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPoint {
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub solution: Vec<Assignment>,
    pub cost: f64,
    pub history: Vec<CostPoint>,
}

/// Explicit two-step run lifecycle. The transitions encode the failure
/// semantics: a hybrid failure discards the already-completed traditional
/// result, so a run only ever surfaces as both results or neither.
#[derive(Debug, Clone)]
pub enum RunPipeline {
    Pending,
    TraditionalDone(OptimizationResult),
    Complete {
        traditional: OptimizationResult,
        hybrid: OptimizationResult,
    },
    Failed(String),
}

impl RunPipeline {
    pub fn apply_traditional(self, outcome: Result<OptimizationResult, GatewayError>) -> Self {
        match (self, outcome) {
            (RunPipeline::Pending, Ok(result)) => RunPipeline::TraditionalDone(result),
            (RunPipeline::Pending, Err(err)) => RunPipeline::Failed(err.to_string()),
            (other, _) => other,
        }
    }

    pub fn apply_hybrid(self, outcome: Result<OptimizationResult, GatewayError>) -> Self {
        match (self, outcome) {
            (RunPipeline::TraditionalDone(traditional), Ok(hybrid)) => RunPipeline::Complete {
                traditional,
                hybrid,
            },
            // The completed traditional result is dropped here on purpose.
            (RunPipeline::TraditionalDone(_), Err(err)) => RunPipeline::Failed(err.to_string()),
            (other, _) => other,
        }
    }

    pub fn completed(&self) -> Option<(&OptimizationResult, &OptimizationResult)> {
        match self {
            RunPipeline::Complete {
                traditional,
                hybrid,
            } => Some((traditional, hybrid)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RunPipeline::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// HTTP client for the optimization service.
pub struct SolverClient {
    base_url: String,
    http: reqwest::Client,
}

impl SolverClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        SolverClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn backend_error(&self) -> GatewayError {
        GatewayError::Backend {
            base_url: self.base_url.clone(),
        }
    }

    /// Issues one solver call. Every failure mode (connect, non-2xx, bad
    /// body) maps to the same generic error; there is no retry.
    pub async fn run_variant(
        &self,
        variant: Variant,
        store: &RecordStore,
        params: &SolverParams,
    ) -> Result<OptimizationResult, GatewayError> {
        let url = format!("{}/{}", self.base_url, variant.endpoint());
        let request = SolveRequest {
            courses: &store.courses,
            timeslots: &store.timeslots,
            rooms: &store.rooms,
            instructors: &store.instructors,
            students: &store.students,
            params,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|_| self.backend_error())?;

        if !response.status().is_success() {
            return Err(self.backend_error());
        }

        response.json().await.map_err(|_| self.backend_error())
    }
}
