pub(crate) mod health;
pub mod solve;

use crate::error::SolverError;

pub use health::health_check;
pub use solve::solve;

pub async fn not_found() -> SolverError {
    SolverError::NotFound("No such route".to_string())
}

pub async fn method_not_allowed() -> SolverError {
    SolverError::MethodNotAllowed("Method not supported on this route".to_string())
}
