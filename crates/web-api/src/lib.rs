pub mod curve_health;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;
pub mod state;

pub use curve_health::CurveHealthResponse;
pub use error::{ApiError, RequestError};
pub use server::ApiServer;
pub use state::{AppState, Clock};
