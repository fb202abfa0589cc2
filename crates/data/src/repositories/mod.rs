//! Database repositories for the forward curve store.

pub mod forward_curve_repo;

pub use forward_curve_repo::ForwardCurveRepository;
