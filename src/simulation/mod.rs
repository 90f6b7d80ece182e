pub mod convergence;
pub mod driver;
pub mod history;
pub mod metrics;

pub use convergence::{TOLERANCE, converged};
pub use driver::{RunState, Simulation, SimulationOptions};
pub use history::History;
pub use metrics::{Metric, MetricKind, MetricSeries, Snapshot};
