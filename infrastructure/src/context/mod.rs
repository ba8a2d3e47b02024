//! Cost-data context loading
//!
//! The orchestrator works on pre-fetched, normalized cost data supplied by
//! the caller. On the command line that data comes from a JSON file:
//!
//! ```json
//! {
//!   "total_cost": 12000.0,
//!   "daily_costs": [380.0, 395.0, 410.0],
//!   "top_services": [{"name": "EC2", "cost": 7000.0}],
//!   "resources": [{"id": "i-123", "kind": "vm", "cpu_utilization": 4.0, "monthly_cost": 600.0}]
//! }
//! ```

mod loader;

pub use loader::{ContextLoadError, JsonContextLoader};
