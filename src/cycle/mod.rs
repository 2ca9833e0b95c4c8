//! Development-cycle layer - coordinator state machine, branch naming,
//! and pull-request parameter generation

pub mod branch;
pub mod coordinator;
pub mod pr_params;

pub use branch::{derive_branch_name, sanitize_branch_name};
pub use coordinator::{Coordinator, CoordinatorConfig, CycleResult, CycleState};
pub use pr_params::{PrParams, generate_pr_params};
