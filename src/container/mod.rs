// Container invocation — runtime resolution, plan assembly, launch.

pub mod engine;
pub mod plan;
pub mod run;
pub mod types;

pub use engine::locate_runtime;
pub use plan::{compose_binds, display_command, resolve, runtime_args};
pub use run::launch;
pub use types::{HostEnv, LaunchMode, LaunchPlan};
