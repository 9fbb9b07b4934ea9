/*!
 * Process Module
 * Process definitions, input validation and workload loading
 */

pub mod types;
pub mod validation;
pub mod workload;

pub use types::{Process, ProcessSpec, ProcessState, RawProcess};
pub use validation::{parse_process, validate_process, validate_processes};
pub use workload::Workload;
