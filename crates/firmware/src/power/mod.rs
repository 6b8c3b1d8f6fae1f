//! Power sequencing
//!
//! - [`ModuleEnables`] - modem + mic enable lines, switched as a unit
//! - [`PowerCoordinator`] - the power state machine and gesture policy
//! - [`ButtonBinding`] / [`ClickAction`] - what each button does

pub mod binding;
pub mod coordinator;
pub mod modules;

pub use binding::{ButtonBinding, ClickAction};
pub use coordinator::{BindError, PowerCoordinator, MAX_BINDINGS};
pub use modules::{ModuleEnables, ModuleError, ModuleLine, NoLine};
