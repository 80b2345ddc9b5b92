//! Tool framework for concierge
//!
//! Tools are local functions the hosted model may ask to run. Each tool has
//! a name, a description and a parameter schema; the model sees only those,
//! the handler stays here.

pub mod function;
pub mod registry;
pub mod schema;
pub mod tool;

pub use function::{FunctionTool, ToolArgs};
pub use registry::{RegistryError, ToolRegistry};
pub use schema::{Param, ParamKind};
pub use tool::Tool;
