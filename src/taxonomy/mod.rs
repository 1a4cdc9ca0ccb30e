//! Static, process-wide taxonomy tables.

pub mod concern;
pub mod framework;
pub mod tool_type;

pub use concern::{concern, concern_name, concerns, Concern, CONCERNS};
pub use framework::{area_groups, framework, AreaGroup, Framework, FRAMEWORKS};
pub use tool_type::{key_need_frameworks, tool_type, tool_type_name, ToolType, TOOL_TYPES};
