mod copilot;

pub use copilot::{CopilotPlugin, TickSet};
