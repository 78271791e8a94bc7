pub mod components;
pub mod display;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::display::StatusReport;
    pub use crate::plugins::{CopilotPlugin, TickSet};
    pub use crate::resources::*;
    pub use crate::utils::{RngManager, SimError, SimRng};
}
