mod assertions;
mod test_app;

pub use assertions::{assert_fuel_not_increasing, assert_state_within_envelope};
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
