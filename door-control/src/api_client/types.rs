//! Value types shared between the endpoint client and its callers.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Directional instruction for the door.
///
/// The `Display` form is the literal request body sent to the endpoint.
/// Parsing is case-insensitive so `"up"` and `"DOWN"` are accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    Up,
    Down,
}

impl Command {
    /// Wire form of the command.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
