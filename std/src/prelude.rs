pub use crate::lister::{ResourceLister, StaticLister};
pub use crate::prompt::{Choice, Prompter, Reply};
pub use crate::rules::{max_len, server_name_rule};
pub use crate::steps::{ConfirmStep, SelectStep, TextStep};
pub use crate::terminal::TerminalPrompter;
