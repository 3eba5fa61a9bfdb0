//! cloudwiz-std - Standard Step Library
//!
//! Ready-made steps for interactive wizards and the two contracts they rely
//! on: [`Prompter`] (renders a question, returns an answer or a navigation
//! reply) and [`ResourceLister`] (supplies selectable items).

pub mod lister;
pub mod prelude;
pub mod prompt;
pub mod rules;
pub mod steps;
pub mod terminal;

pub use lister::{ResourceLister, StaticLister};
pub use prompt::{Choice, Prompter, Reply};
pub use rules::server_name_rule;
pub use steps::{Check, ConfirmStep, SelectStep, TextStep};
pub use terminal::TerminalPrompter;
