//! Prompter Implementations

mod interactive;

pub use interactive::DialoguerPrompter;
