//! User interface module - terminal output for the publisher binary.

pub mod formatter;

pub use formatter::{
    display_error, display_outcome, display_planned_operations, display_skip_switch,
    display_status, display_success, outcome_line,
};
