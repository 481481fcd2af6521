//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the command line.
//! Structured log output goes through `tracing`; these functions print the
//! human-facing summary.

use crate::store::StoreCall;
use crate::workflow::PublishOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Format the summary line of a publish run.
///
/// Success gets a green checkmark, every skip a status arrow. `NoMatch` is
/// already logged at error level by the workflow, so it is not repeated on stderr.
pub fn outcome_line(outcome: &PublishOutcome) -> String {
    if outcome.is_skip() {
        format!("\x1b[33m→\x1b[0m {}", outcome)
    } else {
        format!("\x1b[32m✓\x1b[0m {}", outcome)
    }
}

/// Display how a publish run ended.
pub fn display_outcome(outcome: &PublishOutcome) {
    println!("{}", outcome_line(outcome));
}

/// Display the message shown when the publish step is switched off.
pub fn display_skip_switch() {
    display_status("The tracker versions are not updated automatically, as the publisher is disabled.");
    display_status("Please update them manually if this is not a test release.");
}

/// Display the tracker mutations a dry run would have sent.
///
/// # Arguments
/// * `planned` - Recorded calls, in the order they would run
pub fn display_planned_operations(planned: &[StoreCall]) {
    if planned.is_empty() {
        display_status("Dry run: no tracker changes would be made");
        return;
    }

    display_status("Dry run mode:");
    for (i, call) in planned.iter().enumerate() {
        display_success(&format!("  Step {}: would {}", i + 1, call));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_a_status_line() {
        let outcome = PublishOutcome::NoMatch {
            project_key: "ABC".to_string(),
            release_version: "9.9.9".to_string(),
        };

        let line = outcome_line(&outcome);
        assert!(line.starts_with("\x1b[33m→"), "got: {}", line);
        assert!(!line.contains("ERROR"), "got: {}", line);
        assert!(line.contains("9.9.9"));
    }

    #[test]
    fn test_skip_is_a_status_line() {
        let outcome = PublishOutcome::PolicySkipped {
            artifact_id: "internal-tools".to_string(),
            prefix: "internal-".to_string(),
        };

        assert!(outcome_line(&outcome).starts_with("\x1b[33m→"));
    }
}
