//! Command-line interface: clap command tree, output formatting and the
//! top-level error reporter.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::OutlineError;

/// Print one message for a failed command and exit non-zero.
///
/// Exit code 2 marks input problems (relative or empty scan root), 1
/// everything else.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let exit_code = if err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<OutlineError>())
        .any(OutlineError::is_configuration_error)
    {
        2
    } else {
        1
    };

    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let payload = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": causes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }

    std::process::exit(exit_code)
}
