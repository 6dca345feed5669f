//! Terminal output helpers
//!
//! Uses `cliclack` styling on interactive terminals and falls back to
//! plain bracketed prefixes when output is piped or running in CI.

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, step_error_detail, step_info, step_ok, step_ok_detail,
    step_warn_hint,
};
