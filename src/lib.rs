//! # terncalc
//!
//! A calculator whose numbers are typed and displayed in base 3.
//!
//! The engine takes one keypad input at a time, keeps the expression valid
//! as it grows, evaluates it with the usual precedence rules, and reports
//! after every input which buttons are usable and why the others are not.

pub mod ternary;
pub mod calc;
pub mod config;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use ternary::{Digit, TernaryBuf, format as format_ternary, parse as parse_ternary};
pub use calc::{Calculator, CalcError, EnabledVector, EngineState, InputAction, Op, Token};
pub use config::{EngineConfig, ConfigError};

#[cfg(feature = "tui")]
pub use tui::run_keypad;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=terncalc=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
