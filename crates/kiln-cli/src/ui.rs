//! Status lines on stderr.

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide once whether status lines are colored.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_colors(), Ordering::Relaxed);
}

/// Silence status lines. Errors still reach stderr through miette.
pub fn init_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

fn colors() -> bool {
    COLORS.load(Ordering::Relaxed)
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn success(message: &str) {
    if quiet() {
        return;
    }
    if colors() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

pub fn info(message: &str) {
    if quiet() {
        return;
    }
    if colors() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

pub fn warning(message: &str) {
    if quiet() {
        return;
    }
    if colors() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
