use clap::Parser;

use coalescence::panic::install_panic_hook;
use coalescence::shell;

/// Proves a propositional formula true by coalescing tokens on an
/// n-dimensional Petri net built over its subformula indices.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The formula to prove, e.g. "a | ~a" or "(a & b) | ~a"
    formula: String,

    /// Replace proven subformulas with a fresh variable before continuing
    #[arg(short, long)]
    top_optimise: bool,

    /// Render formulas and substitution lines with LaTeX operators
    #[arg(short, long)]
    latex: bool,

    /// Enable debug/trace logging (equivalent to RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    install_panic_hook();
    let cli = Cli::parse();

    if cli.verbose {
        simple_logger::init_with_level(log::Level::Debug).expect("logger already initialised");
    } else if std::env::var_os("RUST_LOG").is_some() {
        simple_logger::init().expect("logger already initialised");
    }

    let code = shell::main(&cli.formula, cli.top_optimise, cli.latex);
    // POSIX truncates exit codes to 0-255; mirrors the C source's
    // `return r.n > 0 ? r.n : -1;`.
    std::process::exit(code);
}
