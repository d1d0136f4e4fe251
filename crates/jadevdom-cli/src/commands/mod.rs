pub mod check;
pub mod compile;
pub mod loader;
pub mod render;


/// Print a failure to stderr and exit with status 1.
fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1)
}
