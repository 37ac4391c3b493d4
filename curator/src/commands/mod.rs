// curator/src/commands/mod.rs

pub mod check;
pub mod clean;
pub mod inspect;
pub mod run;

use curator_core::CuratorError;

/// Prints the error with its diagnostic code and help, then exits with status 1.
pub fn fail(err: CuratorError) -> ! {
    match err {
        CuratorError::Domain(e) => eprintln!("{:?}", miette::Report::new(e)),
        CuratorError::Infrastructure(e) => eprintln!("{:?}", miette::Report::new(e)),
        other => eprintln!("❌ {}", other),
    }
    std::process::exit(1);
}
