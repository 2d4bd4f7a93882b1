mod io;
mod rules;

pub use io::IoError;
pub use rules::RulesError;
