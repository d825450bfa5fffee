use std::path::{Path, PathBuf};
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Where an error came from. Line 0 stands for the whole source, which is
// what command line arguments and whole-grammar failures report
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn whole(file: &Path) -> Self {
        Location {
            file: file.to_path_buf(),
            line: 0
        }
    }

    pub fn at_line(file: &Path, line: usize) -> Self {
        Location {
            file: file.to_path_buf(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn new(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
