/*
    Buffered messages recorded by the transformations. The algorithms never
    print anything themselves, the caller decides what to show
*/

use std::fmt::Display;

#[derive(Clone, Debug, PartialEq)]
pub enum LogMsg {
    Note(String),
    Warning(String),
}

impl Display for LogMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogMsg::Note(msg) => write!(f, "\x1b[36;49;1mnote:\x1b[0m {}", msg),
            LogMsg::Warning(msg) => write!(f, "\x1b[33;49;1mwarning:\x1b[0m {}", msg),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Log {
    messages: Vec<LogMsg>,
    num_warnings: usize,
}

impl Log {
    pub fn new() -> Self {
        Log::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn add_note<T: Into<String>>(&mut self, msg: T) {
        self.messages.push(LogMsg::Note(msg.into()));
    }

    pub fn add_warning<T: Into<String>>(&mut self, msg: T) {
        self.messages.push(LogMsg::Warning(msg.into()));
        self.num_warnings += 1;
    }

    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    pub fn notes(&self) -> impl Iterator<Item = &String> {
        self.messages.iter().filter_map(|m| if let LogMsg::Note(s) = m { Some(s) } else { None })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &String> {
        self.messages.iter().filter_map(|m| if let LogMsg::Warning(s) = m { Some(s) } else { None })
    }
}
