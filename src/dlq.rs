use std::cell::RefCell;

use crate::domain::{Command, DeadLetterQueue, Error};

#[derive(Default, Debug)]
pub struct StdErrDLQ {}

impl DeadLetterQueue for StdErrDLQ {
    fn report(&self, command: Option<&Command>, error: &Error) {
        match command {
            Some(command) => eprintln!("DLQ Report - {}: {}", command, error),
            None => eprintln!("DLQ Report - Error: {}", error),
        }
    }
}

/// Keeps reports in memory, formatted the same way as [`StdErrDLQ`].
#[derive(Default, Debug)]
pub struct MemoryDLQ {
    reports: RefCell<Vec<String>>,
}

impl MemoryDLQ {
    pub fn reports(&self) -> Vec<String> {
        self.reports.borrow().clone()
    }
}

impl DeadLetterQueue for MemoryDLQ {
    fn report(&self, command: Option<&Command>, error: &Error) {
        let line = match command {
            Some(command) => format!("{}: {}", command, error),
            None => format!("Error: {}", error),
        };
        self.reports.borrow_mut().push(line);
    }
}
