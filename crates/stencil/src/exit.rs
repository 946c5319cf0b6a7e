use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Success,
    Error,
}

/// Outcome of a command: a status plus an optional closing message.
#[derive(Debug)]
pub struct Exit {
    status: Status,
    message: Option<String>,
}

impl Exit {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
        }
    }

    #[must_use]
    pub fn error() -> Self {
        Self {
            status: Status::Error,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Print the message (errors always, others unless `quiet`) and convert.
    pub fn report(self, quiet: bool) -> ExitCode {
        match (self.status, self.message) {
            (Status::Error, Some(message)) => eprintln!("{message}"),
            (Status::Success, Some(message)) if !quiet => println!("{message}"),
            _ => {}
        }
        match self.status {
            Status::Success => ExitCode::SUCCESS,
            Status::Error => ExitCode::FAILURE,
        }
    }
}
