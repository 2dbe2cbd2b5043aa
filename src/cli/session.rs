use log::{debug, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::auth::AuthService;
use crate::cli::menu::{MENU, MenuOption};
use crate::error::{AppError, AuthError, handlers::user_message};

/// One line of user input.
enum Input {
    Line(String),
    TooLong,
    Eof,
}

/// Drives the register/login menu over any line-based reader and writer.
///
/// - Reads and trims one line per prompt.
/// - Hands hashing and verification to the blocking thread pool.
/// - Ends on the Exit option or end of input.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    service: Arc<AuthService>,
    max_input_length: usize,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, service: Arc<AuthService>, max_input_length: usize) -> Self {
        Self {
            reader,
            writer,
            service,
            max_input_length,
        }
    }

    /// Consumes the session and returns the writer, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub async fn run(&mut self) -> Result<(), AppError> {
        loop {
            self.write(MENU).await?;
            self.write("Choose an option: ").await?;

            let option = match self.read_input().await? {
                Input::Line(line) => MenuOption::parse(&line),
                Input::TooLong => {
                    self.write("Input too long\n").await?;
                    continue;
                }
                Input::Eof => break,
            };

            match option {
                MenuOption::Register | MenuOption::Login => {
                    if !self.handle_credentials(option).await? {
                        break;
                    }
                }
                MenuOption::Exit => {
                    self.write("Exiting...\n").await?;
                    return Ok(());
                }
                MenuOption::Invalid => {
                    self.write("Invalid option. Please try again.\n").await?;
                }
            }
        }

        info!("Input closed, ending session");
        Ok(())
    }

    /// Prompts for a username and password and runs the selected operation.
    ///
    /// Returns `false` when input ended before both values were read.
    async fn handle_credentials(&mut self, option: MenuOption) -> Result<bool, AppError> {
        self.write("Enter username: ").await?;
        let username = match self.read_input().await? {
            Input::Line(line) => line,
            Input::TooLong => {
                self.write("Input too long\n").await?;
                return Ok(true);
            }
            Input::Eof => return Ok(false),
        };

        self.write("Enter password: ").await?;
        let password = match self.read_input().await? {
            Input::Line(line) => line,
            Input::TooLong => {
                self.write("Input too long\n").await?;
                return Ok(true);
            }
            Input::Eof => return Ok(false),
        };

        let outcome = self.dispatch(option, username.clone(), password).await?;
        let message = match (option, outcome) {
            (MenuOption::Register, Ok(())) => {
                info!("Registered user {:?}", username);
                "Registration successful".to_string()
            }
            (_, Ok(())) => {
                info!("User {:?} logged in", username);
                "Login successful".to_string()
            }
            (_, Err(e)) => {
                if e.is_recoverable() {
                    warn!("{:?} failed: {}", option, e);
                } else {
                    warn!("{:?} hit an internal failure: {}", option, e);
                }
                user_message(&e)
            }
        };

        self.write(&format!("{}\n", message)).await?;
        Ok(true)
    }

    async fn dispatch(
        &self,
        option: MenuOption,
        username: String,
        password: String,
    ) -> Result<Result<(), AuthError>, AppError> {
        let service = Arc::clone(&self.service);
        let outcome = tokio::task::spawn_blocking(move || match option {
            MenuOption::Register => service.register(&username, &password),
            _ => service.login(&username, &password),
        })
        .await?;
        Ok(outcome)
    }

    async fn read_input(&mut self) -> Result<Input, AppError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(Input::Eof);
        }

        if line.len() > self.max_input_length {
            debug!("Rejected input line of {} bytes", line.len());
            return Ok(Input::TooLong);
        }

        Ok(Input::Line(line.trim().to_string()))
    }

    async fn write(&mut self, text: &str) -> Result<(), AppError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
