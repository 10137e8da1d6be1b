// Console front end for RSACracker
// Reads the mode and key parameters, runs key recovery and decryption, prints results

use std::io::{self, BufRead, Write};
use std::path::Path;

use thiserror::Error;

use crate::config::CrackerConfig;
use crate::rsa::{crack, plain_text, CrackError, DecryptError, Decryptor};
use crate::util::file_ops::{import_numbers, FileError};

/// Key material carried from the secret phase into the decryption phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMaterial {
    pub n: u64,
    pub d: u64,
}

/// State of one console run
#[derive(Debug, Default)]
pub struct Session {
    pub key: Option<KeyMaterial>,
}

/// Errors that abort the current operation
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid input!")]
    InvalidInput,
    #[error("Invalid input!")]
    EndOfInput,
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] DecryptError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Operating modes offered at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SecretKey,
    Decrypt,
    SecretKeyAndDecrypt,
}

impl Mode {
    fn from_option(option: u64) -> Option<Self> {
        match option {
            1 => Some(Mode::SecretKey),
            2 => Some(Mode::Decrypt),
            3 => Some(Mode::SecretKeyAndDecrypt),
            _ => None,
        }
    }
}

/// Interactive console over any line-based input and any output
pub struct App<R, W> {
    input: R,
    output: W,
    config: CrackerConfig,
    session: Session,
    line_rest: String,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(input: R, output: W, config: CrackerConfig) -> Self {
        Self {
            input,
            output,
            config,
            session: Session::default(),
            line_rest: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one session; user-level failures are reported on the output,
    /// only failures of the output itself are returned
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "*** Welcome to RSACracker! *** \n\
             Choose one of the following options: \n\
             1 = get secret key, 2 = decrypt text, 3 = get secret key & decrypt text"
        )?;

        match self.dispatch() {
            Ok(()) => Ok(()),
            Err(PromptError::Io(e)) => Err(e),
            Err(PromptError::File(FileError::IoError(_))) => writeln!(self.output, "File not found!"),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn dispatch(&mut self) -> Result<(), PromptError> {
        let option = self.next_number()?;
        match Mode::from_option(option) {
            Some(Mode::SecretKey) => {
                self.start_secret_calculation()?;
            }
            Some(Mode::Decrypt) => {
                self.read_decryption_key()?;
                self.start_decryption()?;
            }
            Some(Mode::SecretKeyAndDecrypt) => {
                if self.start_secret_calculation()? {
                    self.start_decryption()?;
                }
            }
            None => {
                writeln!(self.output, "Invalid option! Please enter a number between 1 and 3")?;
            }
        }
        Ok(())
    }

    /// Ask for n and e and recover d; returns whether a secret was found
    fn start_secret_calculation(&mut self) -> Result<bool, PromptError> {
        let n = self.prompt_number("Enter n (prime product): ")?;
        let e = self.prompt_number("Enter e (encryption key): ")?;
        writeln!(self.output, "Calculating secret for n = {} and e = {}...", n, e)?;

        match crack(n, e, &self.config) {
            Ok(secret) => {
                writeln!(self.output, "Secret found! ")?;
                writeln!(self.output, "p = {}", secret.p)?;
                writeln!(self.output, "q = {}", secret.q)?;
                writeln!(self.output, "d = {}", secret.d)?;
                self.session.key = Some(KeyMaterial { n, d: secret.d });
                Ok(true)
            }
            Err(CrackError::NotSemiprime(_)) => {
                writeln!(self.output, "n is not a product of 2 primes.")?;
                Ok(false)
            }
            Err(CrackError::NoSecret(e)) => {
                writeln!(self.output, "No secret found for e = {}.", e)?;
                Ok(false)
            }
            Err(CrackError::Timeout(timeout)) => {
                writeln!(self.output, "Factorization timed out after {} seconds.", timeout.as_secs())?;
                Ok(false)
            }
        }
    }

    fn read_decryption_key(&mut self) -> Result<(), PromptError> {
        let n = self.prompt_number("Enter n (prime product): ")?;
        let d = self.prompt_number("Enter d (decryption key): ")?;
        self.session.key = Some(KeyMaterial { n, d });
        Ok(())
    }

    /// Decrypt the numbers of a file with the session key and print the text
    fn start_decryption(&mut self) -> Result<(), PromptError> {
        let KeyMaterial { n, d } = self.session.key.ok_or(PromptError::InvalidInput)?;
        let decryptor = Decryptor::new(n, d)?;

        writeln!(self.output, "Enter file path: ")?;
        self.output.flush()?;
        let path = self.next_path()?;

        let encrypted = import_numbers(Path::new(&path))?;
        let decrypted = decryptor.decrypt_all(&encrypted, self.config.workers);

        writeln!(self.output, "Parsing encrypted numbers from file .... ")?;
        writeln!(self.output, "{:?}\n", encrypted)?;
        writeln!(self.output, "Parsing decrypted numbers from file... ")?;
        writeln!(self.output, "{:?}\n", decrypted)?;

        writeln!(self.output, "Decrypted text: ")?;
        writeln!(self.output, "{}", plain_text(&decrypted))?;
        Ok(())
    }

    fn prompt_number(&mut self, prompt: &str) -> Result<u64, PromptError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.next_number()
    }

    fn next_number(&mut self) -> Result<u64, PromptError> {
        self.next_token()?
            .parse::<u64>()
            .map_err(|_| PromptError::InvalidInput)
    }

    /// Next whitespace-separated token, reading further lines as needed
    fn next_token(&mut self) -> Result<String, PromptError> {
        loop {
            let rest = self.line_rest.trim_start();
            if !rest.is_empty() {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let token = rest[..end].to_string();
                self.line_rest = rest[end..].to_string();
                return Ok(token);
            }
            self.read_line()?;
        }
    }

    /// The rest of the current line, or else the next non-empty line
    fn next_path(&mut self) -> Result<String, PromptError> {
        loop {
            let path = self.line_rest.trim().to_string();
            self.line_rest.clear();
            if !path.is_empty() {
                return Ok(path);
            }
            self.read_line()?;
        }
    }

    fn read_line(&mut self) -> Result<(), PromptError> {
        self.line_rest.clear();
        if self.input.read_line(&mut self.line_rest)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(())
    }
}

/// Run the console on stdin and stdout
pub fn create_app(config: CrackerConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(stdin.lock(), stdout.lock(), config).run()
}
