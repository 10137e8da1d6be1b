// Runtime configuration for the cracker

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

/// Configuration for key recovery and decryption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrackerConfig {
    /// Threads used to decrypt a ciphertext sequence
    pub workers: usize,
    /// Give up factoring after this long; None searches without limit
    pub factor_timeout: Option<Duration>,
}

impl Default for CrackerConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            factor_timeout: None,
        }
    }
}

impl CrackerConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_factor_timeout(mut self, timeout: Duration) -> Self {
        self.factor_timeout = Some(timeout);
        self
    }

    /// Parse `--workers N` and `--timeout SECS` from command line arguments
    /// (program name excluded)
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let flag = arg.as_ref().to_string();
            let value = args
                .next()
                .ok_or_else(|| anyhow!("missing value for {}", flag))?;
            let value = value.as_ref();

            match flag.as_str() {
                "--workers" => {
                    let workers = value
                        .parse::<usize>()
                        .with_context(|| format!("invalid worker count {:?}", value))?;
                    config = config.with_workers(workers);
                }
                "--timeout" => {
                    let secs = value
                        .parse::<u64>()
                        .with_context(|| format!("invalid timeout {:?}", value))?;
                    config = config.with_factor_timeout(Duration::from_secs(secs));
                }
                _ => bail!("unknown option {}, expected --workers or --timeout", flag),
            }
        }

        Ok(config)
    }
}
