use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// One account's unit of work: the signing key, the message to send, and
/// the telegraph destination chain. Parsed from a single accounts-file
/// line of the form `private_key:message:dest_chain_id`, split bounded
/// to three parts.
#[derive(Clone)]
pub struct Job {
    /// Hex signing key for this account. Never logged.
    pub private_key: String,
    /// Message body for the telegraph send.
    pub message: String,
    /// LayerZero-style destination chain id for the message.
    pub dest_chain_id: u16,
}

impl FromStr for Job {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.splitn(3, ':');
        let private_key = parts.next().ok_or(InputError::MalformedLine)?;
        let message = parts.next().ok_or(InputError::MalformedLine)?;
        let chain_id = parts.next().ok_or(InputError::MalformedLine)?;
        let dest_chain_id = chain_id
            .trim()
            .parse::<u16>()
            .map_err(|_| InputError::InvalidChainId(chain_id.to_string()))?;
        Ok(Self {
            private_key: private_key.to_string(),
            message: message.to_string(),
            dest_chain_id,
        })
    }
}

// Manual impl so a debug-formatted job can never leak key material into
// the logs.
impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("private_key", &"<redacted>")
            .field("message", &self.message)
            .field("dest_chain_id", &self.dest_chain_id)
            .finish()
    }
}
