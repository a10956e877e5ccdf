use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The user declined the request.
    #[error("rejected by user")]
    Rejected,

    /// No wallet is connected or it could not be reached.
    #[error("signer unavailable: {0}")]
    Unavailable(String),
}

// ── Signer capability ───────────────────────────────────────────────

/// Whatever can confirm and sign on the user's behalf: a browser wallet
/// behind the API, a terminal prompt, or a canned answer in tests.
///
/// Payloads are opaque; no wallet protocol is assumed beyond these calls.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Base58 public key of the signing account.
    fn public_key(&self) -> String;

    /// Ask the user to approve a human-readable message.
    async fn sign_message(&self, message: &[u8]) -> Result<(), SignerError>;

    /// Sign an opaque transaction payload and submit it; returns the signature.
    async fn sign_and_submit(&self, payload: &[u8]) -> Result<String, SignerError>;
}

/// Always answers the same way. Used by `--yes`, the HTTP simulate endpoint
/// and tests.
#[derive(Debug, Clone)]
pub struct StaticSigner {
    public_key: String,
    approve: bool,
}

impl StaticSigner {
    pub fn approving(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            approve: true,
        }
    }

    pub fn rejecting(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            approve: false,
        }
    }
}

#[async_trait]
impl Signer for StaticSigner {
    fn public_key(&self) -> String {
        self.public_key.clone()
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<(), SignerError> {
        if self.approve { Ok(()) } else { Err(SignerError::Rejected) }
    }

    async fn sign_and_submit(&self, payload: &[u8]) -> Result<String, SignerError> {
        if !self.approve {
            return Err(SignerError::Rejected);
        }
        Ok(format!("static_{}_{}", payload.len(), chrono::Utc::now().timestamp_millis()))
    }
}

/// Asks on the terminal before approving. Cannot submit real transactions.
#[derive(Debug, Clone)]
pub struct PromptSigner {
    public_key: String,
}

impl PromptSigner {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }
}

#[async_trait]
impl Signer for PromptSigner {
    fn public_key(&self) -> String {
        self.public_key.clone()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<(), SignerError> {
        let text = String::from_utf8_lossy(message).into_owned();
        let answer = tokio::task::spawn_blocking(move || {
            println!("{text}\n");
            print!("Approve? [y/N] ");
            use std::io::Write;
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok::<_, std::io::Error>(line)
        })
        .await
        .map_err(|e| SignerError::Unavailable(e.to_string()))?
        .map_err(|e| SignerError::Unavailable(e.to_string()))?;

        match answer.trim() {
            "y" | "Y" | "yes" => Ok(()),
            _ => Err(SignerError::Rejected),
        }
    }

    async fn sign_and_submit(&self, _payload: &[u8]) -> Result<String, SignerError> {
        Err(SignerError::Unavailable(
            "terminal prompt cannot sign transactions".to_string(),
        ))
    }
}
