//! Development verification provider
//!
//! Issues random numeric codes and keeps them in memory. Nothing is delivered
//! by SMS; the code is handed back to the caller so it can be shown in a
//! development banner.

use async_trait::async_trait;
use dashmap::DashMap;
use rand::Rng;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use market_core::error::DomainError;
use market_core::traits::{ChallengeHandle, RepoResult, VerificationProvider, VerifiedPhone};
use market_core::value_objects::PhoneNumber;

/// Default number of digits in an issued code
pub const DEFAULT_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone)]
struct IssuedCode {
    phone: PhoneNumber,
    code: String,
}

/// In-memory provider for local development and tests
#[derive(Debug)]
pub struct LocalCodeProvider {
    codes: DashMap<String, IssuedCode>,
    code_length: usize,
    surface_codes: bool,
}

impl Default for LocalCodeProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl LocalCodeProvider {
    pub fn new(code_length: usize) -> Self {
        Self {
            codes: DashMap::new(),
            code_length: code_length.max(1),
            surface_codes: true,
        }
    }

    /// Stop returning issued codes to the caller
    #[must_use]
    pub fn without_dev_codes(mut self) -> Self {
        self.surface_codes = false;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Number of codes issued and not yet confirmed or cancelled
    pub fn outstanding(&self) -> usize {
        self.codes.len()
    }

    /// Look up the code issued under a handle
    pub fn peek_code(&self, handle: &str) -> Option<String> {
        self.codes.get(handle).map(|issued| issued.code.clone())
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

#[async_trait]
impl VerificationProvider for LocalCodeProvider {
    #[instrument(skip(self), fields(phone = %phone))]
    async fn send_code(&self, phone: &PhoneNumber) -> RepoResult<ChallengeHandle> {
        let handle = Uuid::new_v4().to_string();
        let code = self.generate_code();

        self.codes.insert(
            handle.clone(),
            IssuedCode {
                phone: phone.clone(),
                code: code.clone(),
            },
        );
        debug!(handle = %handle, "Issued verification code");

        let issued = ChallengeHandle::new(handle);
        Ok(if self.surface_codes {
            issued.with_dev_code(code)
        } else {
            issued
        })
    }

    #[instrument(skip(self, code))]
    async fn confirm(&self, handle: &str, code: &str) -> RepoResult<VerifiedPhone> {
        match self.codes.remove_if(handle, |_, issued| issued.code == code) {
            Some((_, issued)) => Ok(VerifiedPhone {
                phone: issued.phone,
            }),
            None => {
                warn!("Verification code rejected");
                Err(DomainError::InvalidCode)
            }
        }
    }

    #[instrument(skip(self))]
    async fn cancel(&self, handle: &str) -> RepoResult<()> {
        self.codes.remove(handle);
        Ok(())
    }
}
