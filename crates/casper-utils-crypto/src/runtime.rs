//! Process-wide crypto runtime bootstrap.
//!
//! The runtime is initialized once per process, before any computation signs
//! or encrypts. Initialization runs known-answer self tests for the primitives
//! this crate relies on. Shutdown is explicit and terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use aes::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use sha1::{Digest, Sha1};

use casper_utils_core::{Result, UtilityError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Lifecycle of the crypto runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    /// `init` has not completed yet.
    Uninitialized,
    /// Self tests passed; computations may run.
    Ready,
    /// `shutdown` was called; no further computations may run.
    ShutDown,
}

static STATE: Mutex<RuntimeState> = Mutex::new(RuntimeState::Uninitialized);

// Mirrors `STATE == Ready`; written only while `STATE` is locked.
static READY: AtomicBool = AtomicBool::new(false);

/// Initialize the runtime. Safe to call any number of times from any thread.
pub fn init() -> Result<()> {
    let mut state = STATE.lock().unwrap_or_else(PoisonError::into_inner);
    match *state {
        RuntimeState::Ready => Ok(()),
        RuntimeState::ShutDown => Err(shut_down()),
        RuntimeState::Uninitialized => {
            self_test()?;
            *state = RuntimeState::Ready;
            READY.store(true, Ordering::Release);
            tracing::info!("crypto runtime initialized");
            Ok(())
        }
    }
}

/// Make sure the runtime is ready, initializing it on first use.
///
/// Once the runtime is ready this is a single atomic load; the lock is only
/// taken before the first `init` and after `shutdown`.
pub fn ensure_ready() -> Result<()> {
    if READY.load(Ordering::Acquire) {
        return Ok(());
    }
    init()
}

/// Shut the runtime down. Idempotent.
pub fn shutdown() {
    let mut state = STATE.lock().unwrap_or_else(PoisonError::into_inner);
    READY.store(false, Ordering::Release);
    if *state != RuntimeState::ShutDown {
        *state = RuntimeState::ShutDown;
        tracing::info!("crypto runtime shut down");
    }
}

/// Current runtime state.
pub fn state() -> RuntimeState {
    *STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn shut_down() -> UtilityError {
    UtilityError::CryptoOperation("crypto runtime has been shut down".into())
}

// SHA-1("abc"), FIPS 180-2 appendix A.1.
const SHA1_ABC: [u8; 20] = [
    0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2,
    0x6c, 0x9c, 0xd0, 0xd8, 0x9d,
];

// NIST SP 800-38A F.2.5, first block.
const CBC_KEY: [u8; 32] = [
    0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77,
    0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14,
    0xdf, 0xf4,
];
const CBC_IV: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f,
];
const CBC_PLAINTEXT: [u8; 16] = [
    0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17,
    0x2a,
];
const CBC_CIPHERTEXT: [u8; 16] = [
    0xf5, 0x8c, 0x4c, 0x04, 0xd6, 0xe5, 0xf1, 0xba, 0x77, 0x9e, 0xab, 0xfb, 0x5f, 0x7b, 0xfb,
    0xd6,
];

fn self_test() -> Result<()> {
    if Sha1::digest(b"abc")[..] != SHA1_ABC[..] {
        return Err(UtilityError::CryptoOperation(
            "SHA-1 self test failed".into(),
        ));
    }

    let ciphertext = Aes256CbcEnc::new_from_slices(&CBC_KEY, &CBC_IV)
        .map_err(|e| UtilityError::CryptoOperation(format!("AES-256-CBC self test: {}", e)))?
        .encrypt_padded_vec_mut::<NoPadding>(&CBC_PLAINTEXT);
    if ciphertext != CBC_CIPHERTEXT {
        return Err(UtilityError::CryptoOperation(
            "AES-256-CBC self test failed".into(),
        ));
    }

    Ok(())
}
