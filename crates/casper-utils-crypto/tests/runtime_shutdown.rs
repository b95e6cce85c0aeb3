//! Runtime shutdown is terminal for the whole process, so it lives in its own
//! test binary.

use std::sync::Arc;

use casper_utils_core::{Computation, ErrorKind};
use casper_utils_crypto::runtime::{self, RuntimeState};
use casper_utils_crypto::{FixedClock, LinkSecrets, PublicLink, PublicLinkConfig};

fn link() -> PublicLink {
    let config = PublicLinkConfig {
        clock: Arc::new(FixedClock::parse("2024-01-15T10:30:00+00:00").unwrap()),
    };
    PublicLink::new(
        config,
        LinkSecrets::new(
            "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=",
            "oKGio6SlpqeoqaqrrK2urw==",
        ),
        "https://x.example/l",
        1,
        "invoice",
        42,
    )
}

#[test]
fn test_shutdown_is_terminal() {
    runtime::ensure_ready().unwrap();
    assert_eq!(runtime::state(), RuntimeState::Ready);

    let mut before = link();
    before.execute().unwrap();
    assert!(before.url().is_some());

    runtime::shutdown();
    runtime::shutdown();
    assert_eq!(runtime::state(), RuntimeState::ShutDown);

    let err = runtime::init().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CryptoOperation);
    assert_eq!(err.reason(), "crypto runtime has been shut down");

    let err = runtime::ensure_ready().unwrap_err();
    assert_eq!(err.reason(), "crypto runtime has been shut down");

    let mut after = link();
    assert!(after.execute().is_err());
    assert_eq!(after.last_error(), "crypto operation failed: crypto runtime has been shut down");
    assert!(after.produce_rows().is_empty());
}
