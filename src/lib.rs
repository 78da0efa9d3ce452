//! License gate for the GONKA vLLM distribution
//!
//! At startup the `GONKA_SECRET` environment variable is compared with the
//! expected secret. A mismatch prints `GONKA_SECRET value is wrong` and exits
//! with status 1. On success a single advisory callback is sent to the
//! license server in the background.
//!
//! ```no_run
//! // First thing in main: returns only if the license is valid
//! gonka_license::validate_license();
//! ```

pub mod callback;
pub mod gate;
pub mod license;

pub use gate::{terminate, validate_license, LicenseGate};
pub use license::{ExpectedSecret, LicenseError};
