//! Execute handlers for the Fury bridge ledger.
//!
//! - `lock` - pulls tokens into custody with the caller's allowance
//! - `unlock` - relayer-only release of custody
//!
//! Each guarded handler dispatches its token call as a sub-message; the
//! matching `complete_*` function runs from the reply entry point.

mod lock;
mod unlock;

pub use lock::*;
pub use unlock::*;
