//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the contract layer,
//! the reference substrate and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_TX_ID: &str = "tx_id";

// Entity identifiers
pub const FIELD_ASSET_ID: &str = "asset_id";
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_MSP_ID: &str = "msp_id";
pub const FIELD_BLOCK_NUM: &str = "block_num";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
