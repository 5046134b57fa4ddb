//! Request-building glue for the Dynect resource surface.
//!
//! These methods only assemble paths and bodies; everything interesting
//! (decoration, job polling, re-authentication) happens in the dispatcher.
//! Response payloads are returned as decoded envelopes, not modeled.

mod records;
mod zones;
