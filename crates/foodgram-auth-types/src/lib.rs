//! Auth types shared across Foodgram services.
//!
//! Provides the gateway identity extractors used by every handler.

pub mod identity;
