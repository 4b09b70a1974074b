//! Code-tagged document catalogue with deterministic coverage search.
//!
//! `catalog-core` stores PDF documents tagged with free-form codes and answers
//! multi-code searches with a small set of documents that together cover the
//! requested codes, picked greedily. Identical catalogue contents and queries
//! always produce the same selection in the same order.
//!
//! Around that core it provides the catalogue lifecycle, on-disk snapshots, a
//! PDF file store, CSV export and a relay to an external highlighting service.

pub mod config;
pub mod document;
pub mod export;
pub mod index;
pub mod relay;
pub mod selection;
pub mod storage;
pub mod types;
