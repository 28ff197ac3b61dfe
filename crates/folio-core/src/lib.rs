//! Folio Core Types and Definitions
//!
//! This crate provides the foundational types for Folio catalogue
//! identifiers. It includes:
//!
//! - **Parts and pages**: [`part::PartCode`], [`part::PageNumber`] and the
//!   [`part::PageRef`] pair
//! - **Numbers**: fixed-width, 1-based numeric fields ([`index`] module)
//! - **Identifiers**: the [`identifier::Identifier`] value and its
//!   category-specific fields
//! - **Page ranges**: [`pages::PageRange`] with expansion and normalization
//! - **Lookups**: read-only collaborators used during validation
//!   ([`lookup`] module), including the ISO 639-1 table ([`language`])

pub mod identifier;
pub mod index;
pub mod language;
pub mod lookup;
pub mod pages;
pub mod part;
