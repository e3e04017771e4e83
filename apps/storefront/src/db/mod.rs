// apps/storefront/src/db/mod.rs

//! Persistent backends for the cart document store.

pub mod pg_document_store;

pub use pg_document_store::PgDocumentStore;
