//! HTTP hosting layer for the ledger operations.

pub mod rest;
