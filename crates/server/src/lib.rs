//! Parts Server library.
//!
//! HTTP API of the parts manufacturer storefront, exposed as a library so
//! the binary and the integration tests build the same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
