//! Mercadito server library.
//!
//! This crate provides the business-management application as a library,
//! allowing it to be tested and reused. The binary in `main.rs` wires the
//! pieces together and starts the HTTP server.
//!
//! # Screens
//!
//! Six server-rendered screens, one per entity: customers, products,
//! inventory, orders, deliveries, and sales. Each screen is backed by a
//! repository in [`db`] that owns all queries for its entity.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
