//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation for the application:
//! API endpoints, the upstream Halo Waypoint client, data access, and
//! infrastructure services. The backend uses Axum as the web framework and
//! SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - The token chain manager, request envelope,
//!   and batched fan-out engine for the upstream service, plus the OAuth flow
//! - **Data Layer** (`data/`) - Token and build row repositories
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, etc.)
//! - **Startup** (`startup`) - Initialization of database and HTTP clients
//! - **Router** (`router`) - Axum route configuration
//!
//! # Request Flow
//!
//! A typical request flows through these layers:
//!
//! 1. **Router** receives the HTTP request and routes to the controller
//! 2. **Controller** validates inputs, calls the Halo client
//! 3. **Service** fans the call out to the upstream, refreshing any expired
//!    link of the token chain on demand through the data layer
//! 4. **Controller** converts the result to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
