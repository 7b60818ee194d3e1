//! # ClassDesk Core
//!
//! Domain types and pure logic shared by the ClassDesk client and the development API server.
//!
//! - [`models`]: wire types for the REST collections
//! - [`access`]: role-based route guard
//! - [`forms`]: client-side form contracts, checked before anything is submitted
//! - [`analytics`]: aggregation over fetched attendance, performance and class records
//! - [`errors`]: the error taxonomy every layer reports through

pub mod access;
pub mod analytics;
pub mod errors;
pub mod forms;
pub mod models;
