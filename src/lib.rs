//! Estate Funnel - backend for an estate-planning landing page.
//!
//! Provides checkout session creation, Stripe webhook ingestion, and
//! lead capture behind a small axum HTTP surface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
