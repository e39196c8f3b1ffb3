//! Data models for certificate records and configuration.

pub mod config;
pub mod record;
