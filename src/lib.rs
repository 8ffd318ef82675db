//! Studio Ops - operations backend for a photography/videography studio.
//!
//! This crate is the studio's system of record: service-booking lifecycle,
//! price-quote lifecycle gated by scheduling-conflict detection, and
//! training-cohort enrollment with a strict seat-capacity invariant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
