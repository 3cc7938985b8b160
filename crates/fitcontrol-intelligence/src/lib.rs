// ABOUTME: Adherence streak and calendar engine plus fitness algorithms
// ABOUTME: Pure, store-agnostic computation consumed by the server services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![deny(unsafe_code)]

//! # `FitControl` Intelligence
//!
//! Everything in this crate is a pure function of its inputs. Callers load a
//! plan and a compliance log from the record store, decide what "today" is,
//! and hand both to the engine.
//!
//! ## Modules
//!
//! - **dates**: calendar arithmetic and local-date resolution at a fixed offset
//! - **schedule**: reduces a plan to its set of active weekdays
//! - **adherence**: streak and rolling calendar computation
//! - **adapters**: per-domain choice of which records feed the streak
//! - **reconciliation**: which compliance records today still needs
//! - **algorithms**: energy expenditure estimates and meal nutrition totals

/// Date arithmetic and local-today resolution
pub mod dates;

/// Schedule Resolver: active weekday extraction
pub mod schedule;

/// Streak and calendar computation
pub mod adherence;

/// Routine and diet domain adapters
pub mod adapters;

/// Planning of today's missing compliance records
pub mod reconciliation;

/// Fitness algorithms (energy expenditure, meal nutrition)
pub mod algorithms;

pub use adapters::{adapter_for, DietAdapter, DomainAdapter, RoutineAdapter};
pub use adherence::{AdherenceConfig, AdherenceEngine, AdherenceSummary, ComplianceLog};
pub use schedule::ActiveWeekdays;
