//! TalentScout - Guided Candidate Intake Assistant
//!
//! This crate implements a conversational intake form for a tech recruitment
//! agency: seven required profile fields collected in a fixed order, followed
//! by AI-generated technical screening questions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
