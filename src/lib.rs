//! Automation Fit - Questionnaire-based RPA/IPA suitability assessment
//!
//! This crate resolves which questions of an automation-fit questionnaire
//! apply to a respondent, scores every dimension for robotic (RPA) and
//! intelligent (IPA) process automation, derives ROI metrics, and turns the
//! results into a recommendation with per-dimension advice.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
