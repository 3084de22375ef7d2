//! HTTP clients for the services the tracker calls out to.

pub mod gemini;
