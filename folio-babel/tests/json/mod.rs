//! JSON format tests
//!
//! Editor JSON in, Markdown out, and the reverse through the registry.

mod interchange;
