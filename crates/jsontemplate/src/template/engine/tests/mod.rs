//! Tests for template engine
//!
//! Organized into focused submodules: tokenizer, directive classification,
//! rendering by feature, scope chain, and errors.

use super::*;
use crate::template::error::FormatterError;

// Test helper functions
mod helpers;

// Tokenizer tests
mod directives;
mod tokenstream_performance;

mod render_sections;
