// Licensed under the Apache-2.0 license

//! Hardware-description to board-support code generator.
//!
//! This crate converts a JSON document describing the physical I/O
//! peripherals of an embedded audio control surface (knobs, CV jacks,
//! encoders, switches, LEDs, OLED displays, ...) into the C++ source for a
//! board-support struct: member declarations, an `Init` bring-up routine,
//! and the per-tick processing routines the control loop calls.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use board_support_generator::{
//!     generate_board_support_from_file,
//!     generate_board_support_from_json_with_config,
//!     GeneratorConfig,
//! };
//!
//! // Generate code from a hardware description file
//! let code = generate_board_support_from_file(
//!     Path::new("my_panel.json"),
//! ).unwrap();
//!
//! // Or with a custom struct name
//! let config = GeneratorConfig::with_defaults().struct_name("FieldUnit");
//! let code = generate_board_support_from_json_with_config(
//!     r#"{"knobs": [{"pin": 21}]}"#,
//!     &config,
//! ).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`util`]: Identifier derivation utilities (indexed member names)
//! - [`config`]: Configuration for the generated artifact ([`GeneratorConfig`])
//! - [`schema`]: The hardware-description data model ([`HardwareDescription`])
//! - [`codegen`]: Per-peripheral generators, composition driver, and public API

pub mod codegen;
pub mod config;
pub mod schema;
pub mod util;

// Re-export main public API
pub use codegen::{
    generate_board_support, generate_board_support_from_file,
    generate_board_support_from_file_with_config, generate_board_support_from_json,
    generate_board_support_from_json_with_config, PeripheralKind, Phase,
};
pub use config::GeneratorConfig;
pub use schema::HardwareDescription;
