// Licensed under the Apache-2.0 license

//! Main code generation logic for converting a hardware description to
//! board-support C++ code.
//!
//! This module contains:
//! - The four-phase generation model ([`Phase`])
//! - The closed set of peripheral kinds ([`PeripheralKind`]) and the
//!   capability trait their generators implement
//! - Entry point functions for code generation
//!
//! The implementation is split across submodules:
//! - `kinds`: one generator per peripheral kind
//! - `generate`: assembling per-kind fragments into the final artifact

mod generate;
mod kinds;

use anyhow::Context;
use std::fmt::Write;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::schema::HardwareDescription;

/// One of the four fixed regions of the generated artifact.
///
/// The composition driver always requests phases in this order. A generator
/// with nothing to contribute for a phase emits an empty fragment; it never
/// errors and never emits partial syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Header includes.
    Include,
    /// Struct member declarations.
    Declaration,
    /// Statements inside the bring-up routine.
    Initialization,
    /// Statements inside the per-tick routines.
    Processing,
}

impl Phase {
    /// All phases in composition order.
    pub const ALL: [Phase; 4] = [
        Phase::Include,
        Phase::Declaration,
        Phase::Initialization,
        Phase::Processing,
    ];
}

/// The closed set of supported peripheral kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeripheralKind {
    /// Merged analog inputs: panel knobs first, then CV inputs.
    AnalogControl,
    /// DAC-driven CV outputs.
    CvOutput,
    /// Quadrature encoders.
    Encoder,
    /// Gate/trigger inputs.
    GateInput,
    /// Gate/trigger outputs (reserved no-op).
    GateOutput,
    /// Single-color LEDs.
    Led,
    /// MIDI handlers (reserved no-op).
    MidiHandler,
    /// OLED displays.
    Display,
    /// RGB LEDs.
    RgbLed,
    /// Panel switches.
    Switch,
}

impl PeripheralKind {
    /// The fixed order in which the composition driver visits kinds for the
    /// include, declaration, and initialization regions.
    pub const COMPOSITION_ORDER: [PeripheralKind; 10] = [
        PeripheralKind::AnalogControl,
        PeripheralKind::CvOutput,
        PeripheralKind::Encoder,
        PeripheralKind::GateInput,
        PeripheralKind::GateOutput,
        PeripheralKind::Led,
        PeripheralKind::MidiHandler,
        PeripheralKind::Display,
        PeripheralKind::RgbLed,
        PeripheralKind::Switch,
    ];

    fn generator(self) -> &'static dyn KindGenerator {
        match self {
            PeripheralKind::AnalogControl => &kinds::AnalogControlGen,
            PeripheralKind::CvOutput => &kinds::CvOutputGen,
            PeripheralKind::Encoder => &kinds::EncoderGen,
            PeripheralKind::GateInput => &kinds::GateInputGen,
            PeripheralKind::GateOutput => &kinds::GateOutputGen,
            PeripheralKind::Led => &kinds::LedGen,
            PeripheralKind::MidiHandler => &kinds::MidiHandlerGen,
            PeripheralKind::Display => &kinds::DisplayGen,
            PeripheralKind::RgbLed => &kinds::RgbLedGen,
            PeripheralKind::Switch => &kinds::SwitchGen,
        }
    }

    /// Generate this kind's fragment for one phase.
    ///
    /// Deterministic in its inputs; an empty or absent entry list yields an
    /// empty fragment at every phase.
    pub fn generate(self, desc: &HardwareDescription, phase: Phase) -> String {
        self.generator().generate(desc, phase)
    }
}

/// Capability interface implemented by every peripheral generator.
///
/// Each phase hook defaults to contributing nothing, so a generator only
/// overrides the phases its kind participates in; the reserved kinds
/// override none of them.
pub(crate) trait KindGenerator {
    fn include(&self, _desc: &HardwareDescription, _out: &mut String) {}
    fn declare(&self, _desc: &HardwareDescription, _out: &mut String) {}
    fn initialize(&self, _desc: &HardwareDescription, _out: &mut String) {}
    fn process(&self, _desc: &HardwareDescription, _out: &mut String) {}

    fn generate(&self, desc: &HardwareDescription, phase: Phase) -> String {
        let mut out = String::new();
        match phase {
            Phase::Include => self.include(desc, &mut out),
            Phase::Declaration => self.declare(desc, &mut out),
            Phase::Initialization => self.initialize(desc, &mut out),
            Phase::Processing => self.process(desc, &mut out),
        }
        out
    }
}

/// Emit one alias reference member per label, binding the label to the
/// entry's slot in `array`.
///
/// Labels are emitted in entry order, then label-list order, with no
/// collision detection; a duplicate alias becomes a duplicate member in the
/// generated code and is the downstream toolchain's problem.
pub(crate) fn emit_label_aliases<'a>(
    entry_labels: impl Iterator<Item = &'a [String]>,
    member_type: &str,
    array: &str,
    out: &mut String,
) {
    for (slot, labels) in entry_labels.enumerate() {
        for label in labels {
            writeln!(out, "    {member_type}& {label} = {array}[{slot}];").unwrap();
        }
    }
}

/// Generate board-support code for one hardware description.
///
/// This is the pure transform: document in, C++ text out. It performs no
/// I/O, never fails, and generating twice from the same document yields
/// byte-identical text.
pub fn generate_board_support(desc: &HardwareDescription, config: &GeneratorConfig) -> String {
    generate::compose(desc, config)
}

/// Generate board-support code from a JSON hardware description.
///
/// Parsing the document is the only fallible step.
pub fn generate_board_support_from_json(json: &str) -> anyhow::Result<String> {
    generate_board_support_from_json_with_config(json, &GeneratorConfig::with_defaults())
}

/// Generate board-support code from a JSON hardware description with a
/// custom configuration.
pub fn generate_board_support_from_json_with_config(
    json: &str,
    config: &GeneratorConfig,
) -> anyhow::Result<String> {
    let desc: HardwareDescription =
        serde_json::from_str(json).context("failed to parse hardware description")?;
    log::debug!(
        "generating board support for {} analog controls, {} displays",
        desc.merged_control_count(),
        desc.displays.len()
    );
    Ok(generate_board_support(&desc, config))
}

/// Generate board-support code from a hardware description file.
pub fn generate_board_support_from_file(file: &Path) -> anyhow::Result<String> {
    generate_board_support_from_file_with_config(file, &GeneratorConfig::with_defaults())
}

/// Generate board-support code from a hardware description file with a
/// custom configuration.
pub fn generate_board_support_from_file_with_config(
    file: &Path,
    config: &GeneratorConfig,
) -> anyhow::Result<String> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read hardware description: {}", file.display()))?;
    generate_board_support_from_json_with_config(&json, config)
        .with_context(|| format!("in hardware description: {}", file.display()))
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
