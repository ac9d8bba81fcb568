// Licensed under the Apache-2.0 license

//! One fragment generator per peripheral kind.
//!
//! Every generator is a unit struct implementing [`KindGenerator`]. Fragments
//! carry their own indentation: declaration fragments are struct members
//! (one level), initialization and processing fragments are statements
//! inside a member function (two levels). Entry list order is preserved in
//! every fragment; the list index is the only link between the declaration,
//! initialization, and processing output for an entry.

use std::fmt::Write;

use super::{emit_label_aliases, KindGenerator};
use crate::schema::{DisplayTransport, HardwareDescription};
use crate::util::indexed_name;

/// Merged analog inputs: panel knobs first, then CV inputs, one shared
/// array and ADC.
pub(super) struct AnalogControlGen;

impl KindGenerator for AnalogControlGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.merged_control_count();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::AnalogControl controls[{count}];").unwrap();
        emit_label_aliases(
            desc.merged_controls().map(|e| e.labels.as_slice()),
            "daisy::AnalogControl",
            "controls",
            out,
        );
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.merged_control_count();
        if count == 0 {
            return;
        }
        // Channel configs first, one batch ADC init against all of them,
        // then the per-channel wrappers; sampling starts only after every
        // wrapper holds its data pointer.
        writeln!(out, "        daisy::AdcChannelConfig adc_cfg[{count}];").unwrap();
        for (slot, entry) in desc.merged_controls().enumerate() {
            writeln!(
                out,
                "        adc_cfg[{slot}].InitSingle(som.GetPin({}));",
                entry.pin
            )
            .unwrap();
        }
        writeln!(out, "        som.adc.Init(adc_cfg, {count});").unwrap();
        for (slot, entry) in desc.merged_controls().enumerate() {
            writeln!(
                out,
                "        controls[{slot}].Init(som.adc.GetPtr({slot}), som.AudioCallbackRate(), {}, {});",
                entry.flip, entry.invert
            )
            .unwrap();
        }
        writeln!(out, "        som.adc.Start();").unwrap();
    }

    fn process(&self, desc: &HardwareDescription, out: &mut String) {
        for slot in 0..desc.merged_control_count() {
            writeln!(out, "        controls[{slot}].Process();").unwrap();
        }
    }
}

/// The DAC exposes exactly this many CV output channels.
pub(super) const CV_OUTPUT_CHANNEL_LIMIT: usize = 2;

/// CV outputs. There is no per-instance abstraction: a non-empty list emits
/// one fixed both-channel DAC bring-up, and entries past the hardware limit
/// are dropped without changing the output.
pub(super) struct CvOutputGen;

impl KindGenerator for CvOutputGen {
    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        if desc.cv_outputs.is_empty() {
            return;
        }
        if desc.cv_outputs.len() > CV_OUTPUT_CHANNEL_LIMIT {
            log::warn!(
                "hardware description lists {} CV outputs but the DAC has {} channels; extra entries are dropped",
                desc.cv_outputs.len(),
                CV_OUTPUT_CHANNEL_LIMIT
            );
        }
        writeln!(out, "        daisy::DacHandle::Config dac_cfg;").unwrap();
        writeln!(
            out,
            "        dac_cfg.bitdepth = daisy::DacHandle::BitDepth::BITS_12;"
        )
        .unwrap();
        writeln!(
            out,
            "        dac_cfg.buff_state = daisy::DacHandle::BufferState::ENABLED;"
        )
        .unwrap();
        writeln!(out, "        dac_cfg.mode = daisy::DacHandle::Mode::POLLING;").unwrap();
        writeln!(out, "        dac_cfg.chn = daisy::DacHandle::Channel::BOTH;").unwrap();
        writeln!(out, "        som.dac.Init(dac_cfg);").unwrap();
    }
}

/// Quadrature encoders. Alongside the array, the first entry gets a bare
/// convenience reference so single-encoder panels read naturally.
pub(super) struct EncoderGen;

impl KindGenerator for EncoderGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.encoders.len();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::Encoder encoders[{count}];").unwrap();
        emit_label_aliases(
            desc.encoders.iter().map(|e| e.labels.as_slice()),
            "daisy::Encoder",
            "encoders",
            out,
        );
        writeln!(
            out,
            "    daisy::Encoder& {} = encoders[0];",
            indexed_name("encoder", 0)
        )
        .unwrap();
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.encoders.iter().enumerate() {
            writeln!(
                out,
                "        encoders[{slot}].Init(som.GetPin({}), som.GetPin({}), som.GetPin({}), som.AudioCallbackRate());",
                entry.pin_a, entry.pin_b, entry.pin_click
            )
            .unwrap();
        }
    }

    fn process(&self, desc: &HardwareDescription, out: &mut String) {
        for slot in 0..desc.encoders.len() {
            writeln!(out, "        encoders[{slot}].Debounce();").unwrap();
        }
    }
}

/// Panel switches. The three enumerated attributes pass through verbatim;
/// an unknown name fails in the C++ compile, not here.
pub(super) struct SwitchGen;

impl KindGenerator for SwitchGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.switches.len();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::Switch switches[{count}];").unwrap();
        emit_label_aliases(
            desc.switches.iter().map(|e| e.labels.as_slice()),
            "daisy::Switch",
            "switches",
            out,
        );
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.switches.iter().enumerate() {
            writeln!(
                out,
                "        switches[{slot}].Init(som.GetPin({}), som.AudioCallbackRate(), daisy::Switch::{}, daisy::Switch::{}, daisy::Switch::{});",
                entry.pin, entry.kind, entry.polarity, entry.pull
            )
            .unwrap();
        }
    }

    fn process(&self, desc: &HardwareDescription, out: &mut String) {
        for slot in 0..desc.switches.len() {
            writeln!(out, "        switches[{slot}].Debounce();").unwrap();
        }
    }
}

/// Single-color LEDs. Their update calls land in the illumination routine,
/// not the generic tick routines.
pub(super) struct LedGen;

impl KindGenerator for LedGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.leds.len();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::Led leds[{count}];").unwrap();
        emit_label_aliases(
            desc.leds.iter().map(|e| e.labels.as_slice()),
            "daisy::Led",
            "leds",
            out,
        );
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.leds.iter().enumerate() {
            writeln!(
                out,
                "        leds[{slot}].Init(som.GetPin({}), {});",
                entry.pin, entry.invert
            )
            .unwrap();
        }
    }

    fn process(&self, desc: &HardwareDescription, out: &mut String) {
        for slot in 0..desc.leds.len() {
            writeln!(out, "        leds[{slot}].Update();").unwrap();
        }
    }
}

/// RGB LEDs. Same illumination-routine placement as [`LedGen`].
pub(super) struct RgbLedGen;

impl KindGenerator for RgbLedGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.rgb_leds.len();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::RgbLed rgb_leds[{count}];").unwrap();
        emit_label_aliases(
            desc.rgb_leds.iter().map(|e| e.labels.as_slice()),
            "daisy::RgbLed",
            "rgb_leds",
            out,
        );
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.rgb_leds.iter().enumerate() {
            writeln!(
                out,
                "        rgb_leds[{slot}].Init(som.GetPin({}), som.GetPin({}), som.GetPin({}), {});",
                entry.pin_red, entry.pin_green, entry.pin_blue, entry.invert
            )
            .unwrap();
        }
    }

    fn process(&self, desc: &HardwareDescription, out: &mut String) {
        for slot in 0..desc.rgb_leds.len() {
            writeln!(out, "        rgb_leds[{slot}].Update();").unwrap();
        }
    }
}

/// Gate inputs. The init API takes a pin handle by pointer, so one local is
/// declared for the first entry and rebound for each later entry rather
/// than keeping a handle array around.
pub(super) struct GateInputGen;

impl KindGenerator for GateInputGen {
    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        let count = desc.gate_inputs.len();
        if count == 0 {
            return;
        }
        writeln!(out, "    daisy::GateIn gate_inputs[{count}];").unwrap();
        emit_label_aliases(
            desc.gate_inputs.iter().map(|e| e.labels.as_slice()),
            "daisy::GateIn",
            "gate_inputs",
            out,
        );
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.gate_inputs.iter().enumerate() {
            if slot == 0 {
                writeln!(
                    out,
                    "        dsy_gpio_pin gate_pin = som.GetPin({});",
                    entry.pin
                )
                .unwrap();
            } else {
                writeln!(out, "        gate_pin = som.GetPin({});", entry.pin).unwrap();
            }
            writeln!(out, "        gate_inputs[{slot}].Init(&gate_pin);").unwrap();
        }
    }
}

/// Gate outputs are schema-present but reserved; every phase is a
/// deliberate no-op so documents carrying them still compose.
pub(super) struct GateOutputGen;

impl KindGenerator for GateOutputGen {}

/// MIDI handlers are schema-present but reserved, like [`GateOutputGen`].
pub(super) struct MidiHandlerGen;

impl KindGenerator for MidiHandlerGen {}

/// Driver family that requires the OLED driver header.
const OLED_DRIVER_FAMILY: &str = "SSD130x";
const OLED_DRIVER_HEADER: &str = "dev/oled_ssd130x.h";

/// OLED displays. Each entry is its own typed member; the element type is
/// the derived driver type name, recomputed from the entry on every pass.
pub(super) struct DisplayGen;

impl KindGenerator for DisplayGen {
    fn include(&self, desc: &HardwareDescription, out: &mut String) {
        if desc
            .displays
            .iter()
            .any(|d| d.driver.starts_with(OLED_DRIVER_FAMILY))
        {
            writeln!(out, "#include \"{OLED_DRIVER_HEADER}\"").unwrap();
        }
    }

    fn declare(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.displays.iter().enumerate() {
            writeln!(
                out,
                "    daisy::OledDisplay<daisy::{}> {};",
                entry.driver_typename(),
                indexed_name("display", slot)
            )
            .unwrap();
        }
    }

    fn initialize(&self, desc: &HardwareDescription, out: &mut String) {
        for (slot, entry) in desc.displays.iter().enumerate() {
            let name = indexed_name("display", slot);
            let cfg = format!("{name}_cfg");
            writeln!(
                out,
                "        daisy::OledDisplay<daisy::{}>::Config {cfg};",
                entry.driver_typename()
            )
            .unwrap();
            match &entry.transport {
                DisplayTransport::FourWireSpi { pin_dc, pin_reset } => {
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.pin_config.dc = som.GetPin({pin_dc});"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.pin_config.reset = som.GetPin({pin_reset});"
                    )
                    .unwrap();
                }
                DisplayTransport::I2c {
                    address,
                    peripheral,
                    speed,
                    pin_scl,
                    pin_sda,
                } => {
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.i2c_address = {address};"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.i2c_config.periph = daisy::I2CHandle::Config::Peripheral::{peripheral};"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.i2c_config.speed = daisy::I2CHandle::Config::Speed::{speed};"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.i2c_config.pin_config.scl = som.GetPin({pin_scl});"
                    )
                    .unwrap();
                    writeln!(
                        out,
                        "        {cfg}.driver_config.transport_config.i2c_config.pin_config.sda = som.GetPin({pin_sda});"
                    )
                    .unwrap();
                }
            }
            writeln!(out, "        {name}.Init({cfg});").unwrap();
        }
    }
}
