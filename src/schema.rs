// Licensed under the Apache-2.0 license

//! The hardware-description data model.
//!
//! A [`HardwareDescription`] is the input document for one physical build:
//! per peripheral kind, an ordered list of entries. A kind that is absent
//! from the document deserializes to an empty list, which generates nothing.
//!
//! The generators treat the document as read-only. List index is the sole
//! addressing key across generation phases, so input order is preserved
//! everywhere; labels are emitted as extra named references to a slot and
//! are never checked for uniqueness here.

use serde::Deserialize;

/// One hardware description document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HardwareDescription {
    /// Optional board name, used for the generated struct unless overridden
    /// by [`crate::GeneratorConfig`].
    pub name: Option<String>,
    /// Panel analog inputs (potentiometers).
    pub knobs: Vec<AnalogInputEntry>,
    /// Jack-fed control-voltage inputs. These share the analog control array
    /// with `knobs`; see [`HardwareDescription::merged_controls`].
    pub cv_inputs: Vec<AnalogInputEntry>,
    /// Control-voltage outputs driven by the on-chip DAC.
    pub cv_outputs: Vec<CvOutputEntry>,
    /// Quadrature encoders with integrated click switches.
    pub encoders: Vec<EncoderEntry>,
    /// Momentary or latching panel switches.
    pub switches: Vec<SwitchEntry>,
    /// Single-color LEDs.
    pub leds: Vec<LedEntry>,
    /// Three-pin RGB LEDs.
    pub rgb_leds: Vec<RgbLedEntry>,
    /// Gate/trigger inputs.
    pub gate_inputs: Vec<GateInputEntry>,
    /// Gate/trigger outputs (reserved, generates nothing yet).
    pub gate_outputs: Vec<GateOutputEntry>,
    /// MIDI handlers (reserved, generates nothing yet).
    pub midi: Vec<MidiEntry>,
    /// OLED displays.
    pub displays: Vec<DisplayEntry>,
}

impl HardwareDescription {
    /// All analog control entries in array order: panel knobs first, then CV
    /// inputs. Both kinds share one underlying array and index space in the
    /// generated code.
    pub fn merged_controls(&self) -> impl Iterator<Item = &AnalogInputEntry> {
        self.knobs.iter().chain(self.cv_inputs.iter())
    }

    /// Size of the shared analog control array.
    pub fn merged_control_count(&self) -> usize {
        self.knobs.len() + self.cv_inputs.len()
    }
}

/// An analog input channel, panel knob or CV jack.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalogInputEntry {
    /// ADC-capable pin.
    pub pin: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
    /// Invert the control curve.
    pub flip: bool,
    /// Invert the sampled value.
    pub invert: bool,
}

/// A control-voltage output. The DAC exposes exactly two channels; entries
/// past the second are dropped and per-entry attributes are not reflected in
/// the generated code.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CvOutputEntry {
    /// DAC output pin.
    pub pin: u8,
    /// Alias names (unused; the DAC has no per-instance abstraction).
    pub labels: Vec<String>,
}

/// A quadrature encoder with click switch.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EncoderEntry {
    /// Quadrature phase A pin.
    pub pin_a: u8,
    /// Quadrature phase B pin.
    pub pin_b: u8,
    /// Click switch pin.
    pub pin_click: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
}

/// A panel switch. The three enumerated attributes are emitted verbatim as
/// `daisy::Switch::` qualified names; unknown values surface when the
/// generated code is compiled, not here.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SwitchEntry {
    /// Input pin.
    pub pin: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
    /// Switch type, e.g. `TYPE_MOMENTARY`.
    pub kind: String,
    /// Signal polarity, e.g. `POLARITY_INVERTED`.
    pub polarity: String,
    /// Pull resistor mode, e.g. `PULL_UP`.
    pub pull: String,
}

impl Default for SwitchEntry {
    fn default() -> Self {
        Self {
            pin: 0,
            labels: Vec::new(),
            kind: "TYPE_MOMENTARY".to_string(),
            polarity: "POLARITY_INVERTED".to_string(),
            pull: "PULL_UP".to_string(),
        }
    }
}

/// A single-color LED.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LedEntry {
    /// Output pin.
    pub pin: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
    /// Drive the pin active-low.
    pub invert: bool,
}

/// A three-pin RGB LED.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RgbLedEntry {
    /// Red channel pin.
    pub pin_red: u8,
    /// Green channel pin.
    pub pin_green: u8,
    /// Blue channel pin.
    pub pin_blue: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
    /// Drive the pins active-low.
    pub invert: bool,
}

/// A gate/trigger input.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GateInputEntry {
    /// Input pin.
    pub pin: u8,
    /// Alias names bound to this entry's array slot.
    pub labels: Vec<String>,
}

/// A gate/trigger output. Accepted by the schema for document compatibility;
/// the generator for this kind is a deliberate no-op at every phase.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GateOutputEntry {
    /// Output pin.
    pub pin: u8,
    /// Alias names (unused until the kind is implemented).
    pub labels: Vec<String>,
}

/// A MIDI handler. Accepted by the schema for document compatibility; the
/// generator for this kind is a deliberate no-op at every phase.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MidiEntry {
    /// UART receive pin.
    pub pin_rx: u8,
    /// UART transmit pin.
    pub pin_tx: u8,
    /// Alias names (unused until the kind is implemented).
    pub labels: Vec<String>,
}

/// An OLED display.
#[derive(Clone, Debug, Deserialize)]
pub struct DisplayEntry {
    /// Driver family, e.g. `SSD130x`.
    pub driver: String,
    /// Panel dimensions, e.g. `128x64`.
    pub dimensions: String,
    /// Wire transport and its pin/bus configuration.
    #[serde(flatten)]
    pub transport: DisplayTransport,
}

impl DisplayEntry {
    /// The concrete driver type selector for this display.
    ///
    /// Concatenates the driver family, transport selector, and dimensions
    /// with the fixed `Driver` suffix, with no normalization: the result
    /// must match the consuming C++ type system exactly
    /// (`SSD130x` + `I2c` + `128x64` yields `SSD130xI2c128x64Driver`).
    ///
    /// This is a derived value recomputed on every call, never stored on the
    /// entry.
    pub fn driver_typename(&self) -> String {
        format!(
            "{}{}{}Driver",
            self.driver,
            self.transport.selector(),
            self.dimensions
        )
    }
}

/// Display wire transport configuration.
///
/// The tag doubles as the transport segment of the derived driver type name,
/// so the variant spellings follow the consuming type system.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "transport")]
pub enum DisplayTransport {
    /// Four-wire serial: clock and data on the shared bus, plus dedicated
    /// data/command select and reset pins.
    #[serde(rename = "4WireSpi")]
    FourWireSpi {
        /// Data/command select pin.
        pin_dc: u8,
        /// Reset pin.
        pin_reset: u8,
    },
    /// Two-wire bus addressing the display as a peripheral.
    #[serde(rename = "I2c")]
    I2c {
        /// Bus address of the display.
        address: u8,
        /// Peripheral selector, e.g. `I2C_1`.
        peripheral: String,
        /// Bus speed selector, e.g. `I2C_400KHZ`.
        speed: String,
        /// Clock pin.
        pin_scl: u8,
        /// Data pin.
        pin_sda: u8,
    },
}

impl DisplayTransport {
    /// The transport segment of the derived driver type name.
    pub fn selector(&self) -> &'static str {
        match self {
            DisplayTransport::FourWireSpi { .. } => "4WireSpi",
            DisplayTransport::I2c { .. } => "I2c",
        }
    }
}
