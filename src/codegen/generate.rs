// Licensed under the Apache-2.0 license

//! The composition driver: assembles per-kind fragments into the final
//! board-support artifact.
//!
//! The artifact layout is fixed:
//!
//! ```text
//! #include "daisy_seed.h"         includes (per-kind Include fragments)
//!
//! struct <Name> {
//!     daisy::DaisySeed som;       platform core handle first
//!     ...                         per-kind Declaration fragments
//!
//!     void Init(bool boost) {
//!         som.Init(boost);        platform bring-up first
//!         ...                     per-kind Initialization fragments
//!     }
//!
//!     void ProcessAnalogControls()   analog kind only
//!     void ProcessDigitalControls()  encoders + switches
//!     void ProcessAllControls()      the two above
//!     void UpdateLeds()              LEDs + RGB LEDs, invoked separately
//! };
//! ```
//!
//! Kinds are visited in [`PeripheralKind::COMPOSITION_ORDER`] for the
//! include, declaration, and initialization regions. The driver performs no
//! semantic checks; whatever the entries hold lands in the text.

use std::fmt::Write;

use super::{Phase, PeripheralKind};
use crate::config::GeneratorConfig;
use crate::schema::HardwareDescription;

/// The platform header every artifact starts with.
const PLATFORM_HEADER: &str = "daisy_seed.h";

pub(super) fn compose(desc: &HardwareDescription, config: &GeneratorConfig) -> String {
    let struct_name = config.resolve_struct_name(desc.name.as_deref());
    let mut out = String::new();

    // Region 1: includes.
    writeln!(out, "#include \"{PLATFORM_HEADER}\"").unwrap();
    for kind in PeripheralKind::COMPOSITION_ORDER {
        out.push_str(&kind.generate(desc, Phase::Include));
    }
    writeln!(out).unwrap();

    // Region 2: the type declaration, platform core handle first.
    writeln!(out, "struct {struct_name} {{").unwrap();
    writeln!(out, "    daisy::DaisySeed som;").unwrap();
    for kind in PeripheralKind::COMPOSITION_ORDER {
        out.push_str(&kind.generate(desc, Phase::Declaration));
    }
    writeln!(out).unwrap();

    // Region 3: the bring-up routine, platform init first.
    writeln!(out, "    void Init(bool boost = true) {{").unwrap();
    writeln!(out, "        som.Init(boost);").unwrap();
    for kind in PeripheralKind::COMPOSITION_ORDER {
        out.push_str(&kind.generate(desc, Phase::Initialization));
    }
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();

    // Region 4: the per-tick routines. The illumination update is its own
    // routine and is not part of ProcessAllControls.
    writeln!(out, "    void ProcessAnalogControls() {{").unwrap();
    out.push_str(&PeripheralKind::AnalogControl.generate(desc, Phase::Processing));
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "    void ProcessDigitalControls() {{").unwrap();
    out.push_str(&PeripheralKind::Encoder.generate(desc, Phase::Processing));
    out.push_str(&PeripheralKind::Switch.generate(desc, Phase::Processing));
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "    void ProcessAllControls() {{").unwrap();
    writeln!(out, "        ProcessAnalogControls();").unwrap();
    writeln!(out, "        ProcessDigitalControls();").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "    void UpdateLeds() {{").unwrap();
    out.push_str(&PeripheralKind::Led.generate(desc, Phase::Processing));
    out.push_str(&PeripheralKind::RgbLed.generate(desc, Phase::Processing));
    writeln!(out, "    }}").unwrap();

    writeln!(out, "}};").unwrap();
    out
}
