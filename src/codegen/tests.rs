// Licensed under the Apache-2.0 license

//! Tests for the code generator.

mod test {
    use super::super::{
        generate_board_support, generate_board_support_from_json,
        generate_board_support_from_json_with_config, PeripheralKind, Phase,
    };
    use crate::config::GeneratorConfig;
    use crate::schema::HardwareDescription;

    fn parse(json: &str) -> HardwareDescription {
        serde_json::from_str(json).unwrap()
    }

    fn generate(json: &str) -> String {
        generate_board_support(&parse(json), &GeneratorConfig::with_defaults())
    }

    #[test]
    fn test_full_panel() {
        let code = generate(
            r#"{
                "name": "FieldUnit",
                "knobs": [{"pin": 21, "labels": ["cutoff"]}, {"pin": 22}],
                "cv_inputs": [{"pin": 15, "flip": true}],
                "cv_outputs": [{"pin": 23}],
                "encoders": [{"pin_a": 1, "pin_b": 2, "pin_click": 3}],
                "switches": [{"pin": 5, "labels": ["shift"]}],
                "leds": [{"pin": 24, "invert": true}],
                "rgb_leds": [{"pin_red": 25, "pin_green": 26, "pin_blue": 27}],
                "gate_inputs": [{"pin": 14}],
                "displays": [{
                    "driver": "SSD130x",
                    "dimensions": "128x64",
                    "transport": "I2c",
                    "address": 60,
                    "peripheral": "I2C_1",
                    "speed": "I2C_400KHZ",
                    "pin_scl": 11,
                    "pin_sda": 12
                }]
            }"#,
        );
        println!("Generated code:\n{}", code);

        assert!(code.contains("struct FieldUnit {"));
        assert!(code.contains("daisy::DaisySeed som;"));
        assert!(code.contains("void Init(bool boost = true) {"));
        assert!(code.contains("som.Init(boost);"));
        assert!(code.contains("daisy::AnalogControl& cutoff = controls[0];"));
        assert!(code.contains("som.adc.Start();"));
        assert!(code.contains("som.dac.Init(dac_cfg);"));
        assert!(code.contains("#include \"dev/oled_ssd130x.h\""));
    }

    #[test]
    fn test_idempotent_generation() {
        let desc = parse(
            r#"{
                "knobs": [{"pin": 21}],
                "switches": [{"pin": 5}],
                "displays": [{
                    "driver": "SSD130x",
                    "dimensions": "128x64",
                    "transport": "4WireSpi",
                    "pin_dc": 9,
                    "pin_reset": 30
                }]
            }"#,
        );
        let config = GeneratorConfig::with_defaults();
        let first = generate_board_support(&desc, &config);
        let second = generate_board_support(&desc, &config);
        assert_eq!(first, second, "generation must be byte-identical per run");
    }

    /// An empty document produces empty fragments for every kind at every
    /// phase, and a board-support struct with only the platform handle.
    #[test]
    fn test_empty_document() {
        let desc = HardwareDescription::default();
        for kind in PeripheralKind::COMPOSITION_ORDER {
            for phase in Phase::ALL {
                assert_eq!(
                    kind.generate(&desc, phase),
                    "",
                    "{kind:?} must contribute nothing at {phase:?} for an empty document"
                );
            }
        }

        let code = generate_board_support(&desc, &GeneratorConfig::with_defaults());
        println!("Generated code:\n{}", code);
        assert!(code.contains("struct ControlSurface {"));
        assert!(code.contains("daisy::DaisySeed som;"));
        assert!(code.contains("void ProcessAnalogControls() {"));
        assert!(code.contains("void ProcessDigitalControls() {"));
        assert!(code.contains("void ProcessAllControls() {"));
        assert!(code.contains("void UpdateLeds() {"));
        assert!(!code.contains("controls["));
        assert!(!code.contains("GetPin("));
    }

    /// Panel knobs and CV inputs share one array: knobs first, CV inputs
    /// after, and the declared size is the merged count.
    #[test]
    fn test_analog_merge_order_and_count() {
        let code = generate(
            r#"{
                "knobs": [{"pin": 21}, {"pin": 22}],
                "cv_inputs": [{"pin": 15}]
            }"#,
        );
        assert!(code.contains("daisy::AnalogControl controls[3];"));
        assert!(code.contains("adc_cfg[0].InitSingle(som.GetPin(21));"));
        assert!(code.contains("adc_cfg[1].InitSingle(som.GetPin(22));"));
        assert!(code.contains("adc_cfg[2].InitSingle(som.GetPin(15));"));
        assert!(code.contains("som.adc.Init(adc_cfg, 3);"));
        assert_eq!(code.matches(".Process();").count(), 3);
    }

    /// The converter is batch-initialized after the channel configs, the
    /// wrappers bind after the converter, and sampling starts last.
    #[test]
    fn test_analog_init_sequence() {
        let code = generate(r#"{"knobs": [{"pin": 21, "flip": true, "invert": true}]}"#);
        let configs = code.find("adc_cfg[0].InitSingle").unwrap();
        let adc_init = code.find("som.adc.Init(adc_cfg, 1);").unwrap();
        let wrapper = code
            .find("controls[0].Init(som.adc.GetPtr(0), som.AudioCallbackRate(), true, true);")
            .unwrap();
        let start = code.find("som.adc.Start();").unwrap();
        assert!(configs < adc_init);
        assert!(adc_init < wrapper);
        assert!(wrapper < start);
    }

    /// Five CV outputs still produce exactly one fixed two-channel DAC
    /// bring-up, identical to what two entries produce.
    #[test]
    fn test_cv_output_truncation() {
        let five = generate(
            r#"{"cv_outputs": [{"pin": 23}, {"pin": 22}, {"pin": 63}, {"pin": 64}, {"pin": 65}]}"#,
        );
        let two = generate(r#"{"cv_outputs": [{"pin": 23}, {"pin": 22}]}"#);
        assert_eq!(five, two);
        assert_eq!(five.matches("som.dac.Init(dac_cfg);").count(), 1);
        assert!(five.contains("dac_cfg.bitdepth = daisy::DacHandle::BitDepth::BITS_12;"));
        assert!(five.contains("dac_cfg.buff_state = daisy::DacHandle::BufferState::ENABLED;"));
        assert!(five.contains("dac_cfg.mode = daisy::DacHandle::Mode::POLLING;"));
        assert!(five.contains("dac_cfg.chn = daisy::DacHandle::Channel::BOTH;"));
        // Per-entry attributes never reach the output.
        assert!(!five.contains("GetPin(63)"));
    }

    #[test]
    fn test_cv_output_absent_list_emits_nothing() {
        let code = generate("{}");
        assert!(!code.contains("dac_cfg"));
        assert!(!code.contains("som.dac.Init"));
    }

    #[test]
    fn test_switch_labels_bind_to_slots() {
        let code = generate(r#"{"switches": [{"pin": 1, "labels": ["foo"]}]}"#);
        assert!(code.contains("daisy::Switch switches[1];"));
        assert!(code.contains("daisy::Switch& foo = switches[0];"));
    }

    #[test]
    fn test_multiple_labels_per_entry() {
        let code = generate(
            r#"{"leds": [{"pin": 24, "labels": ["power", "status"]}, {"pin": 25, "labels": ["clip"]}]}"#,
        );
        assert!(code.contains("daisy::Led& power = leds[0];"));
        assert!(code.contains("daisy::Led& status = leds[0];"));
        assert!(code.contains("daisy::Led& clip = leds[1];"));
    }

    /// Labels are not checked for collisions; a duplicate alias is emitted
    /// twice and left to the downstream compiler.
    #[test]
    fn test_duplicate_labels_pass_through() {
        let code = generate(
            r#"{
                "leds": [{"pin": 24, "labels": ["go"]}],
                "switches": [{"pin": 5, "labels": ["go"]}]
            }"#,
        );
        assert!(code.contains("daisy::Led& go = leds[0];"));
        assert!(code.contains("daisy::Switch& go = switches[0];"));
    }

    #[test]
    fn test_switch_attributes_pass_through_verbatim() {
        let code = generate(
            r#"{"switches": [{"pin": 5, "kind": "TYPE_BANANA", "polarity": "POLARITY_NORMAL", "pull": "PULL_NONE"}]}"#,
        );
        assert!(code.contains(
            "switches[0].Init(som.GetPin(5), som.AudioCallbackRate(), \
             daisy::Switch::TYPE_BANANA, daisy::Switch::POLARITY_NORMAL, daisy::Switch::PULL_NONE);"
        ));
    }

    #[test]
    fn test_encoder_array_and_convenience_reference() {
        let code = generate(
            r#"{"encoders": [
                {"pin_a": 1, "pin_b": 2, "pin_click": 3, "labels": ["nav"]},
                {"pin_a": 6, "pin_b": 7, "pin_click": 8}
            ]}"#,
        );
        assert!(code.contains("daisy::Encoder encoders[2];"));
        assert!(code.contains("daisy::Encoder& nav = encoders[0];"));
        assert!(code.contains("daisy::Encoder& encoder = encoders[0];"));
        assert!(code.contains(
            "encoders[0].Init(som.GetPin(1), som.GetPin(2), som.GetPin(3), som.AudioCallbackRate());"
        ));
        assert_eq!(code.matches(".Debounce();").count(), 2);
    }

    /// Gate inputs resolve one transient pin handle that is rebound per
    /// entry rather than declared as a handle array.
    #[test]
    fn test_gate_input_handle_rebinding() {
        let code = generate(r#"{"gate_inputs": [{"pin": 14}, {"pin": 15}]}"#);
        assert_eq!(code.matches("dsy_gpio_pin gate_pin").count(), 1);
        assert!(code.contains("dsy_gpio_pin gate_pin = som.GetPin(14);"));
        assert!(code.contains("gate_pin = som.GetPin(15);"));
        assert!(code.contains("gate_inputs[0].Init(&gate_pin);"));
        assert!(code.contains("gate_inputs[1].Init(&gate_pin);"));
    }

    /// Gate outputs and MIDI handlers are accepted by the schema but must
    /// never produce a fragment at any phase.
    #[test]
    fn test_placeholder_kinds_stay_empty() {
        let desc = parse(
            r#"{
                "gate_outputs": [{"pin": 17}, {"pin": 18}],
                "midi": [{"pin_rx": 36, "pin_tx": 37}]
            }"#,
        );
        for kind in [PeripheralKind::GateOutput, PeripheralKind::MidiHandler] {
            for phase in Phase::ALL {
                assert_eq!(
                    kind.generate(&desc, phase),
                    "",
                    "{kind:?} is reserved and must stay empty at {phase:?}"
                );
            }
        }

        // The whole artifact is indistinguishable from an empty document.
        let config = GeneratorConfig::with_defaults();
        let with_placeholders = generate_board_support(&desc, &config);
        let empty = generate_board_support(&HardwareDescription::default(), &config);
        assert_eq!(with_placeholders, empty);
    }

    /// First display member is unsuffixed, later ones carry their index.
    #[test]
    fn test_display_member_naming() {
        let code = generate(
            r#"{"displays": [
                {"driver": "SSD130x", "dimensions": "128x64", "transport": "4WireSpi",
                 "pin_dc": 9, "pin_reset": 30},
                {"driver": "SSD130x", "dimensions": "64x32", "transport": "4WireSpi",
                 "pin_dc": 10, "pin_reset": 31}
            ]}"#,
        );
        assert!(code.contains("daisy::OledDisplay<daisy::SSD130x4WireSpi128x64Driver> display;"));
        assert!(code.contains("daisy::OledDisplay<daisy::SSD130x4WireSpi64x32Driver> display1;"));
        assert!(code.contains("display.Init(display_cfg);"));
        assert!(code.contains("display1.Init(display1_cfg);"));
    }

    #[test]
    fn test_display_driver_typename_derivation() {
        let code = generate(
            r#"{"displays": [{
                "driver": "SSD130x",
                "dimensions": "128x64",
                "transport": "I2c",
                "address": 60,
                "peripheral": "I2C_1",
                "speed": "I2C_400KHZ",
                "pin_scl": 11,
                "pin_sda": 12
            }]}"#,
        );
        assert!(code.contains("daisy::OledDisplay<daisy::SSD130xI2c128x64Driver> display;"));
    }

    #[test]
    fn test_display_i2c_transport_config() {
        let code = generate(
            r#"{"displays": [{
                "driver": "SSD130x",
                "dimensions": "128x64",
                "transport": "I2c",
                "address": 60,
                "peripheral": "I2C_1",
                "speed": "I2C_400KHZ",
                "pin_scl": 11,
                "pin_sda": 12
            }]}"#,
        );
        assert!(code.contains("display_cfg.driver_config.transport_config.i2c_address = 60;"));
        assert!(code.contains(
            "display_cfg.driver_config.transport_config.i2c_config.periph = \
             daisy::I2CHandle::Config::Peripheral::I2C_1;"
        ));
        assert!(code.contains(
            "display_cfg.driver_config.transport_config.i2c_config.speed = \
             daisy::I2CHandle::Config::Speed::I2C_400KHZ;"
        ));
        assert!(code
            .contains("display_cfg.driver_config.transport_config.i2c_config.pin_config.scl = som.GetPin(11);"));
        assert!(code
            .contains("display_cfg.driver_config.transport_config.i2c_config.pin_config.sda = som.GetPin(12);"));
    }

    #[test]
    fn test_display_spi_transport_config() {
        let code = generate(
            r#"{"displays": [{
                "driver": "SSD130x",
                "dimensions": "128x64",
                "transport": "4WireSpi",
                "pin_dc": 9,
                "pin_reset": 30
            }]}"#,
        );
        assert!(code
            .contains("display_cfg.driver_config.transport_config.pin_config.dc = som.GetPin(9);"));
        assert!(code.contains(
            "display_cfg.driver_config.transport_config.pin_config.reset = som.GetPin(30);"
        ));
    }

    /// The OLED header is included once if any display uses the SSD130x
    /// family, and not at all otherwise.
    #[test]
    fn test_display_conditional_include() {
        let with_oled = generate(
            r#"{"displays": [
                {"driver": "SSD130x", "dimensions": "128x64", "transport": "4WireSpi",
                 "pin_dc": 9, "pin_reset": 30},
                {"driver": "SSD130x", "dimensions": "64x32", "transport": "4WireSpi",
                 "pin_dc": 10, "pin_reset": 31}
            ]}"#,
        );
        assert_eq!(
            with_oled.matches("#include \"dev/oled_ssd130x.h\"").count(),
            1
        );

        let other_family = generate(
            r#"{"displays": [{"driver": "SH1106", "dimensions": "128x64", "transport": "4WireSpi",
                "pin_dc": 9, "pin_reset": 30}]}"#,
        );
        assert!(!other_family.contains("oled_ssd130x.h"));
        assert!(other_family.contains("#include \"daisy_seed.h\""));
    }

    /// Declarations appear in the fixed composition order regardless of the
    /// document's key order.
    #[test]
    fn test_declaration_composition_order() {
        let code = generate(
            r#"{
                "switches": [{"pin": 5}],
                "rgb_leds": [{"pin_red": 25, "pin_green": 26, "pin_blue": 27}],
                "displays": [{"driver": "SSD130x", "dimensions": "128x64", "transport": "4WireSpi",
                              "pin_dc": 9, "pin_reset": 30}],
                "leds": [{"pin": 24}],
                "gate_inputs": [{"pin": 14}],
                "encoders": [{"pin_a": 1, "pin_b": 2, "pin_click": 3}],
                "knobs": [{"pin": 21}]
            }"#,
        );
        let positions = [
            code.find("daisy::AnalogControl controls[").unwrap(),
            code.find("daisy::Encoder encoders[").unwrap(),
            code.find("daisy::GateIn gate_inputs[").unwrap(),
            code.find("daisy::Led leds[").unwrap(),
            code.find("daisy::OledDisplay<").unwrap(),
            code.find("daisy::RgbLed rgb_leds[").unwrap(),
            code.find("daisy::Switch switches[").unwrap(),
        ];
        for pair in positions.windows(2) {
            assert!(
                pair[0] < pair[1],
                "declarations out of composition order:\n{code}"
            );
        }
        // The platform core handle comes before every peripheral member.
        assert!(code.find("daisy::DaisySeed som;").unwrap() < positions[0]);
    }

    /// LED updates live in the illumination routine, which is not invoked
    /// from ProcessAllControls.
    #[test]
    fn test_illumination_routine_is_separate() {
        let code = generate(
            r#"{
                "leds": [{"pin": 24}],
                "rgb_leds": [{"pin_red": 25, "pin_green": 26, "pin_blue": 27}],
                "encoders": [{"pin_a": 1, "pin_b": 2, "pin_click": 3}]
            }"#,
        );
        let update_leds = code.find("void UpdateLeds() {").unwrap();
        assert!(code.find("leds[0].Update();").unwrap() > update_leds);
        assert!(code.find("rgb_leds[0].Update();").unwrap() > update_leds);
        assert!(!code.contains("UpdateLeds();"), "illumination update must not be chained");

        let digital = code.find("void ProcessDigitalControls() {").unwrap();
        assert!(code.find("encoders[0].Debounce();").unwrap() > digital);
    }

    #[test]
    fn test_from_json_entry_point() {
        let code = generate_board_support_from_json(r#"{"name": "Rig", "knobs": [{"pin": 21}]}"#)
            .unwrap();
        assert!(code.contains("struct Rig {"));

        let err = generate_board_support_from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("hardware description"));
    }

    #[test]
    fn test_from_json_with_config_overrides_name() {
        let config = GeneratorConfig::with_defaults().struct_name("DeskPanel");
        let code = generate_board_support_from_json_with_config(
            r#"{"name": "Rig", "knobs": [{"pin": 21}]}"#,
            &config,
        )
        .unwrap();
        assert!(code.contains("struct DeskPanel {"));
        assert!(!code.contains("struct Rig {"));
    }
}
