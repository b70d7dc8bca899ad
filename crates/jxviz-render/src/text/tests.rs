use super::*;

#[test]
fn font_spec_parses_css_shorthand() {
    let font = FontSpec::parse("12px Consolas").unwrap();
    assert_eq!(font, FontSpec::default());

    let font = FontSpec::parse("bold 14px 'Courier New'").unwrap();
    assert_eq!(font.font_family, "Courier New");
    assert_eq!(font.font_size, 14.0);
    assert_eq!(font.to_string(), "14px Courier New");

    assert!(FontSpec::parse("Consolas").is_none());
    assert!(FontSpec::parse("0px Consolas").is_none());
    assert!(matches!(
        "12px".parse::<FontSpec>(),
        Err(Error::InvalidFont { .. })
    ));
}

#[test]
fn deterministic_width_scales_with_columns() {
    let measurer = DeterministicTextMeasurer::default();
    let font = FontSpec::default();

    let m = measurer.measure("abcd", &font);
    assert!((m.width - 4.0 * 12.0 * 0.55).abs() < 1e-9);
    assert_eq!(m.line_count, 1);

    assert_eq!(measurer.width("", &font), 0.0);
}

#[test]
fn wide_characters_take_two_columns() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.0,
    };
    let font = FontSpec {
        font_family: "Consolas".to_string(),
        font_size: 10.0,
    };
    assert_eq!(measurer.width("日本", &font), 20.0);
    assert_eq!(measurer.width("ab", &font), 10.0);
}

#[test]
fn multi_line_text_uses_widest_line() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.0,
    };
    let font = FontSpec {
        font_family: "Consolas".to_string(),
        font_size: 10.0,
    };
    let m = measurer.measure("ab\nabcdef\n", &font);
    assert_eq!(m.width, 30.0);
    assert_eq!(m.line_count, 3);
    assert_eq!(m.height, 30.0);
}
