use cssvars::calls::{ColorCallDef, ColorCallSet, ColorFnCall};
use cssvars::generator::{ColorGenerator, ColorUpdater, ResolvedVariable};
use cssvars::types::{ColorFn, ColorValue};
use std::collections::HashMap;

fn black_calls() -> Vec<ColorFnCall> {
    vec![
        ColorFnCall::new(ColorFn::AdjustHue, "42deg")
            .compose(ColorFnCall::new(ColorFn::Lighten, "4200")),
        ColorFnCall::bare(ColorFn::ColorInvert),
    ]
}

fn call_set(value: impl Into<ColorValue>) -> ColorCallSet {
    let def = black_calls()
        .into_iter()
        .fold(ColorCallDef::new(value), ColorCallDef::with_call);
    ColorCallSet::new().with_color("black", def)
}

fn expected() -> Vec<ResolvedVariable> {
    vec![
        ResolvedVariable::new("--black", "rgb(82, 145, 163)"),
        ResolvedVariable::new("--black--42deg--adjusthue--4200--lighten", "rgb(221, 222, 238)"),
        ResolvedVariable::new("--black--color-invert", "rgb(255, 255, 255)"),
    ]
}

#[test]
fn test_updated_vars_for_all_calls() {
    // The stored value is replaced by the one passed in.
    let updater = ColorUpdater::new(call_set(ColorValue::hsl(42.0, 42.0, 42.0)));
    let vars = updater.get_updated_vars("black", "#5291a3").unwrap();
    assert_eq!(vars, expected());
}

#[test]
fn test_updated_vars_accept_structured_values() {
    let updater = ColorUpdater::new(call_set("#000"));
    let vars = updater
        .get_updated_vars("black", ColorValue::rgb(82.0, 145.0, 163.0))
        .unwrap();
    assert_eq!(vars, expected());
}

#[test]
fn test_update_sets_properties_in_order() {
    let updater = ColorUpdater::new(call_set("#000"));
    let mut recorded: Vec<ResolvedVariable> = Vec::new();
    updater
        .update_vars_in_document("black", "#5291a3", &mut recorded)
        .unwrap();
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded, expected());

    let mut style: HashMap<String, String> = HashMap::new();
    updater
        .update_vars_in_document("black", "#5291a3", &mut style)
        .unwrap();
    assert_eq!(style["--black--color-invert"], "rgb(255, 255, 255)");
}

#[test]
fn test_base_variables_scaffold() {
    let generator = ColorGenerator::new(call_set("#5291a3"));
    let scaffold = generator.create_writable_sass_file_only_sass_base_variables();
    assert_eq!(scaffold, "$black: var(--black);\n");
    assert_eq!(
        generator.create_writable_sass_file_only_sass_base_variables(),
        scaffold
    );
}

#[test]
fn test_writable_sass_file() {
    let generator = ColorGenerator::new(call_set("#5291a3"));
    insta::assert_snapshot!(generator.create_writable_sass_file(Some(":root")).unwrap(), @r"
    :root {
      --black: rgb(82, 145, 163);
      --black--42deg--adjusthue--4200--lighten: rgb(221, 222, 238);
      --black--color-invert: rgb(255, 255, 255);
    }
    ");
    assert_eq!(
        generator.create_writable_sass_file(None).unwrap(),
        generator.create_writable_sass_file(Some(":root")).unwrap()
    );
}

#[test]
fn test_custom_block_wrapper() {
    let generator = ColorGenerator::new(call_set("#5291a3"));
    assert_eq!(
        generator
            .create_writable_sass_file(Some("[data-theme=\"dark\"]"))
            .unwrap(),
        concat!(
            "[data-theme=\"dark\"] {\n",
            "  --black: rgb(82, 145, 163);\n",
            "  --black--42deg--adjusthue--4200--lighten: rgb(221, 222, 238);\n",
            "  --black--color-invert: rgb(255, 255, 255);\n",
            "}"
        )
    );
}

#[test]
fn test_call_set_from_json() {
    let json = r##"{
        "black": {
            "value": "#5291a3",
            "calls": [
                { "fn": "adjusthue", "fnArg": "42deg",
                  "composeArg": { "fn": "lighten", "fnArg": "4200" } },
                { "fn": "color-invert", "fnArg": null }
            ]
        }
    }"##;
    let set: ColorCallSet = serde_json::from_str(json).unwrap();
    assert_eq!(ColorGenerator::new(set).resolved_variables().unwrap(), expected());
}
