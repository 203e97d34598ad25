//! Integration tests for desktop-context construction and persistence.
//!
//! These tests drive the public API the way the surrounding application does:
//! snapshot a desktop from providers, save it through a writer, and reload it
//! into a fresh instance, asserting the round trip preserves the observable
//! configuration.

use std::rc::Rc;

use gridline_core::{
    DesktopId, FPoint, FSize, LinearUnitsId, AngularUnitsId, MemoryLogWriter, PositionDesktop,
    ScreenProvider, UnitsProvider, UnitsSystem, XmlLogWriter, FORMAT_VERSION,
};
use mockall::mock;

mock! {
    pub Screen {}

    impl ScreenProvider for Screen {
        fn screen_size(&self) -> FSize;
        fn screen_count(&self) -> usize;
    }
}

/// A 1920x1080 single-screen provider.
fn screen() -> MockScreen {
    let mut screen = MockScreen::new();
    screen.expect_screen_size().return_const(FSize::new(1920.0, 1080.0));
    screen.expect_screen_count().return_const(1usize);
    screen
}

/// Asserts the canonical 8-4-4-4-12 hyphenated hex GUID shape.
fn assert_canonical_guid(s: &str) {
    let lengths: Vec<usize> = s.split('-').map(str::len).collect();
    assert_eq!(lengths, [8, 4, 4, 4, 12], "group lengths of {s:?}");
    assert!(
        s.chars().all(|c| c == '-' || c.is_ascii_hexdigit()),
        "non-hex digit in {s:?}"
    );
}

#[test]
fn test_fresh_desktop_has_provider_defaults_and_canonical_id() {
    let desktop = PositionDesktop::new(Rc::new(UnitsSystem::new()), &screen());

    assert_eq!(desktop.linear_units().units_id(), LinearUnitsId::Pixels);
    assert_eq!(desktop.angular_units().units_id(), AngularUnitsId::Degrees);
    assert!(!desktop.is_invert_y());
    assert_eq!(desktop.origin(), FPoint::new(0.0, 0.0));
    assert_canonical_guid(&desktop.id().to_string());
    assert_eq!(desktop.custom_name(), "");
    assert_eq!(desktop.custom_abbrev(), "");
    assert_eq!(desktop.custom_basis(), "");
    assert_eq!(desktop.custom_factor(), 0.0);
}

#[test]
fn test_desktop_with_supplied_id_keeps_it_exactly() {
    let id = DesktopId::new();

    let desktop = PositionDesktop::with_id(id, Rc::new(UnitsSystem::new()), &screen());

    assert_eq!(desktop.id(), id);
    assert_eq!(desktop.linear_units().units_id(), LinearUnitsId::Pixels);
    assert_eq!(desktop.angular_units().units_id(), AngularUnitsId::Degrees);
}

#[test]
fn test_id_is_reassignable() {
    let first = DesktopId::new();
    let second = DesktopId::new();
    let mut desktop = PositionDesktop::with_id(first, Rc::new(UnitsSystem::new()), &screen());

    assert_eq!(desktop.id(), first);
    desktop.set_id(second);
    assert_eq!(desktop.id(), second);
}

#[test]
fn test_clones_share_identifier_and_content() {
    let desktop1 = PositionDesktop::new(Rc::new(UnitsSystem::new()), &screen());
    let desktop2 = desktop1.clone();
    let desktop3 = desktop1.clone();

    assert_eq!(desktop1.id(), desktop2.id());
    assert_eq!(desktop1.id(), desktop3.id());
    assert_eq!(desktop1, desktop2);
    assert_eq!(desktop1, desktop3);
}

#[test]
fn test_content_equality_ignores_identity_but_sees_origin() {
    let screen = screen();
    let units1 = UnitsSystem::new();
    let mut units2 = UnitsSystem::new();
    units2.set_origin(FPoint::new(2.0, 3.0));

    let desktop1 = PositionDesktop::new(Rc::new(units1), &screen);
    let desktop2 = desktop1.clone();
    let desktop3 = PositionDesktop::new(Rc::new(units2), &screen);

    assert_eq!(desktop1, desktop1);
    assert_eq!(desktop1, desktop2);
    assert_ne!(desktop1, desktop3);
}

#[test]
fn test_independently_built_desktops_with_same_state_are_equal() {
    let screen = screen();
    let desktop1 = PositionDesktop::new(Rc::new(UnitsSystem::new()), &screen);
    let desktop2 = PositionDesktop::new(Rc::new(UnitsSystem::new()), &screen);

    assert_ne!(desktop1.id(), desktop2.id());
    assert_eq!(desktop1, desktop2);
}

#[test]
fn test_save_load_round_trip_restores_configuration() {
    let mut units = UnitsSystem::new();
    units.set_origin(FPoint::new(2.0, 3.0));
    let units: Rc<dyn UnitsProvider> = Rc::new(units);
    let screen = screen();

    let desktop1 = PositionDesktop::new(Rc::clone(&units), &screen);
    let mut writer = MemoryLogWriter::new();
    desktop1.save(&mut writer, FORMAT_VERSION).expect("save");

    let mut desktop2 = PositionDesktop::new(Rc::clone(&units), &screen);
    desktop2
        .load(&writer.elements()[0])
        .expect("load of saved element");

    assert_eq!(desktop2.linear_units().units_id(), LinearUnitsId::Pixels);
    assert_eq!(desktop2.angular_units().units_id(), AngularUnitsId::Degrees);
    assert!(!desktop2.is_invert_y());
    assert_eq!(desktop2.origin(), FPoint::new(2.0, 3.0));
    assert_canonical_guid(&desktop2.id().to_string());
    assert_eq!(desktop2.custom_name(), "");
    assert_eq!(desktop2.custom_abbrev(), "");
    assert_eq!(desktop2.custom_basis(), "");
    assert_eq!(desktop2.custom_factor(), 0.0);
    assert_eq!(desktop2, desktop1);
}

#[test]
fn test_version_1_document_loads_under_current_version() {
    let units: Rc<dyn UnitsProvider> = Rc::new(UnitsSystem::new());
    let screen = screen();

    let mut desktop1 = PositionDesktop::new(Rc::clone(&units), &screen);
    desktop1.set_custom_name("furlong");
    desktop1.set_custom_factor(7920.0);

    // A version 1 document has no custom-units definition.
    let mut writer = MemoryLogWriter::new();
    desktop1.save(&mut writer, 1).expect("save at version 1");

    let mut desktop2 = PositionDesktop::new(Rc::clone(&units), &screen);
    desktop2.load(&writer.elements()[0]).expect("load");

    assert_eq!(desktop2.custom_name(), "");
    assert_eq!(desktop2.custom_factor(), 0.0);
    assert_eq!(desktop2.id(), desktop1.id());
}

#[test]
fn test_saved_document_renders_as_xml() {
    let units: Rc<dyn UnitsProvider> = Rc::new(UnitsSystem::new());
    let desktop = PositionDesktop::new(units, &screen());

    let mut writer = XmlLogWriter::new(Vec::new());
    desktop.save(&mut writer, FORMAT_VERSION).expect("save");

    let text = String::from_utf8(writer.into_inner()).expect("utf-8 output");
    assert!(text.starts_with(&format!("<desktop id=\"{}\">\n", desktop.id())));
    assert!(text.contains("<units angle=\"deg\" length=\"px\"/>"));
    assert!(text.contains("invertY=\"false\""));
    assert!(text.ends_with("</desktop>\n"));
}
