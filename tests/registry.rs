// tests/registry.rs
use listing_updater::attributes::{
    catalog::{FACT_PARSERS, ID_FIELD},
    Derivation, FactParserSet, FieldDef, FieldKind, Registry,
};
use listing_updater::Error;

fn first(inputs: &[&str]) -> String {
    inputs.first().map(|s| s.to_string()).unwrap_or_default()
}

#[test]
fn every_name_looks_up_to_itself() {
    let reg = Registry::standard().unwrap();
    for def in reg.iter() {
        let found = reg.lookup(def.name()).unwrap();
        assert_eq!(found.name(), def.name());
        assert_eq!(found.rank(), def.rank());
    }
    assert!(reg.lookup("no_such_field").is_none());
}

#[test]
fn ranked_is_non_decreasing_and_starts_with_id() {
    let reg = Registry::standard().unwrap();
    let ranks: Vec<f64> = reg.ranked().map(|d| d.rank()).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(reg.names_ranked()[0], ID_FIELD);
    assert_eq!(reg.column_of(ID_FIELD), Some(0));
}

#[test]
fn fact_fields_are_registered() {
    let reg = Registry::standard().unwrap();
    for (name, _, rank) in FACT_PARSERS {
        assert_eq!(reg.lookup(name).map(|d| d.rank()), Some(*rank), "{name}");
    }
    assert!(FactParserSet::standard(&reg).is_ok());
}

#[test]
fn equal_ranks_keep_declaration_order() {
    let reg = Registry::new(vec![
        FieldDef::new_static("b", 2.0),
        FieldDef::new_static("a", 1.0),
        FieldDef::new_static("c", 2.0),
    ])
    .unwrap();
    assert_eq!(reg.names_ranked(), vec!["a", "b", "c"]);
}

#[test]
fn duplicate_name_is_rejected() {
    let err = Registry::new(vec![
        FieldDef::new_static("price", 3.0),
        FieldDef::new_static("price", 4.0),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateField(name) if name == "price"));
}

#[test]
fn derived_input_must_exist() {
    let d = Derivation { inputs: &["price", "sqft"], compute: first };
    let err = Registry::new(vec![
        FieldDef::new_static("price", 3.0),
        FieldDef::new_derived("ratio", 101.0, d),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::UnknownDerivedInput { ref input, .. } if input == "sqft"));
}

#[test]
fn derived_kind_is_exposed() {
    let reg = Registry::standard().unwrap();
    let derived: Vec<&str> = reg.derived().map(|d| d.name()).collect();
    assert_eq!(derived, vec!["price_indoor_sqft", "price_lot_sqft"]);
    assert!(matches!(reg.lookup("price").unwrap().kind(), FieldKind::Static));
}

