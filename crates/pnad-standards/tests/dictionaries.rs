use proptest::prelude::*;

use pnad_standards::{DICTIONARIES, LabelLookup, MissingPolicy, dictionary};

#[test]
fn every_domain_code_maps_to_a_documented_label() {
    for dict in DICTIONARIES {
        for &(code, label) in dict.entries() {
            assert_eq!(
                dict.label(Some(code)),
                LabelLookup::Mapped(label),
                "{} code {code}",
                dict.name
            );
            assert!(!label.is_empty(), "{} has an empty label", dict.name);
        }
    }
}

#[test]
fn every_dictionary_has_a_non_empty_fallback() {
    for dict in DICTIONARIES {
        assert!(!dict.fallback().is_empty(), "{}", dict.name);
    }
}

#[test]
fn missing_input_follows_the_missing_policy() {
    for dict in DICTIONARIES {
        let lookup = dict.label(None);
        match dict.missing_policy() {
            MissingPolicy::Fallback => {
                assert_eq!(lookup, LabelLookup::Fallback(dict.fallback()), "{}", dict.name);
            }
            MissingPolicy::Missing => assert_eq!(lookup, LabelLookup::Missing, "{}", dict.name),
        }
    }
}

#[test]
fn dictionaries_serialize_with_their_domain() {
    let sex = dictionary("sex").unwrap();
    let json = serde_json::to_value(sex).unwrap();
    assert_eq!(json["source_variable"], "V2007");
    assert_eq!(json["fallback"], "NA");
    assert_eq!(json["missing"], "fallback");
    assert_eq!(json["entries"][0][1], "Male");
}

proptest! {
    #[test]
    fn codes_outside_the_domain_use_the_fallback(code in any::<i64>()) {
        for dict in DICTIONARIES {
            let lookup = dict.label(Some(code));
            if dict.is_in_domain(code) {
                prop_assert!(lookup.is_mapped());
            } else {
                prop_assert_eq!(lookup, LabelLookup::Fallback(dict.fallback()));
            }
            prop_assert!(lookup.as_str().is_some_and(|label| !label.is_empty()));
        }
    }

    #[test]
    fn negative_codes_are_never_mapped(code in i64::MIN..0) {
        for dict in DICTIONARIES {
            prop_assert!(!dict.label(Some(code)).is_mapped());
        }
    }
}
