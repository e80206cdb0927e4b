//! Label sanitization vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use rollcall_core::label::{sanitize, Label};

#[derive(Debug, Deserialize)]
struct LabelVector {
    description: String,
    raw: String,
    label: String,
}

fn load(name: &str) -> Vec<LabelVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn label_vectors() {
    for v in load("labels.json") {
        assert_eq!(sanitize(&v.raw), v.label, "{}", v.description);
        assert_eq!(Label::from_raw(&v.raw).as_str(), v.label, "{}", v.description);
    }
}

fn sample_inputs() -> Vec<String> {
    let mut out: Vec<String> = vec![
        String::new(),
        " ".into(),
        "\t\r\n".into(),
        "[Admin] Bob".into(),
        "名前".into(),
        "\u{0}\u{7f}".into(),
        "\u{1F600}\u{1F600}".into(),
    ];
    // every single code point in the BMP ascii/latin-1 range plus a few planes
    for c in (0u32..0x300).chain(0x1F300..0x1F310).filter_map(char::from_u32) {
        out.push(c.to_string());
        out.push(format!("a{c}b"));
    }
    out
}

#[test]
fn output_alphabet_and_length() {
    for raw in sample_inputs() {
        let s = sanitize(&raw);
        assert!(
            s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "bad char in {s:?} from {raw:?}"
        );
        assert_eq!(s.chars().count(), raw.chars().count(), "length changed for {raw:?}");
    }
}

#[test]
fn deterministic() {
    for raw in sample_inputs() {
        assert_eq!(sanitize(&raw), sanitize(&raw));
    }
}
