use crate::js::{ConversionKind, Decode, ELEMENT_KEY, ElementRef, Encode, LEGACY_ELEMENT_KEY, Object, Shape, Value};

fn object(entries: &[(&str, &str)]) -> Value {
	let object: Object = entries.iter().map(|(key, id)| ((*key).to_owned(), Value::from(*id))).collect();
	Value::Object(object)
}

#[test]
fn encode_then_decode_preserves_identity() {
	let original = ElementRef::new("0f2c-11");
	let decoded = ElementRef::decode(&original.encode()).expect("element decodes");

	assert_eq!(decoded, original);
	assert_eq!(decoded.id(), "0f2c-11");
}

#[test]
fn legacy_and_dual_keys_are_accepted() {
	let legacy = object(&[(LEGACY_ELEMENT_KEY, "e1")]);
	let dual = object(&[(LEGACY_ELEMENT_KEY, "e1"), (ELEMENT_KEY, "e1")]);

	assert_eq!(ElementRef::decode(&legacy).expect("legacy decodes"), ElementRef::new("e1"));
	assert_eq!(ElementRef::decode(&dual).expect("dual decodes"), ElementRef::new("e1"));
}

#[test]
fn conflicting_or_extra_keys_are_not_elements() {
	let conflicting = object(&[(LEGACY_ELEMENT_KEY, "e1"), (ELEMENT_KEY, "e2")]);
	let extra = object(&[(ELEMENT_KEY, "e1"), ("name", "input")]);
	let plain = object(&[("id", "e1")]);

	for value in [conflicting, extra, plain] {
		assert_eq!(value.shape(), Shape::Object);
		let err = ElementRef::decode(&value).expect_err("not an element");
		assert_eq!(
			err.kind,
			ConversionKind::Mismatch {
				expected: "element reference",
				actual: Shape::Object,
			}
		);
	}
}

#[test]
fn non_string_identifier_is_rejected() {
	let mut object = Object::new();
	object.insert(ELEMENT_KEY.to_owned(), Value::I64(7));

	assert!(ElementRef::decode(&Value::Object(object)).is_err());
	assert!(ElementRef::decode(&Value::from("e1")).is_err());
}

#[test]
fn equality_is_by_identifier() {
	assert_eq!(ElementRef::new("a"), ElementRef::new(String::from("a")));
	assert_ne!(ElementRef::new("a"), ElementRef::new("b"));
}
