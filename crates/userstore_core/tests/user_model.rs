use mongodb::bson;
use userstore_core::{UserDocument, UserValidationError};

#[test]
fn new_sets_all_fields() {
    let doc = UserDocument::new("Aaa", 30, "AAA@mail.com");

    assert_eq!(doc.name, "Aaa");
    assert_eq!(doc.age, 30);
    assert_eq!(doc.email, "AAA@mail.com");
    assert!(!doc.is_empty());
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let doc = UserDocument::new("Aaa", 30, "AAA@mail.com");

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "name": "Aaa", "age": 30, "email": "AAA@mail.com" })
    );

    let stored = bson::to_document(&doc).unwrap();
    assert_eq!(stored.keys().collect::<Vec<_>>(), vec!["name", "age", "email"]);
    assert_eq!(stored.get_i32("age").unwrap(), 30);
}

#[test]
fn seed_record_decodes_with_default_fields() {
    let seed = bson::doc! { "_id": bson::oid::ObjectId::new(), "name": "initial" };

    let decoded: UserDocument = bson::from_document(seed).unwrap();
    assert_eq!(decoded, UserDocument::new("initial", 0, ""));
}

#[test]
fn empty_document_fails_validation_before_age() {
    let err = UserDocument::default().validate_for_write().unwrap_err();
    assert_eq!(err, UserValidationError::EmptyDocument);

    let err = UserDocument::new("Aaa", 0, "").validate_for_write().unwrap_err();
    assert_eq!(err, UserValidationError::InvalidAge(0));
}

#[test]
fn age_decodes_from_int32_int64_and_whole_double() {
    let stored = [
        bson::doc! { "name": "Aaa", "age": 30_i32, "email": "AAA@mail.com" },
        bson::doc! { "name": "Aaa", "age": 30_i64, "email": "AAA@mail.com" },
        bson::doc! { "name": "Aaa", "age": 30.0_f64, "email": "AAA@mail.com" },
    ];

    for record in stored {
        let decoded: UserDocument = bson::from_document(record).unwrap();
        assert_eq!(decoded, UserDocument::new("Aaa", 30, "AAA@mail.com"));
    }
}

#[test]
fn age_rejects_fractional_and_out_of_range_values() {
    let fractional = bson::doc! { "name": "Aaa", "age": 30.5_f64, "email": "AAA@mail.com" };
    assert!(bson::from_document::<UserDocument>(fractional).is_err());

    let too_large = bson::doc! { "name": "Aaa", "age": 3_000_000_000_i64, "email": "A@mail.com" };
    assert!(bson::from_document::<UserDocument>(too_large).is_err());

    let text = bson::doc! { "name": "Aaa", "age": "30", "email": "AAA@mail.com" };
    assert!(bson::from_document::<UserDocument>(text).is_err());
}

#[test]
fn age_decodes_from_json_number() {
    let decoded: UserDocument =
        serde_json::from_str(r#"{"name":"Aaa","age":30,"email":"AAA@mail.com"}"#).unwrap();
    assert_eq!(decoded.age, 30);
}
