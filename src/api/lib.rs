#[cfg(test)]
mod tests {
    use crate::api::{ParseRequest, ParseResponse};
    use crate::error::Reason;
    use crate::model::{RawReference, ReferenceFields};
    use crate::parser::parse;

    #[test]
    fn test_request_accepts_text_reference() {
        let request: ParseRequest =
            serde_json::from_str(r#"{"reference": "the 2nd colour"}"#).unwrap();
        assert_eq!(request.reference, RawReference::from("the 2nd colour"));
    }

    #[test]
    fn test_request_accepts_structured_reference() {
        let request: ParseRequest =
            serde_json::from_str(r#"{"reference": {"factory": "colour", "index": 0}}"#).unwrap();
        assert_eq!(
            request.reference,
            RawReference::from(ReferenceFields::new().with_factory("colour").with_index(0))
        );
    }

    #[test]
    fn test_success_response_shape() {
        let response = ParseResponse {
            reference: Some(parse("colour: \"red\"", None).unwrap()),
            error: None,
            reason: None,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"reference": {"factory": "colour", "label": "red"}})
        );
    }

    #[test]
    fn test_error_response_shape() {
        let response = ParseResponse {
            reference: None,
            error: Some("factory or label required".to_string()),
            reason: Some(Reason::FactoryOrLabelRequired),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "error": "factory or label required",
                "reason": "factory_or_label_required"
            })
        );
    }
}
