#[cfg(test)]
mod tests {
    use crate::transpiler::parser::parse_source;
    use crate::transpiler::validation::{SchemaError, build_model, validate_schema};
    use anyhow::Result;

    #[test]
    fn test_uniform_records_produce_sorted_schema() -> Result<()> {
        let source = r#"
ListModel {
    ListElement { value: 1; name: "a" }
    ListElement { name: "b"; value: 2 }
}
        "#;

        let records = parse_source(source)?;
        let schema = validate_schema(&records)?;

        assert_eq!(schema.names(), &["name", "value"]);

        Ok(())
    }

    #[test]
    fn test_extra_property_is_reported() {
        let source = r#"
ListModel {
    ListElement { name: "a"; value: 1 }
    ListElement { name: "b"; value: 2; color: "red" }
}
        "#;

        let records = parse_source(source).unwrap();
        let result = validate_schema(&records);

        assert!(result.is_err(), "Extra property should be rejected");

        let error = result.unwrap_err();
        let error_msg = error.to_string();
        assert!(error_msg.contains("color"), "Error should name the property, got: {}", error_msg);

        match error.downcast_ref::<SchemaError>() {
            Some(SchemaError::Mismatch { element, line, missing, unexpected, .. }) => {
                assert_eq!(*element, 2);
                assert_eq!(*line, 4);
                assert!(missing.is_empty());
                assert_eq!(unexpected, &vec!["color".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_unexpected_properties() {
        let source = r#"
ListModel {
    ListElement { name: "a"; value: 1 }
    ListElement { name: "b"; value: 2 }
    ListElement { name: "c"; cost: 3 }
}
        "#;

        let records = parse_source(source).unwrap();
        let error = validate_schema(&records).unwrap_err();

        match error.downcast_ref::<SchemaError>() {
            Some(SchemaError::Mismatch { element, differing, missing, unexpected, .. }) => {
                assert_eq!(*element, 3);
                assert_eq!(differing, &vec!["cost".to_string(), "value".to_string()]);
                assert_eq!(missing, &vec!["value".to_string()]);
                assert_eq!(unexpected, &vec!["cost".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let error_msg = error.to_string();
        assert!(error_msg.contains("missing value"), "got: {}", error_msg);
        assert!(error_msg.contains("unexpected cost"), "got: {}", error_msg);
    }

    #[test]
    fn test_empty_first_element() {
        let source = "ListModel {\n    ListElement {}\n    ListElement { name: \"a\" }\n}\n";

        let records = parse_source(source).unwrap();
        let error = validate_schema(&records).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<SchemaError>(),
            Some(SchemaError::EmptySchema { line: 2 })
        ));
    }

    #[test]
    fn test_single_record_single_property() -> Result<()> {
        let source = "ListModel {\n    ListElement { only: 42 }\n}\n";

        let model = build_model("Single", parse_source(source)?)?;

        assert_eq!(model.schema.len(), 1);
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.rows(), vec![vec!["42"]]);

        Ok(())
    }
}
