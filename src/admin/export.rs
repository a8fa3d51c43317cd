use serde::Serialize;

/// Serialize rows to CSV. The header row comes from the record's field
/// names; zero rows produce an empty body with no header.
pub fn to_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        rating: i32,
        company: Option<String>,
    }

    #[test]
    fn header_is_derived_from_field_names() {
        let rows = vec![Row {
            name: "Asha".into(),
            rating: 5,
            company: None,
        }];
        let csv = to_csv(&rows).expect("serialize");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("name,rating,company"));
        assert_eq!(lines.next(), Some("Asha,5,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_input_produces_empty_body() {
        let rows: Vec<Row> = Vec::new();
        let csv = to_csv(&rows).expect("serialize");
        assert!(csv.is_empty());
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let rows = vec![Row {
            name: "Rao, Asha".into(),
            rating: 4,
            company: Some("Acme".into()),
        }];
        let csv = to_csv(&rows).expect("serialize");
        assert!(csv.contains("\"Rao, Asha\""));
    }
}
