use crate::common::schema::ColumnSchema;
use crate::translate::substitutions::TypeSubstitutions;
use crate::translate::types::TypeTag;

/// Casing applied to every column name before any type rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    Uppercase,
    Lowercase,
    Unchanged,
}

/// Declared-length handling for string-family columns. `Current` keeps
/// whatever the source declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPolicy {
    Current,
    Fixed(u32),
}

#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub case_policy: CasePolicy,
    pub length_policy: LengthPolicy,
    pub substitutions: TypeSubstitutions,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig {
            case_policy: CasePolicy::Uppercase,
            length_policy: LengthPolicy::Current,
            substitutions: TypeSubstitutions::default(),
        }
    }
}

/// Map one source column to its target form. Purely a function of its
/// inputs: casing first, then type substitution (which discards the
/// source length), then the length override for string-family types.
/// Unrecognized types that are neither string-family nor substituted pass
/// through unchanged; the target may still reject them at execution time.
pub fn translate(column: &ColumnSchema, config: &TranslationConfig) -> ColumnSchema {
    let name = match config.case_policy {
        CasePolicy::Uppercase => column.name.to_uppercase(),
        CasePolicy::Lowercase => column.name.to_lowercase(),
        CasePolicy::Unchanged => column.name.clone(),
    };

    if let Some(substitute) = config.substitutions.get(&column.type_tag) {
        return ColumnSchema::new(name, substitute.to_type.clone(), substitute.length);
    }

    let length = match config.length_policy {
        LengthPolicy::Fixed(length) if column.type_tag.is_string_family() => Some(length),
        _ => column.length,
    };

    ColumnSchema::new(name, column.type_tag.clone(), length)
}

/// Translate a whole column list, preserving order.
pub fn translate_columns(columns: &[ColumnSchema], config: &TranslationConfig) -> Vec<ColumnSchema> {
    columns
        .iter()
        .map(|column| translate(column, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::substitutions::MAX_VARCHAR_LENGTH;

    fn column(name: &str, tag: TypeTag, length: Option<u32>) -> ColumnSchema {
        ColumnSchema::new(name, tag, length)
    }

    #[test]
    fn substitution_discards_source_length() {
        let config = TranslationConfig::default();

        let clob = translate(&column("note", TypeTag::Clob, Some(2000)), &config);
        assert_eq!(clob.type_tag, TypeTag::Varchar);
        assert_eq!(clob.length, Some(MAX_VARCHAR_LENGTH));

        let seconddate = translate(&column("ts", TypeTag::SecondDate, Some(7)), &config);
        assert_eq!(seconddate.type_tag, TypeTag::Timestamp);
        assert_eq!(seconddate.length, None);
    }

    #[test]
    fn fixed_length_applies_only_to_string_family() {
        let config = TranslationConfig {
            length_policy: LengthPolicy::Fixed(500),
            ..TranslationConfig::default()
        };

        let name = translate(&column("NAME", TypeTag::Nvarchar, Some(60)), &config);
        assert_eq!(name.length, Some(500));

        let amount = translate(&column("AMOUNT", TypeTag::Decimal, None), &config);
        assert_eq!(amount.length, None);
    }

    #[test]
    fn current_length_is_preserved() {
        let config = TranslationConfig::default();
        let translated = translate(&column("CODE", TypeTag::Varchar, Some(12)), &config);
        assert_eq!(translated.length, Some(12));
    }

    #[test]
    fn case_policy_applies_to_every_column() {
        let columns = vec![
            column("mandt", TypeTag::Varchar, Some(3)),
            column("MatNr", TypeTag::Nvarchar, Some(40)),
        ];

        let upper = translate_columns(&columns, &TranslationConfig::default());
        assert_eq!(upper[0].name, "MANDT");
        assert_eq!(upper[1].name, "MATNR");

        let lower_config = TranslationConfig {
            case_policy: CasePolicy::Lowercase,
            ..TranslationConfig::default()
        };
        let lower = translate_columns(&columns, &lower_config);
        assert_eq!(lower[0].name, "mandt");
        assert_eq!(lower[1].name, "matnr");

        let unchanged_config = TranslationConfig {
            case_policy: CasePolicy::Unchanged,
            ..TranslationConfig::default()
        };
        let unchanged = translate_columns(&columns, &unchanged_config);
        assert_eq!(unchanged[1].name, "MatNr");
    }

    #[test]
    fn unrecognized_type_passes_through() {
        let config = TranslationConfig {
            length_policy: LengthPolicy::Fixed(100),
            ..TranslationConfig::default()
        };
        let geometry = column("SHAPE", TypeTag::Other("ST_GEOMETRY".to_string()), None);
        let translated = translate(&geometry, &config);
        assert_eq!(translated.type_tag, geometry.type_tag);
        assert_eq!(translated.length, None);
    }

    #[test]
    fn translation_preserves_column_order() {
        let columns = vec![
            column("A", TypeTag::Integer, None),
            column("B", TypeTag::Clob, None),
            column("C", TypeTag::Date, None),
        ];
        let translated = translate_columns(&columns, &TranslationConfig::default());
        let names: Vec<&str> = translated.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
