use std::collections::HashMap;

use crate::translate::types::TypeTag;

/// Widest VARCHAR the target dialect accepts; large-object source types
/// collapse into this.
pub const MAX_VARCHAR_LENGTH: u32 = 16_777_216;

/// Replacement for a source type the target dialect does not support.
/// The source-declared length is always discarded in favour of `length`.
#[derive(Debug, Clone)]
pub struct Substitute {
    pub to_type: TypeTag,
    pub length: Option<u32>,
}

/// Lookup table of source type tags that must be rewritten before DDL
/// rendering. Extending support for another unsupported type means adding
/// an entry here; the orchestrator never branches on individual tags.
#[derive(Debug, Clone)]
pub struct TypeSubstitutions {
    mappings: HashMap<TypeTag, Substitute>,
}

impl TypeSubstitutions {
    pub fn empty() -> Self {
        TypeSubstitutions {
            mappings: HashMap::new(),
        }
    }

    pub fn get(&self, tag: &TypeTag) -> Option<&Substitute> {
        self.mappings.get(tag)
    }

    pub fn insert(&mut self, from: TypeTag, to_type: TypeTag, length: Option<u32>) {
        self.mappings.insert(from, Substitute { to_type, length });
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }
}

impl Default for TypeSubstitutions {
    fn default() -> Self {
        let mut substitutions = TypeSubstitutions::empty();
        substitutions.insert(TypeTag::SecondDate, TypeTag::Timestamp, None);
        substitutions.insert(TypeTag::Nclob, TypeTag::Varchar, Some(MAX_VARCHAR_LENGTH));
        substitutions.insert(TypeTag::Clob, TypeTag::Varchar, Some(MAX_VARCHAR_LENGTH));
        substitutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_hana_specials() {
        let subs = TypeSubstitutions::default();
        assert_eq!(subs.len(), 3);

        let seconddate = subs.get(&TypeTag::SecondDate).unwrap();
        assert_eq!(seconddate.to_type, TypeTag::Timestamp);
        assert_eq!(seconddate.length, None);

        let clob = subs.get(&TypeTag::Clob).unwrap();
        assert_eq!(clob.to_type, TypeTag::Varchar);
        assert_eq!(clob.length, Some(MAX_VARCHAR_LENGTH));
    }

    #[test]
    fn table_is_extensible() {
        let mut subs = TypeSubstitutions::default();
        subs.insert(
            TypeTag::Other("ALPHANUM".to_string()),
            TypeTag::Varchar,
            Some(127),
        );
        let entry = subs.get(&TypeTag::Other("ALPHANUM".to_string())).unwrap();
        assert_eq!(entry.to_type, TypeTag::Varchar);
        assert_eq!(entry.length, Some(127));
    }
}
