use std::fmt;

/// Symbolic column type. Portable tags render directly into target DDL;
/// the HANA-only tags (`SecondDate`, `Clob`, `Nclob`) exist to be caught
/// by the substitution table. Anything the source reports that we do not
/// recognize is carried as `Other` and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Varchar,
    Nvarchar,
    Char,
    Nchar,
    Integer,
    SmallInt,
    BigInt,
    Decimal,
    Real,
    Double,
    Date,
    Time,
    Timestamp,
    Boolean,
    Binary,
    SecondDate,
    Clob,
    Nclob,
    Other(String),
}

impl TypeTag {
    /// Parse the type name reported by the source catalog. Unknown names
    /// are preserved as-is rather than rejected.
    pub fn parse(name: &str) -> TypeTag {
        match name.trim().to_uppercase().as_str() {
            "VARCHAR" => TypeTag::Varchar,
            "NVARCHAR" => TypeTag::Nvarchar,
            "CHAR" => TypeTag::Char,
            "NCHAR" => TypeTag::Nchar,
            "INTEGER" | "INT" => TypeTag::Integer,
            "SMALLINT" => TypeTag::SmallInt,
            "BIGINT" => TypeTag::BigInt,
            "DECIMAL" | "NUMERIC" => TypeTag::Decimal,
            "REAL" => TypeTag::Real,
            "DOUBLE" => TypeTag::Double,
            "DATE" => TypeTag::Date,
            "TIME" => TypeTag::Time,
            "TIMESTAMP" => TypeTag::Timestamp,
            "BOOLEAN" => TypeTag::Boolean,
            "VARBINARY" | "BINARY" => TypeTag::Binary,
            "SECONDDATE" => TypeTag::SecondDate,
            "CLOB" => TypeTag::Clob,
            "NCLOB" => TypeTag::Nclob,
            other => TypeTag::Other(other.to_string()),
        }
    }

    /// String-family types are the ones whose declared length the
    /// `column_length` override applies to.
    pub fn is_string_family(&self) -> bool {
        matches!(
            self,
            TypeTag::Varchar | TypeTag::Nvarchar | TypeTag::Char | TypeTag::Nchar
        )
    }

    /// SQL keyword used in the rendered target DDL.
    pub fn sql_name(&self) -> &str {
        match self {
            TypeTag::Varchar => "VARCHAR",
            TypeTag::Nvarchar => "NVARCHAR",
            TypeTag::Char => "CHAR",
            TypeTag::Nchar => "NCHAR",
            TypeTag::Integer => "INTEGER",
            TypeTag::SmallInt => "SMALLINT",
            TypeTag::BigInt => "BIGINT",
            TypeTag::Decimal => "DECIMAL",
            TypeTag::Real => "REAL",
            TypeTag::Double => "DOUBLE",
            TypeTag::Date => "DATE",
            TypeTag::Time => "TIME",
            TypeTag::Timestamp => "TIMESTAMP",
            TypeTag::Boolean => "BOOLEAN",
            TypeTag::Binary => "BINARY",
            TypeTag::SecondDate => "SECONDDATE",
            TypeTag::Clob => "CLOB",
            TypeTag::Nclob => "NCLOB",
            TypeTag::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}
