//! The predeclared identifiers of the language.

/// Category of a predeclared identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predeclared {
    Type,
    Constant,
    Function,
}

/// Look up a predeclared identifier by spelling.
pub fn lookup(name: &str) -> Option<Predeclared> {
    match name {
        "bool" | "byte" | "complex64" | "complex128" | "error" | "float32" | "float64" | "int"
        | "int8" | "int16" | "int32" | "int64" | "rune" | "string" | "uint" | "uint8"
        | "uint16" | "uint32" | "uint64" | "uintptr" => Some(Predeclared::Type),
        "true" | "false" | "iota" | "nil" => Some(Predeclared::Constant),
        "append" | "cap" | "close" | "complex" | "copy" | "delete" | "imag" | "len" | "make"
        | "new" | "panic" | "print" | "println" | "real" | "recover" => {
            Some(Predeclared::Function)
        }
        _ => None,
    }
}

pub fn is_predeclared(name: &str) -> bool {
    lookup(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("int", Some(Predeclared::Type))]
    #[case("uintptr", Some(Predeclared::Type))]
    #[case("error", Some(Predeclared::Type))]
    #[case("nil", Some(Predeclared::Constant))]
    #[case("iota", Some(Predeclared::Constant))]
    #[case("recover", Some(Predeclared::Function))]
    #[case("println", Some(Predeclared::Function))]
    #[case("any", None)]
    #[case("Int", None)]
    #[case("", None)]
    fn lookup_categories(#[case] name: &str, #[case] expected: Option<Predeclared>) {
        assert_eq!(lookup(name), expected);
    }

    #[test]
    fn table_sizes() {
        let names = [
            "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int",
            "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16",
            "uint32", "uint64", "uintptr", "true", "false", "iota", "nil", "append", "cap",
            "close", "complex", "copy", "delete", "imag", "len", "make", "new", "panic", "print",
            "println", "real", "recover",
        ];
        let count = |kind| names.iter().filter(|n| lookup(n) == Some(kind)).count();
        assert_eq!(count(Predeclared::Type), 20);
        assert_eq!(count(Predeclared::Constant), 4);
        assert_eq!(count(Predeclared::Function), 15);
    }
}
