use crate::generator::error::CodegenError;

/// A schema type lowered to its C++ representation: either a primitive-ish
/// simple value or a generated class.
#[derive(Clone, Debug)]
pub enum CppType {
    Simple(CppSimpleType),
    Complex(CppComplexType),
}

impl CppType {
    /// The C++ type spelled at member/argument positions.
    pub fn name(&self) -> String {
        match self {
            Self::Simple(simple) => simple.name(),
            Self::Complex(complex) => complex.name().to_string(),
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            Self::Simple(simple) => simple.is_list(),
            Self::Complex(_) => false,
        }
    }

    /// Statements producing a `_value` local from the current parse
    /// position (`_raw` text for simple values, `_child` node for classes).
    pub fn parsing_expression(&self) -> String {
        match self {
            Self::Simple(simple) => simple.parsing_expression(),
            Self::Complex(complex) => complex.parsing_expression(),
        }
    }

    /// Statements streaming `get_value` out through `_out`.
    pub fn writing_expression(&self, get_value: &str, element_name: &str) -> String {
        match self {
            Self::Simple(simple) => simple.writing_expression(get_value),
            Self::Complex(complex) => complex.writing_expression(get_value, element_name),
        }
    }
}

/// A simple value type: scalar C++ type name, the lexical-to-value
/// conversion template (`%s` is the raw string), and list/enum markers.
#[derive(Clone, Debug)]
pub struct CppSimpleType {
    type_name: String,
    parse_template: String,
    list: bool,
    enum_: bool,
}

impl CppSimpleType {
    pub fn new(
        type_name: impl Into<String>,
        parse_template: impl Into<String>,
        list: bool,
    ) -> Self {
        CppSimpleType {
            type_name: type_name.into(),
            parse_template: parse_template.into(),
            list,
            enum_: false,
        }
    }

    /// The lowering of an enumerated restriction: parsed through the
    /// generated `stringTo<Name>` converter.
    pub fn new_enum(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let parse_template = format!("stringTo{type_name}(%s)");
        CppSimpleType {
            type_name,
            parse_template,
            list: false,
            enum_: true,
        }
    }

    /// Derives the plural form of this type for `xs:list` lowerings.
    pub fn new_list_type(&self, source_name: &str) -> Result<Self, CodegenError> {
        if self.list {
            return Err(CodegenError::NestedList(source_name.to_string()));
        }
        Ok(CppSimpleType {
            type_name: self.type_name.clone(),
            parse_template: self.parse_template.clone(),
            list: true,
            enum_: self.enum_,
        })
    }

    pub fn is_list(&self) -> bool {
        self.list
    }

    pub fn is_enum(&self) -> bool {
        self.enum_
    }

    /// The scalar C++ type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The type at member/argument positions: vector-wrapped when plural.
    pub fn name(&self) -> String {
        if self.list {
            format!("std::vector<{}>", self.type_name)
        } else {
            self.type_name.clone()
        }
    }

    fn apply(&self, raw: &str) -> String {
        self.parse_template.replace("%s", raw)
    }

    pub fn parsing_expression(&self) -> String {
        if self.list {
            format!(
                "{} _value;\n{{\nstd::istringstream _stream(_raw);\nfor (std::string _token; _stream >> _token; ) {{\n_value.emplace_back({});\n}}\n}}\n",
                self.name(),
                self.apply("_token")
            )
        } else {
            format!("{} _value = {};\n", self.name(), self.apply("_raw"))
        }
    }

    fn scalar_writing_expression(&self, value: &str) -> String {
        if self.enum_ {
            format!("_out << toString({value});\n")
        } else if self.type_name == "bool" {
            format!("_out << ({value} ? \"true\" : \"false\");\n")
        } else {
            format!("_out << {value};\n")
        }
    }

    pub fn writing_expression(&self, get_value: &str) -> String {
        if self.list {
            format!(
                "{{\nbool _first = true;\nfor (const auto& _token : {}) {{\nif (!_first) {{\n_out << \" \";\n}}\n_first = false;\n{}}}\n}}\n",
                get_value,
                self.scalar_writing_expression("_token")
            )
        } else {
            self.scalar_writing_expression(get_value)
        }
    }
}

/// A generated class type; parsing and writing recurse into it.
#[derive(Clone, Debug)]
pub struct CppComplexType {
    name: String,
}

impl CppComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        CppComplexType { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parsing_expression(&self) -> String {
        format!("{} _value = {}::read(_child);\n", self.name, self.name)
    }

    pub fn writing_expression(&self, get_value: &str, element_name: &str) -> String {
        format!("{get_value}.write(_out, \"{element_name}\");\n")
    }
}

/// The closed table from XSD built-in local names to C++ lowerings.
pub fn predefined_type(name: &str) -> Result<CppSimpleType, CodegenError> {
    let lowered = match name {
        "string" | "token" | "normalizedString" | "language" | "ENTITY" | "ID" | "Name"
        | "NCName" | "NMTOKEN" | "anyURI" | "anyType" | "QName" | "NOTATION" | "IDREF" => {
            CppSimpleType::new("std::string", "%s", false)
        }
        "ENTITIES" | "NMTOKENS" | "IDREFS" => CppSimpleType::new("std::string", "%s", true),
        "date" | "dateTime" | "time" | "gDay" | "gMonth" | "gYear" | "gMonthDay" | "gYearMonth"
        | "duration" => CppSimpleType::new("std::string", "%s", false),
        "base64Binary" | "hexBinary" => CppSimpleType::new("std::string", "%s", false),
        "decimal" | "double" => CppSimpleType::new("double", "std::stod(%s)", false),
        "float" => CppSimpleType::new("float", "std::stof(%s)", false),
        "integer" | "negativeInteger" | "nonNegativeInteger" | "positiveInteger"
        | "nonPositiveInteger" | "long" => CppSimpleType::new("int64_t", "std::stoll(%s)", false),
        "unsignedLong" => CppSimpleType::new("uint64_t", "std::stoull(%s)", false),
        "int" => CppSimpleType::new("int", "std::stoi(%s)", false),
        "unsignedInt" => {
            CppSimpleType::new("unsigned int", "static_cast<unsigned int>(std::stoul(%s))", false)
        }
        "short" => CppSimpleType::new("short", "static_cast<short>(std::stoi(%s))", false),
        "unsignedShort" => CppSimpleType::new(
            "unsigned short",
            "static_cast<unsigned short>(std::stoi(%s))",
            false,
        ),
        "byte" => CppSimpleType::new("char", "static_cast<char>(std::stoi(%s))", false),
        "unsignedByte" => CppSimpleType::new(
            "unsigned char",
            "static_cast<unsigned char>(std::stoi(%s))",
            false,
        ),
        "boolean" => CppSimpleType::new("bool", "%s == \"true\"", false),
        _ => return Err(CodegenError::UnknownBuiltin(name.to_string())),
    };
    Ok(lowered)
}
