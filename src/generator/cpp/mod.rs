//! The C++ backend: lowers the schema model to a pair of translation units
//! per concern (`<pkg>_enums.{h,cpp}` and `<pkg>.{h,cpp}`) containing enum
//! converters and non-validating reader/writer classes.

pub mod types;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::generator::code_writer::CodeWriter;
use crate::generator::error::CodegenError;
use crate::generator::naming::{self, UNKNOWN_ENUM};
use crate::xsd::{
    Attribute, AttributeGroup, ComplexType, ContentVariety, Element, ElementKind, Group, QName,
    Restriction, Schema, SimpleType, TypeDefinition,
};

pub use types::{predefined_type, CppComplexType, CppSimpleType, CppType};

macro_rules! w {
    ($dst:expr, $($arg:tt)*) => {
        $dst.print(&format!($($arg)*))
    };
}

/// Backend configuration assembled by the driver from the CLI.
#[derive(Clone, Debug)]
pub struct CppGenConfig {
    /// Dot-separated package name; becomes the nested namespace and the
    /// output file name stem.
    pub package: String,
    /// Also emit writing code.
    pub writer: bool,
    /// Populate the enums file pair.
    pub gen_enums: bool,
    /// Populate the parser file pair.
    pub gen_parser: bool,
    /// Use `isX()` instead of `getX()` for boolean members.
    pub boolean_getter: bool,
    /// Target tinyxml2 instead of libxml2 (no XInclude, no entity refs).
    pub use_tinyxml: bool,
    /// Restrict entrypoints to these root elements; `None` means all.
    pub root_elements: Option<Vec<String>>,
}

pub struct CppCodeGenerator<'a> {
    schema: &'a Schema,
    config: CppGenConfig,
    /// Whether any reachable complex type carries attributes; gates the
    /// `getXmlAttribute` helper.
    has_attr: bool,
    /// Memoized lowerings of named user simple types, keyed by local name.
    simple_type_map: HashMap<String, CppSimpleType>,
    enums_header: CodeWriter,
    enums_cpp: CodeWriter,
    parser_header: CodeWriter,
    parser_cpp: CodeWriter,
}

impl<'a> CppCodeGenerator<'a> {
    /// Validates the generated symbol space and eagerly lowers every named
    /// simple type. Fails on the first name collision or unresolvable type.
    pub fn new(schema: &'a Schema, config: CppGenConfig) -> Result<Self, CodegenError> {
        let mut name_set: HashSet<String> = HashSet::new();
        name_set.insert("XmlParser".to_string());
        let mut has_attr = false;
        for (type_name, type_def) in &schema.type_map {
            let generates_class = match type_def {
                TypeDefinition::Complex(_) => true,
                TypeDefinition::Simple(SimpleType::Restriction(restriction)) => {
                    !restriction.enums.is_empty()
                }
                _ => false,
            };
            if !generates_class {
                continue;
            }
            let name = naming::to_class_name(type_name)?;
            if !name_set.insert(name.clone()) {
                return Err(CodegenError::DuplicateClassName(name));
            }
            if let TypeDefinition::Complex(complex) = type_def {
                has_attr = has_attr || has_attribute(complex);
            }
        }
        for (element_name, element) in &schema.element_map {
            if let Some(TypeDefinition::Complex(complex)) = &element.type_def {
                let name = naming::to_class_name(element_name)?;
                if !name_set.insert(name.clone()) {
                    return Err(CodegenError::DuplicateClassName(name));
                }
                has_attr = has_attr || has_attribute(complex);
            }
        }

        let mut generator = CppCodeGenerator {
            schema,
            config,
            has_attr,
            simple_type_map: HashMap::new(),
            enums_header: CodeWriter::new(),
            enums_cpp: CodeWriter::new(),
            parser_header: CodeWriter::new(),
            parser_cpp: CodeWriter::new(),
        };
        for (type_name, type_def) in &schema.type_map {
            if matches!(type_def, TypeDefinition::Simple(_)) {
                let reference = QName::with_optional_namespace(None::<String>, type_name.clone());
                generator.parse_simple_type_reference(&reference, true)?;
            }
        }
        Ok(generator)
    }

    /// Emits the selected file pairs under `out_dir` (headers go to
    /// `out_dir/include`, which must already exist).
    pub fn print(&mut self, out_dir: &Path) -> Result<(), CodegenError> {
        let stem = self.config.package.replace('.', "_");
        let enums_header_name = format!("{stem}_enums.h");
        let parser_header_name = format!("{stem}.h");
        if self.config.gen_enums {
            self.enums_cpp = CodeWriter::to_file(out_dir.join(format!("{stem}_enums.cpp")));
            self.enums_header = CodeWriter::to_file(out_dir.join("include").join(&enums_header_name));
        }
        if self.config.gen_parser {
            self.parser_cpp = CodeWriter::to_file(out_dir.join(format!("{stem}.cpp")));
            self.parser_header =
                CodeWriter::to_file(out_dir.join("include").join(&parser_header_name));
        }

        let schema = self.schema;
        let enums: Vec<(String, &'a Restriction)> = {
            let mut enums = Vec::new();
            for (type_name, type_def) in &schema.type_map {
                if let TypeDefinition::Simple(SimpleType::Restriction(restriction)) = type_def {
                    if !restriction.enums.is_empty() {
                        enums.push((naming::to_class_name(type_name)?, restriction));
                    }
                }
            }
            enums
        };
        let has_enums = !enums.is_empty();

        let enums_guard = enums_header_name.to_uppercase().replace('.', "_");
        let parser_guard = parser_header_name.to_uppercase().replace('.', "_");
        w!(self.enums_header, "#ifndef {enums_guard}\n#define {enums_guard}\n\n");
        w!(self.enums_header, "#include <array>\n#include <string>\n\n");
        if has_enums {
            w!(self.enums_header, "#include <xsdc/XsdcSupport.h>\n\n");
        }

        w!(self.parser_header, "#ifndef {parser_guard}\n#define {parser_guard}\n\n");
        w!(
            self.parser_header,
            "#include <array>\n#include <map>\n#include <optional>\n#include <string>\n#include <vector>\n#include <sstream>\n"
        );
        if self.config.writer {
            w!(self.parser_header, "#include <iostream>\n");
        }
        w!(self.parser_header, "\n");
        self.print_guarded_includes();
        w!(self.parser_header, "\n#include \"{enums_header_name}\"\n\n");

        w!(self.enums_cpp, "#include <map>\n\n#include \"{enums_header_name}\"\n\n");
        w!(
            self.parser_cpp,
            "#define LOG_TAG \"{}\"\n#include \"{parser_header_name}\"\n\n",
            self.config.package
        );
        // Abort-with-message guard for optional access; active regardless
        // of NDEBUG.
        self.parser_cpp.print(
            "#include <assert.h>\n#ifndef __BIONIC__\n#define __assert2(f,n,fun,e) do { fprintf(stderr, \"%s:%d: %s: Assertion `%s' failed\", (f), (n), (fun), (e)); abort(); } while (false)\n#endif\n#define _xsdc_assert(e) do if (!(e)) __assert2(__FILE__, __LINE__, __PRETTY_FUNCTION__, #e); while (false)\n\n",
        );

        let namespace = self.namespace_tokens();
        for token in &namespace {
            w!(self.enums_header, "namespace {token} {{\n");
            w!(self.enums_cpp, "namespace {token} {{\n");
            w!(self.parser_header, "namespace {token} {{\n");
            w!(self.parser_cpp, "namespace {token} {{\n");
        }

        self.print_implementation_prelude();
        self.print_prototype()?;

        for (name, restriction) in &enums {
            self.print_enum(name, restriction)?;
        }
        for (type_name, type_def) in &schema.type_map {
            if let TypeDefinition::Complex(complex) = type_def {
                let name = naming::to_class_name(type_name)?;
                self.print_class(&name, "", complex)?;
            }
        }
        for (element_name, element) in &schema.element_map {
            if let Some(TypeDefinition::Complex(complex)) = &element.type_def {
                let name = naming::to_class_name(element_name)?;
                self.print_class(&name, "", complex)?;
            }
        }

        self.print_parser_entrypoints()?;
        if self.config.writer {
            self.print_writer_entrypoints()?;
        }

        for token in namespace.iter().rev() {
            w!(self.enums_header, "}} // {token}\n");
            w!(self.enums_cpp, "}} // {token}\n");
            w!(self.parser_header, "}} // {token}\n");
            w!(self.parser_cpp, "}} // {token}\n");
        }

        if has_enums {
            w!(
                self.enums_header,
                "\n//\n// global type declarations for package\n//\n\n"
            );
            w!(self.enums_header, "namespace android {{\nnamespace details {{\n");
            for (name, restriction) in &enums {
                self.print_enum_values(&namespace, name, restriction)?;
            }
            w!(
                self.enums_header,
                "}}  // namespace details\n}}  // namespace android\n\n"
            );
        }

        w!(self.parser_header, "#endif // {parser_guard}\n");
        w!(self.enums_header, "#endif // {enums_guard}\n");
        self.parser_cpp.close()?;
        self.parser_header.close()?;
        self.enums_cpp.close()?;
        self.enums_header.close()?;
        Ok(())
    }

    pub fn enums_header_contents(&self) -> &str {
        self.enums_header.contents()
    }

    pub fn enums_cpp_contents(&self) -> &str {
        self.enums_cpp.contents()
    }

    pub fn parser_header_contents(&self) -> &str {
        self.parser_header.contents()
    }

    pub fn parser_cpp_contents(&self) -> &str {
        self.parser_cpp.contents()
    }

    fn namespace_tokens(&self) -> Vec<String> {
        self.config
            .package
            .split('.')
            .filter(|token| !token.is_empty())
            .map(|token| {
                if token.starts_with(|c: char| c.is_ascii_digit()) {
                    format!("_{token}")
                } else {
                    token.to_string()
                }
            })
            .collect()
    }

    fn xml_node_type(&self) -> &'static str {
        if self.config.use_tinyxml {
            "tinyxml2::XMLElement"
        } else {
            "xmlNode"
        }
    }

    fn getter_prefix(&self, type_name: &str) -> &'static str {
        if type_name == "bool" && self.config.boolean_getter {
            "is"
        } else {
            "get"
        }
    }

    fn is_root(&self, element_name: &str) -> bool {
        match &self.config.root_elements {
            None => true,
            Some(roots) => roots.iter().any(|root| root == element_name),
        }
    }

    fn print_guarded_includes(&mut self) {
        let (lib_name, main_header, additional): (&str, &str, &[&str]) =
            if self.config.use_tinyxml {
                ("libtinyxml2", "tinyxml2.h", &[])
            } else {
                ("libxml2", "libxml/parser.h", &["libxml/xinclude.h"])
            };
        w!(self.parser_header, "#if __has_include(<{main_header}>)\n");
        w!(self.parser_header, "#include <{main_header}>\n");
        for header in additional {
            w!(self.parser_header, "#include <{header}>\n");
        }
        w!(self.parser_header, "#else\n");
        w!(
            self.parser_header,
            "#error Require {lib_name} library. Please add {lib_name} to shared_libs or static_libs\n"
        );
        w!(self.parser_header, "#endif\n");
    }

    /// Internal helpers of the implementation file. Everything here must
    /// precede the class method definitions that use it.
    fn print_implementation_prelude(&mut self) {
        if !self.config.use_tinyxml {
            self.parser_cpp.print(
                "template <class T>\nconstexpr void (*xmlDeleter)(T* t);\ntemplate <>\nconstexpr auto xmlDeleter<xmlDoc> = xmlFreeDoc;\ntemplate <>\nauto xmlDeleter<xmlChar> = [](xmlChar *s) { xmlFree(s); };\n\ntemplate <class T>\nconstexpr auto make_xmlUnique(T *t) {\nauto deleter = [](T *t) { xmlDeleter<T>(t); };\nreturn std::unique_ptr<T, decltype(deleter)>{t, deleter};\n}\n\n",
            );
        }
        if self.has_attr {
            w!(
                self.parser_cpp,
                "static std::string getXmlAttribute(const {} *cur, const char *attribute) {{\n",
                self.xml_node_type()
            );
            if self.config.use_tinyxml {
                self.parser_cpp.print(
                    "auto attrValue = cur->Attribute(attribute);\nif(attrValue == nullptr) {\nreturn \"\";\n}\nreturn std::string(attrValue);\n",
                );
            } else {
                self.parser_cpp.print(
                    "auto xmlValue = make_xmlUnique(xmlGetProp(cur, reinterpret_cast<const xmlChar*>(attribute)));\nif (xmlValue == nullptr) {\nreturn \"\";\n}\nstd::string value(reinterpret_cast<const char*>(xmlValue.get()));\nreturn value;\n",
                );
            }
            self.parser_cpp.print("}\n\n");
        }
        if self.config.writer {
            self.parser_cpp.print(
                "static int indentIndex = 0;\nstatic std::string printIndent() {\nstd::string s = \"\";\nfor (int index = 0; index < indentIndex; ++index) {\ns += \"    \";\n}\nreturn s;\n}\n\n",
            );
        }
    }

    /// Forward declarations for every generated class, so that recursive
    /// element containment resolves.
    fn print_prototype(&mut self) -> Result<(), CodegenError> {
        let schema = self.schema;
        for (type_name, type_def) in &schema.type_map {
            if matches!(type_def, TypeDefinition::Complex(_)) {
                w!(self.parser_header, "class {};\n", naming::to_class_name(type_name)?);
            }
        }
        for (element_name, element) in &schema.element_map {
            if matches!(&element.type_def, Some(TypeDefinition::Complex(_))) {
                w!(
                    self.parser_header,
                    "class {};\n",
                    naming::to_class_name(element_name)?
                );
            }
        }
        w!(self.parser_header, "\n");
        Ok(())
    }

    fn print_enum(&mut self, name: &str, restriction: &Restriction) -> Result<(), CodegenError> {
        w!(self.enums_header, "enum class {name} {{\n");
        w!(
            self.enums_cpp,
            "const std::map<std::string, {name}> {name}String {{\n"
        );
        w!(self.enums_header, "{UNKNOWN_ENUM} = -1,\n");
        for value in &restriction.enums {
            let member = naming::to_enum_name(value)?;
            w!(self.enums_header, "{member},\n");
            w!(self.enums_cpp, "{{ \"{value}\", {name}::{member} }},\n");
        }
        w!(self.enums_header, "}};\n");
        w!(self.enums_cpp, "}};\n\n");

        w!(
            self.enums_header,
            "{name} stringTo{name}(const std::string& value);\n"
        );
        w!(
            self.enums_cpp,
            "{name} stringTo{name}(const std::string& value) {{\nauto enumValue = {name}String.find(value);\nreturn enumValue != {name}String.end() ? enumValue->second : {name}::{UNKNOWN_ENUM};\n}}\n\n"
        );

        w!(self.enums_header, "std::string toString({name} o);\n\n");
        w!(self.enums_cpp, "std::string toString({name} o) {{\nswitch (o) {{\n");
        for value in &restriction.enums {
            let member = naming::to_enum_name(value)?;
            w!(self.enums_cpp, "case {name}::{member}: return \"{value}\";\n");
        }
        w!(
            self.enums_cpp,
            "default: return std::to_string(static_cast<int>(o));\n}}\n}}\n\n"
        );
        Ok(())
    }

    /// The reflective values array, declared outside the package namespace
    /// in the reserved details namespace.
    fn print_enum_values(
        &mut self,
        namespace: &[String],
        name: &str,
        restriction: &Restriction,
    ) -> Result<(), CodegenError> {
        let absolute = format!("::{}", namespace.join("::"));
        w!(
            self.enums_header,
            "template<> inline constexpr std::array<{absolute}::{name}, {}> xsdc_enum_values<{absolute}::{name}> = {{\n",
            restriction.enums.len()
        );
        for value in &restriction.enums {
            w!(
                self.enums_header,
                "{absolute}::{name}::{},\n",
                naming::to_enum_name(value)?
            );
        }
        w!(self.enums_header, "}};\n");
        Ok(())
    }

    fn print_class(
        &mut self,
        name: &str,
        name_scope: &str,
        complex: &'a ComplexType,
    ) -> Result<(), CodegenError> {
        let full_name = format!("{name_scope}{name}");
        let base_name = self.get_base_name(complex)?;
        let value_type = if complex.content == ContentVariety::Simple {
            self.get_value_type(complex, false)?
        } else {
            None
        };

        w!(self.parser_header, "class {name} ");
        match &base_name {
            Some(base) => w!(self.parser_header, ": public {base} {{\n"),
            None => w!(self.parser_header, "{{\n"),
        }

        // Own scope only: inherited members live in the base class.
        let mut elements: Vec<&'a Element> = Vec::new();
        if let Some(group) = &complex.group {
            self.collect_group_elements(group, &mut elements)?;
        }
        elements.extend(complex.elements.iter());

        let mut element_types: Vec<CppType> = Vec::new();
        for &element in &elements {
            let cpp_type = if element.reference.is_none()
                && matches!(&element.type_def, Some(TypeDefinition::Complex(_)))
            {
                // Anonymous inline type: emitted as a nested class owned by
                // this element.
                w!(self.parser_header, "public:\n");
                let inner_name = naming::to_class_name(&element_field_name(element))?;
                let Some(TypeDefinition::Complex(inner)) = &element.type_def else {
                    unreachable!()
                };
                let inner_scope = format!("{full_name}::");
                self.print_class(&inner_name, &inner_scope, inner)?;
                w!(self.parser_header, "\n");
                CppType::Complex(CppComplexType::new(format!("{full_name}::{inner_name}")))
            } else {
                let resolved = self.resolve_element(element)?;
                let type_def = resolved
                    .type_def
                    .as_ref()
                    .ok_or_else(|| CodegenError::UntypedElement(resolved.name.clone()))?;
                self.parse_type(type_def, &element_field_name(resolved))?
            };
            element_types.push(cpp_type);
        }

        let mut attributes: Vec<&'a Attribute> = Vec::new();
        for attribute_group in &complex.attribute_groups {
            let resolved = self.resolve_attribute_group(attribute_group)?;
            self.collect_group_attributes(resolved, &mut attributes)?;
        }
        attributes.extend(complex.attributes.iter());

        let mut attribute_types: Vec<CppSimpleType> = Vec::new();
        for &attribute in &attributes {
            let resolved = self.resolve_attribute(attribute)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedAttribute(resolved.name.clone()))?;
            attribute_types.push(self.parse_simple_type(type_def, false)?);
        }

        w!(self.parser_header, "private:\n");
        for (&element, cpp_type) in elements.iter().zip(&element_types) {
            // The choice/all suffix lives on the referencing particle, not
            // on the resolved global declaration.
            let multiple = element.multiple || cpp_type.is_complex();
            w!(
                self.parser_header,
                "const {} {}_;\n",
                element_type_name(&cpp_type.name(), multiple),
                naming::to_variable_name(&element_field_name(element))?
            );
        }
        for (&attribute, simple) in attributes.iter().zip(&attribute_types) {
            let resolved = self.resolve_attribute(attribute)?;
            let variable = naming::to_variable_name(&resolved.name)?;
            if resolved.required {
                w!(self.parser_header, "const {} {}_;\n", simple.name(), variable);
            } else {
                w!(
                    self.parser_header,
                    "const std::optional<{}> {}_;\n",
                    simple.name(),
                    variable
                );
            }
        }
        if let Some(value_type) = &value_type {
            w!(self.parser_header, "std::optional<{}> _value;\n", value_type.name());
            // read() of derived simple-content classes stores through this.
            w!(self.parser_header, "protected:\n");
            w!(self.parser_header, "void setValue({} value);\n", value_type.name());
            w!(
                self.parser_cpp,
                "\nvoid {full_name}::setValue({} value) {{\n_value = std::move(value);\n}}\n",
                value_type.name()
            );
        }

        w!(self.parser_header, "public:\n");
        let args = self.print_constructor(
            name,
            name_scope,
            complex,
            &elements,
            &attributes,
            base_name.as_deref(),
        )?;

        for (&element, cpp_type) in elements.iter().zip(&element_types) {
            let variable = naming::to_variable_name(&element_field_name(element))?;
            let (is_multiple, is_multiple_type) = match cpp_type {
                CppType::Complex(_) => (true, false),
                CppType::Simple(simple) => (element.multiple, simple.is_list()),
            };
            self.print_getter(&full_name, cpp_type, &variable, is_multiple, is_multiple_type, false)?;
        }
        for (&attribute, simple) in attributes.iter().zip(&attribute_types) {
            let resolved = self.resolve_attribute(attribute)?;
            let variable = naming::to_variable_name(&resolved.name)?;
            let cpp_type = CppType::Simple(simple.clone());
            self.print_getter(&full_name, &cpp_type, &variable, false, false, resolved.required)?;
        }
        if let Some(value_type) = &value_type {
            let cpp_type = CppType::Simple(value_type.clone());
            self.print_getter(&full_name, &cpp_type, "value", false, false, false)?;
        }

        self.print_parser(name, name_scope, complex, &args)?;
        if self.config.writer {
            self.print_writer(name, name_scope, complex)?;
        }

        w!(self.parser_header, "}};\n\n");
        Ok(())
    }

    /// Declares and defines the constructor taking the flattened
    /// (inherited first, own last) member values; inherited values are
    /// forwarded to the base class. Returns the argument list used by the
    /// generated `read` to construct the instance.
    fn print_constructor(
        &mut self,
        name: &str,
        name_scope: &str,
        complex: &'a ComplexType,
        own_elements: &[&'a Element],
        own_attributes: &[&'a Attribute],
        base_name: Option<&str>,
    ) -> Result<String, CodegenError> {
        let full_name = format!("{name_scope}{name}");
        let mut all_elements: Vec<&'a Element> = Vec::new();
        let mut all_attributes: Vec<&'a Attribute> = Vec::new();
        self.stack_components(complex, &mut all_elements, &mut all_attributes)?;

        let mut constructor_args = String::new();
        let mut parent_args = String::new();
        let mut initializers = String::new();
        let mut args = String::new();

        for &element in &all_elements {
            let resolved = self.resolve_element(element)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedElement(resolved.name.clone()))?;
            let cpp_type = self.parse_type(type_def, &element_field_name(resolved))?;
            let variable = naming::to_variable_name(&element_field_name(element))?;
            let multiple = element.multiple || cpp_type.is_complex();
            constructor_args.push_str(&format!(
                ", {} {}",
                element_type_name(&cpp_type.name(), multiple),
                variable
            ));
            args.push_str(&format!(", {variable}"));
            let multiple_type = cpp_type.is_complex() || cpp_type.is_list();
            if own_elements.iter().any(|own| std::ptr::eq(*own, element)) {
                initializers.push_str(&format!(
                    ", {}_({})",
                    variable,
                    assignment_expression(&cpp_type.name(), &variable, multiple_type)
                ));
            } else {
                parent_args.push_str(&format!(", {variable}"));
            }
        }
        for &attribute in &all_attributes {
            let resolved = self.resolve_attribute(attribute)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedAttribute(resolved.name.clone()))?;
            let simple = self.parse_simple_type(type_def, false)?;
            let variable = naming::to_variable_name(&resolved.name)?;
            if resolved.required {
                constructor_args.push_str(&format!(", {} {}", simple.name(), variable));
            } else {
                constructor_args.push_str(&format!(", std::optional<{}> {}", simple.name(), variable));
            }
            args.push_str(&format!(", {variable}"));
            if own_attributes.iter().any(|own| std::ptr::eq(*own, attribute)) {
                initializers.push_str(&format!(
                    ", {}_({})",
                    variable,
                    assignment_expression(&simple.name(), &variable, simple.is_list())
                ));
            } else {
                parent_args.push_str(&format!(", {variable}"));
            }
        }

        let constructor_args = constructor_args.strip_prefix(", ").unwrap_or("").to_string();
        let use_explicit = !constructor_args.is_empty() && !constructor_args.contains(',');
        if use_explicit {
            w!(self.parser_header, "explicit {name}({constructor_args});\n");
        } else {
            w!(self.parser_header, "{name}({constructor_args});\n");
        }

        w!(self.parser_cpp, "\n{full_name}::{name}({constructor_args})");
        let parent_args = parent_args.strip_prefix(", ").unwrap_or("");
        let own_initializers = initializers.strip_prefix(", ").unwrap_or("");
        if !parent_args.is_empty() {
            w!(
                self.parser_cpp,
                " : {}({parent_args}){initializers}",
                base_name.unwrap_or_default()
            );
        } else if !own_initializers.is_empty() {
            w!(self.parser_cpp, " : {own_initializers}");
        }
        w!(self.parser_cpp, " {{\n}}\n");

        Ok(args.strip_prefix(", ").unwrap_or("").to_string())
    }

    /// Accessors for one member: `get`/`is`, `has`, and for plural members
    /// `getFirst`.
    fn print_getter(
        &mut self,
        class_name: &str,
        cpp_type: &CppType,
        variable: &str,
        is_multiple: bool,
        is_multiple_type: bool,
        is_required: bool,
    ) -> Result<(), CodegenError> {
        let type_name = if is_multiple {
            format!("std::vector<{}>", cpp_type.name())
        } else {
            cpp_type.name()
        };
        let capitalized = naming::capitalize(variable);
        let assert_has_value = format!("_xsdc_assert(has{capitalized}());\n");
        let prefix = self.getter_prefix(&type_name);

        w!(
            self.parser_header,
            "const {type_name}& {prefix}{capitalized}() const;\n"
        );
        w!(
            self.parser_cpp,
            "\nconst {type_name}& {class_name}::{prefix}{capitalized}() const {{\n"
        );
        if is_multiple || is_required {
            w!(self.parser_cpp, "return {variable}_;\n");
        } else {
            // optional::value() must not be reached without a value.
            self.parser_cpp.print(&assert_has_value);
            w!(self.parser_cpp, "return {variable}_.value();\n");
        }
        w!(self.parser_cpp, "}}\n\n");

        w!(self.parser_header, "bool has{capitalized}() const;\n");
        w!(self.parser_cpp, "bool {class_name}::has{capitalized}() const {{\n");
        if is_multiple {
            w!(self.parser_cpp, "return !({variable}_.empty());\n}}\n");
        } else if is_required {
            w!(self.parser_cpp, "return true;\n}}\n");
        } else {
            w!(self.parser_cpp, "return {variable}_.has_value();\n}}\n");
        }

        if is_multiple || is_multiple_type {
            let element_type_name = match cpp_type {
                CppType::Complex(complex) => complex.name().to_string(),
                CppType::Simple(simple) => simple.type_name().to_string(),
            };
            let guard = if is_multiple { "" } else { assert_has_value.as_str() };
            let accessor = if is_multiple { "." } else { "->" };
            let first = if is_multiple {
                format!("{variable}_[0]")
            } else {
                format!("{variable}_.value()[0]")
            };
            if element_type_name == "bool" {
                w!(
                    self.parser_header,
                    "{element_type_name} getFirst{capitalized}() const;\n"
                );
                w!(
                    self.parser_cpp,
                    "\n{element_type_name} {class_name}::getFirst{capitalized}() const {{\n{guard}if ({variable}_{accessor}empty()) {{\nreturn false;\n}}\nreturn {first};\n}}\n"
                );
            } else {
                w!(
                    self.parser_header,
                    "const {element_type_name}* getFirst{capitalized}() const;\n"
                );
                w!(
                    self.parser_cpp,
                    "\nconst {element_type_name}* {class_name}::getFirst{capitalized}() const {{\n{guard}if ({variable}_{accessor}empty()) {{\nreturn nullptr;\n}}\nreturn &{first};\n}}\n"
                );
            }
        }
        Ok(())
    }

    /// The static `read` factory: non-validating, first-match cascade over
    /// child elements, unknown content skipped silently.
    fn print_parser(
        &mut self,
        name: &str,
        name_scope: &str,
        complex: &'a ComplexType,
        args: &str,
    ) -> Result<(), CodegenError> {
        let base_value_type = if complex.content == ContentVariety::Simple {
            self.get_value_type(complex, true)?
        } else {
            None
        };
        let mut all_elements: Vec<&'a Element> = Vec::new();
        let mut all_attributes: Vec<&'a Attribute> = Vec::new();
        self.stack_components(complex, &mut all_elements, &mut all_attributes)?;

        let mut all_element_types: Vec<CppType> = Vec::new();
        for &element in &all_elements {
            let resolved = self.resolve_element(element)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedElement(resolved.name.clone()))?;
            all_element_types.push(self.parse_type(type_def, &element_field_name(resolved))?);
        }
        let mut all_attribute_types: Vec<CppSimpleType> = Vec::new();
        for &attribute in &all_attributes {
            let resolved = self.resolve_attribute(attribute)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedAttribute(resolved.name.clone()))?;
            all_attribute_types.push(self.parse_simple_type(type_def, false)?);
        }

        let full_name = format!("{name_scope}{name}");
        let node_type = self.xml_node_type();
        w!(self.parser_header, "static {full_name} read({node_type} *root);\n");
        w!(
            self.parser_cpp,
            "\n{full_name} {full_name}::read({node_type} *root) {{\n"
        );
        w!(self.parser_cpp, "std::string _raw;\n");

        for (&attribute, simple) in all_attributes.iter().zip(&all_attribute_types) {
            let resolved = self.resolve_attribute(attribute)?;
            let variable = naming::to_variable_name(&resolved.name)?;
            w!(
                self.parser_cpp,
                "_raw = getXmlAttribute(root, \"{}\");\n",
                resolved.name
            );
            if resolved.required {
                if simple.is_enum() {
                    w!(
                        self.parser_cpp,
                        "{} {} = {}::{};\n",
                        simple.name(),
                        variable,
                        simple.name(),
                        UNKNOWN_ENUM
                    );
                } else {
                    w!(self.parser_cpp, "{} {}{{}};\n", simple.name(), variable);
                }
            } else {
                w!(
                    self.parser_cpp,
                    "std::optional<{}> {} = std::nullopt;\n",
                    simple.name(),
                    variable
                );
            }
            w!(self.parser_cpp, "if (_raw != \"\") {{\n");
            self.parser_cpp.print(&simple.parsing_expression());
            w!(self.parser_cpp, "{variable} = _value;\n}}\n");
        }

        if base_value_type.is_none() && !all_elements.is_empty() {
            for (&element, cpp_type) in all_elements.iter().zip(&all_element_types) {
                let variable = naming::to_variable_name(&element_field_name(element))?;
                let multiple = element.multiple || cpp_type.is_complex();
                w!(
                    self.parser_cpp,
                    "{} {};\n",
                    element_type_name(&cpp_type.name(), multiple),
                    variable
                );
            }
            if self.config.use_tinyxml {
                self.parser_cpp.print(
                    "for (auto *_child = root->FirstChildElement(); _child != nullptr; _child = _child->NextSiblingElement()) {\n",
                );
            } else {
                self.parser_cpp.print(
                    "for (auto *_child = root->xmlChildrenNode; _child != nullptr; _child = _child->next) {\n",
                );
            }
            for (i, (&element, cpp_type)) in
                all_elements.iter().zip(&all_element_types).enumerate()
            {
                let resolved = self.resolve_element(element)?;
                let variable = naming::to_variable_name(&element_field_name(element))?;
                if i != 0 {
                    w!(self.parser_cpp, "}} else ");
                }
                if self.config.use_tinyxml {
                    w!(
                        self.parser_cpp,
                        "if (!strcmp(_child->Name(), \"{}\")) {{\n",
                        resolved.name
                    );
                } else {
                    w!(
                        self.parser_cpp,
                        "if (!xmlStrcmp(_child->name, reinterpret_cast<const xmlChar*>(\"{}\"))) {{\n",
                        resolved.name
                    );
                }
                if !cpp_type.is_complex() {
                    self.print_set_raw_with_element_text("_child");
                }
                self.parser_cpp.print(&cpp_type.parsing_expression());
                if element.multiple || cpp_type.is_complex() {
                    w!(self.parser_cpp, "{variable}.push_back(std::move(_value));\n");
                } else {
                    w!(self.parser_cpp, "{variable} = std::move(_value);\n");
                }
            }
            w!(self.parser_cpp, "}}\n}}\n");
        }

        if args.is_empty() {
            w!(self.parser_cpp, "{full_name} instance;\n");
        } else {
            w!(self.parser_cpp, "{full_name} instance({args});\n");
        }
        if let Some(value_type) = &base_value_type {
            self.print_set_raw_with_element_text("root");
            self.parser_cpp.print(&value_type.parsing_expression());
            w!(self.parser_cpp, "instance.setValue(std::move(_value));\n");
        }
        w!(self.parser_cpp, "return instance;\n}}\n");
        Ok(())
    }

    /// Reads the concatenated text content of `var` into `_raw`. The
    /// libxml2 helper resolves entity references; tinyxml2 concatenates the
    /// immediate text children.
    fn print_set_raw_with_element_text(&mut self, var: &str) {
        if self.config.use_tinyxml {
            w!(self.parser_cpp, "_raw = \"\";\n");
            w!(
                self.parser_cpp,
                "for (auto *textNode = {var}->FirstChild(); textNode != nullptr; textNode = textNode->NextSibling()) {{\n"
            );
            self.parser_cpp.print(
                "if (textNode->ToText() != nullptr) {\n_raw.append(textNode->Value());\n}\n}\n",
            );
        } else {
            w!(
                self.parser_cpp,
                "auto xmlValue = make_xmlUnique(xmlNodeListGetString({var}->doc, {var}->xmlChildrenNode, 1));\n"
            );
            self.parser_cpp.print(
                "if (xmlValue == nullptr) {\n_raw = \"\";\n} else {\n_raw = reinterpret_cast<const char*>(xmlValue.get());\n}\n",
            );
        }
    }

    /// The `write` member function: one line per opening tag, indented by
    /// the file-scope counter, recursing into complex children.
    fn print_writer(
        &mut self,
        name: &str,
        name_scope: &str,
        complex: &'a ComplexType,
    ) -> Result<(), CodegenError> {
        let mut all_elements: Vec<&'a Element> = Vec::new();
        let mut all_attributes: Vec<&'a Attribute> = Vec::new();
        self.stack_components(complex, &mut all_elements, &mut all_attributes)?;

        let mut all_element_types: Vec<CppType> = Vec::new();
        for &element in &all_elements {
            let resolved = self.resolve_element(element)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedElement(resolved.name.clone()))?;
            all_element_types.push(self.parse_type(type_def, &element_field_name(resolved))?);
        }
        let mut all_attribute_types: Vec<CppSimpleType> = Vec::new();
        for &attribute in &all_attributes {
            let resolved = self.resolve_attribute(attribute)?;
            let type_def = resolved
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedAttribute(resolved.name.clone()))?;
            all_attribute_types.push(self.parse_simple_type(type_def, false)?);
        }

        let full_name = format!("{name_scope}{name}");
        w!(
            self.parser_header,
            "void write(std::ostream& _out, const std::string& _name) const;\n"
        );
        w!(
            self.parser_cpp,
            "\nvoid {full_name}::write(std::ostream& _out, const std::string& _name) const {{\n"
        );
        w!(self.parser_cpp, "_out << printIndent() << \"<\" << _name;\n");
        for (&attribute, simple) in all_attributes.iter().zip(&all_attribute_types) {
            let resolved = self.resolve_attribute(attribute)?;
            let variable = naming::to_variable_name(&resolved.name)?;
            let capitalized = naming::capitalize(&variable);
            w!(self.parser_cpp, "if (has{capitalized}()) {{\n");
            w!(self.parser_cpp, "_out << \" {}=\\\"\";\n", resolved.name);
            let getter = format!("{}{capitalized}()", self.getter_prefix(&simple.name()));
            self.parser_cpp
                .print(&simple.writing_expression(&getter));
            w!(self.parser_cpp, "_out << \"\\\"\";\n}}\n");
        }
        self.parser_cpp.print("_out << \">\" << std::endl;\n");
        self.parser_cpp.print("++indentIndex;\n");

        for (&element, cpp_type) in all_elements.iter().zip(&all_element_types) {
            let resolved = self.resolve_element(element)?;
            let variable = naming::to_variable_name(&element_field_name(element))?;
            let capitalized = naming::capitalize(&variable);
            if cpp_type.is_complex() || element.multiple {
                w!(self.parser_cpp, "for (auto& _value : get{capitalized}()) {{\n");
                if !cpp_type.is_complex() {
                    w!(
                        self.parser_cpp,
                        "_out << printIndent() << \"<{}>\";\n",
                        resolved.name
                    );
                }
                self.parser_cpp
                    .print(&cpp_type.writing_expression("_value", &resolved.name));
                if !cpp_type.is_complex() {
                    w!(
                        self.parser_cpp,
                        "_out << \"</{}>\" << std::endl;\n",
                        resolved.name
                    );
                }
                w!(self.parser_cpp, "}}\n");
            } else {
                w!(self.parser_cpp, "if (has{capitalized}()) {{\n");
                if !cpp_type.is_complex() {
                    w!(
                        self.parser_cpp,
                        "_out << printIndent() << \"<{}>\";\n",
                        resolved.name
                    );
                }
                let getter = format!("{}{capitalized}()", self.getter_prefix(&cpp_type.name()));
                self.parser_cpp
                    .print(&cpp_type.writing_expression(&getter, &resolved.name));
                if !cpp_type.is_complex() {
                    w!(
                        self.parser_cpp,
                        "_out << \"</{}>\" << std::endl;\n",
                        resolved.name
                    );
                }
                w!(self.parser_cpp, "}}\n");
            }
        }
        self.parser_cpp.print("--indentIndex;\n");
        self.parser_cpp
            .print("_out << printIndent() << \"</\" << _name << \">\" << std::endl;\n");
        w!(self.parser_cpp, "}}\n");
        Ok(())
    }

    /// Free-function entrypoints: `read…(path)` and `parse…(text)` per root
    /// element, suffixed with the class-cased element name when the schema
    /// has more than one top-level element.
    fn print_parser_entrypoints(&mut self) -> Result<(), CodegenError> {
        let schema = self.schema;
        let multi_root = schema.element_map.len() > 1;
        for (element_name, element) in &schema.element_map {
            if !self.is_root(element_name) {
                continue;
            }
            self.print_xml_parser_for(element, true, multi_root)?;
            self.print_xml_parser_for(element, false, multi_root)?;
        }
        Ok(())
    }

    fn print_xml_parser_for(
        &mut self,
        element: &'a Element,
        load_file: bool,
        multi_root: bool,
    ) -> Result<(), CodegenError> {
        let type_def = element
            .type_def
            .as_ref()
            .ok_or_else(|| CodegenError::UntypedElement(element.name.clone()))?;
        let cpp_type = self.parse_type(type_def, &element.name)?;
        let type_name = cpp_type.name();
        let reader_name = if cpp_type.is_complex() {
            type_name.clone()
        } else {
            naming::to_class_name(&element.name)?
        };
        let suffix = if multi_root { reader_name.as_str() } else { "" };
        let method = if load_file { "read" } else { "parse" };
        let arg = if load_file { "configFile" } else { "xml" };

        w!(
            self.parser_header,
            "std::optional<{type_name}> {method}{suffix}(const char* {arg});\n\n"
        );
        w!(
            self.parser_cpp,
            "std::optional<{type_name}> {method}{suffix}(const char* {arg}) {{\n"
        );
        if self.config.use_tinyxml {
            let inner_parser = if load_file {
                "LoadFile(configFile)"
            } else {
                "Parse(xml)"
            };
            w!(
                self.parser_cpp,
                "tinyxml2::XMLDocument doc;\nif (doc.{inner_parser} != tinyxml2::XML_SUCCESS) {{\nreturn std::nullopt;\n}}\nauto _child = doc.FirstChildElement();\nif (_child == nullptr) {{\nreturn std::nullopt;\n}}\n\n"
            );
            w!(
                self.parser_cpp,
                "if (strcmp(_child->Name(), \"{}\") == 0) {{\n",
                element.name
            );
        } else {
            let inner_parser = if load_file {
                "xmlParseFile(configFile)"
            } else {
                "xmlParseDoc(reinterpret_cast<const xmlChar*>(xml))"
            };
            w!(
                self.parser_cpp,
                "auto doc = make_xmlUnique({inner_parser});\nif (doc == nullptr) {{\nreturn std::nullopt;\n}}\nxmlNodePtr _child = xmlDocGetRootElement(doc.get());\nif (_child == nullptr) {{\nreturn std::nullopt;\n}}\nif (xmlXIncludeProcess(doc.get()) < 0) {{\nreturn std::nullopt;\n}}\n\n"
            );
            w!(
                self.parser_cpp,
                "if (!xmlStrcmp(_child->name, reinterpret_cast<const xmlChar*>(\"{}\"))) {{\n",
                element.name
            );
        }
        if !cpp_type.is_complex() {
            w!(self.parser_cpp, "std::string _raw;\n");
            self.print_set_raw_with_element_text("_child");
        }
        self.parser_cpp.print(&cpp_type.parsing_expression());
        w!(self.parser_cpp, "return _value;\n}}\n");
        w!(self.parser_cpp, "return std::nullopt;\n");
        w!(self.parser_cpp, "}}\n\n");
        Ok(())
    }

    fn print_writer_entrypoints(&mut self) -> Result<(), CodegenError> {
        let schema = self.schema;
        for (element_name, element) in &schema.element_map {
            if !self.is_root(element_name) {
                continue;
            }
            let type_def = element
                .type_def
                .as_ref()
                .ok_or_else(|| CodegenError::UntypedElement(element.name.clone()))?;
            let cpp_type = self.parse_type(type_def, &element.name)?;
            let type_name = cpp_type.name();
            let variable = naming::to_variable_name(&element.name)?;
            let writer_name = if cpp_type.is_complex() {
                String::new()
            } else {
                naming::to_class_name(&element.name)?
            };
            w!(
                self.parser_header,
                "void write{writer_name}(std::ostream& _out, const {type_name}& {variable});\n\n"
            );
            w!(
                self.parser_cpp,
                "void write{writer_name}(std::ostream& _out, const {type_name}& {variable}) {{\n"
            );
            self.parser_cpp
                .print("_out << \"<?xml version=\\\"1.0\\\" encoding=\\\"utf-8\\\"?>\\n\";\n");
            if cpp_type.is_complex() {
                w!(self.parser_cpp, "{variable}.write(_out, \"{}\");\n", element.name);
            } else {
                w!(self.parser_cpp, "_out << \"<{}>\";\n", element.name);
                self.parser_cpp
                    .print(&cpp_type.writing_expression(&variable, ""));
                w!(self.parser_cpp, "_out << \"</{}>\" << std::endl;\n", element.name);
            }
            w!(self.parser_cpp, "}}\n\n");
        }
        Ok(())
    }

    // --- resolution and lowering -----------------------------------------

    fn resolve_element(&self, element: &'a Element) -> Result<&'a Element, CodegenError> {
        match &element.reference {
            None => Ok(element),
            Some(reference) => self
                .schema
                .element_map
                .get(&reference.local_name)
                .ok_or_else(|| CodegenError::UnknownElement(reference.local_name.clone())),
        }
    }

    fn resolve_attribute(&self, attribute: &'a Attribute) -> Result<&'a Attribute, CodegenError> {
        match &attribute.reference {
            None => Ok(attribute),
            Some(reference) => self
                .schema
                .attribute_map
                .get(&reference.local_name)
                .ok_or_else(|| CodegenError::UnknownAttribute(reference.local_name.clone())),
        }
    }

    /// `Some` iff the group is a reference; referencing groups contribute
    /// the referenced definition's members before their own.
    fn resolve_group(&self, group: &'a Group) -> Result<Option<&'a Group>, CodegenError> {
        match &group.reference {
            None => Ok(None),
            Some(reference) => self
                .schema
                .group_map
                .get(&reference.local_name)
                .map(Some)
                .ok_or_else(|| CodegenError::UnknownGroup(reference.local_name.clone())),
        }
    }

    fn resolve_attribute_group(
        &self,
        attribute_group: &'a AttributeGroup,
    ) -> Result<&'a AttributeGroup, CodegenError> {
        match &attribute_group.reference {
            None => Ok(attribute_group),
            Some(reference) => self
                .schema
                .attribute_group_map
                .get(&reference.local_name)
                .ok_or_else(|| CodegenError::UnknownAttributeGroup(reference.local_name.clone())),
        }
    }

    fn get_type(&self, name: &str) -> Result<&'a TypeDefinition, CodegenError> {
        self.schema
            .type_map
            .get(name)
            .ok_or_else(|| CodegenError::UnknownType(name.to_string()))
    }

    fn get_simple_type(&self, name: &str) -> Result<&'a SimpleType, CodegenError> {
        match self.get_type(name)? {
            TypeDefinition::Simple(simple) => Ok(simple),
            _ => Err(CodegenError::NotSimpleType(name.to_string())),
        }
    }

    fn collect_group_elements(
        &self,
        group: &'a Group,
        out: &mut Vec<&'a Element>,
    ) -> Result<(), CodegenError> {
        if let Some(resolved) = self.resolve_group(group)? {
            self.collect_group_elements(resolved, out)?;
        }
        out.extend(group.elements.iter());
        Ok(())
    }

    fn collect_group_attributes(
        &self,
        attribute_group: &'a AttributeGroup,
        out: &mut Vec<&'a Attribute>,
    ) -> Result<(), CodegenError> {
        for nested in &attribute_group.attribute_groups {
            let resolved = self.resolve_attribute_group(nested)?;
            self.collect_group_attributes(resolved, out)?;
        }
        out.extend(attribute_group.attributes.iter());
        Ok(())
    }

    /// Flattens the full member list of `complex`: inherited members first
    /// (recursively), then group-contributed elements, own elements,
    /// attribute-group attributes, own attributes.
    fn stack_components(
        &self,
        complex: &'a ComplexType,
        elements: &mut Vec<&'a Element>,
        attributes: &mut Vec<&'a Attribute>,
    ) -> Result<(), CodegenError> {
        if let Some(base) = &complex.base {
            if !base.is_xsd() {
                if let TypeDefinition::Complex(parent) = self.get_type(&base.local_name)? {
                    self.stack_components(parent, elements, attributes)?;
                }
            }
        }
        if let Some(group) = &complex.group {
            self.collect_group_elements(group, elements)?;
        }
        elements.extend(complex.elements.iter());
        for attribute_group in &complex.attribute_groups {
            let resolved = self.resolve_attribute_group(attribute_group)?;
            self.collect_group_attributes(resolved, attributes)?;
        }
        attributes.extend(complex.attributes.iter());
        Ok(())
    }

    /// The base class name, when the base resolves to a user complex type.
    fn get_base_name(&self, complex: &ComplexType) -> Result<Option<String>, CodegenError> {
        let Some(base) = &complex.base else {
            return Ok(None);
        };
        if base.is_xsd() {
            return Ok(None);
        }
        match self.get_type(&base.local_name)? {
            TypeDefinition::Complex(_) => {
                Ok(Some(naming::to_class_name(&base.local_name)?))
            }
            _ => Ok(None),
        }
    }

    /// The text-content value type of a simple-content complex type,
    /// walking `base` until a simple type (built-in or user) is reached.
    fn get_value_type(
        &mut self,
        complex: &'a ComplexType,
        traverse: bool,
    ) -> Result<Option<CppSimpleType>, CodegenError> {
        let Some(base) = &complex.base else {
            return Err(CodegenError::BaseNotSimple(
                complex.name.clone().unwrap_or_default(),
            ));
        };
        if base.is_xsd() {
            return Ok(Some(predefined_type(&base.local_name)?));
        }
        match self.get_type(&base.local_name)? {
            TypeDefinition::Simple(_) => {
                Ok(Some(self.parse_simple_type_reference(base, false)?))
            }
            TypeDefinition::Complex(parent) => {
                if !traverse {
                    return Ok(None);
                }
                if parent.content == ContentVariety::Simple {
                    self.get_value_type(parent, true)
                } else {
                    Err(CodegenError::BaseNotSimple(base.local_name.clone()))
                }
            }
            TypeDefinition::Reference(_) => {
                Err(CodegenError::BaseNotSimple(base.local_name.clone()))
            }
        }
    }

    /// Lowers a type occurrence to its C++ form. References into the XSD
    /// namespace hit the primitive table; references into the schema's own
    /// namespace follow the definition; inline complex types take their
    /// enclosing element's class-cased name.
    fn parse_type(
        &mut self,
        type_def: &'a TypeDefinition,
        default_name: &str,
    ) -> Result<CppType, CodegenError> {
        match type_def {
            TypeDefinition::Reference(reference) => {
                if reference.is_xsd() {
                    return Ok(CppType::Simple(predefined_type(&reference.local_name)?));
                }
                let name = reference.local_name.clone();
                match self.get_type(&name)? {
                    TypeDefinition::Simple(_) => Ok(CppType::Simple(
                        self.parse_simple_type_reference(reference, false)?,
                    )),
                    referenced => self.parse_type(referenced, &name),
                }
            }
            TypeDefinition::Complex(_) => Ok(CppType::Complex(CppComplexType::new(
                naming::to_class_name(default_name)?,
            ))),
            TypeDefinition::Simple(simple) => {
                Ok(CppType::Simple(self.parse_simple_type_value(simple, false)?))
            }
        }
    }

    fn parse_simple_type(
        &mut self,
        type_def: &'a TypeDefinition,
        traverse: bool,
    ) -> Result<CppSimpleType, CodegenError> {
        match type_def {
            TypeDefinition::Reference(reference) => {
                self.parse_simple_type_reference(reference, traverse)
            }
            TypeDefinition::Simple(simple) => self.parse_simple_type_value(simple, traverse),
            TypeDefinition::Complex(complex) => Err(CodegenError::NotSimpleType(
                complex.name.clone().unwrap_or_default(),
            )),
        }
    }

    fn parse_simple_type_reference(
        &mut self,
        reference: &QName,
        traverse: bool,
    ) -> Result<CppSimpleType, CodegenError> {
        if reference.is_xsd() {
            return predefined_type(&reference.local_name);
        }
        let type_name = &reference.local_name;
        if let Some(lowered) = self.simple_type_map.get(type_name) {
            return Ok(lowered.clone());
        }
        if traverse {
            let simple = self.get_simple_type(type_name)?;
            let lowered = self.parse_simple_type_value(simple, true)?;
            self.simple_type_map
                .insert(type_name.clone(), lowered.clone());
            Ok(lowered)
        } else {
            Err(CodegenError::UnknownType(type_name.clone()))
        }
    }

    fn parse_simple_type_value(
        &mut self,
        simple: &'a SimpleType,
        traverse: bool,
    ) -> Result<CppSimpleType, CodegenError> {
        match simple {
            SimpleType::List(list) => {
                let item = self.parse_simple_type(&list.item_type, traverse)?;
                item.new_list_type(list.name.as_deref().unwrap_or_default())
            }
            SimpleType::Restriction(restriction) => {
                if !restriction.enums.is_empty() {
                    let name =
                        naming::to_class_name(restriction.name.as_deref().unwrap_or_default())?;
                    Ok(CppSimpleType::new_enum(name))
                } else {
                    // Facets other than enumeration carry no value-space
                    // effect here.
                    self.parse_simple_type(&restriction.base, traverse)
                }
            }
            SimpleType::Union(union) => {
                // Unions lower to string; a list member makes the whole
                // union plural.
                for member in &union.member_types {
                    if self.parse_simple_type(member, traverse)?.is_list() {
                        return Ok(CppSimpleType::new("std::string", "%s", true));
                    }
                }
                Ok(CppSimpleType::new("std::string", "%s", false))
            }
        }
    }
}

/// Variable-name stem of an element: choice and all members carry a
/// disambiguating suffix.
fn element_field_name(element: &Element) -> String {
    match element.kind {
        ElementKind::Choice => format!("{}_optional", element.name),
        ElementKind::All => format!("{}_all", element.name),
        ElementKind::Normal => element.name.clone(),
    }
}

/// Storage type of an element member: an owning sequence for plural or
/// complex members, an optional otherwise.
fn element_type_name(type_name: &str, multiple: bool) -> String {
    if multiple {
        format!("std::vector<{type_name}>")
    } else {
        format!("std::optional<{type_name}>")
    }
}

/// Constructor initializer expression: container-backed values are moved.
fn assignment_expression(type_name: &str, variable: &str, multiple_type: bool) -> String {
    if type_name.starts_with("std::vector") || multiple_type {
        format!("std::move({variable})")
    } else {
        variable.to_string()
    }
}

/// Whether the type (or any anonymous inline type nested in it) declares
/// attributes; decides if the attribute helper is emitted.
fn has_attribute(complex: &ComplexType) -> bool {
    if !complex.attributes.is_empty() || !complex.attribute_groups.is_empty() {
        return true;
    }
    for element in &complex.elements {
        if element.reference.is_none() {
            if let Some(TypeDefinition::Complex(inner)) = &element.type_def {
                if has_attribute(inner) {
                    return true;
                }
            }
        }
    }
    false
}
