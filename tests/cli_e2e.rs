use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn xsdcpp_bin() -> &'static str {
    env!("CARGO_BIN_EXE_xsdcpp")
}

fn run_xsdcpp(args: &[&str]) -> Output {
    Command::new(xsdcpp_bin())
        .args(args)
        .output()
        .expect("run xsdcpp")
}

fn write_schema(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).expect("write schema");
    path.to_str().unwrap().to_string()
}

const SINGLE_ROOT: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="color">
    <xs:restriction base="xs:string">
      <xs:enumeration value="red"/>
      <xs:enumeration value="green"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:complexType name="config">
    <xs:sequence>
      <xs:element name="tint" type="color"/>
    </xs:sequence>
    <xs:attribute name="version" type="xs:int" use="required"/>
  </xs:complexType>
  <xs:element name="config" type="config"/>
</xs:schema>
"#;

const MULTI_ROOT: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="a"><xs:sequence/></xs:complexType>
  <xs:complexType name="b"><xs:sequence/></xs:complexType>
  <xs:element name="a" type="a"/>
  <xs:element name="b" type="b"/>
</xs:schema>
"#;

#[test]
fn generates_all_four_files() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out_dir = dir.path().join("gen");
    let out = run_xsdcpp(&[
        &schema,
        "-p",
        "com.example.config",
        "-c",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stderr.is_empty(), "stderr must be silent on success");
    assert!(out_dir.join("com_example_config.cpp").is_file());
    assert!(out_dir.join("com_example_config_enums.cpp").is_file());
    assert!(out_dir.join("include/com_example_config.h").is_file());
    assert!(out_dir.join("include/com_example_config_enums.h").is_file());

    let header = fs::read_to_string(out_dir.join("include/com_example_config.h")).unwrap();
    assert!(header.contains("class Config"));
    assert!(header.contains("std::optional<Config> read(const char* configFile);"));
    let enums = fs::read_to_string(out_dir.join("include/com_example_config_enums.h")).unwrap();
    assert!(enums.contains("enum class Color {"));
}

#[test]
fn enums_only_writes_just_the_enum_pair() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out_dir = dir.path().join("gen");
    let out = run_xsdcpp(&[
        &schema,
        "-p",
        "cfg",
        "-c",
        "-e",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out_dir.join("cfg_enums.cpp").is_file());
    assert!(out_dir.join("include/cfg_enums.h").is_file());
    assert!(!out_dir.join("cfg.cpp").exists());
    assert!(!out_dir.join("include/cfg.h").exists());
}

#[test]
fn parser_only_writes_just_the_parser_pair() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out_dir = dir.path().join("gen");
    let out = run_xsdcpp(&[
        &schema,
        "-p",
        "cfg",
        "-c",
        "-x",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out_dir.join("cfg.cpp").is_file());
    assert!(!out_dir.join("cfg_enums.cpp").exists());
}

#[test]
fn enums_only_and_parser_only_are_mutually_exclusive() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out = run_xsdcpp(&[&schema, "-p", "cfg", "-c", "-e", "-x"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_package_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out = run_xsdcpp(&[&schema, "-c"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn multiple_roots_without_r_name_the_candidates() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "multi.xsd", MULTI_ROOT);
    let out = run_xsdcpp(&[&schema, "-p", "cfg", "-c"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing -r/--root"), "stderr: {stderr}");
    assert!(stderr.contains("\"a\"") && stderr.contains("\"b\""));
}

#[test]
fn selected_root_restricts_the_entrypoints() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "multi.xsd", MULTI_ROOT);
    let out_dir = dir.path().join("gen");
    let out = run_xsdcpp(&[
        &schema,
        "-p",
        "cfg",
        "-c",
        "-r",
        "b",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let header = fs::read_to_string(out_dir.join("include/cfg.h")).unwrap();
    assert!(header.contains("readB("));
    assert!(header.contains("parseB("));
    assert!(!header.contains("readA("));
}

#[test]
fn unknown_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "multi.xsd", MULTI_ROOT);
    let out = run_xsdcpp(&[&schema, "-p", "cfg", "-c", "-r", "zzz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("zzz"));
}

#[test]
fn java_backend_is_not_provided() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let out = run_xsdcpp(&[&schema, "-p", "cfg", "-j"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("java"));
}

#[test]
fn includes_are_followed_and_recorded_in_the_depfile() {
    let dir = TempDir::new().unwrap();
    write_schema(
        dir.path(),
        "common.xsd",
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
             <xs:simpleType name="label">
               <xs:restriction base="xs:string"/>
             </xs:simpleType>
           </xs:schema>"#,
    );
    let root = write_schema(
        dir.path(),
        "root.xsd",
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
             <xs:include schemaLocation="common.xsd"/>
             <xs:complexType name="doc">
               <xs:attribute name="tag" type="label"/>
             </xs:complexType>
             <xs:element name="doc" type="doc"/>
           </xs:schema>"#,
    );
    let out_dir = dir.path().join("gen");
    let depfile = dir.path().join("deps.d");
    let out = run_xsdcpp(&[
        &root,
        "-p",
        "cfg",
        "-c",
        "-o",
        out_dir.to_str().unwrap(),
        "-d",
        depfile.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let deps = fs::read_to_string(&depfile).unwrap();
    assert!(deps.contains("root.xsd"));
    assert!(deps.contains("common.xsd"));
    assert!(deps.contains(" \\\n  "), "continued single logical line");
    // The included type resolved during generation.
    let header = fs::read_to_string(out_dir.join("include/cfg.h")).unwrap();
    assert!(header.contains("tag_"));
}

#[test]
fn missing_schema_file_is_reported() {
    let out = run_xsdcpp(&["/nonexistent/thing.xsd", "-p", "cfg", "-c"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn no_backend_still_writes_the_depfile() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "config.xsd", SINGLE_ROOT);
    let depfile = dir.path().join("deps.d");
    let out = run_xsdcpp(&[&schema, "-p", "cfg", "-d", depfile.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(depfile.is_file());
    assert!(!dir.path().join("cfg.cpp").exists());
}
