//! Conformance tests for the tree document text.

use save_tree::{
    from_str, to_document, to_string, to_string_with_options, tree_value, Delimiter, Error, Field,
    Formatter, Node, Number, Quaternion, Result, Saveable, TreeOptions, Value, Vector3,
};

struct Camera {
    fov: f32,
    position: Vector3,
    rotation: Quaternion,
    label: String,
    layers: Vec<i32>,
    target: Target,
}

struct Target {
    id: u32,
}

impl Saveable for Target {
    fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.write_u32(self.id)
    }

    fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
        f.read_into(&mut self.id)
    }
}

impl Saveable for Camera {
    fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
        f.write_f32(self.fov)?;
        f.write_vector3(self.position)?;
        f.write_quaternion(self.rotation)?;
        f.write_str(&self.label)?;
        f.write_i32_array(&self.layers)?;
        f.save(&self.target)
    }

    fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
        f.read_into(&mut self.fov)?;
        f.read_into(&mut self.position)?;
        f.read_into(&mut self.rotation)?;
        f.read_into(&mut self.label)?;
        f.read_into(&mut self.layers)?;
        f.load(&mut self.target)
    }
}

fn camera() -> Camera {
    Camera {
        fov: 60.0,
        position: Vector3::new(0.0, 1.5, -10.0),
        rotation: Quaternion::IDENTITY,
        label: "main camera".to_string(),
        layers: vec![1, 2, 4],
        target: Target { id: 3 },
    }
}

#[test]
fn test_node_document_text() {
    let doc = to_document(&camera()).unwrap();
    let text = doc.to_text(&TreeOptions::default()).unwrap();

    let expected = "\
name: root
fields[5]:
  - f32: 60.0
  - vec3[3]: 0.0,1.5,-10.0
  - quat[4]: 0.0,0.0,0.0,1.0
  - str: main camera
  - ints[3]: 1,2,4
children[1]:
  - name: Target
    fields[1]:
      - u32: 3
    children[0]:";
    assert_eq!(text, expected);
    assert_eq!(Node::from_text(&text).unwrap(), doc);
}

#[test]
fn test_wider_indent() {
    let doc = to_document(&camera()).unwrap();
    let options = TreeOptions::new().with_indent(4);
    let text = doc.to_text(&options).unwrap();

    assert!(text.contains(
        "\nchildren[1]:\n    - name: Target\n      fields[1]:\n          - u32: 3"
    ));
    assert_eq!(Node::from_text(&text).unwrap(), doc);
}

#[test]
fn test_pipe_and_tab_delimiters() {
    let doc = to_document(&camera()).unwrap();
    for (delimiter, header) in [
        (Delimiter::Pipe, "ints[3|]: 1|2|4"),
        (Delimiter::Tab, "ints[3\t]: 1\t2\t4"),
    ] {
        let text = doc
            .to_text(&TreeOptions::new().with_delimiter(delimiter))
            .unwrap();
        assert!(text.contains(header), "{}", text);
        assert_eq!(Node::from_text(&text).unwrap(), doc);
    }
}

#[test]
fn test_empty_and_nested_objects() {
    let value = tree_value!({
        "empty": {},
        "nested": { "a": 1, "b": { "c": true } },
        "items": [{}, { "k": "v" }, [1, 2]]
    });
    let text = to_string(&value).unwrap();
    assert_eq!(
        text,
        "empty:\nnested:\n  a: 1\n  b:\n    c: true\nitems[3]:\n  -\n  - k: v\n  - [2]: 1,2"
    );
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn test_ambiguous_strings_are_quoted() {
    let value = tree_value!({
        "a": "true",
        "b": "42",
        "c": "",
        "d": " padded ",
        "e": "x: y",
        "f": "tab\there",
        "g": "-5.5e3",
        "h": "NaN"
    });
    let text = to_string(&value).unwrap();
    for line in text.lines() {
        let (_, rest) = line.split_once(": ").unwrap();
        assert!(rest.starts_with('"'), "unquoted: {}", line);
    }
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn test_plain_strings_stay_bare() {
    let value = tree_value!({ "s": "hello world", "v": "1.2.3", "u": "héllo" });
    assert_eq!(
        to_string(&value).unwrap(),
        "s: hello world\nv: 1.2.3\nu: héllo"
    );
}

#[test]
fn test_numbers() {
    let value = from_str("a: 7\nb: -0.25\nc: 1e3\nd: Infinity\ne: -Infinity\nf: NaN").unwrap();
    let map = value.as_object().unwrap();
    assert_eq!(map.get("a"), Some(&Value::Number(Number::Integer(7))));
    assert_eq!(map.get("b"), Some(&Value::Number(Number::Float(-0.25))));
    assert_eq!(map.get("c"), Some(&Value::Number(Number::Float(1000.0))));
    assert_eq!(map.get("d"), Some(&Value::Number(Number::Infinity)));
    assert_eq!(map.get("e"), Some(&Value::Number(Number::NegativeInfinity)));
    assert_eq!(map.get("f"), Some(&Value::Number(Number::NaN)));

    let floats = tree_value!({ "x": 2.0 });
    assert_eq!(to_string(&floats).unwrap(), "x: 2.0");
}

#[test]
fn test_special_floats_in_fields() {
    let mut node = Node::root();
    node.push_field(Field::Float(f32::NEG_INFINITY));
    node.push_field(Field::Vector3(Vector3::new(f32::INFINITY, 0.0, -0.0)));
    let text = node.to_text(&TreeOptions::default()).unwrap();
    assert!(text.contains("f32: -Infinity"));
    assert!(text.contains("vec3[3]: Infinity,0.0,-0.0"));
    assert_eq!(Node::from_text(&text).unwrap(), node);
}

#[test]
fn test_syntax_errors() {
    let cases = [
        ("fields[2]:\n  - i32: 1", 1),
        ("name root", 1),
        ("a: 1\n    b: 2", 2),
        ("a: \"open", 1),
        ("ints[2]: 1,2,3", 1),
        ("a: 1\na: 2", 2),
        ("- i32: 1", 1),
    ];
    for (input, expected_line) in cases {
        match from_str(input) {
            Err(Error::Syntax { line, .. }) => assert_eq!(line, expected_line, "{:?}", input),
            other => panic!("{:?} gave {:?}", input, other),
        }
    }
}

#[test]
fn test_oversized_array_headers() {
    for input in [
        "name: root\nfields[99999999999999999]:\n  - i32: 1",
        "name: root\nfields[99999999999999999]: 1",
        "name: root\nchildren[18446744073709551615]:\n  - name: A",
    ] {
        assert!(
            matches!(Node::from_text(input), Err(Error::Syntax { line: 2, .. })),
            "{:?}",
            input
        );
    }
}

#[test]
fn test_syntax_error_shows_context() {
    let err = from_str("fields[1]:\n  i32: 5").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 2"), "{}", message);
    assert!(message.contains("i32: 5"), "{}", message);
    assert!(message.contains("Help:"), "{}", message);
}

#[test]
fn test_schema_errors() {
    let cases = [
        "fields[0]:\nchildren[0]:",
        "name: root\nextra: 1",
        "name: 5",
        "name: root\nfields[1]:\n  - i32: 1.5",
        "name: root\nfields[1]:\n  - u8: 300",
        "name: root\nfields[1]:\n  - quat[3]: 0.0,0.0,1.0",
        "name: root\nchildren[1]:\n  - fields[0]:",
    ];
    for input in cases {
        assert!(
            matches!(Node::from_text(input), Err(Error::InvalidDocument(_))),
            "{:?}",
            input
        );
    }
}

#[test]
fn test_blank_lines_and_crlf() {
    let text = "name: root\r\n\r\nfields[1]:\r\n  - bool: false\r\n";
    let node = Node::from_text(text).unwrap();
    assert_eq!(node.fields(), &[Field::Bool(false)]);
    assert!(node.children().is_empty());
}

#[test]
fn test_node_through_serde_json() {
    let doc = to_document(&camera()).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_value_through_serde_json() {
    let value = to_document(&camera()).unwrap().to_value();
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["name"], "root");
    assert_eq!(json["fields"][4]["ints"], serde_json::json!([1, 2, 4]));

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(Node::from_value(back).unwrap(), Node::from_value(value).unwrap());
}

#[test]
fn test_document_root_must_be_object() {
    assert!(to_string(&tree_value!([1, 2])).is_err());
    assert!(to_string_with_options(&Value::Null, TreeOptions::default()).is_err());
    assert_eq!(from_str("").unwrap(), tree_value!({}));
}
