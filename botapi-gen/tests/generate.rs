use std::io;

use botapi_gen::{Config, Outputs, VERSION_PLACEHOLDER, generate};
use botapi_schema::ast::Declaration;
use botapi_schema::parse_schema_file;

struct Generated {
    common: String,
    types: String,
    enums: String,
    unions: String,
    methods: String,
}

fn generate_with(src: &str, config: &Config) -> io::Result<Generated> {
    let decls: Vec<Declaration> = parse_schema_file(src).collect::<Result<_, _>>().unwrap();
    let mut outputs = Outputs {
        common: Vec::new(),
        types: Vec::new(),
        enums: Vec::new(),
        unions: Vec::new(),
        methods: Vec::new(),
    };
    generate(&decls, config, &mut outputs)?;
    let text = |bytes: Vec<u8>| String::from_utf8(bytes).unwrap();
    Ok(Generated {
        common: text(outputs.common),
        types: text(outputs.types),
        enums: text(outputs.enums),
        unions: text(outputs.unions),
        methods: text(outputs.methods),
    })
}

fn gen_default(src: &str) -> Generated {
    generate_with(src, &Config::default()).unwrap()
}

const USERS: &str = "
user id:int first_name:string last_name:?string = User;
message message_id:int from:?User reply_to_message:?Message = Message;
";

// ── Types ─────────────────────────────────────────────────────────────────────

#[test]
fn structs_and_optional_fields() {
    let out = gen_default(USERS);
    assert!(out.types.starts_with("// @generated"));
    assert!(out.types.contains("pub mod types {"));
    assert!(out.types.contains("pub struct User {"));
    assert!(out.types.contains("pub id: i64,"));
    assert!(out.types.contains("pub last_name: Option<String>,"));
    assert!(out.types.contains("pub from: Option<crate::types::User>,"));
    assert!(out.types.contains("impl botapi_builder::Construct for User"));
    assert!(out.types.contains("last_name: args.take(\"last_name\")?,"));
    assert!(out.types.contains(".optional(\"last_name\", &self.last_name)"));
    assert!(out.types.contains(".field(\"id\", &self.id)"));
}

#[test]
fn self_reaching_fields_are_boxed() {
    let out = gen_default(USERS);
    assert!(out.types.contains("pub reply_to_message: Option<Box<crate::types::Message>>,"));
}

#[test]
fn recursion_through_abstract_types_is_boxed() {
    let src = "
chat id:int pinned:?MessageOrigin = Chat;
messageOriginChat sender_chat:Chat = MessageOrigin;
messageOriginUser sender_user:User = MessageOrigin;
user id:int = User;
";
    let out = gen_default(src);
    assert!(out.types.contains("pub pinned: Option<Box<crate::enums::MessageOrigin>>,"));
    assert!(out.types.contains("pub sender_chat: Box<crate::types::Chat>,"));
    assert!(out.types.contains("pub sender_user: crate::types::User,"));
}

#[test]
fn vectors_nest() {
    let src = "
photoSize file_id:string = PhotoSize;
userProfilePhotos total_count:int photos:Vector<Vector<PhotoSize>> = UserProfilePhotos;
";
    let out = gen_default(src);
    assert!(out.types.contains("pub photos: Vec<Vec<crate::types::PhotoSize>>,"));
    assert!(out.common.contains(
        "array_type: Some(&botapi_builder::ArrayType::Nested(&botapi_builder::ArrayType::Element(\"PhotoSize\")))"
    ));
    assert!(out.common.contains("ty: Some(\"array\")"));
}

#[test]
fn keywords_are_escaped() {
    let out = gen_default("messageEntity type:string offset:int = MessageEntity;");
    assert!(out.types.contains("pub r#type: String,"));
    assert!(out.types.contains("r#type: args.take(\"type\")?,"));
    assert!(out.types.contains(".field(\"type\", &self.r#type)"));
}

// ── Abstract types ────────────────────────────────────────────────────────────

const MEMBERS: &str = r#"
user id:int = User;
chatMemberOwner {status="creator"} status:string user:User = ChatMember;
chatMemberLeft {status="left"} {user} status:string user:User = ChatMember;
"#;

#[test]
fn abstract_types_become_enums() {
    let out = gen_default(MEMBERS);
    assert!(out.enums.contains("pub enum ChatMember {"));
    assert!(out.enums.contains("Owner(crate::types::ChatMemberOwner),"));
    assert!(out.enums.contains("Left(crate::types::ChatMemberLeft),"));
    assert!(out.enums.contains("impl From<crate::types::ChatMemberOwner> for ChatMember"));
    assert!(out.enums.contains("impl TryFrom<ChatMember> for crate::types::ChatMemberOwner"));
}

#[test]
fn conversions_follow_config() {
    let config = Config { impl_from_type: false, impl_from_enum: false, ..Config::default() };
    let out = generate_with(MEMBERS, &config).unwrap();
    assert!(!out.enums.contains("impl From<"));
    assert!(!out.enums.contains("impl TryFrom<"));
}

#[test]
fn inheritors_keep_declaration_order() {
    let out = gen_default(MEMBERS);
    assert!(out.common.contains("inheritors: &[\"ChatMemberOwner\", \"ChatMemberLeft\"],"));
    let owner = out.enums.find("Owner(").unwrap();
    let left = out.enums.find("Left(").unwrap();
    assert!(owner < left);
}

#[test]
fn checks_become_build_conditions() {
    let out = gen_default(MEMBERS);
    assert!(out.common.contains(
        "build_if: Some(&botapi_builder::FieldEquals { field: \"status\", value: botapi_builder::Literal::Str(\"creator\") }),"
    ));
    assert!(out.common.contains("Some(&botapi_builder::AllOf(&["));
    assert!(out.common.contains("&botapi_builder::HasField(\"user\") as &dyn botapi_builder::Checker"));
}

// ── Value enums ───────────────────────────────────────────────────────────────

#[test]
fn value_enums() {
    let src = "
---enums---
ChatType:string = private | group | supergroup | channel;
Priority:int = low=1 | high=2;
ParseMode = Markdown | MarkdownV2 | HTML;
";
    let out = gen_default(src);
    assert!(out.enums.contains("pub enum ChatType {"));
    assert!(out.enums.contains("        Supergroup,"));
    assert!(out.enums.contains("Self::Private => serde_json::Value::from(\"private\"),"));
    assert!(out.enums.contains("Self::High => serde_json::Value::from(2i64),"));
    assert!(out.enums.contains("Self::Html => serde_json::Value::from(\"HTML\"),"));
    assert!(out.common.contains("backing: botapi_builder::Backing::Int,"));
    assert!(out.common.contains("botapi_builder::EnumMember { name: \"high\", value: botapi_builder::Literal::Int(2) },"));
    assert!(out.common.contains("botapi_builder::EnumMember { name: \"HTML\", value: botapi_builder::Literal::Null },"));
}

// ── Unions and methods ────────────────────────────────────────────────────────

const METHODS: &str = "
---unions---
ChatId = int | string;
---types---
user id:int = User;
message message_id:int = Message;
---methods---
getMe = User;
sendMessage chat_id:ChatId text:string disable_notification:?bool = Message;
editMessageText chat_id:?ChatId text:string = Message|bool;
getUpdates offset:?int limit:int=100 = Vector<Update>;
---types---
update update_id:int message:?Message = Update;
";

#[test]
fn named_and_inline_unions() {
    let out = gen_default(METHODS);
    assert!(out.unions.contains("pub enum ChatId {"));
    assert!(out.unions.contains("Int(i64),"));
    assert!(out.unions.contains("String(String),"));
    assert!(out.unions.contains("impl From<i64> for ChatId"));
    assert!(out.unions.contains("pub enum MessageOrBool {"));
    assert!(out.unions.contains("Message(crate::types::Message),"));
}

#[test]
fn methods_are_structs() {
    let out = gen_default(METHODS);
    assert!(out.methods.contains("pub mod methods {"));
    assert!(out.methods.contains("pub struct SendMessage {"));
    assert!(out.methods.contains("pub chat_id: crate::unions::ChatId,"));
    assert!(out.methods.contains("pub chat_id: Option<crate::unions::ChatId>,"));
    assert!(out.methods.contains("const NAME: &'static str = \"sendMessage\";"));
    assert!(out.methods.contains("type Return = crate::unions::MessageOrBool;"));
    assert!(out.methods.contains("type Return = Vec<crate::types::Update>;"));
    assert!(out.methods.contains(
        "const RETURNS: botapi_builder::ValueDef = botapi_builder::ValueDef { ty: Some(\"Message|bool\"), array_type: None };"
    ));
    // Not buildable unless asked for.
    assert!(!out.methods.contains("impl botapi_builder::Construct for SendMessage"));
    assert!(!out.common.contains("METHOD_SEND_MESSAGE"));
}

#[test]
fn deserializable_methods_are_registered() {
    let config = Config { deserializable_methods: true, ..Config::default() };
    let out = generate_with(METHODS, &config).unwrap();
    assert!(out.methods.contains("impl botapi_builder::Construct for SendMessage"));
    assert!(out.common.contains("\"SendMessage\" => &entries::METHOD_SEND_MESSAGE,"));
    assert!(out.common.contains("ty: Some(\"int|string\")"));
    assert!(out.common.contains("default: Some(|| serde_json::json!(100)),"));
}

// ── Common module ─────────────────────────────────────────────────────────────

#[test]
fn common_module() {
    let out = gen_default(METHODS);
    assert!(out.common.contains(VERSION_PLACEHOLDER));
    assert!(out.common.contains("pub struct Schema;"));
    assert!(out.common.contains("\"User\" => &entries::USER,"));
    assert!(out.common.contains("construct: botapi_builder::construct_with::<crate::types::User>,"));
    assert!(!out.common.contains("pub fn type_names()"));

    let config = Config { gen_type_list: true, ..Config::default() };
    let out = generate_with(METHODS, &config).unwrap();
    assert!(out.common.contains("pub fn type_names()"));
}

#[test]
fn serde_derives_follow_config() {
    let config = Config { impl_serde: true, ..Config::default() };
    let out = generate_with(METHODS, &config).unwrap();
    assert!(out.types.contains("#[derive(serde::Serialize, serde::Deserialize)]"));
    assert!(out.unions.contains("#[serde(untagged)]"));
    assert!(!gen_default(METHODS).types.contains("serde::Serialize"));
}

// ── Validation ────────────────────────────────────────────────────────────────

fn error_of(src: &str) -> io::Error {
    match generate_with(src, &Config::default()) {
        Ok(_) => panic!("expected generation to fail"),
        Err(e) => e,
    }
}

#[test]
fn unknown_types_are_rejected() {
    let err = error_of("message from:Sender = Message;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("Sender"), "{err}");
}

#[test]
fn vectors_inside_unions_are_rejected() {
    let err = error_of("thing items:Vector<int>|string = Thing;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn invalid_defaults_are_rejected() {
    let err = error_of("thing limit:int=abc = Thing;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("limit"), "{err}");
}

#[test]
fn duplicate_types_are_rejected() {
    let err = error_of("user id:int = User;\nuser name:string = User;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn generics_only_on_vector() {
    let err = error_of("thing items:List<int> = Thing;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn nullable_parameters_only_default_to_null() {
    let err = error_of("thing offset:?int=5 = Thing;");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("offset"), "{err}");

    let out = gen_default("thing offset:?int=null limit:int=5 = Thing;");
    assert!(out.types.contains("pub offset: Option<i64>,"));
    assert!(out.types.contains("pub limit: i64,"));
}
