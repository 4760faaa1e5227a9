use botapi_schema::ast::{Backing, Category, Declaration, Definition, ParameterType};
use botapi_schema::errors::{ParamParseError, ParseError};
use botapi_schema::parse_schema_file;

fn parse(src: &str) -> Vec<Declaration> {
    parse_schema_file(src).collect::<Result<_, _>>().unwrap()
}

fn definitions(src: &str) -> Vec<Definition> {
    parse(src)
        .into_iter()
        .map(|d| match d {
            Declaration::Definition(def) => def,
            other => panic!("expected a definition, got {other:?}"),
        })
        .collect()
}

#[test]
fn parses_simple_type() {
    let defs = definitions("user id:int first_name:string = User;");
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "user");
    assert_eq!(defs[0].category, Category::Types);
    assert_eq!(defs[0].ty.to_string(), "User");
    assert_eq!(defs[0].params[1].name, "first_name");
}

#[test]
fn parses_method_category() {
    let src = "
---methods---
getUpdates offset:?int limit:int=100 = Vector<Update>;
";
    let defs = definitions(src);
    assert_eq!(defs[0].category, Category::Methods);
    assert_eq!(defs[0].name, "getUpdates");
    let ret = defs[0].ty.single().unwrap();
    assert!(ret.is_vector());
    assert_eq!(ret.to_string(), "Vector<Update>");
}

#[test]
fn parses_nullable_and_default_params() {
    let defs = definitions("getUpdates offset:?int limit:int=100 mode:string=\"HTML\" = Updates;");
    let params = &defs[0].params;
    assert!(matches!(params[0].ty, ParameterType::Normal { nullable: true, .. }));
    assert!(params[0].is_optional());
    assert_eq!(params[1].default.as_deref(), Some("100"));
    assert_eq!(params[2].default.as_deref(), Some("\"HTML\""));
    assert!(!matches!(params[2].ty, ParameterType::Normal { nullable: true, .. }));
}

#[test]
fn parses_any_param() {
    let defs = definitions("callbackGame payload:any = CallbackGame;");
    assert_eq!(defs[0].params[0].ty, ParameterType::Any);
}

#[test]
fn parses_union_return_type() {
    let defs = definitions("---methods---\neditMessageText text:string = Message|bool;");
    let alts: Vec<_> = defs[0].ty.alternatives.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(alts, ["Message", "bool"]);
    assert!(defs[0].ty.alternatives[1].scalar);
}

#[test]
fn parses_nested_vectors() {
    let defs = definitions("userProfilePhotos total_count:int photos:Vector<Vector<PhotoSize>> = UserProfilePhotos;");
    assert_eq!(defs[0].params[1].ty.to_string(), "Vector<Vector<PhotoSize>>");
}

#[test]
fn parses_checks() {
    let src = r#"chatMemberLeft {status="left"} {user} status:string user:User = ChatMember;"#;
    let defs = definitions(src);
    let checks = &defs[0].checks;
    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].field, "status");
    assert_eq!(checks[0].value.as_deref(), Some("\"left\""));
    assert_eq!(checks[1].field, "user");
    assert_eq!(checks[1].value, None);
    assert_eq!(defs[0].params.len(), 2);
}

#[test]
fn display_round_trips() {
    let src = r#"replyKeyboardRemove {remove_keyboard=true} remove_keyboard:bool selective:?bool = ReplyKeyboardRemove"#;
    let defs = definitions(&format!("{src};"));
    assert_eq!(defs[0].to_string(), src);
}

#[test]
fn parses_enums() {
    let src = r#"
---enums---
ChatType:string = private | group | supergroup | channel;
Priority:int = low=1 | high=2;
ParseMode = Markdown | MarkdownV2 | HTML;
MemberStatus:string = owner="creator" | banned="kicked";
"#;
    let decls = parse(src);
    let enums: Vec<_> = decls
        .into_iter()
        .map(|d| match d {
            Declaration::Enum(e) => e,
            other => panic!("expected an enum, got {other:?}"),
        })
        .collect();

    assert_eq!(enums[0].backing, Backing::String);
    assert_eq!(enums[0].members.len(), 4);
    assert_eq!(enums[0].members[2].string_value(), "supergroup");

    assert_eq!(enums[1].backing, Backing::Int);
    assert_eq!(enums[1].members[1].int_value(), Some(2));

    assert_eq!(enums[2].backing, Backing::Name);
    assert_eq!(enums[2].members[1].name, "MarkdownV2");

    assert_eq!(enums[3].members[0].string_value(), "creator");
}

#[test]
fn parses_unions() {
    let decls = parse("---unions---\nChatId = int | string;");
    let Declaration::Alias(alias) = &decls[0] else { panic!("expected an alias") };
    assert_eq!(alias.name, "ChatId");
    assert_eq!(alias.ty.to_string(), "int|string");
}

#[test]
fn skips_blank_lines_and_comments() {
    let src = "
// BOT API 7.0
user id:int = User;

// another comment
chat id:int = Chat;
";
    assert_eq!(parse(src).len(), 2);
}

#[test]
fn multi_line_definition() {
    let src = "message message_id:int
    date:int
    chat:Chat = Message;";
    assert_eq!(definitions(src)[0].params.len(), 3);
}

#[test]
fn reads_version_header() {
    assert_eq!(botapi_schema::api_version("// BOT API 7.0\nuser = User;"), Some("7.0"));
    assert_eq!(botapi_schema::api_version("// something else"), None);
}

// ── Errors ────────────────────────────────────────────────────────────────────

fn first_error(src: &str) -> ParseError {
    parse_schema_file(src).find_map(Result::err).unwrap()
}

#[test]
fn missing_type_is_an_error() {
    assert_eq!(first_error("user id:int;"), ParseError::MissingType);
}

#[test]
fn bad_name_is_an_error() {
    assert_eq!(first_error("9user id:int = User;"), ParseError::MissingName);
}

#[test]
fn param_without_type_is_an_error() {
    assert_eq!(
        first_error("user id = User;"),
        ParseError::InvalidParam(ParamParseError::NotImplemented)
    );
}

#[test]
fn unclosed_generic_is_an_error() {
    assert_eq!(
        first_error("user ids:Vector<int = User;"),
        ParseError::InvalidParam(ParamParseError::InvalidGeneric)
    );
}

#[test]
fn empty_default_is_an_error() {
    assert_eq!(
        first_error("user id:int= = User;"),
        ParseError::InvalidParam(ParamParseError::MissingDefault)
    );
}

#[test]
fn bad_check_is_an_error() {
    assert_eq!(first_error("user {=1} id:int = User;"), ParseError::InvalidCheck);
}

#[test]
fn bad_enums_are_errors() {
    assert_eq!(first_error("---enums---\nLevel:float = a | b;"), ParseError::InvalidEnum);
    assert_eq!(first_error("---enums---\nLevel:int = a | b;"), ParseError::InvalidEnum);
    assert_eq!(first_error("---enums---\nLevel = a=1 | b;"), ParseError::InvalidEnum);
}

#[test]
fn unknown_section_is_an_error() {
    assert_eq!(first_error("---functions---\n"), ParseError::NotImplemented);
}
