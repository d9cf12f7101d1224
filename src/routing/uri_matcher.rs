//! URI template matcher.
//!
//! # Template Grammar
//! ```text
//! template  = segment *( "/" segment )
//! segment   = literal | "$" name | "#" name | "@" name | "(" type ")" name
//!
//! $name        any value, bound as a string
//! #name        numeric value, bound as an integer
//! @name        list, split on the first of ; , : | present in the value
//! (Type)name   value resolved through the object registry
//! ```
//!
//! # Data Flow
//! ```text
//! request URI
//!     → normalize (url-decode, strip query string)
//!     → exact comparison with template  → match, parameters untouched
//!     → segment-wise comparison         → match, parameters replaced
//!     → first failing segment           → next template
//! ```
//!
//! # Design Decisions
//! - Literal equality is checked before a segment is read as a placeholder
//! - Matching stops at the first failing segment; bindings collected for a
//!   failed template are dropped
//! - Templates are tried in registration order, alternates within a route
//!   in listed order

use std::sync::Arc;

use crate::container::Container;
use crate::mvc::request::{ActionParameters, ParameterValue, Request};
use crate::routing::error::RoutingError;
use crate::routing::matcher::Matcher;

const SIGIL_STRING: char = '$';
const SIGIL_NUMBER: char = '#';
const SIGIL_LIST: char = '@';
const SIGIL_OBJECT: char = '(';

/// Separators honoured by `@name` placeholders, in priority order.
const LIST_SEPARATORS: [char; 4] = [';', ',', ':', '|'];

#[derive(Debug, Clone)]
struct UriRoute {
    uris: Vec<String>,
    controller: String,
    action: String,
}

/// How a template matched.
#[derive(Debug, PartialEq)]
enum TemplateMatch {
    Exact,
    Bound(ActionParameters),
}

/// Matches request URIs against configured templates.
#[derive(Debug)]
pub struct UriMatcher {
    container: Arc<Container>,
    routes: Vec<UriRoute>,
}

impl UriMatcher {
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            routes: Vec::new(),
        }
    }

    fn match_template(&self, template: &str, uri: &str) -> Result<Option<TemplateMatch>, RoutingError> {
        if template == uri {
            return Ok(Some(TemplateMatch::Exact));
        }

        let template_parts: Vec<&str> = template.split('/').collect();
        let uri_parts: Vec<&str> = uri.split('/').collect();
        if template_parts.len() != uri_parts.len() {
            return Ok(None);
        }

        let mut parameters = ActionParameters::new();
        for (template_part, uri_part) in template_parts.iter().zip(&uri_parts) {
            if !self.match_uri_part(template_part, uri_part, &mut parameters)? {
                return Ok(None);
            }
        }

        Ok(Some(TemplateMatch::Bound(parameters)))
    }

    fn match_uri_part(
        &self,
        template_part: &str,
        uri_part: &str,
        parameters: &mut ActionParameters,
    ) -> Result<bool, RoutingError> {
        if template_part == uri_part {
            return Ok(true);
        }

        let mut chars = template_part.chars();
        let Some(sigil) = chars.next() else {
            return Ok(false);
        };
        let name = chars.as_str();

        match sigil {
            SIGIL_STRING => {
                parameters.insert(name, ParameterValue::String(uri_part.to_string()));
                Ok(true)
            }
            SIGIL_NUMBER => match coerce_integer(uri_part) {
                Some(number) => {
                    parameters.insert(name, ParameterValue::Integer(number));
                    Ok(true)
                }
                None => Ok(false),
            },
            SIGIL_LIST => {
                parameters.insert(name, ParameterValue::List(split_list(uri_part)));
                Ok(true)
            }
            SIGIL_OBJECT => {
                let Some((class, name)) = name.split_once(')') else {
                    return Ok(false);
                };
                if class.is_empty() {
                    return Ok(false);
                }
                let object = self.container.objects().resolve(class, uri_part)?;
                parameters.insert(name, ParameterValue::Object(object));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Matcher for UriMatcher {
    fn matches(&self, request: &mut Request) -> Result<bool, RoutingError> {
        let uri = normalize_uri(request.request_uri());

        for route in &self.routes {
            for template in &route.uris {
                let Some(matched) = self.match_template(template, &uri)? else {
                    continue;
                };

                tracing::debug!(
                    template = %template,
                    controller = %route.controller,
                    action = %route.action,
                    "URI template matched"
                );

                if let TemplateMatch::Bound(parameters) = matched {
                    request.set_controller_action_parameters(parameters);
                }
                request.set_controller_name(route.controller.clone());
                if !route.action.is_empty() {
                    request.set_controller_action_name(&route.action);
                }
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn add_route_configuration(&mut self, uris: Vec<String>, controller: String, action: String) {
        self.routes.push(UriRoute {
            uris,
            controller,
            action,
        });
    }
}

/// Url-decode a request URI and drop its query string.
///
/// `+` decodes to a space; invalid UTF-8 is replaced.
pub fn normalize_uri(uri: &str) -> String {
    let plus_decoded = uri.replace('+', " ");
    let bytes = urlencoding::decode_binary(plus_decoded.as_bytes());
    let mut decoded = String::from_utf8_lossy(&bytes).into_owned();
    if let Some(pos) = decoded.find('?') {
        decoded.truncate(pos);
    }
    decoded
}

/// Whether `value` is a numeric string: optional surrounding whitespace,
/// optional sign, decimal digits with an optional fraction, optional exponent.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = trimmed.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        pos += 1;
        if pos < bytes.len() && matches!(bytes[pos], b'+' | b'-') {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

/// Integer value of a numeric string, truncating fractions.
///
/// `None` if not numeric or not finite.
pub fn coerce_integer(value: &str) -> Option<i64> {
    if !is_numeric(value) {
        return None;
    }
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(number) => Some(number),
        // Overflowing exponents parse to infinity and are rejected.
        Err(_) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .map(|float| float.trunc() as i64),
    }
}

/// Split a list segment on the highest-priority separator it contains.
pub fn split_list(value: &str) -> Vec<String> {
    match LIST_SEPARATORS.iter().find(|sep| value.contains(**sep)) {
        Some(sep) => value.split(*sep).map(str::to_string).collect(),
        None => vec![value.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryProvider, Record};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct User {
        name: String,
    }

    impl Record for User {}

    #[derive(Debug, PartialEq)]
    struct Slug(String);

    fn container() -> Arc<Container> {
        let users = Arc::new(MemoryProvider::new());
        users.insert("42", User { name: "ada".into() });

        let mut container = Container::new();
        container
            .objects_mut()
            .register_record::<User>("User", users)
            .register("Slug", |s: &str| Ok::<_, std::convert::Infallible>(Slug(s.to_uppercase())));
        Arc::new(container)
    }

    fn matcher() -> UriMatcher {
        let mut matcher = UriMatcher::new(container());
        let routes = [
            ("/static", "StaticController", "static"),
            ("/test/number/#param", "NumberController", "number"),
            ("/test/array/@params", "ArrayController", "array"),
            ("/test/string/$param", "StringController", "string"),
            ("/test/combined/#param1/$param2/@param3", "CombinedController", "combined"),
            ("/users/(User)user", "UserController", "show"),
            ("/slugs/(Slug)slug", "SlugController", ""),
            ("/$page/edit", "PageController", "edit"),
        ];
        for (uri, controller, action) in routes {
            matcher.add_route_configuration(vec![uri.into()], controller.into(), action.into());
        }
        matcher
    }

    fn run(uri: &str) -> (bool, Request) {
        let mut request = Request::with_uri(uri);
        let matched = matcher().matches(&mut request).unwrap();
        (matched, request)
    }

    fn param<'a>(request: &'a Request, name: &str) -> &'a ParameterValue {
        request.controller_action_parameters().get(name).unwrap()
    }

    #[test]
    fn test_static_uri_matched() {
        let (matched, request) = run("/static");
        assert!(matched);
        assert_eq!(request.controller_name(), "StaticController");
        assert_eq!(request.controller_action_name(), "static");
        assert!(request.controller_action_parameters().is_empty());
    }

    #[test]
    fn test_query_string_and_encoding_ignored() {
        let (matched, request) = run("/st%61tic?page=2");
        assert!(matched);
        assert_eq!(request.controller_name(), "StaticController");
    }

    #[test]
    fn test_combined_placeholders_matched() {
        let (matched, request) = run("/test/combined/272123/TheTestString/a;b;c;d");
        assert!(matched);
        assert_eq!(request.controller_name(), "CombinedController");
        assert_eq!(request.controller_action_name(), "combined");
        assert_eq!(param(&request, "param1"), &ParameterValue::Integer(272123));
        assert_eq!(param(&request, "param2").as_str(), Some("TheTestString"));
        assert_eq!(param(&request, "param3").as_list().unwrap(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_string_placeholder_matched() {
        let (matched, request) = run("/test/string/TheTestString");
        assert!(matched);
        assert_eq!(request.controller_name(), "StringController");
        assert_eq!(param(&request, "param").as_str(), Some("TheTestString"));
    }

    #[test]
    fn test_number_placeholder_matched() {
        let (matched, request) = run("/test/number/21567283");
        assert!(matched);
        assert_eq!(request.controller_name(), "NumberController");
        assert_eq!(request.controller_action_name(), "number");
        assert_eq!(param(&request, "param").as_integer(), Some(21567283));
    }

    #[test]
    fn test_number_placeholder_rejects_text() {
        let (matched, request) = run("/test/number/abc");
        assert!(!matched);
        assert_eq!(request.controller_name(), "");
    }

    #[test]
    fn test_array_placeholder_separators() {
        for uri in ["/test/array/a;b;c;d", "/test/array/a,b,c,d", "/test/array/a:b:c:d", "/test/array/a|b|c|d"] {
            let (matched, request) = run(uri);
            assert!(matched, "{uri}");
            assert_eq!(request.controller_name(), "ArrayController");
            assert_eq!(param(&request, "params").as_list().unwrap(), ["a", "b", "c", "d"], "{uri}");
        }
    }

    #[test]
    fn test_array_placeholder_single_value() {
        let (_, request) = run("/test/array/solo");
        assert_eq!(param(&request, "params").as_list().unwrap(), ["solo"]);
    }

    #[test]
    fn test_unknown_uri_not_matched() {
        let (matched, request) = run("/unknownuri");
        assert!(!matched);
        assert_eq!(request.controller_name(), "");
        assert_eq!(request.controller_action_name(), "index");
        assert!(request.controller_action_parameters().is_empty());
    }

    #[test]
    fn test_record_placeholder() {
        let (matched, request) = run("/users/42");
        assert!(matched);
        assert_eq!(param(&request, "user").as_object::<User>().unwrap().name, "ada");

        let (_, request) = run("/users/7");
        assert_eq!(param(&request, "user").as_object::<User>(), Some(&User::default()));
    }

    #[test]
    fn test_constructed_placeholder_keeps_default_action() {
        let (matched, request) = run("/slugs/hello");
        assert!(matched);
        assert_eq!(request.controller_action_name(), "index");
        assert_eq!(param(&request, "slug").as_object::<Slug>(), Some(&Slug("HELLO".into())));
    }

    #[test]
    fn test_unknown_object_type_is_an_error() {
        let mut matcher = UriMatcher::new(container());
        matcher.add_route_configuration(vec!["/x/(Ghost)g".into()], "X".into(), "x".into());
        let err = matcher.matches(&mut Request::with_uri("/x/1")).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownObjectType(ref class) if class == "Ghost"));
    }

    #[test]
    fn test_literal_checked_before_sigil() {
        let mut matcher = UriMatcher::new(container());
        matcher.add_route_configuration(vec!["/price/$amount".into()], "Price".into(), "show".into());
        let mut request = Request::with_uri("/price/$amount");
        assert!(matcher.matches(&mut request).unwrap());
        assert!(request.controller_action_parameters().is_empty());
    }

    #[test]
    fn test_failed_template_does_not_leak_bindings() {
        let mut request = Request::with_uri("/about/edit/extra");
        let mut previous = ActionParameters::new();
        previous.insert("kept", ParameterValue::Integer(1));
        request.set_controller_action_parameters(previous.clone());

        let mut matcher = matcher();
        matcher.add_route_configuration(vec!["/$page/show/#id".into()], "PageController".into(), "show".into());

        assert!(!matcher.matches(&mut request).unwrap());
        assert_eq!(request.controller_action_parameters(), &previous);
    }

    #[test]
    fn test_alternate_uris_tried_in_order() {
        let mut matcher = UriMatcher::new(container());
        matcher.add_route_configuration(
            vec!["/about/config".into(), "/about/config/".into()],
            "About".into(),
            "index".into(),
        );
        let mut request = Request::with_uri("/about/config/");
        assert!(matcher.matches(&mut request).unwrap());
        assert_eq!(request.controller_name(), "About");
    }

    #[test]
    fn test_normalize_uri() {
        assert_eq!(normalize_uri("/a%20b?x=1"), "/a b");
        assert_eq!(normalize_uri("/a+b"), "/a b");
        assert_eq!(normalize_uri("/q%3Fx"), "/q");
        assert_eq!(normalize_uri("/plain"), "/plain");
    }

    #[test]
    fn test_is_numeric() {
        for value in ["0", "42", "-7", "+3", "1.5", ".5", "5.", "1e3", "2.5E-2", " 12", "12 "] {
            assert!(is_numeric(value), "{value}");
        }
        for value in ["", "abc", "12abc", "0x1A", "1e", ".", "-", "inf", "NaN", "1 2"] {
            assert!(!is_numeric(value), "{value}");
        }
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce_integer("21567283"), Some(21567283));
        assert_eq!(coerce_integer("-4.9"), Some(-4));
        assert_eq!(coerce_integer("1.5e3"), Some(1500));
        assert_eq!(coerce_integer("nope"), None);
        assert!(is_numeric("1e400"));
        assert_eq!(coerce_integer("1e400"), None);
    }

    #[test]
    fn test_split_list_priority() {
        assert_eq!(split_list("a,b;c"), ["a,b", "c"]);
        assert_eq!(split_list("a|b:c"), ["a|b", "c"]);
        assert_eq!(split_list("a"), ["a"]);
    }
}
