use pattern_router_rs::compile_pattern;
use regex::Regex;

const ID_FRAGMENT: &str = "/([a-zA-Z0-9_-]+)";

fn engine(compiled: &str) -> Regex {
    let body = compiled
        .strip_prefix('#')
        .and_then(|s| s.strip_suffix('#'))
        .expect("compiled pattern should be delimited");
    Regex::new(body).expect("compiled pattern should be accepted by the regex engine")
}

#[test]
fn literal_path_passes_through_verbatim() {
    assert_eq!(compile_pattern("/robots.txt"), "/robots.txt");
    assert_eq!(compile_pattern(""), "");
    assert_eq!(compile_pattern("/about/team"), "/about/team");
}

#[test]
fn colon_without_marker_stays_untouched() {
    assert_eq!(compile_pattern("/foo:bar"), "/foo:bar");
}

#[test]
fn module_controller_action_markers_expand() {
    let compiled = compile_pattern("/:module/:controller/:action");
    assert_eq!(
        compiled,
        format!("#^{ID_FRAGMENT}{ID_FRAGMENT}{ID_FRAGMENT}$#")
    );

    let regex = engine(&compiled);
    let captures = regex
        .captures("/blog/posts/index")
        .expect("path should match the compiled pattern");
    assert_eq!(&captures[1], "blog");
    assert_eq!(&captures[2], "posts");
    assert_eq!(&captures[3], "index");
    assert!(!regex.is_match("/blog/posts/index/extra"));
}

#[test]
fn params_marker_expands_to_trailing_wildcard() {
    let compiled = compile_pattern("/admin/:controller/a/:action/:params");
    assert_eq!(
        compiled,
        format!("#^/admin{ID_FRAGMENT}/a{ID_FRAGMENT}(/.*)*$#")
    );

    let regex = engine(&compiled);
    assert!(regex.is_match("/admin/posts/a/edit"));
    assert!(regex.is_match("/admin/posts/a/edit/2024/05"));
}

#[test]
fn int_marker_expands_to_digits() {
    let compiled = compile_pattern("/posts/:int");
    assert_eq!(compiled, "#^/posts/([0-9]+)$#");

    let regex = engine(&compiled);
    assert!(regex.is_match("/posts/42"));
    assert!(!regex.is_match("/posts/abc"));
}

#[test]
fn namespace_marker_uses_identifier_fragment() {
    let compiled = compile_pattern("/:namespace/:controller");
    assert_eq!(compiled, format!("#^{ID_FRAGMENT}{ID_FRAGMENT}$#"));
}

#[test]
fn repeated_marker_is_replaced_everywhere() {
    let compiled = compile_pattern("/:int/:int");
    assert_eq!(compiled, "#^/([0-9]+)/([0-9]+)$#");
}

#[test]
fn existing_group_triggers_anchoring_without_substitution() {
    assert_eq!(compile_pattern("/terms/(yes|no)"), "#^/terms/(yes|no)$#");
}

#[test]
fn character_class_triggers_anchoring() {
    assert_eq!(compile_pattern("/static/[a-z]+"), "#^/static/[a-z]+$#");
}

#[test]
fn literal_bracket_in_path_is_still_anchored() {
    // Heuristic detection: a literal '[' counts as regex syntax.
    assert_eq!(compile_pattern("/files/[archive]"), "#^/files/[archive]$#");
}
