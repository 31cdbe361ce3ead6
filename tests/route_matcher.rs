use pattern_router_rs::{Route, RouteError, RouteMatcher};

fn route(pattern: &str, paths: Option<&str>) -> Route {
    Route::new(pattern, paths.map(Into::into), None).expect("route should build")
}

#[test]
fn literal_pattern_compares_by_equality() {
    let route = route("/about/team", Some("About::team"));
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    assert!(matches!(matcher, RouteMatcher::Literal(_)));
    assert!(matcher.matches("/about/team"));
    assert!(!matcher.matches("/about/team/"));
    assert!(!matcher.matches("/about"));
}

#[test]
fn literal_match_resolves_declared_defaults() {
    let route = route("/login", Some("Sessions::start"));
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    let resolved = matcher
        .resolve("/login", route.paths())
        .expect("path should match");
    assert!(resolved.contains(&("controller".to_string(), "sessions".to_string())));
    assert!(resolved.contains(&("action".to_string(), "start".to_string())));

    assert!(matcher.resolve("/logout", route.paths()).is_none());
}

#[test]
fn anchored_pattern_resolves_named_captures() {
    let route = route("/user/{id:[0-9]+}", Some("Users::show"));
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    assert!(matches!(matcher, RouteMatcher::Anchored(_)));
    assert!(matcher.matches("/user/123"));
    assert!(!matcher.matches("/user/abc"));
    assert!(!matcher.matches("/user/123/extra"));

    let resolved = matcher
        .resolve("/user/123", route.paths())
        .expect("path should match");
    assert!(resolved.contains(&("id".to_string(), "123".to_string())));
    assert!(resolved.contains(&("controller".to_string(), "users".to_string())));
}

#[test]
fn anonymous_groups_keep_named_ordinals_aligned() {
    let route = route("/files/(pub|priv)/{name}", None);
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    let resolved = matcher
        .resolve("/files/pub/report", route.paths())
        .expect("path should match");
    assert_eq!(resolved, vec![("name".to_string(), "report".to_string())]);
}

#[test]
fn shorthand_markers_match_end_to_end() {
    let route = route("/:controller/:action/:int", None);
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    assert!(matcher.matches("/posts/show/42"));
    assert!(!matcher.matches("/posts/show/fourty-two"));
}

#[test]
fn predelimited_pattern_is_used_as_supplied() {
    let route = route("#^/custom/.*$#", None);
    let matcher = RouteMatcher::for_route(&route).expect("matcher should build");

    assert!(matcher.matches("/custom/anything/at/all"));
    assert!(!matcher.matches("/other"));
}

#[test]
fn rejected_compiled_regex_surfaces_the_engine_error() {
    let route = route("#^/a(b$#", None);
    let err = RouteMatcher::for_route(&route).expect_err("unbalanced group should be rejected");
    match err {
        RouteError::InvalidCompiledRegex { pattern, .. } => assert_eq!(pattern, "#^/a(b$#"),
        other => panic!("expected invalid-compiled-regex error, got {other:?}"),
    }
}
