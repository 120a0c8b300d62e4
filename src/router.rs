use wasm_bindgen::JsValue;

use digibloom_core::slug::is_valid_slug;

/// The two shareable locations: the garden itself and a single flower.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Flower(String),
}

impl Route {
    pub(crate) fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Flower(slug) => format!("/flower/{slug}"),
        }
    }
}

/// Parse a pathname. Anything that is not a well-formed `/flower/{slug}`
/// is treated as home rather than an error.
pub(crate) fn parse_path(path: &str) -> Route {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    match (segments.next(), segments.next(), segments.next()) {
        (Some("flower"), Some(slug), None) if is_valid_slug(slug) => {
            Route::Flower(slug.to_string())
        }
        _ => Route::Home,
    }
}

pub(crate) fn current_route() -> Route {
    let Some(window) = web_sys::window() else {
        return Route::Home;
    };
    match window.location().pathname() {
        Ok(path) => parse_path(&path),
        Err(_) => Route::Home,
    }
}

/// Client-side navigation: swap the location without a reload. Back and
/// forward then replay these entries through popstate.
pub(crate) fn push_route(route: &Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&route.path()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_to_routes() {
        assert_eq!(parse_path("/"), Route::Home);
        assert_eq!(parse_path(""), Route::Home);
        assert_eq!(
            parse_path("/flower/hope-ab12cd34"),
            Route::Flower("hope-ab12cd34".to_string())
        );
        // Trailing content or invalid slugs fall back to home.
        assert_eq!(parse_path("/flower/hope/extra"), Route::Home);
        assert_eq!(parse_path("/flower/Not%20A%20Slug"), Route::Home);
        assert_eq!(parse_path("/garden"), Route::Home);
    }

    #[test]
    fn routes_print_shareable_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(
            Route::Flower("red-tulip-ab12cd34".to_string()).path(),
            "/flower/red-tulip-ab12cd34"
        );
    }
}
