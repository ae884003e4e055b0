/// Client-side routes. Switching between them never touches the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// `/`: the fish cards.
    #[default]
    Listing,
    /// `/create`: the add-fish form.
    Create,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Listing => "/",
            Route::Create => "/create",
        }
    }

    /// Resolve a path. `/` matches exactly; `/create` also matches below it.
    pub fn from_path(path: &str) -> Option<Self> {
        if path == "/" {
            Some(Route::Listing)
        } else if path == "/create" || path.starts_with("/create/") {
            Some(Route::Create)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Listing));
        assert_eq!(Route::from_path("/create"), Some(Route::Create));
        assert_eq!(Route::from_path("/create/extra"), Some(Route::Create));
        assert_eq!(Route::from_path("/creates"), None);
        assert_eq!(Route::from_path("/fish"), None);
        assert_eq!(Route::from_path(Route::Create.path()), Some(Route::Create));
        assert_eq!(Route::default(), Route::Listing);
    }
}
